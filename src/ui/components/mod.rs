pub mod date_input;
pub mod modal;
pub mod picker;
