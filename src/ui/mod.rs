pub mod components;
pub mod employees;
pub mod page;
pub mod projects;
pub mod shell;
