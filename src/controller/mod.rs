//! Page state for the list + modal form pages.
//!
//! Both pages share one controller, specialised by an [`EntityKind`]: the
//! record listed, the related record offered in the association picker, the
//! form, and the page's messages and validation feedback policy.

mod employees;
mod projects;

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::api::{ApiError, Backend, Resource};
use crate::models::{self, Record};

pub use employees::{EmployeeField, EmployeeForm, Employees};
pub use projects::{ProjectField, ProjectForm, Projects};

/// How a field is edited on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Association,
}

/// What the user sees when a submit is rejected locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFeedback {
    /// Inline flags plus a dedicated "validation failed" modal.
    Modal,
    /// Inline flags only.
    Inline,
}

/// Page-level error texts.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub fetch_records: &'static str,
    pub fetch_related: &'static str,
    pub save: &'static str,
    pub delete: &'static str,
}

/// Form object backing the create/update modal.
pub trait EntityForm: Default + Clone + Debug {
    type Field: Copy + Eq + Hash + Debug + 'static;
    type Record;
    type Payload;

    /// Fields in display order.
    const FIELDS: &'static [Self::Field];

    fn from_record(record: &Self::Record) -> Self;
    fn kind(field: Self::Field) -> FieldKind;

    /// Text shown for a field.
    fn text(&self, field: Self::Field) -> String;
    /// Store a text value, applying any field-specific input mask.
    fn set_text(&mut self, field: Self::Field, value: &str);

    fn date(&self) -> Option<NaiveDate> {
        None
    }
    fn set_date(&mut self, _date: Option<NaiveDate>) {}

    fn selection(&self) -> &[i64];
    fn set_selection(&mut self, ids: Vec<i64>);

    /// Required fields that are currently empty.
    fn missing(&self) -> HashSet<Self::Field>;
    fn payload(&self) -> Self::Payload;
}

/// Type-level description of one page.
pub trait EntityKind {
    type Record: Resource + models::Record + Clone;
    type Related: Resource + models::Record + Clone;
    type Form: EntityForm<Record = Self::Record, Payload = <Self::Record as Resource>::Payload>;

    /// Path the page navigates back to after a save.
    const ROUTE: &'static str;
    const FEEDBACK: ValidationFeedback;
    const MESSAGES: Messages;
}

/// Result of [`CrudController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation rejected the form; nothing was sent.
    Invalid,
    /// Saved and reloaded; the shell should move to this path.
    Saved { navigate_to: &'static str },
    /// The request or the reload failed; the page now shows its error.
    Failed,
}

pub struct CrudController<K: EntityKind> {
    records: Vec<K::Record>,
    related: Vec<K::Related>,
    loading: bool,
    error: Option<String>,
    form_open: bool,
    editing: Option<K::Record>,
    delete_target: Option<i64>,
    form: K::Form,
    errors: HashSet<<K::Form as EntityForm>::Field>,
    validation_open: bool,
}

impl<K: EntityKind> Default for CrudController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityKind> CrudController<K> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            related: Vec::new(),
            loading: true,
            error: None,
            form_open: false,
            editing: None,
            delete_target: None,
            form: K::Form::default(),
            errors: HashSet::new(),
            validation_open: false,
        }
    }

    pub fn records(&self) -> &[K::Record] {
        &self.records
    }

    pub fn related(&self) -> &[K::Related] {
        &self.related
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn editing(&self) -> Option<&K::Record> {
        self.editing.as_ref()
    }

    pub fn delete_target(&self) -> Option<i64> {
        self.delete_target
    }

    pub fn form(&self) -> &K::Form {
        &self.form
    }

    pub fn has_error(&self, field: <K::Form as EntityForm>::Field) -> bool {
        self.errors.contains(&field)
    }

    pub fn is_validation_open(&self) -> bool {
        self.validation_open
    }

    /// Initial load of both collections.
    pub async fn mount<B: Backend>(&mut self, api: &B) {
        info!(route = K::ROUTE, "mounting page");
        self.reload(api).await;
    }

    /// Fetch the page's records, then the related records. Stops at the
    /// first failure and leaves the page in its error state.
    pub async fn reload<B: Backend>(&mut self, api: &B) -> bool {
        let fetched = match api.list::<K::Record>().await {
            Ok(records) => {
                self.records = records;
                true
            }
            Err(err) => {
                self.fail(K::MESSAGES.fetch_records, &err);
                false
            }
        };
        self.loading = false;
        if !fetched {
            return false;
        }

        match api.list::<K::Related>().await {
            Ok(related) => {
                self.related = related;
                true
            }
            Err(err) => {
                self.fail(K::MESSAGES.fetch_related, &err);
                false
            }
        }
    }

    /// Open the form empty, for a new record.
    pub fn open_create(&mut self) {
        self.open_with(None, K::Form::default());
    }

    /// Open the form populated from the record with `id`.
    pub fn open_edit(&mut self, id: i64) -> bool {
        let Some(record) = self.records.iter().find(|r| r.id() == id).cloned() else {
            return false;
        };
        let form = K::Form::from_record(&record);
        self.open_with(Some(record), form);
        true
    }

    fn open_with(&mut self, editing: Option<K::Record>, form: K::Form) {
        self.editing = editing;
        self.form = form;
        self.errors.clear();
        self.validation_open = false;
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
        self.validation_open = false;
    }

    pub fn update_field(&mut self, field: <K::Form as EntityForm>::Field, value: &str) {
        self.form.set_text(field, value);
    }

    pub fn update_date(&mut self, date: Option<NaiveDate>) {
        self.form.set_date(date);
    }

    /// Replace the association selection wholesale.
    pub fn set_selection(&mut self, ids: Vec<i64>) {
        self.form.set_selection(ids);
    }

    /// Recompute the per-field error map. Returns true when the form may be sent.
    pub fn validate(&mut self) -> bool {
        self.errors = self.form.missing();
        self.errors.is_empty()
    }

    pub fn dismiss_validation(&mut self) {
        self.validation_open = false;
    }

    pub async fn submit<B: Backend>(&mut self, api: &B) -> SubmitOutcome {
        if !self.validate() {
            if K::FEEDBACK == ValidationFeedback::Modal {
                self.validation_open = true;
            }
            return SubmitOutcome::Invalid;
        }

        let payload = self.form.payload();
        let saved = match &self.editing {
            Some(record) => api.update::<K::Record>(record.id(), &payload).await,
            None => api.create::<K::Record>(&payload).await,
        };
        if let Err(err) = saved {
            self.fail(K::MESSAGES.save, &err);
            return SubmitOutcome::Failed;
        }

        if !self.reload(api).await {
            return SubmitOutcome::Failed;
        }
        self.close_form();
        SubmitOutcome::Saved {
            navigate_to: K::ROUTE,
        }
    }

    /// First step of a delete: remember the target and ask for confirmation.
    pub fn request_delete(&mut self, id: i64) {
        self.delete_target = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_target = None;
    }

    pub async fn confirm_delete<B: Backend>(&mut self, api: &B) -> bool {
        let Some(id) = self.delete_target else {
            return false;
        };

        if let Err(err) = api.delete::<K::Record>(id).await {
            self.fail(K::MESSAGES.delete, &err);
            return false;
        }

        self.delete_target = None;
        self.reload(api).await
    }

    fn fail(&mut self, message: &'static str, err: &ApiError) {
        error!(error = %err, route = K::ROUTE, "{}", message);
        self.error = Some(message.to_string());
    }
}
