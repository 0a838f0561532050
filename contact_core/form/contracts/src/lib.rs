use std::future::Future;

use contact_models::{
    field::{ContactField, ContactFormValues, FieldErrors},
    submission::SubmissionReceipt,
};
use thiserror::Error;
use tokio::sync::watch;

/// Drives a single contact form: field bindings, validation, submission and
/// reset.
pub trait ContactFormService: Send + Sync + 'static {
    /// Updates the value bound to `field`.
    fn set_field(&self, field: ContactField, value: impl Into<String>);

    /// Returns a snapshot of the current form state.
    fn state(&self) -> FormState;

    /// Returns a receiver that is notified after every state change.
    fn subscribe(&self) -> watch::Receiver<FormState>;

    /// Validates the current values and submits them.
    ///
    /// Returns [`ContactFormSubmitError::InFlight`] without doing anything if
    /// another submission is still in progress. On success the form is
    /// cleared, on failure the entered values are kept.
    fn submit(
        &self,
    ) -> impl Future<Output = Result<SubmissionReceipt, ContactFormSubmitError>> + Send;

    /// Clears all values, errors and notices.
    fn reset(&self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: ContactFormValues,
    pub errors: FieldErrors,
    pub status: FormStatus,
    pub notice: Option<FormNotice>,
}

impl FormState {
    pub fn field(&self, field: ContactField) -> &str {
        self.values.get(field)
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(field)
    }

    /// Whether the submit control should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.status != FormStatus::Idle
    }

    /// Clears values, errors and notice. The status is left untouched.
    pub fn clear(&mut self) {
        self.values = ContactFormValues::default();
        self.errors = FieldErrors::new();
        self.notice = None;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// A form level message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormNotice {
    Success(String),
    Error(String),
}

#[derive(Debug, Error)]
pub enum ContactFormSubmitError {
    #[error("A submission is already in progress.")]
    InFlight,
    #[error("Invalid input: {0}")]
    Invalid(FieldErrors),
    #[error("The message was rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
