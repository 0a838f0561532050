use std::sync::Arc;

use contact_core_form_contracts::{
    ContactFormService, ContactFormSubmitError, FormNotice, FormState, FormStatus,
};
use contact_extern_contracts::{
    submission::{SubmissionApiError, SubmissionApiService},
    validation::{ValidationApiService, ValidationResponse},
};
use contact_models::{
    field::{ContactField, FieldErrors},
    submission::SubmissionReceipt,
};
use contact_utils::trace_instrument;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

#[cfg(test)]
mod tests;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FAILURE_MESSAGE: &str = "Could not send message. Please try again.";

/// Clones share the same form.
#[derive(Debug, Clone)]
pub struct ContactFormServiceImpl<Validation, Submission> {
    validation: Validation,
    submission: Submission,
    config: ContactFormServiceConfig,
    state: Arc<watch::Sender<FormState>>,
}

#[derive(Debug, Clone)]
pub struct ContactFormServiceConfig {
    pub success_message: Arc<str>,
}

impl Default for ContactFormServiceConfig {
    fn default() -> Self {
        Self {
            success_message: DEFAULT_SUCCESS_MESSAGE.into(),
        }
    }
}

impl<Validation, Submission> ContactFormServiceImpl<Validation, Submission> {
    pub fn new(
        validation: Validation,
        submission: Submission,
        config: ContactFormServiceConfig,
    ) -> Self {
        Self {
            validation,
            submission,
            config,
            state: Arc::new(watch::Sender::new(FormState::default())),
        }
    }
}

/// Marks a submission in flight. Dropping it without calling
/// [`InFlight::finish`] returns the form to [`FormStatus::Idle`].
struct InFlight<'a> {
    state: &'a watch::Sender<FormState>,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self, update: impl FnOnce(&mut FormState)) {
        self.finished = true;
        self.state.send_modify(|state| {
            update(state);
            state.status = FormStatus::Idle;
        });
    }

    fn fail(self, errors: FieldErrors, notice: Option<FormNotice>) {
        self.finish(|state| {
            state.errors = errors;
            state.notice = notice;
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("Submission was cancelled");
            self.state.send_modify(|state| state.status = FormStatus::Idle);
        }
    }
}

impl<Validation, Submission> ContactFormService for ContactFormServiceImpl<Validation, Submission>
where
    Validation: ValidationApiService,
    Submission: SubmissionApiService,
{
    fn set_field(&self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_if_modified(|state| {
            if state.values.get(field) == value {
                return false;
            }
            state.values.set(field, value);
            state.errors.remove(field);
            true
        });
    }

    fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    #[trace_instrument(skip(self))]
    async fn submit(&self) -> Result<SubmissionReceipt, ContactFormSubmitError> {
        let mut values = None;
        self.state.send_if_modified(|state| {
            if state.status != FormStatus::Idle {
                return false;
            }
            state.status = FormStatus::Validating;
            state.errors = FieldErrors::new();
            state.notice = None;
            values = Some(state.values.clone());
            true
        });
        let Some(values) = values else {
            debug!("Ignoring submit while another submission is in progress");
            return Err(ContactFormSubmitError::InFlight);
        };
        let in_flight = InFlight {
            state: &self.state,
            finished: false,
        };

        let message = match self.validation.validate(values).await {
            Ok(ValidationResponse::Valid(message)) => message,
            Ok(ValidationResponse::Invalid(errors)) => {
                debug!(%errors, "Contact form is invalid");
                in_flight.fail(errors.clone(), None);
                return Err(ContactFormSubmitError::Invalid(errors));
            }
            Err(err) => {
                error!("Failed to validate contact form: {err:#}");
                in_flight.fail(
                    FieldErrors::new(),
                    Some(FormNotice::Error(FAILURE_MESSAGE.into())),
                );
                return Err(err.into());
            }
        };

        self.state.send_modify(|state| state.status = FormStatus::Submitting);

        match self.submission.submit(message).await {
            Ok(receipt) => {
                info!(id = %receipt.id, "Contact message sent");
                in_flight.finish(|state| {
                    state.clear();
                    state.notice =
                        Some(FormNotice::Success(self.config.success_message.to_string()));
                });
                Ok(receipt)
            }
            Err(SubmissionApiError::Rejected(reason)) => {
                warn!("Contact message was rejected: {reason}");
                in_flight.fail(
                    FieldErrors::new(),
                    Some(FormNotice::Error(format!("Could not send message: {reason}"))),
                );
                Err(ContactFormSubmitError::Rejected(reason))
            }
            Err(SubmissionApiError::Other(err)) => {
                error!("Failed to submit contact message: {err:#}");
                in_flight.fail(
                    FieldErrors::new(),
                    Some(FormNotice::Error(FAILURE_MESSAGE.into())),
                );
                Err(err.into())
            }
        }
    }

    fn reset(&self) {
        self.state.send_if_modified(|state| {
            let changed =
                !state.values.is_empty() || !state.errors.is_empty() || state.notice.is_some();
            state.clear();
            changed
        });
    }
}
