use std::future::Future;

use contact_models::{
    contact::ContactMessage,
    field::{ContactFormValues, FieldErrors},
};

/// Validates raw form values on behalf of the form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ValidationApiService: Send + Sync + 'static {
    /// Validates `values` as a whole.
    ///
    /// An `Err` means the validator could not be reached, not that the
    /// values are invalid.
    fn validate(
        &self,
        values: ContactFormValues,
    ) -> impl Future<Output = anyhow::Result<ValidationResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResponse {
    Valid(ContactMessage),
    Invalid(FieldErrors),
}

#[cfg(feature = "mock")]
impl MockValidationApiService {
    pub fn with_validate(mut self, values: ContactFormValues, result: ValidationResponse) -> Self {
        self.expect_validate()
            .once()
            .with(mockall::predicate::eq(values))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_validate_delayed(
        mut self,
        values: ContactFormValues,
        result: ValidationResponse,
        delay: std::time::Duration,
    ) -> Self {
        self.expect_validate()
            .once()
            .with(mockall::predicate::eq(values))
            .return_once(move |_| {
                Box::pin(async move {
                    tokio::time::sleep(delay).await;
                    Ok::<_, anyhow::Error>(result)
                })
            });
        self
    }

    pub fn with_validate_error(mut self, values: ContactFormValues) -> Self {
        self.expect_validate()
            .once()
            .with(mockall::predicate::eq(values))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "validator unreachable"
                ))))
            });
        self
    }
}
