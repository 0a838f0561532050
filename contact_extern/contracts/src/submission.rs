use std::future::Future;

use contact_models::{contact::ContactMessage, submission::SubmissionReceipt};
use thiserror::Error;

/// Delivers validated contact messages.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionApiService: Send + Sync + 'static {
    fn submit(
        &self,
        message: ContactMessage,
    ) -> impl Future<Output = Result<SubmissionReceipt, SubmissionApiError>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmissionApiError {
    #[error("The message was rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionApiService {
    pub fn with_submit(mut self, message: ContactMessage, receipt: SubmissionReceipt) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(Ok(receipt))));
        self
    }

    pub fn with_submit_delayed(
        mut self,
        message: ContactMessage,
        receipt: SubmissionReceipt,
        delay: std::time::Duration,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| {
                Box::pin(async move {
                    tokio::time::sleep(delay).await;
                    Ok::<_, SubmissionApiError>(receipt)
                })
            });
        self
    }

    pub fn with_submit_rejected(mut self, message: ContactMessage, reason: String) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| {
                Box::pin(std::future::ready(Err(SubmissionApiError::Rejected(reason))))
            });
        self
    }

    pub fn with_submit_error(mut self, message: ContactMessage) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(SubmissionApiError::Other(
                    anyhow::anyhow!("connection reset"),
                ))))
            });
        self
    }
}
