use anyhow::ensure;
use contact_extern_contracts::submission::{SubmissionApiError, SubmissionApiService};
use contact_models::{contact::ContactMessage, submission::SubmissionReceipt};
use contact_shared_contracts::{id::IdService, time::TimeService};
use contact_utils::trace_instrument;
use rand::Rng;
use tracing::{info, warn};

use crate::latency::Latency;

pub const SIMULATED_REJECTION_REASON: &str = "Simulated rejection";

/// Accepts contact messages after a simulated round trip and echoes them back.
#[derive(Debug, Clone)]
pub struct SubmissionApiServiceImpl<Id, Time> {
    id: Id,
    time: Time,
    config: SubmissionApiServiceConfig,
}

#[derive(Debug, Clone)]
pub struct SubmissionApiServiceConfig {
    latency: Latency,
    reject_probability: f64,
}

impl SubmissionApiServiceConfig {
    pub fn new(latency: Latency, reject_probability: f64) -> anyhow::Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&reject_probability),
            "reject probability must be between 0 and 1, got {reject_probability}"
        );
        Ok(Self {
            latency,
            reject_probability,
        })
    }
}

impl<Id, Time> SubmissionApiServiceImpl<Id, Time> {
    pub fn new(id: Id, time: Time, config: SubmissionApiServiceConfig) -> Self {
        Self { id, time, config }
    }
}

impl<Id, Time> SubmissionApiService for SubmissionApiServiceImpl<Id, Time>
where
    Id: IdService,
    Time: TimeService,
{
    #[trace_instrument(skip(self, message))]
    async fn submit(&self, message: ContactMessage) -> Result<SubmissionReceipt, SubmissionApiError> {
        self.config.latency.wait().await;

        let rejected = self.config.reject_probability > 0.0
            && rand::thread_rng().gen_bool(self.config.reject_probability);
        if rejected {
            warn!(subject = %message.subject, "Rejecting contact message");
            return Err(SubmissionApiError::Rejected(
                SIMULATED_REJECTION_REASON.into(),
            ));
        }

        let receipt = SubmissionReceipt {
            id: self.id.generate(),
            submitted_at: self.time.now(),
            message,
        };

        info!(
            id = %receipt.id,
            name = %receipt.message.name,
            email = %receipt.message.email,
            subject = %receipt.message.subject,
            "Contact message submitted"
        );

        Ok(receipt)
    }
}
