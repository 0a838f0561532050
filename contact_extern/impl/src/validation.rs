use contact_extern_contracts::validation::{ValidationApiService, ValidationResponse};
use contact_models::{field::ContactFormValues, schema};
use contact_utils::trace_instrument;

use crate::latency::Latency;

/// Validates form values locally after a simulated round trip.
#[derive(Debug, Clone)]
pub struct ValidationApiServiceImpl {
    config: ValidationApiServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ValidationApiServiceConfig {
    pub latency: Latency,
}

impl ValidationApiServiceImpl {
    pub fn new(config: ValidationApiServiceConfig) -> Self {
        Self { config }
    }
}

impl ValidationApiService for ValidationApiServiceImpl {
    #[trace_instrument(skip(self, values))]
    async fn validate(&self, values: ContactFormValues) -> anyhow::Result<ValidationResponse> {
        self.config.latency.wait().await;

        Ok(match schema::parse(&values) {
            Ok(message) => ValidationResponse::Valid(message),
            Err(issues) => ValidationResponse::Invalid(schema::field_errors(issues)),
        })
    }
}
