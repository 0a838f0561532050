use contact_config::Config;
use contact_core_form_impl::ContactFormServiceConfig;
use contact_extern_impl::{
    latency::Latency, submission::SubmissionApiServiceConfig,
    validation::ValidationApiServiceConfig,
};
use types::{ContactForm, Id, SubmissionApi, Time, ValidationApi};

pub mod types;

/// Builds a contact form backed by the simulated remote services.
pub fn provide_contact_form(config: &Config) -> anyhow::Result<ContactForm> {
    // Extern
    let validation_api = ValidationApi::new(ValidationApiServiceConfig {
        latency: Latency {
            base: config.validation.latency.into(),
            jitter: config.validation.jitter.into(),
        },
    });

    let submission_api_config = SubmissionApiServiceConfig::new(
        Latency {
            base: config.submission.latency.into(),
            jitter: config.submission.jitter.into(),
        },
        config.submission.reject_probability,
    )?;
    let submission_api = SubmissionApi::new(Id::default(), Time::default(), submission_api_config);

    // Core
    let contact_form_config = ContactFormServiceConfig {
        success_message: config.form.success_message.as_str().into(),
    };

    Ok(ContactForm::new(
        validation_api,
        submission_api,
        contact_form_config,
    ))
}
