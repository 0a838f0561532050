use contact_core_form_impl::ContactFormServiceImpl;
use contact_extern_impl::{
    submission::SubmissionApiServiceImpl, validation::ValidationApiServiceImpl,
};
use contact_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};

// Shared
pub type Id = IdServiceImpl;
pub type Time = TimeServiceImpl;

// Extern
pub type ValidationApi = ValidationApiServiceImpl;
pub type SubmissionApi = SubmissionApiServiceImpl<Id, Time>;

// Core
pub type ContactForm = ContactFormServiceImpl<ValidationApi, SubmissionApi>;
