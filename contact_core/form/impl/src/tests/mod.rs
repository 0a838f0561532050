use chrono::{TimeZone, Utc};
use contact_core_form_contracts::ContactFormService;
use contact_extern_contracts::{
    submission::MockSubmissionApiService, validation::MockValidationApiService,
};
use contact_models::{
    contact::ContactMessage,
    field::{ContactField, ContactFormValues},
    submission::{SubmissionId, SubmissionReceipt},
};
use uuid::Uuid;

use crate::{ContactFormServiceConfig, ContactFormServiceImpl};

mod reset;

type Sut = ContactFormServiceImpl<MockValidationApiService, MockSubmissionApiService>;

fn make_sut(validation: MockValidationApiService, submission: MockSubmissionApiService) -> Sut {
    ContactFormServiceImpl::new(validation, submission, ContactFormServiceConfig::default())
}

fn fill(sut: &impl ContactFormService, values: &ContactFormValues) {
    for field in ContactField::ALL {
        sut.set_field(field, values.get(field));
    }
}

fn valid_values() -> ContactFormValues {
    ContactFormValues {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        subject: "Hello".into(),
        message: "This is a test message.".into(),
        ..Default::default()
    }
}

fn valid_message() -> ContactMessage {
    ContactMessage {
        name: "Jane Doe".try_into().unwrap(),
        email: "jane@example.com".try_into().unwrap(),
        subject: "Hello".try_into().unwrap(),
        message: "This is a test message.".try_into().unwrap(),
    }
}

fn receipt() -> SubmissionReceipt {
    SubmissionReceipt {
        id: SubmissionId::from(Uuid::from_u128(0x0192_5f1e_4a2b_7c3d_8e4f_5a6b_7c8d_9e0f)),
        submitted_at: Utc.with_ymd_and_hms(2024, 11, 2, 13, 37, 0).unwrap(),
        message: valid_message(),
    }
}
