use contact_core_form_contracts::{ContactFormService, ContactFormSubmitError, FormState};
use contact_extern_contracts::{
    submission::MockSubmissionApiService,
    validation::{MockValidationApiService, ValidationResponse},
};
use contact_models::field::{ContactField, ContactFormValues, FieldErrors};
use contact_utils::assert_matches;
use pretty_assertions::assert_eq;

use super::{fill, make_sut};

#[tokio::test]
async fn clears_values_and_errors() {
    // Arrange
    let values = ContactFormValues::default().with(ContactField::Name, "Jane Doe");
    let errors = [(ContactField::Email, "Email is required")]
        .into_iter()
        .collect::<FieldErrors>();

    let validation = MockValidationApiService::new()
        .with_validate(values.clone(), ValidationResponse::Invalid(errors));
    let sut = make_sut(validation, MockSubmissionApiService::new());
    fill(&sut, &values);
    assert_matches!(sut.submit().await, Err(ContactFormSubmitError::Invalid(_)));

    // Act
    sut.reset();

    // Assert
    assert_eq!(sut.state(), FormState::default());
}

#[test]
fn idempotent() {
    // Arrange
    let sut = make_sut(MockValidationApiService::new(), MockSubmissionApiService::new());
    sut.set_field(ContactField::Message, "Hello World!");
    let mut rx = sut.subscribe();

    // Act
    sut.reset();
    let first = sut.state();
    rx.borrow_and_update();
    sut.reset();

    // Assert
    assert_eq!(first, FormState::default());
    assert_eq!(sut.state(), FormState::default());
    assert!(!rx.has_changed().unwrap());
}
