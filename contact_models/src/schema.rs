//! Field constraints of the contact form.
//!
//! [`check`] reports every violated constraint in field order, [`parse`]
//! turns a set of raw values into a [`ContactMessage`] if none are violated.

use std::fmt;

use crate::{
    contact::{
        ContactMessage, ContactMessageAuthorName, ContactMessageContent, ContactMessageSubject,
    },
    email_address::{EmailAddress, EMAIL_ADDRESS_REGEX},
    field::{ContactField, ContactFormValues, FieldErrors},
};

pub const NAME_MAX_CHARS: usize = 100;
pub const SUBJECT_MAX_CHARS: usize = 200;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: ContactField,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Required,
    MinChars(usize),
    MaxChars(usize),
    EmailAddress,
}

impl Constraint {
    /// Constraints of `field`, in the order they are checked.
    pub fn of(field: ContactField) -> &'static [Self] {
        match field {
            ContactField::Name => &[Self::Required, Self::MaxChars(NAME_MAX_CHARS)],
            ContactField::Email => &[Self::Required, Self::EmailAddress],
            ContactField::Subject => &[Self::Required, Self::MaxChars(SUBJECT_MAX_CHARS)],
            ContactField::Message => &[
                Self::Required,
                Self::MinChars(MESSAGE_MIN_CHARS),
                Self::MaxChars(MESSAGE_MAX_CHARS),
            ],
        }
    }

    /// Values are trimmed before they are checked.
    pub fn is_satisfied_by(self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Self::Required => !value.is_empty(),
            Self::MinChars(min) => value.chars().count() >= min,
            Self::MaxChars(max) => value.chars().count() <= max,
            Self::EmailAddress => EMAIL_ADDRESS_REGEX.is_match(value),
        }
    }

    pub fn message(self, field: ContactField) -> String {
        let label = field.label();
        match self {
            Self::Required => format!("{label} is required"),
            Self::MinChars(min) => format!("{label} must be at least {min} characters"),
            Self::MaxChars(max) => format!("{label} must be at most {max} characters"),
            Self::EmailAddress => "Invalid email address".into(),
        }
    }
}

/// Whether `value` satisfies every constraint of `field`.
pub fn satisfies(field: ContactField, value: &str) -> bool {
    Constraint::of(field)
        .iter()
        .all(|constraint| constraint.is_satisfied_by(value))
}

/// Returns all constraint violations of `values`.
///
/// A field whose raw value was not text yields a single issue.
pub fn check(values: &ContactFormValues) -> Vec<ValidationIssue> {
    ContactField::ALL
        .into_iter()
        .flat_map(|field| {
            if !values.is_text(field) {
                return vec![ValidationIssue {
                    field,
                    message: format!("{} must be a string", field.label()),
                }];
            }
            let value = values.get(field);
            Constraint::of(field)
                .iter()
                .filter(|constraint| !constraint.is_satisfied_by(value))
                .map(|constraint| ValidationIssue {
                    field,
                    message: constraint.message(field),
                })
                .collect()
        })
        .collect()
}

/// Validates `values` as a whole.
pub fn parse(values: &ContactFormValues) -> Result<ContactMessage, Vec<ValidationIssue>> {
    let issues = check(values);
    if !issues.is_empty() {
        return Err(issues);
    }

    fn rejected(field: ContactField, err: impl fmt::Display) -> Vec<ValidationIssue> {
        vec![ValidationIssue {
            field,
            message: err.to_string(),
        }]
    }

    Ok(ContactMessage {
        name: ContactMessageAuthorName::try_new(values.name.clone())
            .map_err(|err| rejected(ContactField::Name, err))?,
        email: EmailAddress::try_new(values.email.clone())
            .map_err(|err| rejected(ContactField::Email, err))?,
        subject: ContactMessageSubject::try_new(values.subject.clone())
            .map_err(|err| rejected(ContactField::Subject, err))?,
        message: ContactMessageContent::try_new(values.message.clone())
            .map_err(|err| rejected(ContactField::Message, err))?,
    })
}

/// Collapses `issues` into one message per field, keeping the first.
pub fn field_errors(issues: impl IntoIterator<Item = ValidationIssue>) -> FieldErrors {
    issues
        .into_iter()
        .map(|issue| (issue.field, issue.message))
        .collect()
}

#[cfg(test)]
mod tests {
    use contact_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_values() -> ContactFormValues {
        ContactFormValues {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            subject: "Hello".into(),
            message: "This is a test message.".into(),
            ..Default::default()
        }
    }

    #[test]
    fn parse_valid() {
        let message = parse(&valid_values()).unwrap();

        assert_eq!(message.name.as_str(), "Jane Doe");
        assert_eq!(message.email.as_str(), "jane@example.com");
        assert_eq!(message.subject.as_str(), "Hello");
        assert_eq!(message.message.as_str(), "This is a test message.");
    }

    #[test]
    fn parse_trims() {
        let values = valid_values()
            .with(ContactField::Name, "  Jane Doe\n")
            .with(ContactField::Subject, "\tHello ");

        let message = parse(&values).unwrap();

        assert_eq!(message.name.as_str(), "Jane Doe");
        assert_eq!(message.subject.as_str(), "Hello");
    }

    #[test]
    fn every_empty_field_is_reported() {
        for mask in 1..16u8 {
            let mut values = valid_values();
            let empty = ContactField::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, field)| field)
                .collect::<Vec<_>>();
            for &field in &empty {
                values.set(field, "");
            }

            let errors = field_errors(parse(&values).unwrap_err());

            assert_eq!(errors.fields().collect::<Vec<_>>(), empty);
        }
    }

    #[test]
    fn whitespace_only_is_empty() {
        let values = valid_values().with(ContactField::Subject, "   ");

        let errors = field_errors(parse(&values).unwrap_err());

        assert_eq!(errors.get(ContactField::Subject), Some("Subject is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn invalid_email_only_affects_email() {
        for email in ["jane", "jane@", "jane@example", "jane doe@example.com"] {
            let values = valid_values().with(ContactField::Email, email);

            let errors = field_errors(parse(&values).unwrap_err());

            assert_eq!(
                errors.iter().collect::<Vec<_>>(),
                [(ContactField::Email, "Invalid email address")]
            );
        }
    }

    #[test]
    fn non_text_values_are_reported() {
        let values = serde_json::from_value::<ContactFormValues>(serde_json::json!({
            "name": 42,
            "email": null,
            "subject": "Hello",
            "message": "This is a test message.",
        }))
        .unwrap();

        let errors = field_errors(parse(&values).unwrap_err());

        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [
                (ContactField::Name, "Name must be a string"),
                (ContactField::Email, "Email is required"),
            ]
        );
    }

    #[test]
    fn newtypes_agree_with_constraints() {
        let cases = [
            (ContactField::Name, "Jane Doe".to_owned()),
            (ContactField::Name, "x".repeat(NAME_MAX_CHARS + 1)),
            (ContactField::Name, "  ".to_owned()),
            (ContactField::Subject, "x".repeat(SUBJECT_MAX_CHARS)),
            (ContactField::Subject, "x".repeat(SUBJECT_MAX_CHARS + 1)),
            (ContactField::Message, "Too short".to_owned()),
            (ContactField::Message, "  Long enough now  ".to_owned()),
            (ContactField::Message, "x".repeat(MESSAGE_MAX_CHARS + 1)),
            (ContactField::Email, "jane@example.com".to_owned()),
            (ContactField::Email, "jane@example".to_owned()),
        ];

        for (field, value) in cases {
            let accepted = match field {
                ContactField::Name => ContactMessageAuthorName::try_new(value.clone()).is_ok(),
                ContactField::Email => EmailAddress::try_new(value.clone()).is_ok(),
                ContactField::Subject => ContactMessageSubject::try_new(value.clone()).is_ok(),
                ContactField::Message => ContactMessageContent::try_new(value.clone()).is_ok(),
            };
            assert_eq!(accepted, satisfies(field, &value), "{field}: {value:?}");
        }
    }

    #[test]
    fn first_issue_per_field_wins() {
        let values = valid_values()
            .with(ContactField::Email, "")
            .with(ContactField::Message, "");

        let issues = check(&values);
        assert_eq!(
            issues
                .iter()
                .map(|issue| (issue.field, issue.message.as_str()))
                .collect::<Vec<_>>(),
            [
                (ContactField::Email, "Email is required"),
                (ContactField::Email, "Invalid email address"),
                (ContactField::Message, "Message is required"),
                (ContactField::Message, "Message must be at least 10 characters"),
            ]
        );

        let errors = field_errors(issues);
        assert_eq!(errors.get(ContactField::Email), Some("Email is required"));
        assert_eq!(errors.get(ContactField::Message), Some("Message is required"));
    }

    #[test]
    fn message_too_short() {
        let values = valid_values().with(ContactField::Message, "Too short");

        let errors = field_errors(parse(&values).unwrap_err());

        assert_eq!(
            errors.get(ContactField::Message),
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn length_limits_count_characters() {
        let values = valid_values().with(ContactField::Name, "ä".repeat(NAME_MAX_CHARS));
        assert_matches!(parse(&values), Ok(_));

        let values = valid_values().with(ContactField::Name, "ä".repeat(NAME_MAX_CHARS + 1));
        let errors = field_errors(parse(&values).unwrap_err());
        assert_eq!(
            errors.get(ContactField::Name),
            Some("Name must be at most 100 characters")
        );

        let values = valid_values().with(ContactField::Subject, "x".repeat(SUBJECT_MAX_CHARS + 1));
        let errors = field_errors(parse(&values).unwrap_err());
        assert_eq!(
            errors.get(ContactField::Subject),
            Some("Subject must be at most 200 characters")
        );

        let values = valid_values().with(ContactField::Message, "x".repeat(MESSAGE_MAX_CHARS + 1));
        let errors = field_errors(parse(&values).unwrap_err());
        assert_eq!(
            errors.get(ContactField::Message),
            Some("Message must be at most 5000 characters")
        );
    }
}
