use std::{
    collections::{btree_map::Entry, BTreeMap, BTreeSet},
    fmt,
};

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// Identifies one of the inputs of the contact form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    /// All fields in the order they appear on the form.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Human readable label of the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw, unvalidated values of the form inputs.
///
/// Deserializes from any JSON object. Missing keys and `null` are treated as
/// empty inputs, unknown keys are ignored and any other non-string value is
/// recorded in `non_text` so validation can report it for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFormValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Fields whose raw value was neither a string nor `null`.
    #[serde(skip)]
    pub non_text: BTreeSet<ContactField>,
}

impl ContactFormValues {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Sets the text of `field`, replacing a non-text raw value.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
        self.non_text.remove(&field);
    }

    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_text(&self, field: ContactField) -> bool {
        !self.non_text.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.non_text.is_empty() && ContactField::ALL.iter().all(|&f| self.get(f).is_empty())
    }
}

#[derive(Default, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    #[default]
    Null,
    Other(IgnoredAny),
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    name: RawValue,
    email: RawValue,
    subject: RawValue,
    message: RawValue,
}

impl<'de> Deserialize<'de> for ContactFormValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let RawRecord {
            name,
            email,
            subject,
            message,
        } = RawRecord::deserialize(deserializer)?;

        let mut values = Self::default();
        for (field, raw) in [
            (ContactField::Name, name),
            (ContactField::Email, email),
            (ContactField::Subject, subject),
            (ContactField::Message, message),
        ] {
            match raw {
                RawValue::Text(text) => values.set(field, text),
                RawValue::Null => {}
                RawValue::Other(_) => {
                    values.non_text.insert(field);
                }
            }
        }
        Ok(values)
    }
}

/// Maps form fields to a single error message each.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ContactField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has an error.
    /// Returns whether the message was recorded.
    pub fn insert(&mut self, field: ContactField, message: impl Into<String>) -> bool {
        match self.0.entry(field) {
            Entry::Vacant(entry) => {
                entry.insert(message.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: ContactField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.0.iter().map(|(&field, message)| (field, message.as_str()))
    }
}

impl<M: Into<String>> FromIterator<(ContactField, M)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, M)>>(iter: T) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}
