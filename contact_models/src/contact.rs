use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::{email_address::EmailAddress, field::ContactField, schema};

/// A validated message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
    pub subject: ContactMessageSubject,
    pub message: ContactMessageContent,
}

#[nutype(
    sanitize(trim),
    validate(predicate = |x| schema::satisfies(ContactField::Name, x)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(predicate = |x| schema::satisfies(ContactField::Subject, x)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    sanitize(trim),
    validate(predicate = |x| schema::satisfies(ContactField::Message, x)),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);
