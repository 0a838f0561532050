pub mod contact;
pub mod email_address;
pub mod field;
mod macros;
pub mod schema;
pub mod submission;
