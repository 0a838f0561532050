use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;

/// Accepts `local@domain.tld` where the local part has no leading or
/// consecutive dots and ends in a letter, digit, `_`, `+` or `-`. The top
/// level domain has at least two letters.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[A-Za-z0-9_'+\-]+\.)*[A-Za-z0-9_'+\-]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .unwrap()
});

#[nutype(
    sanitize(trim),
    validate(regex = EMAIL_ADDRESS_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct EmailAddress(String);
