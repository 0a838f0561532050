use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{contact::ContactMessage, macros::id};

id!(SubmissionId);

/// Acknowledgment of a submitted contact message, echoing the payload back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    pub submitted_at: DateTime<Utc>,
    pub message: ContactMessage,
}
