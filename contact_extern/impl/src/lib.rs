pub mod latency;
pub mod submission;
pub mod validation;
