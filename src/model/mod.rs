//! Data models for BBAT sessions.

mod annotation;
mod clicks;

pub use annotation::{BoundingBoxRecord, Label, PendingAssignment};
pub use clicks::{MAX_PENDING_CLICKS, PendingClicks};
