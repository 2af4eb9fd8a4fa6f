/*
[INPUT]:  Public API exports for the roomflow-engine crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod channel;
pub mod checklist;
pub mod config;
pub mod inbox;
pub mod lifecycle;
pub mod session;
pub mod sort;

// Re-export main types for convenience
pub use channel::{ChannelManager, ChannelState, RetryPolicy};
pub use checklist::{ChecklistProgress, ProgressBook};
pub use config::{ReconnectConfig, SessionConfig};
pub use inbox::{NotificationInbox, ReadAck};
pub use lifecycle::{
    ActionOutcome, Decision, Notice, Refetch, RefusalReason, TaskAction, TaskActioner,
    TaskService, authorize,
};
pub use session::Session;
pub use sort::{ChecklistSummaryGroup, TaskBucket, bucket_of, sort_tasks, summarize_by_checklists};
