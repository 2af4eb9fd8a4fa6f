/*
[INPUT]:  Backend API schema
[OUTPUT]: Typed request/response/model definitions
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When backend schema changes or new types added
*/

pub mod enums;
pub mod models;
pub mod requests;

pub use enums::{CleaningType, StaffRole, TaskStatus};
pub use models::{
    Checklist, ChecklistItem, CleaningTask, Notification, StaffRef, TaskLocation,
};
pub use requests::{SetRushRequest, TaskListFilter, UpdateChecklistsRequest};
