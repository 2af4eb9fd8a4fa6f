/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When backend schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{CleaningType, StaffRole, TaskStatus};

/// Where a cleaning task takes place.
///
/// The backend sends either `room_number` or `zone_name`, never both. The
/// untagged representation keeps that exclusivity on the wire: serialization
/// emits exactly one of the two fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskLocation {
    Room { room_number: String },
    Zone { zone_name: String },
}

impl TaskLocation {
    pub fn label(&self) -> &str {
        match self {
            TaskLocation::Room { room_number } => room_number,
            TaskLocation::Zone { zone_name } => zone_name,
        }
    }

    pub fn is_room(&self) -> bool {
        matches!(self, TaskLocation::Room { .. })
    }
}

/// Staff member reference as embedded in task payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRef {
    pub id: i64,
    pub name: String,
    pub role: StaffRole,
}

/// One entry of a checklist template instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: i64,
    pub text: String,
}

/// A checklist template instance bound to a task.
///
/// Check-off state is not part of this payload; it lives in the session-local
/// progress tracker and is committed implicitly by task completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningTask {
    pub id: i64,
    #[serde(flatten)]
    pub location: TaskLocation,
    pub cleaning_type: CleaningType,
    pub status: TaskStatus,
    #[serde(default)]
    pub assigned_to: Option<StaffRef>,
    #[serde(default)]
    pub is_rush: bool,
    #[serde(default)]
    pub due_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_guest_checked_out: bool,
    #[serde(default)]
    pub associated_checklists: Vec<Checklist>,
}

impl CleaningTask {
    /// True when the task is assigned to the given staff member.
    pub fn is_assigned_to(&self, staff_id: i64) -> bool {
        self.assigned_to
            .as_ref()
            .is_some_and(|staff| staff.id == staff_id)
    }
}

/// A notification owned by the authenticated session's user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}
