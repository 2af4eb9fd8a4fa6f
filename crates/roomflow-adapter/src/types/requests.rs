/*
[INPUT]:  Engine-side operation parameters
[OUTPUT]: Typed request bodies and query filters
[POS]:    Data layer - outbound request definitions
[UPDATE]: When endpoint parameters change
*/

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body for the rush-flag toggle endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRushRequest {
    pub is_rush: bool,
}

/// Body for replacing a task's checklist associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateChecklistsRequest {
    pub associated_checklists: Vec<i64>,
}

/// Query filters for the task list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListFilter {
    pub assigned_to: Option<i64>,
    pub scheduled_date: Option<NaiveDate>,
    pub all: bool,
}

impl TaskListFilter {
    pub fn assigned_to(staff_id: i64) -> Self {
        Self {
            assigned_to: Some(staff_id),
            ..Self::default()
        }
    }

    pub(crate) fn query_params(&self) -> Vec<String> {
        let mut params = Vec::new();
        if let Some(staff_id) = self.assigned_to {
            params.push(format!("assigned_to={staff_id}"));
        }
        if let Some(date) = self.scheduled_date {
            params.push(format!("scheduled_date={}", date.format("%Y-%m-%d")));
        }
        if self.all {
            params.push("all=true".to_string());
        }
        params
    }
}
