/*
[INPUT]:  Backend schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When backend schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "unassigned")]
    Unassigned,
    #[serde(rename = "assigned")]
    Assigned,
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "waiting_check")]
    WaitingCheck,
    #[serde(rename = "checked")]
    Checked,
    #[serde(rename = "canceled", alias = "cancelled")]
    Canceled,
    #[serde(rename = "on_hold")]
    OnHold,
}

impl TaskStatus {
    /// Terminal states for the lifecycle engine: no further transitions are issued.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Checked | TaskStatus::Canceled)
    }

    /// States eligible for the manager/front-desk inspection step.
    pub fn is_inspectable(&self) -> bool {
        matches!(self, TaskStatus::WaitingCheck | TaskStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningType {
    Stayover,
    DepartureCleaning,
    DeepCleaning,
    OnDemand,
    PostRenovationCleaning,
    PublicAreaCleaning,
}

impl CleaningType {
    /// Human-readable label used by list views and grouping keys.
    pub fn display_label(&self) -> &'static str {
        match self {
            CleaningType::Stayover => "Stayover",
            CleaningType::DepartureCleaning => "Departure cleaning",
            CleaningType::DeepCleaning => "Deep cleaning",
            CleaningType::OnDemand => "On demand",
            CleaningType::PostRenovationCleaning => "Post-renovation cleaning",
            CleaningType::PublicAreaCleaning => "Public area cleaning",
        }
    }

    pub(crate) fn wire_name(&self) -> &'static str {
        match self {
            CleaningType::Stayover => "stayover",
            CleaningType::DepartureCleaning => "departure_cleaning",
            CleaningType::DeepCleaning => "deep_cleaning",
            CleaningType::OnDemand => "on_demand",
            CleaningType::PostRenovationCleaning => "post_renovation_cleaning",
            CleaningType::PublicAreaCleaning => "public_area_cleaning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Housekeeper,
    Manager,
    FrontDesk,
}
