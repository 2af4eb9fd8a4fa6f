/*
[INPUT]:  Cleaning task snapshots from the task service.
[OUTPUT]: Deterministic ordering, bucket partition, and checklist summaries.
[POS]:    View-derivation layer - presentation-ready task orderings (no I/O).
[UPDATE]: When bucket membership or sort keys change.
*/

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use roomflow_adapter::{CleaningTask, CleaningType};

/// Sentinel group label for tasks with no associated checklist.
const NO_CHECKLIST_LABEL: &str = "No checklist";

/// The four fixed task groupings used throughout list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskBucket {
    Departure,
    Stayover,
    PublicArea,
    Other,
}

/// Total, disjoint partition of cleaning types into buckets.
pub fn bucket_of(cleaning_type: CleaningType) -> TaskBucket {
    match cleaning_type {
        CleaningType::DepartureCleaning => TaskBucket::Departure,
        CleaningType::Stayover => TaskBucket::Stayover,
        CleaningType::PublicAreaCleaning => TaskBucket::PublicArea,
        CleaningType::DeepCleaning
        | CleaningType::OnDemand
        | CleaningType::PostRenovationCleaning => TaskBucket::Other,
    }
}

/// Sort tasks in place by the three-key priority order:
///
/// 1. rush before non-rush;
/// 2. inside the departure bucket only, guest-checked-out before not;
/// 3. due time ascending, tasks without a due time last.
///
/// The sort is stable: tasks with identical keys keep their input order.
pub fn sort_tasks(tasks: &mut [CleaningTask]) {
    tasks.sort_by_key(sort_key);
}

fn sort_key(task: &CleaningTask) -> (bool, bool, DateTime<Utc>) {
    let checkout_first = bucket_of(task.cleaning_type) == TaskBucket::Departure
        && task.is_guest_checked_out;
    (
        !task.is_rush,
        !checkout_first,
        task.due_time.unwrap_or(DateTime::<Utc>::MAX_UTC),
    )
}

/// One row of the "my tasks" checklist summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistSummaryGroup {
    pub cleaning_type_label: String,
    pub checklist_names: String,
    pub count: usize,
}

/// Group tasks by cleaning-type label, then by the joined set of checklist
/// names; each group carries a count.
///
/// Type labels follow the fixed priority order departure, stayover,
/// public-area; anything else falls back to lexicographic label order.
pub fn summarize_by_checklists(tasks: &[CleaningTask]) -> Vec<ChecklistSummaryGroup> {
    let mut counts: BTreeMap<(u8, String, String), usize> = BTreeMap::new();

    for task in tasks {
        let label = task.cleaning_type.display_label().to_string();
        let names = checklist_names_key(task);
        let key = (type_priority(task.cleaning_type), label, names);
        *counts.entry(key).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(
            |((_priority, cleaning_type_label, checklist_names), count)| ChecklistSummaryGroup {
                cleaning_type_label,
                checklist_names,
                count,
            },
        )
        .collect()
}

fn type_priority(cleaning_type: CleaningType) -> u8 {
    match bucket_of(cleaning_type) {
        TaskBucket::Departure => 0,
        TaskBucket::Stayover => 1,
        TaskBucket::PublicArea => 2,
        TaskBucket::Other => 3,
    }
}

fn checklist_names_key(task: &CleaningTask) -> String {
    if task.associated_checklists.is_empty() {
        return NO_CHECKLIST_LABEL.to_string();
    }
    task.associated_checklists
        .iter()
        .map(|checklist| checklist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomflow_adapter::{Checklist, TaskLocation, TaskStatus};

    fn task(id: i64, cleaning_type: CleaningType, is_rush: bool, due_minute: Option<u32>) -> CleaningTask {
        CleaningTask {
            id,
            location: TaskLocation::Room {
                room_number: format!("{}", 100 + id),
            },
            cleaning_type,
            status: TaskStatus::Assigned,
            assigned_to: None,
            is_rush,
            due_time: due_minute.map(|minute| {
                format!("2026-08-24T10:{minute:02}:00Z")
                    .parse()
                    .expect("due time")
            }),
            is_guest_checked_out: false,
            associated_checklists: Vec::new(),
        }
    }

    fn ids(tasks: &[CleaningTask]) -> Vec<i64> {
        tasks.iter().map(|task| task.id).collect()
    }

    #[test]
    fn rush_first_then_due_time_ascending() {
        let mut tasks = vec![
            task(1, CleaningType::Stayover, false, Some(10)),
            task(2, CleaningType::Stayover, true, Some(20)),
            task(3, CleaningType::Stayover, true, Some(5)),
        ];

        sort_tasks(&mut tasks);
        assert_eq!(ids(&tasks), vec![3, 2, 1]);
    }

    #[test]
    fn missing_due_time_sorts_last() {
        let mut tasks = vec![
            task(1, CleaningType::Stayover, false, None),
            task(2, CleaningType::Stayover, false, Some(30)),
        ];

        sort_tasks(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 1]);
    }

    #[test]
    fn guest_checkout_breaks_ties_inside_departure_bucket() {
        let mut stayed = task(1, CleaningType::DepartureCleaning, false, Some(15));
        let mut left = task(2, CleaningType::DepartureCleaning, false, Some(15));
        stayed.is_guest_checked_out = false;
        left.is_guest_checked_out = true;

        let mut tasks = vec![stayed, left];
        sort_tasks(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 1]);
    }

    #[test]
    fn guest_checkout_is_ignored_outside_departure_bucket() {
        let mut checked_out = task(1, CleaningType::Stayover, false, Some(15));
        checked_out.is_guest_checked_out = true;
        let plain = task(2, CleaningType::Stayover, false, Some(15));

        // Equal keys: input order must be preserved.
        let mut tasks = vec![plain, checked_out];
        sort_tasks(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 1]);
    }

    #[test]
    fn equal_keys_preserve_input_order() {
        let mut tasks = vec![
            task(7, CleaningType::OnDemand, false, Some(15)),
            task(8, CleaningType::OnDemand, false, Some(15)),
            task(9, CleaningType::OnDemand, false, Some(15)),
        ];

        sort_tasks(&mut tasks);
        assert_eq!(ids(&tasks), vec![7, 8, 9]);
    }

    #[test]
    fn bucket_partition_is_total() {
        for cleaning_type in [
            CleaningType::Stayover,
            CleaningType::DepartureCleaning,
            CleaningType::DeepCleaning,
            CleaningType::OnDemand,
            CleaningType::PostRenovationCleaning,
            CleaningType::PublicAreaCleaning,
        ] {
            // Every type maps to exactly one bucket; the match is exhaustive,
            // this just pins the catch-all membership.
            let bucket = bucket_of(cleaning_type);
            match cleaning_type {
                CleaningType::DepartureCleaning => assert_eq!(bucket, TaskBucket::Departure),
                CleaningType::Stayover => assert_eq!(bucket, TaskBucket::Stayover),
                CleaningType::PublicAreaCleaning => assert_eq!(bucket, TaskBucket::PublicArea),
                _ => assert_eq!(bucket, TaskBucket::Other),
            }
        }
    }

    #[test]
    fn summary_groups_by_type_priority_then_checklists() {
        let mut departure = task(1, CleaningType::DepartureCleaning, false, None);
        departure.associated_checklists = vec![Checklist {
            id: 1,
            name: "Bathroom".to_string(),
            items: Vec::new(),
        }];
        let departure_twin = {
            let mut twin = departure.clone();
            twin.id = 2;
            twin
        };
        let stayover = task(3, CleaningType::Stayover, false, None);
        let deep = task(4, CleaningType::DeepCleaning, false, None);

        let groups = summarize_by_checklists(&[stayover, deep, departure, departure_twin]);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].cleaning_type_label, "Departure cleaning");
        assert_eq!(groups[0].checklist_names, "Bathroom");
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].cleaning_type_label, "Stayover");
        assert_eq!(groups[1].checklist_names, "No checklist");
        assert_eq!(groups[2].cleaning_type_label, "Deep cleaning");
    }
}
