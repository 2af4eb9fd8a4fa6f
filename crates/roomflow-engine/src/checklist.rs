/*
[INPUT]:  Checklist payloads on tasks + item check/uncheck actions.
[OUTPUT]: Per-checklist progress and the completion gate for finish actions.
[POS]:    State layer - session-local checklist progress tracking.
[UPDATE]: When progress aggregation or the completion policy changes.
*/

use std::collections::{HashMap, HashSet};

use roomflow_adapter::{Checklist, CleaningTask};

/// Progress snapshot for one checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub total: usize,
    pub completed: usize,
}

impl ChecklistProgress {
    /// Completion percentage for this checklist.
    ///
    /// A zero-item checklist reports 100: there is no work left to verify.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }
}

/// Session-local check-off state, keyed by checklist id.
///
/// Check-off state is never persisted per item; it exists for the duration of
/// an active cleaning/inspection session and is committed implicitly by the
/// finish transition. Dropping the book discards it.
#[derive(Debug, Default)]
pub struct ProgressBook {
    totals: HashMap<i64, usize>,
    checked: HashMap<i64, HashSet<i64>>,
}

impl ProgressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a checklist the first time it is shown in this session.
    ///
    /// Idempotent: re-observing keeps existing check-off state, but picks up
    /// a changed item count if the template was edited server-side.
    pub fn observe(&mut self, checklist: &Checklist) {
        self.totals.insert(checklist.id, checklist.items.len());
        self.checked.entry(checklist.id).or_default();
    }

    /// Toggle one item's checked state, returning the new state.
    ///
    /// Items not belonging to the checklist are ignored and report unchecked.
    pub fn toggle_item(&mut self, checklist: &Checklist, item_id: i64) -> bool {
        if !checklist.items.iter().any(|item| item.id == item_id) {
            return false;
        }

        self.observe(checklist);
        let checked = self.checked.entry(checklist.id).or_default();
        if checked.remove(&item_id) {
            false
        } else {
            checked.insert(item_id);
            true
        }
    }

    /// Whether a specific item is currently checked.
    pub fn is_item_checked(&self, checklist_id: i64, item_id: i64) -> bool {
        self.checked
            .get(&checklist_id)
            .is_some_and(|checked| checked.contains(&item_id))
    }

    /// Progress snapshot for one checklist, if it has been observed.
    pub fn progress(&self, checklist_id: i64) -> Option<ChecklistProgress> {
        let total = *self.totals.get(&checklist_id)?;
        let completed = self
            .checked
            .get(&checklist_id)
            .map_or(0, |checked| checked.len().min(total));
        Some(ChecklistProgress { total, completed })
    }

    /// The gate for `finish`/`finishInspection`: every associated checklist
    /// fully checked off.
    ///
    /// A task with no checklists is vacuously complete. A zero-item checklist
    /// counts as complete; an empty template carries no work to verify and
    /// must not make the task unfinishable.
    pub fn is_checklist_complete(&self, task: &CleaningTask) -> bool {
        task.associated_checklists.iter().all(|checklist| {
            let total = checklist.items.len();
            if total == 0 {
                return true;
            }
            self.checked
                .get(&checklist.id)
                .is_some_and(|checked| self.count_checked(checklist, checked) == total)
        })
    }

    /// Aggregate percentage across all associated checklists.
    ///
    /// Plain arithmetic mean: each checklist counts as one unit regardless of
    /// item count. Zero-item checklists contribute 100. Result is in [0, 100];
    /// a task with no checklists reports 100.
    pub fn total_progress(&self, task: &CleaningTask) -> f64 {
        if task.associated_checklists.is_empty() {
            return 100.0;
        }

        let sum: f64 = task
            .associated_checklists
            .iter()
            .map(|checklist| {
                let total = checklist.items.len();
                if total == 0 {
                    return 100.0;
                }
                let completed = self
                    .checked
                    .get(&checklist.id)
                    .map_or(0, |checked| self.count_checked(checklist, checked));
                (completed as f64 / total as f64) * 100.0
            })
            .sum();

        sum / task.associated_checklists.len() as f64
    }

    // Count only item ids that still exist on the checklist, so stale toggles
    // from an edited template cannot overshoot the total.
    fn count_checked(&self, checklist: &Checklist, checked: &HashSet<i64>) -> usize {
        checklist
            .items
            .iter()
            .filter(|item| checked.contains(&item.id))
            .count()
    }
}
