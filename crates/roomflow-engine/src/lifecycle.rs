/*
[INPUT]:  User actions on cleaning tasks + session-local checklist progress.
[OUTPUT]: Authorization decisions, transition requests, notices, refetch hints.
[POS]:    State layer - task lifecycle transitions and role gating.
[UPDATE]: When the authorization table or the transition protocol changes.
*/

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use roomflow_adapter::{CleaningTask, RoomflowClient, StaffRef, StaffRole, TaskStatus};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::checklist::ProgressBook;

/// The transitions this engine exposes. `ToggleRush` is a boolean flip rather
/// than a status transition, but it shares the same request protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskAction {
    Start,
    Finish,
    StartInspection,
    FinishInspection,
    ToggleRush,
}

impl TaskAction {
    fn label(&self) -> &'static str {
        match self {
            TaskAction::Start => "start",
            TaskAction::Finish => "finish",
            TaskAction::StartInspection => "start inspection",
            TaskAction::FinishInspection => "finish inspection",
            TaskAction::ToggleRush => "toggle rush",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a local precondition check refused an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefusalReason {
    WrongRole {
        role: StaffRole,
        action: TaskAction,
    },
    WrongStatus {
        status: TaskStatus,
        action: TaskAction,
    },
    NotAssignee,
    ChecklistIncomplete,
    ActionInFlight,
}

impl fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefusalReason::WrongRole { role, action } => {
                write!(f, "{role:?} may not {action}")
            }
            RefusalReason::WrongStatus { status, action } => {
                write!(f, "cannot {action} a task in status {status:?}")
            }
            RefusalReason::NotAssignee => {
                write!(f, "task is assigned to someone else")
            }
            RefusalReason::ChecklistIncomplete => {
                write!(f, "checklist is not complete")
            }
            RefusalReason::ActionInFlight => {
                write!(f, "a request for this action is still pending")
            }
        }
    }
}

/// Allow/deny decision for one (role, status, action) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied { reason: RefusalReason },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// The authorization table as explicit dispatch.
///
/// Housekeepers drive the forward cleaning path; managers and front desk
/// drive inspection and the rush flag. Rush toggling stops at terminal
/// statuses; inspection is only legal on waiting_check/completed tasks.
pub fn authorize(role: StaffRole, status: TaskStatus, action: TaskAction) -> Decision {
    let allowed = match (role, action) {
        (StaffRole::Housekeeper, TaskAction::Start) => status == TaskStatus::Assigned,
        (StaffRole::Housekeeper, TaskAction::Finish) => status == TaskStatus::InProgress,
        (StaffRole::Housekeeper, _) => {
            return Decision::Denied {
                reason: RefusalReason::WrongRole { role, action },
            };
        }
        (
            StaffRole::Manager | StaffRole::FrontDesk,
            TaskAction::StartInspection | TaskAction::FinishInspection,
        ) => status.is_inspectable(),
        (StaffRole::Manager | StaffRole::FrontDesk, TaskAction::ToggleRush) => {
            !status.is_terminal()
        }
        (StaffRole::Manager | StaffRole::FrontDesk, TaskAction::Start | TaskAction::Finish) => {
            return Decision::Denied {
                reason: RefusalReason::WrongRole { role, action },
            };
        }
    };

    if allowed {
        Decision::Allowed
    } else {
        Decision::Denied {
            reason: RefusalReason::WrongStatus { status, action },
        }
    }
}

/// User-visible notice emitted after a request settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success { message: String },
    Error { message: String },
}

/// What the owning view should refetch after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refetch {
    Task(i64),
    TaskList,
}

/// Result of one action invocation.
#[derive(Debug)]
pub enum ActionOutcome {
    /// Server accepted the request; a refetch hint was queued.
    Applied(CleaningTask),
    /// A local precondition failed; no network call was made.
    Refused(RefusalReason),
    /// The request reached the network and failed; carries the user message.
    Failed(String),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }
}

/// Seam over the task service endpoints so the actioner can be exercised
/// against a mock in unit tests.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn start_task(&self, task_id: i64) -> roomflow_adapter::Result<CleaningTask>;
    async fn finish_task(&self, task_id: i64) -> roomflow_adapter::Result<CleaningTask>;
    async fn start_inspection(&self, task_id: i64) -> roomflow_adapter::Result<CleaningTask>;
    async fn finish_inspection(&self, task_id: i64) -> roomflow_adapter::Result<CleaningTask>;
    async fn set_rush(&self, task_id: i64, is_rush: bool) -> roomflow_adapter::Result<CleaningTask>;
}

#[async_trait]
impl TaskService for RoomflowClient {
    async fn start_task(&self, task_id: i64) -> roomflow_adapter::Result<CleaningTask> {
        RoomflowClient::start_task(self, task_id).await
    }

    async fn finish_task(&self, task_id: i64) -> roomflow_adapter::Result<CleaningTask> {
        RoomflowClient::finish_task(self, task_id).await
    }

    async fn start_inspection(&self, task_id: i64) -> roomflow_adapter::Result<CleaningTask> {
        RoomflowClient::start_inspection(self, task_id).await
    }

    async fn finish_inspection(&self, task_id: i64) -> roomflow_adapter::Result<CleaningTask> {
        RoomflowClient::finish_inspection(self, task_id).await
    }

    async fn set_rush(&self, task_id: i64, is_rush: bool) -> roomflow_adapter::Result<CleaningTask> {
        RoomflowClient::set_rush(self, task_id, is_rush).await
    }
}

/// Drives the transition protocol for one authenticated actor:
/// validate locally, issue exactly one request, emit a notice, queue a
/// refetch. No optimistic mutation and no automatic retry; the server is the
/// single source of truth, and the operator re-invokes on failure.
pub struct TaskActioner<S: TaskService> {
    service: Arc<S>,
    actor: StaffRef,
    notice_tx: mpsc::UnboundedSender<Notice>,
    refetch_tx: mpsc::UnboundedSender<Refetch>,
    in_flight: Mutex<HashSet<(i64, TaskAction)>>,
    scope: CancellationToken,
    session_id: Uuid,
}

impl<S: TaskService> TaskActioner<S> {
    pub fn new(
        service: Arc<S>,
        actor: StaffRef,
        notice_tx: mpsc::UnboundedSender<Notice>,
        refetch_tx: mpsc::UnboundedSender<Refetch>,
        scope: CancellationToken,
    ) -> Self {
        Self {
            service,
            actor,
            notice_tx,
            refetch_tx,
            in_flight: Mutex::new(HashSet::new()),
            scope,
            session_id: Uuid::new_v4(),
        }
    }

    pub fn actor(&self) -> &StaffRef {
        &self.actor
    }

    /// assigned -> in_progress, by the assigned housekeeper.
    pub async fn start(&self, task: &CleaningTask) -> ActionOutcome {
        if authorize(self.actor.role, task.status, TaskAction::Start).is_allowed()
            && !task.is_assigned_to(self.actor.id)
        {
            return self.refuse(task, TaskAction::Start, RefusalReason::NotAssignee);
        }
        self.run(task, TaskAction::Start, Refetch::Task(task.id)).await
    }

    /// in_progress -> completed/waiting_check, gated on checklist completion.
    /// Success redirects the caller to its task-list view, hence the list
    /// refetch hint.
    pub async fn finish(&self, task: &CleaningTask, progress: &ProgressBook) -> ActionOutcome {
        if let Some(outcome) = self.checklist_gate(task, TaskAction::Finish, progress) {
            return outcome;
        }
        self.run(task, TaskAction::Finish, Refetch::TaskList).await
    }

    /// waiting_check/completed -> inspection in progress.
    pub async fn start_inspection(&self, task: &CleaningTask) -> ActionOutcome {
        self.run(task, TaskAction::StartInspection, Refetch::Task(task.id))
            .await
    }

    /// Conclude inspection toward checked; same checklist gate as finish.
    pub async fn finish_inspection(
        &self,
        task: &CleaningTask,
        progress: &ProgressBook,
    ) -> ActionOutcome {
        if let Some(outcome) = self.checklist_gate(task, TaskAction::FinishInspection, progress) {
            return outcome;
        }
        self.run(task, TaskAction::FinishInspection, Refetch::TaskList)
            .await
    }

    /// Flip the rush flag; a flip, not a status transition, but it follows
    /// the same request/notice/refetch protocol.
    pub async fn toggle_rush(&self, task: &CleaningTask) -> ActionOutcome {
        self.run(task, TaskAction::ToggleRush, Refetch::Task(task.id))
            .await
    }

    fn checklist_gate(
        &self,
        task: &CleaningTask,
        action: TaskAction,
        progress: &ProgressBook,
    ) -> Option<ActionOutcome> {
        // Role/status are checked first so an unauthorized caller gets the
        // authorization reason, not the checklist one.
        if let Decision::Denied { reason } = authorize(self.actor.role, task.status, action) {
            return Some(self.refuse(task, action, reason));
        }
        if !progress.is_checklist_complete(task) {
            return Some(self.refuse(task, action, RefusalReason::ChecklistIncomplete));
        }
        None
    }

    async fn run(&self, task: &CleaningTask, action: TaskAction, refetch: Refetch) -> ActionOutcome {
        if let Decision::Denied { reason } = authorize(self.actor.role, task.status, action) {
            return self.refuse(task, action, reason);
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, (task.id, action)) else {
            return self.refuse(task, action, RefusalReason::ActionInFlight);
        };

        let result = match action {
            TaskAction::Start => self.service.start_task(task.id).await,
            TaskAction::Finish => self.service.finish_task(task.id).await,
            TaskAction::StartInspection => self.service.start_inspection(task.id).await,
            TaskAction::FinishInspection => self.service.finish_inspection(task.id).await,
            TaskAction::ToggleRush => self.service.set_rush(task.id, !task.is_rush).await,
        };

        // The owning scope may have been torn down while the request was in
        // flight; discarded views must not receive notices or refetch hints.
        let cancelled = self.scope.is_cancelled();

        match result {
            Ok(updated) => {
                info!(
                    session = %self.session_id,
                    task_id = task.id,
                    action = %action,
                    status = ?updated.status,
                    "task action applied"
                );
                if !cancelled {
                    let _ = self.notice_tx.send(Notice::Success {
                        message: success_message(action, task),
                    });
                    let _ = self.refetch_tx.send(refetch);
                } else {
                    debug!(task_id = task.id, action = %action, "scope cancelled; result dropped");
                }
                ActionOutcome::Applied(updated)
            }
            Err(err) => {
                let message = err.user_message();
                warn!(
                    session = %self.session_id,
                    task_id = task.id,
                    action = %action,
                    error = %err,
                    "task action failed"
                );
                if !cancelled {
                    let _ = self.notice_tx.send(Notice::Error {
                        message: message.clone(),
                    });
                }
                ActionOutcome::Failed(message)
            }
        }
    }

    fn refuse(&self, task: &CleaningTask, action: TaskAction, reason: RefusalReason) -> ActionOutcome {
        info!(
            session = %self.session_id,
            task_id = task.id,
            action = %action,
            reason = %reason,
            "task action refused locally"
        );
        ActionOutcome::Refused(reason)
    }
}

fn success_message(action: TaskAction, task: &CleaningTask) -> String {
    let place = task.location.label();
    match action {
        TaskAction::Start => format!("Cleaning started for {place}"),
        TaskAction::Finish => format!("Cleaning finished for {place}"),
        TaskAction::StartInspection => format!("Inspection started for {place}"),
        TaskAction::FinishInspection => format!("Inspection completed for {place}"),
        TaskAction::ToggleRush => {
            if task.is_rush {
                format!("Rush cleared for {place}")
            } else {
                format!("{place} marked as rush")
            }
        }
    }
}

/// Per-(task, action) mutual exclusion: the UI control stays disabled while
/// its own request is pending, and a concurrent duplicate is refused.
struct InFlightGuard<'a> {
    flags: &'a Mutex<HashSet<(i64, TaskAction)>>,
    key: (i64, TaskAction),
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flags: &'a Mutex<HashSet<(i64, TaskAction)>>, key: (i64, TaskAction)) -> Option<Self> {
        let mut set = flags.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if set.insert(key) {
            Some(Self { flags, key })
        } else {
            None
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut set = self
            .flags
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        set.remove(&self.key);
    }
}
