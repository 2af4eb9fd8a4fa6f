/*
[INPUT]:  Task ids, transition verbs, and list filters
[OUTPUT]: Updated task payloads and task listings
[POS]:    HTTP layer - task transition and query endpoints (require auth)
[UPDATE]: When adding new task endpoints or changing transition verbs
*/

use crate::http::{Result, RoomflowClient};
use crate::types::{CleaningTask, SetRushRequest, TaskListFilter, UpdateChecklistsRequest};
use reqwest::Method;

impl RoomflowClient {
    /// Request the assigned -> in_progress transition
    ///
    /// PATCH /api/tasks/{id}/start
    pub async fn start_task(&self, task_id: i64) -> Result<CleaningTask> {
        self.transition(task_id, "start").await
    }

    /// Request the in_progress -> completed/waiting_check transition
    ///
    /// PATCH /api/tasks/{id}/finish
    pub async fn finish_task(&self, task_id: i64) -> Result<CleaningTask> {
        self.transition(task_id, "finish").await
    }

    /// Begin the inspection step on a completed/waiting_check task
    ///
    /// PATCH /api/tasks/{id}/start-inspection
    pub async fn start_inspection(&self, task_id: i64) -> Result<CleaningTask> {
        self.transition(task_id, "start-inspection").await
    }

    /// Conclude inspection, driving the task to checked
    ///
    /// PATCH /api/tasks/{id}/finish-inspection
    pub async fn finish_inspection(&self, task_id: i64) -> Result<CleaningTask> {
        self.transition(task_id, "finish-inspection").await
    }

    /// Set or clear the rush flag
    ///
    /// PATCH /api/tasks/{id}/rush
    pub async fn set_rush(&self, task_id: i64, is_rush: bool) -> Result<CleaningTask> {
        let endpoint = format!("/api/tasks/{task_id}/rush");
        let builder = self
            .request_with_auth(Method::PATCH, &endpoint)?
            .json(&SetRushRequest { is_rush });
        self.send_json(builder).await
    }

    /// Replace a task's checklist associations
    ///
    /// PATCH /api/tasks/{id}/checklists
    pub async fn set_associated_checklists(
        &self,
        task_id: i64,
        checklist_ids: Vec<i64>,
    ) -> Result<CleaningTask> {
        let endpoint = format!("/api/tasks/{task_id}/checklists");
        let builder = self
            .request_with_auth(Method::PATCH, &endpoint)?
            .json(&UpdateChecklistsRequest {
                associated_checklists: checklist_ids,
            });
        self.send_json(builder).await
    }

    /// Query tasks with optional filters
    ///
    /// GET /api/tasks?assigned_to={id}&scheduled_date={date}&all={bool}
    pub async fn list_tasks(&self, filter: &TaskListFilter) -> Result<Vec<CleaningTask>> {
        let params = filter.query_params();
        let endpoint = if params.is_empty() {
            "/api/tasks".to_string()
        } else {
            format!("/api/tasks?{}", params.join("&"))
        };

        let builder = self.request_with_auth(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Fetch a single task by id
    ///
    /// GET /api/tasks/{id}
    pub async fn get_task(&self, task_id: i64) -> Result<CleaningTask> {
        let endpoint = format!("/api/tasks/{task_id}");
        let builder = self.request_with_auth(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }

    /// Tasks awaiting inspection, filtered server-side to completed/waiting_check
    ///
    /// GET /api/tasks/ready-for-check
    pub async fn list_ready_for_check(&self) -> Result<Vec<CleaningTask>> {
        let builder = self.request_with_auth(Method::GET, "/api/tasks/ready-for-check")?;
        self.send_json(builder).await
    }

    async fn transition(&self, task_id: i64, verb: &str) -> Result<CleaningTask> {
        let endpoint = format!("/api/tasks/{task_id}/{verb}");
        let builder = self
            .request_with_auth(Method::PATCH, &endpoint)?
            .json(&serde_json::json!({}));
        self.send_json(builder).await
    }
}
