/*
[INPUT]:  Cleaning type filters
[OUTPUT]: Checklist template listings
[POS]:    HTTP layer - checklist template endpoints (require auth)
[UPDATE]: When template filtering or association endpoints change
*/

use crate::http::{Result, RoomflowClient};
use crate::types::{Checklist, CleaningType};
use reqwest::Method;

impl RoomflowClient {
    /// Query checklist templates applicable to a cleaning type
    ///
    /// GET /api/checklist-templates?cleaning_type={type}
    pub async fn list_checklist_templates(
        &self,
        cleaning_type: CleaningType,
    ) -> Result<Vec<Checklist>> {
        let endpoint = format!(
            "/api/checklist-templates?cleaning_type={}",
            cleaning_type.wire_name()
        );
        let builder = self.request_with_auth(Method::GET, &endpoint)?;
        self.send_json(builder).await
    }
}
