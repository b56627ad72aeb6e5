use contracts::domain::a005_activity_log::{ActivityLogListResponse, ActivityLogQuery};
use contracts::shared::ApiError;

use crate::shared::http;

/// Admin-only audit trail, newest first.
pub async fn fetch_logs(query: &ActivityLogQuery) -> Result<ActivityLogListResponse, ApiError> {
    http::get_json_with_query("/api/activity-logs", query).await
}
