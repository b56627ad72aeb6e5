use contracts::domain::a002_dependent::NewDependent;
use contracts::shared::ApiError;
use serde_json::Value;

use crate::shared::http;

pub async fn add_dependent(member_id: i64, dependent: &NewDependent) -> Result<(), ApiError> {
    let _: Value =
        http::post_json(&format!("/api/members/{}/dependents", member_id), dependent).await?;
    Ok(())
}
