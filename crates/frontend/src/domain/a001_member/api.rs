use contracts::domain::a001_member::{
    Member, MemberListResponse, MemberResponse, MemberUpdate, WelcomeNote,
};
use contracts::shared::ApiError;
use serde_json::Value;

use crate::shared::http;

/// Every member with dependents; the list and overview both work client-side.
pub async fn fetch_all_members() -> Result<Vec<Member>, ApiError> {
    let resp: MemberListResponse = http::get_json("/api/members/all/firebase").await?;
    Ok(resp.into_members())
}

pub async fn fetch_member(id: i64) -> Result<Member, ApiError> {
    let resp: MemberResponse = http::get_json(&format!("/api/members/{}", id)).await?;
    Ok(resp.into_member())
}

pub async fn update_member(id: i64, update: &MemberUpdate) -> Result<(), ApiError> {
    let _: Value = http::put_json(&format!("/api/members/{}", id), update).await?;
    Ok(())
}

pub async fn delete_member(id: i64) -> Result<(), ApiError> {
    http::delete(&format!("/api/members/{}", id)).await
}

pub async fn mark_welcomed(id: i64, note: &WelcomeNote) -> Result<(), ApiError> {
    let _: Value = http::post_json(&format!("/api/members/{}/mark-welcomed", id), note).await?;
    Ok(())
}
