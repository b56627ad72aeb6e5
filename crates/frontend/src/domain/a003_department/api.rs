use contracts::domain::a003_department::{
    Department, DepartmentForm, DepartmentListResponse, DepartmentQuery, DepartmentStats,
};
use contracts::shared::ApiError;
use serde_json::Value;

use crate::shared::http;

pub async fn fetch_departments(query: &DepartmentQuery) -> Result<Vec<Department>, ApiError> {
    let resp: DepartmentListResponse =
        http::get_json_with_query("/api/departments", query).await?;
    Ok(resp.into_departments())
}

pub async fn fetch_stats() -> Result<DepartmentStats, ApiError> {
    http::get_json("/api/departments/stats").await
}

pub async fn create_department(form: &DepartmentForm) -> Result<(), ApiError> {
    let _: Value = http::post_json("/api/departments", form).await?;
    Ok(())
}

pub async fn update_department(id: i64, form: &DepartmentForm) -> Result<(), ApiError> {
    let _: Value = http::put_json(&format!("/api/departments/{}", id), form).await?;
    Ok(())
}

pub async fn delete_department(id: i64) -> Result<(), ApiError> {
    http::delete(&format!("/api/departments/{}", id)).await
}
