use contracts::domain::a004_payment::{PaymentListResponse, PaymentQuery};
use contracts::shared::ApiError;

use crate::shared::http;

/// One page of member dues positions.
pub async fn fetch_payments(query: &PaymentQuery) -> Result<PaymentListResponse, ApiError> {
    http::get_json_with_query("/api/payments", query).await
}
