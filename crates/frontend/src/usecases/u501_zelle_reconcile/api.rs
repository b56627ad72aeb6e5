use contracts::domain::a006_zelle::{
    CreateTransactionRequest, CreateTransactionResponse, ZellePreviewResponse,
};
use contracts::shared::ApiError;

use crate::shared::http;

/// Parsed Gmail candidates; read-only on the server side.
pub async fn fetch_gmail_preview() -> Result<ZellePreviewResponse, ApiError> {
    http::get_json("/api/zelle/preview/gmail").await
}

/// Creates one transaction keyed on `external_id`.
///
/// The server answers 409 when the transaction already exists; that is
/// reported as a duplicate rather than an error.
pub async fn create_transaction(
    request: &CreateTransactionRequest,
) -> Result<CreateTransactionResponse, ApiError> {
    match http::post_json("/api/zelle/reconcile/create-transaction", request).await {
        Err(e) if e.is_conflict() => {
            log::info!("Zelle transaction {} already exists", request.external_id);
            Ok(CreateTransactionResponse {
                success: false,
                transaction: None,
                message: Some(e.to_string()),
                duplicate: true,
            })
        }
        other => other,
    }
}
