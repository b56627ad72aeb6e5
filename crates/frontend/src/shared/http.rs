//! Authenticated JSON requests against the church REST API.
//!
//! Every call attaches `Authorization: Bearer <id token>`, refreshing the
//! token first when it is about to expire. Non-2xx responses become
//! [`ApiError::Http`] carrying the server's message when it sent one.

use contracts::shared::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::api_url;
use crate::system::auth::token::{bearer_token, notify_unauthorized};

async fn authorized(builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
    let token = bearer_token().await?;
    Ok(builder
        .header("Authorization", &format!("Bearer {}", token))
        .header("Accept", "application/json"))
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_response(status, &body);
    log::warn!("HTTP {} from {}: {}", status, response.url(), err);
    if status == 401 {
        notify_unauthorized();
    }
    err
}

/// Decodes a successful body; an empty body decodes as JSON `null`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(error_from(response).await);
    }
    let text = response.text().await.map_err(network)?;
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Appends `query` to `path` as a query string; empty queries add nothing.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = api_url(path);
    log::debug!("GET {}", url);
    let response = authorized(Request::get(&url))
        .await?
        .send()
        .await
        .map_err(network)?;
    read_json(response).await
}

pub async fn get_json_with_query<T, Q>(path: &str, query: &Q) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize,
{
    get_json(&with_query(path, query)?).await
}

pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = api_url(path);
    log::debug!("POST {}", url);
    let response = authorized(Request::post(&url))
        .await?
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    read_json(response).await
}

pub async fn put_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = api_url(path);
    log::debug!("PUT {}", url);
    let response = authorized(Request::put(&url))
        .await?
        .json(body)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    read_json(response).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let url = api_url(path);
    log::debug!("DELETE {}", url);
    let response = authorized(Request::delete(&url))
        .await?
        .send()
        .await
        .map_err(network)?;
    if !response.ok() {
        return Err(error_from(response).await);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_payment::{PaymentQuery, PaymentStatus};

    #[test]
    fn query_string_skips_empty_filters() {
        let query = PaymentQuery::default();
        assert_eq!(
            with_query("/api/payments", &query).unwrap(),
            "/api/payments?page=1&limit=20"
        );
    }

    #[test]
    fn query_string_carries_filters() {
        let query = PaymentQuery {
            page: 2,
            search: Some("hanna".into()),
            status: Some(PaymentStatus::Behind),
            ..PaymentQuery::default()
        };
        let url = with_query("/api/payments", &query).unwrap();
        assert!(url.starts_with("/api/payments?page=2&limit=20"));
        assert!(url.contains("search=hanna"));
        assert!(url.contains("status=behind"));
    }
}
