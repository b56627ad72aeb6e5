use contracts::shared::ApiError;
use contracts::system::auth::{
    identity_error_message, AuthSession, PasswordSignInRequest, PasswordSignInResponse,
    ProfileResponse, RefreshTokenRequest, RefreshTokenResponse, UserInfo,
};
use gloo_net::http::{Request, Response};

use super::token::now_ms;
use crate::shared::api_utils::path_segment;
use crate::shared::config::config;
use crate::shared::http;

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn keyed(url: &str) -> String {
    let api_key = &config().identity.api_key;
    if api_key.is_empty() {
        log::warn!("identity.api_key is not configured");
    }
    format!("{}?key={}", url, urlencoding::encode(api_key))
}

async fn identity_error(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::Http {
        status,
        message: identity_error_message(&body),
    }
}

/// Email/password sign-in with the identity provider
pub async fn sign_in(email: &str, password: &str) -> Result<AuthSession, ApiError> {
    let request = PasswordSignInRequest::new(email.trim(), password);

    let response = Request::post(&keyed(&config().identity.sign_in_url))
        .json(&request)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(identity_error(response).await);
    }

    let body = response
        .json::<PasswordSignInResponse>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(AuthSession::from_sign_in(body, now_ms()))
}

/// Exchange a refresh token for a new ID token
pub async fn refresh(refresh_token: &str) -> Result<RefreshTokenResponse, ApiError> {
    let response = Request::post(&keyed(&config().identity.refresh_url))
        .json(&RefreshTokenRequest::new(refresh_token))
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(identity_error(response).await);
    }

    response
        .json::<RefreshTokenResponse>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Role and name of the signed-in user as stored by the church backend
pub async fn fetch_profile(uid: &str) -> Result<UserInfo, ApiError> {
    let path = format!("/api/members/profile/firebase/{}", path_segment(uid));
    http::get_json::<ProfileResponse>(&path)
        .await
        .map(ProfileResponse::into_user)
}
