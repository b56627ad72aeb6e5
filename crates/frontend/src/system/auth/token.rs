//! Bearer token for API calls, refreshed shortly before it expires.

use std::cell::RefCell;

use contracts::shared::ApiError;
use leptos::prelude::*;

use super::{api, storage};
use crate::shared::config::config;

thread_local! {
    static ON_UNAUTHORIZED: RefCell<Option<Callback<()>>> = const { RefCell::new(None) };
}

pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Registers what happens when the backend or the identity provider
/// rejects the session.
pub fn set_unauthorized_handler(handler: Callback<()>) {
    ON_UNAUTHORIZED.with(|h| *h.borrow_mut() = Some(handler));
}

pub fn notify_unauthorized() {
    let handler = ON_UNAUTHORIZED.with(|h| h.borrow().clone());
    if let Some(handler) = handler {
        handler.run(());
    }
}

/// Current ID token, exchanged for a fresh one when it expires within
/// `identity.refresh_margin_secs`.
pub async fn bearer_token() -> Result<String, ApiError> {
    let Some(mut session) = storage::load_session() else {
        return Err(ApiError::Unauthenticated);
    };

    let margin = config().identity.refresh_margin_secs;
    if session.needs_refresh(now_ms(), margin) {
        log::debug!("ID token for {} expires soon, refreshing", session.uid);
        match api::refresh(&session.refresh_token).await {
            Ok(resp) => {
                session.apply_refresh(resp, now_ms());
                storage::save_session(&session);
            }
            // Still valid for a little while; try again on the next call.
            Err(e) if session.expires_at_ms > now_ms() => {
                log::warn!("Token refresh failed, using current token: {}", e);
            }
            Err(e) => {
                log::warn!("Token refresh failed and token expired: {}", e);
                notify_unauthorized();
                return Err(ApiError::Unauthenticated);
            }
        }
    }

    Ok(session.id_token)
}
