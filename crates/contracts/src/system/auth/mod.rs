//! Identity provider wire types and the client-side auth session.
//!
//! Sign-in goes straight to the identity provider's REST API; the church
//! backend only ever sees the resulting bearer ID token.

use serde::{Deserialize, Serialize};

use crate::system::roles::{Role, RolePermissions};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordSignInRequest {
    pub email: String,
    pub password: String,
    pub return_secure_token: bool,
}

impl PasswordSignInRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            return_secure_token: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordSignInResponse {
    pub id_token: String,
    pub refresh_token: String,
    /// Lifetime in seconds, sent as a string.
    pub expires_in: String,
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenRequest {
    pub grant_type: &'static str,
    pub refresh_token: String,
}

impl RefreshTokenRequest {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            grant_type: "refresh_token",
            refresh_token: refresh_token.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
    pub user_id: String,
}

/// Tokens persisted in local storage between page loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub id_token: String,
    pub refresh_token: String,
    pub uid: String,
    pub email: Option<String>,
    /// Unix epoch milliseconds at which `id_token` stops being accepted.
    pub expires_at_ms: i64,
}

fn expiry_from(now_ms: i64, expires_in: &str) -> i64 {
    let secs = expires_in.trim().parse::<i64>().unwrap_or(0).max(0);
    now_ms + secs * 1000
}

impl AuthSession {
    pub fn from_sign_in(resp: PasswordSignInResponse, now_ms: i64) -> Self {
        Self {
            expires_at_ms: expiry_from(now_ms, &resp.expires_in),
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
            uid: resp.local_id,
            email: resp.email,
        }
    }

    pub fn apply_refresh(&mut self, resp: RefreshTokenResponse, now_ms: i64) {
        self.expires_at_ms = expiry_from(now_ms, &resp.expires_in);
        self.id_token = resp.id_token;
        self.refresh_token = resp.refresh_token;
        self.uid = resp.user_id;
    }

    /// True when the ID token expires within `margin_secs` of `now_ms`.
    pub fn needs_refresh(&self, now_ms: i64, margin_secs: u32) -> bool {
        self.expires_at_ms - i64::from(margin_secs) * 1000 <= now_ms
    }
}

/// The signed-in administrator as known to the church backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl UserInfo {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| format!("Member #{}", self.id))
        } else {
            name.to_string()
        }
    }

    pub fn permissions(&self) -> RolePermissions {
        RolePermissions::for_role(self.role)
    }
}

/// `GET /api/members/profile/firebase/:uid`, bare or wrapped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    User { user: UserInfo },
    Member { member: UserInfo },
    Bare(UserInfo),
}

impl ProfileResponse {
    pub fn into_user(self) -> UserInfo {
        match self {
            ProfileResponse::User { user } => user,
            ProfileResponse::Member { member } => member,
            ProfileResponse::Bare(user) => user,
        }
    }
}

#[derive(Deserialize)]
struct IdentityErrorEnvelope {
    error: IdentityErrorBody,
}

#[derive(Deserialize)]
struct IdentityErrorBody {
    message: String,
}

/// Human readable text for an identity provider error response.
pub fn identity_error_message(body: &str) -> String {
    let code = serde_json::from_str::<IdentityErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_default();
    // Codes may carry a detail suffix: "TOO_MANY_ATTEMPTS_TRY_LATER : ..."
    let code = code.split(':').next().unwrap_or("").trim();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password".to_string()
        }
        "USER_DISABLED" => "This account has been disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Too many failed attempts. Please try again later.".to_string()
        }
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => {
            "Your session has expired. Please sign in again.".to_string()
        }
        "" => "Sign-in failed".to_string(),
        other => format!("Sign-in failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_in_response() -> PasswordSignInResponse {
        serde_json::from_str(
            r#"{"idToken":"tok","refreshToken":"ref","expiresIn":"3600","localId":"uid-1","email":"a@b.org"}"#,
        )
        .unwrap()
    }

    #[test]
    fn session_expiry_is_computed_from_expires_in() {
        let session = AuthSession::from_sign_in(sign_in_response(), 1_000);
        assert_eq!(session.expires_at_ms, 1_000 + 3_600_000);
        assert_eq!(session.uid, "uid-1");
    }

    #[test]
    fn refresh_is_needed_inside_the_margin() {
        let session = AuthSession::from_sign_in(sign_in_response(), 0);
        assert!(!session.needs_refresh(0, 300));
        assert!(!session.needs_refresh(3_299_999, 300));
        assert!(session.needs_refresh(3_300_000, 300));
        assert!(session.needs_refresh(4_000_000, 0));
    }

    #[test]
    fn refresh_replaces_tokens() {
        let mut session = AuthSession::from_sign_in(sign_in_response(), 0);
        let refreshed: RefreshTokenResponse = serde_json::from_str(
            r#"{"id_token":"tok2","refresh_token":"ref2","expires_in":"3600","user_id":"uid-1","token_type":"Bearer"}"#,
        )
        .unwrap();
        session.apply_refresh(refreshed, 10_000);
        assert_eq!(session.id_token, "tok2");
        assert_eq!(session.refresh_token, "ref2");
        assert_eq!(session.expires_at_ms, 3_610_000);
    }

    #[test]
    fn sign_in_request_uses_camel_case() {
        let json = serde_json::to_value(PasswordSignInRequest::new("a@b.org", "pw")).unwrap();
        assert_eq!(json["returnSecureToken"], true);
    }

    #[test]
    fn identity_errors_are_translated() {
        let body = r#"{"error":{"code":400,"message":"INVALID_LOGIN_CREDENTIALS","errors":[]}}"#;
        assert_eq!(identity_error_message(body), "Invalid email or password");

        let body = r#"{"error":{"code":400,"message":"TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled"}}"#;
        assert_eq!(
            identity_error_message(body),
            "Too many failed attempts. Please try again later."
        );

        assert_eq!(identity_error_message("garbage"), "Sign-in failed");
    }

    #[test]
    fn profile_response_unwraps_every_shape() {
        for body in [
            r#"{"user": {"id": 3, "role": "admin"}}"#,
            r#"{"success": true, "member": {"id": 3, "role": "admin"}}"#,
            r#"{"id": 3, "role": "admin"}"#,
        ] {
            let user = serde_json::from_str::<ProfileResponse>(body).unwrap().into_user();
            assert_eq!(user.id, 3);
            assert_eq!(user.role, Role::Admin);
        }
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: UserInfo =
            serde_json::from_str(r#"{"id":7,"email":"t@church.org","role":"treasurer"}"#).unwrap();
        assert_eq!(user.display_name(), "t@church.org");
        assert!(user.permissions().can_reconcile_zelle);
    }
}
