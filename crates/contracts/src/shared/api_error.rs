use serde::Deserialize;
use thiserror::Error;

/// Longest plain-text body shown to the user as-is.
const MAX_PLAIN_MESSAGE_LEN: usize = 200;

/// Error returned by every call to the REST API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("You are not signed in")]
    Unauthenticated,

    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Builds an error from a non-2xx response.
    ///
    /// The server's own message is surfaced verbatim when the body carries
    /// one (`{"error": ..}` or `{"message": ..}`, or short plain text);
    /// otherwise a generic message naming the status is used.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| fallback_message(status));
        ApiError::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthenticated => Some(401),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(trimmed) {
        return parsed
            .error
            .or(parsed.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
    }

    // HTML error pages from proxies are never useful to show.
    if trimmed.starts_with('<') || trimmed.len() > MAX_PLAIN_MESSAGE_LEN {
        return None;
    }
    Some(trimmed.to_string())
}

fn fallback_message(status: u16) -> String {
    match status {
        401 => "Your session has expired. Please sign in again.".to_string(),
        403 => "You do not have permission to perform this action.".to_string(),
        404 => "The requested record was not found.".to_string(),
        500..=599 => format!("Server error ({status}). Please try again later."),
        _ => format!("Request failed with status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_error_field_from_json_body() {
        let err = ApiError::from_response(400, r#"{"error":"Member not found"}"#);
        assert_eq!(err.to_string(), "Member not found");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn falls_back_to_message_field() {
        let err = ApiError::from_response(422, r#"{"success":false,"message":"Invalid date"}"#);
        assert_eq!(err.to_string(), "Invalid date");
    }

    #[test]
    fn short_plain_text_is_shown_verbatim() {
        let err = ApiError::from_response(409, "Transaction already exists");
        assert_eq!(err.to_string(), "Transaction already exists");
        assert!(err.is_conflict());
    }

    #[test]
    fn html_and_empty_bodies_use_generic_message() {
        let err = ApiError::from_response(502, "<html><body>Bad Gateway</body></html>");
        assert_eq!(err.to_string(), "Server error (502). Please try again later.");

        let err = ApiError::from_response(403, "   ");
        assert_eq!(
            err.to_string(),
            "You do not have permission to perform this action."
        );
    }

    #[test]
    fn json_without_message_uses_generic_message() {
        let err = ApiError::from_response(418, r#"{"success":false}"#);
        assert_eq!(err.to_string(), "Request failed with status 418");
    }
}
