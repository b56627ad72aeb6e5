use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::Pagination;

/// Entity types offered by the log filter.
pub const ENTITY_TYPES: &[&str] = &[
    "member",
    "dependent",
    "department",
    "payment",
    "transaction",
    "role",
];

/// Longest details line rendered in a table cell.
const DETAILS_MAX_CHARS: usize = 120;

/// Entity ids are numeric for most tables and strings for external records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(id) => write!(f, "{id}"),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: i64,
    #[serde(default)]
    pub actor: Option<String>,
    pub action: String,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_id: Option<EntityId>,
    #[serde(default)]
    pub details: Value,
    pub created_at: String,
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl ActivityLog {
    pub fn kind(&self) -> ActionKind {
        ActionKind::classify(&self.action)
    }

    pub fn entity_label(&self) -> String {
        match (&self.entity_type, &self.entity_id) {
            (Some(t), Some(id)) => format!("{t} #{id}"),
            (Some(t), None) => t.clone(),
            (None, Some(id)) => format!("#{id}"),
            (None, None) => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityLogListResponse {
    #[serde(default)]
    pub logs: Vec<ActivityLog>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Query for `GET /api/activity-logs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityLogQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Default for ActivityLogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 50,
            action: None,
            entity_type: None,
            actor: None,
            start_date: None,
            end_date: None,
        }
    }
}

impl ActivityLogQuery {
    /// Number of filters set, shown on the filter panel badge.
    pub fn filter_count(&self) -> usize {
        [
            &self.action,
            &self.entity_type,
            &self.actor,
            &self.start_date,
            &self.end_date,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

/// Coarse grouping of log actions, used to colour badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Update,
    Delete,
    Auth,
    Other,
}

impl ActionKind {
    /// Groups actions such as `MEMBER_CREATED`, `update_payment` or `login`.
    pub fn classify(action: &str) -> Self {
        let lowered = action.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        let is_form_of = |token: &str, word: &str| {
            token
                .strip_prefix(word)
                .is_some_and(|rest| matches!(rest, "" | "d" | "ed" | "s"))
        };
        let has = |words: &[&str]| {
            tokens
                .iter()
                .any(|&t| words.iter().any(|&w| is_form_of(t, w)))
        };
        if has(&["delete", "remove"]) {
            ActionKind::Delete
        } else if has(&["create", "add", "register"]) {
            ActionKind::Create
        } else if has(&["update", "edit", "change", "assign"]) {
            ActionKind::Update
        } else if has(&["login", "logout", "sign"]) {
            ActionKind::Auth
        } else {
            ActionKind::Other
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            ActionKind::Create => "badge badge--success",
            ActionKind::Update => "badge badge--primary",
            ActionKind::Delete => "badge badge--error",
            ActionKind::Auth => "badge badge--warning",
            ActionKind::Other => "badge badge--neutral",
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Flattens the free-form `details` payload into one line, untruncated.
pub fn details_text(details: &Value) -> String {
    match details {
        Value::Null => "-".to_string(),
        Value::String(s) if s.trim().is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Object(map) if map.is_empty() => "-".to_string(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", scalar_text(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// [`details_text`] cut to fit a table cell.
pub fn details_summary(details: &Value) -> String {
    let text = details_text(details);
    if text.chars().count() > DETAILS_MAX_CHARS {
        let cut: String = text.chars().take(DETAILS_MAX_CHARS).collect();
        format!("{cut}…")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_log_with_mixed_entity_ids() {
        let resp: ActivityLogListResponse = serde_json::from_str(
            r#"{
                "logs": [
                    {"id": 1, "actor": "admin@church.org", "action": "MEMBER_UPDATED", "entity_type": "member", "entity_id": 42, "details": {"field": "email"}, "created_at": "2026-10-01T12:00:00Z", "ip_address": "10.0.0.1"},
                    {"id": 2, "action": "zelle_transaction_created", "entity_type": "transaction", "entity_id": "gmail-abc", "created_at": "2026-10-01T12:05:00Z"}
                ],
                "pagination": {"page": 1, "limit": 50, "total": 2, "pages": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(resp.logs.len(), 2);
        assert_eq!(resp.logs[0].entity_label(), "member #42");
        assert_eq!(resp.logs[1].entity_label(), "transaction #gmail-abc");
        assert_eq!(resp.logs[1].details, Value::Null);
        assert_eq!(resp.pagination.pages, 1);
    }

    #[test]
    fn classifies_actions() {
        assert_eq!(ActionKind::classify("MEMBER_CREATED"), ActionKind::Create);
        assert_eq!(ActionKind::classify("update_payment"), ActionKind::Update);
        assert_eq!(ActionKind::classify("department.deleted"), ActionKind::Delete);
        assert_eq!(ActionKind::classify("login"), ActionKind::Auth);
        assert_eq!(ActionKind::classify("export"), ActionKind::Other);
        assert_eq!(
            ActionKind::classify("MEMBER_ADDRESS_UPDATED"),
            ActionKind::Update
        );
        assert_eq!(ActionKind::classify("credit_added"), ActionKind::Create);
    }

    #[test]
    fn summarizes_details() {
        assert_eq!(details_summary(&Value::Null), "-");
        assert_eq!(details_summary(&json!({})), "-");
        assert_eq!(details_summary(&json!("plain text")), "plain text");
        assert_eq!(
            details_summary(&json!({"amount": 25.5, "method": "zelle"})),
            "amount: 25.5, method: zelle"
        );
        let long = "x".repeat(300);
        assert_eq!(details_summary(&json!(long)).chars().count(), DETAILS_MAX_CHARS + 1);
    }

    #[test]
    fn hover_text_keeps_long_details_whole() {
        let note = "y".repeat(200);
        let details = json!({ "note": note });
        let full = details_text(&details);
        assert_eq!(full, format!("note: {note}"));
        assert!(details_summary(&details).ends_with('…'));
        assert!(full.len() > details_summary(&details).len());
        assert_eq!(details_text(&json!({})), "-");
    }

    #[test]
    fn query_reports_active_filters() {
        let mut q = ActivityLogQuery::default();
        assert_eq!(q.filter_count(), 0);
        q.actor = Some("treasurer".into());
        q.end_date = Some("2026-10-01".into());
        assert_eq!(q.filter_count(), 2);
    }
}
