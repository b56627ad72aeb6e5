//! Gmail-sourced Zelle payments awaiting manual reconciliation.
//!
//! Parsing the notification emails and the idempotent upsert keyed on
//! `external_id` both happen on the server. The client previews candidates
//! and asks the server to create one transaction per row.

use serde::{Deserialize, Serialize};

/// Payment types a reconciled Zelle transfer can be recorded as.
pub const PAYMENT_TYPES: &[(&str, &str)] = &[
    ("donation", "Donation"),
    ("membership_due", "Membership Due"),
    ("tithe", "Tithe"),
    ("event", "Event"),
    ("other", "Other"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZellePreviewItem {
    pub gmail_id: String,
    pub external_id: String,
    pub amount: f64,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub matched_member_id: Option<i64>,
    #[serde(default)]
    pub would_create: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZellePreviewResponse {
    #[serde(default)]
    pub items: Vec<ZellePreviewItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTransactionRequest {
    pub external_id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub member_id: i64,
    pub payment_type: String,
    pub payment_method: &'static str,
}

impl CreateTransactionRequest {
    pub fn for_item(item: &ZellePreviewItem, member_id: i64, payment_type: &str) -> Self {
        Self {
            external_id: item.external_id.clone(),
            amount: item.amount,
            payment_date: item.payment_date.clone(),
            note: item.note.clone(),
            member_id,
            payment_type: payment_type.to_string(),
            payment_method: "zelle",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreatedTransaction {
    pub id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateTransactionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub transaction: Option<CreatedTransaction>,
    #[serde(default)]
    pub message: Option<String>,
    /// Set when a transaction with this `external_id` already existed.
    #[serde(default)]
    pub duplicate: bool,
}

/// Member id to submit for a row.
///
/// Whatever the reviewer typed wins and must be a positive integer; an empty
/// field falls back to the server's match.
pub fn resolve_member_id(matched: Option<i64>, typed: &str) -> Option<i64> {
    let typed = typed.trim();
    if typed.is_empty() {
        return matched.filter(|id| *id > 0);
    }
    typed.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Reconciliation progress of one preview row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Pending,
    Submitting,
    Created { transaction_id: Option<i64>, duplicate: bool },
    Failed(String),
}

impl RowState {
    pub fn is_done(&self) -> bool {
        matches!(self, RowState::Created { .. })
    }

    pub fn from_response(resp: &CreateTransactionResponse) -> Self {
        if resp.success || resp.duplicate {
            RowState::Created {
                transaction_id: resp.transaction.as_ref().map(|t| t.id),
                duplicate: resp.duplicate,
            }
        } else {
            RowState::Failed(
                resp.message
                    .clone()
                    .unwrap_or_else(|| "Transaction was not created".to_string()),
            )
        }
    }
}

/// Whether the Create button of a row is enabled.
pub fn can_submit(item: &ZellePreviewItem, typed_member_id: &str, state: &RowState) -> bool {
    item.would_create
        && !matches!(state, RowState::Submitting | RowState::Created { .. })
        && resolve_member_id(item.matched_member_id, typed_member_id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(matched: Option<i64>, would_create: bool) -> ZellePreviewItem {
        ZellePreviewItem {
            gmail_id: "g-1".into(),
            external_id: "zelle-TX123".into(),
            amount: 50.0,
            payment_date: Some("2026-10-12".into()),
            note: Some("October dues".into()),
            sender_email: Some("donor@example.org".into()),
            sender_name: None,
            subject: None,
            matched_member_id: matched,
            would_create,
        }
    }

    #[test]
    fn typed_id_must_be_numeric() {
        assert_eq!(resolve_member_id(None, ""), None);
        assert_eq!(resolve_member_id(None, "abc"), None);
        assert_eq!(resolve_member_id(None, "-4"), None);
        assert_eq!(resolve_member_id(None, " 17 "), Some(17));
        assert_eq!(resolve_member_id(Some(3), ""), Some(3));
        assert_eq!(resolve_member_id(Some(3), "9"), Some(9));
        assert_eq!(resolve_member_id(Some(3), "x"), None);
    }

    #[test]
    fn unmatched_row_is_disabled_until_id_typed() {
        let unmatched = item(None, true);
        assert!(!can_submit(&unmatched, "", &RowState::Pending));
        assert!(can_submit(&unmatched, "42", &RowState::Pending));
    }

    #[test]
    fn rows_that_would_not_create_or_are_done_are_disabled() {
        assert!(!can_submit(&item(Some(1), false), "", &RowState::Pending));
        let done = RowState::Created {
            transaction_id: Some(5),
            duplicate: false,
        };
        assert!(!can_submit(&item(Some(1), true), "", &done));
        assert!(!can_submit(&item(Some(1), true), "", &RowState::Submitting));
        assert!(can_submit(
            &item(Some(1), true),
            "",
            &RowState::Failed("boom".into())
        ));
    }

    #[test]
    fn request_carries_external_id_and_method() {
        let req = CreateTransactionRequest::for_item(&item(None, true), 42, "donation");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["external_id"], "zelle-TX123");
        assert_eq!(json["member_id"], 42);
        assert_eq!(json["payment_method"], "zelle");
    }

    #[test]
    fn duplicate_response_counts_as_created() {
        let resp: CreateTransactionResponse =
            serde_json::from_str(r#"{"success": false, "duplicate": true, "message": "exists"}"#)
                .unwrap();
        assert!(RowState::from_response(&resp).is_done());

        let resp: CreateTransactionResponse =
            serde_json::from_str(r#"{"success": false, "message": "Member not found"}"#).unwrap();
        assert_eq!(
            RowState::from_response(&resp),
            RowState::Failed("Member not found".into())
        );
    }

    #[test]
    fn preview_tolerates_missing_optional_fields() {
        let resp: ZellePreviewResponse = serde_json::from_str(
            r#"{"success": true, "items": [{"gmail_id": "g", "external_id": "e", "amount": 20, "would_create": true}]}"#,
        )
        .unwrap();
        assert_eq!(resp.items[0].matched_member_id, None);
        assert!(resp.items[0].would_create);
    }
}
