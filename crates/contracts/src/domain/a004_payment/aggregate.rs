use serde::{Deserialize, Serialize};

use super::status::PaymentStatus;
use crate::shared::Pagination;

/// Methods offered by the payment filter.
pub const PAYMENT_METHODS: &[&str] = &["cash", "check", "zelle", "card", "ach", "other"];

/// Dues position of one member, as returned by `GET /api/payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub member_email: Option<String>,
    #[serde(default)]
    pub member_phone: Option<String>,
    #[serde(default)]
    pub total_amount_due: f64,
    #[serde(default)]
    pub total_collected: f64,
    #[serde(default)]
    pub balance_due: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub last_payment_date: Option<String>,
}

impl Payment {
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::derive(self.total_amount_due, self.total_collected)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentListResponse {
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Query for `GET /api/payments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Default for PaymentQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: None,
            status: None,
            payment_method: None,
        }
    }
}
