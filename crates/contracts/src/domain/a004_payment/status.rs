use serde::{Deserialize, Serialize};

use super::aggregate::Payment;

/// Amounts below one cent are treated as zero.
const EPSILON: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    UpToDate,
    Partial,
    Behind,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::UpToDate,
        PaymentStatus::Partial,
        PaymentStatus::Behind,
    ];

    /// Buckets a dues position by comparing what is owed with what came in.
    pub fn derive(total_amount_due: f64, total_collected: f64) -> Self {
        if total_amount_due <= EPSILON || total_collected + EPSILON >= total_amount_due {
            PaymentStatus::UpToDate
        } else if total_collected <= EPSILON {
            PaymentStatus::Behind
        } else {
            PaymentStatus::Partial
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::UpToDate => "Up to Date",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Behind => "Behind",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::UpToDate => "up_to_date",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Behind => "behind",
        }
    }

    pub fn parse(value: &str) -> Option<PaymentStatus> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// BEM modifier for the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            PaymentStatus::UpToDate => "badge badge--success",
            PaymentStatus::Partial => "badge badge--warning",
            PaymentStatus::Behind => "badge badge--error",
        }
    }
}

/// Totals and status buckets over a set of payments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentSummary {
    pub count: usize,
    pub total_due: f64,
    pub total_collected: f64,
    pub outstanding: f64,
    pub up_to_date: usize,
    pub partial: usize,
    pub behind: usize,
}

impl PaymentSummary {
    pub fn from_payments(payments: &[Payment]) -> Self {
        payments.iter().fold(
            PaymentSummary {
                count: payments.len(),
                ..Default::default()
            },
            |mut acc, p| {
                acc.total_due += p.total_amount_due;
                acc.total_collected += p.total_collected;
                acc.outstanding += p.balance_due.max(0.0);
                match p.status() {
                    PaymentStatus::UpToDate => acc.up_to_date += 1,
                    PaymentStatus::Partial => acc.partial += 1,
                    PaymentStatus::Behind => acc.behind += 1,
                }
                acc
            },
        )
    }

    /// Collected share of the amount due, in percent.
    pub fn collection_rate(&self) -> f64 {
        if self.total_due <= EPSILON {
            return 100.0;
        }
        (self.total_collected * 100.0 / self.total_due).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(due: f64, collected: f64) -> Payment {
        Payment {
            id: 1,
            member_id: Some(1),
            member_name: "Test".into(),
            member_email: None,
            member_phone: None,
            total_amount_due: due,
            total_collected: collected,
            balance_due: (due - collected).max(0.0),
            payment_method: None,
            last_payment_date: None,
        }
    }

    #[test]
    fn fully_paid_is_up_to_date() {
        assert_eq!(PaymentStatus::derive(100.0, 100.0), PaymentStatus::UpToDate);
        assert_eq!(PaymentStatus::derive(100.0, 150.0), PaymentStatus::UpToDate);
        assert_eq!(PaymentStatus::derive(100.0, 100.0).label(), "Up to Date");
    }

    #[test]
    fn nothing_collected_is_behind() {
        assert_eq!(PaymentStatus::derive(100.0, 0.0), PaymentStatus::Behind);
        assert_eq!(PaymentStatus::derive(0.01, 0.0), PaymentStatus::Behind);
        assert_eq!(PaymentStatus::derive(100.0, 0.0).label(), "Behind");
    }

    #[test]
    fn some_collected_is_partial() {
        assert_eq!(PaymentStatus::derive(100.0, 40.0), PaymentStatus::Partial);
    }

    #[test]
    fn nothing_due_is_up_to_date() {
        assert_eq!(PaymentStatus::derive(0.0, 0.0), PaymentStatus::UpToDate);
    }

    #[test]
    fn status_serializes_for_query_strings() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::UpToDate).unwrap(),
            r#""up_to_date""#
        );
        assert_eq!(PaymentStatus::parse("behind"), Some(PaymentStatus::Behind));
    }

    #[test]
    fn summary_buckets_and_totals() {
        let payments = vec![payment(100.0, 100.0), payment(200.0, 50.0), payment(120.0, 0.0)];
        let s = PaymentSummary::from_payments(&payments);
        assert_eq!(s.count, 3);
        assert_eq!((s.up_to_date, s.partial, s.behind), (1, 1, 1));
        assert_eq!(s.total_due, 420.0);
        assert_eq!(s.total_collected, 150.0);
        assert_eq!(s.outstanding, 270.0);
        assert!((s.collection_rate() - 35.714).abs() < 0.01);
    }

    #[test]
    fn empty_summary_reports_full_collection() {
        let s = PaymentSummary::from_payments(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.collection_rate(), 100.0);
    }

    #[test]
    fn payment_list_response_reads_camel_case() {
        let json = r#"{
            "payments": [{"id": 9, "memberName": "Hanna", "totalAmountDue": 100, "totalCollected": 100, "balanceDue": 0, "paymentMethod": "zelle"}],
            "pagination": {"page": 2, "limit": 10, "total": 11, "pages": 2}
        }"#;
        let resp: crate::domain::a004_payment::PaymentListResponse =
            serde_json::from_str(json).unwrap();
        assert_eq!(resp.payments[0].status(), PaymentStatus::UpToDate);
        assert_eq!(resp.pagination.pages, 2);
    }
}
