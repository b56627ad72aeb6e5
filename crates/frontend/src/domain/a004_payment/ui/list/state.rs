use contracts::domain::a004_payment::{Payment, PaymentQuery, PaymentStatus};
use leptos::prelude::*;

use crate::shared::config::config;

#[derive(Clone, Debug)]
pub struct PaymentListState {
    pub items: Vec<Payment>,
    pub search_query: String,
    pub status: Option<PaymentStatus>,
    pub payment_method: Option<String>,
    /// 0-indexed; the API is 1-based.
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub is_loaded: bool,
}

impl Default for PaymentListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            status: None,
            payment_method: None,
            page: 0,
            page_size: config().ui.page_size as usize,
            total_count: 0,
            total_pages: 0,
            is_loaded: false,
        }
    }
}

impl PaymentListState {
    pub fn to_query(&self) -> PaymentQuery {
        let search = self.search_query.trim();
        PaymentQuery {
            page: self.page as u32 + 1,
            limit: self.page_size as u32,
            search: (!search.is_empty()).then(|| search.to_string()),
            status: self.status,
            payment_method: self.payment_method.clone(),
        }
    }

    pub fn active_filters(&self) -> usize {
        [
            !self.search_query.trim().is_empty(),
            self.status.is_some(),
            self.payment_method.is_some(),
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}

pub fn create_state() -> RwSignal<PaymentListState> {
    RwSignal::new(PaymentListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_one_based() {
        let state = PaymentListState {
            page: 2,
            page_size: 50,
            search_query: "  ".into(),
            status: Some(PaymentStatus::Partial),
            ..PaymentListState::default()
        };
        let q = state.to_query();
        assert_eq!(q.page, 3);
        assert_eq!(q.limit, 50);
        assert_eq!(q.search, None);
        assert_eq!(q.status, Some(PaymentStatus::Partial));
        assert_eq!(state.active_filters(), 1);
    }
}
