use contracts::domain::a005_activity_log::{ActivityLog, ActivityLogQuery};
use leptos::prelude::*;

use crate::shared::config::config;

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Clone, Debug)]
pub struct ActivityLogState {
    pub items: Vec<ActivityLog>,
    pub action: String,
    pub entity_type: String,
    pub actor: String,
    /// `yyyy-mm-dd`, empty when unset
    pub start_date: String,
    pub end_date: String,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub is_loaded: bool,
}

impl Default for ActivityLogState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            action: String::new(),
            entity_type: String::new(),
            actor: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            page: 0,
            page_size: config().ui.log_page_size as usize,
            total_count: 0,
            total_pages: 0,
            is_loaded: false,
        }
    }
}

impl ActivityLogState {
    pub fn to_query(&self) -> ActivityLogQuery {
        ActivityLogQuery {
            page: self.page as u32 + 1,
            limit: self.page_size as u32,
            action: non_empty(&self.action),
            entity_type: non_empty(&self.entity_type),
            actor: non_empty(&self.actor),
            start_date: non_empty(&self.start_date),
            end_date: non_empty(&self.end_date),
        }
    }

    pub fn active_filters(&self) -> usize {
        self.to_query().filter_count()
    }
}

pub fn create_state() -> RwSignal<ActivityLogState> {
    RwSignal::new(ActivityLogState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_omitted() {
        let state = ActivityLogState {
            action: "  ".into(),
            actor: " treasurer ".into(),
            start_date: "2026-10-01".into(),
            page: 1,
            page_size: 50,
            ..ActivityLogState::default()
        };
        let q = state.to_query();
        assert_eq!(q.page, 2);
        assert_eq!(q.action, None);
        assert_eq!(q.actor.as_deref(), Some("treasurer"));
        assert_eq!(q.start_date.as_deref(), Some("2026-10-01"));
        assert_eq!(q.end_date, None);
        assert_eq!(state.active_filters(), 2);
    }
}
