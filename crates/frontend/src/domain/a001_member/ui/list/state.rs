use leptos::prelude::*;

use crate::shared::config::config;

#[derive(Clone, Debug)]
pub struct MemberListState {
    pub search_query: String,
    pub role_filter: Option<String>,
    pub show_inactive: bool,
    pub sort_field: String,
    pub sort_ascending: bool,
    /// 0-indexed
    pub page: usize,
    pub page_size: usize,
}

impl Default for MemberListState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            role_filter: None,
            show_inactive: true,
            sort_field: "name".to_string(),
            sort_ascending: true,
            page: 0,
            page_size: config().ui.page_size as usize,
        }
    }
}

impl MemberListState {
    pub fn active_filters(&self) -> usize {
        [
            !self.search_query.trim().is_empty(),
            self.role_filter.is_some(),
            !self.show_inactive,
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}

pub fn create_state() -> RwSignal<MemberListState> {
    RwSignal::new(MemberListState::default())
}
