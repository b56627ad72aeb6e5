use contracts::system::roles::{DashboardTab, RolePermissions};
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Opens the tab named by `?active=` (or the first permitted tab) and
    /// keeps the URL in sync with the active tab from then on.
    pub fn init_router_integration(&self, permissions: Signal<RolePermissions>) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();

        let perms = permissions.get_untracked();
        match initial_tab(params.get("active").map(String::as_str), &perms) {
            Some(tab) => self.open_tab(tab.key(), tab.label()),
            None => log::warn!("No dashboard tab is permitted for this role"),
        }

        // Close tabs the user lost access to (e.g. after a role change).
        let this = *self;
        Effect::new(move |_| {
            let perms = permissions.get();
            let denied: Vec<String> = this.opened.with_untracked(|tabs| {
                tabs.iter()
                    .filter(|t| !DashboardTab::from_key(&t.key).is_some_and(|d| d.is_allowed(&perms)))
                    .map(|t| t.key.clone())
                    .collect()
            });
            for key in denied {
                this.close_tab(&key);
            }
        });

        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let query_string =
                    serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                        .unwrap_or_default();

                let new_url = format!("?{}", query_string);

                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                // Only update URL if it actually changed
                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            let _ = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            );
                        }
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}'", key);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            let tab = Tab {
                key: key.to_string(),
                title: title.to_string(),
            };
            self.opened.update(|tabs| tabs.push(tab));
        }
        self.activate_tab(key);
    }

    /// Opens a dashboard tab by key with its standard label.
    pub fn open_key(&self, key: &str) {
        self.open_tab(key, tab_label_for_key(key));
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// Tab to show first: the requested one if the role may see it, otherwise
/// the first permitted tab.
pub fn initial_tab(requested: Option<&str>, perms: &RolePermissions) -> Option<DashboardTab> {
    requested
        .and_then(DashboardTab::from_key)
        .filter(|tab| tab.is_allowed(perms))
        .or_else(|| {
            DashboardTab::ALL
                .into_iter()
                .find(|tab| tab.is_allowed(perms))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::roles::Role;

    #[test]
    fn requested_tab_is_used_when_permitted() {
        let perms = RolePermissions::for_role(Role::Admin);
        assert_eq!(
            initial_tab(Some("a005_activity_log"), &perms),
            Some(DashboardTab::ActivityLogs)
        );
    }

    #[test]
    fn forbidden_or_unknown_tab_falls_back_to_first_permitted() {
        let perms = RolePermissions::for_role(Role::Secretary);
        assert_eq!(
            initial_tab(Some("a004_payment"), &perms),
            Some(DashboardTab::Stats)
        );
        assert_eq!(initial_tab(Some("garbage"), &perms), Some(DashboardTab::Stats));
        assert_eq!(initial_tab(None, &perms), Some(DashboardTab::Stats));
    }

    #[test]
    fn no_tab_for_plain_members() {
        let perms = RolePermissions::for_role(Role::Member);
        assert_eq!(initial_tab(Some("a001_member"), &perms), None);
    }
}
