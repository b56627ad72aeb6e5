//! Titles and sidebar icons per tab key.

use contracts::system::roles::DashboardTab;

/// Readable tab title for a key; unknown keys fall back to a generic title.
pub fn tab_label_for_key(key: &str) -> &'static str {
    DashboardTab::from_key(key)
        .map(|tab| tab.label())
        .unwrap_or("Section")
}

pub fn tab_icon_for_key(key: &str) -> &'static str {
    match DashboardTab::from_key(key) {
        Some(DashboardTab::Stats) => "bar-chart",
        Some(DashboardTab::Members) => "users",
        Some(DashboardTab::Departments) => "building",
        Some(DashboardTab::Payments) => "credit-card",
        Some(DashboardTab::Zelle) => "mail",
        Some(DashboardTab::ZelleDocs) => "book",
        Some(DashboardTab::ActivityLogs) => "activity",
        None => "chevron-right",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_have_labels() {
        assert_eq!(tab_label_for_key("a001_member"), "Members");
        assert_eq!(tab_label_for_key("u501_zelle_reconcile"), "Zelle Review");
        assert_eq!(tab_label_for_key("sys_unknown"), "Section");
    }
}
