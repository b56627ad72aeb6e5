//! Role lookup table for the admin dashboard.
//!
//! These flags only decide what the UI renders. Every endpoint checks the
//! caller's role again on the server.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ChurchLeadership,
    Treasurer,
    Secretary,
    #[default]
    Member,
    #[serde(other)]
    Guest,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::ChurchLeadership,
        Role::Treasurer,
        Role::Secretary,
        Role::Member,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ChurchLeadership => "church_leadership",
            Role::Treasurer => "treasurer",
            Role::Secretary => "secretary",
            Role::Member => "member",
            Role::Guest => "guest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::ChurchLeadership => "Church Leadership",
            Role::Treasurer => "Treasurer",
            Role::Secretary => "Secretary",
            Role::Member => "Member",
            Role::Guest => "Guest",
        }
    }

    pub fn from_str_lossy(value: &str) -> Role {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == value)
            .unwrap_or(Role::Guest)
    }
}

/// What a role may see or trigger in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RolePermissions {
    pub can_view_members: bool,
    pub can_edit_members: bool,
    pub can_delete_members: bool,
    pub can_add_dependents: bool,
    pub can_welcome_members: bool,
    pub can_view_financials: bool,
    pub can_reconcile_zelle: bool,
    pub can_view_departments: bool,
    pub can_manage_departments: bool,
    pub can_view_activity_logs: bool,
    pub can_view_stats: bool,
}

impl RolePermissions {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                can_view_members: true,
                can_edit_members: true,
                can_delete_members: true,
                can_add_dependents: true,
                can_welcome_members: true,
                can_view_financials: true,
                can_reconcile_zelle: true,
                can_view_departments: true,
                can_manage_departments: true,
                can_view_activity_logs: true,
                can_view_stats: true,
            },
            Role::ChurchLeadership => Self {
                can_view_members: true,
                can_edit_members: true,
                can_add_dependents: true,
                can_welcome_members: true,
                can_view_financials: true,
                can_view_departments: true,
                can_manage_departments: true,
                can_view_stats: true,
                ..Self::default()
            },
            Role::Treasurer => Self {
                can_view_members: true,
                can_view_financials: true,
                can_reconcile_zelle: true,
                can_view_departments: true,
                can_view_stats: true,
                ..Self::default()
            },
            Role::Secretary => Self {
                can_view_members: true,
                can_edit_members: true,
                can_add_dependents: true,
                can_welcome_members: true,
                can_view_departments: true,
                can_manage_departments: true,
                can_view_stats: true,
                ..Self::default()
            },
            Role::Member | Role::Guest => Self::default(),
        }
    }

    /// True when at least one dashboard tab is visible.
    pub fn has_admin_access(&self) -> bool {
        !visible_tabs(self).is_empty()
    }
}

/// Tabs of the admin dashboard, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardTab {
    Stats,
    Members,
    Departments,
    Payments,
    Zelle,
    ZelleDocs,
    ActivityLogs,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 7] = [
        DashboardTab::Stats,
        DashboardTab::Members,
        DashboardTab::Departments,
        DashboardTab::Payments,
        DashboardTab::Zelle,
        DashboardTab::ZelleDocs,
        DashboardTab::ActivityLogs,
    ];

    /// Stable key used for the tab registry and the `?active=` URL param.
    pub fn key(&self) -> &'static str {
        match self {
            DashboardTab::Stats => "d400_admin_stats",
            DashboardTab::Members => "a001_member",
            DashboardTab::Departments => "a003_department",
            DashboardTab::Payments => "a004_payment",
            DashboardTab::Zelle => "u501_zelle_reconcile",
            DashboardTab::ZelleDocs => "u501_zelle_docs",
            DashboardTab::ActivityLogs => "a005_activity_log",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Stats => "Overview",
            DashboardTab::Members => "Members",
            DashboardTab::Departments => "Departments",
            DashboardTab::Payments => "Payments",
            DashboardTab::Zelle => "Zelle Review",
            DashboardTab::ZelleDocs => "Zelle Ingestion",
            DashboardTab::ActivityLogs => "Activity Log",
        }
    }

    pub fn from_key(key: &str) -> Option<DashboardTab> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn is_allowed(&self, perms: &RolePermissions) -> bool {
        match self {
            DashboardTab::Stats => perms.can_view_stats,
            DashboardTab::Members => perms.can_view_members,
            DashboardTab::Departments => perms.can_view_departments,
            DashboardTab::Payments => perms.can_view_financials,
            DashboardTab::Zelle | DashboardTab::ZelleDocs => perms.can_reconcile_zelle,
            DashboardTab::ActivityLogs => perms.can_view_activity_logs,
        }
    }
}

pub fn visible_tabs(perms: &RolePermissions) -> Vec<DashboardTab> {
    DashboardTab::ALL
        .into_iter()
        .filter(|t| t.is_allowed(perms))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_sees_every_tab() {
        let perms = RolePermissions::for_role(Role::Admin);
        assert_eq!(visible_tabs(&perms), DashboardTab::ALL.to_vec());
    }

    #[test]
    fn treasurer_gets_finance_but_not_logs() {
        let perms = RolePermissions::for_role(Role::Treasurer);
        let tabs = visible_tabs(&perms);
        assert!(tabs.contains(&DashboardTab::Payments));
        assert!(tabs.contains(&DashboardTab::Zelle));
        assert!(!tabs.contains(&DashboardTab::ActivityLogs));
        assert!(!perms.can_edit_members);
    }

    #[test]
    fn secretary_cannot_see_payments() {
        let perms = RolePermissions::for_role(Role::Secretary);
        assert!(!DashboardTab::Payments.is_allowed(&perms));
        assert!(DashboardTab::Members.is_allowed(&perms));
    }

    #[test]
    fn plain_members_have_no_dashboard() {
        assert!(!RolePermissions::for_role(Role::Member).has_admin_access());
        assert!(!RolePermissions::for_role(Role::Guest).has_admin_access());
    }

    #[test]
    fn unknown_role_string_deserializes_as_guest() {
        let role: Role = serde_json::from_str(r#""youth_leader""#).unwrap();
        assert_eq!(role, Role::Guest);
        let role: Role = serde_json::from_str(r#""church_leadership""#).unwrap();
        assert_eq!(role, Role::ChurchLeadership);
        assert_eq!(Role::from_str_lossy("treasurer"), Role::Treasurer);
    }

    #[test]
    fn tab_keys_round_trip() {
        for tab in DashboardTab::ALL {
            assert_eq!(DashboardTab::from_key(tab.key()), Some(tab));
        }
        assert_eq!(DashboardTab::from_key("nope"), None);
    }
}
