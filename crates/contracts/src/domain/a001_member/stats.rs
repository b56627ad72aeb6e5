use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::aggregate::Member;
use crate::system::roles::Role;

/// Summary shown on the overview tab, computed from the full member list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberStats {
    pub total_members: usize,
    pub active_members: usize,
    pub inactive_members: usize,
    pub joined_this_month: usize,
    pub households_with_dependents: usize,
    pub total_dependents: usize,
    pub by_role: Vec<(Role, usize)>,
    pub by_gender: Vec<(String, usize)>,
}

/// Parses the date part of `YYYY-MM-DD` or an ISO timestamp.
fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn gender_bucket(gender: Option<&str>) -> String {
    match gender.map(|g| g.trim().to_lowercase()) {
        Some(g) if g == "male" || g == "m" => "Male".to_string(),
        Some(g) if g == "female" || g == "f" => "Female".to_string(),
        _ => "Unspecified".to_string(),
    }
}

impl MemberStats {
    pub fn compute(members: &[Member], today: NaiveDate) -> Self {
        let mut stats = MemberStats {
            total_members: members.len(),
            ..Default::default()
        };

        let mut roles: BTreeMap<&'static str, (Role, usize)> = BTreeMap::new();
        let mut genders: BTreeMap<String, usize> = BTreeMap::new();

        for m in members {
            if m.is_active {
                stats.active_members += 1;
            } else {
                stats.inactive_members += 1;
            }

            let joined = m.created_at.as_deref().and_then(parse_date_prefix);
            if joined.is_some_and(|d| d.year() == today.year() && d.month() == today.month()) {
                stats.joined_this_month += 1;
            }

            if !m.dependents.is_empty() {
                stats.households_with_dependents += 1;
                stats.total_dependents += m.dependents.len();
            }

            roles.entry(m.role.as_str()).or_insert((m.role, 0)).1 += 1;
            *genders.entry(gender_bucket(m.gender.as_deref())).or_insert(0) += 1;
        }

        let mut by_role: Vec<(Role, usize)> = roles.into_values().collect();
        by_role.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.as_str().cmp(b.0.as_str())));
        stats.by_role = by_role;
        stats.by_gender = genders.into_iter().collect();
        stats
    }

    /// Share of active members, in percent.
    pub fn active_percent(&self) -> f64 {
        if self.total_members == 0 {
            return 0.0;
        }
        self.active_members as f64 * 100.0 / self.total_members as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(json: &str) -> Member {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn computes_counts() {
        let members = vec![
            member(r#"{"id":1,"firstName":"A","lastName":"B","role":"admin","gender":"Male","createdAt":"2026-10-02T10:00:00Z","dependents":[{"id":1,"firstName":"C","lastName":"B"},{"id":2,"firstName":"D","lastName":"B"}]}"#),
            member(r#"{"id":2,"firstName":"E","lastName":"F","gender":"female","isActive":false,"createdAt":"2026-09-30"}"#),
            member(r#"{"id":3,"firstName":"G","lastName":"H","createdAt":"not a date"}"#),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let stats = MemberStats::compute(&members, today);

        assert_eq!(stats.total_members, 3);
        assert_eq!(stats.active_members, 2);
        assert_eq!(stats.inactive_members, 1);
        assert_eq!(stats.joined_this_month, 1);
        assert_eq!(stats.households_with_dependents, 1);
        assert_eq!(stats.total_dependents, 2);
        assert_eq!(stats.by_role[0], (Role::Member, 2));
        assert_eq!(stats.by_role[1], (Role::Admin, 1));
        assert_eq!(
            stats.by_gender,
            vec![
                ("Female".to_string(), 1),
                ("Male".to_string(), 1),
                ("Unspecified".to_string(), 1)
            ]
        );
        assert!((stats.active_percent() - 66.666).abs() < 0.01);
    }

    #[test]
    fn empty_list_is_all_zero() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let stats = MemberStats::compute(&[], today);
        assert_eq!(stats, MemberStats::default());
        assert_eq!(stats.active_percent(), 0.0);
    }
}
