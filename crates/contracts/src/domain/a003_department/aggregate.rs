use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentType {
    #[default]
    Ministry,
    Committee,
    Service,
    Social,
    Administrative,
    #[serde(other)]
    Other,
}

impl DepartmentType {
    pub const ALL: [DepartmentType; 6] = [
        DepartmentType::Ministry,
        DepartmentType::Committee,
        DepartmentType::Service,
        DepartmentType::Social,
        DepartmentType::Administrative,
        DepartmentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentType::Ministry => "ministry",
            DepartmentType::Committee => "committee",
            DepartmentType::Service => "service",
            DepartmentType::Social => "social",
            DepartmentType::Administrative => "administrative",
            DepartmentType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DepartmentType::Ministry => "Ministry",
            DepartmentType::Committee => "Committee",
            DepartmentType::Service => "Service",
            DepartmentType::Social => "Social",
            DepartmentType::Administrative => "Administrative",
            DepartmentType::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<DepartmentType> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentLeader {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl DepartmentLeader {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub department_type: DepartmentType,
    #[serde(default)]
    pub leader_id: Option<i64>,
    #[serde(default)]
    pub leader: Option<DepartmentLeader>,
    #[serde(default)]
    pub parent_department_id: Option<i64>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub max_members: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub meeting_schedule: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(rename = "subDepartments", default)]
    pub sub_departments: Vec<Department>,
}

fn default_true() -> bool {
    true
}

impl Department {
    /// Membership as a percentage of capacity; `None` when uncapped.
    pub fn fill_percent(&self) -> Option<f64> {
        match self.max_members {
            Some(max) if max > 0 => Some((self.member_count as f64 * 100.0 / max as f64).min(100.0)),
            _ => None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.max_members
            .is_some_and(|max| max > 0 && self.member_count >= max)
    }

    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty()
            || self.name.to_lowercase().contains(&q)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&q))
            || self.sub_departments.iter().any(|s| s.matches_search(&q))
    }
}

/// `GET /api/departments` answers either with a bare array or wrapped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DepartmentListResponse {
    Wrapped { departments: Vec<Department> },
    Bare(Vec<Department>),
}

impl DepartmentListResponse {
    pub fn into_departments(self) -> Vec<Department> {
        match self {
            DepartmentListResponse::Wrapped { departments } => departments,
            DepartmentListResponse::Bare(departments) => departments,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentTypeCount {
    #[serde(rename = "type")]
    pub department_type: DepartmentType,
    pub count: u32,
}

/// `GET /api/departments/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentStats {
    pub total_departments: u32,
    pub active_departments: u32,
    pub total_members: u32,
    pub by_type: Vec<DepartmentTypeCount>,
}

/// Filters for `GET /api/departments`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepartmentQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub department_type: Option<DepartmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub include_inactive: bool,
}

/// Create/edit form, sent to `POST /api/departments` or `PUT /api/departments/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentForm {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub department_type: DepartmentType,
    pub leader_id: Option<i64>,
    pub parent_department_id: Option<i64>,
    pub max_members: Option<u32>,
    pub meeting_schedule: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: bool,
}

impl From<&Department> for DepartmentForm {
    fn from(d: &Department) -> Self {
        Self {
            name: d.name.clone(),
            description: d.description.clone(),
            department_type: d.department_type,
            leader_id: d.leader_id.or(d.leader.as_ref().map(|l| l.id)),
            parent_department_id: d.parent_department_id,
            max_members: d.max_members,
            meeting_schedule: d.meeting_schedule.clone(),
            contact_email: d.contact_email.clone(),
            is_active: d.is_active,
        }
    }
}

impl DepartmentForm {
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }

    /// `editing_id` is the department being edited, if any.
    pub fn validate(&self, editing_id: Option<i64>) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Department name is required".to_string());
        }
        if self.max_members == Some(0) {
            return Err("Maximum members must be greater than zero".to_string());
        }
        if editing_id.is_some() && editing_id == self.parent_department_id {
            return Err("A department cannot be its own parent".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_department() {
        let d: Department = serde_json::from_str(
            r#"{
                "id": 1, "name": "Youth", "type": "ministry",
                "leader": {"id": 4, "first_name": "Dawit", "last_name": "Alemu"},
                "member_count": 18, "max_members": 20,
                "subDepartments": [{"id": 2, "name": "Youth Choir", "type": "service", "parent_department_id": 1}]
            }"#,
        )
        .unwrap();
        assert_eq!(d.department_type, DepartmentType::Ministry);
        assert_eq!(d.leader.as_ref().unwrap().full_name(), "Dawit Alemu");
        assert_eq!(d.sub_departments.len(), 1);
        assert!(d.is_active);
        assert_eq!(d.fill_percent(), Some(90.0));
        assert!(!d.is_full());
    }

    #[test]
    fn unknown_type_maps_to_other() {
        let d: Department =
            serde_json::from_str(r#"{"id": 3, "name": "X", "type": "outreach"}"#).unwrap();
        assert_eq!(d.department_type, DepartmentType::Other);
        assert_eq!(d.fill_percent(), None);
    }

    #[test]
    fn list_response_accepts_both_shapes() {
        let bare: DepartmentListResponse =
            serde_json::from_str(r#"[{"id": 1, "name": "A"}]"#).unwrap();
        assert_eq!(bare.into_departments().len(), 1);

        let wrapped: DepartmentListResponse =
            serde_json::from_str(r#"{"success": true, "departments": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_departments().len(), 2);
    }

    #[test]
    fn form_validation() {
        let mut form = DepartmentForm::new();
        assert!(form.validate(None).is_err());
        form.name = "Choir".into();
        assert!(form.validate(None).is_ok());
        form.max_members = Some(0);
        assert!(form.validate(None).is_err());
        form.max_members = Some(30);
        form.parent_department_id = Some(5);
        assert_eq!(
            form.validate(Some(5)).unwrap_err(),
            "A department cannot be its own parent"
        );
    }

    #[test]
    fn moving_to_top_level_sends_null_parent() {
        let d: Department = serde_json::from_str(
            r#"{"id": 2, "name": "Youth Choir", "type": "ministry",
                "parent_department_id": 1, "max_members": 10, "leader_id": 4}"#,
        )
        .unwrap();
        let mut form = DepartmentForm::from(&d);
        assert_eq!(form.parent_department_id, Some(1));
        form.parent_department_id = None;
        form.max_members = None;
        form.leader_id = None;

        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("parent_department_id").is_some_and(|v| v.is_null()));
        assert!(json.get("max_members").is_some_and(|v| v.is_null()));
        assert!(json.get("leader_id").is_some_and(|v| v.is_null()));
        assert!(serde_json::to_string(&form)
            .unwrap()
            .contains(r#""parent_department_id":null"#));
    }

    #[test]
    fn full_when_at_capacity() {
        let d: Department = serde_json::from_str(
            r#"{"id": 1, "name": "Ushers", "member_count": 12, "max_members": 10}"#,
        )
        .unwrap();
        assert!(d.is_full());
        assert_eq!(d.fill_percent(), Some(100.0));
    }
}
