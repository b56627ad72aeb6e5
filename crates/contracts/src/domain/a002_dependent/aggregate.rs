use serde::{Deserialize, Serialize};

/// Relationship choices offered by the add-dependent form.
pub const RELATIONSHIPS: &[&str] = &["Son", "Daughter", "Spouse", "Parent", "Sibling", "Other"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub baptism_name: Option<String>,
    #[serde(default)]
    pub is_baptized: bool,
}

impl Dependent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Form state and payload for `POST /api/members/:id/dependents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDependent {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baptism_name: Option<String>,
    pub is_baptized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Trims a text input and maps blank to `None`.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl NewDependent {
    /// Checks the required name fields; the form does nothing else client-side.
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("Last name is required".to_string());
        }
        Ok(())
    }

    /// Copy with names trimmed, ready to send.
    pub fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            middle_name: self.middle_name.as_deref().and_then(non_blank),
            date_of_birth: self.date_of_birth.as_deref().and_then(non_blank),
            gender: self.gender.as_deref().and_then(non_blank),
            relationship: self.relationship.as_deref().and_then(non_blank),
            phone: self.phone.as_deref().and_then(non_blank),
            email: self.email.as_deref().and_then(non_blank),
            baptism_name: self.baptism_name.as_deref().and_then(non_blank),
            is_baptized: self.is_baptized,
            notes: self.notes.as_deref().and_then(non_blank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_last_name_is_rejected() {
        let form = NewDependent {
            first_name: "Sara".into(),
            last_name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err(), "Last name is required");
    }

    #[test]
    fn first_name_is_checked_first() {
        let form = NewDependent::default();
        assert_eq!(form.validate().unwrap_err(), "First name is required");
    }

    #[test]
    fn normalized_drops_blank_optionals() {
        let form = NewDependent {
            first_name: " Sara ".into(),
            last_name: "Bekele".into(),
            email: Some("  ".into()),
            relationship: Some("Daughter".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(form.normalized()).unwrap();
        assert_eq!(json["firstName"], "Sara");
        assert_eq!(json["relationship"], "Daughter");
        assert!(json.get("email").is_none());
        assert_eq!(json["isBaptized"], false);
    }
}
