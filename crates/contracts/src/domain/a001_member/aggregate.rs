use serde::{Deserialize, Serialize};

use crate::domain::a002_dependent::aggregate::non_blank;
use crate::domain::a002_dependent::Dependent;
use crate::system::roles::Role;

/// Longest welcome note the backend stores.
pub const WELCOME_NOTE_MAX_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub firebase_uid: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
}

fn default_true() -> bool {
    true
}

impl Member {
    pub fn full_name(&self) -> String {
        [
            self.first_name.trim(),
            self.middle_name.as_deref().unwrap_or("").trim(),
            self.last_name.trim(),
        ]
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// One-line postal address, or `None` when no part is filled in.
    pub fn address_line(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.street_address.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.postal_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }

    pub fn matches_search(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.full_name().to_lowercase().contains(&q)
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&q))
            || self.phone_number.as_deref().is_some_and(|p| p.contains(&q))
    }
}

/// `GET /api/members/all/firebase`, bare or wrapped in `{ "members": [..] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemberListResponse {
    Wrapped { members: Vec<Member> },
    Bare(Vec<Member>),
}

impl MemberListResponse {
    pub fn into_members(self) -> Vec<Member> {
        match self {
            MemberListResponse::Wrapped { members } => members,
            MemberListResponse::Bare(members) => members,
        }
    }
}

/// `GET /api/members/:id`, bare or wrapped in `{ "member": {..} }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MemberResponse {
    Wrapped { member: Member },
    Bare(Member),
}

impl MemberResponse {
    pub fn into_member(self) -> Member {
        match self {
            MemberResponse::Wrapped { member } => member,
            MemberResponse::Bare(member) => member,
        }
    }
}

/// Payload for `PUT /api/members/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

impl From<&Member> for MemberUpdate {
    fn from(m: &Member) -> Self {
        Self {
            first_name: m.first_name.clone(),
            middle_name: m.middle_name.clone(),
            last_name: m.last_name.clone(),
            email: m.email.clone(),
            phone_number: m.phone_number.clone(),
            date_of_birth: m.date_of_birth.clone(),
            gender: m.gender.clone(),
            role: m.role,
            is_active: m.is_active,
        }
    }
}

impl MemberUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("Last name is required".to_string());
        }
        Ok(())
    }

    /// Trims names and turns blank optional inputs into `None`, which goes out as `null`.
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            middle_name: self.middle_name.as_deref().and_then(non_blank),
            last_name: self.last_name.trim().to_string(),
            email: self.email.as_deref().and_then(non_blank),
            phone_number: self.phone_number.as_deref().and_then(non_blank),
            date_of_birth: self.date_of_birth.as_deref().and_then(non_blank),
            gender: self.gender.as_deref().and_then(non_blank),
            ..self
        }
    }
}

/// Payload for `POST /api/members/:id/mark-welcomed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WelcomeNote {
    pub note: String,
}

impl WelcomeNote {
    pub fn new(note: &str) -> Self {
        Self {
            note: note.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.note.trim().is_empty() {
            return Err("Please write a note before saving".to_string());
        }
        if self.note.chars().count() > WELCOME_NOTE_MAX_LEN {
            return Err(format!(
                "Note is too long (maximum {WELCOME_NOTE_MAX_LEN} characters)"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        serde_json::from_str(
            r#"{
                "id": 12,
                "firstName": "Abeba",
                "middleName": "",
                "lastName": "Tesfaye",
                "email": "Abeba@Example.org",
                "phoneNumber": "555-0101",
                "role": "secretary",
                "city": "Dallas",
                "state": "TX",
                "dependents": [{"id": 1, "firstName": "Lidya", "lastName": "Tesfaye"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn deserializes_with_defaults() {
        let m = member();
        assert!(m.is_active);
        assert_eq!(m.role, Role::Secretary);
        assert_eq!(m.dependents.len(), 1);
        assert_eq!(m.full_name(), "Abeba Tesfaye");
        assert_eq!(m.address_line().as_deref(), Some("Dallas, TX"));
    }

    #[test]
    fn search_covers_name_email_and_phone() {
        let m = member();
        assert!(m.matches_search("tesf"));
        assert!(m.matches_search("abeba@example"));
        assert!(m.matches_search("0101"));
        assert!(m.matches_search("  "));
        assert!(!m.matches_search("zzz"));
    }

    #[test]
    fn list_response_accepts_both_shapes() {
        let wrapped: MemberListResponse =
            serde_json::from_str(r#"{"success": true, "members": [{"id": 1, "firstName": "A", "lastName": "B"}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_members().len(), 1);

        let bare: MemberListResponse =
            serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(bare.into_members().len(), 2);

        let single: MemberResponse =
            serde_json::from_str(r#"{"member": {"id": 5, "firstName": "Sara"}}"#).unwrap();
        assert_eq!(single.into_member().id, 5);
    }

    #[test]
    fn update_requires_both_names() {
        let mut update = MemberUpdate::from(&member());
        assert!(update.validate().is_ok());
        update.last_name = "  ".into();
        assert_eq!(update.validate().unwrap_err(), "Last name is required");
    }

    #[test]
    fn cleared_fields_are_sent_as_null() {
        let mut update = MemberUpdate::from(&member());
        update.email = Some("   ".into());
        update.phone_number = Some(String::new());
        let update = update.normalized();
        assert_eq!(update.email, None);
        assert_eq!(update.last_name, "Tesfaye");

        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("email").is_some_and(|v| v.is_null()));
        assert!(json["phoneNumber"].is_null());
        assert!(serde_json::to_string(&update).unwrap().contains(r#""email":null"#));
    }

    #[test]
    fn welcome_note_must_not_be_blank() {
        assert!(WelcomeNote::new("   ").validate().is_err());
        assert!(WelcomeNote::new("Welcome to the family!").validate().is_ok());
        let long = "x".repeat(WELCOME_NOTE_MAX_LEN + 1);
        assert!(WelcomeNote::new(&long).validate().is_err());
    }
}
