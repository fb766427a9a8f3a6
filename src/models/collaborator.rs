use serde::{Deserialize, Serialize};

use crate::domain::CollaboratorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorStatus {
    #[default]
    Pendente,
    Aprovado,
}

impl CollaboratorStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Aprovado => "aprovado",
        }
    }
}

/// A desk staff account. Passwords are kept in plaintext and compared
/// byte for byte; this store is not a credential vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: CollaboratorId,

    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default)]
    pub status: CollaboratorStatus,

    /// Set after someone else reset the password; cleared once the owner
    /// picks a new one.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub must_change_password: bool,
}

impl Collaborator {
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self.status, CollaboratorStatus::Aprovado)
    }

    #[must_use]
    pub fn is_primary_admin(&self) -> bool {
        self.id.is_primary_admin()
    }

    /// Case-insensitive name comparison on trimmed input.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Case-insensitive email comparison on trimmed input.
    #[must_use]
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.trim().to_lowercase() == email.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_stored_camel_case_record() {
        let json = r#"{
            "id": "colab_1",
            "name": "Carlos",
            "email": "carlos@example.com",
            "password": "pw",
            "isAdmin": false,
            "status": "pendente"
        }"#;

        let c: Collaborator = serde_json::from_str(json).unwrap();
        assert_eq!(c.status, CollaboratorStatus::Pendente);
        assert!(!c.must_change_password);
        assert!(!c.is_approved());
    }

    #[test]
    fn must_change_password_is_omitted_when_false() {
        let c = Collaborator {
            id: CollaboratorId::new("colab_1"),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "pw".to_string(),
            is_admin: true,
            status: CollaboratorStatus::Aprovado,
            must_change_password: false,
        };

        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"isAdmin\":true"));
        assert!(json.contains("\"status\":\"aprovado\""));
        assert!(!json.contains("mustChangePassword"));
    }

    #[test]
    fn name_and_email_match_ignore_case_and_padding() {
        let c = Collaborator {
            id: CollaboratorId::new("colab_1"),
            name: "Carlos".to_string(),
            email: "Carlos@Example.com".to_string(),
            password: String::new(),
            is_admin: false,
            status: CollaboratorStatus::Aprovado,
            must_change_password: false,
        };

        assert!(c.name_matches("  CARLOS "));
        assert!(c.email_matches("carlos@example.COM"));
        assert!(!c.name_matches("carla"));
    }
}
