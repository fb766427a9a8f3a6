//! Domain primitives for the visitor desk.
//!
//! Identifier newtypes keep collaborator and interaction ids from being mixed
//! up, and `View` is the closed set of screens a session can be routed to.

pub mod events;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::PRIMARY_ADMIN_ID;

/// Unique identifier for a collaborator account.
///
/// # Examples
///
/// ```rust
/// use visitdesk::domain::CollaboratorId;
///
/// let id = CollaboratorId::new("colab_42");
/// assert_eq!(id.as_str(), "colab_42");
/// assert!(!id.is_primary_admin());
/// assert!(CollaboratorId::primary_admin().is_primary_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollaboratorId(String);

impl CollaboratorId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh id for a newly registered account.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("colab_{}", uuid::Uuid::new_v4().simple()))
    }

    /// The reserved id of the protected primary admin.
    #[must_use]
    pub fn primary_admin() -> Self {
        Self(PRIMARY_ADMIN_ID.to_string())
    }

    #[must_use]
    pub fn is_primary_admin(&self) -> bool {
        self.0 == PRIMARY_ADMIN_ID
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollaboratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CollaboratorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CollaboratorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier for a logged interaction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionId(String);

impl InteractionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(format!("int_{}", uuid::Uuid::new_v4().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InteractionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Screens a session can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Login,
    Dashboard,
    Reports,
    Admin,
    Analysis,
}

impl View {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::Reports => "reports",
            Self::Admin => "admin",
            Self::Analysis => "analysis",
        }
    }

    /// Views only administrators may open.
    #[must_use]
    pub const fn requires_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "login" => Ok(Self::Login),
            "dashboard" => Ok(Self::Dashboard),
            "reports" => Ok(Self::Reports),
            "admin" => Ok(Self::Admin),
            "analysis" => Ok(Self::Analysis),
            _ => Err(format!("Unknown view: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let a = CollaboratorId::generate();
        let b = CollaboratorId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("colab_"));
        assert!(InteractionId::generate().as_str().starts_with("int_"));
    }

    #[test]
    fn collaborator_id_serializes_as_plain_string() {
        let id = CollaboratorId::primary_admin();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"primary_admin_account\"");

        let back: CollaboratorId = serde_json::from_str(&json).unwrap();
        assert!(back.is_primary_admin());
    }

    #[test]
    fn view_parses_case_insensitively() {
        assert_eq!("Reports".parse::<View>().unwrap(), View::Reports);
        assert!("settings".parse::<View>().is_err());
        assert!(View::Admin.requires_admin());
        assert!(!View::Analysis.requires_admin());
    }
}
