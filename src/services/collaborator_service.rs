//! Domain service for collaborator accounts.
//!
//! Covers self-registration, the approval workflow, admin-side account
//! management and both password flows (admin reset and self-service
//! recovery).

use serde::Serialize;
use thiserror::Error;

use crate::domain::CollaboratorId;
use crate::models::Collaborator;
use crate::services::policy::PolicyError;
use crate::session::Session;

/// Input validation failures surfaced next to the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    BlankField(&'static str),

    #[error("A collaborator with this name already exists")]
    DuplicateName,

    #[error("A collaborator with this email already exists")]
    DuplicateEmail,

    #[error("This name is reserved")]
    ReservedName,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error("Collaborator not found: {0}")]
    UnknownCollaborator(CollaboratorId),

    #[error("No account registered with email {0}")]
    EmailNotFound(String),

    #[error("No collaborator is signed in")]
    NotLoggedIn,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for CollaboratorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

/// Self-registration form.
#[derive(Debug, Clone, Default)]
pub struct NewCollaborator {
    pub name: String,
    pub email: String,
    pub password: String,
    /// When present it must equal `password`.
    pub password_confirmation: Option<String>,
}

/// Admin-side profile edit. An empty `password` keeps the current one.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

/// Result of the self-service recovery flow. There is no outbound mail:
/// the caller shows `password` and may open `mailto`.
#[derive(Debug, Clone, Serialize)]
pub struct TempPassword {
    pub name: String,
    pub email: String,
    pub password: String,
    pub mailto: String,
}

/// Domain service trait for collaborator accounts.
#[async_trait::async_trait]
pub trait CollaboratorService: Send + Sync {
    /// All accounts in storage order.
    async fn list(&self) -> Vec<Collaborator>;

    /// Accounts waiting for approval.
    async fn list_pending(&self) -> Vec<Collaborator>;

    async fn get(&self, id: &CollaboratorId) -> Result<Collaborator, CollaboratorError>;

    /// Creates a pending, non-admin account.
    ///
    /// # Errors
    ///
    /// `ReservedName` for the canonical admin name, then `BlankField`,
    /// `PasswordMismatch`, `DuplicateName` and `DuplicateEmail`.
    async fn register(&self, input: NewCollaborator) -> Result<Collaborator, CollaboratorError>;

    /// Marks the account approved. Returns `false` when the id is unknown.
    async fn approve(&self, id: &CollaboratorId) -> Result<bool, CollaboratorError>;

    /// Deletes a pending account outright. Returns `false` when the id is
    /// unknown or the account is already approved.
    async fn reject(&self, id: &CollaboratorId) -> Result<bool, CollaboratorError>;

    /// Deletes the account and every interaction it logged. Returns the
    /// number of interactions removed alongside it.
    async fn delete(&self, id: &CollaboratorId) -> Result<usize, CollaboratorError>;

    /// Flips admin rights and returns the new value.
    async fn toggle_admin(&self, id: &CollaboratorId) -> Result<bool, CollaboratorError>;

    /// Sets a password on behalf of `actor`. Unless the actor is the account
    /// owner the target has to choose a new password at next login.
    async fn reset_password(
        &self,
        actor: &Session,
        id: &CollaboratorId,
        new_password: &str,
    ) -> Result<(), CollaboratorError>;

    /// Replaces the password of the account registered with `email` by a
    /// random temporary one.
    ///
    /// # Errors
    ///
    /// `EmailNotFound` when no account uses that email; nothing changes.
    async fn request_password_reset(&self, email: &str) -> Result<TempPassword, CollaboratorError>;

    /// Edits name, email and optionally password. The session copy is
    /// refreshed when `id` is the signed-in account.
    async fn update_profile(
        &self,
        session: &mut Session,
        id: &CollaboratorId,
        update: ProfileUpdate,
    ) -> Result<Collaborator, CollaboratorError>;

    /// Lets the signed-in collaborator pick their own password.
    async fn change_own_password(
        &self,
        session: &mut Session,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), CollaboratorError>;
}
