//! Domain service for signing collaborators in and out.

use thiserror::Error;

use crate::models::Collaborator;
use crate::session::Session;

/// Errors specific to authentication operations, in the order they are
/// checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("User not found")]
    NotFound,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("Account is awaiting administrator approval")]
    PendingApproval,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Looks the account up by case-insensitive name and compares the
    /// password byte for byte. On success the session is signed in and
    /// routed to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotFound`], [`AuthError::WrongPassword`] or
    /// [`AuthError::PendingApproval`], checked in that order.
    async fn login(
        &self,
        session: &mut Session,
        name: &str,
        password: &str,
    ) -> Result<Collaborator, AuthError>;

    /// Clears the session.
    fn logout(&self, session: &mut Session);
}
