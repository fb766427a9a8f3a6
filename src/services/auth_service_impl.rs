//! `DomainStore` implementation of the `AuthService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::Collaborator;
use crate::services::auth_service::{AuthError, AuthService};
use crate::session::Session;
use crate::state::DomainStore;

pub struct DeskAuthService {
    desk: Arc<DomainStore>,
}

impl DeskAuthService {
    #[must_use]
    pub const fn new(desk: Arc<DomainStore>) -> Self {
        Self { desk }
    }
}

#[async_trait]
impl AuthService for DeskAuthService {
    async fn login(
        &self,
        session: &mut Session,
        name: &str,
        password: &str,
    ) -> Result<Collaborator, AuthError> {
        let collaborator = self
            .desk
            .collaborators()
            .await
            .into_iter()
            .find(|c| c.name_matches(name))
            .ok_or(AuthError::NotFound)?;

        if collaborator.password != password {
            warn!(id = %collaborator.id, "Login rejected: wrong password");
            return Err(AuthError::WrongPassword);
        }

        if !collaborator.is_approved() {
            return Err(AuthError::PendingApproval);
        }

        info!(id = %collaborator.id, "Collaborator signed in");
        session.sign_in(collaborator.clone());
        Ok(collaborator)
    }

    fn logout(&self, session: &mut Session) {
        if let Some(current) = session.current() {
            info!(id = %current.id, "Collaborator signed out");
        }
        session.logout();
    }
}
