//! `DomainStore` implementation of the `CollaboratorService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{BootstrapConfig, SecurityConfig};
use crate::domain::CollaboratorId;
use crate::domain::events::DeskEvent;
use crate::models::{Collaborator, CollaboratorStatus};
use crate::services::collaborator_service::{
    CollaboratorError, CollaboratorService, NewCollaborator, ProfileUpdate, TempPassword,
    ValidationError,
};
use crate::services::policy::{self, AdminAction};
use crate::session::Session;
use crate::state::{DeskData, DomainStore};

const RESET_SUBJECT: &str = "Recuperação de Password";

pub struct DeskCollaboratorService {
    desk: Arc<DomainStore>,
    bootstrap: BootstrapConfig,
    security: SecurityConfig,
}

impl DeskCollaboratorService {
    #[must_use]
    pub const fn new(
        desk: Arc<DomainStore>,
        bootstrap: BootstrapConfig,
        security: SecurityConfig,
    ) -> Self {
        Self {
            desk,
            bootstrap,
            security,
        }
    }

    fn is_reserved(&self, name: &str) -> bool {
        name.trim().to_lowercase() == self.bootstrap.admin_name.trim().to_lowercase()
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

/// Name and email must be unique among every account except `except`.
fn ensure_unique(
    data: &DeskData,
    name: &str,
    email: &str,
    except: Option<&CollaboratorId>,
) -> Result<(), ValidationError> {
    let others: Vec<&Collaborator> = data
        .collaborators
        .iter()
        .filter(|c| except.is_none_or(|id| &c.id != id))
        .collect();

    if others.iter().any(|c| c.name_matches(name)) {
        return Err(ValidationError::DuplicateName);
    }
    if others.iter().any(|c| c.email_matches(email)) {
        return Err(ValidationError::DuplicateEmail);
    }
    Ok(())
}

fn existing<'a>(
    data: &'a DeskData,
    id: &CollaboratorId,
) -> Result<&'a Collaborator, CollaboratorError> {
    data.collaborator(id)
        .ok_or_else(|| CollaboratorError::UnknownCollaborator(id.clone()))
}

/// Random base-36 string. Not a cryptographic credential.
#[must_use]
pub fn generate_temp_password(length: usize) -> String {
    use rand::Rng;

    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();

    (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

fn mailto_link(email: &str, name: &str, password: &str) -> String {
    let body = format!(
        "Olá {name},\n\nA sua password temporária é: {password}\n\nDeverá alterá-la no próximo login."
    );
    format!(
        "mailto:{}?subject={}&body={}",
        email,
        urlencoding::encode(RESET_SUBJECT),
        urlencoding::encode(&body)
    )
}

#[async_trait]
impl CollaboratorService for DeskCollaboratorService {
    async fn list(&self) -> Vec<Collaborator> {
        self.desk.collaborators().await
    }

    async fn list_pending(&self) -> Vec<Collaborator> {
        self.desk
            .collaborators()
            .await
            .into_iter()
            .filter(|c| c.status == CollaboratorStatus::Pendente)
            .collect()
    }

    async fn get(&self, id: &CollaboratorId) -> Result<Collaborator, CollaboratorError> {
        self.desk
            .collaborator(id)
            .await
            .ok_or_else(|| CollaboratorError::UnknownCollaborator(id.clone()))
    }

    async fn register(&self, input: NewCollaborator) -> Result<Collaborator, CollaboratorError> {
        if self.is_reserved(&input.name) {
            return Err(ValidationError::ReservedName.into());
        }
        require(&input.name, "name")?;
        require(&input.email, "email")?;
        require(&input.password, "password")?;
        if let Some(confirmation) = &input.password_confirmation {
            if *confirmation != input.password {
                return Err(ValidationError::PasswordMismatch.into());
            }
        }

        let collaborator = Collaborator {
            id: CollaboratorId::generate(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            password: input.password,
            is_admin: false,
            status: CollaboratorStatus::Pendente,
            must_change_password: false,
        };

        let created = self
            .desk
            .transact(|data| {
                ensure_unique(data, &collaborator.name, &collaborator.email, None)?;
                data.collaborators.push(collaborator.clone());
                Ok::<_, CollaboratorError>(collaborator)
            })
            .await?;

        info!(id = %created.id, name = %created.name, "Collaborator registered");
        self.desk.publish(DeskEvent::CollaboratorRegistered {
            id: created.id.clone(),
            name: created.name.clone(),
        });
        Ok(created)
    }

    async fn approve(&self, id: &CollaboratorId) -> Result<bool, CollaboratorError> {
        let approved = self
            .desk
            .transact(|data| {
                let Some(target) = data.collaborator_mut(id) else {
                    return Ok::<_, CollaboratorError>(false);
                };
                target.status = CollaboratorStatus::Aprovado;
                Ok(true)
            })
            .await?;

        if approved {
            info!(id = %id, "Collaborator approved");
            self.desk
                .publish(DeskEvent::CollaboratorApproved { id: id.clone() });
        }
        Ok(approved)
    }

    async fn reject(&self, id: &CollaboratorId) -> Result<bool, CollaboratorError> {
        let rejected = self
            .desk
            .transact(|data| {
                let pending = data
                    .collaborator(id)
                    .is_some_and(|c| c.status == CollaboratorStatus::Pendente);
                if !pending {
                    return Ok::<_, CollaboratorError>(false);
                }
                data.collaborators.retain(|c| &c.id != id);
                data.remove_interactions_of(id);
                Ok(true)
            })
            .await?;

        if rejected {
            info!(id = %id, "Registration rejected");
            self.desk
                .publish(DeskEvent::CollaboratorRejected { id: id.clone() });
        }
        Ok(rejected)
    }

    async fn delete(&self, id: &CollaboratorId) -> Result<usize, CollaboratorError> {
        let removed = self
            .desk
            .transact(|data| {
                let target = existing(data, id)?;
                policy::check(&data.collaborators, target, AdminAction::Delete)?;

                data.collaborators.retain(|c| &c.id != id);
                Ok::<_, CollaboratorError>(data.remove_interactions_of(id))
            })
            .await
            .inspect_err(|e| {
                if matches!(e, CollaboratorError::Policy(_)) {
                    warn!(id = %id, error = %e, "Collaborator deletion refused");
                }
            })?;

        info!(id = %id, removed_interactions = removed, "Collaborator deleted");
        self.desk.publish(DeskEvent::CollaboratorDeleted {
            id: id.clone(),
            removed_interactions: removed,
        });
        Ok(removed)
    }

    async fn toggle_admin(&self, id: &CollaboratorId) -> Result<bool, CollaboratorError> {
        let is_admin = self
            .desk
            .transact(|data| {
                let target = existing(data, id)?;
                policy::check(&data.collaborators, target, AdminAction::ToggleAdmin)?;

                let target = data
                    .collaborator_mut(id)
                    .ok_or_else(|| CollaboratorError::UnknownCollaborator(id.clone()))?;
                target.is_admin = !target.is_admin;
                Ok::<_, CollaboratorError>(target.is_admin)
            })
            .await
            .inspect_err(|e| {
                if matches!(e, CollaboratorError::Policy(_)) {
                    warn!(id = %id, error = %e, "Admin toggle refused");
                }
            })?;

        info!(id = %id, is_admin, "Admin rights changed");
        self.desk.publish(DeskEvent::AdminToggled {
            id: id.clone(),
            is_admin,
        });
        Ok(is_admin)
    }

    async fn reset_password(
        &self,
        actor: &Session,
        id: &CollaboratorId,
        new_password: &str,
    ) -> Result<(), CollaboratorError> {
        require(new_password, "password")?;
        let by_owner = actor.current().is_some_and(|c| &c.id == id);

        self.desk
            .transact(|data| {
                let target = existing(data, id)?;
                policy::check(
                    &data.collaborators,
                    target,
                    AdminAction::ResetPassword { by_owner },
                )?;

                let target = data
                    .collaborator_mut(id)
                    .ok_or_else(|| CollaboratorError::UnknownCollaborator(id.clone()))?;
                target.password = new_password.to_string();
                target.must_change_password = !by_owner;
                Ok::<_, CollaboratorError>(())
            })
            .await
            .inspect_err(|e| {
                if matches!(e, CollaboratorError::Policy(_)) {
                    warn!(id = %id, error = %e, "Password reset refused");
                }
            })?;

        info!(id = %id, by_owner, "Password reset");
        self.desk
            .publish(DeskEvent::PasswordReset { id: id.clone() });
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<TempPassword, CollaboratorError> {
        let password = generate_temp_password(self.security.temp_password_length);

        let (id, name, address) = self
            .desk
            .transact(|data| {
                let target = data
                    .collaborators
                    .iter_mut()
                    .find(|c| c.email_matches(email))
                    .ok_or_else(|| CollaboratorError::EmailNotFound(email.trim().to_string()))?;
                target.password.clone_from(&password);
                target.must_change_password = true;
                Ok::<_, CollaboratorError>((
                    target.id.clone(),
                    target.name.clone(),
                    target.email.clone(),
                ))
            })
            .await?;

        info!(id = %id, "Temporary password issued");
        self.desk.publish(DeskEvent::PasswordReset { id });

        let mailto = mailto_link(&address, &name, &password);
        Ok(TempPassword {
            name,
            email: address,
            password,
            mailto,
        })
    }

    async fn update_profile(
        &self,
        session: &mut Session,
        id: &CollaboratorId,
        update: ProfileUpdate,
    ) -> Result<Collaborator, CollaboratorError> {
        require(&update.name, "name")?;
        require(&update.email, "email")?;

        let name = update.name.trim().to_string();
        let email = update.email.trim().to_string();
        let password = update.password.filter(|p| !p.is_empty());

        let updated = self
            .desk
            .transact(|data| {
                let target = existing(data, id)?;
                if target.is_primary_admin()
                    && !target.name_matches(&name)
                    && !self.is_reserved(&name)
                {
                    return Err(CollaboratorError::from(ValidationError::ReservedName));
                }
                ensure_unique(data, &name, &email, Some(id))?;

                let target = data
                    .collaborator_mut(id)
                    .ok_or_else(|| CollaboratorError::UnknownCollaborator(id.clone()))?;
                target.name = name;
                target.email = email;
                if let Some(password) = password {
                    target.password = password;
                }
                Ok::<_, CollaboratorError>(target.clone())
            })
            .await?;

        session.refresh(&updated);
        info!(id = %id, "Profile updated");
        self.desk
            .publish(DeskEvent::ProfileUpdated { id: id.clone() });
        Ok(updated)
    }

    async fn change_own_password(
        &self,
        session: &mut Session,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), CollaboratorError> {
        let id = session
            .current()
            .map(|c| c.id.clone())
            .ok_or(CollaboratorError::NotLoggedIn)?;
        require(new_password, "password")?;
        if new_password != confirmation {
            return Err(ValidationError::PasswordMismatch.into());
        }

        let updated = self
            .desk
            .transact(|data| {
                let target = data
                    .collaborator_mut(&id)
                    .ok_or_else(|| CollaboratorError::UnknownCollaborator(id.clone()))?;
                target.password = new_password.to_string();
                target.must_change_password = false;
                Ok::<_, CollaboratorError>(target.clone())
            })
            .await?;

        session.refresh(&updated);
        info!(id = %id, "Password changed by owner");
        self.desk.publish(DeskEvent::PasswordReset { id });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_password_is_base36_of_requested_length() {
        let password = generate_temp_password(8);
        assert_eq!(password.len(), 8);
        assert!(
            password
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn mailto_link_is_percent_encoded() {
        let link = mailto_link("ana@example.com", "Ana", "abc123");
        assert!(link.starts_with("mailto:ana@example.com?subject="));
        assert!(link.contains("abc123"));
        assert!(!link.contains(' '));
    }
}
