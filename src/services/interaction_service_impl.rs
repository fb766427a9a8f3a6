//! `DomainStore` implementation of the `InteractionService` trait.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::events::DeskEvent;
use crate::domain::{CollaboratorId, InteractionId};
use crate::models::{Interaction, coerce_count, normalize_optional};
use crate::services::interaction_service::{
    InteractionError, InteractionService, InteractionUpdate, NewInteraction,
};
use crate::session::Session;
use crate::state::DomainStore;

pub struct DeskInteractionService {
    desk: Arc<DomainStore>,
}

impl DeskInteractionService {
    #[must_use]
    pub const fn new(desk: Arc<DomainStore>) -> Self {
        Self { desk }
    }
}

fn nationality(raw: &str) -> Result<String, InteractionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InteractionError::BlankNationality);
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl InteractionService for DeskInteractionService {
    async fn list(&self) -> Vec<Interaction> {
        self.desk.interactions().await
    }

    async fn get(&self, id: &InteractionId) -> Result<Interaction, InteractionError> {
        self.desk
            .interaction(id)
            .await
            .ok_or_else(|| InteractionError::NotFound(id.clone()))
    }

    async fn add(
        &self,
        session: &Session,
        input: NewInteraction,
    ) -> Result<Interaction, InteractionError> {
        let collaborator_id = session
            .current()
            .filter(|_| session.is_authenticated())
            .map(|c| c.id.clone())
            .ok_or(InteractionError::NotLoggedIn)?;

        let now = Utc::now();
        let interaction = Interaction {
            id: InteractionId::generate(),
            collaborator_id,
            nationality: nationality(&input.nationality)?,
            count: coerce_count(input.count),
            visit_reason: normalize_optional(input.visit_reason.as_deref()),
            length_of_stay: normalize_optional(input.length_of_stay.as_deref()),
            timestamp: now,
            created_at: Some(now),
        };

        let created = self
            .desk
            .transact(|data| {
                data.interactions.insert(0, interaction.clone());
                Ok::<_, InteractionError>(interaction)
            })
            .await?;

        info!(
            id = %created.id,
            collaborator_id = %created.collaborator_id,
            nationality = %created.nationality,
            count = created.count,
            "Interaction logged"
        );
        self.desk.publish(DeskEvent::InteractionAdded {
            id: created.id.clone(),
            collaborator_id: created.collaborator_id.clone(),
            count: created.count,
        });
        Ok(created)
    }

    async fn update(
        &self,
        id: &InteractionId,
        update: InteractionUpdate,
    ) -> Result<Interaction, InteractionError> {
        let nationality = nationality(&update.nationality)?;

        let updated = self
            .desk
            .transact(|data| {
                let target = data
                    .interactions
                    .iter_mut()
                    .find(|i| &i.id == id)
                    .ok_or_else(|| InteractionError::NotFound(id.clone()))?;

                target.nationality = nationality;
                target.count = coerce_count(update.count);
                target.visit_reason = normalize_optional(update.visit_reason.as_deref());
                target.length_of_stay = normalize_optional(update.length_of_stay.as_deref());
                target.timestamp = update.timestamp;
                Ok::<_, InteractionError>(target.clone())
            })
            .await?;

        info!(id = %id, count = updated.count, "Interaction updated");
        self.desk
            .publish(DeskEvent::InteractionUpdated { id: id.clone() });
        Ok(updated)
    }

    async fn delete(&self, id: &InteractionId) -> Result<(), InteractionError> {
        self.desk
            .transact(|data| {
                let before = data.interactions.len();
                data.interactions.retain(|i| &i.id != id);
                if data.interactions.len() == before {
                    return Err(InteractionError::NotFound(id.clone()));
                }
                Ok(())
            })
            .await?;

        info!(id = %id, "Interaction deleted");
        self.desk
            .publish(DeskEvent::InteractionDeleted { id: id.clone() });
        Ok(())
    }

    async fn reset_for_collaborator(
        &self,
        collaborator_id: &CollaboratorId,
    ) -> Result<usize, InteractionError> {
        let removed = self
            .desk
            .transact(|data| Ok::<_, InteractionError>(data.remove_interactions_of(collaborator_id)))
            .await?;

        info!(collaborator_id = %collaborator_id, removed, "Interactions reset");
        self.desk.publish(DeskEvent::InteractionsReset {
            collaborator_id: collaborator_id.clone(),
            removed,
        });
        Ok(removed)
    }

    async fn clear_all(&self) -> Result<usize, InteractionError> {
        let removed = self
            .desk
            .transact(|data| {
                let removed = data.interactions.len();
                data.interactions.clear();
                Ok::<_, InteractionError>(removed)
            })
            .await?;

        info!(removed, "All interactions cleared");
        self.desk
            .publish(DeskEvent::InteractionsCleared { removed });
        Ok(removed)
    }
}
