//! Domain service for logged visitor interactions.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{CollaboratorId, InteractionId};
use crate::models::Interaction;
use crate::session::Session;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("No collaborator is signed in")]
    NotLoggedIn,

    #[error("Nationality must not be blank")]
    BlankNationality,

    #[error("Interaction not found: {0}")]
    NotFound(InteractionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for InteractionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

/// One visit as entered at the desk. `count` is raw input; anything below
/// one is stored as one.
#[derive(Debug, Clone, Default)]
pub struct NewInteraction {
    pub nationality: String,
    pub count: i64,
    pub visit_reason: Option<String>,
    pub length_of_stay: Option<String>,
}

impl NewInteraction {
    #[must_use]
    pub fn new(nationality: impl Into<String>, count: i64) -> Self {
        Self {
            nationality: nationality.into(),
            count,
            ..Self::default()
        }
    }
}

/// Editable fields of an existing interaction.
#[derive(Debug, Clone)]
pub struct InteractionUpdate {
    pub nationality: String,
    pub count: i64,
    pub visit_reason: Option<String>,
    pub length_of_stay: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<&Interaction> for InteractionUpdate {
    fn from(interaction: &Interaction) -> Self {
        Self {
            nationality: interaction.nationality.clone(),
            count: i64::from(interaction.count),
            visit_reason: interaction.visit_reason.clone(),
            length_of_stay: interaction.length_of_stay.clone(),
            timestamp: interaction.timestamp,
        }
    }
}

#[async_trait::async_trait]
pub trait InteractionService: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Vec<Interaction>;

    async fn get(&self, id: &InteractionId) -> Result<Interaction, InteractionError>;

    /// Logs a visit for the signed-in collaborator, stamped now. The
    /// created record is returned so the caller can offer undo through
    /// [`InteractionService::delete`].
    async fn add(
        &self,
        session: &Session,
        input: NewInteraction,
    ) -> Result<Interaction, InteractionError>;

    /// Replaces the editable fields. `id`, `collaborator_id` and
    /// `created_at` never change.
    async fn update(
        &self,
        id: &InteractionId,
        update: InteractionUpdate,
    ) -> Result<Interaction, InteractionError>;

    async fn delete(&self, id: &InteractionId) -> Result<(), InteractionError>;

    /// Deletes every interaction logged by `collaborator_id` and returns
    /// how many went.
    async fn reset_for_collaborator(
        &self,
        collaborator_id: &CollaboratorId,
    ) -> Result<usize, InteractionError>;

    /// Deletes every interaction.
    async fn clear_all(&self) -> Result<usize, InteractionError>;
}
