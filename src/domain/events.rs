//! Domain events published after every committed mutation.
//!
//! These are the "notify" step of validate → mutate → persist → notify. A
//! front end subscribes to re-render; nobody listening is fine.

use serde::Serialize;

use super::{CollaboratorId, InteractionId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum DeskEvent {
    Bootstrapped {
        collaborators: usize,
        interactions: usize,
    },

    CollaboratorRegistered {
        id: CollaboratorId,
        name: String,
    },
    CollaboratorApproved {
        id: CollaboratorId,
    },
    CollaboratorRejected {
        id: CollaboratorId,
    },
    CollaboratorDeleted {
        id: CollaboratorId,
        removed_interactions: usize,
    },
    AdminToggled {
        id: CollaboratorId,
        is_admin: bool,
    },
    PasswordReset {
        id: CollaboratorId,
    },
    ProfileUpdated {
        id: CollaboratorId,
    },

    InteractionAdded {
        id: InteractionId,
        collaborator_id: CollaboratorId,
        count: u32,
    },
    InteractionUpdated {
        id: InteractionId,
    },
    InteractionDeleted {
        id: InteractionId,
    },
    InteractionsReset {
        collaborator_id: CollaboratorId,
        removed: usize,
    },
    InteractionsCleared {
        removed: usize,
    },
}
