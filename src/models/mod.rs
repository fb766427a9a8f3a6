pub mod collaborator;
pub mod interaction;

pub use collaborator::{Collaborator, CollaboratorStatus};
pub use interaction::{Interaction, coerce_count, normalize_optional};
