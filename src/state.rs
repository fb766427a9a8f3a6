//! The domain store: an in-memory mirror of the two persisted collections.
//!
//! Every mutation goes through [`DomainStore::transact`], which runs the
//! operation on a working copy, writes back only the collections that
//! changed (together, when both did), and only then swaps the copy in. A
//! failed write therefore leaves both memory and storage as they were.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

use crate::config::{BootstrapConfig, Config};
use crate::constants::storage::{COLLABORATORS_KEY, INTERACTIONS_KEY};
use crate::db::{self, KeyValueStore, Store};
use crate::domain::events::DeskEvent;
use crate::domain::{CollaboratorId, InteractionId};
use crate::models::{Collaborator, Interaction};
use crate::services::bootstrap;

const EVENT_BUFFER: usize = 64;

/// Both collections, in storage order. Interactions are kept newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeskData {
    pub collaborators: Vec<Collaborator>,

    pub interactions: Vec<Interaction>,
}

impl DeskData {
    #[must_use]
    pub fn collaborator(&self, id: &CollaboratorId) -> Option<&Collaborator> {
        self.collaborators.iter().find(|c| &c.id == id)
    }

    pub fn collaborator_mut(&mut self, id: &CollaboratorId) -> Option<&mut Collaborator> {
        self.collaborators.iter_mut().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn interaction(&self, id: &InteractionId) -> Option<&Interaction> {
        self.interactions.iter().find(|i| &i.id == id)
    }

    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.collaborators.iter().filter(|c| c.is_admin).count()
    }

    /// Removes every interaction logged by `id`, returning how many went.
    pub fn remove_interactions_of(&mut self, id: &CollaboratorId) -> usize {
        let before = self.interactions.len();
        self.interactions.retain(|i| &i.collaborator_id != id);
        before - self.interactions.len()
    }
}

pub struct DomainStore {
    store: Arc<dyn KeyValueStore>,

    data: Mutex<DeskData>,

    events: broadcast::Sender<DeskEvent>,
}

impl DomainStore {
    /// Opens the configured SQLite store and loads it.
    pub async fn open(config: &Config) -> Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::load(Arc::new(store), &config.bootstrap).await
    }

    /// Reads both collections, re-asserts the load-time invariants and
    /// writes back whatever had to be repaired.
    pub async fn load(store: Arc<dyn KeyValueStore>, bootstrap: &BootstrapConfig) -> Result<Self> {
        let collaborators: Vec<Collaborator> =
            db::get_json_or(store.as_ref(), COLLABORATORS_KEY, Vec::new()).await?;
        let interactions: Vec<Interaction> =
            db::get_json_or(store.as_ref(), INTERACTIONS_KEY, Vec::new()).await?;

        let loaded = DeskData {
            collaborators,
            interactions,
        };
        let mut data = loaded.clone();

        let outcome = bootstrap::ensure_primary_admin(&mut data, bootstrap);
        if outcome.created {
            info!("Primary admin account created");
        }
        if let Some(old_id) = &outcome.migrated_from {
            info!(old_id = %old_id, "Legacy admin account migrated to the reserved id");
        }
        if outcome.removed_duplicates > 0 {
            warn!(
                removed = outcome.removed_duplicates,
                "Removed accounts colliding with the primary admin"
            );
        }

        let sweep = bootstrap::sweep(&mut data);
        if sweep.orphans_removed > 0 {
            warn!(
                removed = sweep.orphans_removed,
                "Removed interactions without a collaborator"
            );
        }
        if sweep.counts_fixed > 0 {
            debug!(fixed = sweep.counts_fixed, "Normalized stored interactions");
        }

        persist_changes(store.as_ref(), &loaded, &data).await?;

        info!(
            collaborators = data.collaborators.len(),
            interactions = data.interactions.len(),
            "Domain store loaded"
        );

        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let this = Self {
            store,
            data: Mutex::new(data),
            events,
        };
        let (collaborators, interactions) = {
            let data = this.data.lock().await;
            (data.collaborators.len(), data.interactions.len())
        };
        this.publish(DeskEvent::Bootstrapped {
            collaborators,
            interactions,
        });

        Ok(this)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DeskEvent> {
        self.events.subscribe()
    }

    pub(crate) fn publish(&self, event: DeskEvent) {
        // No receivers is the normal case for the CLI.
        let _ = self.events.send(event);
    }

    pub async fn snapshot(&self) -> DeskData {
        self.data.lock().await.clone()
    }

    pub async fn collaborators(&self) -> Vec<Collaborator> {
        self.data.lock().await.collaborators.clone()
    }

    pub async fn interactions(&self) -> Vec<Interaction> {
        self.data.lock().await.interactions.clone()
    }

    pub async fn collaborator(&self, id: &CollaboratorId) -> Option<Collaborator> {
        self.data.lock().await.collaborator(id).cloned()
    }

    pub async fn interaction(&self, id: &InteractionId) -> Option<Interaction> {
        self.data.lock().await.interaction(id).cloned()
    }

    /// Runs `op` against a working copy and commits it once persisted.
    ///
    /// Only collections that actually changed are written. If `op` fails
    /// nothing is written and the mirror is untouched.
    pub(crate) async fn transact<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut DeskData) -> Result<T, E> + Send,
        E: From<anyhow::Error>,
    {
        let mut guard = self.data.lock().await;
        let mut draft = guard.clone();

        let value = op(&mut draft)?;

        persist_changes(self.store.as_ref(), &guard, &draft).await?;
        *guard = draft;

        Ok(value)
    }
}

/// Writes the collections that differ between `before` and `after` as one
/// unit, so storage never holds half of an operation.
async fn persist_changes(
    store: &dyn KeyValueStore,
    before: &DeskData,
    after: &DeskData,
) -> Result<()> {
    let mut entries = Vec::with_capacity(2);
    if before.collaborators != after.collaborators {
        entries.push((
            COLLABORATORS_KEY,
            db::to_json(COLLABORATORS_KEY, &after.collaborators)?,
        ));
    }
    if before.interactions != after.interactions {
        entries.push((
            INTERACTIONS_KEY,
            db::to_json(INTERACTIONS_KEY, &after.interactions)?,
        ));
    }

    match entries.as_slice() {
        [] => return Ok(()),
        [(key, value)] => store.set(key, value).await?,
        _ => store.set_many(&entries).await?,
    }

    debug!(
        collaborators = after.collaborators.len(),
        interactions = after.interactions.len(),
        keys = entries.len(),
        "Desk persisted"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn load_on_empty_store_creates_and_persists_primary_admin() {
        let kv = Arc::new(MemoryStore::new());
        let desk = DomainStore::load(kv.clone(), &BootstrapConfig::default())
            .await
            .unwrap();

        let collaborators = desk.collaborators().await;
        assert_eq!(collaborators.len(), 1);
        assert!(collaborators[0].is_primary_admin());

        let stored = kv.get(COLLABORATORS_KEY).await.unwrap().unwrap();
        assert!(stored.contains("primary_admin_account"));
    }

    #[tokio::test]
    async fn failed_operation_leaves_mirror_untouched() {
        let kv = Arc::new(MemoryStore::new());
        let desk = DomainStore::load(kv, &BootstrapConfig::default())
            .await
            .unwrap();
        let before = desk.snapshot().await;

        let result: Result<(), anyhow::Error> = desk
            .transact(|data| {
                data.collaborators.clear();
                Err(anyhow::anyhow!("rejected"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(desk.snapshot().await, before);
    }
}
