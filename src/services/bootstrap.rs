//! Load-time invariants: the primary admin exists and is well formed, and no
//! interaction outlives its collaborator.

use crate::config::BootstrapConfig;
use crate::domain::CollaboratorId;
use crate::models::{Collaborator, CollaboratorStatus};
use crate::state::DeskData;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub created: bool,

    pub migrated_from: Option<CollaboratorId>,

    /// The existing primary admin needed its canonical fields restored.
    pub healed: bool,

    pub removed_duplicates: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    pub orphans_removed: usize,

    pub counts_fixed: usize,
}

/// Makes sure exactly one collaborator holds the reserved id and that it is
/// an approved admin with the canonical email.
///
/// When nobody holds the reserved id yet, an account named after the
/// canonical admin (or one of the legacy admin names) is migrated in place;
/// failing that a fresh admin with the default password is created.
pub fn ensure_primary_admin(data: &mut DeskData, cfg: &BootstrapConfig) -> BootstrapOutcome {
    let primary = CollaboratorId::primary_admin();
    let mut outcome = BootstrapOutcome::default();

    let mut seen = false;
    let before = data.collaborators.len();
    data.collaborators.retain(|c| {
        if c.id != primary {
            return true;
        }
        let keep = !seen;
        seen = true;
        keep
    });
    outcome.removed_duplicates += before - data.collaborators.len();

    if let Some(admin) = data.collaborator_mut(&primary) {
        let previous = admin.clone();
        canonicalize(admin, cfg, false);
        outcome.healed = *admin != previous;
        return outcome;
    }

    let candidate = std::iter::once(&cfg.admin_name)
        .chain(cfg.legacy_admin_names.iter())
        .find_map(|name| data.collaborators.iter().position(|c| c.name_matches(name)));

    if let Some(index) = candidate {
        let account = &mut data.collaborators[index];
        let old_id = std::mem::replace(&mut account.id, primary.clone());
        canonicalize(account, cfg, true);

        for interaction in &mut data.interactions {
            if interaction.collaborator_id == old_id {
                interaction.collaborator_id = primary.clone();
            }
        }

        let before = data.collaborators.len();
        data.collaborators
            .retain(|c| c.id == primary || !c.name_matches(&cfg.admin_name));
        outcome.removed_duplicates += before - data.collaborators.len();
        outcome.migrated_from = Some(old_id);
    } else {
        data.collaborators.push(Collaborator {
            id: primary,
            name: cfg.admin_name.clone(),
            email: cfg.admin_email.clone(),
            password: cfg.default_password.clone(),
            is_admin: true,
            status: CollaboratorStatus::Aprovado,
            must_change_password: false,
        });
        outcome.created = true;
    }

    outcome
}

fn canonicalize(admin: &mut Collaborator, cfg: &BootstrapConfig, force_name: bool) {
    if force_name || admin.name.trim().is_empty() {
        admin.name.clone_from(&cfg.admin_name);
    }
    admin.email.clone_from(&cfg.admin_email);
    admin.is_admin = true;
    admin.status = CollaboratorStatus::Aprovado;
}

/// Drops interactions whose collaborator is gone and normalizes the rest.
pub fn sweep(data: &mut DeskData) -> SweepOutcome {
    let mut outcome = SweepOutcome::default();

    let before = data.interactions.len();
    let collaborators = &data.collaborators;
    data.interactions
        .retain(|i| collaborators.iter().any(|c| c.id == i.collaborator_id));
    outcome.orphans_removed = before - data.interactions.len();

    for interaction in &mut data.interactions {
        let previous = interaction.clone();
        interaction.normalize();
        if *interaction != previous {
            outcome.counts_fixed += 1;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InteractionId;
    use crate::models::Interaction;

    fn account(id: &str, name: &str, is_admin: bool) -> Collaborator {
        Collaborator {
            id: CollaboratorId::new(id),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password: "pw".to_string(),
            is_admin,
            status: CollaboratorStatus::Aprovado,
            must_change_password: false,
        }
    }

    fn visit(id: &str, by: &str, count: u32) -> Interaction {
        Interaction {
            id: InteractionId::new(id),
            collaborator_id: CollaboratorId::new(by),
            nationality: "França".to_string(),
            count,
            visit_reason: None,
            length_of_stay: None,
            timestamp: "2024-05-03T10:00:00Z".parse().unwrap(),
            created_at: None,
        }
    }

    #[test]
    fn creates_default_admin_when_nothing_matches() {
        let mut data = DeskData {
            collaborators: vec![account("colab_1", "carlos", false)],
            interactions: vec![],
        };

        let outcome = ensure_primary_admin(&mut data, &BootstrapConfig::default());

        assert!(outcome.created);
        let admin = data.collaborator(&CollaboratorId::primary_admin()).unwrap();
        assert_eq!(admin.name, "admin");
        assert_eq!(admin.password, "admin");
        assert!(admin.is_admin);
        assert!(admin.is_approved());
    }

    #[test]
    fn migrates_legacy_admin_and_repoints_its_interactions() {
        let mut data = DeskData {
            collaborators: vec![
                account("colab_old", "vitor.afonso", false),
                account("colab_2", "ana", false),
            ],
            interactions: vec![visit("int_1", "colab_old", 2)],
        };

        let outcome = ensure_primary_admin(&mut data, &BootstrapConfig::default());

        assert_eq!(outcome.migrated_from, Some(CollaboratorId::new("colab_old")));
        let admin = data.collaborator(&CollaboratorId::primary_admin()).unwrap();
        assert_eq!(admin.name, "admin");
        assert_eq!(admin.email, "braga.turismo.2024@gmail.com");
        assert!(admin.is_admin);
        assert_eq!(admin.password, "pw");
        assert!(data.interactions[0].collaborator_id.is_primary_admin());
    }

    #[test]
    fn migrating_removes_other_accounts_with_the_canonical_name() {
        let mut data = DeskData {
            collaborators: vec![
                account("colab_admin_default", "admin", true),
                account("colab_dup", "ADMIN", false),
            ],
            interactions: vec![],
        };

        let outcome = ensure_primary_admin(&mut data, &BootstrapConfig::default());

        assert_eq!(outcome.removed_duplicates, 1);
        assert_eq!(data.collaborators.len(), 1);
        assert!(data.collaborators[0].is_primary_admin());
    }

    #[test]
    fn heals_existing_primary_admin_but_keeps_its_name() {
        let mut broken = account("primary_admin_account", "Chefe", false);
        broken.status = CollaboratorStatus::Pendente;
        broken.email = "wrong@example.com".to_string();
        let mut data = DeskData {
            collaborators: vec![broken],
            interactions: vec![],
        };

        let outcome = ensure_primary_admin(&mut data, &BootstrapConfig::default());

        assert!(outcome.healed);
        let admin = &data.collaborators[0];
        assert_eq!(admin.name, "Chefe");
        assert_eq!(admin.email, "braga.turismo.2024@gmail.com");
        assert!(admin.is_admin);
        assert!(admin.is_approved());
    }

    #[test]
    fn keeps_a_single_record_with_the_reserved_id() {
        let mut data = DeskData {
            collaborators: vec![
                account("primary_admin_account", "admin", true),
                account("primary_admin_account", "copy", true),
            ],
            interactions: vec![],
        };

        ensure_primary_admin(&mut data, &BootstrapConfig::default());

        let holders = data
            .collaborators
            .iter()
            .filter(|c| c.is_primary_admin())
            .count();
        assert_eq!(holders, 1);
        assert_eq!(data.collaborators[0].name, "admin");
    }

    #[test]
    fn sweep_removes_orphans_and_fixes_counts() {
        let mut data = DeskData {
            collaborators: vec![account("colab_1", "carlos", false)],
            interactions: vec![visit("int_1", "colab_1", 0), visit("int_2", "colab_gone", 3)],
        };

        let outcome = sweep(&mut data);

        assert_eq!(outcome.orphans_removed, 1);
        assert_eq!(outcome.counts_fixed, 1);
        assert_eq!(data.interactions.len(), 1);
        assert_eq!(data.interactions[0].count, 1);
    }
}
