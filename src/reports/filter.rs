use serde::Serialize;

use crate::domain::CollaboratorId;
use crate::models::{Collaborator, Interaction};
use crate::reports::period::DateWindow;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum CollaboratorFilter {
    #[default]
    All,
    Only(CollaboratorId),
}

impl CollaboratorFilter {
    /// Non-admin viewers only ever see their own records, whatever they
    /// asked for.
    #[must_use]
    pub fn for_viewer(self, viewer: &Collaborator) -> Self {
        if viewer.is_admin {
            self
        } else {
            Self::Only(viewer.id.clone())
        }
    }

    #[must_use]
    pub fn matches(&self, id: &CollaboratorId) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == id,
        }
    }

    /// `all` or a collaborator id.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(CollaboratorId::new(raw))
        }
    }
}

/// Interactions inside `window` matching `filter`, newest first. The
/// primary admin's own records never take part in reporting.
#[must_use]
pub fn filter_interactions<'a>(
    interactions: &'a [Interaction],
    window: &DateWindow,
    filter: &CollaboratorFilter,
) -> Vec<&'a Interaction> {
    let mut selected: Vec<&Interaction> = interactions
        .iter()
        .filter(|i| !i.collaborator_id.is_primary_admin())
        .filter(|i| filter.matches(&i.collaborator_id))
        .filter(|i| window.contains(&i.timestamp))
        .collect();

    selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InteractionId;
    use crate::models::CollaboratorStatus;

    fn visit(id: &str, by: &str, at: &str) -> Interaction {
        Interaction {
            id: InteractionId::new(id),
            collaborator_id: CollaboratorId::new(by),
            nationality: "Brasil".to_string(),
            count: 1,
            visit_reason: None,
            length_of_stay: None,
            timestamp: at.parse().unwrap(),
            created_at: None,
        }
    }

    #[test]
    fn excludes_primary_admin_and_sorts_newest_first() {
        let interactions = vec![
            visit("a", "colab_1", "2024-05-01T10:00:00Z"),
            visit("b", "primary_admin_account", "2024-05-02T10:00:00Z"),
            visit("c", "colab_1", "2024-05-03T10:00:00Z"),
        ];

        let selected =
            filter_interactions(&interactions, &DateWindow::default(), &CollaboratorFilter::All);

        let ids: Vec<&str> = selected.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn non_admin_is_forced_to_self() {
        let viewer = Collaborator {
            id: CollaboratorId::new("colab_2"),
            name: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "pw".to_string(),
            is_admin: false,
            status: CollaboratorStatus::Aprovado,
            must_change_password: false,
        };

        let filter = CollaboratorFilter::All.for_viewer(&viewer);
        assert_eq!(filter, CollaboratorFilter::Only(CollaboratorId::new("colab_2")));
    }

    #[test]
    fn parses_all_case_insensitively() {
        assert_eq!(CollaboratorFilter::parse("ALL"), CollaboratorFilter::All);
        assert_eq!(
            CollaboratorFilter::parse("colab_9"),
            CollaboratorFilter::Only(CollaboratorId::new("colab_9"))
        );
    }
}
