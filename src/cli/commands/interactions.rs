//! Interaction command handlers

use anyhow::bail;
use chrono::{DateTime, Utc};

use crate::app::AppState;
use crate::domain::{CollaboratorId, InteractionId};
use crate::reports::paginate;
use crate::services::{InteractionUpdate, NewInteraction};
use crate::session::Session;

use super::local_time;

pub async fn cmd_log(
    app: &AppState,
    session: &Session,
    nationality: &str,
    count: i64,
    reason: Option<&str>,
    stay: Option<&str>,
) -> anyhow::Result<()> {
    let created = app
        .interactions
        .add(
            session,
            NewInteraction {
                nationality: nationality.to_string(),
                count,
                visit_reason: reason.map(ToString::to_string),
                length_of_stay: stay.map(ToString::to_string),
            },
        )
        .await?;

    println!(
        "✓ Logged {} × {} at {}",
        created.count,
        created.nationality,
        local_time(&created.timestamp)
    );
    println!("  Undo with: visitdesk interactions remove {}", created.id);
    Ok(())
}

pub async fn cmd_interactions_list(
    app: &AppState,
    session: &Session,
    page: usize,
) -> anyhow::Result<()> {
    let Some(me) = session.current() else {
        bail!("No collaborator is signed in");
    };

    let mine: Vec<_> = app
        .interactions
        .list()
        .await
        .into_iter()
        .filter(|i| i.collaborator_id == me.id)
        .collect();

    if mine.is_empty() {
        println!("No interactions logged yet.");
        println!();
        println!("Log one with: visitdesk log \"França\" --count 2");
        return Ok(());
    }

    let page = paginate(&mine, page, app.config.reports.page_size);

    println!(
        "Interactions of {} ({} total, page {}/{})",
        me.name, page.total_items, page.number, page.total_pages
    );
    println!("{:-<70}", "");

    for interaction in &page.items {
        println!(
            "{}  {:<24} {:>4}  {}",
            local_time(&interaction.timestamp),
            interaction.nationality,
            interaction.count,
            interaction.visit_reason.as_deref().unwrap_or("-")
        );
        println!("  ID: {}", interaction.id);
    }

    if page.has_next() {
        println!();
        println!("Next page: visitdesk interactions list --page {}", page.number + 1);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_interaction_edit(
    app: &AppState,
    id: &str,
    nationality: Option<String>,
    count: Option<i64>,
    reason: Option<String>,
    stay: Option<String>,
    timestamp: Option<DateTime<Utc>>,
) -> anyhow::Result<()> {
    let id = InteractionId::new(id);
    let current = app.interactions.get(&id).await?;

    let mut update = InteractionUpdate::from(&current);
    if let Some(nationality) = nationality {
        update.nationality = nationality;
    }
    if let Some(count) = count {
        update.count = count;
    }
    if reason.is_some() {
        update.visit_reason = reason;
    }
    if stay.is_some() {
        update.length_of_stay = stay;
    }
    if let Some(timestamp) = timestamp {
        update.timestamp = timestamp;
    }

    let updated = app.interactions.update(&id, update).await?;

    println!(
        "✓ Updated {}: {} × {} at {}",
        updated.id,
        updated.count,
        updated.nationality,
        local_time(&updated.timestamp)
    );
    Ok(())
}

pub async fn cmd_interaction_remove(
    app: &AppState,
    session: &Session,
    id: &str,
) -> anyhow::Result<()> {
    let id = InteractionId::new(id);
    let interaction = app.interactions.get(&id).await?;

    let owns = session
        .current()
        .is_some_and(|me| me.id == interaction.collaborator_id);
    if !owns && !session.is_admin() {
        bail!("Only administrators can remove interactions logged by someone else");
    }

    app.interactions.delete(&id).await?;
    println!(
        "✓ Removed {} × {} ({})",
        interaction.count, interaction.nationality, interaction.id
    );
    Ok(())
}

pub async fn cmd_interactions_reset(app: &AppState, collaborator_id: &str) -> anyhow::Result<()> {
    let id = CollaboratorId::new(collaborator_id);
    let collaborator = app.collaborators.get(&id).await?;
    let removed = app.interactions.reset_for_collaborator(&id).await?;

    println!(
        "✓ Removed {removed} interaction(s) logged by {}",
        collaborator.name
    );
    Ok(())
}

pub async fn cmd_interactions_clear(app: &AppState, yes: bool) -> anyhow::Result<()> {
    if !yes {
        println!("This deletes every logged interaction. Re-run with --yes to confirm.");
        return Ok(());
    }

    let removed = app.interactions.clear_all().await?;
    println!("✓ Removed {removed} interaction(s)");
    Ok(())
}
