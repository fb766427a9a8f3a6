//! Collaborator administration command handlers

use crate::app::AppState;
use crate::domain::CollaboratorId;
use crate::models::CollaboratorStatus;
use crate::services::ProfileUpdate;
use crate::session::Session;

pub async fn cmd_users_list(app: &AppState) -> anyhow::Result<()> {
    let collaborators = app.collaborators.list().await;
    let pending = collaborators
        .iter()
        .filter(|c| c.status == CollaboratorStatus::Pendente)
        .count();

    println!(
        "Collaborators ({} total, {} pending)",
        collaborators.len(),
        pending
    );
    println!("{:-<70}", "");

    for collaborator in &collaborators {
        let marker = match (collaborator.is_primary_admin(), collaborator.is_admin) {
            (true, _) => "★",
            (false, true) => "●",
            (false, false) => "•",
        };

        println!(
            "{} {} <{}> [{}]",
            marker,
            collaborator.name,
            collaborator.email,
            collaborator.status.as_str()
        );
        println!("  ID: {}", collaborator.id);
    }

    println!();
    println!("Legend: ★ Primary admin | ● Admin | • Collaborator");
    Ok(())
}

pub async fn cmd_user_approve(app: &AppState, id: &str) -> anyhow::Result<()> {
    if app.collaborators.approve(&CollaboratorId::new(id)).await? {
        println!("✓ Approved {id}");
    } else {
        println!("No collaborator with ID {id}");
    }
    Ok(())
}

pub async fn cmd_user_reject(app: &AppState, id: &str) -> anyhow::Result<()> {
    if app.collaborators.reject(&CollaboratorId::new(id)).await? {
        println!("✓ Rejected {id}");
    } else {
        println!("No pending collaborator with ID {id}");
    }
    Ok(())
}

pub async fn cmd_user_delete(app: &AppState, id: &str) -> anyhow::Result<()> {
    let id = CollaboratorId::new(id);
    let collaborator = app.collaborators.get(&id).await?;
    let removed = app.collaborators.delete(&id).await?;

    println!(
        "✓ Deleted {} and {removed} interaction(s) they logged",
        collaborator.name
    );
    Ok(())
}

pub async fn cmd_user_toggle_admin(app: &AppState, id: &str) -> anyhow::Result<()> {
    let id = CollaboratorId::new(id);
    let is_admin = app.collaborators.toggle_admin(&id).await?;

    if is_admin {
        println!("✓ {id} is now an administrator");
    } else {
        println!("✓ {id} is no longer an administrator");
    }
    Ok(())
}

pub async fn cmd_user_reset_password(
    app: &AppState,
    session: &Session,
    id: &str,
    new_password: &str,
) -> anyhow::Result<()> {
    let id = CollaboratorId::new(id);
    app.collaborators
        .reset_password(session, &id, new_password)
        .await?;

    println!("✓ Password of {id} reset");
    Ok(())
}

pub async fn cmd_user_update(
    app: &AppState,
    mut session: Session,
    id: &str,
    name: &str,
    email: &str,
    password: Option<&str>,
) -> anyhow::Result<()> {
    let updated = app
        .collaborators
        .update_profile(
            &mut session,
            &CollaboratorId::new(id),
            ProfileUpdate {
                name: name.to_string(),
                email: email.to_string(),
                password: password.map(ToString::to_string),
            },
        )
        .await?;

    println!("✓ Updated {} <{}>", updated.name, updated.email);
    Ok(())
}
