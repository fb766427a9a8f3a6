//! Self-service account command handlers

use crate::app::AppState;
use crate::services::NewCollaborator;
use crate::session::Session;

pub async fn cmd_register(
    app: &AppState,
    name: &str,
    email: &str,
    password: &str,
    confirm: Option<&str>,
) -> anyhow::Result<()> {
    let created = app
        .collaborators
        .register(NewCollaborator {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: confirm.map(ToString::to_string),
        })
        .await?;

    println!("✓ Registered '{}' ({})", created.name, created.id);
    println!("  An administrator has to approve the account before you can sign in.");
    Ok(())
}

pub async fn cmd_forgot_password(app: &AppState, email: &str) -> anyhow::Result<()> {
    let temp = app.collaborators.request_password_reset(email).await?;

    println!("Temporary password for {} <{}>", temp.name, temp.email);
    println!("{:-<70}", "");
    println!("  {}", temp.password);
    println!();
    println!("You will be asked to choose a new password after signing in.");
    println!("Send it by mail: {}", temp.mailto);
    Ok(())
}

pub async fn cmd_passwd(
    app: &AppState,
    mut session: Session,
    new_password: &str,
    confirm: &str,
) -> anyhow::Result<()> {
    app.collaborators
        .change_own_password(&mut session, new_password, confirm)
        .await?;

    println!("✓ Password updated");
    Ok(())
}
