//! Init command handler

use crate::app::AppState;
use crate::config::Config;

pub async fn cmd_init(config: Config) -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("✓ Created config.toml");
    } else {
        println!("config.toml already exists, leaving it untouched");
    }

    let database = config.general.database_path.clone();
    let app = AppState::open(config).await?;
    let collaborators = app.collaborators.list().await;

    println!("✓ Database ready: {database}");
    println!("  {} account(s)", collaborators.len());
    println!();
    println!(
        "Sign in as '{}' and change the default password with: visitdesk passwd",
        app.config.bootstrap.admin_name
    );

    Ok(())
}
