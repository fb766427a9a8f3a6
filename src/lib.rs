pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod state;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use app::AppState;
use cli::commands::{
    cmd_analysis, cmd_export_analysis, cmd_export_collaborators, cmd_export_report,
    cmd_forgot_password, cmd_init, cmd_interaction_edit, cmd_interaction_remove,
    cmd_interactions_clear, cmd_interactions_list, cmd_interactions_reset, cmd_log, cmd_passwd,
    cmd_reference, cmd_register, cmd_report, cmd_user_approve, cmd_user_delete, cmd_user_reject,
    cmd_user_reset_password, cmd_user_toggle_admin, cmd_user_update, cmd_users_list,
};
use cli::{
    Cli, Commands, ExportCommands, InteractionCommands, UserCommands, open_password_change,
    open_view,
};
pub use config::Config;
use domain::View;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    let cli = Cli::parse();
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if matches!(command, Commands::Init) {
        return cmd_init(config).await;
    }
    if let Commands::Reference { list } = command {
        cmd_reference(*list);
        return Ok(());
    }

    let app = AppState::open(config).await?;

    match command {
        Commands::Init | Commands::Reference { .. } => Ok(()),

        Commands::Register {
            name,
            email,
            password,
            confirm,
        } => cmd_register(&app, name, email, password, confirm.as_deref()).await,

        Commands::ForgotPassword { email } => cmd_forgot_password(&app, email).await,

        Commands::Passwd { new, confirm } => {
            let session = open_password_change(&app, &cli).await?;
            cmd_passwd(&app, session, new, confirm).await
        }

        Commands::Log {
            nationality,
            count,
            reason,
            stay,
        } => {
            let session = open_view(&app, &cli, View::Dashboard).await?;
            cmd_log(
                &app,
                &session,
                nationality,
                *count,
                reason.as_deref(),
                stay.as_deref(),
            )
            .await
        }

        Commands::Interactions { command } => match command {
            InteractionCommands::List { page } => {
                let session = open_view(&app, &cli, View::Dashboard).await?;
                cmd_interactions_list(&app, &session, *page).await
            }
            InteractionCommands::Remove { id } => {
                let session = open_view(&app, &cli, View::Dashboard).await?;
                cmd_interaction_remove(&app, &session, id).await
            }
            InteractionCommands::Edit {
                id,
                nationality,
                count,
                reason,
                stay,
                timestamp,
            } => {
                open_view(&app, &cli, View::Admin).await?;
                cmd_interaction_edit(
                    &app,
                    id,
                    nationality.clone(),
                    *count,
                    reason.clone(),
                    stay.clone(),
                    *timestamp,
                )
                .await
            }
            InteractionCommands::Reset { collaborator_id } => {
                open_view(&app, &cli, View::Admin).await?;
                cmd_interactions_reset(&app, collaborator_id).await
            }
            InteractionCommands::Clear { yes } => {
                open_view(&app, &cli, View::Admin).await?;
                cmd_interactions_clear(&app, *yes).await
            }
        },

        Commands::Users { command } => {
            let session = open_view(&app, &cli, View::Admin).await?;
            match command {
                UserCommands::List => cmd_users_list(&app).await,
                UserCommands::Approve { id } => cmd_user_approve(&app, id).await,
                UserCommands::Reject { id } => cmd_user_reject(&app, id).await,
                UserCommands::Delete { id } => cmd_user_delete(&app, id).await,
                UserCommands::ToggleAdmin { id } => cmd_user_toggle_admin(&app, id).await,
                UserCommands::ResetPassword { id, new_password } => {
                    cmd_user_reset_password(&app, &session, id, new_password).await
                }
                UserCommands::Update {
                    id,
                    name,
                    email,
                    password,
                } => cmd_user_update(&app, session, id, name, email, password.as_deref()).await,
            }
        }

        Commands::Report(args) => {
            let session = open_view(&app, &cli, View::Reports).await?;
            cmd_report(&app, &session, &args.request()).await
        }

        Commands::Analysis(args) => {
            let session = open_view(&app, &cli, View::Analysis).await?;
            cmd_analysis(&app, &session, &args.filters(), args.sort()).await
        }

        Commands::Export { command } => match command {
            ExportCommands::Report { args, format } => {
                let session = open_view(&app, &cli, View::Reports).await?;
                cmd_export_report(&app, &session, &args.request(), (*format).into()).await
            }
            ExportCommands::Analysis { args, format } => {
                let session = open_view(&app, &cli, View::Analysis).await?;
                cmd_export_analysis(
                    &app,
                    &session,
                    &args.filters(),
                    args.sort(),
                    (*format).into(),
                )
                .await
            }
            ExportCommands::Collaborators => {
                let session = open_view(&app, &cli, View::Admin).await?;
                cmd_export_collaborators(&app, &session).await
            }
        },
    }
}

fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
