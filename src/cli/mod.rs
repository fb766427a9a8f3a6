//! CLI module - Command-line front end for the tourism desk
//!
//! This module provides a structured CLI using clap for argument parsing.
//! Commands acting on behalf of someone sign in first with the global
//! `--user` / `--login-password` options.

pub mod commands;

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::app::AppState;
use crate::domain::View;
use crate::reports::{AnalysisFilters, CollaboratorFilter, ReportPeriod, ReportRequest, Sort, SortDirection, SortKey};
use crate::services::ExportFormat;
use crate::session::Session;

/// Visitdesk - Tourism desk visitor log
/// Logs visitor interactions and reports on them
#[derive(Parser)]
#[command(name = "visitdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Collaborator name to sign in with
    #[arg(long, short = 'u', global = true, env = "VISITDESK_USER")]
    pub user: Option<String>,

    /// Password to sign in with
    #[arg(
        long = "login-password",
        short = 'p',
        global = true,
        env = "VISITDESK_PASSWORD",
        hide_env_values = true
    )]
    pub login_password: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    Init,

    /// Register a new collaborator account (needs admin approval)
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Issue a temporary password for the account with this email
    ForgotPassword { email: String },

    /// Change your own password
    Passwd {
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },

    /// Log a visitor interaction
    #[command(alias = "add")]
    Log {
        nationality: String,
        /// Number of visitors in the group
        #[arg(long, short = 'n', default_value = "1", allow_negative_numbers = true)]
        count: i64,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        stay: Option<String>,
    },

    /// Manage logged interactions
    #[command(alias = "i")]
    Interactions {
        #[command(subcommand)]
        command: InteractionCommands,
    },

    /// Manage collaborator accounts (admin)
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Show KPIs and grouped tables for a period
    Report(ReportArgs),

    /// Filterable, sortable record listing
    Analysis(AnalysisArgs),

    /// Export reports to files
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },

    /// Print reference lists
    Reference {
        #[arg(value_enum)]
        list: ReferenceList,
    },
}

#[derive(Subcommand)]
pub enum InteractionCommands {
    /// List your interactions, newest first
    #[command(alias = "ls")]
    List {
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Edit an interaction (admin)
    Edit {
        id: String,
        #[arg(long)]
        nationality: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        stay: Option<String>,
        /// RFC 3339 timestamp
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,
    },

    /// Delete one interaction (also undoes a fresh `log`)
    #[command(alias = "rm")]
    Remove { id: String },

    /// Delete every interaction of one collaborator (admin)
    Reset { collaborator_id: String },

    /// Delete every interaction (admin)
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(alias = "ls")]
    List,
    Approve { id: String },
    Reject { id: String },
    Delete { id: String },
    ToggleAdmin { id: String },
    ResetPassword { id: String, new_password: String },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Leave out to keep the current password
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    Report {
        #[command(flatten)]
        args: ReportArgs,
        #[arg(long, value_enum, default_value = "workbook")]
        format: FormatArg,
    },
    Analysis {
        #[command(flatten)]
        args: AnalysisArgs,
        #[arg(long, value_enum, default_value = "workbook")]
        format: FormatArg,
    },
    /// Nationality by month totals, one sheet per collaborator (admin)
    Collaborators,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    #[value(alias = "xlsx")]
    Workbook,
    #[value(alias = "pdf")]
    Document,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Workbook => Self::Workbook,
            FormatArg::Document => Self::Document,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReferenceList {
    Nationalities,
    QuickNationalities,
    ExportOrder,
    Reasons,
    CountryCodes,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    #[arg(long, value_enum, default_value = "monthly")]
    pub period: PeriodArg,
    /// First day (YYYY-MM-DD); implies a custom period
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day (YYYY-MM-DD); implies a custom period
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// `all` or a collaborator id
    #[arg(long, default_value = "all")]
    pub collaborator: String,
    #[arg(long, default_value = "1")]
    pub page: usize,
}

impl ReportArgs {
    #[must_use]
    pub fn request(&self) -> ReportRequest {
        let period = if self.from.is_some() || self.to.is_some() {
            ReportPeriod::Custom {
                start: self.from,
                end: self.to,
            }
        } else {
            match self.period {
                PeriodArg::Weekly => ReportPeriod::Weekly,
                PeriodArg::Monthly => ReportPeriod::Monthly,
                PeriodArg::Quarterly => ReportPeriod::Quarterly,
                PeriodArg::Yearly => ReportPeriod::Yearly,
                PeriodArg::Custom => ReportPeriod::Custom {
                    start: None,
                    end: None,
                },
            }
        };

        ReportRequest {
            period,
            collaborator: CollaboratorFilter::parse(&self.collaborator),
            page: self.page,
        }
    }
}

#[derive(Args, Clone)]
pub struct AnalysisArgs {
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
    #[arg(long, default_value = "all")]
    pub collaborator: String,
    #[arg(long, default_value = "")]
    pub nationality: String,
    #[arg(long, default_value = "")]
    pub reason: String,
    #[arg(long, default_value = "")]
    pub stay: String,
    /// count, nationality, visit-reason, length-of-stay, timestamp or collaborator
    #[arg(long)]
    pub sort: Option<SortKey>,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl AnalysisArgs {
    #[must_use]
    pub fn filters(&self) -> AnalysisFilters {
        AnalysisFilters {
            collaborator: CollaboratorFilter::parse(&self.collaborator),
            start: self.from,
            end: self.to,
            nationality: self.nationality.clone(),
            visit_reason: self.reason.clone(),
            length_of_stay: self.stay.clone(),
        }
    }

    /// Newest first unless a key is given; an explicit key sorts
    /// ascending unless `--desc` is set.
    #[must_use]
    pub fn sort(&self) -> Sort {
        match self.sort {
            None => Sort::default(),
            Some(key) => Sort {
                key,
                direction: if self.desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            },
        }
    }
}

/// Signs in with the global credentials and opens `view`.
///
/// Accounts holding a temporary password are turned away until they set
/// their own with `passwd`.
pub async fn open_view(app: &AppState, cli: &Cli, view: View) -> Result<Session> {
    let mut session = sign_in(app, cli).await?;
    if session.requires_password_change() {
        warn!("Command refused until the temporary password is replaced");
        bail!("You are using a temporary password. Set your own first with: visitdesk passwd");
    }

    if session.navigate(view) != view {
        bail!("Administrator rights required");
    }
    Ok(session)
}

/// Signs in for `passwd`, the one command open to temporary passwords.
pub async fn open_password_change(app: &AppState, cli: &Cli) -> Result<Session> {
    let session = sign_in(app, cli).await?;
    if session.requires_password_change() {
        println!("⚠ You are using a temporary password. Choose your own now.");
    }
    Ok(session)
}

async fn sign_in(app: &AppState, cli: &Cli) -> Result<Session> {
    let (Some(user), Some(password)) = (cli.user.as_deref(), cli.login_password.as_deref()) else {
        bail!(
            "This command needs --user and --login-password (or VISITDESK_USER / VISITDESK_PASSWORD)"
        );
    };

    app.sign_in(user, password).await
}
