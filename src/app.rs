//! Application state: the domain store and the services built on it.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::export::{FileExporter, TableExporter};
use crate::reports::ReportOptions;
use crate::services::{
    AuthService, CollaboratorService, DeskAuthService, DeskCollaboratorService,
    DeskInteractionService, DeskReportService, InteractionService, ReportService,
};
use crate::session::Session;
use crate::state::DomainStore;

pub struct AppState {
    pub config: Config,
    pub desk: Arc<DomainStore>,
    pub auth: Arc<dyn AuthService>,
    pub collaborators: Arc<dyn CollaboratorService>,
    pub interactions: Arc<dyn InteractionService>,
    pub reports: Arc<dyn ReportService>,
}

impl AppState {
    /// Opens the configured database and writes exports to the configured
    /// directory.
    pub async fn open(config: Config) -> Result<Self> {
        let desk = DomainStore::open(&config)
            .await
            .context("Failed to open the desk database")?;
        let exporter = Arc::new(FileExporter::new(&config.reports.export_dir));
        Ok(Self::assemble(config, Arc::new(desk), exporter))
    }

    /// Builds the state over an arbitrary key-value store and exporter.
    pub async fn with_store(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        exporter: Arc<dyn TableExporter>,
    ) -> Result<Self> {
        let desk = DomainStore::load(store, &config.bootstrap).await?;
        Ok(Self::assemble(config, Arc::new(desk), exporter))
    }

    fn assemble(config: Config, desk: Arc<DomainStore>, exporter: Arc<dyn TableExporter>) -> Self {
        let options = ReportOptions::from(&config.reports);

        Self {
            auth: Arc::new(DeskAuthService::new(desk.clone())),
            collaborators: Arc::new(DeskCollaboratorService::new(
                desk.clone(),
                config.bootstrap.clone(),
                config.security.clone(),
            )),
            interactions: Arc::new(DeskInteractionService::new(desk.clone())),
            reports: Arc::new(DeskReportService::new(desk.clone(), exporter, options)),
            desk,
            config,
        }
    }

    /// Logs in and returns the resulting session.
    pub async fn sign_in(&self, name: &str, password: &str) -> Result<Session> {
        let mut session = Session::new();
        self.auth.login(&mut session, name, password).await?;
        Ok(session)
    }
}
