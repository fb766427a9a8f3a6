//! `DomainStore` implementation of the `ReportService` trait.

use async_trait::async_trait;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::export::builders::{
    self, ANALYSIS_FILENAME, COLLABORATOR_TOTALS_FILENAME, report_filename,
};
use crate::export::TableExporter;
use crate::models::Collaborator;
use crate::reports::{AnalysisFilters, AnalysisRow, Report, ReportOptions, ReportRequest, Sort};
use crate::services::report_service::{ExportFormat, ReportError, ReportService};
use crate::session::Session;
use crate::state::DomainStore;

pub struct DeskReportService {
    desk: Arc<DomainStore>,
    exporter: Arc<dyn TableExporter>,
    options: ReportOptions,
}

impl DeskReportService {
    #[must_use]
    pub fn new(
        desk: Arc<DomainStore>,
        exporter: Arc<dyn TableExporter>,
        options: ReportOptions,
    ) -> Self {
        Self {
            desk,
            exporter,
            options,
        }
    }

    fn viewer(session: &Session) -> Result<&Collaborator, ReportError> {
        session
            .current()
            .filter(|_| session.is_authenticated())
            .ok_or(ReportError::NotLoggedIn)
    }
}

#[async_trait]
impl ReportService for DeskReportService {
    async fn report(
        &self,
        session: &Session,
        request: &ReportRequest,
    ) -> Result<Report, ReportError> {
        let viewer = Self::viewer(session)?;
        let data = self.desk.snapshot().await;

        Ok(Report::build(
            &data.interactions,
            &data.collaborators,
            viewer,
            request,
            &Local::now(),
            self.options,
        ))
    }

    async fn analysis(
        &self,
        session: &Session,
        filters: &AnalysisFilters,
        sort: Sort,
    ) -> Result<Vec<AnalysisRow>, ReportError> {
        let viewer = Self::viewer(session)?;
        let data = self.desk.snapshot().await;

        Ok(crate::reports::analyse(
            &data.interactions,
            &data.collaborators,
            viewer,
            filters,
            sort,
            &Local,
        ))
    }

    async fn export_report(
        &self,
        session: &Session,
        request: &ReportRequest,
        format: ExportFormat,
    ) -> Result<PathBuf, ReportError> {
        let report = self.report(session, request).await?;
        let filename = report_filename(&report);

        let path = match format {
            ExportFormat::Workbook => {
                let workbook = builders::report_workbook(&report, &Local::now())?;
                self.exporter.export_workbook(&filename, &workbook).await?
            }
            ExportFormat::Document => {
                let document = builders::report_document(&report)?;
                self.exporter.export_document(&filename, &document).await?
            }
        };

        info!(file = %filename, interactions = report.kpis.total_interactions, "Report exported");
        Ok(path)
    }

    async fn export_analysis(
        &self,
        session: &Session,
        filters: &AnalysisFilters,
        sort: Sort,
        format: ExportFormat,
    ) -> Result<PathBuf, ReportError> {
        let rows = self.analysis(session, filters, sort).await?;

        let path = match format {
            ExportFormat::Workbook => {
                let workbook = builders::analysis_workbook(&rows, &Local)?;
                self.exporter
                    .export_workbook(ANALYSIS_FILENAME, &workbook)
                    .await?
            }
            ExportFormat::Document => {
                let document = builders::analysis_document(&rows, &Local)?;
                self.exporter
                    .export_document(ANALYSIS_FILENAME, &document)
                    .await?
            }
        };

        info!(rows = rows.len(), "Analysis exported");
        Ok(path)
    }

    async fn export_collaborator_totals(&self, session: &Session) -> Result<PathBuf, ReportError> {
        Self::viewer(session)?;
        if !session.is_admin() {
            return Err(ReportError::AdminRequired);
        }

        let data = self.desk.snapshot().await;
        let workbook =
            builders::collaborator_totals_workbook(&data.collaborators, &data.interactions, &Local)?;
        let path = self
            .exporter
            .export_workbook(COLLABORATOR_TOTALS_FILENAME, &workbook)
            .await?;

        info!(sheets = workbook.sheets.len(), "Per-collaborator totals exported");
        Ok(path)
    }
}
