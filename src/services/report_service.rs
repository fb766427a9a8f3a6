//! Domain service exposing reports, the analysis listing and exports.

use std::path::PathBuf;
use thiserror::Error;

use crate::export::ExportError;
use crate::reports::{AnalysisFilters, AnalysisRow, Report, ReportRequest, Sort};
use crate::session::Session;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No collaborator is signed in")]
    NotLoggedIn,

    #[error("Administrator rights required")]
    AdminRequired,

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Spreadsheet-shaped output.
    #[default]
    Workbook,
    /// Printable document.
    Document,
}

#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    async fn report(
        &self,
        session: &Session,
        request: &ReportRequest,
    ) -> Result<Report, ReportError>;

    async fn analysis(
        &self,
        session: &Session,
        filters: &AnalysisFilters,
        sort: Sort,
    ) -> Result<Vec<AnalysisRow>, ReportError>;

    /// Exports the report under `relatorio_<period>_<collaborator>`.
    ///
    /// # Errors
    ///
    /// `NothingToExport` when the filtered set is empty.
    async fn export_report(
        &self,
        session: &Session,
        request: &ReportRequest,
        format: ExportFormat,
    ) -> Result<PathBuf, ReportError>;

    async fn export_analysis(
        &self,
        session: &Session,
        filters: &AnalysisFilters,
        sort: Sort,
        format: ExportFormat,
    ) -> Result<PathBuf, ReportError>;

    /// Per-collaborator nationality × month totals. Admin only.
    async fn export_collaborator_totals(&self, session: &Session) -> Result<PathBuf, ReportError>;
}
