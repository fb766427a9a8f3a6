//! Reporting and aggregation engine.
//!
//! Everything here is a pure function of the interaction collection and the
//! requested filters: nothing is cached and nothing is written. Empty input
//! yields empty tables and zeroed KPIs.

pub mod analysis;
pub mod filter;
pub mod grouping;
pub mod kpi;
pub mod matrix;
pub mod pagination;
pub mod period;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::config::ReportsConfig;
use crate::constants::labels::ALL_COLLABORATORS;
use crate::models::{Collaborator, Interaction};

pub use analysis::{AnalysisFilters, AnalysisRow, Sort, SortDirection, SortKey, analyse};
pub use filter::{CollaboratorFilter, filter_interactions};
pub use grouping::{GroupRow, MapPoint, TrendPoint};
pub use kpi::Kpis;
pub use matrix::NationalityMatrix;
pub use pagination::{Page, paginate};
pub use period::{DateWindow, Granularity, ReportPeriod};

/// Limits applied when building a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub page_size: usize,
    pub top_groups: usize,
    pub pie_slices: usize,
    pub trend_buckets: usize,
    pub map_top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&ReportsConfig::default())
    }
}

impl From<&ReportsConfig> for ReportOptions {
    fn from(cfg: &ReportsConfig) -> Self {
        Self {
            page_size: cfg.page_size,
            top_groups: cfg.top_groups,
            pie_slices: cfg.pie_slices,
            trend_buckets: cfg.trend_buckets,
            map_top: cfg.map_top,
        }
    }
}

/// What the viewer asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub period: ReportPeriod,
    pub collaborator: CollaboratorFilter,
    /// 1-indexed detail page.
    pub page: usize,
}

impl Default for ReportRequest {
    fn default() -> Self {
        Self {
            period: ReportPeriod::default(),
            collaborator: CollaboratorFilter::All,
            page: 1,
        }
    }
}

/// Everything the reports view shows for one period and collaborator scope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub period: ReportPeriod,
    pub period_label: String,
    pub window: DateWindow,
    pub collaborator: CollaboratorFilter,
    pub collaborator_label: String,
    pub kpis: Kpis,
    pub nationalities: Vec<GroupRow>,
    pub visit_reasons: Vec<GroupRow>,
    pub lengths_of_stay: Vec<GroupRow>,
    pub pie: Vec<GroupRow>,
    pub trend: Vec<TrendPoint>,
    pub map: Vec<MapPoint>,
    /// Newest-first detail rows for the requested page.
    pub records: Page<Interaction>,
}

impl Report {
    /// Builds the report as `viewer` sees it. Non-admin viewers are scoped
    /// to their own records.
    #[must_use]
    pub fn build<Tz: TimeZone>(
        interactions: &[Interaction],
        collaborators: &[Collaborator],
        viewer: &Collaborator,
        request: &ReportRequest,
        now: &DateTime<Tz>,
        options: ReportOptions,
    ) -> Self {
        let tz = now.timezone();
        let period = request.period;
        let window = period.window(now);
        let filter = request.collaborator.clone().for_viewer(viewer);
        let selected = filter_interactions(interactions, &window, &filter);

        let nationalities = grouping::by_nationality(&selected);
        let kpis = Kpis::compute(&nationalities, selected.len());
        let visit_reasons = grouping::by_visit_reason(&selected, options.top_groups);
        let lengths_of_stay = grouping::by_length_of_stay(&selected, options.top_groups);
        let pie = grouping::pie(&nationalities, options.pie_slices);
        let map = grouping::map_data(&nationalities, options.map_top);
        let trend = grouping::trend(&selected, period.granularity(), &tz, options.trend_buckets);

        let owned: Vec<Interaction> = selected.into_iter().cloned().collect();
        let records = paginate(&owned, request.page, options.page_size);

        Self {
            period,
            period_label: period.label(),
            window,
            collaborator_label: collaborator_label(&filter, collaborators),
            collaborator: filter,
            kpis,
            nationalities,
            visit_reasons,
            lengths_of_stay,
            pie,
            trend,
            map,
            records,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kpis.total_interactions == 0
    }
}

/// "Todos" or the selected collaborator's name.
#[must_use]
pub fn collaborator_label(filter: &CollaboratorFilter, collaborators: &[Collaborator]) -> String {
    match filter {
        CollaboratorFilter::All => ALL_COLLABORATORS.to_string(),
        CollaboratorFilter::Only(id) => collaborators
            .iter()
            .find(|c| &c.id == id)
            .map_or_else(|| id.to_string(), |c| c.name.clone()),
    }
}
