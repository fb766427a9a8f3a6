//! Detailed, filterable and sortable record listing.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use crate::constants::labels::NOT_AVAILABLE;
use crate::domain::{CollaboratorId, InteractionId};
use crate::models::{Collaborator, Interaction};
use crate::reports::filter::CollaboratorFilter;
use crate::reports::period::DateWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Count,
    Nationality,
    VisitReason,
    LengthOfStay,
    #[default]
    Timestamp,
    CollaboratorName,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "count" => Ok(Self::Count),
            "nationality" => Ok(Self::Nationality),
            "visitreason" | "reason" => Ok(Self::VisitReason),
            "lengthofstay" | "stay" => Ok(Self::LengthOfStay),
            "timestamp" | "date" => Ok(Self::Timestamp),
            "collaboratorname" | "collaborator" => Ok(Self::CollaboratorName),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            key: SortKey::Timestamp,
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisFilters {
    pub collaborator: CollaboratorFilter,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Case-insensitive substring filters; empty matches everything.
    pub nationality: String,
    pub visit_reason: String,
    pub length_of_stay: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRow {
    pub id: InteractionId,
    pub collaborator_id: CollaboratorId,
    pub collaborator_name: String,
    pub nationality: String,
    pub count: u32,
    pub visit_reason: Option<String>,
    pub length_of_stay: Option<String>,
    pub timestamp: DateTime<Utc>,
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty() || haystack.is_some_and(|h| h.to_lowercase().contains(&needle))
}

/// Rows visible to `viewer` under `filters`, sorted by `sort`. Missing
/// values always sort last regardless of direction.
#[must_use]
pub fn analyse<Tz: TimeZone>(
    interactions: &[Interaction],
    collaborators: &[Collaborator],
    viewer: &Collaborator,
    filters: &AnalysisFilters,
    sort: Sort,
    tz: &Tz,
) -> Vec<AnalysisRow> {
    let names: HashMap<&CollaboratorId, &str> = collaborators
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();
    let scope = filters.collaborator.clone().for_viewer(viewer);
    let window = DateWindow::between(tz, filters.start, filters.end);

    let mut rows: Vec<AnalysisRow> = interactions
        .iter()
        .filter(|i| !i.collaborator_id.is_primary_admin())
        .filter(|i| scope.matches(&i.collaborator_id))
        .filter(|i| window.contains(&i.timestamp))
        .filter(|i| contains_ci(Some(i.nationality.as_str()), &filters.nationality))
        .filter(|i| contains_ci(i.visit_reason.as_deref(), &filters.visit_reason))
        .filter(|i| contains_ci(i.length_of_stay.as_deref(), &filters.length_of_stay))
        .map(|i| AnalysisRow {
            id: i.id.clone(),
            collaborator_id: i.collaborator_id.clone(),
            collaborator_name: names
                .get(&i.collaborator_id)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |n| (*n).to_string()),
            nationality: i.nationality.clone(),
            count: i.count,
            visit_reason: i.visit_reason.clone(),
            length_of_stay: i.length_of_stay.clone(),
            timestamp: i.timestamp,
        })
        .collect();

    rows.sort_by(|a, b| compare(a, b, sort));
    rows
}

fn compare(a: &AnalysisRow, b: &AnalysisRow, sort: Sort) -> Ordering {
    let text = |x: Option<&str>, y: Option<&str>| match (x, y) {
        (None, None) => None,
        (None, Some(_)) => Some(Err(Ordering::Greater)),
        (Some(_), None) => Some(Err(Ordering::Less)),
        (Some(x), Some(y)) => Some(Ok(x.to_lowercase().cmp(&y.to_lowercase()))),
    };

    let ordering = match sort.key {
        SortKey::Count => Some(Ok(a.count.cmp(&b.count))),
        SortKey::Timestamp => Some(Ok(a.timestamp.cmp(&b.timestamp))),
        SortKey::Nationality => text(Some(a.nationality.as_str()), Some(b.nationality.as_str())),
        SortKey::CollaboratorName => text(
            Some(a.collaborator_name.as_str()),
            Some(b.collaborator_name.as_str()),
        ),
        SortKey::VisitReason => text(a.visit_reason.as_deref(), b.visit_reason.as_deref()),
        SortKey::LengthOfStay => text(a.length_of_stay.as_deref(), b.length_of_stay.as_deref()),
    };

    match ordering {
        None => Ordering::Equal,
        // Missing values are placed last in either direction.
        Some(Err(fixed)) => fixed,
        Some(Ok(ordering)) => match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        },
    }
}
