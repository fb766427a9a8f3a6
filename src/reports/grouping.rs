//! Grouping primitives. Every group sums visitor counts, not rows.

use chrono::{Datelike, NaiveDate, TimeZone};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::labels::{MONTHS, OTHERS};
use crate::constants::nationalities::country_code;
use crate::models::Interaction;
use crate::reports::period::Granularity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRow {
    pub label: String,
    pub visitors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub visitors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapPoint {
    /// ISO 3166-1 alpha-2.
    pub code: &'static str,
    pub visitors: u64,
}

/// Sums by `key` and sorts by descending total. Ties keep first-seen order.
fn sum_by<F>(interactions: &[&Interaction], key: F) -> Vec<GroupRow>
where
    F: Fn(&Interaction) -> Option<String>,
{
    let mut totals: IndexMap<String, u64> = IndexMap::new();
    for interaction in interactions {
        if let Some(label) = key(interaction) {
            *totals.entry(label).or_default() += u64::from(interaction.count.max(1));
        }
    }

    let mut rows: Vec<GroupRow> = totals
        .into_iter()
        .map(|(label, visitors)| GroupRow { label, visitors })
        .collect();
    rows.sort_by(|a, b| b.visitors.cmp(&a.visitors));
    rows
}

/// Trimmed, first letter upper case, the rest lower case. Blank is `None`.
#[must_use]
pub fn normalize_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect())
}

#[must_use]
pub fn by_nationality(interactions: &[&Interaction]) -> Vec<GroupRow> {
    sum_by(interactions, |i| Some(i.nationality.clone()))
}

#[must_use]
pub fn by_visit_reason(interactions: &[&Interaction], limit: usize) -> Vec<GroupRow> {
    let mut rows = sum_by(interactions, |i| {
        i.visit_reason.as_deref().and_then(normalize_label)
    });
    rows.truncate(limit);
    rows
}

#[must_use]
pub fn by_length_of_stay(interactions: &[&Interaction], limit: usize) -> Vec<GroupRow> {
    let mut rows = sum_by(interactions, |i| {
        i.length_of_stay.as_deref().and_then(normalize_label)
    });
    rows.truncate(limit);
    rows
}

/// Keeps the first `slices` groups and folds the rest into "Outros" when
/// that remainder is non-zero.
#[must_use]
pub fn pie(nationalities: &[GroupRow], slices: usize) -> Vec<GroupRow> {
    let split = slices.min(nationalities.len());
    let (top, rest) = nationalities.split_at(split);

    let mut rows = top.to_vec();
    let others: u64 = rest.iter().map(|r| r.visitors).sum();
    if others > 0 {
        rows.push(GroupRow {
            label: OTHERS.to_string(),
            visitors: others,
        });
    }
    rows
}

/// Top `top` nationalities with a known country code.
#[must_use]
pub fn map_data(nationalities: &[GroupRow], top: usize) -> Vec<MapPoint> {
    nationalities
        .iter()
        .take(top)
        .filter_map(|row| {
            country_code(&row.label).map(|code| MapPoint {
                code,
                visitors: row.visitors,
            })
        })
        .collect()
}

/// Visitors per local day or month in chronological order, keeping only
/// the most recent `buckets`.
#[must_use]
pub fn trend<Tz: TimeZone>(
    interactions: &[&Interaction],
    granularity: Granularity,
    tz: &Tz,
    buckets: usize,
) -> Vec<TrendPoint> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for interaction in interactions {
        let day = interaction.timestamp.with_timezone(tz).date_naive();
        let key = match granularity {
            Granularity::Day => day,
            Granularity::Month => day.with_day(1).unwrap_or(day),
        };
        *totals.entry(key).or_default() += u64::from(interaction.count.max(1));
    }

    let skip = totals.len().saturating_sub(buckets);
    totals
        .into_iter()
        .skip(skip)
        .map(|(date, visitors)| TrendPoint {
            label: bucket_label(date, granularity),
            visitors,
        })
        .collect()
}

fn bucket_label(date: NaiveDate, granularity: Granularity) -> String {
    let month = MONTHS[date.month0() as usize];
    match granularity {
        Granularity::Day => format!("{:02} {month}", date.day()),
        Granularity::Month => format!("{month} {:02}", date.year() % 100),
    }
}
