//! Nationality × month table in the fixed export order.
//!
//! Rows follow the curated nationality order and only include nationalities
//! that occur. Anything outside the curated list is folded into a single
//! "Outros" row, and a "Total" footer sums every column.

use chrono::{Datelike, TimeZone};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::labels::{MONTHS, OTHERS, TOTAL};
use crate::constants::nationalities::EXPORT_ORDER;
use crate::models::Interaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based.
    pub month: u32,
}

impl MonthKey {
    #[must_use]
    pub fn label(&self) -> String {
        let index = self.month.saturating_sub(1) as usize;
        let name = MONTHS.get(index).copied().unwrap_or_default();
        format!("{name} {}", self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub label: String,
    /// One cell per month, in `NationalityMatrix::months` order.
    pub cells: Vec<u64>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalityMatrix {
    pub months: Vec<MonthKey>,
    pub rows: Vec<MatrixRow>,
    pub footer: MatrixRow,
}

impl NationalityMatrix {
    #[must_use]
    pub fn build<Tz: TimeZone>(interactions: &[&Interaction], tz: &Tz) -> Self {
        let mut by_month: BTreeMap<MonthKey, IndexMap<&str, u64>> = BTreeMap::new();
        for interaction in interactions {
            let local = interaction.timestamp.with_timezone(tz);
            let key = MonthKey {
                year: local.year(),
                month: local.month(),
            };
            *by_month
                .entry(key)
                .or_default()
                .entry(interaction.nationality.as_str())
                .or_default() += u64::from(interaction.count.max(1));
        }
        let months: Vec<MonthKey> = by_month.keys().copied().collect();

        let row_for = |label: &str, include: &dyn Fn(&str) -> bool| {
            let cells: Vec<u64> = by_month
                .values()
                .map(|counts| {
                    counts
                        .iter()
                        .filter(|&(&nat, _)| include(nat))
                        .map(|(_, n)| n)
                        .sum()
                })
                .collect();
            MatrixRow {
                label: label.to_string(),
                total: cells.iter().sum(),
                cells,
            }
        };

        let present = |nat: &str| by_month.values().any(|counts| counts.contains_key(nat));
        let curated = |nat: &str| EXPORT_ORDER.contains(&nat);

        let mut rows: Vec<MatrixRow> = EXPORT_ORDER
            .iter()
            .copied()
            .filter(|&nat| present(nat))
            .map(|nat| row_for(nat, &|candidate| candidate == nat))
            .collect();

        let has_others = by_month
            .values()
            .flat_map(IndexMap::keys)
            .any(|&nat| !curated(nat));
        if has_others {
            rows.push(row_for(OTHERS, &|nat| !curated(nat)));
        }

        let footer = row_for(TOTAL, &|_| true);

        Self {
            months,
            rows,
            footer,
        }
    }

    #[must_use]
    pub fn header(&self) -> Vec<String> {
        std::iter::once("Nacionalidade".to_string())
            .chain(self.months.iter().map(MonthKey::label))
            .chain(std::iter::once(TOTAL.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CollaboratorId, InteractionId};
    use chrono::Utc;

    fn visit(nationality: &str, count: u32, at: &str) -> Interaction {
        Interaction {
            id: InteractionId::generate(),
            collaborator_id: CollaboratorId::new("colab_1"),
            nationality: nationality.to_string(),
            count,
            visit_reason: None,
            length_of_stay: None,
            timestamp: at.parse().unwrap(),
            created_at: None,
        }
    }

    #[test]
    fn rows_follow_curated_order_with_others_and_total() {
        let data = vec![
            visit("França", 3, "2024-05-10T10:00:00Z"),
            visit("Alemanha", 1, "2024-06-01T10:00:00Z"),
            visit("Atlântida", 2, "2024-05-11T10:00:00Z"),
            visit("Nárnia", 4, "2023-12-11T10:00:00Z"),
            visit("França", 1, "2024-06-11T10:00:00Z"),
        ];
        let refs: Vec<&Interaction> = data.iter().collect();

        let matrix = NationalityMatrix::build(&refs, &Utc);

        assert_eq!(
            matrix.header(),
            vec!["Nacionalidade", "Dez. 2023", "Mai. 2024", "Jun. 2024", "Total"]
        );

        let labels: Vec<&str> = matrix.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Alemanha", "França", "Outros"]);

        assert_eq!(matrix.rows[0].cells, vec![0, 0, 1]);
        assert_eq!(matrix.rows[1].cells, vec![0, 3, 1]);
        assert_eq!(matrix.rows[1].total, 4);
        assert_eq!(matrix.rows[2].cells, vec![4, 2, 0]);

        assert_eq!(matrix.footer.label, "Total");
        assert_eq!(matrix.footer.cells, vec![4, 5, 2]);
        assert_eq!(matrix.footer.total, 11);
    }

    #[test]
    fn no_others_row_when_everything_is_curated() {
        let data = vec![visit("Espanha", 2, "2024-05-10T10:00:00Z")];
        let refs: Vec<&Interaction> = data.iter().collect();

        let matrix = NationalityMatrix::build(&refs, &Utc);
        assert_eq!(matrix.rows.len(), 1);
        assert_eq!(matrix.footer.total, 2);
    }
}
