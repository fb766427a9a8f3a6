use serde::Serialize;

use crate::constants::labels::NOT_AVAILABLE;
use crate::reports::grouping::GroupRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_visitors: u64,
    pub total_interactions: usize,
    /// Rounded to two decimals; zero when there are no interactions.
    pub average_group_size: f64,
    pub top_nationality: String,
}

impl Kpis {
    /// `nationalities` must already be sorted by descending total.
    #[must_use]
    pub fn compute(nationalities: &[GroupRow], total_interactions: usize) -> Self {
        let total_visitors: u64 = nationalities.iter().map(|r| r.visitors).sum();

        #[allow(clippy::cast_precision_loss)]
        let average_group_size = if total_interactions == 0 {
            0.0
        } else {
            let raw = total_visitors as f64 / total_interactions as f64;
            (raw * 100.0).round() / 100.0
        };

        let top_nationality = nationalities
            .first()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.label.clone());

        Self {
            total_visitors,
            total_interactions,
            average_group_size,
            top_nationality,
        }
    }

    #[must_use]
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average_group_size)
    }
}
