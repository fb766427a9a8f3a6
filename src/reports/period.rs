//! Reporting periods and their resolution into concrete time windows.
//!
//! All calendar arithmetic happens in the caller's time zone; the resulting
//! bounds are UTC instants comparable with stored timestamps.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::constants::limits::DAY_BUCKET_MAX_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Last seven days including today.
    Weekly,
    /// Calendar month to date.
    #[default]
    Monthly,
    /// Calendar quarter to date.
    Quarterly,
    /// Calendar year to date.
    Yearly,
    /// Explicit inclusive days; a missing bound is unbounded.
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl ReportPeriod {
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
            Self::Custom { .. } => "custom",
        }
    }

    /// Human label used in report headers.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Weekly => "Últimos 7 dias".to_string(),
            Self::Monthly => "Este Mês".to_string(),
            Self::Quarterly => "Este Trimestre".to_string(),
            Self::Yearly => "Este Ano".to_string(),
            Self::Custom { start, end } => {
                let fmt = |d: &Option<NaiveDate>| {
                    d.map_or_else(|| "…".to_string(), |d| d.format("%d/%m/%Y").to_string())
                };
                format!("{} - {}", fmt(start), fmt(end))
            }
        }
    }

    /// Resolves the period against `now`.
    #[must_use]
    pub fn window<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateWindow {
        let tz = now.timezone();
        let today = now.date_naive();
        let end_of_today = Some(end_of_day(&tz, today));

        let first_day = match self {
            Self::Custom { start, end } => return DateWindow::between(&tz, *start, *end),
            Self::Weekly => today - TimeDelta::days(6),
            Self::Monthly => today.with_day(1).unwrap_or(today),
            Self::Quarterly => {
                let month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), month, 1).unwrap_or(today)
            }
            Self::Yearly => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };

        DateWindow {
            start: Some(start_of_day(&tz, first_day)),
            end: end_of_today,
        }
    }

    /// Day buckets for short windows, month buckets otherwise.
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Weekly | Self::Monthly => Granularity::Day,
            Self::Quarterly | Self::Yearly => Granularity::Month,
            Self::Custom {
                start: Some(start),
                end: Some(end),
            } if (*end - *start).num_days() <= DAY_BUCKET_MAX_DAYS => Granularity::Day,
            Self::Custom { .. } => Granularity::Month,
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    /// Parses a period name. `custom` starts unbounded on both sides.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            "custom" => Ok(Self::Custom {
                start: None,
                end: None,
            }),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

/// Inclusive `[start, end]`. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateWindow {
    /// Window from whole local days: `start` from midnight, `end` until the
    /// last millisecond of the day.
    pub fn between<Tz: TimeZone>(tz: &Tz, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.map(|d| start_of_day(tz, d)),
            end: end.map(|d| end_of_day(tz, d)),
        }
    }

    #[must_use]
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| *instant >= start)
            && self.end.is_none_or(|end| *instant <= end)
    }
}

fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    local_instant(tz, date.and_time(NaiveTime::MIN))
}

fn end_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let last = date.and_time(NaiveTime::MIN) + TimeDelta::days(1) - TimeDelta::milliseconds(1);
    local_instant(tz, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn weekly_covers_last_seven_days_including_today() {
        let now = at("2024-05-15T10:00:00Z");
        let window = ReportPeriod::Weekly.window(&now);

        assert_eq!(window.start, Some(at("2024-05-09T00:00:00Z")));
        assert_eq!(window.end, Some(at("2024-05-15T23:59:59.999Z")));
        assert!(window.contains(&at("2024-05-15T23:00:00Z")));
        assert!(!window.contains(&at("2024-05-08T23:59:59Z")));
    }

    #[test]
    fn quarterly_starts_at_first_month_of_quarter() {
        let now = at("2024-08-20T10:00:00Z");
        let window = ReportPeriod::Quarterly.window(&now);
        assert_eq!(window.start, Some(at("2024-07-01T00:00:00Z")));
    }

    #[test]
    fn monthly_and_yearly_start_on_calendar_boundaries() {
        let now = at("2024-08-20T10:00:00Z");
        assert_eq!(
            ReportPeriod::Monthly.window(&now).start,
            Some(at("2024-08-01T00:00:00Z"))
        );
        assert_eq!(
            ReportPeriod::Yearly.window(&now).start,
            Some(at("2024-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn custom_bounds_are_inclusive_and_optional() {
        let now = at("2024-08-20T10:00:00Z");
        let day = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

        let window = ReportPeriod::Custom {
            start: Some(day),
            end: None,
        }
        .window(&now);
        assert_eq!(window.start, Some(at("2024-05-03T00:00:00Z")));
        assert_eq!(window.end, None);
        assert!(window.contains(&at("2030-01-01T00:00:00Z")));

        let same_day = ReportPeriod::Custom {
            start: Some(day),
            end: Some(day),
        }
        .window(&now);
        assert!(same_day.contains(&at("2024-05-03T23:59:59Z")));
        assert!(!same_day.contains(&at("2024-05-04T00:00:00Z")));
    }

    #[test]
    fn custom_granularity_switches_after_a_month() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let short = ReportPeriod::Custom {
            start: Some(start),
            end: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let long = ReportPeriod::Custom {
            start: Some(start),
            end: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        assert_eq!(short.granularity(), Granularity::Day);
        assert_eq!(long.granularity(), Granularity::Month);
        assert_eq!(ReportPeriod::Yearly.granularity(), Granularity::Month);
    }

    #[test]
    fn parses_period_names() {
        assert_eq!("Weekly".parse::<ReportPeriod>(), Ok(ReportPeriod::Weekly));
        assert!("daily".parse::<ReportPeriod>().is_err());
    }
}
