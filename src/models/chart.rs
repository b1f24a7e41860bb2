//! Chart configuration and the date-keyed aggregate rows fed to charts.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ChartType;
use crate::config::DEFAULT_DATE_WINDOW_DAYS;

/// Query window. Always present; defaults to the last 30 days.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Window ending now and spanning the given number of days back.
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::last_days(DEFAULT_DATE_WINDOW_DAYS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    Time,
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Count,
    Sum,
    Avg,
}

/// Axis the aggregate is grouped on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDimension {
    pub field: String,
    pub label: String,
    pub kind: DimensionKind,
    pub group_by: GroupBy,
}

/// Measured value per dimension bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartMetric {
    pub field: String,
    pub label: String,
    pub aggregation: Aggregation,
}

#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub dimensions: Vec<ChartDimension>,
    pub metrics: Vec<ChartMetric>,
}

impl Default for ChartConfig {
    /// Daily creation-date line chart counting records, the dashboard's
    /// initial view.
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            dimensions: vec![ChartDimension {
                field: "dateCreation".into(),
                label: "Date".into(),
                kind: DimensionKind::Time,
                group_by: GroupBy::Day,
            }],
            metrics: vec![ChartMetric {
                field: "count".into(),
                label: "Nombre".into(),
                aggregation: Aggregation::Count,
            }],
        }
    }
}

/// One date bucket of the presented time series, either taken from
/// backend-grouped KPI data or produced by client-side grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub date: String,
    pub count: u64,
    pub value: f64,
    pub success_rate: f64,
}
