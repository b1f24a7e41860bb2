//! Query composition: snapshots of the engine state turned into the
//! request parameters of the analytics endpoints. Filters and the drill
//! path stay typed in here; JSON strings exist only in the produced
//! parameter lists.

use chrono::SecondsFormat;

use crate::error::EngineError;
use crate::models::chart::DateRange;
use crate::models::drilldown::DrillDownOption;
use crate::models::enums::{ChartType, DataSource};
use crate::models::filter::Filter;

/// Snapshot of everything a chart reload depends on, taken at issue time.
/// `sequence` is the monotonically increasing number used to discard
/// stale responses.
#[derive(Debug, Clone)]
pub struct ChartQuery {
    pub data_source: DataSource,
    pub date_range: DateRange,
    pub filters: Vec<Filter>,
    pub chart_type: ChartType,
    pub drill_path: Vec<DrillDownOption>,
    pub sequence: u64,
}

impl ChartQuery {
    /// Path of the filtered-data endpoint for the selected source.
    pub fn endpoint_path(&self) -> String {
        format!("/analytics/{}/filtered", self.data_source.as_str())
    }

    /// Parameters of the filtered-data request. `drillDown` is present
    /// only when the path is non-empty.
    pub fn params(&self) -> Result<Vec<(&'static str, String)>, EngineError> {
        let mut params = vec![
            ("dataSource", self.data_source.as_str().to_string()),
            ("fromDate", rfc3339(&self.date_range, true)),
            ("toDate", rfc3339(&self.date_range, false)),
            ("filters", serde_json::to_string(&self.filters)?),
            ("chartType", self.chart_type.as_str().to_string()),
        ];
        if !self.drill_path.is_empty() {
            params.push(("drillDown", serde_json::to_string(&self.drill_path)?));
        }
        Ok(params)
    }

    /// Parameters of the daily-KPI request: the date range plus the same
    /// filter set.
    pub fn kpi_params(&self) -> Result<Vec<(&'static str, String)>, EngineError> {
        Ok(vec![
            ("fromDate", rfc3339(&self.date_range, true)),
            ("toDate", rfc3339(&self.date_range, false)),
            ("filters", serde_json::to_string(&self.filters)?),
        ])
    }
}

/// Parameters of one drill-down options request.
#[derive(Debug, Clone)]
pub struct DrillDownQuery {
    pub data_source: DataSource,
    pub filters: Vec<Filter>,
    /// Depth the options are requested for: the path length after the
    /// triggering push, 0 at the root.
    pub level: u32,
    /// Dimension/value of the step just drilled into, absent at the root.
    pub parent: Option<(String, String)>,
}

impl DrillDownQuery {
    pub fn params(&self) -> Result<Vec<(&'static str, String)>, EngineError> {
        let mut params = vec![
            ("dataSource", self.data_source.as_str().to_string()),
            ("filters", serde_json::to_string(&self.filters)?),
            ("drillDownLevel", self.level.to_string()),
        ];
        if let Some((dimension, value)) = &self.parent {
            params.push(("parentDimension", dimension.clone()));
            params.push(("parentValue", value.clone()));
        }
        Ok(params)
    }
}

fn rfc3339(range: &DateRange, start: bool) -> String {
    let ts = if start { range.start } else { range.end };
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
