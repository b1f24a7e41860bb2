//! The drill-down filter engine: one instance per dashboard view,
//! holding the composable filter set, the drill-down path and the last
//! applied chart state. Mutations come from the UI thread only; fetches
//! are async and stale responses are discarded by sequence number.

use std::collections::HashSet;

use crate::aggregate::{group_records_by_day, resolve_summary_stats};
use crate::api::wire::RawRecord;
use crate::api::AnalyticsApi;
use crate::models::alert::{AlertBuckets, SlaRisk};
use crate::models::chart::{AggregateRow, ChartConfig, DateRange};
use crate::models::drilldown::{DrillDownOption, DrillDownPath};
use crate::models::enums::{ChartType, DataSource, FilterDataType, FilterOperator};
use crate::models::filter::FilterSet;
use crate::models::kpi::{DailyKpis, RealTimeKpis, SummaryStats};
use crate::presenter::{self, Breadcrumb, BreadcrumbTarget, ChartView};
use crate::query::{ChartQuery, DrillDownQuery};

/// Everything one chart reload brought back, stamped with the sequence
/// of the query that produced it. `None` marks an individually failed
/// request.
#[derive(Debug)]
pub struct LoadOutcome {
    pub sequence: u64,
    pub records: Option<Vec<RawRecord>>,
    pub kpis: Option<DailyKpis>,
    pub alerts: Option<AlertBuckets>,
}

/// Whether an outcome made it into the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer query was issued while this one was in flight.
    Stale,
}

pub struct FilterEngine {
    data_source: DataSource,
    date_range: DateRange,
    chart_config: ChartConfig,
    filters: FilterSet,
    path: DrillDownPath,

    chart_data: Vec<AggregateRow>,
    drill_options: Vec<DrillDownOption>,
    alerts: AlertBuckets,
    stats: SummaryStats,
    real_time: RealTimeKpis,

    issued_seq: u64,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// Fresh engine: bordereaux source, daily count line chart, last 30
    /// days, no filters, no path.
    pub fn new() -> Self {
        Self {
            data_source: DataSource::Bordereaux,
            date_range: DateRange::default(),
            chart_config: ChartConfig::default(),
            filters: FilterSet::new(),
            path: DrillDownPath::new(),
            chart_data: Vec::new(),
            drill_options: Vec::new(),
            alerts: AlertBuckets::default(),
            stats: SummaryStats::default(),
            real_time: RealTimeKpis::default(),
            issued_seq: 0,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    pub fn chart_config(&self) -> &ChartConfig {
        &self.chart_config
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn drill_path(&self) -> &DrillDownPath {
        &self.path
    }

    pub fn chart_data(&self) -> &[AggregateRow] {
        &self.chart_data
    }

    pub fn drill_options(&self) -> &[DrillDownOption] {
        &self.drill_options
    }

    pub fn alerts(&self) -> &AlertBuckets {
        &self.alerts
    }

    pub fn summary_stats(&self) -> &SummaryStats {
        &self.stats
    }

    pub fn real_time_kpis(&self) -> &RealTimeKpis {
        &self.real_time
    }

    /// False once the backend answered a depth with zero options: the
    /// current depth is terminal and drill controls are disabled.
    pub fn can_drill(&self) -> bool {
        !self.drill_options.is_empty()
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        presenter::breadcrumbs(&self.path)
    }

    /// Chart data for the configured renderer.
    pub fn chart_view(&self) -> ChartView {
        presenter::chart_view(
            &self.chart_config.chart_type,
            &self.chart_data,
            &self.drill_options,
        )
    }

    pub fn sla_risks(&self) -> Vec<SlaRisk> {
        self.alerts.sla_risks()
    }

    // ── Mutations (each returns true when a re-query is due) ────────────

    /// Appends a manual filter. Empty field or value is rejected and
    /// nothing is queued.
    pub fn add_filter(
        &mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
        data_type: FilterDataType,
    ) -> bool {
        self.filters.add(field, operator, value, data_type).is_some()
    }

    /// Removes a filter by id. Unknown ids change nothing.
    pub fn remove_filter(&mut self, id: uuid::Uuid) -> bool {
        self.filters.remove(id)
    }

    pub fn set_data_source(&mut self, data_source: DataSource) -> bool {
        if self.data_source == data_source {
            return false;
        }
        self.data_source = data_source;
        true
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) -> bool {
        if self.chart_config.chart_type == chart_type {
            return false;
        }
        self.chart_config.chart_type = chart_type;
        true
    }

    pub fn set_date_range(&mut self, range: DateRange) -> bool {
        if self.date_range == range {
            return false;
        }
        self.date_range = range;
        true
    }

    /// Clears the path and removes exactly the filters whose field was a
    /// dimension of the path. Foreign filters survive.
    pub fn reset_to_root(&mut self) -> bool {
        let old_dims: HashSet<String> =
            self.path.dimensions().iter().map(|d| d.to_string()).collect();
        self.path.clear();
        self.filters.retain(|f| !old_dims.contains(&f.field));
        tracing::info!("Drill-down reset to root");
        true
    }

    /// Truncates the path to `[0..=index]`. A filter survives iff its
    /// field is a dimension of the truncated path or never was one of
    /// the full path.
    pub fn reset_to_level(&mut self, index: usize) -> bool {
        let old_dims: HashSet<String> =
            self.path.dimensions().iter().map(|d| d.to_string()).collect();
        self.path.truncate_to(index);
        let new_dims: HashSet<String> =
            self.path.dimensions().iter().map(|d| d.to_string()).collect();
        self.filters
            .retain(|f| new_dims.contains(&f.field) || !old_dims.contains(&f.field));
        tracing::info!(depth = self.path.depth(), "Drill-down truncated");
        true
    }

    /// Applies a breadcrumb click.
    pub fn jump_to(&mut self, target: BreadcrumbTarget) -> bool {
        match target {
            BreadcrumbTarget::Root => self.reset_to_root(),
            BreadcrumbTarget::Level(index) => self.reset_to_level(index),
        }
    }

    // ── Query composition & application ─────────────────────────────────

    /// Snapshots the chart query and issues a new sequence number. Any
    /// outcome fetched for an earlier snapshot is stale from now on.
    pub fn compose_query(&mut self) -> ChartQuery {
        self.issued_seq += 1;
        ChartQuery {
            data_source: self.data_source.clone(),
            date_range: self.date_range.clone(),
            filters: self.filters.as_slice().to_vec(),
            chart_type: self.chart_config.chart_type.clone(),
            drill_path: self.path.steps().to_vec(),
            sequence: self.issued_seq,
        }
    }

    /// Snapshots the drill-down options query for the current depth.
    pub fn compose_drill_query(&self) -> DrillDownQuery {
        DrillDownQuery {
            data_source: self.data_source.clone(),
            filters: self.filters.as_slice().to_vec(),
            level: self.path.depth() as u32,
            parent: self
                .path
                .last()
                .map(|s| (s.dimension.clone(), s.value.clone())),
        }
    }

    /// Runs the three chart requests concurrently. Each failure is
    /// logged and degraded to `None` so the others still land.
    pub async fn fetch(api: &dyn AnalyticsApi, query: &ChartQuery) -> LoadOutcome {
        let (records, kpis, alerts) = tokio::join!(
            api.fetch_filtered(query),
            api.fetch_daily_kpis(query),
            api.fetch_alerts(),
        );

        LoadOutcome {
            sequence: query.sequence,
            records: records
                .map_err(|e| tracing::warn!(error = %e, "Filtered data fetch failed"))
                .ok(),
            kpis: kpis
                .map_err(|e| tracing::warn!(error = %e, "Daily KPI fetch failed"))
                .ok(),
            alerts: alerts
                .map_err(|e| tracing::warn!(error = %e, "Alerts fetch failed"))
                .ok(),
        }
    }

    /// Commits a fetched outcome unless a newer query was issued since.
    pub fn apply(&mut self, outcome: LoadOutcome) -> ApplyOutcome {
        if outcome.sequence != self.issued_seq {
            tracing::debug!(
                sequence = outcome.sequence,
                latest = self.issued_seq,
                "Discarding stale chart response"
            );
            return ApplyOutcome::Stale;
        }

        let LoadOutcome {
            records,
            kpis,
            alerts,
            ..
        } = outcome;

        if records.is_none() && kpis.is_none() && alerts.is_none() {
            self.chart_data.clear();
            self.drill_options.clear();
            self.alerts = AlertBuckets::default();
            self.stats = SummaryStats::default();
            self.real_time = RealTimeKpis::default();
            return ApplyOutcome::Applied;
        }

        // Backend-grouped KPI day buckets win over client-side grouping.
        self.chart_data = kpis
            .as_ref()
            .and_then(DailyKpis::day_rows)
            .unwrap_or_else(|| group_records_by_day(records.as_deref().unwrap_or_default()));

        let backend_stats = kpis.as_ref().and_then(|k| k.real_time_stats.clone());
        self.stats = resolve_summary_stats(backend_stats, &self.chart_data);
        self.real_time = RealTimeKpis::derive(kpis.as_ref(), alerts.as_ref());

        if let Some(alerts) = alerts {
            self.alerts = alerts;
        }

        ApplyOutcome::Applied
    }

    /// Convenience reload: compose, fetch, apply in one call.
    pub async fn refresh(&mut self, api: &dyn AnalyticsApi) -> ApplyOutcome {
        let query = self.compose_query();
        let outcome = Self::fetch(api, &query).await;
        self.apply(outcome)
    }

    /// Reloads the drill-down options for the current depth. A failed
    /// request empties the options and keeps the depth; at the root an
    /// empty answer falls back to projecting the alert buckets.
    pub async fn load_drill_options(&mut self, api: &dyn AnalyticsApi) {
        let query = self.compose_drill_query();
        match api.fetch_drill_down_options(&query).await {
            Ok(options) if options.is_empty() && self.path.is_empty() => {
                self.drill_options = self.alerts.root_options();
            }
            Ok(options) => {
                self.drill_options = options;
            }
            Err(e) => {
                tracing::error!(error = %e, level = query.level, "Drill-down options fetch failed");
                self.drill_options = Vec::new();
            }
        }
    }

    /// Drills into one option: pushes it onto the path, synthesizes the
    /// matching equality filter and requests the next level's options.
    /// The path is never rolled back when that request fails.
    pub async fn drill_into(&mut self, api: &dyn AnalyticsApi, option: DrillDownOption) {
        tracing::info!(
            dimension = %option.dimension,
            value = %option.value,
            depth = self.path.depth() + 1,
            "Drilling down"
        );
        self.filters.add_drill(option.dimension.clone(), option.value.clone());
        self.path.push(option);
        self.load_drill_options(api).await;
    }
}
