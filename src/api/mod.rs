//! Backend boundary of the engine. `AnalyticsApi` is the injected
//! dependency every fetch goes through; `HttpAnalyticsApi` is the
//! production implementation over reqwest. Tests substitute their own
//! implementation instead of a live backend.

mod http;
pub mod wire;

pub use http::{HttpAnalyticsApi, NoAuth, StaticToken, TokenProvider};

use async_trait::async_trait;

use crate::error::EngineError;
use crate::models::alert::AlertBuckets;
use crate::models::drilldown::DrillDownOption;
use crate::models::kpi::DailyKpis;
use crate::query::{ChartQuery, DrillDownQuery};
use wire::RawRecord;

/// One method per consumed analytics endpoint. Errors are returned here;
/// downgrading them to empty panels is the engine's job, not the
/// client's.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// `GET /analytics/{dataSource}/filtered`
    async fn fetch_filtered(&self, query: &ChartQuery) -> Result<Vec<RawRecord>, EngineError>;

    /// `GET /analytics/kpis/daily`
    async fn fetch_daily_kpis(&self, query: &ChartQuery) -> Result<DailyKpis, EngineError>;

    /// `GET /analytics/alerts`
    async fn fetch_alerts(&self) -> Result<AlertBuckets, EngineError>;

    /// `GET /analytics/drill-down`
    async fn fetch_drill_down_options(
        &self,
        query: &DrillDownQuery,
    ) -> Result<Vec<DrillDownOption>, EngineError>;
}
