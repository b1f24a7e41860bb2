//! Sonde — client-side drill-down analytics engine for the insurance
//! back-office dashboard.
//!
//! The crate owns the state behind the advanced-filtering view: a
//! composable filter set, a hierarchical drill-down path over the
//! selected data source, the query composition toward the REST analytics
//! backend, and the shaping of returned aggregates into chart-ready
//! series and summary statistics. Rendering and auth stay outside; the
//! backend is reached only through the injected [`api::AnalyticsApi`].
//!
//! Typical wiring:
//!
//! ```no_run
//! use std::sync::Arc;
//! use sonde::api::{HttpAnalyticsApi, StaticToken};
//! use sonde::config::EngineConfig;
//! use sonde::engine::FilterEngine;
//!
//! # async fn example() -> Result<(), sonde::error::EngineError> {
//! let config = EngineConfig::new("http://localhost:3000/api");
//! let api = HttpAnalyticsApi::from_config(&config, Arc::new(StaticToken("jwt".into())))?;
//!
//! let mut engine = FilterEngine::new();
//! engine.refresh(&api).await;
//! engine.load_drill_options(&api).await;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod presenter;
pub mod query;

pub use engine::{ApplyOutcome, FilterEngine, LoadOutcome};
pub use error::EngineError;
pub use models::{
    AggregateRow, AlertBuckets, ChartConfig, ChartType, DataSource, DateRange, DrillDownOption,
    DrillDownPath, Filter, FilterDataType, FilterOperator, FilterSet, SummaryStats,
};
pub use presenter::{Breadcrumb, BreadcrumbTarget, ChartView};
