pub mod alert;
pub mod chart;
pub mod drilldown;
pub mod enums;
pub mod filter;
pub mod kpi;

pub use alert::{AlertBuckets, AlertRecord, SlaRisk};
pub use chart::{AggregateRow, ChartConfig, ChartDimension, ChartMetric, DateRange};
pub use drilldown::{DrillDownOption, DrillDownPath};
pub use enums::{ChartType, DataSource, FilterDataType, FilterOperator, SlaLevel};
pub use filter::{Filter, FilterOrigin, FilterSet};
pub use kpi::{DailyKpis, RealTimeKpis, SummaryStats};
