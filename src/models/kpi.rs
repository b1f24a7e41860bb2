//! Daily KPI response from `/analytics/kpis/daily` and the real-time
//! digest the dashboard header derives from KPIs plus alert buckets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::alert::AlertBuckets;
use super::chart::AggregateRow;

/// Fallback average processing time (days) when the backend omits it.
const DEFAULT_AVG_DELAY_DAYS: f64 = 2.5;

/// Share of today's records assumed processed when the backend gives no
/// figure of its own.
const PROCESSED_RATE: f64 = 0.8;

/// Share of today's records assumed SLA-compliant when the alert response
/// is unavailable.
const COMPLIANT_RATE: f64 = 0.9;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BucketCount {
    #[serde(default)]
    pub id: u64,
}

/// One group-by bucket of the daily KPI query. The backend groups by raw
/// creation timestamp, so several buckets may fall on the same day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayBucket {
    #[serde(default, rename = "createdAt", alias = "date")]
    pub created_at: Option<String>,
    #[serde(default, rename = "_count")]
    pub counts: Option<BucketCount>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl DayBucket {
    pub fn record_count(&self) -> u64 {
        self.counts
            .as_ref()
            .map(|c| c.id)
            .or(self.count)
            .unwrap_or(0)
    }

    /// Calendar-day key of the bucket (`YYYY-MM-DD`).
    pub fn day_key(&self) -> Option<&str> {
        self.created_at
            .as_deref()
            .map(|d| d.split('T').next().unwrap_or(d))
    }
}

/// Backend-precomputed summary statistics. When present this object is
/// used verbatim, ahead of any client-side computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryStats {
    pub total_elements: u64,
    pub avg_daily: f64,
    pub max_daily: u64,
    pub success_rate: f64,
}

/// Decoded `/analytics/kpis/daily` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyKpis {
    #[serde(default, rename = "bsPerDay")]
    pub per_day: Vec<DayBucket>,
    #[serde(default, rename = "totalCount")]
    pub total_count: Option<u64>,
    #[serde(default, rename = "avgDelay")]
    pub avg_delay: Option<f64>,
    #[serde(default, rename = "realTimeStats")]
    pub real_time_stats: Option<SummaryStats>,
}

impl DailyKpis {
    /// Total records across all day buckets.
    pub fn total(&self) -> u64 {
        self.per_day.iter().map(DayBucket::record_count).sum()
    }

    /// Backend-grouped chart rows, merged per calendar day. `None` when
    /// the response carries no day buckets, in which case the caller
    /// groups raw records itself.
    pub fn day_rows(&self) -> Option<Vec<AggregateRow>> {
        if self.per_day.is_empty() {
            return None;
        }

        let mut days: BTreeMap<String, u64> = BTreeMap::new();
        for bucket in &self.per_day {
            let Some(day) = bucket.day_key() else { continue };
            *days.entry(day.to_string()).or_default() += bucket.record_count();
        }

        Some(
            days.into_iter()
                .map(|(date, count)| AggregateRow {
                    date,
                    count,
                    value: 0.0,
                    success_rate: 0.0,
                })
                .collect(),
        )
    }
}

/// Header digest of the real-time dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RealTimeKpis {
    pub total_today: u64,
    pub processed_today: u64,
    pub sla_compliant: u64,
    pub avg_processing_time: f64,
}

impl RealTimeKpis {
    /// Combines the KPI response with the alert buckets. Either input may
    /// be missing; each figure falls back independently.
    pub fn derive(kpis: Option<&DailyKpis>, alerts: Option<&AlertBuckets>) -> Self {
        let total_today = kpis.map(DailyKpis::total).unwrap_or(0);
        let processed_today = (total_today as f64 * PROCESSED_RATE).floor() as u64;
        let sla_compliant = match alerts {
            Some(a) if !a.ok.is_empty() => a.ok.len() as u64,
            _ => (total_today as f64 * COMPLIANT_RATE).floor() as u64,
        };
        let avg_processing_time = kpis
            .and_then(|k| k.avg_delay)
            .unwrap_or(DEFAULT_AVG_DELAY_DAYS);

        Self {
            total_today,
            processed_today,
            sla_compliant,
            avg_processing_time,
        }
    }
}
