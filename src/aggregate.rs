//! Client-side aggregation fallbacks: grouping raw records by calendar
//! day and resolving the summary statistics shown under the chart.

use std::collections::BTreeMap;

use crate::api::wire::RawRecord;
use crate::models::chart::AggregateRow;
use crate::models::kpi::SummaryStats;

/// Statuses counted as resolved when recomputing the success ratio.
/// These are the terminal states of the three data sources.
const RESOLVED_STATUSES: [&str; 3] = ["TRAITE", "VALIDE", "EXECUTE"];

fn is_resolved(statut: &str) -> bool {
    RESOLVED_STATUSES.contains(&statut)
}

/// Groups ungrouped backend records by day: counts and values are
/// summed, the success ratio is recomputed as resolved/total. Records
/// without a usable date are dropped. Output is sorted by date.
pub fn group_records_by_day(records: &[RawRecord]) -> Vec<AggregateRow> {
    #[derive(Default)]
    struct DayAccumulator {
        count: u64,
        value: f64,
        records: u64,
        resolved: u64,
        has_statut: bool,
        rate_sum: f64,
        rate_count: u64,
    }

    let mut days: BTreeMap<String, DayAccumulator> = BTreeMap::new();

    for record in records {
        let Some(day) = record.day_key() else { continue };
        let acc = days.entry(day.to_string()).or_default();
        acc.count += record.count;
        acc.value += record.value;
        acc.records += 1;
        if let Some(statut) = record.statut.as_deref() {
            acc.has_statut = true;
            if is_resolved(statut) {
                acc.resolved += 1;
            }
        }
        if let Some(rate) = record.success_rate {
            acc.rate_sum += rate;
            acc.rate_count += 1;
        }
    }

    days.into_iter()
        .map(|(date, acc)| {
            let success_rate = if acc.has_statut {
                acc.resolved as f64 / acc.records as f64 * 100.0
            } else if acc.rate_count > 0 {
                acc.rate_sum / acc.rate_count as f64
            } else {
                0.0
            };
            AggregateRow {
                date,
                count: acc.count,
                value: acc.value,
                success_rate,
            }
        })
        .collect()
}

/// Three-tier summary resolution: backend-provided stats verbatim, else
/// computed from the chart rows, else all zero. The tiers decide what the
/// user sees when parts of the backend are down, so the order is fixed.
pub fn resolve_summary_stats(
    backend: Option<SummaryStats>,
    rows: &[AggregateRow],
) -> SummaryStats {
    if let Some(stats) = backend {
        return stats;
    }
    if rows.is_empty() {
        return SummaryStats::default();
    }

    let total_elements: u64 = rows.iter().map(|r| r.count).sum();
    let avg_daily = total_elements as f64 / rows.len() as f64;
    let max_daily = rows.iter().map(|r| r.count).max().unwrap_or(0);
    let success_rate = rows.iter().map(|r| r.success_rate).sum::<f64>() / rows.len() as f64;

    SummaryStats {
        total_elements,
        avg_daily,
        max_daily,
        success_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, count: u64, value: f64, statut: Option<&str>) -> RawRecord {
        RawRecord {
            date: Some(date.into()),
            count,
            value,
            success_rate: None,
            statut: statut.map(Into::into),
        }
    }

    #[test]
    fn grouping_merges_same_day() {
        let records = [
            record("2024-01-01", 3, 100.0, Some("TRAITE")),
            record("2024-01-01", 2, 50.0, Some("EN_COURS")),
        ];
        let rows = group_records_by_day(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2024-01-01");
        assert_eq!(rows[0].count, 5);
        assert_eq!(rows[0].value, 150.0);
        assert_eq!(rows[0].success_rate, 50.0);
    }

    #[test]
    fn grouping_sorts_by_date() {
        let records = [
            record("2024-01-03", 1, 0.0, None),
            record("2024-01-01", 1, 0.0, None),
            record("2024-01-02", 1, 0.0, None),
        ];
        let rows = group_records_by_day(&records);
        let dates: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn grouping_drops_dateless_records() {
        let mut dateless = record("x", 1, 0.0, None);
        dateless.date = None;
        let rows = group_records_by_day(&[dateless, record("2024-01-01", 2, 0.0, None)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn grouping_cuts_timestamp_dates() {
        let records = [
            record("2024-01-01T08:00:00.000Z", 1, 10.0, None),
            record("2024-01-01T19:30:00.000Z", 1, 10.0, None),
        ];
        let rows = group_records_by_day(&records);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn grouping_averages_explicit_success_rates() {
        let mut a = record("2024-01-01", 1, 0.0, None);
        a.success_rate = Some(80.0);
        let mut b = record("2024-01-01", 1, 0.0, None);
        b.success_rate = Some(100.0);
        let rows = group_records_by_day(&[a, b]);
        assert_eq!(rows[0].success_rate, 90.0);
    }

    #[test]
    fn resolved_statuses_cover_all_sources() {
        let records = [
            record("2024-01-01", 1, 0.0, Some("VALIDE")),
            record("2024-01-01", 1, 0.0, Some("EXECUTE")),
            record("2024-01-01", 1, 0.0, Some("REJETE")),
            record("2024-01-01", 1, 0.0, Some("NOUVEAU")),
        ];
        let rows = group_records_by_day(&records);
        assert_eq!(rows[0].success_rate, 50.0);
    }

    fn row(count: u64, success_rate: f64) -> AggregateRow {
        AggregateRow {
            date: "2024-01-01".into(),
            count,
            value: 0.0,
            success_rate,
        }
    }

    #[test]
    fn stats_computed_from_rows() {
        let rows = [row(2, 90.0), row(4, 80.0), row(6, 70.0)];
        let stats = resolve_summary_stats(None, &rows);
        assert_eq!(stats.total_elements, 12);
        assert_eq!(stats.avg_daily, 4.0);
        assert_eq!(stats.max_daily, 6);
        assert_eq!(stats.success_rate, 80.0);
    }

    #[test]
    fn stats_prefer_backend_values() {
        let backend = SummaryStats {
            total_elements: 999,
            avg_daily: 9.9,
            max_daily: 99,
            success_rate: 42.0,
        };
        let rows = [row(2, 90.0)];
        let stats = resolve_summary_stats(Some(backend.clone()), &rows);
        assert_eq!(stats, backend);
    }

    #[test]
    fn stats_zero_without_input() {
        let stats = resolve_summary_stats(None, &[]);
        assert_eq!(stats, SummaryStats::default());
    }
}
