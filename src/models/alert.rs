//! SLA alert buckets from `/analytics/alerts` and what the dashboard
//! derives from them: per-record SLA risk entries and, when the backend
//! has no drill-down data at the root, root-level drill-down options.

use serde::{Deserialize, Serialize};

use super::drilldown::DrillDownOption;
use super::enums::SlaLevel;

/// SLA threshold in days applied when a record carries no explicit one.
pub const SLA_THRESHOLD_DAYS: f64 = 5.0;

/// One record inside an alert bucket. The backend sends full entities;
/// only the fields the dashboard reads are decoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "delaiReglement")]
    pub delai_reglement: Option<f64>,
}

/// The three-bucket alert response: records within SLA, at risk, and
/// overdue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertBuckets {
    #[serde(default)]
    pub ok: Vec<AlertRecord>,
    #[serde(default)]
    pub warning: Vec<AlertRecord>,
    #[serde(default)]
    pub critical: Vec<AlertRecord>,
}

impl AlertBuckets {
    pub fn total(&self) -> usize {
        self.ok.len() + self.warning.len() + self.critical.len()
    }

    /// Projects the buckets into root-level drill-down options over the
    /// synthetic `alert_level` dimension. Empty buckets are skipped;
    /// percentages are recomputed from counts.
    pub fn root_options(&self) -> Vec<DrillDownOption> {
        let total = self.total();
        let buckets = [
            ("ok", "Conforme", self.ok.len()),
            ("warning", "En alerte", self.warning.len()),
            ("critical", "Critique", self.critical.len()),
        ];

        buckets
            .into_iter()
            .filter(|(_, _, count)| *count > 0)
            .map(|(value, label, count)| DrillDownOption {
                level: 1,
                dimension: "alert_level".into(),
                value: value.into(),
                label: label.into(),
                count: count as u64,
                percentage: if total > 0 {
                    count as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// Derives per-record SLA risk entries: critical records are red
    /// (risk 1.0), warnings orange (risk 0.7). Records inside SLA carry
    /// no risk entry.
    pub fn sla_risks(&self) -> Vec<SlaRisk> {
        let mut risks = Vec::with_capacity(self.critical.len() + self.warning.len());

        for (index, record) in self.critical.iter().enumerate() {
            risks.push(SlaRisk::from_record(record, index, SlaLevel::Red, 1.0));
        }
        for (index, record) in self.warning.iter().enumerate() {
            risks.push(SlaRisk::from_record(record, index, SlaLevel::Orange, 0.7));
        }

        risks
    }
}

/// One record's position against its SLA deadline.
#[derive(Debug, Clone, Serialize)]
pub struct SlaRisk {
    pub record_id: String,
    pub level: SlaLevel,
    pub risk: f64,
    pub days_since_reception: f64,
    pub sla_threshold: f64,
    pub days_remaining: f64,
}

impl SlaRisk {
    fn from_record(record: &AlertRecord, index: usize, level: SlaLevel, risk: f64) -> Self {
        let days = record.delai_reglement.unwrap_or(0.0);
        let record_id = record
            .id
            .clone()
            .unwrap_or_else(|| format!("{}-{index}", level.as_str()));
        Self {
            record_id,
            level,
            risk,
            days_since_reception: days,
            sla_threshold: SLA_THRESHOLD_DAYS,
            days_remaining: (SLA_THRESHOLD_DAYS - days).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, delai: f64) -> AlertRecord {
        AlertRecord {
            id: Some(id.into()),
            delai_reglement: Some(delai),
        }
    }

    #[test]
    fn root_options_skip_empty_buckets() {
        let buckets = AlertBuckets {
            ok: vec![record("a", 1.0), record("b", 2.0), record("c", 1.0)],
            warning: vec![],
            critical: vec![record("d", 7.0)],
        };
        let options = buckets.root_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "ok");
        assert_eq!(options[0].count, 3);
        assert_eq!(options[1].value, "critical");
        assert!((options[0].percentage - 75.0).abs() < 1e-9);
        assert!((options[1].percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn root_options_all_use_alert_level_dimension() {
        let buckets = AlertBuckets {
            ok: vec![record("a", 1.0)],
            warning: vec![record("b", 4.0)],
            critical: vec![record("c", 9.0)],
        };
        assert!(buckets
            .root_options()
            .iter()
            .all(|o| o.dimension == "alert_level" && o.level == 1));
    }

    #[test]
    fn empty_buckets_no_options() {
        assert!(AlertBuckets::default().root_options().is_empty());
    }

    #[test]
    fn sla_risks_levels_and_remaining_days() {
        let buckets = AlertBuckets {
            ok: vec![record("fine", 1.0)],
            warning: vec![record("w1", 4.0)],
            critical: vec![record("c1", 7.0)],
        };
        let risks = buckets.sla_risks();
        assert_eq!(risks.len(), 2);

        let critical = &risks[0];
        assert_eq!(critical.level, SlaLevel::Red);
        assert_eq!(critical.risk, 1.0);
        assert_eq!(critical.days_remaining, 0.0);

        let warning = &risks[1];
        assert_eq!(warning.level, SlaLevel::Orange);
        assert_eq!(warning.risk, 0.7);
        assert_eq!(warning.days_remaining, 1.0);
    }

    #[test]
    fn sla_risk_synthesizes_missing_ids() {
        let buckets = AlertBuckets {
            critical: vec![AlertRecord::default()],
            ..Default::default()
        };
        let risks = buckets.sla_risks();
        assert_eq!(risks[0].record_id, "red-0");
        assert_eq!(risks[0].days_since_reception, 0.0);
    }

    #[test]
    fn decodes_backend_shape() {
        let json = r#"{"ok":[{"id":"b1","delaiReglement":2,"clientId":"x"}],"critical":[]}"#;
        let buckets: AlertBuckets = serde_json::from_str(json).unwrap();
        assert_eq!(buckets.ok.len(), 1);
        assert_eq!(buckets.ok[0].delai_reglement, Some(2.0));
        assert!(buckets.warning.is_empty());
    }
}
