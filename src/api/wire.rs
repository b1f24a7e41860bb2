//! Lenient decode of the analytics backend's JSON responses.

use serde::Deserialize;

/// The filtered-data endpoint answers either a bare array or an object
/// wrapping it under `items`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FilteredResponse {
    Wrapped { items: Vec<RawRecord> },
    Rows(Vec<RawRecord>),
}

impl FilteredResponse {
    pub fn into_rows(self) -> Vec<RawRecord> {
        match self {
            Self::Wrapped { items } => items,
            Self::Rows(rows) => rows,
        }
    }
}

/// One raw backend record before client-side grouping. Records come from
/// three different tables, so every field is optional with a usable
/// default; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default, alias = "createdAt")]
    pub date: Option<String>,
    #[serde(default = "default_count")]
    pub count: u64,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub statut: Option<String>,
}

fn default_count() -> u64 {
    1
}

impl RawRecord {
    /// Calendar-day grouping key (`YYYY-MM-DD`), cut from a date or a
    /// full timestamp.
    pub fn day_key(&self) -> Option<&str> {
        self.date
            .as_deref()
            .map(|d| d.split('T').next().unwrap_or(d))
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bare_array() {
        let json = r#"[{"date":"2024-01-01","count":3,"value":100.0}]"#;
        let rows = serde_json::from_str::<FilteredResponse>(json)
            .unwrap()
            .into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 3);
    }

    #[test]
    fn decodes_items_wrapper() {
        let json = r#"{"items":[{"date":"2024-01-01"},{"date":"2024-01-02"}]}"#;
        let rows = serde_json::from_str::<FilteredResponse>(json)
            .unwrap()
            .into_rows();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn count_defaults_to_one_record() {
        let json = r#"[{"createdAt":"2024-01-01T10:00:00.000Z","statut":"TRAITE","clientId":"c1"}]"#;
        let rows = serde_json::from_str::<FilteredResponse>(json)
            .unwrap()
            .into_rows();
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[0].statut.as_deref(), Some("TRAITE"));
    }

    #[test]
    fn day_key_cuts_timestamps() {
        let record = RawRecord {
            date: Some("2024-01-01T10:00:00.000Z".into()),
            count: 1,
            value: 0.0,
            success_rate: None,
            statut: None,
        };
        assert_eq!(record.day_key(), Some("2024-01-01"));
    }

    #[test]
    fn day_key_none_without_date() {
        let record = RawRecord {
            date: None,
            count: 1,
            value: 0.0,
            success_rate: None,
            statut: None,
        };
        assert!(record.day_key().is_none());
    }
}
