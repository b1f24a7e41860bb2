//! Drill-down path: the ordered stack of dimension/value selections that
//! progressively narrows the current aggregate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One selectable narrowing of the current aggregate, as returned by the
/// backend drill-down endpoint. Pushed onto the path it becomes a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillDownOption {
    pub level: u32,
    pub dimension: String,
    pub value: String,
    pub label: String,
    pub count: u64,
    pub percentage: f64,
}

/// Prefix-consistent stack of drill-down steps. Only forward pushes and
/// backward jumps (truncation) exist; no lateral transitions.
#[derive(Debug, Clone, Default)]
pub struct DrillDownPath {
    steps: Vec<DrillDownOption>,
}

impl DrillDownPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, option: DrillDownOption) {
        self.steps.push(option);
    }

    /// Truncates to `[0..=index]` inclusive. Out-of-range indices keep the
    /// path as is.
    pub fn truncate_to(&mut self, index: usize) {
        if index + 1 <= self.steps.len() {
            self.steps.truncate(index + 1);
        }
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[DrillDownOption] {
        &self.steps
    }

    pub fn last(&self) -> Option<&DrillDownOption> {
        self.steps.last()
    }

    /// Set of dimensions currently on the path. Used to decide which
    /// filters were auto-generated by drilling.
    pub fn dimensions(&self) -> HashSet<&str> {
        self.steps.iter().map(|s| s.dimension.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(dimension: &str, value: &str) -> DrillDownOption {
        DrillDownOption {
            level: 1,
            dimension: dimension.into(),
            value: value.into(),
            label: value.into(),
            count: 10,
            percentage: 100.0,
        }
    }

    #[test]
    fn push_and_depth() {
        let mut path = DrillDownPath::new();
        assert!(path.is_empty());
        path.push(option("statut", "TRAITE"));
        path.push(option("priorite", "HIGH"));
        assert_eq!(path.depth(), 2);
        assert_eq!(path.last().unwrap().dimension, "priorite");
    }

    #[test]
    fn truncate_keeps_prefix() {
        let mut path = DrillDownPath::new();
        path.push(option("statut", "TRAITE"));
        path.push(option("priorite", "HIGH"));
        path.push(option("clientId", "client_1"));
        path.truncate_to(0);
        assert_eq!(path.depth(), 1);
        assert_eq!(path.steps()[0].dimension, "statut");
    }

    #[test]
    fn truncate_out_of_range_is_noop() {
        let mut path = DrillDownPath::new();
        path.push(option("statut", "TRAITE"));
        path.truncate_to(5);
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn dimensions_set() {
        let mut path = DrillDownPath::new();
        path.push(option("statut", "TRAITE"));
        path.push(option("priorite", "HIGH"));
        let dims = path.dimensions();
        assert!(dims.contains("statut"));
        assert!(dims.contains("priorite"));
        assert!(!dims.contains("clientId"));
    }

    #[test]
    fn option_wire_round_trip() {
        let json = r#"{"level":1,"dimension":"statut","value":"TRAITE","label":"Traité","count":245,"percentage":45.2}"#;
        let opt: DrillDownOption = serde_json::from_str(json).unwrap();
        assert_eq!(opt.count, 245);
        let back = serde_json::to_value(&opt).unwrap();
        assert_eq!(back["dimension"], "statut");
        assert_eq!(back["percentage"], 45.2);
    }
}
