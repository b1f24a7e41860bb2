//! Filter set management: discrete predicates composed into every
//! analytics query, rendered as removable chips in insertion order.

use serde::Serialize;
use uuid::Uuid;

use super::enums::{FilterDataType, FilterOperator};

/// How a filter entered the set. Drill-down filters are removed when the
/// path that produced them is truncated; manual filters never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOrigin {
    Manual,
    DrillDown,
}

/// A single filter predicate. `id` and `origin` are engine-local and never
/// serialized; the wire shape is `{field, operator, value, dataType}`.
#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    #[serde(skip)]
    pub id: Uuid,
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
    #[serde(rename = "dataType")]
    pub data_type: FilterDataType,
    #[serde(skip)]
    pub origin: FilterOrigin,
}

impl Filter {
    /// Chip label as displayed in the active-filter row.
    pub fn chip_label(&self) -> String {
        format!("{} {} {}", self.field, self.operator.as_str(), self.value)
    }
}

/// Ordered collection of active filters. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a manual filter with a fresh id. Rejects (returns `None`)
    /// when `field` or `value` is empty.
    pub fn add(
        &mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
        data_type: FilterDataType,
    ) -> Option<Uuid> {
        self.push(field.into(), operator, value.into(), data_type, FilterOrigin::Manual)
    }

    /// Appends the equality filter synthesized by a drill-down step.
    pub fn add_drill(&mut self, dimension: impl Into<String>, value: impl Into<String>) -> Option<Uuid> {
        self.push(
            dimension.into(),
            FilterOperator::Equals,
            value.into(),
            FilterDataType::String,
            FilterOrigin::DrillDown,
        )
    }

    fn push(
        &mut self,
        field: String,
        operator: FilterOperator,
        value: String,
        data_type: FilterDataType,
        origin: FilterOrigin,
    ) -> Option<Uuid> {
        if field.is_empty() || value.is_empty() {
            return None;
        }
        let id = Uuid::new_v4();
        self.filters.push(Filter {
            id,
            field,
            operator,
            value,
            data_type,
            origin,
        });
        Some(id)
    }

    /// Removes the filter with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.id != id);
        self.filters.len() != before
    }

    /// Keeps only filters for which the predicate holds.
    pub fn retain(&mut self, keep: impl FnMut(&Filter) -> bool) {
        self.filters.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn as_slice(&self) -> &[Filter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn add_generates_unique_ids() {
        let mut set = FilterSet::new();
        let mut ids = HashSet::new();
        for i in 0..50 {
            let id = set
                .add(format!("field_{i}"), FilterOperator::Equals, "x", FilterDataType::String)
                .unwrap();
            assert!(ids.insert(id));
        }
        assert_eq!(set.len(), 50);
    }

    #[test]
    fn add_rejects_empty_field_or_value() {
        let mut set = FilterSet::new();
        assert!(set.add("", FilterOperator::Equals, "x", FilterDataType::String).is_none());
        assert!(set.add("statut", FilterOperator::Equals, "", FilterDataType::String).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut set = FilterSet::new();
        set.add("statut", FilterOperator::Equals, "TRAITE", FilterDataType::String);
        assert!(!set.remove(Uuid::new_v4()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_by_id() {
        let mut set = FilterSet::new();
        let id = set
            .add("statut", FilterOperator::Equals, "TRAITE", FilterDataType::String)
            .unwrap();
        set.add("priorite", FilterOperator::Equals, "HIGH", FilterDataType::String);
        assert!(set.remove(id));
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].field, "priorite");
    }

    #[test]
    fn insertion_order_preserved() {
        let mut set = FilterSet::new();
        set.add("a", FilterOperator::Equals, "1", FilterDataType::String);
        set.add("b", FilterOperator::Contains, "2", FilterDataType::String);
        set.add_drill("c", "3");
        let fields: Vec<_> = set.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["a", "b", "c"]);
    }

    #[test]
    fn drill_filters_tagged() {
        let mut set = FilterSet::new();
        set.add("severite", FilterOperator::Equals, "HIGH", FilterDataType::String);
        set.add_drill("statut", "OK");
        assert_eq!(set.as_slice()[0].origin, FilterOrigin::Manual);
        assert_eq!(set.as_slice()[1].origin, FilterOrigin::DrillDown);
        assert_eq!(set.as_slice()[1].operator, FilterOperator::Equals);
    }

    #[test]
    fn wire_shape_excludes_id_and_origin() {
        let mut set = FilterSet::new();
        set.add("statut", FilterOperator::NotEquals, "REJETE", FilterDataType::String);
        let json = serde_json::to_value(set.as_slice()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "field": "statut",
                "operator": "not_equals",
                "value": "REJETE",
                "dataType": "string"
            }])
        );
    }

    #[test]
    fn chip_label_format() {
        let mut set = FilterSet::new();
        set.add("statut", FilterOperator::Equals, "TRAITE", FilterDataType::String);
        assert_eq!(set.as_slice()[0].chip_label(), "statut equals TRAITE");
    }
}
