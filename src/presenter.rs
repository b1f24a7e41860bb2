//! Chart-facing shaping of engine state: renderer selection, pie slices,
//! breadcrumb navigation and display labels. No rendering happens here —
//! the UI layer feeds these structures to its charting library.

use serde::Serialize;

use crate::models::chart::AggregateRow;
use crate::models::drilldown::{DrillDownOption, DrillDownPath};
use crate::models::enums::ChartType;

/// One x/y point of a line or bar series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: String,
    pub y: u64,
}

/// One pie slice. `share` is recomputed from the option counts rather
/// than taken from the server-supplied percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: u64,
    pub share: f64,
}

/// Chart-ready data for the selected renderer. Line and bar plot the
/// time series; pie plots the next drill-down choices.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartView {
    Line { series: Vec<SeriesPoint> },
    Bar { series: Vec<SeriesPoint> },
    Pie { slices: Vec<PieSlice> },
}

/// Selects the chart data purely from the chart type. Unrecognized
/// configurations fall back to the line renderer upstream, so only the
/// three variants exist here.
pub fn chart_view(
    chart_type: &ChartType,
    rows: &[AggregateRow],
    options: &[DrillDownOption],
) -> ChartView {
    match chart_type {
        ChartType::Bar => ChartView::Bar {
            series: time_series(rows),
        },
        ChartType::Pie => ChartView::Pie {
            slices: pie_slices(options),
        },
        ChartType::Line => ChartView::Line {
            series: time_series(rows),
        },
    }
}

fn time_series(rows: &[AggregateRow]) -> Vec<SeriesPoint> {
    rows.iter()
        .map(|r| SeriesPoint {
            x: r.date.clone(),
            y: r.count,
        })
        .collect()
}

/// Pie slices are always sourced from the drill-down options, never from
/// the time series.
pub fn pie_slices(options: &[DrillDownOption]) -> Vec<PieSlice> {
    let total: u64 = options.iter().map(|o| o.count).sum();
    options
        .iter()
        .map(|o| PieSlice {
            name: o.label.clone(),
            value: o.count,
            share: if total > 0 {
                o.count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Where a breadcrumb click jumps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbTarget {
    Root,
    Level(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub target: BreadcrumbTarget,
}

/// "Root" plus one clickable crumb per path entry, in path order.
pub fn breadcrumbs(path: &DrillDownPath) -> Vec<Breadcrumb> {
    let mut crumbs = Vec::with_capacity(path.depth() + 1);
    crumbs.push(Breadcrumb {
        label: "Racine".into(),
        target: BreadcrumbTarget::Root,
    });
    for (index, step) in path.steps().iter().enumerate() {
        crumbs.push(Breadcrumb {
            label: step.label.clone(),
            target: BreadcrumbTarget::Level(index),
        });
    }
    crumbs
}

/// Display label for a dimension value. Known status, priority, type and
/// severity codes map to their French labels; anything else passes
/// through, empty values become "Non défini".
pub fn format_label(dimension: &str, value: &str) -> String {
    let mapped = match dimension {
        "statut" => match value {
            "NOUVEAU" => Some("Nouveau"),
            "EN_COURS" => Some("En Cours"),
            "TRAITE" => Some("Traité"),
            "REJETE" => Some("Rejeté"),
            "VALIDE" => Some("Validé"),
            "EXECUTE" => Some("Exécuté"),
            _ => None,
        },
        "priorite" => match value {
            "HIGH" => Some("Haute"),
            "MEDIUM" => Some("Moyenne"),
            "LOW" => Some("Basse"),
            _ => None,
        },
        "type" => match value {
            "TECHNIQUE" => Some("Technique"),
            "COMMERCIAL" => Some("Commercial"),
            "ADMINISTRATIF" => Some("Administratif"),
            _ => None,
        },
        "severite" => match value {
            "CRITIQUE" => Some("Critique"),
            "MAJEURE" => Some("Majeure"),
            "MINEURE" => Some("Mineure"),
            _ => None,
        },
        _ => None,
    };

    match mapped {
        Some(label) => label.to_string(),
        None if value.is_empty() => "Non défini".to_string(),
        None => value.to_string(),
    }
}
