// dqlens-core/src/application/presenter.rs
//
// Pure projection of a report into what the renderers draw. No state, no I/O:
// the same report always yields the same view.

use serde::Serialize;

use crate::domain::metrics::{ColumnMetricMap, MetricsReport, TableMetrics};
use crate::domain::tier::{Tier, clamp_percentage, classify};

/// One gauge: a column, its clamped percentage and the tier that colours it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub column: String,
    pub value: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValues {
    pub column: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub table: String,
    pub completeness: Vec<Bar>,
    pub uniqueness: Vec<Bar>,
    pub duplicate_percentage: f64,
    pub duplicate_rows: u64,
    pub missing_values: Vec<MissingValues>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub tables: Vec<TableView>,
}

/// `None` when there is nothing to show yet.
pub fn present(report: Option<&MetricsReport>) -> Option<ReportView> {
    report.map(present_report)
}

pub fn present_report(report: &MetricsReport) -> ReportView {
    ReportView {
        tables: report
            .iter()
            .map(|(table, metrics)| present_table(table, metrics))
            .collect(),
    }
}

fn present_table(table: &str, metrics: &TableMetrics) -> TableView {
    TableView {
        table: table.to_string(),
        completeness: bars(&metrics.completeness_percentage),
        uniqueness: bars(&metrics.uniqueness_percentage),
        duplicate_percentage: clamp_percentage(metrics.duplicate_percentage),
        duplicate_rows: metrics.duplicate_rows,
        missing_values: metrics
            .missing_values
            .iter()
            .map(|(column, count)| MissingValues {
                column: column.clone(),
                count: *count,
            })
            .collect(),
    }
}

fn bars(map: &ColumnMetricMap<f64>) -> Vec<Bar> {
    map.iter()
        .map(|(column, raw)| {
            let value = clamp_percentage(*raw);
            Bar {
                column: column.clone(),
                value,
                tier: classify(value),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn metrics(completeness: &[(&str, f64)], uniqueness: &[(&str, f64)]) -> TableMetrics {
        let to_map = |pairs: &[(&str, f64)]| -> IndexMap<String, f64> {
            pairs.iter().map(|(c, v)| (c.to_string(), *v)).collect()
        };
        TableMetrics {
            missing_values: completeness
                .iter()
                .enumerate()
                .map(|(i, (c, _))| (c.to_string(), i as u64))
                .collect(),
            duplicate_rows: 2,
            null_values_percentage: to_map(completeness),
            duplicate_percentage: 12.5,
            completeness_percentage: to_map(completeness),
            uniqueness_percentage: to_map(uniqueness),
        }
    }

    #[test]
    fn test_absent_report_renders_nothing() {
        assert!(present(None).is_none());
    }

    #[test]
    fn test_full_completeness_is_a_high_bar_at_100() {
        let report: MetricsReport =
            [("category1".to_string(), metrics(&[("category_id", 100.0)], &[("category_id", 100.0)]))]
                .into_iter()
                .collect();

        let view = present(Some(&report)).unwrap();

        let bar = &view.tables[0].completeness[0];
        assert_eq!(bar.column, "category_id");
        assert_eq!(bar.value, 100.0);
        assert_eq!(bar.tier, Tier::High);
        assert_eq!(bar.tier.color_name(), "green");
    }

    #[test]
    fn test_tables_and_columns_keep_report_order() {
        let report: MetricsReport = [
            ("zeta".to_string(), metrics(&[("b", 10.0), ("a", 70.0)], &[("a", 90.0), ("b", 10.0)])),
            ("alpha".to_string(), metrics(&[("x", 80.0)], &[("x", 59.9)])),
        ]
        .into_iter()
        .collect();

        let view = present_report(&report);

        let tables: Vec<&str> = view.tables.iter().map(|t| t.table.as_str()).collect();
        assert_eq!(tables, vec!["zeta", "alpha"]);

        let zeta = &view.tables[0];
        let completeness: Vec<(&str, Tier)> = zeta
            .completeness
            .iter()
            .map(|b| (b.column.as_str(), b.tier))
            .collect();
        assert_eq!(completeness, vec![("b", Tier::Low), ("a", Tier::Medium)]);

        let uniqueness: Vec<&str> = zeta.uniqueness.iter().map(|b| b.column.as_str()).collect();
        assert_eq!(uniqueness, vec!["a", "b"]);

        let missing: Vec<(&str, u64)> = zeta
            .missing_values
            .iter()
            .map(|m| (m.column.as_str(), m.count))
            .collect();
        assert_eq!(missing, vec![("b", 0), ("a", 1)]);

        assert_eq!(view.tables[1].uniqueness[0].tier, Tier::Low);
        assert_eq!(zeta.duplicate_percentage, 12.5);
        assert_eq!(zeta.duplicate_rows, 2);
    }

    #[test]
    fn test_out_of_range_values_are_clamped_before_classification() {
        let report: MetricsReport =
            [("t".to_string(), metrics(&[("c", 104.0)], &[("c", -2.0)]))]
                .into_iter()
                .collect();

        let view = present_report(&report);
        assert_eq!(view.tables[0].completeness[0].value, 100.0);
        assert_eq!(view.tables[0].completeness[0].tier, Tier::High);
        assert_eq!(view.tables[0].uniqueness[0].value, 0.0);
        assert_eq!(view.tables[0].uniqueness[0].tier, Tier::Low);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let report: MetricsReport =
            [("t".to_string(), metrics(&[("c", 61.0)], &[("c", 61.0)]))]
                .into_iter()
                .collect();
        assert_eq!(present_report(&report), present_report(&report));
    }
}
