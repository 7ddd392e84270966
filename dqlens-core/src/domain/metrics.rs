// dqlens-core/src/domain/metrics.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::error::DomainError;
use crate::domain::selection::SelectionSet;

/// Opaque, case-sensitive table identifier.
pub type TableName = String;

/// Column name -> value, in source-column order.
pub type ColumnMetricMap<T> = IndexMap<String, T>;

/// Quality indicators for a single table, as returned by the metrics service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetrics {
    #[serde(deserialize_with = "lenient::count_map")]
    pub missing_values: ColumnMetricMap<u64>,

    #[serde(deserialize_with = "lenient::count")]
    pub duplicate_rows: u64,

    pub null_values_percentage: ColumnMetricMap<f64>,
    pub duplicate_percentage: f64,
    pub completeness_percentage: ColumnMetricMap<f64>,
    pub uniqueness_percentage: ColumnMetricMap<f64>,
}

impl TableMetrics {
    /// Column names in `missing_values` order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.missing_values.keys().map(String::as_str)
    }

    /// Checks the per-table invariants: shared column set and percentage range.
    pub fn validate(&self, table: &str) -> Result<(), DomainError> {
        let expected: BTreeSet<&str> = self.columns().collect();

        let percentage_maps: [(&'static str, &ColumnMetricMap<f64>); 3] = [
            ("null_values_percentage", &self.null_values_percentage),
            ("completeness_percentage", &self.completeness_percentage),
            ("uniqueness_percentage", &self.uniqueness_percentage),
        ];

        for (field, map) in percentage_maps {
            let actual: BTreeSet<&str> = map.keys().map(String::as_str).collect();
            if actual != expected {
                return Err(DomainError::ColumnMismatch {
                    table: table.to_string(),
                    field,
                });
            }

            for (column, value) in map {
                check_percentage(table, field, Some(column), *value)?;
            }
        }

        check_percentage(table, "duplicate_percentage", None, self.duplicate_percentage)
    }
}

fn check_percentage(
    table: &str,
    field: &'static str,
    column: Option<&str>,
    value: f64,
) -> Result<(), DomainError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        return Ok(());
    }
    Err(DomainError::PercentageOutOfRange {
        table: table.to_string(),
        field,
        column: column.map(str::to_string),
        value,
    })
}

/// Table name -> metrics. Serialized as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsReport(IndexMap<TableName, TableMetrics>);

impl MetricsReport {
    pub fn new(tables: IndexMap<TableName, TableMetrics>) -> Self {
        Self(tables)
    }

    pub fn get(&self, table: &str) -> Option<&TableMetrics> {
        self.0.get(table)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TableName, &TableMetrics)> {
        self.0.iter()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Full contract check against the selection the report was requested for:
    /// exact key set, then every table's own invariants.
    pub fn validate_against(&self, selection: &SelectionSet) -> Result<(), DomainError> {
        let missing: Vec<String> = selection
            .iter()
            .filter(|name| !self.0.contains_key(name.as_str()))
            .cloned()
            .collect();
        let unexpected: Vec<String> = self
            .0
            .keys()
            .filter(|name| !selection.contains(name))
            .cloned()
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(DomainError::ReportMismatch {
                missing,
                unexpected,
            });
        }

        for (table, metrics) in &self.0 {
            metrics.validate(table)?;
        }
        Ok(())
    }
}

impl FromIterator<(TableName, TableMetrics)> for MetricsReport {
    fn from_iter<I: IntoIterator<Item = (TableName, TableMetrics)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// The service emits counts through a float-friendly encoder, so `3` and `3.0`
// must both decode as the integer 3.
mod lenient {
    use super::ColumnMetricMap;
    use indexmap::IndexMap;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    fn to_count(raw: f64) -> Result<u64, String> {
        if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= u64::MAX as f64 {
            Ok(raw as u64)
        } else {
            Err(format!("expected a non-negative integer count, got {raw}"))
        }
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        to_count(raw).map_err(D::Error::custom)
    }

    pub fn count_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ColumnMetricMap<u64>, D::Error> {
        let raw = IndexMap::<String, f64>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(column, value)| {
                to_count(value)
                    .map(|count| (column.clone(), count))
                    .map_err(|e| D::Error::custom(format!("column '{column}': {e}")))
            })
            .collect()
    }
}
