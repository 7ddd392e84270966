// dqlens-core/src/domain/selection.rs

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::domain::metrics::TableName;

/// The tables a user picked for one analysis request.
///
/// Membership is toggled, never validated against the catalog at toggle
/// time. Iteration follows insertion order so requests are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    members: IndexSet<TableName>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` if absent, removes it otherwise. Returns whether the table
    /// is selected afterwards.
    pub fn toggle(&mut self, name: impl Into<TableName>) -> bool {
        let name = name.into();
        if self.members.shift_remove(&name) {
            false
        } else {
            self.members.insert(name);
            true
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn members(&self) -> &IndexSet<TableName> {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableName> {
        self.members.iter()
    }

    pub fn to_vec(&self) -> Vec<TableName> {
        self.members.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Drops every member absent from `catalog`; returns the dropped names.
    pub fn retain_known(&mut self, catalog: &[TableName]) -> Vec<TableName> {
        let dropped: Vec<TableName> = self
            .members
            .iter()
            .filter(|name| !catalog.contains(name))
            .cloned()
            .collect();
        self.members.retain(|name| catalog.contains(name));
        dropped
    }
}

impl FromIterator<TableName> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = TableName>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn as_set(selection: &SelectionSet) -> BTreeSet<String> {
        selection.iter().cloned().collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle("orders"));
        assert!(selection.contains("orders"));
        assert!(!selection.toggle("orders"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let seeds: [&[&str]; 4] = [
            &[],
            &["a"],
            &["a", "b", "c"],
            &["customer1", "category1", "orders"],
        ];
        let probes = ["a", "b", "z", "category1", "Category1"];

        for seed in seeds {
            let original: SelectionSet = seed.iter().map(|s| s.to_string()).collect();
            for probe in probes {
                let mut selection = original.clone();
                selection.toggle(probe);
                selection.toggle(probe);
                assert_eq!(as_set(&selection), as_set(&original), "seed {seed:?}, probe {probe}");
            }
        }
    }

    #[test]
    fn test_no_duplicate_membership() {
        let selection: SelectionSet = ["a", "a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_removal_keeps_order_of_remaining_members() {
        let mut selection = SelectionSet::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("c");
        selection.toggle("b");
        assert_eq!(selection.to_vec(), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_toggle_accepts_names_outside_catalog() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle("not_in_catalog"));
    }

    #[test]
    fn test_retain_known_drops_stale_members() {
        let mut selection: SelectionSet =
            ["a", "gone", "b"].iter().map(|s| s.to_string()).collect();
        let catalog = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let dropped = selection.retain_known(&catalog);

        assert_eq!(dropped, vec!["gone".to_string()]);
        assert_eq!(selection.to_vec(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_members_in_insertion_order_and_clear() {
        let mut selection = SelectionSet::new();
        selection.toggle("orders");
        selection.toggle("category1");

        let members: Vec<&str> = selection.members().iter().map(String::as_str).collect();
        assert_eq!(members, vec!["orders", "category1"]);

        selection.clear();
        assert!(selection.is_empty());
        assert!(selection.members().is_empty());
        // Cleared members can be selected again.
        assert!(selection.toggle("orders"));
    }
}
