use std::collections::HashMap;

use crate::record::WriteItem;

/// Write items pending insertion, grouped by destination table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRequest {
    tables: HashMap<String, Vec<WriteItem>>,
}

/// Items a table rejected in one attempt. Same shape as the request.
pub type UnprocessedSet = BatchRequest;

impl BatchRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request targeting a single table.
    pub fn for_table(table_name: impl Into<String>, items: Vec<WriteItem>) -> Self {
        let mut tables = HashMap::new();
        tables.insert(table_name.into(), items);
        Self { tables }
    }

    /// Appends an item to the given table's sequence.
    pub fn push(&mut self, table_name: &str, item: WriteItem) {
        self.tables
            .entry(table_name.to_string())
            .or_default()
            .push(item);
    }

    /// True when no table has any item left to write.
    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }

    /// Total number of items across all tables.
    pub fn item_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Items queued for a table, if any.
    pub fn items(&self, table_name: &str) -> Option<&[WriteItem]> {
        self.tables.get(table_name).map(Vec::as_slice)
    }

    /// Iterates over tables that still hold at least one item.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &[WriteItem])> {
        self.tables
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}

impl FromIterator<(String, Vec<WriteItem>)> for BatchRequest {
    fn from_iter<T: IntoIterator<Item = (String, Vec<WriteItem>)>>(iter: T) -> Self {
        let mut request = Self::new();
        for (table_name, items) in iter {
            request.tables.entry(table_name).or_default().extend(items);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> WriteItem {
        WriteItem {
            username: name.to_string(),
            timestamp: "2024-01-01T12:00:00.000Z".to_string(),
            message: format!("message from {name}"),
        }
    }

    #[test]
    fn test_new_request_is_empty() {
        let request = BatchRequest::new();

        assert!(request.is_empty());
        assert_eq!(request.item_count(), 0);
        assert_eq!(request.tables().count(), 0);
    }

    #[test]
    fn test_tables_without_items_count_as_empty() {
        let request = BatchRequest::for_table("events", vec![]);

        assert!(request.is_empty());
        assert_eq!(request.tables().count(), 0);
    }

    #[test]
    fn test_push_groups_by_table() {
        let mut request = BatchRequest::new();
        request.push("events", item("a"));
        request.push("audit", item("b"));
        request.push("events", item("c"));

        assert!(!request.is_empty());
        assert_eq!(request.item_count(), 3);
        assert_eq!(request.items("events").unwrap(), &[item("a"), item("c")]);
        assert_eq!(request.items("audit").unwrap(), &[item("b")]);
        assert!(request.items("missing").is_none());
    }

    #[test]
    fn test_from_iter_merges_duplicate_tables() {
        let request: BatchRequest = vec![
            ("events".to_string(), vec![item("a")]),
            ("events".to_string(), vec![item("b")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(request.items("events").unwrap(), &[item("a"), item("b")]);
    }
}
