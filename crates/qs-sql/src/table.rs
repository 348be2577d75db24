//! Table references collected while canonicalizing a statement.

use crate::shard::normalize_shard_suffix;
use serde::Serialize;
use std::collections::HashSet;

/// A table named by a statement, raw and shard-normalized
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableReference {
    /// Schema as written, empty when unqualified
    pub schema: String,
    /// Table as written
    pub table: String,
    /// Schema with its shard suffix generalized
    pub templatized_schema: String,
    /// Table with its shard suffix generalized
    pub templatized_table: String,
}

impl TableReference {
    /// Build a reference, normalizing both parts
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        let schema = schema.into();
        let table = table.into();
        Self {
            templatized_schema: normalize_shard_suffix(&schema),
            templatized_table: normalize_shard_suffix(&table),
            schema,
            table,
        }
    }

    /// Build a reference from dotted name parts.
    ///
    /// The last part is the table and the one before it the schema; any
    /// leading catalog parts are ignored.
    pub fn from_parts(parts: &[String]) -> Option<Self> {
        match parts {
            [] => None,
            [table] => Some(Self::new("", table.as_str())),
            [.., schema, table] => Some(Self::new(schema.as_str(), table.as_str())),
        }
    }

    /// Deduplication identity: `schema.table`, or `table` when unqualified
    pub fn key(&self) -> String {
        self.qualified_name()
    }

    /// Raw name as `schema.table`, or `table` when unqualified
    pub fn qualified_name(&self) -> String {
        join_qualified(&self.schema, &self.table)
    }

    /// Normalized name as `schema.table`, or `table` when unqualified
    pub fn templatized_qualified_name(&self) -> String {
        join_qualified(&self.templatized_schema, &self.templatized_table)
    }
}

fn join_qualified(schema: &str, table: &str) -> String {
    if schema.is_empty() {
        table.to_string()
    } else {
        format!("{schema}.{table}")
    }
}

/// Per-statement collector of table references.
///
/// References are appended as they are visited; [`finish`](Self::finish)
/// drops repeats by [`TableReference::key`], keeping first-seen order.
#[derive(Debug, Default)]
pub struct TableCollector {
    refs: Vec<TableReference>,
}

impl TableCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, table: TableReference) {
        self.refs.push(table);
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Deduplicated references, emptying the collector
    pub fn finish(&mut self) -> Vec<TableReference> {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(self.refs.len());
        for table in self.refs.drain(..) {
            if seen.insert(table.key()) {
                unique.push(table);
            }
        }
        unique
    }

    pub fn clear(&mut self) {
        self.refs.clear();
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
