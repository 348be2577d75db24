//! Statement operation kinds.

use serde::Serialize;
use std::fmt;

/// Kind of the top-level statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    #[default]
    Unknown,
    Select,
    Insert,
    Update,
    Delete,
    Explain,
    Show,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Unknown => "UNKNOWN",
            OperationKind::Select => "SELECT",
            OperationKind::Insert => "INSERT",
            OperationKind::Update => "UPDATE",
            OperationKind::Delete => "DELETE",
            OperationKind::Explain => "EXPLAIN",
            OperationKind::Show => "SHOW",
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == OperationKind::Unknown
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "operation_test.rs"]
mod tests;
