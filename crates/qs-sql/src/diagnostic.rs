//! Non-fatal findings raised while canonicalizing.

use serde::Serialize;

/// A node the canonicalizer had no explicit rule for.
///
/// Under the degrade policy the node is still rendered; the diagnostic is
/// how callers find out that a template may be coarser than usual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Index of the statement within the batch
    pub statement: usize,
    /// Node category, e.g. `Expr::MatchAgainst`
    pub kind: String,
    /// Source text of the node
    pub text: String,
}

impl Diagnostic {
    pub fn unhandled(statement: usize, kind: impl Into<String>, text: impl Into<String>) -> Self {
        let diagnostic = Self {
            statement,
            kind: kind.into(),
            text: text.into(),
        };
        log::warn!(
            "statement {}: no canonicalization rule for {} ({}); rendering its source form",
            diagnostic.statement,
            diagnostic.kind,
            diagnostic.text
        );
        diagnostic
    }
}
