//! AST-to-template canonicalization.
//!
//! A [`Canonicalizer`] walks one statement and writes its normalized text to
//! the state buffer, replacing literals with `?` and recording them, and
//! collecting the tables it names. Each syntax category has one rule,
//! spread over the submodules by statement family:
//!
//! - `query`: SELECT bodies, FROM/JOIN, ORDER BY, LIMIT, CTEs
//! - `expr`: expressions, functions, operators
//! - `dml`: INSERT, UPDATE, DELETE
//! - `show`: SHOW statements
//! - `opaque`: the route for everything without a rule

mod dml;
mod expr;
mod opaque;
mod query;
mod show;

use sqlparser::ast::{Ident, ObjectName, ObjectNamePart, Statement};

use crate::diagnostic::Diagnostic;
use crate::operation::OperationKind;
use crate::param::Param;
use crate::table::{TableCollector, TableReference};

/// Placeholder written in place of every extracted literal
pub const PLACEHOLDER: &str = "?";

/// Mutable scratch space of one canonicalization.
///
/// Instances are recycled by the state pool; [`reset`](Self::reset) returns
/// one to the freshly-constructed condition while keeping allocations.
#[derive(Debug, Default)]
pub(crate) struct CanonicalState {
    pub(crate) out: String,
    pub(crate) params: Vec<Param>,
    pub(crate) tables: TableCollector,
    pub(crate) operation: OperationKind,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Names of the CTEs visible at the current point of the walk
    pub(crate) ctes: Vec<String>,
}

impl CanonicalState {
    pub(crate) fn reset(&mut self) {
        self.out.clear();
        self.params.clear();
        self.tables.clear();
        self.operation = OperationKind::Unknown;
        self.diagnostics.clear();
        self.ctes.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_clean(&self) -> bool {
        self.out.is_empty()
            && self.params.is_empty()
            && self.tables.is_empty()
            && self.operation.is_unknown()
            && self.diagnostics.is_empty()
            && self.ctes.is_empty()
    }
}

/// Traversal context threaded by value through the recursion
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Scope {
    /// Literals are kept verbatim inside aggregate-function arguments
    pub(crate) in_aggregate: bool,
}

impl Scope {
    fn aggregate(self) -> Self {
        Scope { in_aggregate: true }
    }
}

/// Canonicalize `statement` into `state`.
///
/// `index` is the position of the statement in its batch and is only used
/// to label diagnostics.
pub(crate) fn canonicalize(state: &mut CanonicalState, statement: &Statement, index: usize) {
    Canonicalizer { state, index }.statement(statement);
}

pub(crate) struct Canonicalizer<'s> {
    state: &'s mut CanonicalState,
    index: usize,
}

impl Canonicalizer<'_> {
    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Query(query) => {
                self.enter(OperationKind::Select);
                self.query(query);
            }
            Statement::Insert(insert) => {
                self.enter(OperationKind::Insert);
                self.insert(insert);
            }
            Statement::Update(update) => {
                self.enter(OperationKind::Update);
                self.update(update);
            }
            Statement::Delete(delete) => {
                self.enter(OperationKind::Delete);
                self.delete(delete);
            }
            Statement::Explain {
                statement: explained,
                ..
            } => {
                self.enter(OperationKind::Explain);
                self.explain(statement, explained);
            }
            Statement::ExplainTable { .. } => {
                self.enter(OperationKind::Explain);
                self.opaque(statement);
            }
            Statement::ShowTables { .. }
            | Statement::ShowDatabases { .. }
            | Statement::ShowSchemas { .. }
            | Statement::ShowViews { .. }
            | Statement::ShowColumns { .. }
            | Statement::ShowVariables { .. }
            | Statement::ShowVariable { .. }
            | Statement::ShowStatus { .. }
            | Statement::ShowCreate { .. }
            | Statement::ShowCollation { .. }
            | Statement::ShowFunctions { .. }
            | Statement::ShowCharset(_)
            | Statement::ShowObjects(_) => {
                self.enter(OperationKind::Show);
                self.show(statement);
            }
            other => self.unhandled("Statement", other),
        }
    }

    /// Keep the EXPLAIN prefix as written and canonicalize the explained
    /// statement.
    fn explain(&mut self, whole: &Statement, explained: &Statement) {
        let whole_text = whole.to_string();
        let explained_text = explained.to_string();
        match whole_text.strip_suffix(explained_text.as_str()) {
            Some(prefix) => {
                self.write(prefix);
                self.statement(explained);
            }
            None => self.unhandled("Statement", whole),
        }
    }

    /// Record the operation kind; only the outermost statement sets it
    fn enter(&mut self, kind: OperationKind) {
        if self.state.operation.is_unknown() {
            self.state.operation = kind;
        }
    }

    fn write(&mut self, text: &str) {
        self.state.out.push_str(text);
    }

    fn placeholder(&mut self, param: Param) {
        self.state.out.push_str(PLACEHOLDER);
        self.state.params.push(param);
    }

    /// Emit a table name shard-normalized and record it, unless it names a
    /// CTE in scope.
    fn table_name(&mut self, name: &ObjectName) {
        let parts = name_parts(name);
        if parts.len() == 1 && self.state.ctes.iter().any(|cte| cte == &parts[0]) {
            self.write(&parts[0]);
            return;
        }
        let Some(table) = TableReference::from_parts(&parts) else {
            return;
        };
        for catalog in &parts[..parts.len().saturating_sub(2)] {
            self.write(catalog);
            self.write(".");
        }
        if !table.templatized_schema.is_empty() {
            self.write(&table.templatized_schema);
            self.write(".");
        }
        self.write(&table.templatized_table);
        self.state.tables.push(table);
    }

    /// Comma-separated list, each item rendered by `each`
    fn list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            each(self, item);
        }
    }
}

/// Unquoted parts of a dotted name
pub(crate) fn name_parts(name: &ObjectName) -> Vec<String> {
    name.0
        .iter()
        .map(|part| match part {
            ObjectNamePart::Identifier(ident) => ident.value.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// Identifier text with quoting removed
pub(crate) trait RawName {
    fn raw(&self) -> String;
}

impl RawName for Ident {
    fn raw(&self) -> String {
        self.value.clone()
    }
}

impl RawName for ObjectName {
    fn raw(&self) -> String {
        name_parts(self).join(".")
    }
}

#[cfg(test)]
#[path = "canonical_test.rs"]
mod tests;
