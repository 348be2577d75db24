//! Fallback rendering for nodes without a dedicated rule.

use std::fmt;
use std::ops::ControlFlow;

use sqlparser::ast::{Expr, Ident, ObjectName, ObjectNamePart, Value, VisitMut, VisitorMut};

use super::{name_parts, Canonicalizer, PLACEHOLDER};
use crate::diagnostic::Diagnostic;
use crate::param::Param;
use crate::table::{TableCollector, TableReference};

impl Canonicalizer<'_> {
    /// Render `node` through its own SQL text, after lifting its literals
    /// into params, recording and shard-normalizing its relations, and
    /// stripping identifier quotes.
    pub(super) fn opaque<T>(&mut self, node: &T)
    where
        T: Clone + fmt::Display + VisitMut,
    {
        let mut copy = node.clone();
        let mut rewriter = OpaqueRewriter {
            params: &mut self.state.params,
            tables: &mut self.state.tables,
            ctes: &self.state.ctes,
        };
        let _ = copy.visit(&mut rewriter);
        self.write(&copy.to_string());
    }

    /// Record a diagnostic for a node without a rule, then render it opaquely
    pub(super) fn unhandled<T>(&mut self, category: &str, node: &T)
    where
        T: Clone + fmt::Display + fmt::Debug + VisitMut,
    {
        let variant = variant_name(node);
        let kind = if variant == category {
            variant
        } else {
            format!("{category}::{variant}")
        };
        let diagnostic = Diagnostic::unhandled(self.index, kind, node.to_string());
        self.state.diagnostics.push(diagnostic);
        self.opaque(node);
    }
}

struct OpaqueRewriter<'a> {
    params: &'a mut Vec<Param>,
    tables: &'a mut TableCollector,
    ctes: &'a [String],
}

impl VisitorMut for OpaqueRewriter<'_> {
    type Break = ();

    fn pre_visit_relation(&mut self, relation: &mut ObjectName) -> ControlFlow<()> {
        let parts = name_parts(relation);
        if parts.len() == 1 && self.ctes.iter().any(|cte| cte == &parts[0]) {
            return ControlFlow::Continue(());
        }
        let Some(table) = TableReference::from_parts(&parts) else {
            return ControlFlow::Continue(());
        };

        let mut rewritten: Vec<String> = parts[..parts.len().saturating_sub(2)].to_vec();
        if !table.templatized_schema.is_empty() {
            rewritten.push(table.templatized_schema.clone());
        }
        rewritten.push(table.templatized_table.clone());
        relation.0 = rewritten
            .into_iter()
            .map(|part| ObjectNamePart::Identifier(Ident::new(part)))
            .collect();

        self.tables.push(table);
        ControlFlow::Continue(())
    }

    fn post_visit_value(&mut self, value: &mut Value) -> ControlFlow<()> {
        self.params.push(Param::from_value(value));
        *value = Value::Placeholder(PLACEHOLDER.to_string());
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<()> {
        match expr {
            Expr::Identifier(ident) => ident.quote_style = None,
            Expr::CompoundIdentifier(idents) => {
                for ident in idents {
                    ident.quote_style = None;
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }
}

/// Variant name of an AST enum, read from its `Debug` form
fn variant_name<T: fmt::Debug>(node: &T) -> String {
    let debug = format!("{node:?}");
    debug
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default()
        .to_string()
}
