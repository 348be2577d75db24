//! Statement orchestration: parse a batch, canonicalize each statement and
//! assemble the per-statement results.

use std::sync::OnceLock;

use qs_core::{Config, UnhandledPolicy};
use serde::Serialize;

use crate::canonical::canonicalize;
use crate::diagnostic::Diagnostic;
use crate::error::{SqlError, SqlResult};
use crate::fingerprint;
use crate::operation::OperationKind;
use crate::param::Param;
use crate::parser::SqlParser;
use crate::pool::StatePool;
use crate::table::TableReference;

/// Canonical form of one statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedStatement {
    /// Statement text with every literal replaced by `?`
    pub template: String,
    /// Literals in placeholder order
    pub params: Vec<Param>,
    /// Tables in first-seen order, without repeats
    pub tables: Vec<TableReference>,
    pub operation: OperationKind,
}

/// Result of extracting one batch, one entry per statement in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    statements: Vec<ExtractedStatement>,
    diagnostics: Vec<Diagnostic>,
}

impl ExtractionResult {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[ExtractedStatement] {
        &self.statements
    }

    pub fn templates(&self) -> Vec<&str> {
        self.statements.iter().map(|s| s.template.as_str()).collect()
    }

    pub fn params(&self) -> Vec<&[Param]> {
        self.statements.iter().map(|s| s.params.as_slice()).collect()
    }

    pub fn tables(&self) -> Vec<&[TableReference]> {
        self.statements.iter().map(|s| s.tables.as_slice()).collect()
    }

    pub fn operations(&self) -> Vec<OperationKind> {
        self.statements.iter().map(|s| s.operation).collect()
    }

    /// Nodes rendered without a dedicated rule, across the whole batch
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether the input already carried placeholders (`?`, `$1`, `:name`)
    pub fn has_param_marker(&self) -> bool {
        self.statements
            .iter()
            .any(|s| s.params.iter().any(Param::is_marker))
    }

    /// SHA-256 fingerprints of the templates
    pub fn fingerprints(&self) -> Vec<String> {
        fingerprint::fingerprint(self)
    }

    /// Fingerprints of the templates under a caller-supplied hash
    pub fn fingerprints_with<F>(&self, hash: F) -> Vec<String>
    where
        F: Fn(&[u8]) -> String,
    {
        fingerprint::fingerprint_with(self, hash)
    }
}

/// Extraction engine.
///
/// An `Extractor` is `Send + Sync`; one instance can serve any number of
/// threads, which then share its state pool.
pub struct Extractor {
    parser: SqlParser,
    policy: UnhandledPolicy,
    pool: StatePool,
}

impl Extractor {
    /// MySQL dialect, degrade policy, default pool
    pub fn new() -> Self {
        Self {
            parser: SqlParser::mysql(),
            policy: UnhandledPolicy::default(),
            pool: StatePool::default(),
        }
    }

    pub fn from_config(config: &Config) -> SqlResult<Self> {
        Ok(Self {
            parser: SqlParser::from_dialect_name(config.dialect.as_str())?,
            policy: config.unhandled,
            pool: StatePool::new(config.pool.max_idle),
        })
    }

    /// Switch the parsing dialect by name
    pub fn with_dialect(mut self, name: &str) -> SqlResult<Self> {
        self.parser = SqlParser::from_dialect_name(name)?;
        Ok(self)
    }

    pub fn with_policy(mut self, policy: UnhandledPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn dialect_name(&self) -> &'static str {
        self.parser.dialect_name()
    }

    pub fn policy(&self) -> UnhandledPolicy {
        self.policy
    }

    /// Extract templates, params, tables and operation kinds from `sql`.
    ///
    /// Any failing statement fails the whole batch with
    /// [`SqlError::StatementError`] naming its index; nothing is returned
    /// for the statements around it.
    pub fn extract(&self, sql: &str) -> SqlResult<ExtractionResult> {
        let parsed = self.parser.parse_batch(sql)?;
        let mut state = self.pool.acquire();
        let mut result = ExtractionResult {
            statements: Vec::with_capacity(parsed.len()),
            diagnostics: Vec::new(),
        };

        for (index, statement) in parsed.into_iter().enumerate() {
            let statement = statement.map_err(|e| SqlError::at_statement(index, e))?;
            canonicalize(&mut state, &statement, index);

            if self.policy == UnhandledPolicy::Reject {
                if let Some(diagnostic) = state.diagnostics.first() {
                    return Err(SqlError::at_statement(
                        index,
                        SqlError::Unsupported {
                            kind: diagnostic.kind.clone(),
                        },
                    ));
                }
            }

            result.diagnostics.append(&mut state.diagnostics);
            result.statements.push(ExtractedStatement {
                template: state.out.clone(),
                params: state.params.drain(..).collect(),
                tables: state.tables.finish(),
                operation: state.operation,
            });
            state.reset();
        }

        log::debug!(
            "extracted {} statement(s) with {} diagnostic(s) ({} dialect)",
            result.statements.len(),
            result.diagnostics.len(),
            self.dialect_name()
        );
        Ok(result)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract with the default engine: MySQL dialect, degrade policy, and one
/// state pool shared by the whole process.
pub fn extract(sql: &str) -> SqlResult<ExtractionResult> {
    static DEFAULT: OnceLock<Extractor> = OnceLock::new();
    DEFAULT.get_or_init(Extractor::new).extract(sql)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
