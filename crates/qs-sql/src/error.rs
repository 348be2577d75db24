//! Error types for qs-sql

use thiserror::Error;

/// SQL parsing and extraction errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL parse error (S001)
    #[error("[S001] SQL parse error at line {line}, column {column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty input (S002)
    #[error("[S002] SQL input is empty")]
    EmptyInput,

    /// Unknown dialect name (S003)
    #[error("[S003] Unknown SQL dialect: {0}")]
    UnknownDialect(String),

    /// Input contained only delimiters (S004)
    #[error("[S004] No valid SQL statements found")]
    NoStatements,

    /// A statement of the batch could not be processed (S005)
    #[error("[S005] Error processing statement {index}: {source}")]
    StatementError {
        index: usize,
        #[source]
        source: Box<SqlError>,
    },

    /// Syntax without a canonicalization rule, under the reject policy (S006)
    #[error("[S006] Unsupported syntax: {kind}")]
    Unsupported { kind: String },
}

impl SqlError {
    /// Wrap an error as the failure of statement `index`
    pub fn at_statement(index: usize, source: SqlError) -> Self {
        SqlError::StatementError {
            index,
            source: Box::new(source),
        }
    }
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
