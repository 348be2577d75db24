//! qs-sql - SQL template extraction for QueryShape
//!
//! Parses SQL with sqlparser-rs and rewrites every statement into a
//! canonical template: literals become `?` and are returned in order as
//! params, tables are collected with their shard suffixes generalized, and
//! each statement is classified by operation kind.

mod canonical;
pub mod diagnostic;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod operation;
pub mod param;
pub mod parser;
mod pool;
pub mod shard;
pub mod table;

pub use canonical::PLACEHOLDER;
pub use diagnostic::Diagnostic;
pub use dialect::{GenericDialect, MySqlDialect, PostgresDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use extract::{extract, ExtractedStatement, ExtractionResult, Extractor};
pub use fingerprint::{fingerprint, fingerprint_with};
pub use operation::OperationKind;
pub use param::Param;
pub use parser::SqlParser;
pub use shard::normalize_shard_suffix;
pub use table::TableReference;
