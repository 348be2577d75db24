//! SQL parser wrapper

use crate::dialect::{GenericDialect, MySqlDialect, PostgresDialect, SqlDialect};
use crate::error::{SqlError, SqlResult};
use sqlparser::ast::Statement;

/// SQL parser that wraps sqlparser-rs with dialect support
pub struct SqlParser {
    dialect: Box<dyn SqlDialect>,
}

impl SqlParser {
    /// Create a new parser with MySQL dialect
    pub fn mysql() -> Self {
        Self {
            dialect: Box::new(MySqlDialect::new()),
        }
    }

    /// Create a new parser with PostgreSQL dialect
    pub fn postgres() -> Self {
        Self {
            dialect: Box::new(PostgresDialect::new()),
        }
    }

    /// Create a new parser with the generic dialect
    pub fn generic() -> Self {
        Self {
            dialect: Box::new(GenericDialect::new()),
        }
    }

    /// Create a parser from dialect name
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        match name.to_lowercase().as_str() {
            "mysql" => Ok(Self::mysql()),
            "postgres" | "postgresql" => Ok(Self::postgres()),
            "generic" => Ok(Self::generic()),
            _ => Err(SqlError::UnknownDialect(name.to_string())),
        }
    }

    /// Parse a batch, keeping one result per statement.
    ///
    /// Fails as a whole on empty input, on a tokenizer error, or when the
    /// text holds no statement at all.
    pub fn parse_batch(&self, sql: &str) -> SqlResult<Vec<SqlResult<Statement>>> {
        if sql.trim().is_empty() {
            return Err(SqlError::EmptyInput);
        }

        let statements = self.dialect.parse_each(sql)?;
        if statements.is_empty() {
            return Err(SqlError::NoStatements);
        }
        Ok(statements)
    }

    /// Get the dialect name
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::mysql()
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
