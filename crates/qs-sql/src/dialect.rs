//! SQL dialect abstraction

use sqlparser::ast::Statement;
use sqlparser::dialect::{
    Dialect, GenericDialect as SqlParserGeneric, MySqlDialect as SqlParserMySql,
    PostgreSqlDialect as SqlParserPostgres,
};
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, TokenWithSpan, Tokenizer};

use crate::error::{SqlError, SqlResult};

/// Trait for SQL dialect implementations
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn parser_dialect(&self) -> &dyn Dialect;

    /// Parse each `;`-delimited statement on its own.
    ///
    /// The whole text is tokenized once so that `;` inside strings, quoted
    /// identifiers and comments never splits a statement. A tokenizer failure
    /// is returned as the outer error; a parse failure only poisons the
    /// statement it belongs to.
    fn parse_each(&self, sql: &str) -> SqlResult<Vec<SqlResult<Statement>>> {
        let tokens = Tokenizer::new(self.parser_dialect(), sql)
            .tokenize_with_location()
            .map_err(|e| parse_error(e.to_string()))?;

        let mut results = Vec::new();
        for chunk in split_statements(tokens) {
            let parsed = Parser::new(self.parser_dialect())
                .with_tokens_with_locations(chunk)
                .parse_statements()
                .map_err(|e| parse_error(e.to_string()));
            match parsed {
                Ok(statements) => results.extend(statements.into_iter().map(Ok)),
                Err(e) => results.push(Err(e)),
            }
        }
        Ok(results)
    }

    /// Get the dialect name
    fn name(&self) -> &'static str;
}

/// Split a token stream at top-level semicolons, dropping chunks that hold
/// nothing but whitespace and comments.
fn split_statements(tokens: Vec<TokenWithSpan>) -> Vec<Vec<TokenWithSpan>> {
    let mut chunks = Vec::new();
    let mut current: Vec<TokenWithSpan> = Vec::new();
    for token in tokens {
        if token.token == Token::SemiColon {
            if has_content(&current) {
                chunks.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        } else {
            current.push(token);
        }
    }
    if has_content(&current) {
        chunks.push(current);
    }
    chunks
}

fn has_content(tokens: &[TokenWithSpan]) -> bool {
    tokens
        .iter()
        .any(|t| !matches!(t.token, Token::Whitespace(_) | Token::EOF))
}

fn parse_error(message: String) -> SqlError {
    let (line, column) = parse_location_from_error(&message);
    SqlError::ParseError {
        message,
        line,
        column,
    }
}

/// Parse line and column from a sqlparser error message.
///
/// `ParserError` and `TokenizerError` render their location only as text,
/// so "Line: N, Column: M" is read back from the message.
fn parse_location_from_error(msg: &str) -> (usize, usize) {
    let Some(line_idx) = msg.find("Line: ") else {
        return (0, 0);
    };
    let line_start = line_idx + 6;
    let Some(comma_idx) = msg[line_start..].find(',') else {
        return (0, 0);
    };
    let Ok(line) = msg[line_start..line_start + comma_idx]
        .trim()
        .parse::<usize>()
    else {
        return (0, 0);
    };
    let Some(col_idx) = msg.find("Column: ") else {
        return (0, 0);
    };
    let col_start = col_idx + 8;
    let col_end = msg[col_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| col_start + i)
        .unwrap_or(msg.len());
    let Ok(column) = msg[col_start..col_end].trim().parse::<usize>() else {
        return (0, 0);
    };
    (line, column)
}

/// MySQL SQL dialect
pub struct MySqlDialect {
    dialect: SqlParserMySql,
}

impl MySqlDialect {
    /// Create a new MySQL dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserMySql {},
        }
    }
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for MySqlDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "mysql"
    }
}

/// PostgreSQL SQL dialect
pub struct PostgresDialect {
    dialect: SqlParserPostgres,
}

impl PostgresDialect {
    /// Create a new PostgreSQL dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserPostgres {},
        }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for PostgresDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

/// Generic SQL dialect
pub struct GenericDialect {
    dialect: SqlParserGeneric,
}

impl GenericDialect {
    /// Create a new generic dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserGeneric {},
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for GenericDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
