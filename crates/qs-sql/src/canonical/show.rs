//! SHOW statements.
//!
//! Names after FROM, IN and CREATE are written raw and never recorded as
//! table references.

use sqlparser::ast::{
    Ident, ShowStatementFilter, ShowStatementFilterPosition, ShowStatementOptions, Statement,
};

use super::{Canonicalizer, RawName, Scope};
use crate::param::Param;

impl Canonicalizer<'_> {
    pub(super) fn show(&mut self, statement: &Statement) {
        if !has_show_rule(statement) {
            return self.unhandled("Statement", statement);
        }

        match statement {
            Statement::ShowTables {
                full, show_options, ..
            } => {
                self.write(if *full { "SHOW FULL TABLES" } else { "SHOW TABLES" });
                self.show_options(show_options);
            }
            Statement::ShowDatabases { show_options, .. } => {
                self.write("SHOW DATABASES");
                self.show_options(show_options);
            }
            Statement::ShowSchemas { show_options, .. } => {
                self.write("SHOW SCHEMAS");
                self.show_options(show_options);
            }
            Statement::ShowViews { show_options, .. } => {
                self.write("SHOW VIEWS");
                self.show_options(show_options);
            }
            Statement::ShowColumns {
                full, show_options, ..
            } => {
                self.write(if *full {
                    "SHOW FULL COLUMNS"
                } else {
                    "SHOW COLUMNS"
                });
                self.show_options(show_options);
            }
            Statement::ShowVariables {
                filter,
                global,
                session,
            } => {
                self.write("SHOW ");
                self.write(scope_keyword(*global, *session));
                self.write("VARIABLES");
                self.show_filter(filter.as_ref());
            }
            Statement::ShowStatus {
                filter,
                global,
                session,
            } => {
                self.write("SHOW ");
                self.write(scope_keyword(*global, *session));
                self.write("STATUS");
                self.show_filter(filter.as_ref());
            }
            Statement::ShowCollation { filter } => {
                self.write("SHOW COLLATION");
                self.show_filter(filter.as_ref());
            }
            Statement::ShowFunctions { filter } => {
                self.write("SHOW FUNCTIONS");
                self.show_filter(filter.as_ref());
            }
            Statement::ShowCharset(charset) => {
                self.write(if charset.is_shorthand {
                    "SHOW CHARSET"
                } else {
                    "SHOW CHARACTER SET"
                });
                self.show_filter(charset.filter.as_ref());
            }
            Statement::ShowCreate { obj_type, obj_name } => {
                self.write(&format!("SHOW CREATE {obj_type} {}", obj_name.raw()));
            }
            Statement::ShowVariable { variable } => match show_words(variable) {
                Some(text) => self.write(&text),
                None => self.unhandled("Statement", statement),
            },
            other => self.unhandled("Statement", other),
        }
    }

    fn show_options(&mut self, options: &ShowStatementOptions) {
        if let Some(show_in) = &options.show_in {
            self.write(&format!(" {}", show_in.clause));
            if let Some(parent_type) = &show_in.parent_type {
                self.write(&format!(" {parent_type}"));
            }
            if let Some(parent) = &show_in.parent_name {
                self.write(" ");
                self.write(&parent.raw());
            }
        }
        match &options.filter_position {
            Some(ShowStatementFilterPosition::Infix(filter))
            | Some(ShowStatementFilterPosition::Suffix(filter)) => self.show_filter(Some(filter)),
            None => {}
        }
    }

    fn show_filter(&mut self, filter: Option<&ShowStatementFilter>) {
        match filter {
            Some(ShowStatementFilter::Like(pattern)) => {
                self.write(" LIKE ");
                self.placeholder(Param::Str(pattern.clone()));
            }
            Some(ShowStatementFilter::ILike(pattern)) => {
                self.write(" ILIKE ");
                self.placeholder(Param::Str(pattern.clone()));
            }
            Some(ShowStatementFilter::Where(expr)) => {
                self.write(" WHERE ");
                self.expr(expr, Scope::default());
            }
            Some(ShowStatementFilter::NoKeyword(pattern)) => {
                self.write(" ");
                self.placeholder(Param::Str(pattern.clone()));
            }
            None => {}
        }
    }
}

/// Whether every part of a SHOW statement is covered by a rule. Flags and
/// options without one send the whole statement to the fallback.
fn has_show_rule(statement: &Statement) -> bool {
    let plain = |options: &ShowStatementOptions| {
        options.starts_with.is_none() && options.limit.is_none() && options.limit_from.is_none()
    };
    match statement {
        Statement::ShowTables {
            terse,
            history,
            extended,
            external,
            show_options,
            ..
        } => !terse && !history && !extended && !external && plain(show_options),
        Statement::ShowDatabases {
            terse,
            history,
            show_options,
        }
        | Statement::ShowSchemas {
            terse,
            history,
            show_options,
        } => !terse && !history && plain(show_options),
        Statement::ShowViews {
            terse,
            materialized,
            show_options,
        } => !terse && !materialized && plain(show_options),
        Statement::ShowColumns {
            extended,
            show_options,
            ..
        } => !extended && plain(show_options),
        Statement::ShowObjects(_) => false,
        _ => true,
    }
}

/// Render SHOW forms that reach the front end as a bare word list.
///
/// The front end keeps only the words of these statements and skips every
/// other token, so a form is rendered only when its words alone describe it:
/// `SHOW WARNINGS`, `SHOW ERRORS`, `SHOW PROCESSLIST`,
/// `SHOW INDEX FROM [db.]t` and `SHOW TABLE STATUS [FROM db]`. Anything else
/// (a LIMIT count, a LIKE pattern) lost part of its text and gets no rule.
fn show_words(words: &[Ident]) -> Option<String> {
    let upper: Vec<String> = words.iter().map(|w| w.value.to_uppercase()).collect();
    let upper: Vec<&str> = upper.iter().map(String::as_str).collect();
    match upper.as_slice() {
        [keyword @ ("WARNINGS" | "ERRORS" | "PROCESSLIST")] => Some(format!("SHOW {keyword}")),
        ["INDEX" | "INDEXES" | "KEYS", "FROM" | "IN", ..] => {
            index_target(&words[2..]).map(|name| format!("SHOW INDEX FROM {name}"))
        }
        ["TABLE", "STATUS"] => Some("SHOW TABLE STATUS".to_string()),
        ["TABLE", "STATUS", "FROM" | "IN", _] => {
            Some(format!("SHOW TABLE STATUS FROM {}", words[3].value))
        }
        _ => None,
    }
}

/// `t`, `db.t` (read as two words) or `t FROM db`
fn index_target(words: &[Ident]) -> Option<String> {
    match words {
        [table] => Some(table.value.clone()),
        [schema, table] => Some(format!("{}.{}", schema.value, table.value)),
        [table, keyword, schema]
            if matches!(keyword.value.to_uppercase().as_str(), "FROM" | "IN") =>
        {
            Some(format!("{}.{}", schema.value, table.value))
        }
        _ => None,
    }
}

fn scope_keyword(global: bool, session: bool) -> &'static str {
    if global {
        "GLOBAL "
    } else if session {
        "SESSION "
    } else {
        ""
    }
}
