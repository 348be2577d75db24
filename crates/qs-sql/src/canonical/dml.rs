//! INSERT, REPLACE, UPDATE and DELETE.

use sqlparser::ast::{
    Assignment, AssignmentTarget, Delete, FromTable, Insert, OnInsert, TableFactor,
    TableObject, TableWithJoins, Update, UpdateTableFromKind,
};

use super::{name_parts, Canonicalizer, RawName, Scope};

impl Canonicalizer<'_> {
    pub(super) fn insert(&mut self, insert: &Insert) {
        let TableObject::TableName(table) = &insert.table else {
            return self.unhandled("Insert", insert);
        };
        if insert.or.is_some()
            || insert.overwrite
            || insert.partitioned.is_some()
            || insert.returning.is_some()
            || insert.settings.is_some()
            || insert.format_clause.is_some()
            || !insert.after_columns.is_empty()
            || (insert.source.is_none() && insert.assignments.is_empty())
        {
            return self.unhandled("Insert", insert);
        }

        self.write(if insert.replace_into {
            "REPLACE "
        } else {
            "INSERT "
        });
        if let Some(priority) = &insert.priority {
            self.write(&format!("{priority} "));
        }
        if insert.ignore {
            self.write("IGNORE ");
        }
        self.write("INTO ");
        self.table_name(table);
        if let Some(alias) = &insert.table_alias {
            self.write(" AS ");
            self.write(&alias.raw());
        }
        if !insert.columns.is_empty() {
            let columns: Vec<String> = insert.columns.iter().map(RawName::raw).collect();
            self.write(&format!(" ({})", columns.join(", ")));
        }
        if let Some(source) = &insert.source {
            self.write(" ");
            self.query(source);
        }
        if !insert.assignments.is_empty() {
            self.write(" SET ");
            self.assignments(&insert.assignments);
        }
        if let Some(alias) = &insert.insert_alias {
            self.write(" AS ");
            self.write(&alias.row_alias.raw());
            if let Some(columns) = alias.col_aliases.as_ref().filter(|c| !c.is_empty()) {
                let columns: Vec<String> = columns.iter().map(RawName::raw).collect();
                self.write(&format!(" ({})", columns.join(", ")));
            }
        }
        match &insert.on {
            Some(OnInsert::DuplicateKeyUpdate(assignments)) => {
                self.write(" ON DUPLICATE KEY UPDATE ");
                self.assignments(assignments);
            }
            Some(other) => {
                self.write(" ");
                self.opaque(other);
            }
            None => {}
        }
    }

    pub(super) fn update(&mut self, update: &Update) {
        if update.or.is_some() || update.returning.is_some() {
            return self.unhandled("Update", update);
        }

        self.write("UPDATE ");
        self.table_with_joins(&update.table);
        if let Some(UpdateTableFromKind::BeforeSet(from)) = &update.from {
            self.write(" FROM ");
            self.from_list(from);
        }
        self.write(" SET ");
        self.assignments(&update.assignments);
        if let Some(UpdateTableFromKind::AfterSet(from)) = &update.from {
            self.write(" FROM ");
            self.from_list(from);
        }
        if let Some(selection) = &update.selection {
            self.write(" WHERE ");
            self.expr(selection, Scope::default());
        }
        if let Some(limit) = &update.limit {
            self.write(" LIMIT ");
            self.expr(limit, Scope::default());
        }
    }

    /// Targets that name an alias of the FROM clause are written but not
    /// recorded; they are not tables of their own.
    pub(super) fn delete(&mut self, delete: &Delete) {
        if delete.returning.is_some() {
            return self.unhandled("Delete", delete);
        }
        let from = match &delete.from {
            FromTable::WithFromKeyword(from) | FromTable::WithoutKeyword(from) => from,
        };

        self.write("DELETE ");
        if !delete.tables.is_empty() {
            let aliases = table_aliases(from);
            for (i, target) in delete.tables.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                match name_parts(target).as_slice() {
                    [single] if aliases.contains(single) => self.write(single),
                    _ => self.table_name(target),
                }
            }
            self.write(" ");
        }
        self.write("FROM ");
        self.from_list(from);
        if let Some(using) = &delete.using {
            self.write(" USING ");
            self.from_list(using);
        }
        if let Some(selection) = &delete.selection {
            self.write(" WHERE ");
            self.expr(selection, Scope::default());
        }
        self.order_by_exprs(&delete.order_by);
        if let Some(limit) = &delete.limit {
            self.write(" LIMIT ");
            self.expr(limit, Scope::default());
        }
    }

    /// `a eq ?, b eq ?`
    fn assignments(&mut self, assignments: &[Assignment]) {
        self.list(assignments, |this, assignment| {
            match &assignment.target {
                AssignmentTarget::ColumnName(column) => this.write(&column.raw()),
                AssignmentTarget::Tuple(columns) => {
                    let columns: Vec<String> = columns.iter().map(RawName::raw).collect();
                    this.write(&format!("({})", columns.join(", ")));
                }
            }
            this.write(" eq ");
            this.expr(&assignment.value, Scope::default());
        });
    }
}

fn table_aliases(from: &[TableWithJoins]) -> Vec<String> {
    from.iter()
        .flat_map(|table| {
            std::iter::once(&table.relation).chain(table.joins.iter().map(|join| &join.relation))
        })
        .filter_map(|factor| match factor {
            TableFactor::Table {
                alias: Some(alias), ..
            } => Some(alias.name.value.clone()),
            _ => None,
        })
        .collect()
}
