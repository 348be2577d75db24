//! Query bodies: SELECT, set operations, FROM and JOIN, ORDER BY, LIMIT.

use sqlparser::ast::{
    Cte, GroupByExpr, Join, JoinConstraint, JoinOperator, LimitClause, OrderBy, OrderByExpr,
    OrderByKind, Query, Select, SelectFlavor, SelectItem, SelectItemQualifiedWildcardKind,
    SetExpr, TableAlias, TableFactor, TableWithJoins, Values, With,
};

use super::{Canonicalizer, RawName, Scope};

impl Canonicalizer<'_> {
    /// Literals inside a query never inherit the aggregate scope of an
    /// enclosing expression.
    pub(super) fn query(&mut self, query: &Query) {
        if query.settings.is_some()
            || query.for_clause.is_some()
            || query.format_clause.is_some()
            || !query.pipe_operators.is_empty()
        {
            return self.unhandled("Query", query);
        }

        let visible_ctes = self.state.ctes.len();
        if let Some(with) = &query.with {
            self.with(with);
        }
        self.set_expr(&query.body);
        if let Some(order_by) = &query.order_by {
            self.order_by(order_by);
        }
        if let Some(limit) = &query.limit_clause {
            self.limit_clause(limit);
        }
        if let Some(fetch) = &query.fetch {
            self.write(" ");
            self.opaque(fetch);
        }
        for lock in &query.locks {
            self.write(&format!(" {lock}"));
        }
        self.state.ctes.truncate(visible_ctes);
    }

    fn with(&mut self, with: &With) {
        self.write("WITH ");
        if with.recursive {
            self.write("RECURSIVE ");
        }
        for (i, cte) in with.cte_tables.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.cte(cte, with.recursive);
        }
        self.write(" ");
    }

    fn cte(&mut self, cte: &Cte, recursive: bool) {
        let name = cte.alias.name.value.clone();
        if cte.alias.columns.is_empty() {
            self.write(&name);
        } else {
            self.write(&cte.alias.to_string());
        }
        self.write(" AS ");
        if let Some(materialized) = &cte.materialized {
            self.write(&format!("{materialized} "));
        }
        if recursive {
            self.state.ctes.push(name.clone());
        }
        self.write("(");
        self.query(&cte.query);
        self.write(")");
        if !recursive {
            self.state.ctes.push(name);
        }
    }

    pub(super) fn set_expr(&mut self, body: &SetExpr) {
        match body {
            SetExpr::Select(select) => self.select(select),
            SetExpr::Query(query) => {
                self.write("(");
                self.query(query);
                self.write(")");
            }
            SetExpr::SetOperation {
                op,
                set_quantifier,
                left,
                right,
            } => {
                self.set_expr(left);
                self.write(&format!(" {op}"));
                let quantifier = set_quantifier.to_string();
                if !quantifier.is_empty() {
                    self.write(&format!(" {quantifier}"));
                }
                self.write(" ");
                self.set_expr(right);
            }
            SetExpr::Values(values) => self.values(values),
            other => self.unhandled("SetExpr", other),
        }
    }

    fn select(&mut self, select: &Select) {
        if select.top.is_some()
            || select.into.is_some()
            || select.prewhere.is_some()
            || select.qualify.is_some()
            || !select.lateral_views.is_empty()
            || !select.named_window.is_empty()
            || !select.cluster_by.is_empty()
            || !select.distribute_by.is_empty()
            || !select.sort_by.is_empty()
            || !select.connect_by.is_empty()
            || select.exclude.is_some()
            || select.value_table_mode.is_some()
            || !matches!(select.flavor, SelectFlavor::Standard)
        {
            return self.unhandled("Select", select);
        }

        let scope = Scope::default();
        self.write("SELECT ");
        match &select.distinct {
            None => {}
            Some(sqlparser::ast::Distinct::On(exprs)) => {
                self.write("DISTINCT ON (");
                self.list(exprs, |this, e| this.expr(e, scope));
                self.write(") ");
            }
            Some(distinct) => self.write(&format!("{distinct} ")),
        }
        if let Some(modifiers) = &select.select_modifiers {
            let modifiers = modifiers.to_string();
            if !modifiers.is_empty() {
                self.write(modifiers.trim_start());
                self.write(" ");
            }
        }
        self.list(&select.projection, |this, item| this.select_item(item, scope));

        if !select.from.is_empty() {
            self.write(" FROM ");
            self.from_list(&select.from);
        }
        if let Some(selection) = &select.selection {
            self.write(" WHERE ");
            self.expr(selection, scope);
        }
        self.group_by(&select.group_by);
        if let Some(having) = &select.having {
            self.write(" HAVING ");
            self.expr(having, scope);
        }
    }

    fn select_item(&mut self, item: &SelectItem, scope: Scope) {
        match item {
            SelectItem::UnnamedExpr(expr) => self.expr(expr, scope),
            SelectItem::ExprWithAlias { expr, alias } => {
                self.expr(expr, scope);
                self.write(" AS ");
                self.write(&alias.value);
            }
            SelectItem::QualifiedWildcard(SelectItemQualifiedWildcardKind::ObjectName(name), _) => {
                self.write(&name.raw());
                self.write(".*");
            }
            SelectItem::Wildcard(_) => self.write("*"),
            other => self.unhandled("SelectItem", other),
        }
    }

    fn group_by(&mut self, group_by: &GroupByExpr) {
        if let GroupByExpr::Expressions(exprs, modifiers) = group_by {
            if !exprs.is_empty() {
                self.write(" GROUP BY ");
                self.list(exprs, |this, e| this.expr(e, Scope::default()));
            }
            for modifier in modifiers {
                self.write(&format!(" {modifier}"));
            }
        } else {
            self.write(" ");
            self.opaque(group_by);
        }
    }

    /// Comma-separated FROM items collapse into cross joins
    pub(super) fn from_list(&mut self, from: &[TableWithJoins]) {
        for (i, table) in from.iter().enumerate() {
            if i > 0 {
                self.write(" CROSS JOIN ");
            }
            self.table_with_joins(table);
        }
    }

    pub(super) fn table_with_joins(&mut self, table: &TableWithJoins) {
        self.table_factor(&table.relation);
        for join in &table.joins {
            self.join(join);
        }
    }

    fn join(&mut self, join: &Join) {
        let Some(constraint) = join_constraint(&join.join_operator).filter(|_| !join.global)
        else {
            self.write(" ");
            return self.unhandled("Join", join);
        };
        // Only declared LEFT/RIGHT joins keep their keyword; every other
        // join shape groups under CROSS JOIN.
        let keyword = match &join.join_operator {
            JoinOperator::Left(_) | JoinOperator::LeftOuter(_) => "LEFT JOIN",
            JoinOperator::Right(_) | JoinOperator::RightOuter(_) => "RIGHT JOIN",
            _ => "CROSS JOIN",
        };
        if matches!(constraint, JoinConstraint::Natural) {
            self.write(" NATURAL ");
        } else {
            self.write(" ");
        }
        self.write(keyword);
        self.write(" ");
        self.table_factor(&join.relation);

        match constraint {
            JoinConstraint::On(expr) => {
                self.write(" ON ");
                self.expr(expr, Scope::default());
            }
            JoinConstraint::Using(columns) => {
                let columns: Vec<String> = columns.iter().map(RawName::raw).collect();
                self.write(&format!(" USING ({})", columns.join(", ")));
            }
            JoinConstraint::Natural | JoinConstraint::None => {}
        }
    }

    fn table_factor(&mut self, factor: &TableFactor) {
        match factor {
            TableFactor::Table {
                name,
                alias,
                args,
                with_hints,
                partitions,
                index_hints,
                ..
            } if args.is_none()
                && with_hints.is_empty()
                && partitions.is_empty()
                && index_hints.is_empty() =>
            {
                self.table_name(name);
                self.table_alias(alias.as_ref());
            }
            TableFactor::Derived {
                lateral,
                subquery,
                alias,
                ..
            } => {
                if *lateral {
                    self.write("LATERAL ");
                }
                self.write("(");
                self.query(subquery);
                self.write(")");
                self.table_alias(alias.as_ref());
            }
            TableFactor::NestedJoin {
                table_with_joins,
                alias,
                ..
            } => {
                self.write("(");
                self.table_with_joins(table_with_joins);
                self.write(")");
                self.table_alias(alias.as_ref());
            }
            other => self.unhandled("TableFactor", other),
        }
    }

    fn table_alias(&mut self, alias: Option<&TableAlias>) {
        let Some(alias) = alias else {
            return;
        };
        self.write(" AS ");
        if alias.columns.is_empty() {
            self.write(&alias.name.value);
        } else {
            self.write(&alias.to_string());
        }
    }

    fn order_by(&mut self, order_by: &OrderBy) {
        match &order_by.kind {
            OrderByKind::Expressions(exprs) => self.order_by_exprs(exprs),
            _ => {
                self.write(" ");
                self.unhandled("OrderBy", order_by);
            }
        }
    }

    /// ` ORDER BY a, b DESC`; ascending is the implied default and dropped
    pub(super) fn order_by_exprs(&mut self, exprs: &[OrderByExpr]) {
        if exprs.is_empty() {
            return;
        }
        self.write(" ORDER BY ");
        self.list(exprs, |this, item| {
            this.expr(&item.expr, Scope::default());
            if item.options.asc == Some(false) {
                this.write(" DESC");
            }
            match item.options.nulls_first {
                Some(true) => this.write(" NULLS FIRST"),
                Some(false) => this.write(" NULLS LAST"),
                None => {}
            }
        });
    }

    /// Both `LIMIT n OFFSET m` and `LIMIT m, n` become `LIMIT ?, ?` with the
    /// offset recorded first.
    fn limit_clause(&mut self, limit: &LimitClause) {
        let scope = Scope::default();
        match limit {
            LimitClause::LimitOffset {
                limit,
                offset,
                limit_by,
            } => {
                match (limit, offset) {
                    (Some(limit), Some(offset)) => {
                        self.write(" LIMIT ");
                        self.expr(&offset.value, scope);
                        self.write(", ");
                        self.expr(limit, scope);
                    }
                    (Some(limit), None) => {
                        self.write(" LIMIT ");
                        self.expr(limit, scope);
                    }
                    (None, Some(offset)) => {
                        self.write(" OFFSET ");
                        self.expr(&offset.value, scope);
                    }
                    (None, None) => {}
                }
                if !limit_by.is_empty() {
                    self.write(" BY ");
                    self.list(limit_by, |this, e| this.expr(e, scope));
                }
            }
            LimitClause::OffsetCommaLimit { offset, limit } => {
                self.write(" LIMIT ");
                self.expr(offset, scope);
                self.write(", ");
                self.expr(limit, scope);
            }
        }
    }

    /// `VALUES (?, ?), (?, ?)`
    fn values(&mut self, values: &Values) {
        self.write("VALUES ");
        let row_prefix = if values.explicit_row { "ROW(" } else { "(" };
        for (i, row) in values.rows.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(row_prefix);
            self.list(row, |this, e| this.expr(e, Scope::default()));
            self.write(")");
        }
    }
}

/// The constraint of a join that has a rule; `None` routes the join to the
/// fallback.
fn join_constraint(operator: &JoinOperator) -> Option<&JoinConstraint> {
    match operator {
        JoinOperator::Join(c)
        | JoinOperator::Inner(c)
        | JoinOperator::Left(c)
        | JoinOperator::LeftOuter(c)
        | JoinOperator::Right(c)
        | JoinOperator::RightOuter(c)
        | JoinOperator::FullOuter(c)
        | JoinOperator::CrossJoin(c)
        | JoinOperator::StraightJoin(c)
        | JoinOperator::Semi(c)
        | JoinOperator::LeftSemi(c)
        | JoinOperator::RightSemi(c)
        | JoinOperator::Anti(c)
        | JoinOperator::LeftAnti(c)
        | JoinOperator::RightAnti(c) => Some(c),
        JoinOperator::AsOf { .. } | JoinOperator::CrossApply | JoinOperator::OuterApply => None,
    }
}
