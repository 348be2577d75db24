//! Expressions, operators and function calls.

use std::borrow::Cow;

use sqlparser::ast::{
    BinaryOperator, CastKind, CeilFloorKind, DateTimeField, Expr, Function, FunctionArg,
    FunctionArgExpr, FunctionArgumentClause, FunctionArguments, Interval, Query, UnaryOperator,
    Value,
};

use super::{Canonicalizer, RawName, Scope};
use crate::param::Param;

/// Aggregate functions whose literal arguments stay in the template
const AGGREGATES: &[&str] = &[
    "COUNT",
    "SUM",
    "AVG",
    "MAX",
    "MIN",
    "GROUP_CONCAT",
    "ANY_VALUE",
    "BIT_AND",
    "BIT_OR",
    "BIT_XOR",
    "STD",
    "STDDEV",
    "STDDEV_POP",
    "STDDEV_SAMP",
    "VARIANCE",
    "VAR_POP",
    "VAR_SAMP",
    "JSON_ARRAYAGG",
    "JSON_OBJECTAGG",
    "APPROX_COUNT_DISTINCT",
    "ARRAY_AGG",
    "STRING_AGG",
    "BOOL_AND",
    "BOOL_OR",
];

impl Canonicalizer<'_> {
    pub(super) fn expr(&mut self, expr: &Expr, scope: Scope) {
        match expr {
            Expr::Identifier(ident) => self.write(&ident.raw()),
            Expr::CompoundIdentifier(idents) => {
                let parts: Vec<String> = idents.iter().map(RawName::raw).collect();
                self.write(&parts.join("."));
            }
            Expr::Value(value) => self.literal(&value.value, scope),
            Expr::Nested(inner) => {
                self.write("(");
                self.expr(inner, scope);
                self.write(")");
            }
            Expr::BinaryOp { left, op, right } => {
                self.expr(left, scope);
                self.write(" ");
                self.write(&binary_token(op));
                self.write(" ");
                self.expr(right, scope);
            }
            Expr::UnaryOp { op, expr: operand } => {
                self.write(&unary_token(op));
                self.write(" ");
                self.expr(operand, scope);
            }
            Expr::IsNull(e) => self.postfix(e, "IS NULL", scope),
            Expr::IsNotNull(e) => self.postfix(e, "IS NOT NULL", scope),
            Expr::IsTrue(e) => self.postfix(e, "IS TRUE", scope),
            Expr::IsNotTrue(e) => self.postfix(e, "IS NOT TRUE", scope),
            Expr::IsFalse(e) => self.postfix(e, "IS FALSE", scope),
            Expr::IsNotFalse(e) => self.postfix(e, "IS NOT FALSE", scope),
            Expr::IsUnknown(e) => self.postfix(e, "IS UNKNOWN", scope),
            Expr::IsNotUnknown(e) => self.postfix(e, "IS NOT UNKNOWN", scope),
            Expr::IsDistinctFrom(a, b) => self.infix(a, "IS DISTINCT FROM", b, scope),
            Expr::IsNotDistinctFrom(a, b) => self.infix(a, "IS NOT DISTINCT FROM", b, scope),
            Expr::InList {
                expr: needle,
                list,
                negated,
            } => {
                self.expr(needle, scope);
                self.write(not(*negated, " NOT IN (", " IN ("));
                self.list(list, |this, item| this.expr(item, scope));
                self.write(")");
            }
            Expr::InSubquery {
                expr: needle,
                subquery,
                negated,
            } => {
                self.expr(needle, scope);
                self.write(not(*negated, " NOT IN (", " IN ("));
                self.subquery(subquery);
                self.write(")");
            }
            Expr::Between {
                expr: value,
                negated,
                low,
                high,
            } => {
                self.expr(value, scope);
                self.write(not(*negated, " NOT BETWEEN ", " BETWEEN "));
                self.expr(low, scope);
                self.write(" AND ");
                self.expr(high, scope);
            }
            Expr::Like {
                negated,
                any: false,
                expr: value,
                pattern,
                escape_char: None,
            } => self.pattern_match(value, *negated, "LIKE", pattern, scope),
            Expr::ILike {
                negated,
                any: false,
                expr: value,
                pattern,
                escape_char: None,
            } => self.pattern_match(value, *negated, "ILIKE", pattern, scope),
            Expr::RLike {
                negated,
                expr: value,
                pattern,
                ..
            } => self.pattern_match(value, *negated, "REGEXP", pattern, scope),
            Expr::Exists { subquery, negated } => {
                self.write(not(*negated, "NOT EXISTS (", "EXISTS ("));
                self.subquery(subquery);
                self.write(")");
            }
            Expr::Subquery(subquery) => self.subquery(subquery),
            Expr::AnyOp {
                left,
                compare_op,
                right,
                ..
            } => self.quantified(left, compare_op, "ANY", right, scope),
            Expr::AllOp {
                left,
                compare_op,
                right,
            } => self.quantified(left, compare_op, "ALL", right, scope),
            Expr::Case {
                operand,
                conditions,
                else_result,
                ..
            } => {
                self.write("CASE");
                if let Some(operand) = operand {
                    self.write(" ");
                    self.expr(operand, scope);
                }
                for when in conditions {
                    self.write(" WHEN ");
                    self.expr(&when.condition, scope);
                    self.write(" THEN ");
                    self.expr(&when.result, scope);
                }
                if let Some(else_result) = else_result {
                    self.write(" ELSE ");
                    self.expr(else_result, scope);
                }
                self.write(" END");
            }
            Expr::Function(function) => self.function(function, scope),
            Expr::Interval(interval) => self.interval(interval, scope),
            Expr::Cast {
                kind,
                expr: value,
                data_type,
                array: false,
                format: None,
            } => match kind {
                CastKind::DoubleColon => {
                    self.expr(value, scope);
                    self.write(&format!("::{data_type}"));
                }
                _ => {
                    let keyword = match kind {
                        CastKind::TryCast => "TRY_CAST",
                        CastKind::SafeCast => "SAFE_CAST",
                        _ => "CAST",
                    };
                    self.write(keyword);
                    self.write("(");
                    self.expr(value, scope);
                    self.write(&format!(" AS {data_type})"));
                }
            },
            Expr::Collate {
                expr: value,
                collation,
            } => {
                self.expr(value, scope);
                self.write(" COLLATE ");
                self.write(&collation.raw());
            }
            Expr::Tuple(items) => {
                self.write("(");
                self.list(items, |this, item| this.expr(item, scope));
                self.write(")");
            }
            Expr::Extract {
                field, expr: value, ..
            } => {
                self.write(&format!("EXTRACT({field} FROM "));
                self.expr(value, scope);
                self.write(")");
            }
            Expr::Substring {
                expr: value,
                substring_from,
                substring_for,
                ..
            } => {
                self.write("SUBSTRING(");
                self.expr(value, scope);
                for bound in [substring_from, substring_for].into_iter().flatten() {
                    self.write(", ");
                    self.expr(bound, scope);
                }
                self.write(")");
            }
            Expr::Position { expr: needle, r#in } => {
                self.write("POSITION(");
                self.expr(needle, scope);
                self.write(" IN ");
                self.expr(r#in, scope);
                self.write(")");
            }
            Expr::Ceil {
                expr: value,
                field: CeilFloorKind::DateTimeField(DateTimeField::NoDateTime),
            } => self.call("CEIL", value, scope),
            Expr::Floor {
                expr: value,
                field: CeilFloorKind::DateTimeField(DateTimeField::NoDateTime),
            } => self.call("FLOOR", value, scope),
            other => self.unhandled("Expr", other),
        }
    }

    /// Placeholder and record, or verbatim inside an aggregate.
    ///
    /// Placeholders already present in the input are always re-emitted as a
    /// placeholder so every `?` in a template has exactly one param.
    fn literal(&mut self, value: &Value, scope: Scope) {
        match value {
            Value::Placeholder(marker) => self.placeholder(Param::Marker(marker.clone())),
            _ if scope.in_aggregate => self.write(&value.to_string()),
            _ => self.placeholder(Param::from_value(value)),
        }
    }

    fn postfix(&mut self, operand: &Expr, keyword: &str, scope: Scope) {
        self.expr(operand, scope);
        self.write(" ");
        self.write(keyword);
    }

    fn infix(&mut self, left: &Expr, keyword: &str, right: &Expr, scope: Scope) {
        self.expr(left, scope);
        self.write(" ");
        self.write(keyword);
        self.write(" ");
        self.expr(right, scope);
    }

    fn call(&mut self, name: &str, arg: &Expr, scope: Scope) {
        self.write(name);
        self.write("(");
        self.expr(arg, scope);
        self.write(")");
    }

    fn pattern_match(
        &mut self,
        value: &Expr,
        negated: bool,
        keyword: &str,
        pattern: &Expr,
        scope: Scope,
    ) {
        self.expr(value, scope);
        self.write(if negated { " NOT " } else { " " });
        self.write(keyword);
        self.write(" ");
        self.expr(pattern, scope);
    }

    /// `left op ANY(right)`; a subquery on the right renders as `ANY((...))`
    fn quantified(
        &mut self,
        left: &Expr,
        op: &BinaryOperator,
        quantifier: &str,
        right: &Expr,
        scope: Scope,
    ) {
        self.expr(left, scope);
        self.write(&format!(" {} {quantifier}(", binary_token(op)));
        self.expr(right, scope);
        self.write(")");
    }

    /// `(<query>)`; literals inside never inherit aggregate scope
    fn subquery(&mut self, query: &Query) {
        self.write("(");
        self.query(query);
        self.write(")");
    }

    /// `INTERVAL ? UNIT`, placeholded even inside aggregate arguments
    fn interval(&mut self, interval: &Interval, scope: Scope) {
        self.write("INTERVAL ");
        match interval.value.as_ref() {
            Expr::Value(value) => match &value.value {
                Value::Placeholder(marker) => self.placeholder(Param::Marker(marker.clone())),
                other => self.placeholder(Param::from_value(other)),
            },
            other => self.expr(other, scope),
        }
        if let Some(unit) = &interval.leading_field {
            self.write(&format!(" {unit}"));
        }
        if let Some(last) = &interval.last_field {
            self.write(&format!(" TO {last}"));
        }
    }

    fn function(&mut self, function: &Function, scope: Scope) {
        if !matches!(function.parameters, FunctionArguments::None)
            || function.null_treatment.is_some()
            || !function.within_group.is_empty()
        {
            return self.unhandled("Function", function);
        }

        let aggregate = is_aggregate(&function.name.raw());
        let arg_scope = if aggregate { scope.aggregate() } else { scope };

        self.write(&function.name.raw());
        match &function.args {
            FunctionArguments::None => {}
            FunctionArguments::Subquery(query) => self.subquery(query),
            FunctionArguments::List(list) => {
                self.write("(");
                if let Some(treatment) = &list.duplicate_treatment {
                    self.write(&format!("{treatment} "));
                }
                self.list(&list.args, |this, arg| this.function_arg(arg, arg_scope));
                for clause in &list.clauses {
                    match clause {
                        FunctionArgumentClause::OrderBy(order) => self.order_by_exprs(order),
                        FunctionArgumentClause::Separator(separator) => {
                            self.write(" SEPARATOR ");
                            self.literal(separator, arg_scope);
                        }
                        other => {
                            self.write(" ");
                            self.opaque(other);
                        }
                    }
                }
                self.write(")");
            }
        }

        if let Some(filter) = &function.filter {
            self.write(" FILTER (WHERE ");
            self.expr(filter, scope);
            self.write(")");
        }
        if let Some(window) = &function.over {
            self.write(" OVER ");
            self.opaque(window);
        }
    }

    fn function_arg(&mut self, arg: &FunctionArg, scope: Scope) {
        match arg {
            FunctionArg::Unnamed(value) => self.function_arg_expr(value, scope),
            FunctionArg::Named { name, arg, .. } => {
                self.write(&name.raw());
                self.write(" => ");
                self.function_arg_expr(arg, scope);
            }
            FunctionArg::ExprNamed { name, arg, .. } => {
                self.expr(name, scope);
                self.write(" => ");
                self.function_arg_expr(arg, scope);
            }
        }
    }

    fn function_arg_expr(&mut self, arg: &FunctionArgExpr, scope: Scope) {
        match arg {
            FunctionArgExpr::Expr(value) => self.expr(value, scope),
            FunctionArgExpr::Wildcard if scope.in_aggregate => self.write("1"),
            FunctionArgExpr::Wildcard => self.write("*"),
            FunctionArgExpr::QualifiedWildcard(name) => {
                self.write(&name.raw());
                self.write(".*");
            }
        }
    }
}

fn not(negated: bool, when_negated: &'static str, otherwise: &'static str) -> &'static str {
    if negated {
        when_negated
    } else {
        otherwise
    }
}

/// Whether `name` (possibly qualified) is an aggregate function
pub(crate) fn is_aggregate(name: &str) -> bool {
    let base = name.rsplit('.').next().unwrap_or(name);
    AGGREGATES
        .iter()
        .any(|aggregate| aggregate.eq_ignore_ascii_case(base))
}

/// Canonical token for a binary operator
pub(crate) fn binary_token(op: &BinaryOperator) -> Cow<'static, str> {
    let token = match op {
        BinaryOperator::Eq => "eq",
        BinaryOperator::NotEq => "ne",
        BinaryOperator::Lt => "lt",
        BinaryOperator::LtEq => "le",
        BinaryOperator::Gt => "gt",
        BinaryOperator::GtEq => "ge",
        BinaryOperator::And => "and",
        BinaryOperator::Or => "or",
        BinaryOperator::Xor => "xor",
        BinaryOperator::Plus => "plus",
        BinaryOperator::Minus => "minus",
        BinaryOperator::Multiply => "mul",
        BinaryOperator::Divide => "div",
        BinaryOperator::Modulo => "mod",
        BinaryOperator::MyIntegerDivide | BinaryOperator::DuckIntegerDivide => "intdiv",
        BinaryOperator::BitwiseAnd => "bitand",
        BinaryOperator::BitwiseOr => "bitor",
        BinaryOperator::BitwiseXor => "bitxor",
        BinaryOperator::PGBitwiseShiftLeft => "leftshift",
        BinaryOperator::PGBitwiseShiftRight => "rightshift",
        BinaryOperator::Spaceship => "nulleq",
        other => return Cow::Owned(other.to_string()),
    };
    Cow::Borrowed(token)
}

/// Canonical token for a unary operator
pub(crate) fn unary_token(op: &UnaryOperator) -> Cow<'static, str> {
    let spelling = op.to_string();
    let token = match spelling.as_str() {
        "+" => "plus",
        "-" => "minus",
        "NOT" => "not",
        "~" => "bitneg",
        _ => return Cow::Owned(spelling),
    };
    Cow::Borrowed(token)
}
