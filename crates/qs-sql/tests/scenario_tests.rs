//! End-to-end extraction scenarios per statement family

use qs_sql::{extract, OperationKind, Param, TableReference};

fn single(sql: &str) -> (String, Vec<Param>, Vec<TableReference>, OperationKind) {
    let result = extract(sql).unwrap();
    assert_eq!(result.len(), 1, "expected one statement in {sql}");
    let statement = result.statements()[0].clone();
    (
        statement.template,
        statement.params,
        statement.tables,
        statement.operation,
    )
}

fn template(sql: &str) -> String {
    single(sql).0
}

fn s(value: &str) -> Param {
    Param::Str(value.to_string())
}

// ---------------------------------------------------------------------------
// SELECT
// ---------------------------------------------------------------------------

#[test]
fn test_select_string_predicate() {
    let (template, params, tables, operation) =
        single("SELECT * FROM users WHERE name = 'kyden'");
    assert_eq!(template, "SELECT * FROM users WHERE name eq ?");
    assert_eq!(params, vec![s("kyden")]);
    assert_eq!(tables, vec![TableReference::new("", "users")]);
    assert_eq!(operation, OperationKind::Select);
}

#[test]
fn test_select_mixed_literal_types() {
    let (template, params, _, _) =
        single("SELECT * FROM users WHERE name = 'kyden' AND age = 25 AND active = true");
    assert_eq!(
        template,
        "SELECT * FROM users WHERE name eq ? and age eq ? and active eq ?"
    );
    assert_eq!(params, vec![s("kyden"), Param::Int(25), Param::Int(1)]);
}

#[test]
fn test_select_without_literals() {
    let (template, params, _, _) = single("SELECT * FROM users");
    assert_eq!(template, "SELECT * FROM users");
    assert!(params.is_empty());
}

#[test]
fn test_select_join_with_aliases() {
    let (template, params, tables, _) = single(
        "SELECT u.name, o.order_id FROM users u JOIN orders o ON u.id = o.user_id \
         WHERE u.age > 18 AND o.amount > 100.50",
    );
    assert_eq!(
        template,
        "SELECT u.name, o.order_id FROM users AS u CROSS JOIN orders AS o ON u.id eq o.user_id \
         WHERE u.age gt ? and o.amount gt ?"
    );
    assert_eq!(
        params,
        vec![Param::Int(18), Param::Decimal("100.50".to_string())]
    );
    assert_eq!(
        tables,
        vec![
            TableReference::new("", "users"),
            TableReference::new("", "orders")
        ]
    );
}

#[test]
fn test_select_group_by_having() {
    let (template, params, tables, _) = single(
        "SELECT department, COUNT(*) as count FROM employees WHERE salary >= 50000 \
         GROUP BY department HAVING count > 5",
    );
    assert_eq!(
        template,
        "SELECT department, COUNT(1) AS count FROM employees WHERE salary ge ? \
         GROUP BY department HAVING count gt ?"
    );
    assert_eq!(params, vec![Param::Int(50000), Param::Int(5)]);
    assert_eq!(tables, vec![TableReference::new("", "employees")]);
}

#[test]
fn test_select_lowercase_keywords_sharded_table() {
    let (template, params, tables, _) = single(
        "select lId,sBizCode,iGoodsId,iNum,sExt from dbUserCart_3.tbUserCart_67 \
         where sUid='12020708613042267053' and sGoodsApp='9866' and sBizCode='ty' \
         and sGroupKey ='areaid=170&platid=0&partition=70001&roleid=8070733106736623171'",
    );
    assert_eq!(
        template,
        "SELECT lId, sBizCode, iGoodsId, iNum, sExt FROM dbUserCart_?.tbUserCart_? \
         WHERE sUid eq ? and sGoodsApp eq ? and sBizCode eq ? and sGroupKey eq ?"
    );
    assert_eq!(params.len(), 4);
    assert_eq!(params[0], s("12020708613042267053"));
    assert_eq!(
        tables,
        vec![TableReference::new("dbUserCart_3", "tbUserCart_67")]
    );
    assert_eq!(tables[0].templatized_schema, "dbUserCart_?");
    assert_eq!(tables[0].templatized_table, "tbUserCart_?");
}

#[test]
fn test_select_in_list_of_strings() {
    let (template, params, tables, _) =
        single("SELECT iMallId, sMallName FROM dbX5Mall.tbMallInfo WHERE iMallId IN ('39', '40')");
    assert_eq!(
        template,
        "SELECT iMallId, sMallName FROM dbX5Mall.tbMallInfo WHERE iMallId IN (?, ?)"
    );
    assert_eq!(params, vec![s("39"), s("40")]);
    assert_eq!(tables[0].qualified_name(), "dbX5Mall.tbMallInfo");
}

#[test]
fn test_select_existing_markers() {
    let result = extract("SELECT sBizCode FROM dbUserRss.tbUserRss_1 WHERE sUid = ?").unwrap();
    assert_eq!(
        result.templates(),
        vec!["SELECT sBizCode FROM dbUserRss.tbUserRss_? WHERE sUid eq ?"]
    );
    assert!(result.has_param_marker());
    let table = &result.tables()[0][0];
    assert_eq!(table.schema, "dbUserRss");
    assert_eq!(table.table, "tbUserRss_1");
    assert_eq!(table.templatized_schema, "dbUserRss");
    assert_eq!(table.templatized_table, "tbUserRss_?");
}

#[test]
fn test_select_limit_forms_agree() {
    let a = single("SELECT * FROM t ORDER BY id DESC LIMIT 10 OFFSET 40");
    let b = single("SELECT * FROM t ORDER BY id DESC LIMIT 40, 10");
    assert_eq!(a.0, "SELECT * FROM t ORDER BY id DESC LIMIT ?, ?");
    assert_eq!(a.0, b.0);
    assert_eq!(a.1, vec![Param::Int(40), Param::Int(10)]);
    assert_eq!(a.1, b.1);
}

#[test]
fn test_select_for_update_kept() {
    assert_eq!(
        template("SELECT * FROM t WHERE id = 1 FOR UPDATE"),
        "SELECT * FROM t WHERE id eq ? FOR UPDATE"
    );
}

#[test]
fn test_select_interval_in_function() {
    let (template, params, _, _) =
        single("SELECT * FROM t WHERE created > DATE_SUB(NOW(), INTERVAL 7 DAY)");
    assert_eq!(
        template,
        "SELECT * FROM t WHERE created gt DATE_SUB(NOW(), INTERVAL ? DAY)"
    );
    assert_eq!(params, vec![Param::Int(7)]);
}

#[test]
fn test_select_like_and_regexp() {
    let (template, params, _, _) =
        single("SELECT * FROM t WHERE a LIKE 'x%' AND b NOT REGEXP '^[0-9]+$'");
    assert_eq!(
        template,
        "SELECT * FROM t WHERE a LIKE ? and b NOT REGEXP ?"
    );
    assert_eq!(params, vec![s("x%"), s("^[0-9]+$")]);
}

#[test]
fn test_select_derived_and_cte_tables() {
    let (_, _, tables, _) = single(
        "WITH recent AS (SELECT * FROM orders_3 WHERE d > 1) \
         SELECT * FROM recent r JOIN (SELECT id FROM users) AS u ON r.uid = u.id",
    );
    let names: Vec<String> = tables.iter().map(TableReference::qualified_name).collect();
    assert_eq!(names, vec!["orders_3", "users"]);
}

// ---------------------------------------------------------------------------
// INSERT / UPDATE / DELETE
// ---------------------------------------------------------------------------

#[test]
fn test_insert_multi_row() {
    let (template, params, tables, operation) =
        single("INSERT INTO logs_12 (action, at) VALUES ('login', 1), ('logout', 2)");
    assert_eq!(
        template,
        "INSERT INTO logs_? (action, at) VALUES (?, ?), (?, ?)"
    );
    assert_eq!(
        params,
        vec![s("login"), Param::Int(1), s("logout"), Param::Int(2)]
    );
    assert_eq!(tables[0].templatized_table, "logs_?");
    assert_eq!(operation, OperationKind::Insert);
}

#[test]
fn test_insert_on_duplicate_key() {
    let (template, params, _, _) =
        single("INSERT INTO counters (k, n) VALUES ('a', 1) ON DUPLICATE KEY UPDATE n = n + 1");
    assert_eq!(
        template,
        "INSERT INTO counters (k, n) VALUES (?, ?) ON DUPLICATE KEY UPDATE n eq n plus ?"
    );
    assert_eq!(params, vec![s("a"), Param::Int(1), Param::Int(1)]);
}

#[test]
fn test_update_with_markers() {
    let result = extract(
        "update db_check_in.check_in_daily_record_20250630 set status=?,reward_rsp=?,\
         reward_log=?,update_time=? where auto_id=? and user_id=? and record_key=?",
    )
    .unwrap();
    assert_eq!(
        result.templates(),
        vec![
            "UPDATE db_check_in.check_in_daily_record_? SET status eq ?, reward_rsp eq ?, \
             reward_log eq ?, update_time eq ? WHERE auto_id eq ? and user_id eq ? and record_key eq ?"
        ]
    );
    assert_eq!(result.params()[0].len(), 7);
    assert!(result.has_param_marker());
    let table = &result.tables()[0][0];
    assert_eq!(table.schema, "db_check_in");
    assert_eq!(table.table, "check_in_daily_record_20250630");
    assert_eq!(table.templatized_table, "check_in_daily_record_?");
    assert_eq!(result.operations(), vec![OperationKind::Update]);
}

#[test]
fn test_update_escaped_strings() {
    let (template, params, _, _) = single(
        r#"update tbGameCoinSerialV2 set iStatus =0,sRecvErrorNo='0',sRecvErrorNo2='',sRecv='{"ret":0}' where sSerialNum='ABCD-20250610' and sPayType = 'dq_mxxxx'"#,
    );
    assert_eq!(
        template,
        "UPDATE tbGameCoinSerialV2 SET iStatus eq ?, sRecvErrorNo eq ?, sRecvErrorNo2 eq ?, \
         sRecv eq ? WHERE sSerialNum eq ? and sPayType eq ?"
    );
    assert_eq!(params[0], Param::Int(0));
    assert_eq!(params[2], s(""));
    assert_eq!(params[3], s(r#"{"ret":0}"#));
}

#[test]
fn test_delete_with_limit() {
    let (template, params, tables, operation) =
        single("DELETE FROM sessions_4 WHERE expires < 1700000000 LIMIT 500");
    assert_eq!(
        template,
        "DELETE FROM sessions_? WHERE expires lt ? LIMIT ?"
    );
    assert_eq!(params, vec![Param::Int(1_700_000_000), Param::Int(500)]);
    assert_eq!(tables[0].table, "sessions_4");
    assert_eq!(operation, OperationKind::Delete);
}

// ---------------------------------------------------------------------------
// EXPLAIN / SHOW
// ---------------------------------------------------------------------------

#[test]
fn test_explain_select() {
    let (template, params, tables, operation) =
        single("EXPLAIN SELECT * FROM users WHERE id = 3");
    assert_eq!(template, "EXPLAIN SELECT * FROM users WHERE id eq ?");
    assert_eq!(params, vec![Param::Int(3)]);
    assert_eq!(tables, vec![TableReference::new("", "users")]);
    assert_eq!(operation, OperationKind::Explain);
}

#[test]
fn test_show_tables_like() {
    let (template, params, tables, operation) = single("SHOW TABLES LIKE 'orders_%'");
    assert_eq!(template, "SHOW TABLES LIKE ?");
    assert_eq!(params, vec![s("orders_%")]);
    assert!(tables.is_empty());
    assert_eq!(operation, OperationKind::Show);
}

#[test]
fn test_show_variables_where() {
    let (template, params, _, _) =
        single("SHOW SESSION VARIABLES WHERE Variable_name = 'autocommit'");
    assert_eq!(
        template,
        "SHOW SESSION VARIABLES WHERE Variable_name eq ?"
    );
    assert_eq!(params, vec![s("autocommit")]);
}
