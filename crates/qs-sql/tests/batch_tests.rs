//! Multi-statement batches: ordering, error mapping and atomicity

use qs_sql::{extract, Extractor, OperationKind, SqlError};

#[test]
fn test_two_statement_batch() {
    let result = extract("SELECT * FROM users; INSERT INTO logs (action) VALUES ('login')").unwrap();
    assert_eq!(
        result.templates(),
        vec![
            "SELECT * FROM users",
            "INSERT INTO logs (action) VALUES (?)"
        ]
    );
    assert_eq!(
        result.operations(),
        vec![OperationKind::Select, OperationKind::Insert]
    );
    assert_eq!(result.fingerprints().len(), 2);
}

#[test]
fn test_semicolon_inside_string_does_not_split() {
    let result = extract("SELECT * FROM t WHERE a = 'x;y'; SELECT 2").unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result.templates()[0], "SELECT * FROM t WHERE a eq ?");
}

#[test]
fn test_trailing_and_repeated_delimiters() {
    let result = extract("SELECT 1;;\n SELECT 2;").unwrap();
    assert_eq!(result.templates(), vec!["SELECT ?", "SELECT ?"]);
}

#[test]
fn test_invalid_middle_statement_reports_its_index() {
    let err = extract("SELECT a FROM t; SELECT * FROM WHERE x = 1; DELETE FROM t").unwrap_err();
    match err {
        SqlError::StatementError { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(*source, SqlError::ParseError { .. }));
        }
        other => panic!("expected StatementError, got {other:?}"),
    }
}

#[test]
fn test_invalid_first_statement() {
    let err = extract("SELEC 1; SELECT 2").unwrap_err();
    assert!(matches!(err, SqlError::StatementError { index: 0, .. }));
}

#[test]
fn test_error_message_carries_code_and_index() {
    let err = extract("SELECT 1; SELECT * FROM t WHERE").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("[S005]"), "{message}");
    assert!(message.contains("statement 1"), "{message}");
}

#[test]
fn test_empty_and_delimiter_only_input() {
    assert!(matches!(extract(""), Err(SqlError::EmptyInput)));
    assert!(matches!(extract(";"), Err(SqlError::NoStatements)));
    assert!(matches!(extract("-- comment only ;"), Err(SqlError::NoStatements)));
}

#[test]
fn test_failed_batch_leaves_no_state_behind() {
    let extractor = Extractor::new();
    assert!(extractor
        .extract("SELECT a FROM leftover WHERE b = 1; SELEC")
        .is_err());

    let result = extractor.extract("SELECT c FROM fresh").unwrap();
    assert_eq!(result.templates(), vec!["SELECT c FROM fresh"]);
    assert!(result.params()[0].is_empty());
    assert_eq!(result.tables()[0].len(), 1);
    assert_eq!(result.tables()[0][0].table, "fresh");
}
