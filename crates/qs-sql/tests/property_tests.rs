//! Determinism, placeholder parity, shard idempotence and shared use across
//! threads

use std::sync::Arc;
use std::thread;

use qs_sql::{extract, normalize_shard_suffix, Extractor, PLACEHOLDER};

const CORPUS: &[&str] = &[
    "SELECT * FROM users WHERE age > 18",
    "SELECT count(*) FROM t GROUP BY x",
    "SELECT * FROM db_1.t_42 WHERE id=1",
    "SELECT a, SUM(b * 2) FROM t WHERE c IN (1, 2, 3) AND d BETWEEN 4 AND 5 GROUP BY a",
    "SELECT * FROM a LEFT JOIN b ON a.id = b.id WHERE b.x LIKE 'p%' ORDER BY a.id LIMIT 5, 10",
    "SELECT CASE WHEN x > 0 THEN 'pos' ELSE 'neg' END FROM t",
    "SELECT * FROM t WHERE ts > DATE_SUB(NOW(), INTERVAL 1 HOUR)",
    "INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y') ON DUPLICATE KEY UPDATE b = 'z'",
    "UPDATE t SET a = a + 1, b = NULL WHERE id = 9",
    "DELETE FROM t WHERE id IN (SELECT id FROM u WHERE flag = 0)",
    "SHOW TABLES LIKE 'x%'",
    "SELECT MATCH (a) AGAINST ('term') FROM t WHERE id = 2",
];

/// Placeholders written for literals; the `?` of a shard-normalized name
/// always follows a `_`.
fn literal_placeholders(template: &str) -> usize {
    template
        .match_indices(PLACEHOLDER)
        .filter(|(i, _)| !template[..*i].ends_with('_'))
        .count()
}

#[test]
fn test_placeholder_parity() {
    for sql in CORPUS {
        let result = extract(sql).unwrap();
        for statement in result.statements() {
            assert_eq!(
                literal_placeholders(&statement.template),
                statement.params.len(),
                "parity broken for {sql}: {}",
                statement.template
            );
        }
    }
}

#[test]
fn test_shard_placeholders_are_not_params() {
    let result = extract("SELECT * FROM db_1.t_42 WHERE id = 1").unwrap();
    let statement = &result.statements()[0];
    assert_eq!(statement.template, "SELECT * FROM db_?.t_? WHERE id eq ?");
    assert_eq!(literal_placeholders(&statement.template), 1);
    assert_eq!(statement.params.len(), 1);
}

#[test]
fn test_extraction_is_deterministic() {
    for sql in CORPUS {
        let first = extract(sql).unwrap();
        let second = extract(sql).unwrap();
        assert_eq!(first, second, "{sql}");
        assert_eq!(first.fingerprints(), second.fingerprints(), "{sql}");
    }
}

#[test]
fn test_shard_normalization_is_idempotent() {
    for name in ["", "users", "orders_104", "db_3", "a_1_2", "x_", "_7", "t_-5"] {
        let once = normalize_shard_suffix(name);
        assert_eq!(normalize_shard_suffix(&once), once, "{name}");
    }
}

#[test]
fn test_shared_extractor_across_threads() {
    let extractor = Arc::new(Extractor::new());
    let expected: Vec<_> = CORPUS
        .iter()
        .map(|sql| extractor.extract(sql).unwrap())
        .collect();
    let expected = Arc::new(expected);

    let handles: Vec<_> = (0..8)
        .map(|offset| {
            let extractor = Arc::clone(&extractor);
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                for round in 0..50 {
                    let i = (offset + round) % CORPUS.len();
                    let result = extractor.extract(CORPUS[i]).unwrap();
                    assert_eq!(result, expected[i], "{}", CORPUS[i]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_global_extract_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|n: i64| {
            thread::spawn(move || {
                let sql = format!("SELECT * FROM shard_{n} WHERE id = {n}");
                let result = extract(&sql).unwrap();
                assert_eq!(result.templates(), vec!["SELECT * FROM shard_? WHERE id eq ?"]);
                assert_eq!(result.params()[0], &[qs_sql::Param::Int(n)][..]);
                assert_eq!(result.tables()[0][0].table, format!("shard_{n}"));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
