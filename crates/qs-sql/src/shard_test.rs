use super::*;

#[test]
fn test_numeric_suffix_generalized() {
    assert_eq!(normalize_shard_suffix("orders_104"), "orders_?");
    assert_eq!(normalize_shard_suffix("db_3"), "db_?");
    assert_eq!(normalize_shard_suffix("tbTradiQueueRT_6"), "tbTradiQueueRT_?");
}

#[test]
fn test_only_last_segment_considered() {
    assert_eq!(normalize_shard_suffix("user_order_7"), "user_order_?");
    assert_eq!(normalize_shard_suffix("t_1_2"), "t_1_?");
    assert_eq!(normalize_shard_suffix("t_1_x"), "t_1_x");
}

#[test]
fn test_unchanged_names() {
    assert_eq!(normalize_shard_suffix(""), "");
    assert_eq!(normalize_shard_suffix("users"), "users");
    assert_eq!(normalize_shard_suffix("users123"), "users123");
    assert_eq!(normalize_shard_suffix("user_profile"), "user_profile");
    assert_eq!(normalize_shard_suffix("trailing_"), "trailing_");
}

#[test]
fn test_signed_suffix_counts_as_integer() {
    assert_eq!(normalize_shard_suffix("t_-5"), "t_?");
    assert_eq!(normalize_shard_suffix("t_+5"), "t_?");
}

#[test]
fn test_overflowing_suffix_unchanged() {
    assert_eq!(
        normalize_shard_suffix("t_99999999999999999999"),
        "t_99999999999999999999"
    );
}

#[test]
fn test_leading_separator() {
    assert_eq!(normalize_shard_suffix("_5"), "_?");
}

#[test]
fn test_idempotent() {
    for name in [
        "",
        "users",
        "orders_104",
        "db_3",
        "a_b_c",
        "t_1_2",
        "_5",
        "x_?",
        "trailing_",
    ] {
        let once = normalize_shard_suffix(name);
        assert_eq!(normalize_shard_suffix(&once), once, "not idempotent for {name:?}");
    }
}
