use super::*;
use crate::param::Param;
use crate::table::TableReference;
use std::sync::Arc;
use std::thread;

#[test]
fn test_acquire_from_empty_pool_allocates() {
    let pool = StatePool::new(4);
    let state = pool.acquire();
    assert!(state.is_clean());
    assert_eq!(pool.idle_count(), 0);
}

#[test]
fn test_dropped_state_returns_reset() {
    let pool = StatePool::new(4);
    {
        let mut state = pool.acquire();
        state.out.push_str("SELECT ?");
        state.params.push(Param::Int(1));
        state.tables.push(TableReference::new("", "users"));
        state.ctes.push("c".to_string());
    }
    assert_eq!(pool.idle_count(), 1);

    let state = pool.acquire();
    assert!(state.is_clean());
    assert_eq!(pool.idle_count(), 0);
}

#[test]
fn test_idle_list_is_bounded() {
    let pool = StatePool::new(2);
    {
        let _a = pool.acquire();
        let _b = pool.acquire();
        let _c = pool.acquire();
    }
    assert_eq!(pool.idle_count(), 2);
}

#[test]
fn test_zero_max_idle_disables_reuse() {
    let pool = StatePool::new(0);
    drop(pool.acquire());
    assert_eq!(pool.idle_count(), 0);
}

#[test]
fn test_concurrent_acquire_release() {
    let pool = Arc::new(StatePool::new(8));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for _ in 0..100 {
                    let mut state = pool.acquire();
                    assert!(state.is_clean());
                    state.out.push_str(&format!("thread {i}"));
                    state.params.push(Param::Int(i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert!(pool.idle_count() <= 8);
}
