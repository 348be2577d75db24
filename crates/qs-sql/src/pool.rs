//! Reusable canonicalization state.
//!
//! Extraction calls on any thread share one [`StatePool`]. Each call takes a
//! state out with [`StatePool::acquire`]; the returned guard resets it and
//! hands it back on drop, so no call ever sees what a previous one wrote.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

use qs_core::PoolConfig;

use crate::canonical::CanonicalState;

/// Thread-safe free list of canonicalization states
#[derive(Debug)]
pub(crate) struct StatePool {
    idle: Mutex<Vec<CanonicalState>>,
    max_idle: usize,
}

impl StatePool {
    /// A pool keeping at most `max_idle` states; 0 disables reuse
    pub(crate) fn new(max_idle: usize) -> Self {
        log::debug!("creating canonicalization state pool (max_idle = {max_idle})");
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Take an idle state, or allocate one when none is left
    pub(crate) fn acquire(&self) -> PooledState<'_> {
        let state = self.lock().pop().unwrap_or_default();
        PooledState { state, pool: self }
    }

    #[cfg(test)]
    pub(crate) fn idle_count(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, mut state: CanonicalState) {
        state.reset();
        let mut idle = self.lock();
        if idle.len() < self.max_idle {
            idle.push(state);
        }
    }

    /// The free list holds only reset states, so a poisoned lock is still
    /// consistent.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CanonicalState>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatePool {
    fn default() -> Self {
        Self::new(PoolConfig::default().max_idle)
    }
}

/// RAII guard over a pooled state; resets and returns it when dropped
pub(crate) struct PooledState<'p> {
    state: CanonicalState,
    pool: &'p StatePool,
}

impl Deref for PooledState<'_> {
    type Target = CanonicalState;

    fn deref(&self) -> &CanonicalState {
        &self.state
    }
}

impl DerefMut for PooledState<'_> {
    fn deref_mut(&mut self) -> &mut CanonicalState {
        &mut self.state
    }
}

impl Drop for PooledState<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.state));
    }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod tests;
