//! On-stack visited tracking for recursive graph walks.
//!
//! The delegation graph may contain cycles (A delegates to B, B back to A,
//! possibly through base classes), so every recursive walk carries a
//! `VisitGuard`. An entry is held only while the key is on the current
//! recursion path: it is cleared on exit, so the same type may be revisited
//! on a disjoint branch of the same traversal, while re-entering a key that
//! is still on the path reports a cycle.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Depth cap for delegation-graph walks. The visited set alone guarantees
/// termination; the cap keeps a pathological declaration set from burning
/// the call stack.
pub const MAX_DELEGATION_DEPTH: u32 = 64;

/// Result of attempting to enter a node of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Entered,
    /// The key is already on the current path.
    Cycle,
    DepthExceeded,
}

/// Two-state visited set: a key is either absent or "currently exploring".
pub struct VisitGuard<K: Hash + Eq + Copy> {
    exploring: FxHashSet<K>,
    max_depth: u32,
}

impl<K: Hash + Eq + Copy> VisitGuard<K> {
    pub fn new(max_depth: u32) -> Self {
        Self {
            exploring: FxHashSet::default(),
            max_depth,
        }
    }

    /// Mark `key` as on-path. The caller must call [`leave`](Self::leave)
    /// with the same key on every exit path after a successful enter.
    pub fn enter(&mut self, key: K) -> Visit {
        if self.exploring.contains(&key) {
            return Visit::Cycle;
        }
        if self.exploring.len() as u32 >= self.max_depth {
            return Visit::DepthExceeded;
        }
        self.exploring.insert(key);
        Visit::Entered
    }

    /// Clear the on-path marker for `key`, making it revisitable from a
    /// disjoint branch.
    pub fn leave(&mut self, key: K) {
        let was_present = self.exploring.remove(&key);
        debug_assert!(was_present, "leave() without a matching enter()");
    }

    pub fn is_visiting(&self, key: &K) -> bool {
        self.exploring.contains(key)
    }

    /// Number of keys currently on the path.
    pub fn depth(&self) -> usize {
        self.exploring.len()
    }
}

// A guard dropped mid-walk means a missed leave() somewhere.
#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for VisitGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.exploring.is_empty() {
            panic!(
                "VisitGuard dropped with {} keys still marked as exploring",
                self.exploring.len(),
            );
        }
    }
}
