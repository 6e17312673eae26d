//! Rolling net-worth window
//!
//! Fixed-capacity ring buffer: pushing past capacity evicts the oldest
//! snapshot.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of snapshots the trend chart shows
pub const HISTORY_CAPACITY: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetWorthHistory {
    capacity: usize,
    snapshots: VecDeque<f64>,
}

impl NetWorthHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            snapshots: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append a snapshot, returning the evicted one if the window was full
    pub fn push(&mut self, snapshot: f64) -> Option<f64> {
        if self.capacity == 0 {
            return Some(snapshot);
        }

        self.snapshots.push_back(snapshot);

        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front()
        } else {
            None
        }
    }

    /// Oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.snapshots.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl Default for NetWorthHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut history = NetWorthHistory::new();
        for i in 0..HISTORY_CAPACITY {
            assert_eq!(history.push(i as f64), None);
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.to_vec().last(), Some(&5.0));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut history = NetWorthHistory::with_capacity(3);
        history.push(1.0);
        history.push(2.0);
        history.push(3.0);

        assert_eq!(history.push(4.0), Some(1.0));
        assert_eq!(history.to_vec(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut history = NetWorthHistory::with_capacity(0);
        assert_eq!(history.push(7.0), Some(7.0));
        assert!(history.is_empty());
    }
}
