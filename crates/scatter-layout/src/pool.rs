#![forbid(unsafe_code)]

//! Recycle pool for detached item instances.
//!
//! Most recently freed items are reused first: both [`push`](RecyclePool::push)
//! and [`pop`](RecyclePool::pop) work at the head.
//!
//! # Invariants
//!
//! 1. `push(a); push(b); pop() == b; pop() == a; pop() == None`.
//! 2. When a cap is set, the pool never holds more than `cap` items; the
//!    oldest (tail) entries are dropped first.

use std::collections::VecDeque;

/// LIFO buffer of reusable item instances.
#[derive(Debug, Clone)]
pub struct RecyclePool<T> {
    items: VecDeque<T>,
    cap: Option<usize>,
}

impl<T> Default for RecyclePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecyclePool<T> {
    /// Create an unbounded pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            cap: None,
        }
    }

    /// Create a pool holding at most `cap` items.
    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(cap.min(64)),
            cap: Some(cap),
        }
    }

    /// Insert `item` at the head. `None` is ignored.
    pub fn push(&mut self, item: Option<T>) {
        let Some(item) = item else {
            return;
        };
        self.items.push_front(item);
        if let Some(cap) = self.cap {
            self.items.truncate(cap);
        }
    }

    /// Remove and return the head item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Number of pooled items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pool is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every pooled item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Extend<T> for RecyclePool<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(Some(item));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_at_head() {
        let mut pool = RecyclePool::new();
        pool.push(Some("a"));
        pool.push(Some("b"));
        assert_eq!(pool.pop(), Some("b"));
        assert_eq!(pool.pop(), Some("a"));
        assert_eq!(pool.pop(), None);
    }

    #[test]
    fn none_is_ignored() {
        let mut pool: RecyclePool<u8> = RecyclePool::new();
        pool.push(None);
        assert!(pool.is_empty());
    }

    #[test]
    fn cap_drops_oldest() {
        let mut pool = RecyclePool::with_cap(2);
        pool.extend([1, 2, 3]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.pop(), Some(3));
        assert_eq!(pool.pop(), Some(2));
        assert_eq!(pool.pop(), None);
    }

    #[test]
    fn zero_cap_holds_nothing() {
        let mut pool = RecyclePool::with_cap(0);
        pool.push(Some(1));
        assert!(pool.is_empty());
    }

    #[test]
    fn clear_empties() {
        let mut pool = RecyclePool::new();
        pool.extend(["x", "y"]);
        pool.clear();
        assert_eq!(pool.pop(), None);
    }
}
