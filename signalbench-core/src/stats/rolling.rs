//! Fixed-size rolling window with a running sum.

use std::collections::VecDeque;

/// Holds at most `capacity` most-recent values and their sum.
///
/// Before the window fills, the mean divides by the current count, not by
/// `capacity`.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    values: VecDeque<f64>,
    capacity: usize,
    sum: f64,
}

impl RollingWindow {
    /// `capacity` must be >= 1; callers validate it beforehand.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1, "rolling window capacity must be >= 1");
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    /// Push a value, evicting the oldest first if the window is full.
    /// Returns the evicted value.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.values.len() == self.capacity {
            let oldest = self.values.pop_front();
            if let Some(old) = oldest {
                self.sum -= old;
            }
            oldest
        } else {
            None
        };
        self.values.push_back(value);
        self.sum += value;
        evicted
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.sum / self.values.len() as f64)
        }
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn partial_window_divides_by_count() {
        let mut w = RollingWindow::new(5);
        w.push(10.0);
        w.push(20.0);
        assert_eq!(w.len(), 2);
        assert!(!w.is_full());
        assert_approx(w.mean().unwrap(), 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn full_window_evicts_oldest() {
        let mut w = RollingWindow::new(3);
        assert_eq!(w.push(1.0), None);
        assert_eq!(w.push(2.0), None);
        assert_eq!(w.push(3.0), None);
        assert_eq!(w.push(4.0), Some(1.0));
        assert_eq!(w.len(), 3);
        assert_approx(w.sum(), 9.0, DEFAULT_EPSILON);
        assert_approx(w.mean().unwrap(), 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn capacity_one_tracks_last_value() {
        let mut w = RollingWindow::new(1);
        w.push(5.0);
        w.push(7.0);
        assert_eq!(w.len(), 1);
        assert_approx(w.mean().unwrap(), 7.0, DEFAULT_EPSILON);
    }

    #[test]
    fn empty_window_has_no_mean() {
        let w = RollingWindow::new(4);
        assert!(w.is_empty());
        assert_eq!(w.mean(), None);
        assert_eq!(w.capacity(), 4);
    }
}
