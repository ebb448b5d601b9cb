//! Bounded double-ended buffer that auto-evicts its oldest value.

use std::collections::VecDeque;

use super::arithmetic_mean;

/// Retains at most `max_len` recent values. Unlike [`RollingWindow`], no
/// running sum is kept: the mean rescans the buffer, so bounding memory does
/// not bound the per-update cost below O(k).
///
/// [`RollingWindow`]: super::RollingWindow
#[derive(Debug, Clone)]
pub struct BoundedBuffer {
    values: VecDeque<f64>,
    max_len: usize,
}

impl BoundedBuffer {
    pub fn new(max_len: usize) -> Self {
        debug_assert!(max_len >= 1, "bounded buffer length must be >= 1");
        Self {
            values: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.max_len {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Mean over the current contents, O(len).
    pub fn mean(&self) -> Option<f64> {
        arithmetic_mean(&self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}
