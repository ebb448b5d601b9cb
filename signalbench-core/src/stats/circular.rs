//! Preallocated circular buffer with a running sum.

/// Fixed-size ring of `capacity` slots, allocated once at construction.
///
/// The write slot is `count % capacity`. The evicted slot is subtracted from
/// the running sum only once the buffer has wrapped (`count >= capacity`).
#[derive(Debug, Clone)]
pub struct CircularBuffer {
    slots: Box<[f64]>,
    count: usize,
    sum: f64,
}

impl CircularBuffer {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1, "circular buffer capacity must be >= 1");
        Self {
            slots: vec![0.0; capacity].into_boxed_slice(),
            count: 0,
            sum: 0.0,
        }
    }

    pub fn push(&mut self, value: f64) {
        let capacity = self.slots.len();
        let slot = self.count % capacity;
        if self.count >= capacity {
            self.sum -= self.slots[slot];
        }
        self.slots[slot] = value;
        self.sum += value;
        self.count += 1;
    }

    /// Mean over the `min(count, capacity)` live slots.
    pub fn mean(&self) -> Option<f64> {
        let live = self.len();
        if live == 0 {
            None
        } else {
            Some(self.sum / live as f64)
        }
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.count.min(self.slots.len())
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total values pushed since construction.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn no_eviction_before_wrap() {
        let mut buf = CircularBuffer::new(4);
        buf.push(10.0);
        buf.push(20.0);
        buf.push(30.0);
        assert_eq!(buf.len(), 3);
        assert_approx(buf.sum(), 60.0, DEFAULT_EPSILON);
        assert_approx(buf.mean().unwrap(), 20.0, DEFAULT_EPSILON);
    }

    #[test]
    fn wrap_overwrites_oldest_slot() {
        let mut buf = CircularBuffer::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            buf.push(v);
        }
        // Live: [4, 5, 3]
        assert_eq!(buf.count(), 5);
        assert_eq!(buf.len(), 3);
        assert_approx(buf.sum(), 12.0, DEFAULT_EPSILON);
        assert_approx(buf.mean().unwrap(), 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn capacity_is_fixed() {
        let mut buf = CircularBuffer::new(2);
        for i in 0..100 {
            buf.push(i as f64);
        }
        assert_eq!(buf.capacity(), 2);
        assert_eq!(buf.len(), 2);
        assert_approx(buf.mean().unwrap(), 98.5, DEFAULT_EPSILON);
    }
}
