//! Incremental statistics used by the strategies.
//!
//! Each structure trades memory against per-update cost differently:
//! - `RollingWindow`: bounded `VecDeque` plus running sum, O(1) mean
//! - `BoundedBuffer`: bounded `VecDeque`, mean recomputed in O(k)
//! - `CircularBuffer`: preallocated slots plus running sum, O(1) mean
//! - `ema_step`: a single smoothed scalar, O(1) time and space

pub mod bounded;
pub mod circular;
pub mod ema;
pub mod rolling;

pub use bounded::BoundedBuffer;
pub use circular::CircularBuffer;
pub use ema::ema_step;
pub use rolling::RollingWindow;

/// Arithmetic mean over a retained set, scanning every element.
///
/// Returns `None` for an empty set.
pub fn arithmetic_mean<'a, I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += *v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for statistics tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        let empty: Vec<f64> = Vec::new();
        assert_eq!(arithmetic_mean(&empty), None);
    }

    #[test]
    fn mean_basic() {
        assert_approx(
            arithmetic_mean(&[10.0, 11.0, 12.0, 13.0]).unwrap(),
            11.5,
            DEFAULT_EPSILON,
        );
    }
}
