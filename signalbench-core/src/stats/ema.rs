//! Exponential smoothing step.

/// One exponential smoothing update: `alpha * price + (1 - alpha) * prev`.
///
/// Pure: the result depends only on the arguments. With no previous value
/// the estimate is seeded with `price`.
#[inline]
pub fn ema_step(alpha: f64, price: f64, prev: Option<f64>) -> f64 {
    match prev {
        None => price,
        Some(prev) => alpha * price + (1.0 - alpha) * prev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn seeds_with_first_price() {
        assert_eq!(ema_step(0.1, 42.0, None), 42.0);
    }

    #[test]
    fn known_values() {
        // alpha = 0.5: 10 -> 0.5*12 + 0.5*10 = 11 -> 0.5*14 + 0.5*11 = 12.5
        let a = ema_step(0.5, 10.0, None);
        let b = ema_step(0.5, 12.0, Some(a));
        let c = ema_step(0.5, 14.0, Some(b));
        assert_approx(b, 11.0, DEFAULT_EPSILON);
        assert_approx(c, 12.5, DEFAULT_EPSILON);
    }

    #[test]
    fn alpha_one_tracks_price() {
        assert_eq!(ema_step(1.0, 7.0, Some(3.0)), 7.0);
    }

    #[test]
    fn repeated_calls_agree() {
        let first = ema_step(0.1, 101.3, Some(100.7));
        for _ in 0..10 {
            assert_eq!(ema_step(0.1, 101.3, Some(100.7)), first);
        }
    }
}
