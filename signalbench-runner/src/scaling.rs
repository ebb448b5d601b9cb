//! Empirical scaling analysis over harness samples.
//!
//! The growth exponent is the log-log slope of elapsed time against input
//! size: ~1 for linear passes, ~2 for quadratic ones.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::harness::Sample;

/// Slopes below this are reported as near-linear.
pub const NEAR_LINEAR_MAX: f64 = 1.3;
/// Slopes at or above this are reported as quadratic.
pub const QUADRATIC_MIN: f64 = 1.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingClass {
    NearLinear,
    Superlinear,
    Quadratic,
}

impl ScalingClass {
    pub fn from_exponent(exponent: f64) -> Self {
        if exponent < NEAR_LINEAR_MAX {
            ScalingClass::NearLinear
        } else if exponent < QUADRATIC_MIN {
            ScalingClass::Superlinear
        } else {
            ScalingClass::Quadratic
        }
    }
}

impl fmt::Display for ScalingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ScalingClass::NearLinear => "near-linear",
            ScalingClass::Superlinear => "superlinear",
            ScalingClass::Quadratic => "quadratic",
        };
        f.write_str(text)
    }
}

/// Log-log slope between the smallest and largest sample.
///
/// `None` with fewer than two distinct sizes or a zero timing.
pub fn growth_exponent(samples: &[Sample]) -> Option<f64> {
    let smallest = samples.iter().min_by_key(|s| s.size)?;
    let largest = samples.iter().max_by_key(|s| s.size)?;
    if smallest.size == largest.size || smallest.size == 0 {
        return None;
    }
    if smallest.elapsed_secs <= 0.0 || largest.elapsed_secs <= 0.0 {
        return None;
    }
    let size_ratio = largest.size as f64 / smallest.size as f64;
    let time_ratio = largest.elapsed_secs / smallest.elapsed_secs;
    Some(time_ratio.ln() / size_ratio.ln())
}

pub fn classify(samples: &[Sample]) -> Option<ScalingClass> {
    growth_exponent(samples).map(ScalingClass::from_exponent)
}

/// Elapsed-time ratio between two measured sizes.
pub fn time_ratio(samples: &[Sample], from: usize, to: usize) -> Option<f64> {
    let a = samples.iter().find(|s| s.size == from)?;
    let b = samples.iter().find(|s| s.size == to)?;
    if a.elapsed_secs <= 0.0 {
        return None;
    }
    Some(b.elapsed_secs / a.elapsed_secs)
}

/// Peak-memory ratio between two measured sizes, when both were tracked.
pub fn memory_ratio(samples: &[Sample], from: usize, to: usize) -> Option<f64> {
    let a = samples.iter().find(|s| s.size == from)?.peak_bytes?;
    let b = samples.iter().find(|s| s.size == to)?.peak_bytes?;
    if a == 0 {
        return None;
    }
    Some(b as f64 / a as f64)
}
