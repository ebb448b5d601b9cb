//! Errors raised by the signal engine.

/// Invalid construction-time parameters. Raised by constructors, never
/// discovered mid-stream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("window must be a positive integer, got {window}")]
    InvalidWindow { window: i64 },
    #[error("decay must be in (0, 1], got {decay}")]
    InvalidDecay { decay: f64 },
}

/// A tick the engine refuses to process. The strategy state is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("non-finite price {price} for symbol '{symbol}'")]
    NonFinitePrice { symbol: String, price: f64 },
}

/// Validate a window size, accepting any signed input so negative values from
/// config files are reported the same way as zero.
pub fn check_window(window: i64) -> Result<usize, ConfigurationError> {
    match usize::try_from(window) {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(ConfigurationError::InvalidWindow { window }),
    }
}

/// Validate an in-memory window size.
pub fn check_capacity(window: usize) -> Result<usize, ConfigurationError> {
    if window == 0 {
        Err(ConfigurationError::InvalidWindow { window: 0 })
    } else {
        Ok(window)
    }
}

/// Validate an exponential decay factor. NaN is rejected.
pub fn check_decay(decay: f64) -> Result<f64, ConfigurationError> {
    if decay > 0.0 && decay <= 1.0 {
        Ok(decay)
    } else {
        Err(ConfigurationError::InvalidDecay { decay })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds() {
        assert_eq!(check_window(1), Ok(1));
        assert_eq!(check_window(50), Ok(50));
        assert_eq!(
            check_window(0),
            Err(ConfigurationError::InvalidWindow { window: 0 })
        );
        assert_eq!(
            check_window(-3),
            Err(ConfigurationError::InvalidWindow { window: -3 })
        );
    }

    #[test]
    fn decay_bounds() {
        assert_eq!(check_decay(1.0), Ok(1.0));
        assert_eq!(check_decay(0.1), Ok(0.1));
        assert!(check_decay(0.0).is_err());
        assert!(check_decay(-0.5).is_err());
        assert!(check_decay(1.0001).is_err());
        assert!(check_decay(f64::NAN).is_err());
    }

    #[test]
    fn error_messages() {
        let err = ConfigurationError::InvalidWindow { window: 0 };
        assert_eq!(err.to_string(), "window must be a positive integer, got 0");
        let err = DataError::NonFinitePrice {
            symbol: "TEST".into(),
            price: f64::NAN,
        };
        assert_eq!(err.to_string(), "non-finite price NaN for symbol 'TEST'");
    }
}
