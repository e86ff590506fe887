use thiserror::Error;

/// Errors returned by indicators that cannot produce a meaningful value.
///
/// Only categorical failures are reported here. Indicators that can still
/// produce a usable answer on short or malformed input (RSI, CCI) degrade to
/// sentinel values instead of returning an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// The input series is shorter than the indicator's lookback.
    #[error("not enough data to calculate {indicator}: required {required}, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },
}

impl IndicatorError {
    pub(crate) fn check_len(
        indicator: &'static str,
        required: usize,
        actual: usize,
    ) -> Result<()> {
        if actual < required {
            return Err(Self::InsufficientData {
                indicator,
                required,
                actual,
            });
        }

        Ok(())
    }
}

/// Result alias used by fallible indicators.
pub type Result<T> = std::result::Result<T, IndicatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_when_long_enough() {
        assert_eq!(IndicatorError::check_len("EMA", 3, 3), Ok(()));
    }

    #[test]
    fn reports_required_and_actual() {
        assert_eq!(
            IndicatorError::check_len("MACD", 35, 20),
            Err(IndicatorError::InsufficientData {
                indicator: "MACD",
                required: 35,
                actual: 20,
            })
        );
    }

    #[test]
    fn message_names_indicator() {
        let err = IndicatorError::check_len("EMA", 5, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "not enough data to calculate EMA: required 5, got 2"
        );
    }
}
