use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Ohlcv, Price,
    PriceSource, Result,
};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use crypto_ta::{IndicatorConfig, SmaConfig};
/// use std::num::NonZero;
///
/// let config = SmaConfig::close(NonZero::new(20).unwrap());
/// assert_eq!(config.length(), 20);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn required_len(&self) -> usize {
        self.length
    }
}

impl SmaConfig {
    /// SMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// SMA on typical price: `(high + low + close) / 3`.
    #[must_use]
    pub fn hlc3(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::HLC3)
            .build()
    }

    /// Price source extracted by [`Sma::compute_bars`].
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`SmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct SmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }

    /// Sets the price source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> SmaConfig {
        SmaConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of every full window of *n* values, where
/// *n* is the configured length. The output has one value per window:
/// `len(series) - n + 1` values, the first aligned with input index `n - 1`.
///
/// Each window is summed afresh in chronological order, so results do not
/// carry running-sum drift and match a direct evaluation of the formula.
///
/// # Example
///
/// ```rust
/// use crypto_ta::{Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(sma.compute(&[10.0, 20.0, 30.0]), Ok(vec![20.0]));
/// assert!(sma.compute(&[10.0, 20.0]).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Sma {
    config: SmaConfig,
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Input<'a> = [Price];
    type Output = Result<Vec<Price>>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn compute(&self, series: &[Price]) -> Self::Output {
        IndicatorError::check_len("SMA", self.config.length, series.len())?;

        Ok(rolling_mean(series, self.config.length))
    }

    #[inline]
    fn config(&self) -> &SmaConfig {
        &self.config
    }
}

impl Sma {
    /// Extracts the configured [`PriceSource`] from `bars` and computes.
    pub fn compute_bars<B: Ohlcv>(&self, bars: &[B]) -> Result<Vec<Price>> {
        self.compute(&self.config.source.series(bars))
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.length, self.config.source)
    }
}

/// Simple moving average of `series` over `length`.
///
/// # Errors
///
/// [`IndicatorError::InsufficientData`] when `series` is shorter than `length`.
pub fn sma(series: &[Price], length: NonZero<usize>) -> Result<Vec<Price>> {
    Sma::new(SmaConfig::close(length)).compute(series)
}

/// Window means over a series already known to hold at least one window.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn rolling_mean(series: &[Price], length: usize) -> Vec<Price> {
    let divisor = length as f64;
    series
        .windows(length)
        .map(|window| window.iter().sum::<Price>() / divisor)
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{Bar, assert_approx, nz};

    fn sma(length: usize) -> Sma {
        Sma::new(SmaConfig::close(nz(length)))
    }

    mod computation {
        use super::*;

        #[test]
        fn single_window() {
            assert_eq!(sma(3).compute(&[10.0, 20.0, 30.0]), Ok(vec![20.0]));
        }

        #[test]
        fn slides_across_series() {
            // (1+2)/2, (2+3)/2, (3+4)/2, (4+5)/2
            assert_eq!(
                sma(2).compute(&[1.0, 2.0, 3.0, 4.0, 5.0]),
                Ok(vec![1.5, 2.5, 3.5, 4.5])
            );
        }

        #[test]
        fn output_length() {
            let series: Vec<f64> = (0..50).map(f64::from).collect();
            assert_eq!(sma(20).compute(&series).unwrap().len(), 31);
        }

        #[test]
        fn window_size_one_is_identity() {
            let series = [3.0, 1.0, 4.0, 1.0, 5.0];
            assert_eq!(sma(1).compute(&series), Ok(series.to_vec()));
        }

        #[test]
        fn fractional_mean() {
            let result = sma(3).compute(&[1.0, 2.0, 2.0]).unwrap();
            assert_approx!(result[0], 5.0 / 3.0);
        }
    }

    mod insufficient_data {
        use super::*;

        #[test]
        fn shorter_than_length_fails() {
            assert_eq!(
                sma(5).compute(&[1.0, 2.0]),
                Err(IndicatorError::InsufficientData {
                    indicator: "SMA",
                    required: 5,
                    actual: 2,
                })
            );
        }

        #[test]
        fn empty_series_fails() {
            assert!(sma(1).compute(&[]).is_err());
        }
    }

    mod price_source {
        use super::*;

        #[test]
        fn compute_bars_uses_configured_source() {
            let bars = [
                Bar::new(0.0, 6.0, 0.0, 3.0),  // hlc3 = 3
                Bar::new(0.0, 9.0, 3.0, 6.0),  // hlc3 = 6
                Bar::new(0.0, 12.0, 6.0, 9.0), // hlc3 = 9
            ];
            let sma = Sma::new(SmaConfig::hlc3(nz(3)));
            assert_eq!(sma.compute_bars(&bars), Ok(vec![6.0]));
        }
    }

    mod config {
        use super::*;

        #[test]
        fn default_source_is_close() {
            let config = SmaConfig::builder().length(nz(10)).build();
            assert_eq!(config.source(), PriceSource::Close);
        }

        #[test]
        fn required_len_is_length() {
            assert_eq!(SmaConfig::close(nz(14)).required_len(), 14);
        }

        #[test]
        #[should_panic(expected = "length is required")]
        fn panics_without_length() {
            let _ = SmaConfig::builder().build();
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(sma(20).to_string(), "SMA(20, Close)");
            assert_eq!(SmaConfig::hlc3(nz(5)).to_string(), "SmaConfig(5, HLC3)");
        }
    }

    #[test]
    fn facade_matches_indicator() {
        let series = [2.0, 4.0, 6.0, 8.0];
        assert_eq!(super::sma(&series, nz(2)), sma(2).compute(&series));
    }
}
