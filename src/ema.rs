use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Ohlcv, Price,
    PriceSource, Result,
};

/// Configuration for the Exponential Moving Average ([`Ema`])
/// indicator.
///
/// # Example
///
/// ```
/// use crypto_ta::{EmaConfig, IndicatorConfig, IndicatorConfigBuilder, PriceSource};
/// use std::num::NonZero;
///
/// let config = EmaConfig::builder()
///     .length(NonZero::new(20).unwrap())
///     .source(PriceSource::HL2)
///     .build();
///
/// assert_eq!(config.length(), 20);
/// assert_eq!(config.source(), PriceSource::HL2);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
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

impl EmaConfig {
    /// EMA on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// EMA on median price: `(high + low) / 2`.
    #[must_use]
    pub fn hl2(length: NonZero<usize>) -> Self {
        Self::builder()
            .length(length)
            .source(PriceSource::HL2)
            .build()
    }

    /// Price source extracted by [`Ema::compute_bars`].
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }

    /// Smoothing factor `α = 2 / (length + 1)`.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn alpha(&self) -> f64 {
        2.0 / (self.length + 1) as f64
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`EmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct EmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl EmaConfigBuilder {
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

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length.replace(length.get());
        self
    }

    #[inline]
    fn build(self) -> EmaConfig {
        EmaConfig {
            length: self.length.expect("length is required"),
            source: self.source,
        }
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (length + 1)`:
///
/// ```text
/// EMA[0] = SMA(series[0..length])
/// EMA[i] = series[i] × α + EMA[i − 1] × (1 − α)
/// ```
///
/// The seed is anchored at input index `length − 1`, so the
/// output holds `len(series) − length + 1` values and output
/// index `j` corresponds to input index `j + length − 1`.
///
/// # Example
///
/// ```
/// use crypto_ta::{Ema, EmaConfig};
/// use std::num::NonZero;
///
/// let ema = Ema::new(EmaConfig::close(NonZero::new(3).unwrap()));
///
/// // SMA seed = (2 + 4 + 6) / 3 = 4.0
/// // EMA(3) α = 0.5: 8 × 0.5 + 4 × 0.5 = 6.0
/// assert_eq!(ema.compute(&[2.0, 4.0, 6.0, 8.0]), Ok(vec![4.0, 6.0]));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Ema {
    config: EmaConfig,
    alpha: f64,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Input<'a> = [Price];
    type Output = Result<Vec<Price>>;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            alpha: config.alpha(),
        }
    }

    fn compute(&self, series: &[Price]) -> Self::Output {
        let length = self.config.length;
        IndicatorError::check_len("EMA", length, series.len())?;

        let (seed_window, rest) = series.split_at(length);
        #[allow(clippy::cast_precision_loss)]
        let seed = seed_window.iter().sum::<Price>() / length as f64;

        let mut result = Vec::with_capacity(rest.len() + 1);
        result.push(seed);

        let mut previous = seed;
        for &price in rest {
            previous = price * self.alpha + previous * (1.0 - self.alpha);
            result.push(previous);
        }

        Ok(result)
    }

    #[inline]
    fn config(&self) -> &EmaConfig {
        &self.config
    }
}

impl Ema {
    /// Extracts the configured [`PriceSource`] from `bars` and computes.
    pub fn compute_bars<B: Ohlcv>(&self, bars: &[B]) -> Result<Vec<Price>> {
        self.compute(&self.config.source.series(bars))
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length, self.config.source)
    }
}

/// Exponential moving average of `series` over `length`.
///
/// # Errors
///
/// [`IndicatorError::InsufficientData`] when `series` is shorter than `length`.
pub fn ema(series: &[Price], length: NonZero<usize>) -> Result<Vec<Price>> {
    Ema::new(EmaConfig::close(length)).compute(series)
}
