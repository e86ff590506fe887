use std::{fmt::Display, num::NonZero};

use tracing::debug;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, round::round2,
};

/// RSI returned when the series is too short to measure momentum.
pub const NEUTRAL_RSI: Price = 50.0;

/// Configuration for the Relative Strength Index ([`Rsi`])
/// indicator.
///
/// RSI uses Wilder's smoothing, which has infinite memory: the
/// SMA seed (first `length` price changes) influences all
/// subsequent values. A regular value needs `length + 1` prices.
///
/// # Example
///
/// ```
/// use crypto_ta::{IndicatorConfig, RsiConfig};
///
/// let config = RsiConfig::default();
/// assert_eq!(config.length(), 14);
/// assert_eq!(config.required_len(), 15);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn required_len(&self) -> usize {
        self.length + 1
    }
}

impl RsiConfig {
    /// RSI on closing price.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// Price source extracted by [`Rsi::compute_bars`].
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for RsiConfig {
    /// RSI(14) on closing price.
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: length = 14, source = [`PriceSource::Close`].
pub struct RsiConfigBuilder {
    length: usize,
    source: PriceSource,
}

impl RsiConfigBuilder {
    #[must_use]
    fn new() -> Self {
        Self {
            length: 14,
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

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length.get();
        self
    }

    #[inline]
    fn build(self) -> RsiConfig {
        RsiConfig {
            length: self.length,
            source: self.source,
        }
    }
}

/// Relative Strength Index (RSI) with Wilder's smoothing.
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// The first `length` price changes are averaged with a simple
/// mean (SMA seed). The remaining changes are folded in strictly
/// in order with Wilder's method:
///
/// ```text
/// avg_gain = (avg_gain × (length − 1) + gain) / length
/// avg_loss = (avg_loss × (length − 1) + loss) / length
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
/// ```
///
/// The result is rounded to two decimals. A series without any
/// loss yields exactly `100`. A series shorter than `length + 1`
/// yields [`NEUTRAL_RSI`] instead of failing.
///
/// # Example
///
/// ```
/// use crypto_ta::{Rsi, RsiConfig};
/// use std::num::NonZero;
///
/// let rsi = Rsi::new(RsiConfig::close(NonZero::new(3).unwrap()));
///
/// // Changes: +2, −1, +2 → avg_gain = 4/3, avg_loss = 1/3 → RSI = 80
/// assert_eq!(rsi.compute(&[10.0, 12.0, 11.0, 13.0]), 80.0);
///
/// // Not enough history
/// assert_eq!(rsi.compute(&[10.0, 12.0]), 50.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Rsi {
    config: RsiConfig,
    length: f64,
    length_minus_one: f64,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Input<'a> = [Price];
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            #[allow(clippy::cast_precision_loss)]
            length: config.length as f64,
            #[allow(clippy::cast_precision_loss)]
            length_minus_one: (config.length - 1) as f64,
        }
    }

    fn compute(&self, series: &[Price]) -> Price {
        if series.len() < self.config.required_len() {
            debug!(
                required = self.config.required_len(),
                actual = series.len(),
                "RSI history too short, using neutral value"
            );
            return NEUTRAL_RSI;
        }

        let mut changes = series.windows(2).map(|pair| Self::gain_and_loss(pair[0], pair[1]));

        let (mut sum_gain, mut sum_loss) = (0.0, 0.0);
        for (gain, loss) in changes.by_ref().take(self.config.length) {
            sum_gain += gain;
            sum_loss += loss;
        }

        let mut avg_gain = sum_gain / self.length;
        let mut avg_loss = sum_loss / self.length;

        for (gain, loss) in changes {
            avg_gain = (avg_gain * self.length_minus_one + gain) / self.length;
            avg_loss = (avg_loss * self.length_minus_one + loss) / self.length;
        }

        Self::rsi_from_averages(avg_gain, avg_loss)
    }

    #[inline]
    fn config(&self) -> &RsiConfig {
        &self.config
    }
}

impl Rsi {
    /// Extracts the configured [`PriceSource`] from `bars` and computes.
    pub fn compute_bars<B: Ohlcv>(&self, bars: &[B]) -> Price {
        self.compute(&self.config.source.series(bars))
    }

    #[inline]
    fn gain_and_loss(prev_price: Price, price: Price) -> (Price, Price) {
        let change = price - prev_price;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        (gain, loss)
    }

    #[inline]
    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        round2(100.0 - 100.0 / (1.0 + rs))
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.length, self.config.source)
    }
}

/// Relative strength index of `series` over `length`.
///
/// Never fails: short series yield [`NEUTRAL_RSI`].
#[must_use]
pub fn rsi(series: &[Price], length: NonZero<usize>) -> Price {
    Rsi::new(RsiConfig::close(length)).compute(series)
}
