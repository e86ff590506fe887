use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Ohlcv,
    Price, PriceSource, Result, round::round2,
};

/// Configuration for the Moving Average Convergence Divergence
/// ([`Macd`]) indicator.
///
/// Three lengths: the fast and slow EMAs whose difference forms the
/// MACD line, and the signal EMA applied to the MACD line. The
/// [`length`](IndicatorConfig::length) of a MACD config is its slow
/// length.
///
/// # Example
///
/// ```
/// use crypto_ta::{IndicatorConfig, MacdConfig};
///
/// let config = MacdConfig::default();
/// assert_eq!(config.fast_length(), 12);
/// assert_eq!(config.slow_length(), 26);
/// assert_eq!(config.signal_length(), 9);
/// assert_eq!(config.required_len(), 35);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: NonZero<usize>,
    slow: NonZero<usize>,
    signal: NonZero<usize>,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.slow.get()
    }

    #[inline]
    fn required_len(&self) -> usize {
        self.slow.get() + self.signal.get()
    }
}

impl MacdConfig {
    #[inline]
    #[must_use]
    pub fn fast_length(&self) -> usize {
        self.fast.get()
    }

    #[inline]
    #[must_use]
    pub fn slow_length(&self) -> usize {
        self.slow.get()
    }

    #[inline]
    #[must_use]
    pub fn signal_length(&self) -> usize {
        self.signal.get()
    }

    /// Price source extracted by [`Macd::compute_bars`].
    #[inline]
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl Default for MacdConfig {
    /// MACD(12, 26, 9) on closing price.
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast, self.slow, self.signal, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: fast = 12, slow = 26, signal = 9,
/// source = [`PriceSource::Close`].
/// [`length`](IndicatorConfigBuilder::length) sets the slow length.
pub struct MacdConfigBuilder {
    fast: NonZero<usize>,
    slow: NonZero<usize>,
    signal: NonZero<usize>,
    source: PriceSource,
}

const DEFAULT_FAST: NonZero<usize> = NonZero::new(12).unwrap();
const DEFAULT_SLOW: NonZero<usize> = NonZero::new(26).unwrap();
const DEFAULT_SIGNAL: NonZero<usize> = NonZero::new(9).unwrap();

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
            source: PriceSource::Close,
        }
    }

    #[inline]
    #[must_use]
    pub fn fast_length(mut self, length: NonZero<usize>) -> Self {
        self.fast = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn signal_length(mut self, length: NonZero<usize>) -> Self {
        self.signal = length;
        self
    }

    /// Sets the price source.
    #[inline]
    #[must_use]
    pub fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.slow = length;
        self
    }

    #[inline]
    fn build(self) -> MacdConfig {
        assert!(
            self.fast <= self.slow,
            "fast length must not exceed slow length"
        );

        MacdConfig {
            fast: self.fast,
            slow: self.slow,
            signal: self.signal,
            source: self.source,
        }
    }
}

/// Direction of the MACD momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MacdTrend {
    Bullish,
    Bearish,
}

impl MacdTrend {
    /// Combines histogram sign with the MACD line slope.
    ///
    /// Positive histogram with a rising line is bullish, non-positive
    /// histogram with a falling line is bearish. Any other combination
    /// falls back to the histogram sign alone.
    pub(crate) fn classify(histogram: Price, slope: Price) -> Self {
        let histogram_positive = histogram > 0.0;

        if histogram_positive && slope > 0.0 {
            Self::Bullish
        } else if !histogram_positive && slope < 0.0 {
            Self::Bearish
        } else if histogram > 0.0 {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }
}

impl Display for MacdTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// MACD line crossing its signal line between the last two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MacdCross {
    /// MACD moved from below to above the signal line.
    #[cfg_attr(feature = "serde", serde(rename = "Bullish Cross"))]
    Bullish,
    /// MACD moved from above to below the signal line.
    #[cfg_attr(feature = "serde", serde(rename = "Bearish Cross"))]
    Bearish,
}

impl MacdCross {
    pub(crate) fn detect(
        previous_macd: Price,
        previous_signal: Price,
        current_macd: Price,
        current_signal: Price,
    ) -> Option<Self> {
        if previous_macd < previous_signal && current_macd > current_signal {
            Some(Self::Bullish)
        } else if previous_macd > previous_signal && current_macd < current_signal {
            Some(Self::Bearish)
        } else {
            None
        }
    }
}

impl Display for MacdCross {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => f.write_str("Bullish Cross"),
            Self::Bearish => f.write_str("Bearish Cross"),
        }
    }
}

/// MACD output: full line series plus the latest snapshot.
///
/// `macd_line` starts at the first index where the slow EMA exists.
/// `signal_line` and `histogram` cover the tail of `macd_line` they
/// overlap, so index `i` of both refers to `macd_line[offset + i]`
/// with `offset = macd_line.len() - signal_line.len()`.
///
/// Series are kept at full precision. The `current_*` scalars are
/// rounded to two decimals; trend and cross are classified on the
/// unrounded values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MacdValue {
    macd_line: Vec<Price>,
    signal_line: Vec<Price>,
    histogram: Vec<Price>,
    #[cfg_attr(feature = "serde", serde(rename = "currentMACD"))]
    current_macd: Price,
    current_signal: Price,
    current_histogram: Price,
    trend: MacdTrend,
    #[cfg_attr(feature = "serde", serde(rename = "crossType"))]
    cross: Option<MacdCross>,
}

impl MacdValue {
    /// Fast EMA minus slow EMA.
    #[inline]
    #[must_use]
    pub fn macd_line(&self) -> &[Price] {
        &self.macd_line
    }

    /// EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal_line(&self) -> &[Price] {
        &self.signal_line
    }

    /// MACD line minus signal line, over the overlapping tail.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> &[Price] {
        &self.histogram
    }

    #[inline]
    #[must_use]
    pub fn current_macd(&self) -> Price {
        self.current_macd
    }

    #[inline]
    #[must_use]
    pub fn current_signal(&self) -> Price {
        self.current_signal
    }

    #[inline]
    #[must_use]
    pub fn current_histogram(&self) -> Price {
        self.current_histogram
    }

    #[inline]
    #[must_use]
    pub fn trend(&self) -> MacdTrend {
        self.trend
    }

    /// Cross between the last two samples, if any.
    #[inline]
    #[must_use]
    pub fn cross(&self) -> Option<MacdCross> {
        self.cross
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD(macd: {}, signal: {}, hist: {}, {})",
            self.current_macd, self.current_signal, self.current_histogram, self.trend
        )?;
        if let Some(cross) = self.cross {
            write!(f, " {cross}")?;
        }
        Ok(())
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// ```text
/// macd_line = EMA(fast) − EMA(slow)   (aligned on the slow EMA start)
/// signal    = EMA(macd_line, signal)
/// histogram = macd_line[tail] − signal
/// ```
///
/// The fast EMA starts `slow − fast` values earlier than the slow
/// one; those leading values are dropped so both EMAs refer to the
/// same input index.
///
/// # Example
///
/// ```
/// use crypto_ta::{Macd, MacdConfig, MacdTrend};
///
/// let macd = Macd::new(MacdConfig::default());
/// let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();
///
/// let value = macd.compute(&closes).unwrap();
/// assert_eq!(value.macd_line().len(), 60 - 26 + 1);
/// assert_eq!(value.histogram().len(), value.signal_line().len());
///
/// assert!(macd.compute(&closes[..30]).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Input<'a> = [Price];
    type Output = Result<MacdValue>;

    fn new(config: Self::Config) -> Self {
        let ema = |length| Ema::new(EmaConfig::close(length));

        Self {
            config,
            fast: ema(config.fast),
            slow: ema(config.slow),
            signal: ema(config.signal),
        }
    }

    fn compute(&self, series: &[Price]) -> Self::Output {
        IndicatorError::check_len("MACD", self.config.required_len(), series.len())?;

        let fast = self.fast.compute(series)?;
        let slow = self.slow.compute(series)?;

        let macd_line: Vec<Price> = fast[self.config.slow_length() - self.config.fast_length()..]
            .iter()
            .zip(&slow)
            .map(|(fast, slow)| fast - slow)
            .collect();

        let signal_line = self.signal.compute(&macd_line)?;

        let overlap = &macd_line[macd_line.len() - signal_line.len()..];
        let histogram: Vec<Price> = overlap
            .iter()
            .zip(&signal_line)
            .map(|(macd, signal)| macd - signal)
            .collect();

        let (
            &[.., previous_macd, current_macd],
            &[.., previous_signal, current_signal],
            Some(&current_histogram),
        ) = (
            macd_line.as_slice(),
            signal_line.as_slice(),
            histogram.last(),
        )
        else {
            return Err(IndicatorError::InsufficientData {
                indicator: "MACD",
                required: self.config.required_len(),
                actual: series.len(),
            });
        };

        let cross = MacdCross::detect(previous_macd, previous_signal, current_macd, current_signal);
        let trend = MacdTrend::classify(current_histogram, current_macd - previous_macd);

        Ok(MacdValue {
            current_macd: round2(current_macd),
            current_signal: round2(current_signal),
            current_histogram: round2(current_histogram),
            trend,
            cross,
            macd_line,
            signal_line,
            histogram,
        })
    }

    #[inline]
    fn config(&self) -> &MacdConfig {
        &self.config
    }
}

impl Macd {
    /// Extracts the configured [`PriceSource`] from `bars` and computes.
    pub fn compute_bars<B: Ohlcv>(&self, bars: &[B]) -> Result<MacdValue> {
        self.compute(&self.config.source.series(bars))
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal, self.config.source
        )
    }
}

/// MACD of `series` with the given fast, slow and signal lengths.
///
/// # Errors
///
/// [`IndicatorError::InsufficientData`] when `series` is shorter than
/// `slow + signal`.
///
/// # Panics
///
/// Panics if `fast > slow`.
pub fn macd(
    series: &[Price],
    fast: NonZero<usize>,
    slow: NonZero<usize>,
    signal: NonZero<usize>,
) -> Result<MacdValue> {
    let config = MacdConfig::builder()
        .fast_length(fast)
        .length(slow)
        .signal_length(signal)
        .build();

    Macd::new(config).compute(series)
}
