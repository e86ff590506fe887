use std::{fmt::Display, num::NonZero};

use crate::{
    Hlc, HlcSeries, Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, Ohlcv,
    Price, Result, round::round2, sma::rolling_mean,
};

/// Smoothed %K below this level is oversold.
pub const OVERSOLD: Price = 20.0;

/// Smoothed %K above this level is overbought.
pub const OVERBOUGHT: Price = 80.0;

const DEFAULT_LENGTH: NonZero<usize> = NonZero::new(14).unwrap();
const DEFAULT_SMOOTHING: NonZero<usize> = NonZero::new(3).unwrap();

/// Configuration for the [`Stochastic`] oscillator.
///
/// `length` is the high/low lookback for raw %K. `smooth_k` is the
/// SMA window applied to raw %K, `smooth_d` the SMA window applied to
/// smoothed %K to form %D.
///
/// # Example
///
/// ```
/// use crypto_ta::{IndicatorConfig, StochasticConfig};
///
/// let config = StochasticConfig::default();
/// assert_eq!(config.length(), 14);
/// assert_eq!(config.smooth_k(), 3);
/// assert_eq!(config.smooth_d(), 3);
///
/// // 14 bars for the first raw %K, 2 more for smoothed %K, 2 more for %D
/// assert_eq!(config.required_len(), 18);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct StochasticConfig {
    length: NonZero<usize>,
    smooth_k: NonZero<usize>,
    smooth_d: NonZero<usize>,
}

impl IndicatorConfig for StochasticConfig {
    type Builder = StochasticConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        StochasticConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length.get()
    }

    #[inline]
    fn required_len(&self) -> usize {
        self.length.get() + self.smooth_k.get() + self.smooth_d.get() - 2
    }
}

impl StochasticConfig {
    #[inline]
    #[must_use]
    pub fn smooth_k(&self) -> usize {
        self.smooth_k.get()
    }

    #[inline]
    #[must_use]
    pub fn smooth_d(&self) -> usize {
        self.smooth_d.get()
    }
}

impl Default for StochasticConfig {
    /// Stochastic(14, 3, 3).
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for StochasticConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StochasticConfig({}, {}, {})",
            self.length, self.smooth_k, self.smooth_d
        )
    }
}

/// Builder for [`StochasticConfig`].
///
/// Defaults: length = 14, `smooth_k` = 3, `smooth_d` = 3.
pub struct StochasticConfigBuilder {
    length: NonZero<usize>,
    smooth_k: NonZero<usize>,
    smooth_d: NonZero<usize>,
}

impl StochasticConfigBuilder {
    fn new() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            smooth_k: DEFAULT_SMOOTHING,
            smooth_d: DEFAULT_SMOOTHING,
        }
    }

    #[inline]
    #[must_use]
    pub fn smooth_k(mut self, smooth_k: NonZero<usize>) -> Self {
        self.smooth_k = smooth_k;
        self
    }

    #[inline]
    #[must_use]
    pub fn smooth_d(mut self, smooth_d: NonZero<usize>) -> Self {
        self.smooth_d = smooth_d;
        self
    }
}

impl IndicatorConfigBuilder<StochasticConfig> for StochasticConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length;
        self
    }

    #[inline]
    fn build(self) -> StochasticConfig {
        StochasticConfig {
            length: self.length,
            smooth_k: self.smooth_k,
            smooth_d: self.smooth_d,
        }
    }
}

/// Oversold or overbought crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StochasticSignal {
    /// %K crossed above %D while below [`OVERSOLD`].
    Buy,
    /// %K crossed below %D while above [`OVERBOUGHT`].
    Sell,
}

impl StochasticSignal {
    /// Both the crossover and the extreme zone are required.
    pub(crate) fn detect(
        previous_k: Price,
        previous_d: Price,
        current_k: Price,
        current_d: Price,
    ) -> Option<Self> {
        if previous_k < previous_d && current_k > current_d && current_k < OVERSOLD {
            Some(Self::Buy)
        } else if previous_k > previous_d && current_k < current_d && current_k > OVERBOUGHT {
            Some(Self::Sell)
        } else {
            None
        }
    }
}

impl Display for StochasticSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Latest smoothed %K and %D, rounded to two decimals, with the
/// crossover signal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochasticValue {
    k: Price,
    d: Price,
    signal: Option<StochasticSignal>,
}

impl StochasticValue {
    /// Smoothed %K.
    #[inline]
    #[must_use]
    pub fn k(&self) -> Price {
        self.k
    }

    /// %D: SMA of smoothed %K.
    #[inline]
    #[must_use]
    pub fn d(&self) -> Price {
        self.d
    }

    #[inline]
    #[must_use]
    pub fn signal(&self) -> Option<StochasticSignal> {
        self.signal
    }
}

impl Display for StochasticValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stoch(k: {}, d: {}", self.k, self.d)?;
        if let Some(signal) = self.signal {
            write!(f, ", {signal}")?;
        }
        f.write_str(")")
    }
}

/// Stochastic Oscillator.
///
/// ```text
/// raw %K[i] = (close[i] − lowest low) / (highest high − lowest low) × 100
/// %K        = SMA(raw %K, smooth_k)
/// %D        = SMA(%K, smooth_d)
/// ```
///
/// Highest high and lowest low are taken over the trailing `length`
/// bars ending at `i`. Columns of unequal length are cut to the
/// shortest one first. A flat window (highest high equal to lowest
/// low) has an undefined raw %K; it is carried as NaN and never
/// triggers a signal.
///
/// Only the latest %K, %D and signal are returned.
///
/// # Example
///
/// ```
/// use crypto_ta::{Hlc, Stochastic, StochasticConfig};
///
/// let closes: Vec<f64> = (0..20).map(|i| 100.0 + f64::from(i)).collect();
/// let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
/// let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
///
/// let stoch = Stochastic::new(StochasticConfig::default());
/// let value = stoch.compute(&Hlc::new(&highs, &lows, &closes)).unwrap();
///
/// // Steady rally: close sits one point under the window high
/// assert!(value.k() > 90.0);
/// assert_eq!(value.signal(), None);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Stochastic {
    config: StochasticConfig,
}

impl Indicator for Stochastic {
    type Config = StochasticConfig;
    type Input<'a> = Hlc<'a>;
    type Output = Result<StochasticValue>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn compute(&self, hlc: &Hlc<'_>) -> Self::Output {
        let hlc = hlc.truncated();
        let required = self.config.required_len();
        IndicatorError::check_len("Stochastic", required, hlc.len())?;

        let raw_k = self.raw_k(&hlc);
        let smoothed_k = rolling_mean(&raw_k, self.config.smooth_k());
        let d = rolling_mean(&smoothed_k, self.config.smooth_d());

        let (Some(&current_k), Some(&current_d)) = (smoothed_k.last(), d.last()) else {
            return Err(IndicatorError::InsufficientData {
                indicator: "Stochastic",
                required,
                actual: hlc.len(),
            });
        };

        let signal = match (smoothed_k.as_slice(), d.as_slice()) {
            (&[.., previous_k, _], &[.., previous_d, _]) => {
                StochasticSignal::detect(previous_k, previous_d, current_k, current_d)
            }
            _ => None,
        };

        Ok(StochasticValue {
            k: round2(current_k),
            d: round2(current_d),
            signal,
        })
    }

    #[inline]
    fn config(&self) -> &StochasticConfig {
        &self.config
    }
}

impl Stochastic {
    /// Reads high, low and close from `bars` and computes.
    pub fn compute_bars<B: Ohlcv>(&self, bars: &[B]) -> Result<StochasticValue> {
        self.compute(&HlcSeries::from_bars(bars).as_hlc())
    }

    fn raw_k(&self, hlc: &Hlc<'_>) -> Vec<Price> {
        let length = self.config.length();

        hlc.high
            .windows(length)
            .zip(hlc.low.windows(length))
            .zip(&hlc.close[length - 1..])
            .map(|((highs, lows), &close)| {
                let highest = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let lowest = lows.iter().copied().fold(f64::INFINITY, f64::min);
                let range = highest - lowest;

                if range == 0.0 {
                    f64::NAN
                } else {
                    (close - lowest) / range * 100.0
                }
            })
            .collect()
    }
}

impl Display for Stochastic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stoch({}, {}, {})",
            self.config.length, self.config.smooth_k, self.config.smooth_d
        )
    }
}

/// Stochastic oscillator over separate high, low and close columns.
///
/// # Errors
///
/// [`IndicatorError::InsufficientData`] when the shortest column holds fewer
/// than `length + smooth_k + smooth_d − 2` values.
pub fn stochastic(
    highs: &[Price],
    lows: &[Price],
    closes: &[Price],
    length: NonZero<usize>,
    smooth_k: NonZero<usize>,
    smooth_d: NonZero<usize>,
) -> Result<StochasticValue> {
    let config = StochasticConfig::builder()
        .length(length)
        .smooth_k(smooth_k)
        .smooth_d(smooth_d)
        .build();

    Stochastic::new(config).compute(&Hlc::new(highs, lows, closes))
}
