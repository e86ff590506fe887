use std::{fmt::Display, num::NonZero};

use tracing::warn;

use crate::{
    Hlc, HlcSeries, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price,
    price_source::typical_price,
};

/// Lambert's constant: scales CCI so roughly 70–80% of values fall
/// within ±100.
pub const CCI_SCALE: f64 = 0.015;

const DEFAULT_LENGTH: NonZero<usize> = NonZero::new(20).unwrap();

/// Configuration for the Commodity Channel Index ([`Cci`]).
///
/// # Example
///
/// ```
/// use crypto_ta::{CciConfig, IndicatorConfig};
///
/// assert_eq!(CciConfig::default().length(), 20);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct CciConfig {
    length: NonZero<usize>,
}

impl IndicatorConfig for CciConfig {
    type Builder = CciConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        CciConfigBuilder {
            length: DEFAULT_LENGTH,
        }
    }

    #[inline]
    fn length(&self) -> usize {
        self.length.get()
    }

    #[inline]
    fn required_len(&self) -> usize {
        self.length.get()
    }
}

impl Default for CciConfig {
    /// CCI(20).
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for CciConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CciConfig({})", self.length)
    }
}

/// Builder for [`CciConfig`]. Default length is 20.
pub struct CciConfigBuilder {
    length: NonZero<usize>,
}

impl IndicatorConfigBuilder<CciConfig> for CciConfigBuilder {
    #[inline]
    fn length(mut self, length: NonZero<usize>) -> Self {
        self.length = length;
        self
    }

    #[inline]
    fn build(self) -> CciConfig {
        CciConfig {
            length: self.length,
        }
    }
}

/// Commodity Channel Index (CCI).
///
/// For each bar with a full trailing window of `length` typical
/// prices `tp = (high + low + close) / 3`:
///
/// ```text
/// sma      = mean(window)
/// mean_dev = mean(|tp − sma| for tp in window)
/// CCI      = (tp − sma) / (0.015 × mean_dev)
/// ```
///
/// The output is aligned 1:1 with the (truncated) input: the first
/// `length − 1` entries are NaN. A window with zero mean deviation
/// yields `0` rather than NaN.
///
/// CCI never fails. Missing or empty columns give an empty series;
/// fewer than `length` bars give an all-NaN series. Both cases are
/// logged as warnings.
///
/// # Example
///
/// ```
/// use crypto_ta::{Cci, CciConfig, Hlc, IndicatorConfigBuilder, IndicatorConfig};
/// use std::num::NonZero;
///
/// let cci = Cci::new(CciConfig::builder().length(NonZero::new(3).unwrap()).build());
///
/// let highs = [11.0, 12.0, 13.0, 14.0];
/// let lows = [9.0, 10.0, 11.0, 12.0];
/// let closes = [10.0, 11.0, 12.0, 13.0];
/// let values = cci.compute(&Hlc::new(&highs, &lows, &closes));
///
/// assert_eq!(values.len(), 4);
/// assert!(values[0].is_nan() && values[1].is_nan());
/// assert!((values[3] - 100.0).abs() < 1e-9);
///
/// assert!(cci.compute(&Hlc::new(&[], &lows, &closes)).is_empty());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cci {
    config: CciConfig,
}

impl Indicator for Cci {
    type Config = CciConfig;
    type Input<'a> = Hlc<'a>;
    type Output = Vec<Price>;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn compute(&self, hlc: &Hlc<'_>) -> Vec<Price> {
        if hlc.is_empty() {
            warn!(
                high = hlc.high.len(),
                low = hlc.low.len(),
                close = hlc.close.len(),
                "CCI input has a missing or empty column"
            );
            return Vec::new();
        }

        let hlc = hlc.truncated();
        let length = self.config.length();

        if hlc.len() < length {
            warn!(
                required = length,
                actual = hlc.len(),
                "not enough data to calculate CCI"
            );
            return vec![f64::NAN; hlc.len()];
        }

        let typical: Vec<Price> = hlc
            .high
            .iter()
            .zip(hlc.low)
            .zip(hlc.close)
            .map(|((&high, &low), &close)| typical_price(high, low, close))
            .collect();

        let mut values = vec![f64::NAN; length - 1];
        values.extend(typical.windows(length).map(Self::window_cci));

        values
    }

    #[inline]
    fn config(&self) -> &CciConfig {
        &self.config
    }
}

impl Cci {
    /// Reads high, low and close from `bars` and computes.
    pub fn compute_bars<B: Ohlcv>(&self, bars: &[B]) -> Vec<Price> {
        self.compute(&HlcSeries::from_bars(bars).as_hlc())
    }

    /// CCI of the last typical price in `window`.
    #[allow(clippy::cast_precision_loss)]
    fn window_cci(window: &[Price]) -> Price {
        let divisor = window.len() as f64;
        let sma = window.iter().sum::<Price>() / divisor;
        let mean_deviation = window.iter().map(|tp| (tp - sma).abs()).sum::<Price>() / divisor;

        if mean_deviation == 0.0 {
            return 0.0;
        }

        let current = window[window.len() - 1];
        (current - sma) / (CCI_SCALE * mean_deviation)
    }
}

impl Display for Cci {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CCI({})", self.config.length)
    }
}

/// Commodity channel index over `hlc`.
///
/// Never fails; see [`Cci`] for the degraded outputs.
#[must_use]
pub fn cci(hlc: &Hlc<'_>, length: NonZero<usize>) -> Vec<Price> {
    Cci::new(CciConfig::builder().length(length).build()).compute(hlc)
}

/// Most recent CCI value, NaN when there is none.
#[must_use]
pub fn latest_cci(values: &[Price]) -> Price {
    values.last().copied().unwrap_or(f64::NAN)
}
