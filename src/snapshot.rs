//! Per-asset aggregation of indicators across timeframes.
//!
//! A dashboard row shows RSI, MACD and the latest CCI for the daily,
//! 4-hour and 1-hour candles of an asset, plus a daily Stochastic.
//! Each indicator is computed independently: one failing for lack of
//! history leaves the others intact.

use std::fmt::Display;

use tracing::debug;

use crate::{
    Cci, CciConfig, Macd, MacdConfig, MacdValue, Ohlcv, Price, Rsi,
    RsiConfig, Stochastic, StochasticConfig, StochasticValue, cci::latest_cci,
};

/// Candle interval of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timeframe {
    Daily,
    H4,
    H1,
}

impl Timeframe {
    pub const ALL: [Self; 3] = [Self::Daily, Self::H4, Self::H1];
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Daily => "1D",
            Self::H4 => "4H",
            Self::H1 => "1H",
        })
    }
}

/// Indicators computed from one timeframe's bars.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeframeIndicators {
    rsi: Price,
    macd: Option<MacdValue>,
    cci: Price,
}

impl TimeframeIndicators {
    /// Default indicators over one timeframe's bars.
    ///
    /// See [`IndicatorSet::timeframe`].
    #[must_use]
    pub fn compute<B: Ohlcv>(bars: &[B]) -> Self {
        IndicatorSet::default().timeframe(bars)
    }

    /// RSI, neutral when history is short.
    #[inline]
    #[must_use]
    pub fn rsi(&self) -> Price {
        self.rsi
    }

    /// MACD, `None` when history is short.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Option<&MacdValue> {
        self.macd.as_ref()
    }

    /// Latest CCI value, NaN when unavailable.
    #[inline]
    #[must_use]
    pub fn cci(&self) -> Price {
        self.cci
    }
}

/// Indicator values for one asset across all timeframes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetSnapshot {
    daily: TimeframeIndicators,
    h4: TimeframeIndicators,
    h1: TimeframeIndicators,
    stochastic: Option<StochasticValue>,
}

impl AssetSnapshot {
    /// Default indicators for one asset.
    ///
    /// See [`IndicatorSet::snapshot`].
    #[must_use]
    pub fn compute<B: Ohlcv>(daily: &[B], h4: &[B], h1: &[B]) -> Self {
        IndicatorSet::default().snapshot(daily, h4, h1)
    }

    #[must_use]
    pub fn timeframe(&self, timeframe: Timeframe) -> &TimeframeIndicators {
        match timeframe {
            Timeframe::Daily => &self.daily,
            Timeframe::H4 => &self.h4,
            Timeframe::H1 => &self.h1,
        }
    }

    /// Daily Stochastic, `None` when history is short.
    #[inline]
    #[must_use]
    pub fn stochastic(&self) -> Option<StochasticValue> {
        self.stochastic
    }
}

/// The set of indicators shown per asset.
///
/// Defaults: RSI(14), MACD(12, 26, 9) and CCI(20) per timeframe,
/// Stochastic(14, 3, 3) on daily bars. The set is `Copy` and
/// stateless, so one instance can serve any number of assets from
/// any number of threads.
///
/// # Example
///
/// ```
/// use crypto_ta::{IndicatorSet, Ohlcv, Price, Timeframe};
/// # struct Bar(f64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 + 1.0 }
/// #     fn low(&self) -> Price { self.0 - 1.0 }
/// #     fn close(&self) -> Price { self.0 }
/// # }
///
/// let daily: Vec<Bar> = (0..60).map(|i| Bar(100.0 + f64::from(i))).collect();
/// let hourly: Vec<Bar> = (0..10).map(|i| Bar(100.0 + f64::from(i))).collect();
///
/// let snapshot = IndicatorSet::default().snapshot(&daily, &daily, &hourly);
///
/// assert!(snapshot.timeframe(Timeframe::Daily).macd().is_some());
/// // Ten hourly bars are not enough for MACD; daily values are unaffected.
/// assert!(snapshot.timeframe(Timeframe::H1).macd().is_none());
/// assert_eq!(snapshot.timeframe(Timeframe::H1).rsi(), 50.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSet {
    rsi: Rsi,
    macd: Macd,
    cci: Cci,
    stochastic: Stochastic,
}

impl Default for IndicatorSet {
    fn default() -> Self {
        Self::new(
            RsiConfig::default(),
            MacdConfig::default(),
            CciConfig::default(),
            StochasticConfig::default(),
        )
    }
}

impl IndicatorSet {
    #[must_use]
    pub fn new(
        rsi: RsiConfig,
        macd: MacdConfig,
        cci: CciConfig,
        stochastic: StochasticConfig,
    ) -> Self {
        Self {
            rsi: Rsi::new(rsi),
            macd: Macd::new(macd),
            cci: Cci::new(cci),
            stochastic: Stochastic::new(stochastic),
        }
    }

    /// RSI, MACD and latest CCI for one timeframe's bars.
    ///
    /// RSI and MACD read the [`PriceSource`](crate::PriceSource) of their configs, closing
    /// price by default.
    #[must_use]
    pub fn timeframe<B: Ohlcv>(&self, bars: &[B]) -> TimeframeIndicators {
        let macd = match self.macd.compute_bars(bars) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(%err, "MACD unavailable for timeframe");
                None
            }
        };

        TimeframeIndicators {
            rsi: self.rsi.compute_bars(bars),
            macd,
            cci: latest_cci(&self.cci.compute_bars(bars)),
        }
    }

    /// Full snapshot for one asset.
    #[must_use]
    pub fn snapshot<B: Ohlcv>(&self, daily: &[B], h4: &[B], h1: &[B]) -> AssetSnapshot {
        let stochastic = match self.stochastic.compute_bars(daily) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(%err, "Stochastic unavailable for daily bars");
                None
            }
        };

        AssetSnapshot {
            daily: self.timeframe(daily),
            h4: self.timeframe(h4),
            h1: self.timeframe(h1),
            stochastic,
        }
    }
}
