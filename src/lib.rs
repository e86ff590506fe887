//! Technical analysis indicators for a crypto market dashboard.
//!
//! Indicators run over whole price series, oldest value first, and
//! return typed results: [`Sma`], [`Ema`], [`Rsi`], [`Macd`],
//! [`Stochastic`] and [`Cci`]. Computations are pure; one indicator
//! instance can be shared across threads and assets.
//!
//! Indicators that need a minimum history either fail with
//! [`IndicatorError::InsufficientData`] (moving averages, MACD,
//! Stochastic) or degrade to a sentinel value (RSI returns
//! [`NEUTRAL_RSI`], CCI pads with NaN). [`IndicatorSet`] combines them
//! into a per-asset [`AssetSnapshot`] across timeframes.
//!
//! Each indicator type exposes [`new`](Sma::new),
//! [`compute`](Sma::compute) and [`config`](Sma::config) as inherent
//! methods, so no trait import is needed. Import [`Indicator`] only for
//! generic code. Free functions ([`ema`], [`rsi`], [`macd`], ...) cover
//! the common one-off calls.

mod cci;
mod ema;
mod error;
mod hlc;
mod indicator;
mod macd;
mod ohlcv;
mod price_source;
mod round;
mod rsi;
mod sma;
mod snapshot;
mod stochastic;

pub use crate::error::{IndicatorError, Result};
pub use crate::hlc::{Hlc, HlcSeries};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Ohlcv, Price};
pub use crate::price_source::PriceSource;

pub use crate::cci::{CCI_SCALE, Cci, CciConfig, CciConfigBuilder, cci, latest_cci};
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder, ema};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdCross, MacdTrend, MacdValue, macd};
pub use crate::rsi::{NEUTRAL_RSI, Rsi, RsiConfig, RsiConfigBuilder, rsi};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder, sma};
pub use crate::snapshot::{AssetSnapshot, IndicatorSet, Timeframe, TimeframeIndicators};
pub use crate::stochastic::{
    OVERBOUGHT, OVERSOLD, Stochastic, StochasticConfig, StochasticConfigBuilder,
    StochasticSignal, StochasticValue, stochastic,
};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $input:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&self, input: &$input) -> $output {
                <Self as Indicator>::compute(self, input)
            }

            /// See [`Indicator::config`].
            #[must_use]
            #[inline]
            pub fn config(&self) -> &$config {
                <Self as Indicator>::config(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, [Price], Result<Vec<Price>>);
impl_indicator_methods!(Ema, EmaConfig, [Price], Result<Vec<Price>>);
impl_indicator_methods!(Rsi, RsiConfig, [Price], Price);
impl_indicator_methods!(Macd, MacdConfig, [Price], Result<MacdValue>);
impl_indicator_methods!(Stochastic, StochasticConfig, Hlc<'_>, Result<StochasticValue>);
impl_indicator_methods!(Cci, CciConfig, Hlc<'_>, Vec<Price>);

#[cfg(test)]
mod test_util;
