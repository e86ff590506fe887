use crate::{Ohlcv, Price};

use std::fmt::{Debug, Display};

/// Price extracted from each [`Ohlcv`] bar before feeding a single-series
/// indicator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Closing price.
    #[default]
    Close,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Close => ohlcv.close(),
            Self::Low => ohlcv.low(),
            Self::HL2 => f64::midpoint(ohlcv.high(), ohlcv.low()),
            Self::HLC3 => typical_price(ohlcv.high(), ohlcv.low(), ohlcv.close()),
            Self::OHLC4 => (ohlcv.open() + ohlcv.high() + ohlcv.low() + ohlcv.close()) / 4.0,
        }
    }

    /// Extracts this source from every bar, preserving order.
    #[must_use]
    pub fn series<B: Ohlcv>(self, bars: &[B]) -> Vec<Price> {
        bars.iter().map(|bar| self.extract(bar)).collect()
    }
}

#[inline]
pub(crate) fn typical_price(high: Price, low: Price, close: Price) -> Price {
    (high + low + close) / 3.0
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{Bar, assert_approx};

    fn bar() -> Bar {
        Bar::new(10.0, 30.0, 5.0, 20.0)
    }

    #[test]
    fn extract_open() {
        assert_eq!(PriceSource::Open.extract(&bar()), 10.0);
    }

    #[test]
    fn extract_high() {
        assert_eq!(PriceSource::High.extract(&bar()), 30.0);
    }

    #[test]
    fn extract_low() {
        assert_eq!(PriceSource::Low.extract(&bar()), 5.0);
    }

    #[test]
    fn extract_close() {
        assert_eq!(PriceSource::Close.extract(&bar()), 20.0);
    }

    #[test]
    fn extract_hl2() {
        // (30 + 5) / 2 = 17.5
        assert_eq!(PriceSource::HL2.extract(&bar()), 17.5);
    }

    #[test]
    fn extract_hlc3() {
        // (30 + 5 + 20) / 3 = 18.333...
        assert_approx!(PriceSource::HLC3.extract(&bar()), 55.0 / 3.0);
    }

    #[test]
    fn extract_ohlc4() {
        // (10 + 30 + 5 + 20) / 4 = 16.25
        assert_eq!(PriceSource::OHLC4.extract(&bar()), 16.25);
    }

    #[test]
    fn series_keeps_bar_order() {
        let bars = [
            Bar::new(1.0, 4.0, 0.5, 2.0),
            Bar::new(2.0, 5.0, 1.5, 3.0),
            Bar::new(3.0, 6.0, 2.5, 4.0),
        ];
        assert_eq!(PriceSource::Close.series(&bars), vec![2.0, 3.0, 4.0]);
        assert_eq!(PriceSource::High.series(&bars), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn series_of_empty_slice_is_empty() {
        let bars: [Bar; 0] = [];
        assert!(PriceSource::Close.series(&bars).is_empty());
    }
}
