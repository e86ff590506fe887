use crate::{Ohlcv, Price};

/// Borrowed high/low/close columns, oldest first.
///
/// Range-based indicators ([`Stochastic`](crate::Stochastic),
/// [`Cci`](crate::Cci)) read their input through this view. A column the
/// caller does not have is represented by an empty slice. Columns of unequal
/// length are cut to the shortest one before computing, keeping the oldest
/// values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hlc<'a> {
    pub high: &'a [Price],
    pub low: &'a [Price],
    pub close: &'a [Price],
}

impl<'a> Hlc<'a> {
    #[must_use]
    pub fn new(high: &'a [Price], low: &'a [Price], close: &'a [Price]) -> Self {
        Self { high, low, close }
    }

    /// Shortest common length of the three columns.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.high.len().min(self.low.len()).min(self.close.len())
    }

    /// `true` when any column is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All three columns cut to [`len`](Self::len).
    #[must_use]
    pub fn truncated(&self) -> Self {
        let len = self.len();
        Self {
            high: &self.high[..len],
            low: &self.low[..len],
            close: &self.close[..len],
        }
    }
}

/// Owned high/low/close columns extracted from a slice of bars.
///
/// # Example
///
/// ```
/// use crypto_ta::{HlcSeries, Ohlcv, Price};
/// # struct Bar(f64, f64, f64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.2 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.1 }
/// #     fn close(&self) -> Price { self.2 }
/// # }
///
/// let bars = [Bar(11.0, 9.0, 10.0), Bar(12.0, 10.0, 11.0)];
/// let series = HlcSeries::from_bars(&bars);
///
/// assert_eq!(series.as_hlc().high, &[11.0, 12.0]);
/// assert_eq!(series.as_hlc().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HlcSeries {
    high: Vec<Price>,
    low: Vec<Price>,
    close: Vec<Price>,
}

impl HlcSeries {
    #[must_use]
    pub fn from_bars<B: Ohlcv>(bars: &[B]) -> Self {
        let mut series = Self {
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
        };

        for bar in bars {
            series.high.push(bar.high());
            series.low.push(bar.low());
            series.close.push(bar.close());
        }

        series
    }

    #[must_use]
    pub fn as_hlc(&self) -> Hlc<'_> {
        Hlc::new(&self.high, &self.low, &self.close)
    }
}
