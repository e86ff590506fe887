/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// OHLCV candle data supplied by the market data layer.
///
/// Implement this on your own kline/candle type to avoid per-candle
/// conversion. Single-series indicators extract the configured
/// [`PriceSource`](crate::PriceSource) from each bar; range-based indicators
/// read high, low and close through [`HlcSeries::from_bars`](crate::HlcSeries).
///
/// Slices of bars are expected oldest first.
///
/// # Example
///
/// ```
/// use crypto_ta::{Ohlcv, Price};
///
/// struct Kline {
///     o: f64, h: f64, l: f64, c: f64, v: f64,
/// }
///
/// impl Ohlcv for Kline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn volume(&self) -> f64 { self.v }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;

    /// Trade volume during the bar. Defaults to `0.0`.
    fn volume(&self) -> f64 {
        0.0
    }
}
