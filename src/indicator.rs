use std::{
    fmt::{Debug, Display},
    hash::Hash,
    num::NonZero,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (lengths, smoothing windows, price source). Configs are value types: cheap
/// to copy, compare, and hash.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder.
    fn builder() -> Self::Builder;

    /// Primary window length (number of values).
    fn length(&self) -> usize;

    /// Minimum input length for which the indicator produces a regular value.
    ///
    /// Below this, fallible indicators return
    /// [`IndicatorError::InsufficientData`](crate::IndicatorError) and
    /// degrading ones fall back to their sentinel output.
    fn required_len(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the primary window length.
    #[must_use]
    fn length(self, length: NonZero<usize>) -> Self;

    /// Builds the config. Panics if required fields are missing or the
    /// combination of parameters is invalid.
    #[must_use]
    fn build(self) -> Config;
}

/// A batch technical indicator.
///
/// Indicators are stateless: [`compute`](Indicator::compute) is a pure
/// function of the config and the input series, so one instance can be shared
/// across threads and reused for any number of series. Input series are
/// ordered oldest first.
///
/// # Example
///
/// ```
/// use crypto_ta::{Indicator, IndicatorConfig, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let sma = Sma::new(SmaConfig::close(NonZero::new(3).unwrap()));
///
/// assert_eq!(sma.compute(&[10.0, 20.0, 30.0, 40.0]), Ok(vec![20.0, 30.0]));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Input series: a price slice for single-series indicators, an
    /// [`Hlc`](crate::Hlc) triple for range-based ones.
    type Input<'a>: ?Sized;

    /// Computed output. Fallible indicators return a
    /// [`Result`](crate::Result); degrading ones return the value directly.
    type Output;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Runs the indicator over the whole input series.
    fn compute(&self, input: &Self::Input<'_>) -> Self::Output;

    /// Config this indicator was built from.
    fn config(&self) -> &Self::Config;
}
