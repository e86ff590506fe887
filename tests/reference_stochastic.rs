mod fixtures;

use fixtures::{assert_near, bar_index, load_reference_ohlcvs, load_stochastic_ref};
use crypto_ta::{HlcSeries, Stochastic, StochasticConfig, StochasticSignal};

const REF_PATH: &str = "tests/fixtures/data/stoch-14-3-3.csv";

/// Tolerance: 1e-9. Both %K and %D are rounded to two decimals.
const TOLERANCE: f64 = 1e-9;

#[test]
fn stochastic_14_3_3_matches_reference() {
    let bars = load_reference_ohlcvs();
    let reference = load_stochastic_ref(REF_PATH);
    let stoch = Stochastic::new(StochasticConfig::default());

    let (mut buys, mut sells) = (0, 0);
    for expected in &reference {
        let end = bar_index(&bars, expected.open_time) + 1;
        let context = format!("Stoch(14, 3, 3) over {end} bars (t={})", expected.open_time);
        let value = stoch
            .compute_bars(&bars[..end])
            .unwrap_or_else(|e| panic!("{context}: {e}"));

        assert_near(value.k(), expected.k, TOLERANCE, &context);
        assert_near(value.d(), expected.d, TOLERANCE, &context);

        let signal = value.signal().map(|s| s.to_string()).unwrap_or_default();
        assert_eq!(signal, expected.signal, "{context}");
        match value.signal() {
            Some(StochasticSignal::Buy) => buys += 1,
            Some(StochasticSignal::Sell) => sells += 1,
            None => {}
        }
    }

    assert!(buys > 0 && sells > 0, "fixture should exercise both signals");
}

#[test]
fn stochastic_hlc_input_matches_bars() {
    let bars = load_reference_ohlcvs();
    let series = HlcSeries::from_bars(&bars);
    let stoch = Stochastic::new(StochasticConfig::default());

    assert_eq!(stoch.compute(&series.as_hlc()), stoch.compute_bars(&bars));
}

#[test]
fn stochastic_needs_eighteen_bars() {
    let bars = load_reference_ohlcvs();
    let stoch = Stochastic::new(StochasticConfig::default());

    assert!(stoch.compute_bars(&bars[..17]).is_err());
    assert!(stoch.compute_bars(&bars[..18]).is_ok());
}
