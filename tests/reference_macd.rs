mod fixtures;

use fixtures::{
    assert_near, bar_index, closes, load_macd_latest_ref, load_macd_series_ref,
    load_reference_ohlcvs,
};
use crypto_ta::{Macd, MacdConfig};

const SERIES_PATH: &str = "tests/fixtures/data/macd-12-26-9-close.csv";
const LATEST_PATH: &str = "tests/fixtures/data/macd-12-26-9-latest.csv";

/// Tolerance for the full-precision series: 1e-6.
const TOLERANCE: f64 = 1e-6;

/// The `current_*` values are rounded to cents and computed with the
/// same operation order as the reference.
const ROUNDED_TOLERANCE: f64 = 1e-9;

#[test]
fn macd_12_26_9_series_matches_reference() {
    let bars = load_reference_ohlcvs();
    let reference = load_macd_series_ref(SERIES_PATH);

    let value = Macd::new(MacdConfig::default())
        .compute(&closes(&bars))
        .expect("enough bars for MACD(12, 26, 9)");

    assert_eq!(value.macd_line().len(), bars.len() - 25);
    assert_eq!(value.signal_line().len(), reference.len());
    assert_eq!(value.histogram().len(), reference.len());

    let offset = value.macd_line().len() - value.signal_line().len();
    for (i, expected) in reference.iter().enumerate() {
        let context = format!("MACD at output {i} (t={})", expected.open_time);
        assert_near(value.macd_line()[offset + i], expected.macd, TOLERANCE, &context);
        assert_near(value.signal_line()[i], expected.signal, TOLERANCE, &context);
        assert_near(value.histogram()[i], expected.histogram, TOLERANCE, &context);
    }
}

#[test]
fn macd_12_26_9_latest_matches_reference() {
    let bars = load_reference_ohlcvs();
    let series = closes(&bars);
    let reference = load_macd_latest_ref(LATEST_PATH);
    let macd = Macd::new(MacdConfig::default());

    let mut crosses = 0;
    for expected in &reference {
        let end = bar_index(&bars, expected.open_time) + 1;
        let context = format!("MACD over {end} bars (t={})", expected.open_time);
        let value = macd
            .compute(&series[..end])
            .unwrap_or_else(|e| panic!("{context}: {e}"));

        assert_near(value.current_macd(), expected.macd, ROUNDED_TOLERANCE, &context);
        assert_near(value.current_signal(), expected.signal, ROUNDED_TOLERANCE, &context);
        assert_near(
            value.current_histogram(),
            expected.histogram,
            ROUNDED_TOLERANCE,
            &context,
        );
        assert_eq!(value.trend().to_string(), expected.trend, "{context}");

        let cross = value.cross().map(|c| c.to_string()).unwrap_or_default();
        assert_eq!(cross, expected.cross, "{context}");
        if value.cross().is_some() {
            crosses += 1;
        }
    }

    assert!(crosses > 0, "fixture should exercise at least one cross");
}

#[test]
fn macd_needs_slow_plus_signal_bars() {
    let bars = load_reference_ohlcvs();
    let series = closes(&bars);
    let macd = Macd::new(MacdConfig::default());

    assert!(macd.compute(&series[..34]).is_err());
    assert!(macd.compute(&series[..35]).is_ok());
}
