#![allow(dead_code)]

use crypto_ta::{Ohlcv, Price};
use serde::{Deserialize, de::DeserializeOwned};

/// Daily OHLCV bar parsed from CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub open_time: u64,
    pub expected: f64,
}

/// Reference MACD series point, aligned with the signal line.
#[derive(Debug, Deserialize)]
pub struct RefMacdPoint {
    pub open_time: u64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Reference latest MACD for the series ending at `open_time`.
/// `cross` is empty when no cross occurred.
#[derive(Debug, Deserialize)]
pub struct RefMacdLatest {
    pub open_time: u64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub trend: String,
    pub cross: String,
}

/// Reference latest Stochastic for the series ending at `open_time`.
/// `signal` is empty when no signal fired.
#[derive(Debug, Deserialize)]
pub struct RefStochastic {
    pub open_time: u64,
    pub k: f64,
    pub d: f64,
    pub signal: String,
}

const OHLCV_PATH: &str = "tests/fixtures/data/btcusdt-1d.csv";

/// Load reference daily OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

pub fn closes(bars: &[RefBar]) -> Vec<Price> {
    bars.iter().map(|bar| bar.close).collect()
}

/// Load single-value reference data (SMA, EMA, RSI, CCI).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

pub fn load_macd_series_ref(path: &str) -> Vec<RefMacdPoint> {
    load_records(path, "invalid MACD reference record")
}

pub fn load_macd_latest_ref(path: &str) -> Vec<RefMacdLatest> {
    load_records(path, "invalid MACD latest reference record")
}

pub fn load_stochastic_ref(path: &str) -> Vec<RefStochastic> {
    load_records(path, "invalid Stochastic reference record")
}

/// Index of the bar with `open_time`.
pub fn bar_index(bars: &[RefBar], open_time: u64) -> usize {
    bars.iter()
        .position(|bar| bar.open_time == open_time)
        .unwrap_or_else(|| panic!("no bar at t={open_time}"))
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Asserts that a series output ends on the last reference row and
/// matches every reference value aligned from the end.
pub fn assert_series_matches(
    name: &str,
    bars: &[RefBar],
    actual: &[f64],
    reference: &[RefValue],
    tolerance: f64,
) {
    assert_eq!(
        actual.len(),
        reference.len(),
        "{name}: output length differs from reference"
    );
    assert_eq!(
        reference.last().map(|r| r.open_time),
        bars.last().map(|b| b.open_time),
        "{name}: reference does not end on the last bar"
    );

    for (i, (value, expected)) in actual.iter().zip(reference).enumerate() {
        assert_near(
            *value,
            expected.expected,
            tolerance,
            &format!("{name} at output {i} (t={})", expected.open_time),
        );
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
