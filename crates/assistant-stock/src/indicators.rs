//! Technical indicator calculations over daily closes
//!
//! All functions are pure and total: degenerate inputs (short series, zero
//! windows) yield `f64::NAN` or saturated values instead of errors or
//! panics. Callers render NAN into explicit wording.

use ta::Next;
use ta::indicators::ExponentialMovingAverage;

/// Fixed RSI lookback (Wilder-style 14 periods)
const RSI_PERIOD: f64 = 14.0;

/// MACD fast/slow/signal windows
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

/// MACD components at the last point of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    /// Fast EMA minus slow EMA
    pub macd: f64,
    /// 9-period EMA of the MACD line
    pub signal: f64,
    /// macd minus signal
    pub histogram: f64,
}

/// Arithmetic mean of the trailing `window` closes
///
/// A window of 0 or one exceeding the series length yields NAN.
pub fn simple_moving_average(closes: &[f64], window: usize) -> f64 {
    if window == 0 || window > closes.len() {
        return f64::NAN;
    }

    let tail = &closes[closes.len() - window..];
    tail.iter().sum::<f64>() / window as f64
}

/// Exponential moving average at the last point
///
/// Smoothing factor 2/(window+1), seeded with the first close and applied
/// forward over the whole series. A window of 0 or an empty series yields
/// NAN; a window of 1 reduces to the last close.
pub fn exponential_moving_average(closes: &[f64], window: usize) -> f64 {
    if window == 0 || closes.is_empty() {
        return f64::NAN;
    }

    ema_series(closes, window).last().copied().unwrap_or(f64::NAN)
}

/// 14-period relative strength index at the last point
///
/// Signed day-over-day deltas are split into gains and losses, each
/// smoothed exponentially with a 14-period center of mass (alpha = 1/14)
/// seeded from the first delta. When the average loss is zero the result
/// saturates to exactly 100. Fewer than 2 closes yields NAN.
pub fn relative_strength_index(closes: &[f64]) -> f64 {
    if closes.len() < 2 {
        return f64::NAN;
    }

    let alpha = 1.0 / RSI_PERIOD;
    let mut avg_gain = f64::NAN;
    let mut avg_loss = f64::NAN;

    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        if avg_gain.is_nan() {
            avg_gain = gain;
            avg_loss = loss;
        } else {
            avg_gain += alpha * (gain - avg_gain);
            avg_loss += alpha * (loss - avg_loss);
        }
    }

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// MACD (12/26) with a 9-period signal line, at the last point
pub fn macd(closes: &[f64]) -> Macd {
    if closes.is_empty() {
        return Macd {
            macd: f64::NAN,
            signal: f64::NAN,
            histogram: f64::NAN,
        };
    }

    let fast = ema_series(closes, MACD_FAST);
    let slow = ema_series(closes, MACD_SLOW);

    let macd_line: Vec<f64> = fast
        .iter()
        .zip(slow.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal = ema_series(&macd_line, MACD_SIGNAL)
        .last()
        .copied()
        .unwrap_or(f64::NAN);
    let macd = macd_line.last().copied().unwrap_or(f64::NAN);

    Macd {
        macd,
        signal,
        histogram: macd - signal,
    }
}

/// Run a series through a `ta` EMA, collecting every intermediate value
fn ema_series(values: &[f64], window: usize) -> Vec<f64> {
    let Ok(mut ema) = ExponentialMovingAverage::new(window) else {
        return vec![f64::NAN; values.len()];
    };

    values.iter().map(|&v| ema.next(v)).collect()
}
