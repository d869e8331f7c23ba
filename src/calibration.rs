//! Win-rate calibration.
//!
//! Raw engine win-rates cluster around 0.5 and say little about how bad a
//! mistake really was. The curve remaps them through the cumulative
//! distribution of a symmetric Beta-shaped density whose spread matches a
//! target standard deviation, which stretches differences near an even game
//! and compresses them once the game is decided.

use thiserror::Error;

/// Number of intervals in the cumulative lookup table.
const RESOLUTION: usize = 100_000;

const MIN_VARIANCE: f64 = 1e-10;
const MAX_DOUBLINGS: u32 = 256;
const MAX_BISECTIONS: u32 = 10_000;

/// Factor applied to the configured standard deviation for the curve that
/// only decides whether a suggestion is shown.
pub const DECISION_STDEV_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("standard deviation {0} is too small or not finite (variance must exceed 1e-10)")]
    InvalidParameter(f64),
}

/// Immutable monotonic step function over [0, 1].
#[derive(Debug, Clone)]
pub struct CalibrationCurve {
    shape: f64,
    table: Vec<f64>,
}

impl CalibrationCurve {
    pub fn new(stdev: f64) -> Result<Self, CalibrationError> {
        let variance = stdev * stdev;
        if !variance.is_finite() || variance <= MIN_VARIANCE {
            return Err(CalibrationError::InvalidParameter(stdev));
        }

        let shape = solve_shape(variance);
        let table = cumulative_table(shape);

        Ok(Self { shape, table })
    }

    /// Shape parameter `k` of the density `x^k (1-x)^k`.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Calibrated value of `x`; inputs outside [0, 1] are clamped.
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.5;
        }

        let pos = x.clamp(0.0, 1.0) * RESOLUTION as f64;
        let idx = (pos.floor() as usize).min(RESOLUTION - 1);
        let frac = pos - idx as f64;

        let lo = self.table[idx];
        let hi = self.table[idx + 1];
        lo + (hi - lo) * frac
    }
}

/// Variance of the density proportional to `x^k (1-x)^k` on [0, 1], i.e. of
/// Beta(k+1, k+1).
fn shape_variance(k: f64) -> f64 {
    1.0 / (4.0 * (2.0 * k + 3.0))
}

fn solve_shape(variance: f64) -> f64 {
    if variance >= shape_variance(0.0) {
        return 0.0;
    }

    let mut hi = 1.0;
    for _ in 0..MAX_DOUBLINGS {
        if shape_variance(hi) < variance {
            break;
        }
        hi *= 2.0;
    }

    let mut lo = 0.0;
    let mut mid = (lo + hi) / 2.0;
    for _ in 0..MAX_BISECTIONS {
        if shape_variance(mid) > variance {
            lo = mid;
        } else {
            hi = mid;
        }

        let next = (lo + hi) / 2.0;
        if next == mid {
            break;
        }
        mid = next;
    }

    mid
}

/// Density scaled so that its peak at 0.5 is 1. Evaluated in log space so
/// large shapes do not overflow.
fn density(k: f64, x: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return 0.0;
    }

    (k * x.ln() + k * (1.0 - x).ln() - 2.0 * k * 0.5f64.ln()).exp()
}

fn cumulative_table(k: f64) -> Vec<f64> {
    let step = 1.0 / RESOLUTION as f64;
    let mut table = Vec::with_capacity(RESOLUTION + 1);
    table.push(0.0);

    let mut total = 0.0;
    let mut prev = density(k, 0.0);
    for i in 1..=RESOLUTION {
        let current = density(k, i as f64 * step);
        total += (prev + current) * 0.5;
        table.push(total);
        prev = current;
    }

    if total > 0.0 {
        for value in table.iter_mut() {
            *value /= total;
        }
    }
    table[RESOLUTION] = 1.0;

    table
}
