//! Synthetic convergence curve produced by the simulation runner.
//!
//! A run emits [`ITERATIONS`] samples. Sample `i` is taken at
//! `10 + 10 * i` elapsed seconds and its loss follows
//! `0.1 / ln(seconds + 1)`, clamped into `[0, 1]` and rounded to three
//! decimal places. The constants are fixed: the curve is mock telemetry,
//! not the output of a real solver.

use std::time::Duration;

/// Number of samples generated per run.
pub const ITERATIONS: u32 = 10;

/// Elapsed seconds of the first sample.
pub const FIRST_SAMPLE_SECONDS: i32 = 10;

/// Elapsed seconds between consecutive samples.
pub const SAMPLE_STEP_SECONDS: i32 = 10;

/// Wall-clock pause after each iteration of a run.
pub const ITERATION_DELAY: Duration = Duration::from_secs(1);

const LOSS_SCALE: f64 = 0.1;
const LOG_OFFSET: f64 = 1.0;

/// One generated point of the loss curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub seconds: i32,
    pub loss: f64,
}

/// Elapsed seconds reported for the zero-based `iteration`.
pub fn elapsed_seconds(iteration: u32) -> i32 {
    // ITERATIONS is tiny; the cast cannot truncate for any real run.
    FIRST_SAMPLE_SECONDS + SAMPLE_STEP_SECONDS * iteration as i32
}

/// Loss value at `seconds` elapsed, clamped to `[0, 1]` and rounded to
/// three decimals.
pub fn loss_at(seconds: i32) -> f64 {
    let raw = LOSS_SCALE / (f64::from(seconds) + LOG_OFFSET).ln();
    if raw.is_nan() {
        return 0.0;
    }
    round_to_millis(raw.clamp(0.0, 1.0))
}

/// The sample produced by the zero-based `iteration`.
pub fn sample(iteration: u32) -> Sample {
    let seconds = elapsed_seconds(iteration);
    Sample {
        seconds,
        loss: loss_at(seconds),
    }
}

/// Every sample of a full run, in emission order.
pub fn schedule() -> impl Iterator<Item = Sample> {
    (0..ITERATIONS).map(sample)
}

fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
