//! Time-stepped additive sine generator.

use super::WaveParameters;
use crate::{Error, Result, Signal};
use std::sync::Arc;

/// Produces one sample per tick from a shared [`WaveParameters`].
///
/// Each call to `sample()` evaluates `Σ a_i sin(f_i t + offset)` at the
/// current cursor and then advances the cursor by exactly one `timestep`.
/// The cursor is derived from an integer step count, so it never drifts and
/// never decreases (short of an explicit `reset()`).
///
/// Parameters are read at sample time: an edit made between two ticks is
/// visible on the next tick.
///
/// # Examples
///
/// ```
/// use lissajous::{SignalGenerator, WaveParameters};
/// use std::sync::Arc;
///
/// let wave = Arc::new(WaveParameters::new(vec![500.0], vec![90.0], 0.0).unwrap());
/// let mut generator = SignalGenerator::new(wave, 0.0003).unwrap();
///
/// assert_eq!(generator.sample(), 0.0); // sin(0)
/// assert_eq!(generator.time(), 0.0003);
/// ```
#[derive(Debug)]
pub struct SignalGenerator {
    params: Arc<WaveParameters>,
    timestep: f64,
    /// Samples produced since construction or the last reset
    steps: u64,
}

impl SignalGenerator {
    /// Creates a generator reading from `params`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `timestep` is not a positive finite number.
    pub fn new(params: Arc<WaveParameters>, timestep: f64) -> Result<Self> {
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "time step {} is not a positive finite number",
                timestep
            )));
        }
        Ok(Self {
            params,
            timestep,
            steps: 0,
        })
    }

    /// Evaluates the wave at the current cursor, then advances the cursor.
    pub fn sample(&mut self) -> f64 {
        let value = self.params.evaluate(self.time());
        self.steps += 1;
        value
    }

    /// Current cursor: `steps() * timestep()`.
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.timestep
    }

    /// Fixed time advanced per sample.
    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    /// Number of samples produced since construction or the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Parameters this generator reads from.
    pub fn params(&self) -> &Arc<WaveParameters> {
        &self.params
    }

    /// Rewinds the cursor to zero.
    pub fn reset(&mut self) {
        self.steps = 0;
    }
}

impl Signal for SignalGenerator {
    fn next_sample(&mut self) -> f64 {
        self.sample()
    }
}
