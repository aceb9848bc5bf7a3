//! The `Signal` trait: anything that yields one scalar per tick.

/// A time-stepped sample source driven by an external tick.
///
/// Every call to `next_sample()` consumes exactly one tick of the source's
/// own clock. Sources are independent: two signals only stay in lockstep when
/// the same tick source drives both.
pub trait Signal {
    /// Generates the next sample and advances the source by one tick.
    fn next_sample(&mut self) -> f64;
}
