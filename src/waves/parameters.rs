//! Observable per-axis wave parameters.

use crate::config::{AxisConfig, OFFSET_MAX, OFFSET_MIN};
use crate::{Error, Result};
use std::f64::consts::TAU;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Zero-argument change callback.
pub type Listener = Box<dyn FnMut() + Send>;

/// Handle returned by [`WaveParameters::register_listener`], used to remove the
/// listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct State {
    /// Degrees
    offset: f64,
    frequencies: Vec<f64>,
    amplitudes: Vec<f64>,
}

impl State {
    fn evaluate(&self, t: f64) -> f64 {
        let offset = self.offset * (TAU / 360.0);
        self.frequencies
            .iter()
            .zip(&self.amplitudes)
            .map(|(f, a)| a * (f * t + offset).sin())
            .sum()
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    fn notify(&mut self) {
        for (_, listener) in self.entries.iter_mut() {
            listener();
        }
    }
}

/// The observable parameter bundle of one axis: a phase offset plus
/// index-aligned frequency and amplitude lists.
///
/// The number of constituents is fixed at construction. Every successful
/// mutation synchronously calls each registered listener once, in
/// registration order, even when the new value equals the old one.
///
/// `WaveParameters` is meant to be shared behind an `Arc`: readers such as
/// [`SignalGenerator`](crate::SignalGenerator) always see the latest values,
/// and a mutation together with its notifications is serialized against other
/// mutations.
///
/// Listeners must not mutate, or register listeners on, the instance that is
/// notifying them: the listener list is locked for the duration of the
/// notification and such a call deadlocks.
///
/// # Examples
///
/// ```
/// use lissajous::WaveParameters;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let wave = WaveParameters::new(vec![400.0, 500.0], vec![0.0, 0.0], 0.0).unwrap();
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = hits.clone();
/// wave.register_listener(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// wave.set_amplitude(1, 90.0).unwrap();
/// assert_eq!(wave.amplitude(1), Some(90.0));
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct WaveParameters {
    state: RwLock<State>,
    listeners: Mutex<Listeners>,
}

impl WaveParameters {
    /// Creates a parameter bundle.
    ///
    /// # Arguments
    ///
    /// * `frequencies` - Positive, finite constituent frequencies
    /// * `amplitudes` - One finite amplitude per frequency
    /// * `offset` - Phase offset in degrees, within `[0, 360]`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the lists are empty, differ in length, hold a
    /// frequency that is not positive and finite, or hold a non-finite
    /// amplitude. `OffsetOutOfRange` when the offset is outside `[0, 360]`.
    pub fn new(frequencies: Vec<f64>, amplitudes: Vec<f64>, offset: f64) -> Result<Self> {
        if frequencies.len() != amplitudes.len() {
            return Err(Error::InvalidArgument(format!(
                "{} frequencies but {} amplitudes",
                frequencies.len(),
                amplitudes.len()
            )));
        }
        if frequencies.is_empty() {
            return Err(Error::InvalidArgument(
                "an axis needs at least one constituent frequency".into(),
            ));
        }
        if let Some(bad) = frequencies.iter().find(|f| !(f.is_finite() && **f > 0.0)) {
            return Err(Error::InvalidArgument(format!(
                "frequency {} is not a positive finite number",
                bad
            )));
        }
        if let Some(bad) = amplitudes.iter().find(|a| !a.is_finite()) {
            return Err(Error::InvalidArgument(format!("amplitude {} is not finite", bad)));
        }
        check_offset(offset)?;

        Ok(Self {
            state: RwLock::new(State {
                offset,
                frequencies,
                amplitudes,
            }),
            listeners: Mutex::new(Listeners::default()),
        })
    }

    /// Creates a parameter bundle from an axis configuration.
    pub fn from_config(config: &AxisConfig) -> Result<Self> {
        Self::new(
            config.frequencies.clone(),
            config.amplitudes.clone(),
            config.offset,
        )
    }

    /// Replaces the amplitude at `index`, then notifies every listener.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `value` is NaN or infinite. `IndexOutOfRange`
    /// when `index >= self.len()`. Listeners are not called on failure and the
    /// stored amplitude is left unchanged.
    pub fn set_amplitude(&self, index: usize, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::InvalidArgument(format!("amplitude {} is not finite", value)));
        }
        let mut listeners = self.lock_listeners();
        {
            let mut state = self.write_state();
            let len = state.amplitudes.len();
            let slot = state
                .amplitudes
                .get_mut(index)
                .ok_or(Error::IndexOutOfRange { index, len })?;
            *slot = value;
        }
        debug!(index, value, "amplitude changed");
        listeners.notify();
        Ok(())
    }

    /// Replaces the phase offset (degrees), then notifies every listener.
    ///
    /// # Errors
    ///
    /// `OffsetOutOfRange` when `value` is outside `[0, 360]` or NaN. The value
    /// is rejected, never clipped, and listeners are not called.
    pub fn set_offset(&self, value: f64) -> Result<()> {
        check_offset(value)?;
        let mut listeners = self.lock_listeners();
        self.write_state().offset = value;
        debug!(offset = value, "phase offset changed");
        listeners.notify();
        Ok(())
    }

    /// Appends a change listener and returns its id.
    pub fn register_listener(&self, listener: impl FnMut() + Send + 'static) -> ListenerId {
        let mut listeners = self.lock_listeners();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        let listener: Listener = Box::new(listener);
        listeners.entries.push((id, listener));
        debug!(listener = id.0, total = listeners.entries.len(), "listener registered");
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        let removed = listeners.entries.len() != before;
        if removed {
            debug!(listener = id.0, "listener removed");
        }
        removed
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().entries.len()
    }

    /// Phase offset in degrees.
    pub fn offset(&self) -> f64 {
        self.read_state().offset
    }

    /// Phase offset in radians.
    pub fn offset_radians(&self) -> f64 {
        self.offset() * (TAU / 360.0)
    }

    /// Copy of the constituent frequencies.
    pub fn frequencies(&self) -> Vec<f64> {
        self.read_state().frequencies.clone()
    }

    /// Copy of the amplitudes.
    pub fn amplitudes(&self) -> Vec<f64> {
        self.read_state().amplitudes.clone()
    }

    /// Amplitude at `index`, if in range.
    pub fn amplitude(&self, index: usize) -> Option<f64> {
        self.read_state().amplitudes.get(index).copied()
    }

    /// Number of constituents.
    pub fn len(&self) -> usize {
        self.read_state().frequencies.len()
    }

    /// Always `false`: construction rejects empty bundles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluates `Σ a_i sin(f_i t + offset)` at time `t`, with the offset
    /// converted from degrees to radians.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.read_state().evaluate(t)
    }

    /// Evaluates the axis at every time in `times` against a single consistent
    /// view of the parameters.
    pub fn evaluate_at(&self, times: &[f64]) -> Vec<f64> {
        let state = self.read_state();
        times.iter().map(|&t| state.evaluate(t)).collect()
    }

    // Every guarded value is plain data assigned in one step, so a panic in
    // another holder cannot leave it half-written.
    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for WaveParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        f.debug_struct("WaveParameters")
            .field("offset", &state.offset)
            .field("frequencies", &state.frequencies)
            .field("amplitudes", &state.amplitudes)
            .finish_non_exhaustive()
    }
}

fn check_offset(value: f64) -> Result<()> {
    if (OFFSET_MIN..=OFFSET_MAX).contains(&value) {
        Ok(())
    } else {
        Err(Error::OffsetOutOfRange(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn bank() -> WaveParameters {
        WaveParameters::new(vec![400.0, 450.0, 500.0], vec![1.0, 2.0, 3.0], 0.0).unwrap()
    }

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn recorder(wave: &WaveParameters, log: &Log, name: &'static str) -> ListenerId {
        let log = log.clone();
        wave.register_listener(move || log.lock().unwrap().push(name))
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = WaveParameters::new(vec![400.0, 500.0], vec![1.0], 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_rejected() {
        let err = WaveParameters::new(vec![], vec![], 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_non_positive_frequency_rejected() {
        for bad in [0.0, -400.0, f64::NAN, f64::INFINITY] {
            let err = WaveParameters::new(vec![400.0, bad], vec![1.0, 1.0], 0.0).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "accepted {}", bad);
        }
    }

    #[test]
    fn test_initial_offset_validated() {
        let err = WaveParameters::new(vec![400.0], vec![1.0], 361.0).unwrap_err();
        assert_eq!(err, Error::OffsetOutOfRange(361.0));
    }

    #[test]
    fn test_set_amplitude_read_back() {
        let wave = bank();
        for index in 0..wave.len() {
            wave.set_amplitude(index, 42.0 + index as f64).unwrap();
            assert_eq!(wave.amplitude(index), Some(42.0 + index as f64));
        }
        assert_eq!(wave.amplitudes(), vec![42.0, 43.0, 44.0]);
        assert_eq!(wave.frequencies(), vec![400.0, 450.0, 500.0]);
    }

    #[test]
    fn test_set_amplitude_out_of_range() {
        let wave = bank();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&wave, &log, "a");

        let err = wave.set_amplitude(3, 1.0).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 3, len: 3 });
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(wave.amplitudes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_non_finite_amplitude_rejected() {
        let wave = bank();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&wave, &log, "a");

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = wave.set_amplitude(0, bad).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "accepted {}", bad);
        }
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(wave.amplitudes(), vec![1.0, 2.0, 3.0]);
        assert!(wave.evaluate(0.01).is_finite());
    }

    #[test]
    fn test_non_finite_initial_amplitude_rejected() {
        for bad in [f64::NAN, f64::INFINITY] {
            let err = WaveParameters::new(vec![400.0, 500.0], vec![1.0, bad], 0.0).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "accepted {}", bad);
        }
    }

    #[test]
    fn test_listeners_fire_once_in_order() {
        let wave = bank();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&wave, &log, "first");
        recorder(&wave, &log, "second");
        recorder(&wave, &log, "third");

        wave.set_amplitude(0, 5.0).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_notifies_even_when_unchanged() {
        let wave = bank();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&wave, &log, "a");

        wave.set_amplitude(1, 2.0).unwrap();
        wave.set_offset(0.0).unwrap();
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_set_offset_bounds() {
        let wave = bank();
        wave.set_offset(0.0).unwrap();
        wave.set_offset(360.0).unwrap();
        assert_eq!(wave.offset(), 360.0);

        for bad in [-5.0, 360.5, f64::NAN] {
            assert!(matches!(
                wave.set_offset(bad),
                Err(Error::OffsetOutOfRange(_))
            ));
        }
        assert_eq!(wave.offset(), 360.0);
    }

    #[test]
    fn test_rejected_offset_does_not_notify() {
        let wave = bank();
        let log = Arc::new(Mutex::new(Vec::new()));
        recorder(&wave, &log, "a");
        assert!(wave.set_offset(400.0).is_err());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_offset_radians() {
        let wave = bank();
        wave.set_offset(90.0).unwrap();
        assert!((wave.offset_radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_remove_listener() {
        let wave = bank();
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = recorder(&wave, &log, "a");
        recorder(&wave, &log, "b");
        assert_eq!(wave.listener_count(), 2);

        assert!(wave.remove_listener(a));
        assert!(!wave.remove_listener(a));
        wave.set_amplitude(0, 0.0).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["b"]);
    }

    #[test]
    fn test_evaluate_closed_form() {
        let wave = WaveParameters::new(vec![500.0, 420.0], vec![90.0, 0.0], 90.0).unwrap();
        let t = 0.0123;
        let expected = 90.0 * (500.0 * t + std::f64::consts::FRAC_PI_2).sin();
        assert!((wave.evaluate(t) - expected).abs() < 1e-9);
        assert_eq!(wave.evaluate_at(&[t, t]), vec![wave.evaluate(t); 2]);
    }

    #[test]
    fn test_debug_lists_values() {
        let wave = WaveParameters::new(vec![400.0], vec![1.0], 5.0).unwrap();
        let text = format!("{:?}", wave);
        assert!(text.contains("offset: 5.0"));
        assert!(text.contains("frequencies: [400.0]"));
    }
}
