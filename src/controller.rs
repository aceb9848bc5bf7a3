//! Wiring between parameter edits, ticks, and the two render targets.

use crate::config::{Axis, SessionConfig};
use crate::{
    ListenerId, Result, Signal, SignalGenerator, SlidingWindowBuffer, StaticCurve, StaticCurveSampler,
    WaveParameters,
};
use std::sync::Arc;
use tracing::debug;

/// Owns both axes and connects them to the live trace and the static curve.
///
/// Two halves meet here:
/// - event driven: every edit to either axis recomputes the static curve
///   before the edit call returns;
/// - tick driven: each `tick()` samples x then y and appends the pair to the
///   live trace.
///
/// Construction is two-phase: both axes are built first, then the sampler,
/// and only then are the recompute listeners registered. Dropping the
/// controller removes those listeners again.
///
/// # Examples
///
/// ```
/// use lissajous::ReactiveController;
/// use lissajous::config::{Axis, SessionConfig};
///
/// let mut controller = ReactiveController::new(SessionConfig::default()).unwrap();
/// controller.tick_n(10);
/// assert_eq!(controller.live_trace().len(), 10);
///
/// let before = controller.static_curve();
/// controller.set_offset(Axis::X, 45.0).unwrap();
/// assert_ne!(*before, *controller.static_curve());
/// ```
#[derive(Debug)]
pub struct ReactiveController {
    x_wave: Arc<WaveParameters>,
    y_wave: Arc<WaveParameters>,
    x_generator: SignalGenerator,
    y_generator: SignalGenerator,
    live: Arc<SlidingWindowBuffer>,
    sampler: Arc<StaticCurveSampler>,
    bindings: [(Axis, ListenerId); 2],
}

impl ReactiveController {
    /// Builds every component from `config` and wires them together.
    ///
    /// # Errors
    ///
    /// Propagates any construction error of the axes, generators, live trace
    /// or sampler.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let x_wave = Arc::new(WaveParameters::from_config(&config.x)?);
        let y_wave = Arc::new(WaveParameters::from_config(&config.y)?);

        let sampler = Arc::new(StaticCurveSampler::new(
            x_wave.clone(),
            y_wave.clone(),
            config.curve_span,
            config.curve_resolution,
        )?);
        let x_generator = SignalGenerator::new(x_wave.clone(), config.timestep)?;
        let y_generator = SignalGenerator::new(y_wave.clone(), config.timestep)?;
        let live = Arc::new(SlidingWindowBuffer::new(config.trace_capacity)?);

        let bindings = [
            (Axis::X, Self::bind(&x_wave, &sampler)),
            (Axis::Y, Self::bind(&y_wave, &sampler)),
        ];
        debug!(
            timestep = config.timestep,
            capacity = config.trace_capacity,
            resolution = config.curve_resolution,
            "controller wired"
        );

        Ok(Self {
            x_wave,
            y_wave,
            x_generator,
            y_generator,
            live,
            sampler,
            bindings,
        })
    }

    /// Builds a controller from `SessionConfig::default()`.
    pub fn with_defaults() -> Result<Self> {
        Self::new(SessionConfig::default())
    }

    // The listener only holds a weak reference, so the axes never keep the
    // sampler alive on their own.
    fn bind(wave: &WaveParameters, sampler: &Arc<StaticCurveSampler>) -> ListenerId {
        let sampler = Arc::downgrade(sampler);
        wave.register_listener(move || {
            if let Some(sampler) = sampler.upgrade() {
                sampler.recompute();
            }
        })
    }

    /// Samples both axes once and appends the pair to the live trace.
    pub fn tick(&mut self) -> (f64, f64) {
        let x = self.x_generator.next_sample();
        let y = self.y_generator.next_sample();
        self.live.append(x, y);
        (x, y)
    }

    /// Runs `n` ticks.
    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Sets one amplitude on an axis; the static curve is recomputed before
    /// this returns.
    pub fn set_amplitude(&self, axis: Axis, index: usize, value: f64) -> Result<()> {
        self.axis(axis).set_amplitude(index, value)
    }

    /// Sets an axis's phase offset (degrees); the static curve is recomputed
    /// before this returns.
    pub fn set_offset(&self, axis: Axis, value: f64) -> Result<()> {
        self.axis(axis).set_offset(value)
    }

    /// Shared handle to an axis's parameters.
    pub fn axis(&self, axis: Axis) -> &Arc<WaveParameters> {
        match axis {
            Axis::X => &self.x_wave,
            Axis::Y => &self.y_wave,
        }
    }

    /// The generator driving an axis.
    pub fn generator(&self, axis: Axis) -> &SignalGenerator {
        match axis {
            Axis::X => &self.x_generator,
            Axis::Y => &self.y_generator,
        }
    }

    /// Shared handle to the live trace, for a renderer on another schedule.
    pub fn live_trace(&self) -> &Arc<SlidingWindowBuffer> {
        &self.live
    }

    /// Shared handle to the static curve sampler.
    pub fn sampler(&self) -> &Arc<StaticCurveSampler> {
        &self.sampler
    }

    /// Current static curve.
    pub fn static_curve(&self) -> Arc<StaticCurve> {
        self.sampler.curve()
    }
}

impl Drop for ReactiveController {
    fn drop(&mut self) {
        for (axis, id) in self.bindings {
            self.axis(axis).remove_listener(id);
        }
    }
}
