//! Full-resolution static curve, recomputed whenever either axis changes.

use crate::{Error, Result, WaveParameters};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::trace;

/// One complete sampling of the parametric curve.
///
/// `xs` and `ys` always have the same length, equal to the sampler's
/// resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCurve {
    /// Time of each point, evenly spaced over `[0, T]`
    pub times: Vec<f64>,
    /// x-axis values
    pub xs: Vec<f64>,
    /// y-axis values
    pub ys: Vec<f64>,
}

impl StaticCurve {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the curve holds no points.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterates the curve as (x, y) pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}

/// Resamples the x/y parametric curve over a fixed span at a fixed
/// resolution.
///
/// The constructor takes both axes, so a sampler can only exist once both
/// `WaveParameters` do. Each `recompute()` builds a fresh [`StaticCurve`] and
/// publishes it by swapping an `Arc`: readers holding the previous curve keep
/// a complete, unchanged copy.
///
/// # Examples
///
/// ```
/// use lissajous::{StaticCurveSampler, WaveParameters};
/// use std::sync::Arc;
///
/// let x = Arc::new(WaveParameters::new(vec![500.0], vec![90.0], 0.0).unwrap());
/// let y = Arc::new(WaveParameters::new(vec![400.0], vec![90.0], 90.0).unwrap());
/// let sampler = StaticCurveSampler::new(x, y, 0.1, 500).unwrap();
///
/// let curve = sampler.curve();
/// assert_eq!(curve.len(), 500);
/// assert_eq!(curve.times[499], 0.1);
/// ```
#[derive(Debug)]
pub struct StaticCurveSampler {
    x_wave: Arc<WaveParameters>,
    y_wave: Arc<WaveParameters>,
    span: f64,
    resolution: usize,
    times: Vec<f64>,
    current: RwLock<Arc<StaticCurve>>,
    /// Held from sampling through publishing, so the last recompute to run
    /// is also the last to publish.
    recompute_lock: Mutex<()>,
    recomputes: AtomicU64,
}

impl StaticCurveSampler {
    /// Creates a sampler over `[0, span]` with `resolution` points and
    /// computes the initial curve.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `resolution` is zero or `span` is not a
    /// positive finite number.
    pub fn new(
        x_wave: Arc<WaveParameters>,
        y_wave: Arc<WaveParameters>,
        span: f64,
        resolution: usize,
    ) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::InvalidArgument(
                "static curve resolution must be positive".into(),
            ));
        }
        if !(span.is_finite() && span > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "static curve span {} is not a positive finite number",
                span
            )));
        }

        let times = crate::config::linspace(0.0, span, resolution);
        let initial = Self::sample(&x_wave, &y_wave, &times);
        Ok(Self {
            x_wave,
            y_wave,
            span,
            resolution,
            times,
            current: RwLock::new(Arc::new(initial)),
            recompute_lock: Mutex::new(()),
            recomputes: AtomicU64::new(0),
        })
    }

    fn sample(x_wave: &WaveParameters, y_wave: &WaveParameters, times: &[f64]) -> StaticCurve {
        StaticCurve {
            times: times.to_vec(),
            xs: x_wave.evaluate_at(times),
            ys: y_wave.evaluate_at(times),
        }
    }

    /// Resamples both axes from their current state and publishes the result.
    ///
    /// Concurrent calls are serialized: the published curve always reflects
    /// every axis edit that completed before the last call started.
    pub fn recompute(&self) {
        let _serial = self
            .recompute_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let curve = Arc::new(Self::sample(&self.x_wave, &self.y_wave, &self.times));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = curve;
        let count = self.recomputes.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(count, resolution = self.resolution, "static curve recomputed");
    }

    /// Most recently published curve.
    pub fn curve(&self) -> Arc<StaticCurve> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `recompute()` calls since construction.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes.load(Ordering::Relaxed)
    }

    /// Length `T` of the sampled span.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Number of points `R` per curve.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The x-axis parameters.
    pub fn x_wave(&self) -> &Arc<WaveParameters> {
        &self.x_wave
    }

    /// The y-axis parameters.
    pub fn y_wave(&self) -> &Arc<WaveParameters> {
        &self.y_wave
    }
}
