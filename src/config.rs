//! Session configuration and the control-surface ranges.
//!
//! The defaults reproduce the classic two-axis setup: ten constituent
//! frequencies evenly spaced over 400-600, three loud partials and seven quiet
//! ones, with the y axis a quarter turn ahead of the x axis.

/// Lowest accepted phase offset, in degrees.
pub const OFFSET_MIN: f64 = 0.0;
/// Highest accepted phase offset, in degrees.
pub const OFFSET_MAX: f64 = 360.0;
/// Step granularity a phase control is expected to use, in degrees.
pub const OFFSET_STEP: f64 = 5.0;
/// Lower end of the conventional amplitude control range.
pub const AMPLITUDE_MIN: f64 = 0.0;
/// Upper end of the conventional amplitude control range.
pub const AMPLITUDE_MAX: f64 = 100.0;

/// One of the two orthogonal axes driving the parametric curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal coordinate
    X,
    /// Vertical coordinate
    Y,
}

impl Axis {
    /// Both axes, x first.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Human-readable label for a control surface.
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "first freq (x-axis)",
            Axis::Y => "snd freq (y-axis)",
        }
    }
}

/// Returns `n` evenly spaced values over the closed interval `[start, end]`.
///
/// `n == 1` yields `[start]` and `n == 0` yields an empty vector.
///
/// # Examples
///
/// ```
/// use lissajous::config::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Initial state of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    /// Constituent frequencies (angular, multiplied directly with time)
    pub frequencies: Vec<f64>,
    /// Amplitudes, index-aligned with `frequencies`
    pub amplitudes: Vec<f64>,
    /// Phase offset in degrees
    pub offset: f64,
}

impl AxisConfig {
    /// Creates an axis configuration from explicit values.
    pub fn new(frequencies: Vec<f64>, amplitudes: Vec<f64>, offset: f64) -> Self {
        Self {
            frequencies,
            amplitudes,
            offset,
        }
    }

    /// A single-constituent axis: amplitude `amplitude` at `frequency`.
    pub fn single(frequency: f64, amplitude: f64, offset: f64) -> Self {
        Self::new(vec![frequency], vec![amplitude], offset)
    }

    /// Default x axis: the standard frequency bank with no phase offset.
    pub fn x_default() -> Self {
        Self::default()
    }

    /// Default y axis: the standard frequency bank, a quarter turn ahead.
    pub fn y_default() -> Self {
        Self::default().with_offset(90.0)
    }

    /// Sets the phase offset (degrees).
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the amplitudes.
    pub fn with_amplitudes(mut self, amplitudes: Vec<f64>) -> Self {
        self.amplitudes = amplitudes;
        self
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        let frequencies = linspace(400.0, 600.0, 10);
        let amplitudes = (0..frequencies.len())
            .map(|i| if matches!(i, 0 | 2 | 4) { 90.0 } else { 5.0 })
            .collect();
        Self {
            frequencies,
            amplitudes,
            offset: 0.0,
        }
    }
}

/// Everything needed to build a `ReactiveController`.
///
/// # Examples
///
/// ```
/// use lissajous::config::{AxisConfig, SessionConfig};
///
/// let config = SessionConfig::default()
///     .with_trace_capacity(64)
///     .with_y(AxisConfig::single(500.0, 90.0, 45.0));
/// assert_eq!(config.trace_capacity, 64);
/// assert_eq!(config.timestep, 0.0003);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Initial x-axis parameters
    pub x: AxisConfig,
    /// Initial y-axis parameters
    pub y: AxisConfig,
    /// Time advanced by each generator per tick
    pub timestep: f64,
    /// Number of (x, y) pairs kept in the live trace
    pub trace_capacity: usize,
    /// Length `T` of the static curve's time span `[0, T]`
    pub curve_span: f64,
    /// Number of points `R` in the static curve
    pub curve_resolution: usize,
}

impl SessionConfig {
    /// Replaces the x-axis configuration.
    pub fn with_x(mut self, x: AxisConfig) -> Self {
        self.x = x;
        self
    }

    /// Replaces the y-axis configuration.
    pub fn with_y(mut self, y: AxisConfig) -> Self {
        self.y = y;
        self
    }

    /// Sets the per-tick time step.
    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    /// Sets the live trace capacity.
    pub fn with_trace_capacity(mut self, capacity: usize) -> Self {
        self.trace_capacity = capacity;
        self
    }

    /// Sets the static curve span and resolution.
    pub fn with_curve(mut self, span: f64, resolution: usize) -> Self {
        self.curve_span = span;
        self.curve_resolution = resolution;
        self
    }

    /// Configuration for the given axis.
    pub fn axis(&self, axis: Axis) -> &AxisConfig {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            x: AxisConfig::x_default(),
            y: AxisConfig::y_default(),
            timestep: 0.0003,
            trace_capacity: 300,
            curve_span: 0.1,
            curve_resolution: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(400.0, 600.0, 10);
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], 400.0);
        assert_eq!(values[9], 600.0);
        assert!((values[1] - 422.222_222_222).abs() < 1e-6);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_default_axis_amplitudes() {
        let axis = AxisConfig::default();
        assert_eq!(axis.frequencies.len(), axis.amplitudes.len());
        assert_eq!(
            axis.amplitudes,
            vec![90.0, 5.0, 90.0, 5.0, 90.0, 5.0, 5.0, 5.0, 5.0, 5.0]
        );
    }

    #[test]
    fn test_default_offsets() {
        let config = SessionConfig::default();
        assert_eq!(config.axis(Axis::X).offset, 0.0);
        assert_eq!(config.axis(Axis::Y).offset, 90.0);
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(Axis::X.label(), "first freq (x-axis)");
        assert_eq!(Axis::Y.label(), "snd freq (y-axis)");
    }
}
