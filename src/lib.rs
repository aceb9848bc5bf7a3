//! Lissajous - the signal model and reactive update engine behind a
//! two-axis Lissajous curve visualizer.
//!
//! Two additive sine generators drive the x and y coordinates of a parametric
//! curve. The crate provides:
//! - `WaveParameters`, the observable per-axis parameter bundle
//! - `SignalGenerator`, which samples an axis one tick at a time
//! - `SlidingWindowBuffer`, the bounded live trace
//! - `StaticCurveSampler`, the full curve recomputed on every edit
//! - `ReactiveController`, which wires edits and ticks to the two render targets
//!
//! Widgets, drawing and timers are left to the caller.
//!
//! ```
//! use lissajous::ReactiveController;
//! use lissajous::config::Axis;
//!
//! let mut controller = ReactiveController::with_defaults().unwrap();
//!
//! // Tick source
//! for _ in 0..1000 {
//!     controller.tick();
//! }
//! let trace = controller.live_trace().snapshot();
//! assert_eq!(trace.len(), 300);
//!
//! // Control surface
//! controller.set_amplitude(Axis::X, 1, 60.0).unwrap();
//! let curve = controller.static_curve();
//! assert_eq!(curve.len(), 500);
//! ```

pub mod config;
mod controller;
mod error;
mod signal;
pub mod trace;
pub mod waves;

// Re-export commonly used types at the crate root
pub use controller::ReactiveController;
pub use error::{Error, Result};
pub use signal::Signal;
pub use trace::{SlidingWindowBuffer, StaticCurve, StaticCurveSampler};
pub use waves::{Listener, ListenerId, SignalGenerator, WaveParameters};
