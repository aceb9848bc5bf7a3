//! What the renderer draws: the bounded live trace and the static curve.

mod curve;
mod window;

pub use curve::{StaticCurve, StaticCurveSampler};
pub use window::SlidingWindowBuffer;
