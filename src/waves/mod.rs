//! Per-axis wave model: the observable parameters and the generator that
//! samples them tick by tick.

mod generator;
mod parameters;

pub use generator::SignalGenerator;
pub use parameters::{Listener, ListenerId, WaveParameters};
