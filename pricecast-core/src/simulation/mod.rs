//! Price simulation engine.
//!
//! A bias-driven random walk: indicator state, historical momentum and the
//! clustered levels from the summary shape each day's drift, and a
//! caller-supplied `RandomSource` supplies the noise.

pub mod engine;
pub mod rng;

pub use engine::{
    forecast_points, predict_step, return_components, simulate, snap_to_levels, DailyReturn,
    SimulationContext, SimulationParams,
};
pub use rng::{source_for, EntropySource, RandomSource, SeededSource};
