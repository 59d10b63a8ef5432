pub mod error;
pub mod exp;
pub mod options;
pub mod range;
pub mod swarm;

pub use crate::error::{Result, SwarmError};
pub use crate::options::{Config, Options};
pub use crate::range::Range;
pub use crate::swarm::converge::should_stop;
pub use crate::swarm::handle::SwarmHandle;
pub use crate::swarm::{Group, Optimizer, Particle};

/// Scores a candidate position. Lower is better; negate to maximize.
///
/// Called concurrently from the evaluation pool, so it should be pure.
pub trait Fitness: Send + Sync {
    fn score(&self, position: &[f64]) -> f64;
}

impl<F> Fitness for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn score(&self, position: &[f64]) -> f64 {
        self(position)
    }
}

/// Hard limit over the whole position vector. Returns false when the
/// position is not acceptable.
pub trait Constraint: Send + Sync {
    fn admits(&self, position: &[f64]) -> bool;
}

impl<F> Constraint for F
where
    F: Fn(&[f64]) -> bool + Send + Sync,
{
    fn admits(&self, position: &[f64]) -> bool {
        self(position)
    }
}
