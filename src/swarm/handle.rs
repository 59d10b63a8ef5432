use rand::Rng;

use super::Optimizer;

/// Operations that degrade to no-ops on an absent optimizer.
///
/// Lets callers hold an `Option<Optimizer>` (for instance one whose
/// construction failed) and keep driving it without checking first.
pub trait SwarmHandle {
    fn reset(&mut self);
    fn step(&mut self);
    /// Returns 0 when there is no optimizer.
    fn step_until(&mut self, progress_rate: f64) -> usize;
    fn best(&self) -> Option<&[f64]>;
}

impl<R: Rng> SwarmHandle for Option<Optimizer<R>> {
    fn reset(&mut self) {
        if let Some(opt) = self {
            opt.reset();
        }
    }

    fn step(&mut self) {
        if let Some(opt) = self {
            opt.step();
        }
    }

    fn step_until(&mut self, progress_rate: f64) -> usize {
        match self {
            Some(opt) => opt.step_until(progress_rate),
            None => 0,
        }
    }

    fn best(&self) -> Option<&[f64]> {
        self.as_ref().map(|opt| opt.best())
    }
}
