use std::fmt;
use std::sync::Arc;

use crate::range::Range;
use crate::Constraint;

pub const DEFAULT_LOCAL_SIZE: usize = 25;
pub const DEFAULT_INERTIA: f64 = 0.95;
pub const DEFAULT_PARTICLE_STEP: f64 = 0.75;
pub const DEFAULT_LOCAL_STEP: f64 = 0.5;
pub const DEFAULT_GLOBAL_STEP: f64 = 0.1;
pub const DEFAULT_STALL_LIMIT: usize = 3;
pub const DEFAULT_WAIT_MAGNITUDE: f64 = 2.;

/// Caller-facing knobs. Anything left as `None` falls back to a default
/// when the optimizer is built.
#[derive(Clone, Default)]
pub struct Options {
    /// Size of the groups of particles that can see one another.
    pub local_size: Option<usize>,

    /// Number of particles. Scales with the dimension count and the
    /// local size when unset.
    pub population_size: Option<usize>,

    /// Number of evaluation threads.
    pub parallelism: Option<usize>,

    /// Hard per-dimension limits. `Range::UNBOUNDED` leaves a dimension free.
    pub bounds: Vec<Range>,

    /// Hard limits relating dimensions to each other.
    pub constraints: Vec<Arc<dyn Constraint>>,

    /// Momentum coefficient
    pub inertia: Option<f64>,

    /// Pull towards the particle's own best
    pub particle_step: Option<f64>,

    /// Pull towards the group best
    pub local_step: Option<f64>,

    /// Pull towards the global best
    pub global_step: Option<f64>,

    /// Reserved. Not consulted by the stopping rule.
    pub stall_limit: Option<usize>,

    /// Log progress from `step_until`.
    pub verbose: bool,

    /// How long, in powers of ten of steps, stagnation must last before
    /// `step_until` gives up.
    pub wait_magnitude: Option<f64>,
}

impl Options {
    pub fn with_local_size(mut self, n: usize) -> Self {
        self.local_size = Some(n);
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = Some(n);
        self
    }

    pub fn with_parallelism(mut self, n: usize) -> Self {
        self.parallelism = Some(n);
        self
    }

    pub fn with_bounds(mut self, bounds: Vec<Range>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_constraint<C: Constraint + 'static>(mut self, c: C) -> Self {
        self.constraints.push(Arc::new(c));
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = Some(w);
        self
    }

    pub fn with_steps(mut self, particle: f64, local: f64, global: f64) -> Self {
        self.particle_step = Some(particle);
        self.local_step = Some(local);
        self.global_step = Some(global);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_wait_magnitude(mut self, w: f64) -> Self {
        self.wait_magnitude = Some(w);
        self
    }

    /// Fills in every default for a problem with `dims` dimensions.
    pub fn resolve(self, dims: usize) -> Config {
        let local_size = nonzero(self.local_size).unwrap_or(DEFAULT_LOCAL_SIZE);
        let population_size =
            nonzero(self.population_size).unwrap_or(10 * local_size * dims);
        let parallelism = nonzero(self.parallelism).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });

        Config {
            local_size,
            population_size,
            group_count: (population_size / local_size).max(1),
            parallelism,
            bounds: self.bounds,
            constraints: self.constraints,
            inertia: self.inertia.unwrap_or(DEFAULT_INERTIA),
            particle_step: self.particle_step.unwrap_or(DEFAULT_PARTICLE_STEP),
            local_step: self.local_step.unwrap_or(DEFAULT_LOCAL_STEP),
            global_step: self.global_step.unwrap_or(DEFAULT_GLOBAL_STEP),
            stall_limit: nonzero(self.stall_limit).unwrap_or(DEFAULT_STALL_LIMIT),
            verbose: self.verbose,
            wait_magnitude: self.wait_magnitude.unwrap_or(DEFAULT_WAIT_MAGNITUDE),
        }
    }
}

fn nonzero(n: Option<usize>) -> Option<usize> {
    n.filter(|&n| n > 0)
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("local_size", &self.local_size)
            .field("population_size", &self.population_size)
            .field("parallelism", &self.parallelism)
            .field("bounds", &self.bounds)
            .field("constraints", &self.constraints.len())
            .field("inertia", &self.inertia)
            .field("particle_step", &self.particle_step)
            .field("local_step", &self.local_step)
            .field("global_step", &self.global_step)
            .field("stall_limit", &self.stall_limit)
            .field("verbose", &self.verbose)
            .field("wait_magnitude", &self.wait_magnitude)
            .finish()
    }
}

/// Resolved hyperparameters and population layout.
#[derive(Clone)]
pub struct Config {
    pub local_size: usize,
    pub population_size: usize,
    /// Particle `i` belongs to group `i % group_count`. Never zero.
    pub group_count: usize,
    pub parallelism: usize,
    pub bounds: Vec<Range>,
    pub constraints: Vec<Arc<dyn Constraint>>,
    pub inertia: f64,
    pub particle_step: f64,
    pub local_step: f64,
    pub global_step: f64,
    pub stall_limit: usize,
    pub verbose: bool,
    pub wait_magnitude: f64,
}

impl Config {
    pub fn group_of(&self, idx: usize) -> usize {
        idx % self.group_count
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("local_size", &self.local_size)
            .field("population_size", &self.population_size)
            .field("group_count", &self.group_count)
            .field("parallelism", &self.parallelism)
            .field("bounds", &self.bounds)
            .field("constraints", &self.constraints.len())
            .field("inertia", &self.inertia)
            .field("particle_step", &self.particle_step)
            .field("local_step", &self.local_step)
            .field("global_step", &self.global_step)
            .field("stall_limit", &self.stall_limit)
            .field("verbose", &self.verbose)
            .field("wait_magnitude", &self.wait_magnitude)
            .finish()
    }
}

#[cfg(test)]
mod test_options {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Options::default().resolve(3);
        assert_eq!(c.local_size, 25);
        assert_eq!(c.population_size, 750);
        assert_eq!(c.group_count, 30);
        assert!(c.parallelism >= 1);
        assert_eq!(c.inertia, 0.95);
        assert_eq!(c.particle_step, 0.75);
        assert_eq!(c.local_step, 0.5);
        assert_eq!(c.global_step, 0.1);
        assert_eq!(c.stall_limit, 3);
        assert_eq!(c.wait_magnitude, 2.);
        assert!(c.bounds.is_empty());
        assert!(c.constraints.is_empty());
    }

    #[test]
    fn test_zero_counts_fall_back() {
        let c = Options::default()
            .with_local_size(0)
            .with_population_size(0)
            .with_parallelism(0)
            .resolve(1);
        assert_eq!(c.local_size, 25);
        assert_eq!(c.population_size, 250);
        assert!(c.parallelism >= 1);
    }

    #[test]
    fn test_uneven_groups() {
        let c = Options::default()
            .with_local_size(20)
            .with_population_size(55)
            .resolve(2);
        assert_eq!(c.group_count, 2);
        assert_eq!(c.group_of(0), 0);
        assert_eq!(c.group_of(1), 1);
        assert_eq!(c.group_of(54), 0);
    }

    #[test]
    fn test_group_count_never_zero() {
        let c = Options::default()
            .with_local_size(25)
            .with_population_size(10)
            .resolve(1);
        assert_eq!(c.group_count, 1);
        assert_eq!(c.group_of(9), 0);
    }

    #[test]
    fn test_explicit_overrides() {
        let c = Options::default()
            .with_inertia(0.)
            .with_steps(1., 2., 3.)
            .with_wait_magnitude(2.5)
            .with_constraint(|x: &[f64]| x[0] > 0.)
            .resolve(1);
        assert_eq!(c.inertia, 0.);
        assert_eq!((c.particle_step, c.local_step, c.global_step), (1., 2., 3.));
        assert_eq!(c.wait_magnitude, 2.5);
        assert_eq!(c.constraints.len(), 1);
    }
}
