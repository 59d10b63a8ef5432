extern crate rand;
extern crate rayon;

pub mod converge;
pub mod evaluate;
pub mod handle;
pub mod update;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Uniform;
use tracing::debug;

use crate::error::{Result, SwarmError};
use crate::options::{Config, Options};
use crate::range::Range;
use crate::Fitness;

/// One candidate solution.
#[derive(Clone, Debug)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_fitness: f64,
    /// Evaluations in a row that found this particle infeasible
    stalls: usize,
}

impl Particle {
    fn new<R: Rng>(shape: &[Range], rng: &mut R) -> Self {
        let d = Uniform::new(0., 1.);
        let mut position = Vec::with_capacity(shape.len());
        let mut velocity = Vec::with_capacity(shape.len());
        for r in shape {
            position.push(r.lower() + r.width() * d.sample(rng));
            velocity.push((2. * d.sample(rng) - 1.) * r.width());
        }

        Particle {
            best_position: position.clone(),
            position,
            velocity,
            best_fitness: std::f64::INFINITY,
            stalls: 0,
        }
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn stalls(&self) -> usize {
        self.stalls
    }
}

/// Best seen by a modulo-assigned neighbourhood of particles.
#[derive(Clone, Debug)]
pub struct Group {
    best_position: Vec<f64>,
    best_fitness: f64,
}

impl Group {
    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }
}

/// Particle swarm minimizer.
///
/// The shape only seeds positions and velocities; ongoing limits come
/// from the bounds and constraints in [`Options`].
pub struct Optimizer<R = StdRng> {
    fitness: Box<dyn Fitness>,
    shape: Vec<Range>,
    config: Config,
    pool: rayon::ThreadPool,
    rng: R,

    particles: Vec<Particle>,
    groups: Vec<Group>,

    best_position: Vec<f64>,
    best_fitness: f64,

    /// Mean over the feasible particles of the last step, if any
    average_fitness: Option<f64>,
}

impl Optimizer<StdRng> {
    pub fn new<F: Fitness + 'static>(
        fitness: F,
        shape: Vec<Range>,
        options: Options,
    ) -> Result<Self> {
        Optimizer::with_rng(fitness, shape, options, StdRng::from_entropy())
    }
}

impl<R: Rng> Optimizer<R> {
    pub fn with_rng<F: Fitness + 'static>(
        fitness: F,
        shape: Vec<Range>,
        options: Options,
        rng: R,
    ) -> Result<Self> {
        if shape.is_empty() {
            return Err(SwarmError::InvalidShape);
        }

        let config = options.resolve(shape.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallelism)
            .build()?;

        debug!(
            dims = shape.len(),
            population = config.population_size,
            groups = config.group_count,
            parallelism = config.parallelism,
            "building swarm"
        );

        let mut opt = Optimizer {
            fitness: Box::new(fitness),
            shape,
            config,
            pool,
            rng,
            particles: Vec::new(),
            groups: Vec::new(),
            best_position: Vec::new(),
            best_fitness: std::f64::INFINITY,
            average_fitness: None,
        };
        opt.reset();
        Ok(opt)
    }

    /// Redraws every particle inside the shape and forgets all bests.
    pub fn reset(&mut self) {
        let shape = &self.shape;
        let rng = &mut self.rng;
        self.particles = (0..self.config.population_size)
            .map(|_| Particle::new(shape, &mut *rng))
            .collect();

        let particles = &self.particles;
        let local_size = self.config.local_size;
        self.groups = (0..self.config.group_count)
            .map(|i| Group {
                best_position: particles[i * local_size].position.clone(),
                best_fitness: std::f64::INFINITY,
            })
            .collect();

        self.best_position = self.particles[0].position.clone();
        self.best_fitness = std::f64::INFINITY;
        self.average_fitness = None;

        debug!(population = self.particles.len(), "swarm reset");
    }

    /// Advances the swarm one generation: evaluate everyone, then move.
    pub fn step(&mut self) {
        self.update_fitness();
        self.update_motion();
    }

    /// Global best position found so far.
    pub fn best(&self) -> &[f64] {
        &self.best_position
    }

    /// Fitness at [`best`](Self::best); infinite until a feasible point is seen.
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn average_fitness(&self) -> Option<f64> {
        self.average_fitness
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shape(&self) -> &[Range] {
        &self.shape
    }

    pub fn dims(&self) -> usize {
        self.shape.len()
    }
}

#[cfg(test)]
pub(crate) fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
