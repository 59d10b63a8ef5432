use rayon::prelude::*;
use tracing::trace;

use super::{Optimizer, Particle};
use crate::options::Config;
use crate::Fitness;

/// Scores a single particle, or returns `None` when its position breaks a
/// bound or a constraint. Bounds are checked first since they are cheap.
pub(crate) fn particle_fitness(
    fitness: &dyn Fitness,
    config: &Config,
    p: &Particle,
) -> Option<f64> {
    let position = &p.position;
    let in_bounds = config
        .bounds
        .iter()
        .zip(position.iter())
        .all(|(b, x)| b.contains(*x));
    if !in_bounds {
        return None;
    }

    if !config.constraints.iter().all(|c| c.admits(position)) {
        return None;
    }

    Some(fitness.score(position))
}

impl<R> Optimizer<R> {
    /// Scores every particle on the pool, then folds the results into the
    /// personal, group and global bests on the calling thread.
    pub(crate) fn update_fitness(&mut self) {
        let fitness = &*self.fitness;
        let config = &self.config;
        let particles = &self.particles;

        // One result per particle, in index order; the collect is the barrier.
        let scores: Vec<Option<f64>> = self.pool.install(|| {
            particles
                .par_iter()
                .map(|p| particle_fitness(fitness, config, p))
                .collect()
        });

        let mut total = 0.;
        let mut count = 0usize;
        for (idx, score) in scores.into_iter().enumerate() {
            let particle = &mut self.particles[idx];
            let score = match score {
                Some(s) => s,
                None => {
                    particle.stalls += 1;
                    continue;
                }
            };
            particle.stalls = 0;

            total += score;
            count += 1;

            if score < particle.best_fitness {
                particle.best_fitness = score;
                particle.best_position.copy_from_slice(&particle.position);
            }

            let group = &mut self.groups[self.config.group_of(idx)];
            if score < group.best_fitness {
                group.best_fitness = score;
                group.best_position.copy_from_slice(&particle.position);
            }

            if score < self.best_fitness {
                self.best_fitness = score;
                self.best_position.copy_from_slice(&particle.position);
            }
        }

        self.average_fitness = if count > 0 {
            Some(total / count as f64)
        } else {
            None
        };

        trace!(
            feasible = count,
            infeasible = self.particles.len() - count,
            "evaluated swarm"
        );
    }
}
