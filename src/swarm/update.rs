use rand::prelude::*;
use rand_distr::Uniform;

use super::Optimizer;

impl<R: Rng> Optimizer<R> {
    /// Moves every particle using the bests as they stood after the last
    /// evaluation. Positions are clipped to the bounds; velocities are not.
    pub(crate) fn update_motion(&mut self) {
        let d = Uniform::new(0., 1.);
        let w = self.config.inertia;
        let c_p = self.config.particle_step;
        let c_l = self.config.local_step;
        let c_g = self.config.global_step;

        for idx in 0..self.particles.len() {
            // One draw per term, shared by every dimension.
            let r_p = d.sample(&mut self.rng);
            let r_l = d.sample(&mut self.rng);
            let r_g = d.sample(&mut self.rng);

            let local_best = &self.groups[self.config.group_of(idx)].best_position;
            let global_best = &self.best_position;
            let p = &mut self.particles[idx];

            for j in 0..p.position.len() {
                let x = p.position[j];
                let v = w * p.velocity[j]
                    + c_p * r_p * (p.best_position[j] - x)
                    + c_l * r_l * (local_best[j] - x)
                    + c_g * r_g * (global_best[j] - x);
                p.velocity[j] = v;
                p.position[j] = x + v;
            }

            for (x, b) in p.position.iter_mut().zip(self.config.bounds.iter()) {
                *x = b.clip(*x);
            }
        }
    }
}

#[cfg(test)]
mod test_update {
    use super::*;
    use crate::exp::Sphere;
    use crate::options::Options;
    use crate::range::Range;
    use crate::swarm::seeded;

    #[test]
    fn test_zero_coefficients_keep_straight_line() {
        let mut opt = Optimizer::with_rng(
            Sphere,
            vec![Range(-1., 1.), Range(-1., 1.)],
            Options::default()
                .with_population_size(8)
                .with_inertia(1.)
                .with_steps(0., 0., 0.),
            seeded(5),
        )
        .unwrap();
        let before: Vec<(Vec<f64>, Vec<f64>)> = opt
            .particles()
            .iter()
            .map(|p| (p.position().to_vec(), p.velocity().to_vec()))
            .collect();

        opt.update_motion();

        for (p, (x, v)) in opt.particles().iter().zip(before.iter()) {
            assert_eq!(p.velocity(), &v[..]);
            for j in 0..2 {
                approx::assert_abs_diff_eq!(p.position()[j], x[j] + v[j], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_positions_clipped_velocity_not() {
        let bounds = vec![Range(-0.5, 0.5), Range::UNBOUNDED];
        let mut opt = Optimizer::with_rng(
            Sphere,
            vec![Range(-10., 10.), Range(-10., 10.)],
            Options::default()
                .with_population_size(50)
                .with_bounds(bounds.clone()),
            seeded(17),
        )
        .unwrap();

        for _ in 0..5 {
            opt.step();
            for p in opt.particles() {
                assert!(bounds[0].contains(p.position()[0]));
            }
        }
        assert!(opt.particles().iter().any(|p| p.velocity()[0].abs() > 1.));
    }

    #[test]
    fn test_infeasible_particles_still_move_and_clip() {
        let bounds = vec![Range(-1., 1.), Range(-1., 1.)];
        let mut opt = Optimizer::with_rng(
            Sphere,
            bounds.clone(),
            Options::default()
                .with_population_size(10)
                .with_bounds(bounds.clone())
                .with_constraint(|_: &[f64]| false),
            seeded(29),
        )
        .unwrap();
        let before: Vec<Vec<f64>> = opt
            .particles()
            .iter()
            .map(|p| p.position().to_vec())
            .collect();

        opt.step();

        assert!(opt.best_fitness().is_infinite());
        let moved = opt
            .particles()
            .iter()
            .zip(before.iter())
            .filter(|(p, x)| p.position() != &x[..])
            .count();
        assert_eq!(moved, 10);
        for p in opt.particles() {
            assert_eq!(p.stalls(), 1);
            for (x, b) in p.position().iter().zip(bounds.iter()) {
                assert!(b.contains(*x));
            }
        }
    }

    #[test]
    fn test_unbounded_dimensions_still_move() {
        let mut opt = Optimizer::with_rng(
            Sphere,
            vec![Range(1., 2.)],
            Options::default().with_population_size(10),
            seeded(23),
        )
        .unwrap();
        let before: Vec<f64> = opt.particles().iter().map(|p| p.position()[0]).collect();
        opt.step();
        let moved = opt
            .particles()
            .iter()
            .zip(before.iter())
            .filter(|(p, x)| p.position()[0] != **x)
            .count();
        assert!(moved > 0);
    }
}
