use rand::Rng;
use tracing::info;

use super::Optimizer;

/// Stop rule for [`Optimizer::step_until`].
///
/// Stagnation must have lasted more than `10^wait_magnitude` steps, and
/// must not be tiny next to the total run: `log10(total / stagnant)` has
/// to stay under `wait_magnitude` as well. Streaks of zero or one step
/// never stop the run.
pub fn should_stop(total_steps: usize, stagnant_steps: usize, wait_magnitude: f64) -> bool {
    if stagnant_steps <= 1 {
        return false;
    }
    let waited_for = (stagnant_steps as f64).log10();
    let wait_limit = (total_steps as f64).log10();
    waited_for > wait_magnitude && wait_limit - waited_for < wait_magnitude
}

/// Drop in global best between two steps. Two equal bests (infinite ones
/// included) count as no progress.
fn progress(last: f64, current: f64) -> f64 {
    if last == current {
        0.
    } else {
        last - current
    }
}

impl<R: Rng> Optimizer<R> {
    /// Steps until the global best stops improving by at least
    /// `|progress_rate|` per step for long enough, and returns the number
    /// of steps taken. Never returns if the best keeps improving.
    pub fn step_until(&mut self, progress_rate: f64) -> usize {
        let min_progress = progress_rate.abs();
        let wait = self.config.wait_magnitude;
        let verbose = self.config.verbose;

        self.step();
        let mut steps = 1;
        let mut last = self.best_fitness;
        let mut stagnant = 0;

        loop {
            self.step();
            steps += 1;
            if verbose {
                info!(
                    step = steps,
                    best = self.best_fitness,
                    average = ?self.average_fitness,
                    "step"
                );
            }

            if progress(last, self.best_fitness) < min_progress {
                stagnant += 1;
                if should_stop(steps, stagnant, wait) {
                    break;
                }
            } else {
                if verbose {
                    info!(step = steps, best = self.best_fitness, "improved");
                }
                stagnant = 0;
            }

            last = self.best_fitness;
        }

        if verbose {
            info!(steps, best = self.best_fitness, "converged");
        }
        steps
    }
}

#[cfg(test)]
mod test_converge {
    use super::*;
    use crate::exp::Sphere;
    use crate::options::Options;
    use crate::range::Range;
    use crate::swarm::seeded;

    #[test]
    fn test_stop_rule() {
        assert!(should_stop(100, 50, 1.));
        assert!(!should_stop(100, 2, 1.));
    }

    #[test]
    fn test_stop_rule_relative_to_run_length() {
        // 200 stagnant steps is long in absolute terms but small next to 1e6.
        assert!(!should_stop(1_000_000, 200, 2.));
        assert!(should_stop(1_000, 200, 2.));
    }

    #[test]
    fn test_short_streaks_never_stop() {
        for t in 1..1000 {
            assert!(!should_stop(t, 0, -1.));
            assert!(!should_stop(t, 1, -1.));
        }
    }

    #[test]
    fn test_progress_on_infinite_bests() {
        assert_eq!(progress(std::f64::INFINITY, std::f64::INFINITY), 0.);
        assert_eq!(progress(2., 1.5), 0.5);
        assert!(progress(std::f64::INFINITY, 3.) > 1.);
    }

    #[test]
    fn test_never_feasible_still_terminates() {
        let mut opt = Optimizer::with_rng(
            Sphere,
            vec![Range(0., 1.)],
            Options::default()
                .with_population_size(10)
                .with_wait_magnitude(1.)
                .with_constraint(|_: &[f64]| false),
            seeded(2),
        )
        .unwrap();
        let steps = opt.step_until(1e-6);
        // Stagnant from the second step on: stops once the streak passes 10.
        assert_eq!(steps, 12);
        assert!(opt.best_fitness().is_infinite());
    }
}
