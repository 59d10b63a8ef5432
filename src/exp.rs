//! Objectives for exercising the optimizer.

use std::sync::Arc;

use crate::range::Range;
use crate::{Constraint, Fitness};

/// Sum of squares; minimum 0 at the origin.
#[derive(Clone, Copy, Debug)]
pub struct Sphere;

impl Fitness for Sphere {
    fn score(&self, candidate: &[f64]) -> f64 {
        candidate.iter().map(|x| x * x).sum()
    }
}

/// Matyas function shifted so its minimum of 0 sits at `(-self.0, -self.1)`.
#[derive(Clone, Copy, Debug)]
pub struct Matyas(pub f64, pub f64);

impl Fitness for Matyas {
    fn score(&self, candidate: &[f64]) -> f64 {
        let x = candidate[0] + self.0;
        let y = candidate[1] + self.1;
        0.26 * (x.powi(2) + y.powi(2)) - 0.48 * x * y
    }
}

/// Weight of the Golinski speed reducer.
///
/// Dimensions: face width, tooth module, pinion teeth, the two shaft
/// lengths between bearings, and the two shaft diameters.
pub fn golinski(x: &[f64]) -> f64 {
    let a = 0.7854 * x[0] * x[1].powi(2) * (3.3333 * x[2].powi(2) + 14.9334 * x[2] - 43.0934);
    let b = 1.508 * x[0] * (x[5].powi(2) + x[6].powi(2));
    let c = 7.4777 * (x[5].powi(3) + x[6].powi(3));
    let d = 0.7854 * (x[3] * x[5].powi(2) + x[4] * x[6].powi(2));
    a - b + c + d
}

/// Design ranges for [`golinski`]. Serves as both shape and bounds.
pub fn golinski_shape() -> Vec<Range> {
    vec![
        Range(2.6, 3.6),
        Range(0.7, 0.8),
        Range(17., 28.),
        Range(7.3, 8.3),
        Range(7.3, 8.3),
        Range(2.9, 3.9),
        Range(5.0, 5.5),
    ]
}

/// Bending, surface stress, deflection, shaft stress and geometry limits
/// for [`golinski`], each of the form `g(x) <= 1`.
pub fn golinski_constraints() -> Vec<Arc<dyn Constraint>> {
    fn g<F: Fn(&[f64]) -> f64 + Send + Sync + 'static>(f: F) -> Arc<dyn Constraint> {
        Arc::new(move |x: &[f64]| f(x) <= 1.)
    }

    vec![
        g(|x| 27. / (x[0] * x[1].powi(2) * x[2])),
        g(|x| 397.5 / (x[0] * x[1].powi(2) * x[2].powi(2))),
        g(|x| 1.93 * x[3].powi(3) / (x[1] * x[2] * x[5].powi(4))),
        g(|x| 1.93 * x[4].powi(3) / (x[1] * x[2] * x[6].powi(4))),
        g(|x| ((745. * x[3] / x[1] / x[2]).powi(2) + 16.9e6).sqrt() / (110. * x[5].powi(3))),
        g(|x| ((745. * x[4] / x[1] / x[2]).powi(2) + 157.5e6).sqrt() / (85. * x[6].powi(3))),
        g(|x| x[1] * x[2] / 40.),
        g(|x| 5. * x[1] / x[0]),
        g(|x| x[0] / 12. / x[1]),
        g(|x| (1.5 * x[5] + 1.9) / x[3]),
        g(|x| (1.1 * x[6] + 1.9) / x[4]),
    ]
}
