/// Closed interval `[lower, upper]` over one dimension.
///
/// `Range(0., 0.)` is the unbounded sentinel: it contains every value and
/// clipping through it is the identity. It is the only way to leave a
/// dimension free inside a list of bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Range(pub f64, pub f64);

impl Range {
    pub const UNBOUNDED: Range = Range(0., 0.);

    pub fn new(lower: f64, upper: f64) -> Self {
        Range(lower, upper)
    }

    pub fn lower(&self) -> f64 {
        self.0
    }

    pub fn upper(&self) -> f64 {
        self.1
    }

    pub fn width(&self) -> f64 {
        self.1 - self.0
    }

    pub fn is_unbounded(&self) -> bool {
        self.0 == 0. && self.1 == 0.
    }

    /// Inclusive on both ends.
    pub fn contains(&self, x: f64) -> bool {
        if self.is_unbounded() {
            return true;
        }
        self.0 <= x && x <= self.1
    }

    /// Saturates to the nearer bound.
    pub fn clip(&self, x: f64) -> f64 {
        if self.is_unbounded() {
            return x;
        }
        if x < self.0 {
            self.0
        } else if self.1 < x {
            self.1
        } else {
            x
        }
    }
}

impl From<(f64, f64)> for Range {
    fn from((lower, upper): (f64, f64)) -> Self {
        Range(lower, upper)
    }
}
