//! Integration regions.

use crate::rule::fixed_quadrature;

/// Relative width below which a region can no longer be bisected meaningfully.
pub const SPACING_LIMIT: f64 = 1e-14;

/// A sub-interval together with its quadrature estimate.
///
/// Regions are produced once by [`fixed_quadrature`] and never mutated;
/// refinement replaces a region by its two halves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Lower bound
    pub a: f64,
    /// Upper bound
    pub b: f64,
    /// Kronrod estimate of the integral over `[a, b]`
    pub integral: f64,
    /// Absolute difference between the Gauss and Kronrod estimates
    pub error: f64,
}

impl Region {
    /// Width of the sub-interval.
    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    /// Midpoint used for bisection.
    pub fn midpoint(&self) -> f64 {
        (self.a + self.b) / 2.0
    }

    /// Returns true if the region has shrunk to the floating-point spacing
    /// at its magnitude, so bisecting it would no longer produce distinct
    /// sub-intervals.
    pub fn at_spacing_limit(&self) -> bool {
        self.width() < self.a.abs().max(self.b.abs()) * SPACING_LIMIT
    }

    /// Splits the region at its midpoint and evaluates both halves.
    ///
    /// The two children share the exact same midpoint, so together they cover
    /// `[a, b]` with no gap or overlap.
    pub fn bisect<F>(&self, f: &F) -> (Region, Region)
    where
        F: Fn(f64) -> f64 + ?Sized,
    {
        let mid = self.midpoint();
        (
            fixed_quadrature(f, self.a, mid),
            fixed_quadrature(f, mid, self.b),
        )
    }
}
