//! Options for adaptive integration.

use crate::error::{QuadError, QuadResult};
use crate::rule::NODES;

/// Default multiplier applied to `max_step`, one step per rule node.
#[allow(clippy::cast_precision_loss)]
pub const DEFAULT_STEP_SCALE: f64 = NODES as f64;

/// Default cap on the size of the initial partition accepted by the
/// validated entry points.
pub const DEFAULT_MAX_INITIAL_REGIONS: usize = 1 << 20;

/// Options controlling tolerances and the initial partition.
///
/// Refinement stops as soon as *either* tolerance is satisfied.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadOptions {
    /// Absolute error tolerance.
    pub epsabs: f64,
    /// Relative error tolerance.
    pub epsrel: f64,
    /// Largest sub-interval width before refinement starts, in units of
    /// `step_scale`.
    pub max_step: f64,
    /// Multiplier applied to `max_step` to get the widest initial region.
    pub step_scale: f64,
    /// Optional cap on the number of bisections. `None` refines until a
    /// tolerance or the spacing limit stops it.
    pub max_subdivisions: Option<usize>,
    /// Largest initial partition the validated entry points will allocate.
    pub max_initial_regions: usize,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            epsabs: 1e-10,
            epsrel: 1e-10,
            max_step: f64::INFINITY,
            step_scale: DEFAULT_STEP_SCALE,
            max_subdivisions: None,
            max_initial_regions: DEFAULT_MAX_INITIAL_REGIONS,
        }
    }
}

impl QuadOptions {
    /// Creates options with the given tolerances and default partitioning.
    pub fn new(epsabs: f64, epsrel: f64) -> Self {
        Self {
            epsabs,
            epsrel,
            ..Self::default()
        }
    }

    /// Sets the absolute tolerance.
    #[must_use]
    pub fn with_epsabs(mut self, epsabs: f64) -> Self {
        self.epsabs = epsabs;
        self
    }

    /// Sets the relative tolerance.
    #[must_use]
    pub fn with_epsrel(mut self, epsrel: f64) -> Self {
        self.epsrel = epsrel;
        self
    }

    /// Sets the maximum initial step.
    #[must_use]
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    /// Sets the step multiplier.
    #[must_use]
    pub fn with_step_scale(mut self, step_scale: f64) -> Self {
        self.step_scale = step_scale;
        self
    }

    /// Caps the number of bisections.
    #[must_use]
    pub fn with_max_subdivisions(mut self, limit: usize) -> Self {
        self.max_subdivisions = Some(limit);
        self
    }

    /// Caps the size of the initial partition.
    #[must_use]
    pub fn with_max_initial_regions(mut self, limit: usize) -> Self {
        self.max_initial_regions = limit;
        self
    }

    /// Widest region allowed in the initial partition.
    pub fn max_region_width(&self) -> f64 {
        self.max_step * self.step_scale
    }

    /// Checks that the options describe a computation that can terminate
    /// through a tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error for negative or NaN tolerances, two zero
    /// tolerances, a non-positive `max_step`, or a non-positive or
    /// non-finite `step_scale`.
    pub fn validate(&self) -> QuadResult<()> {
        for (name, value) in [("epsabs", self.epsabs), ("epsrel", self.epsrel)] {
            if value.is_nan() || value < 0.0 {
                return Err(QuadError::InvalidTolerance { name, value });
            }
        }
        if self.epsabs == 0.0 && self.epsrel == 0.0 {
            return Err(QuadError::ZeroTolerance);
        }
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            return Err(QuadError::InvalidMaxStep(self.max_step));
        }
        if !self.step_scale.is_finite() || self.step_scale <= 0.0 {
            return Err(QuadError::InvalidStepScale(self.step_scale));
        }
        Ok(())
    }

    /// Checks that partitioning a span of width `span` stays within
    /// `max_initial_regions`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadError::TooManyRegions`] when the initial partition would
    /// exceed the cap. A region width that underflows to zero counts as an
    /// infinite partition.
    #[allow(clippy::cast_precision_loss)]
    pub fn check_partition(&self, span: f64) -> QuadResult<()> {
        let count = (span / self.max_region_width()).ceil();
        if count.is_nan() || count > self.max_initial_regions as f64 {
            return Err(QuadError::TooManyRegions {
                count,
                limit: self.max_initial_regions,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = QuadOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.step_scale, 15.0);
        assert!(options.max_region_width().is_infinite());
    }

    #[test]
    fn test_builder() {
        let options = QuadOptions::new(0.0, 1e-13)
            .with_max_step(2.0)
            .with_max_subdivisions(10);
        assert_eq!(options.epsabs, 0.0);
        assert_eq!(options.epsrel, 1e-13);
        assert_eq!(options.max_region_width(), 30.0);
        assert_eq!(options.max_subdivisions, Some(10));
        assert_eq!(options.max_initial_regions, DEFAULT_MAX_INITIAL_REGIONS);
    }

    #[test]
    fn test_validate_rejects_bad_tolerances() {
        let options = QuadOptions::default().with_epsabs(-1.0);
        assert_eq!(
            options.validate(),
            Err(QuadError::InvalidTolerance {
                name: "epsabs",
                value: -1.0
            })
        );

        let options = QuadOptions::default().with_epsrel(f64::NAN);
        assert!(matches!(
            options.validate(),
            Err(QuadError::InvalidTolerance { name: "epsrel", .. })
        ));

        let options = QuadOptions::new(0.0, 0.0);
        assert_eq!(options.validate(), Err(QuadError::ZeroTolerance));
    }

    #[test]
    fn test_validate_rejects_bad_steps() {
        let options = QuadOptions::default().with_max_step(0.0);
        assert_eq!(options.validate(), Err(QuadError::InvalidMaxStep(0.0)));

        let options = QuadOptions::default().with_step_scale(f64::INFINITY);
        assert!(matches!(
            options.validate(),
            Err(QuadError::InvalidStepScale(_))
        ));
    }

    #[test]
    fn test_check_partition() {
        let options = QuadOptions::default().with_max_step(1.0);
        assert!(options.check_partition(100.0).is_ok());
        assert!(QuadOptions::default().check_partition(1e300).is_ok());

        let options = QuadOptions::default().with_max_initial_regions(4);
        assert!(options.clone().with_max_step(0.1).check_partition(6.0).is_ok());
        assert_eq!(
            options.with_max_step(0.1).check_partition(6.1),
            Err(QuadError::TooManyRegions {
                count: 5.0,
                limit: 4
            })
        );
    }

    #[test]
    fn test_check_partition_rejects_tiny_steps() {
        // ceil(1 / 1.5e-299) regions, far beyond any allocation
        let options = QuadOptions::new(1e-10, 1e-10).with_max_step(1e-300);
        assert!(options.validate().is_ok());
        assert!(matches!(
            options.check_partition(1.0),
            Err(QuadError::TooManyRegions { .. })
        ));

        // The region count overflows to infinity
        let options = options.with_max_step(f64::MIN_POSITIVE * f64::EPSILON);
        assert!(matches!(
            options.check_partition(1.0),
            Err(QuadError::TooManyRegions { count, .. }) if count.is_infinite()
        ));
    }
}
