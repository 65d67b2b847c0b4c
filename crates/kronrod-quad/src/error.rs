//! Errors reported by the validated quadrature entry points.

use thiserror::Error;

/// Result type for validated quadrature.
pub type QuadResult<T> = Result<T, QuadError>;

/// Errors that can occur when integration input is validated.
///
/// The core algorithm itself never fails; these errors come from
/// [`QuadOptions::validate`](crate::QuadOptions::validate) and
/// [`try_integrate`](crate::try_integrate).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QuadError {
    /// The bounds are not finite or not in increasing order.
    #[error("invalid interval [{a}, {b}]: bounds must be finite with a < b")]
    InvalidInterval {
        /// Lower bound
        a: f64,
        /// Upper bound
        b: f64,
    },

    /// A tolerance is negative or NaN.
    #[error("invalid tolerance {name} = {value}: must be finite and non-negative")]
    InvalidTolerance {
        /// Which tolerance, `epsabs` or `epsrel`
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Both tolerances are zero.
    #[error("epsabs and epsrel are both zero: refinement could only stop at the spacing limit")]
    ZeroTolerance,

    /// `max_step` is zero, negative or NaN.
    #[error("invalid max_step {0}: must be positive")]
    InvalidMaxStep(f64),

    /// `step_scale` is not a positive finite number.
    #[error("invalid step_scale {0}: must be positive and finite")]
    InvalidStepScale(f64),

    /// The initial partition would exceed `max_initial_regions`.
    #[error("initial partition needs {count} regions, more than the limit of {limit}")]
    TooManyRegions {
        /// Regions the partition would need
        count: f64,
        /// Configured cap
        limit: usize,
    },

    /// The integrand produced NaN or infinite values.
    #[error("integrand produced non-finite values (integral = {integral}, error = {error})")]
    NonFinite {
        /// Integral at the point refinement stopped
        integral: f64,
        /// Error estimate at the point refinement stopped
        error: f64,
    },
}
