//! Adaptive Numerical Integration
//!
//! Implements adaptive bisection on top of the G7K15 rule. The interval is
//! first cut into equal regions no wider than the configured maximum, then
//! the region with the largest error estimate is repeatedly bisected until
//! either tolerance is met.
//!
//! # Termination
//!
//! Refinement continues while `error > epsabs` *and* the relative criterion
//! `error / |integral| <= epsrel` is not met. A running integral of exactly
//! zero never satisfies the relative criterion, so only `epsabs` can stop
//! refinement in that case.
//!
//! Refinement also stops when:
//! - the worst region is narrower than the floating-point spacing at its
//!   magnitude (see [`Region::at_spacing_limit`]),
//! - the running totals become NaN or infinite,
//! - the optional subdivision cap is reached.
//!
//! Each of these emits a `tracing` warning. The result is always returned.
//!
//! # Example
//!
//! ```
//! use kronrod_quad::integrate;
//!
//! // ∫₀^π sin(x) dx = 2
//! let result = integrate(|x: f64| x.sin(), 0.0, std::f64::consts::PI, 1e-12, 1e-12, 1.0);
//! assert!((result.integral - 2.0).abs() < 1e-12);
//! ```

use tracing::{debug, info, warn};

use crate::error::{QuadError, QuadResult};
use crate::heap::{RegionHeap, RegionQueue};
use crate::options::QuadOptions;
use crate::region::Region;
use crate::rule::{fixed_quadrature, NODES};

/// Final integral and error estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegrationResult {
    /// Computed integral value
    pub integral: f64,
    /// Estimated absolute error
    pub error: f64,
}

/// Why refinement stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// One of the tolerances was satisfied.
    Converged,
    /// The worst region reached the floating-point spacing limit.
    SpacingLimit,
    /// The configured subdivision cap was reached.
    SubdivisionLimit,
    /// The running integral or error became NaN or infinite.
    NonFinite,
}

/// Result of adaptive integration with diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadReport {
    /// Integral summed over the final regions
    pub integral: f64,
    /// Error estimate summed over the final regions
    pub error: f64,
    /// Number of regions in the final partition
    pub regions: usize,
    /// Total number of integrand evaluations
    pub evaluations: usize,
    /// Number of bisections performed
    pub subdivisions: usize,
    /// Why refinement stopped
    pub termination: Termination,
}

impl QuadReport {
    /// The integral and error without diagnostics.
    pub fn result(&self) -> IntegrationResult {
        IntegrationResult {
            integral: self.integral,
            error: self.error,
        }
    }

    /// Returns true if a tolerance was satisfied.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Outcome of a single refinement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The worst region was bisected.
    Refined,
    /// Refinement is over.
    Done(Termination),
}

/// Lifecycle of an [`AdaptiveDriver`]. The only transition is
/// `Refining -> Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Refinement may still continue.
    Refining,
    /// Refinement has stopped.
    Done(Termination),
}

/// Returns true if neither tolerance is satisfied.
///
/// A zero `integral` leaves the relative criterion unsatisfied.
pub fn needs_refinement(integral: f64, error: f64, epsabs: f64, epsrel: f64) -> bool {
    error > epsabs && (integral == 0.0 || error / integral.abs() > epsrel)
}

/// Number of equal regions in the initial partition of a span.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub(crate) fn initial_region_count(span: f64, max_region_width: f64) -> usize {
    // NaN and negative counts saturate to 0 in the cast
    ((span / max_region_width).ceil() as usize).max(1)
}

/// Cuts `[a, b]` into equal sub-intervals no wider than `max_region_width`.
///
/// Neighbouring sub-intervals share the exact same boundary value and the
/// last one ends exactly at `b`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn partition(a: f64, b: f64, max_region_width: f64) -> Vec<(f64, f64)> {
    let count = initial_region_count(b - a, max_region_width);
    if count == 1 {
        return vec![(a, b)];
    }

    let width = (b - a) / count as f64;
    let boundary = |i: usize| match i {
        0 => a,
        i if i == count => b,
        i => a + i as f64 * width,
    };
    (0..count).map(|i| (boundary(i), boundary(i + 1))).collect()
}

/// Stepwise adaptive integrator.
///
/// [`AdaptiveDriver::new`] evaluates the initial partition; each call to
/// [`step`](AdaptiveDriver::step) performs at most one bisection;
/// [`run`](AdaptiveDriver::run) refines to completion and re-sums the final
/// regions. The driver owns its region queue for its whole lifetime.
pub struct AdaptiveDriver<F, Q = RegionHeap> {
    f: F,
    queue: Q,
    integral: f64,
    error: f64,
    epsabs: f64,
    epsrel: f64,
    max_subdivisions: Option<usize>,
    evaluations: usize,
    subdivisions: usize,
    state: DriverState,
}

impl<F> AdaptiveDriver<F>
where
    F: Fn(f64) -> f64,
{
    /// Partitions `[a, b]` and evaluates every initial region.
    ///
    /// Expects `a < b`.
    pub fn new(f: F, a: f64, b: f64, options: &QuadOptions) -> Self {
        Self::with_queue(f, a, b, options, RegionHeap::new())
    }
}

impl<F, Q> AdaptiveDriver<F, Q>
where
    F: Fn(f64) -> f64,
    Q: RegionQueue,
{
    /// Like [`AdaptiveDriver::new`], storing regions in the given empty queue.
    pub fn with_queue(f: F, a: f64, b: f64, options: &QuadOptions, queue: Q) -> Self {
        let regions = partition(a, b, options.max_region_width())
            .into_iter()
            .map(|(lo, hi)| fixed_quadrature(&f, lo, hi))
            .collect();
        Self::from_regions(f, regions, options, queue)
    }

    /// Builds a driver from an already evaluated initial partition.
    ///
    /// Regions are inserted and summed in the order given.
    pub(crate) fn from_regions(
        f: F,
        regions: Vec<Region>,
        options: &QuadOptions,
        mut queue: Q,
    ) -> Self {
        debug_assert!(queue.is_empty());
        debug!(regions = regions.len(), "initial partition evaluated");

        let evaluations = regions.len() * NODES;
        let mut integral = 0.0;
        let mut error = 0.0;
        for region in regions {
            integral += region.integral;
            error += region.error;
            queue.push(region);
        }

        Self {
            f,
            queue,
            integral,
            error,
            epsabs: options.epsabs,
            epsrel: options.epsrel,
            max_subdivisions: options.max_subdivisions,
            evaluations,
            subdivisions: 0,
            state: DriverState::Refining,
        }
    }

    /// Performs one refinement step.
    ///
    /// Once [`Step::Done`] has been returned, every further call returns the
    /// same value without touching the regions.
    pub fn step(&mut self) -> Step {
        if let DriverState::Done(termination) = self.state {
            return Step::Done(termination);
        }

        match self.select() {
            Ok(worst) => {
                let (left, right) = worst.bisect(&self.f);
                self.integral += left.integral + right.integral - worst.integral;
                self.error += left.error + right.error - worst.error;
                self.queue.push(left);
                self.queue.push(right);
                self.evaluations += 2 * NODES;
                self.subdivisions += 1;
                Step::Refined
            }
            Err(termination) => {
                self.state = DriverState::Done(termination);
                Step::Done(termination)
            }
        }
    }

    /// Takes the region to bisect next, or decides that refinement is over.
    fn select(&mut self) -> Result<Region, Termination> {
        if !self.integral.is_finite() || !self.error.is_finite() {
            warn!(
                integral = self.integral,
                error = self.error,
                "integrand produced non-finite values, stopping refinement"
            );
            return Err(Termination::NonFinite);
        }

        if !needs_refinement(self.integral, self.error, self.epsabs, self.epsrel) {
            return Err(Termination::Converged);
        }

        if let Some(limit) = self.max_subdivisions {
            if self.subdivisions >= limit {
                warn!(limit, error = self.error, "subdivision limit reached");
                return Err(Termination::SubdivisionLimit);
            }
        }

        // The partition always holds at least one region.
        let worst = match self.queue.peek_max() {
            Some(region) => *region,
            None => return Err(Termination::Converged),
        };
        if worst.at_spacing_limit() {
            warn!(
                a = worst.a,
                b = worst.b,
                "integration step is smaller than the spacing between numbers"
            );
            return Err(Termination::SpacingLimit);
        }

        self.queue.pop_max().ok_or(Termination::Converged)
    }

    /// Refines until done, then re-sums the final regions.
    pub fn run(mut self) -> QuadReport {
        let termination = loop {
            if let Step::Done(termination) = self.step() {
                break termination;
            }
        };
        self.finish(termination)
    }

    fn finish(self, termination: Termination) -> QuadReport {
        // Re-sum from scratch to drop the drift of the incremental updates.
        let (integral, error) = self
            .queue
            .iter()
            .fold((0.0, 0.0), |(integral, error), region| {
                (integral + region.integral, error + region.error)
            });
        let regions = self.queue.len();
        info!(regions, "integration regions");

        QuadReport {
            integral,
            error,
            regions,
            evaluations: self.evaluations,
            subdivisions: self.subdivisions,
            termination,
        }
    }

    /// Current regions, in unspecified order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.queue.iter()
    }

    /// Number of current regions.
    pub fn region_count(&self) -> usize {
        self.queue.len()
    }

    /// Incrementally maintained integral estimate.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Incrementally maintained error estimate.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Integrand evaluations so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Bisections so far.
    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }
}

/// Integrates `f` over `[a, b]` with adaptive G7K15 quadrature.
///
/// Refinement stops as soon as `error <= epsabs` or
/// `error / |integral| <= epsrel`. Initial regions are at most
/// `15 * max_step` wide.
///
/// # Arguments
///
/// * `f` - The function to integrate
/// * `a` - Lower bound
/// * `b` - Upper bound, must satisfy `a < b`
/// * `epsabs` - Absolute error tolerance
/// * `epsrel` - Relative error tolerance
/// * `max_step` - Largest initial step, scaled by the rule's node count
pub fn integrate<F>(
    f: F,
    a: f64,
    b: f64,
    epsabs: f64,
    epsrel: f64,
    max_step: f64,
) -> IntegrationResult
where
    F: Fn(f64) -> f64,
{
    let options = QuadOptions::new(epsabs, epsrel).with_max_step(max_step);
    integrate_with_options(f, a, b, &options).result()
}

/// Integrates `f` over `[a, b]` and returns the full report.
///
/// Inputs are not validated; see [`try_integrate`].
pub fn integrate_with_options<F>(f: F, a: f64, b: f64, options: &QuadOptions) -> QuadReport
where
    F: Fn(f64) -> f64,
{
    AdaptiveDriver::new(f, a, b, options).run()
}

/// Validates the inputs, integrates, and rejects non-finite results.
///
/// # Errors
///
/// Returns [`QuadError::InvalidInterval`] unless `a < b` with both bounds
/// finite, any error from [`QuadOptions::validate`] or
/// [`QuadOptions::check_partition`], and [`QuadError::NonFinite`] if the
/// integrand produced NaN or infinite values.
pub fn try_integrate<F>(f: F, a: f64, b: f64, options: &QuadOptions) -> QuadResult<QuadReport>
where
    F: Fn(f64) -> f64,
{
    check_inputs(a, b, options)?;
    reject_non_finite(integrate_with_options(f, a, b, options))
}

pub(crate) fn check_inputs(a: f64, b: f64, options: &QuadOptions) -> QuadResult<()> {
    if !(a.is_finite() && b.is_finite() && a < b) {
        return Err(QuadError::InvalidInterval { a, b });
    }
    options.validate()?;
    options.check_partition(b - a)
}

pub(crate) fn reject_non_finite(report: QuadReport) -> QuadResult<QuadReport> {
    if report.termination == Termination::NonFinite {
        return Err(QuadError::NonFinite {
            integral: report.integral,
            error: report.error,
        });
    }
    Ok(report)
}
