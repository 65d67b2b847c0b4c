//! Parallel evaluation of the initial partition.
//!
//! This module evaluates the regions of the initial partition with rayon
//! for work-stealing parallelism. Refinement itself stays sequential.
//!
//! Regions are collected in partition order and inserted in that order, so
//! the driver then follows exactly the same refinement sequence as the
//! sequential [`integrate_with_options`](crate::integrate_with_options) and
//! produces bit-identical results.

use rayon::prelude::*;

use crate::adaptive::{check_inputs, partition, reject_non_finite, AdaptiveDriver, QuadReport};
use crate::error::QuadResult;
use crate::heap::RegionHeap;
use crate::options::QuadOptions;
use crate::region::Region;
use crate::rule::fixed_quadrature;

/// Configuration for parallel partition evaluation.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Minimum number of initial regions to enable parallelism.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

/// Adaptive integration with a parallel partition phase.
///
/// Falls back to sequential evaluation when the partition has fewer than
/// `config.parallel_threshold` regions. Inputs are not validated.
pub fn integrate_parallel<F>(
    f: F,
    a: f64,
    b: f64,
    options: &QuadOptions,
    config: &ParallelConfig,
) -> QuadReport
where
    F: Fn(f64) -> f64 + Sync,
{
    let bounds = partition(a, b, options.max_region_width());

    let regions: Vec<Region> = if bounds.len() < config.parallel_threshold {
        bounds
            .iter()
            .map(|&(lo, hi)| fixed_quadrature(&f, lo, hi))
            .collect()
    } else {
        bounds
            .par_iter()
            .map(|&(lo, hi)| fixed_quadrature(&f, lo, hi))
            .collect()
    };

    AdaptiveDriver::from_regions(f, regions, options, RegionHeap::with_capacity(bounds.len()))
        .run()
}

/// Validated variant of [`integrate_parallel`].
///
/// # Errors
///
/// Same as [`try_integrate`](crate::try_integrate).
pub fn try_integrate_parallel<F>(
    f: F,
    a: f64,
    b: f64,
    options: &QuadOptions,
    config: &ParallelConfig,
) -> QuadResult<QuadReport>
where
    F: Fn(f64) -> f64 + Sync,
{
    check_inputs(a, b, options)?;
    reject_non_finite(integrate_parallel(f, a, b, options, config))
}
