//! # kronrod-quad
//!
//! Adaptive Gauss-Kronrod quadrature for one-dimensional real functions.
//!
//! This crate provides:
//! - The G7K15 rule (7-point Gauss nested in 15-point Kronrod) with a local
//!   error estimate from the difference of the two
//! - Max-priority region storage keyed by error
//! - An adaptive driver that bisects the worst region until a tolerance is
//!   met or the floating-point spacing limit is reached
//! - Validated entry points and a rayon-parallel initial partition
//!
//! ## Quick Start
//!
//! ```
//! use kronrod_quad::{integrate, try_integrate, QuadOptions};
//!
//! // ∫₋₅₀⁵⁰ x sin(x) dx
//! let result = integrate(|x: f64| x * x.sin(), -50.0, 50.0, 0.0, 1e-13, 99e99);
//! let exact = 2.0 * (50.0_f64.sin() - 50.0 * 50.0_f64.cos());
//! assert!((result.integral - exact).abs() < 1e-9);
//!
//! let report = try_integrate(|x: f64| x.exp(), 0.0, 1.0, &QuadOptions::default()).unwrap();
//! assert!(report.converged());
//! ```
//!
//! ## Diagnostics
//!
//! The final region count is emitted as a `tracing` `info` event, and early
//! stops (spacing limit, subdivision cap, non-finite values) as `warn`
//! events. Install a subscriber to see them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adaptive;
pub mod error;
pub mod heap;
pub mod options;
pub mod parallel;
pub mod region;
pub mod rule;

pub use adaptive::{
    integrate, integrate_with_options, needs_refinement, try_integrate, AdaptiveDriver,
    DriverState, IntegrationResult, QuadReport, Step, Termination,
};
pub use error::{QuadError, QuadResult};
pub use heap::{ByError, RegionHeap, RegionQueue};
pub use options::QuadOptions;
pub use parallel::{integrate_parallel, try_integrate_parallel, ParallelConfig};
pub use region::Region;
pub use rule::fixed_quadrature;

#[cfg(test)]
mod proptests;
