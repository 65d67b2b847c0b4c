//! # Kronrod
//!
//! Adaptive numerical integration of one-dimensional real functions.
//!
//! This is the umbrella crate: it re-exports the quadrature engine and a
//! prelude with the types most callers need.
//!
//! ## Quick Start
//!
//! ```
//! use kronrod::prelude::*;
//!
//! let options = QuadOptions::new(0.0, 1e-12);
//! let report = try_integrate(|x: f64| (-x * x).exp(), -3.0, 3.0, &options).unwrap();
//! assert!(report.converged());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use kronrod_quad as quad;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use kronrod_quad::{
        integrate, integrate_parallel, integrate_with_options, try_integrate, IntegrationResult,
        ParallelConfig, QuadError, QuadOptions, QuadReport, Termination,
    };
}
