//! Geometric primitives for the incremental solver.
//!
//! Purpose
//! - Runtime-dimension vectors, points, hyperplanes and closed half-spaces,
//!   plus the `Frame` that charts a hyperplane as R^(n-1).
//! - Everything is value-like: operations return new values, so solver levels
//!   never share mutable geometry.
//!
//! Conventions
//! - Half-spaces are `N·x <= D` with unit `N`; containment is closed and uses
//!   `GeomCfg::eps_feas` slack.
//! - Degenerate results (parallel planes) are `None` / `Reduced::{Free, Empty}`,
//!   never errors.

mod cfg;
mod halfspace;
mod plane;
mod point;
mod vector;

pub use cfg::GeomCfg;
pub use halfspace::{HalfSpace, Reduced};
pub use plane::{Frame, Intersection, Plane};
pub use point::Point;
pub use vector::Vector;
