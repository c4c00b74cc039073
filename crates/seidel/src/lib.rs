//! Low-dimensional linear programming with Seidel's randomized incremental
//! algorithm.
//!
//! Given closed half-spaces `N_i·x <= D_i` in R^n and a direction `c`, find
//! the point minimizing `c·x` over their intersection, or report that the
//! intersection is empty.
//!
//! Layout
//! - `geom`: vectors, points, hyperplanes, half-spaces and reduction frames.
//! - `solver`: the recursive solver (`Solver`, `solve`).
//! - `gen`: seeded random instances.
//!
//! The target is small fixed dimension. Once the inserted half-spaces bound
//! the objective, expected time is linear in the number of half-spaces for
//! fixed n, with a constant that grows quickly with n. Unbounded stretches
//! cost a recession solve per insertion, and a run that ends unbounded pays
//! a brute-force vertex scan, O(C(m, n) · m).

pub mod error;
pub mod gen;
pub mod geom;
pub mod solver;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeomError, SolverError};
pub use solver::{solve, ResultType, Solution, Solver};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{GeomError, SolverError};
    pub use crate::gen::{random_bounded_problem, GenCfg, Problem, ReplayToken};
    pub use crate::geom::{Frame, GeomCfg, HalfSpace, Intersection, Plane, Point, Reduced, Vector};
    pub use crate::solver::{solve, ResultType, Solution, Solver};
}
