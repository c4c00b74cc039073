//! Seidel's randomized incremental solver for small-dimension LPs.
//!
//! Problem
//! - Minimize `c·x` subject to closed half-spaces `N_i·x <= D_i` in R^n.
//!
//! Model
//! - Half-spaces are inserted in uniformly random order. A candidate that
//!   survives a new half-space is kept; otherwise the optimum of everything
//!   inserted so far lies on the new boundary, and a child solver one
//!   dimension down finds it there. Dimension 1 is an interval intersection.
//! - `Ambiguous` covers the stretch where the inserted half-spaces do not yet
//!   bound the objective. While in it, each insertion decides boundedness with
//!   a recession test (a feasibility solve one dimension down).
//! - If the objective is still unbounded after the last insertion, the best
//!   vertex of the accepted polyhedron (if any) is reported as the minimum.
//! - Dimension 1 never ends `Ambiguous` past its second bound: the interval
//!   end on the objective side, or the finite end, is the minimum.
//!
//! Randomness
//! - One caller-owned RNG is threaded through every level; `run` falls back
//!   to the thread RNG at the outermost call only.

mod vertices;

use nalgebra::DVector;
use rand::Rng;

use crate::error::SolverError;
use crate::geom::{Frame, GeomCfg, HalfSpace, Plane, Point, Reduced, Vector};

/// Terminal classification of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultType {
    /// Optimum found.
    Minimum,
    /// Feasible, but the objective was never bounded; the point is a witness.
    Ambiguous,
    /// No point satisfies every half-space.
    Infeasible,
}

/// Result type together with its point.
#[derive(Clone, Debug, PartialEq)]
pub enum Solution {
    Minimum(Point),
    Ambiguous(Point),
    Infeasible,
}

impl Solution {
    pub fn result_type(&self) -> ResultType {
        match self {
            Solution::Minimum(_) => ResultType::Minimum,
            Solution::Ambiguous(_) => ResultType::Ambiguous,
            Solution::Infeasible => ResultType::Infeasible,
        }
    }

    pub fn point(&self) -> Option<&Point> {
        match self {
            Solution::Minimum(p) | Solution::Ambiguous(p) => Some(p),
            Solution::Infeasible => None,
        }
    }
}

/// One solver level. Consumed by exactly one run.
///
/// Invariants (after each insertion):
/// - `Minimum(p)`: `p` is optimal for the accepted half-spaces. In dimension 1
///   an objective open on one side settles on the extreme accepted bound.
/// - `Ambiguous(p)`: `p` is feasible for them, and either only one has been
///   accepted or (n > 1) the objective is unbounded below over their intersection.
/// - `Infeasible`: their intersection is empty.
#[derive(Clone, Debug)]
pub struct Solver {
    pending: Vec<HalfSpace>,
    accepted: Vec<HalfSpace>,
    direction: Vector,
    cfg: GeomCfg,
    /// Running `[lo, hi]` of the accepted bounds (dimension 1 only).
    interval: (f64, f64),
    /// `None` until the first insertion.
    state: Option<State>,
    /// Set once `run_with` starts, so a failed run cannot be restarted.
    started: bool,
}

#[derive(Clone, Debug)]
enum State {
    Ambiguous(Point),
    Minimum(Point),
    Infeasible,
}

impl Solver {
    pub fn new(half_spaces: Vec<HalfSpace>, direction: Vector) -> Result<Self, SolverError> {
        if half_spaces.is_empty() {
            return Err(SolverError::EmptyConstraintSet);
        }
        if direction.as_slice().iter().any(|x| !x.is_finite()) {
            return Err(SolverError::NonFiniteDirection);
        }
        let expected = direction.dim();
        if let Some((index, h)) = half_spaces
            .iter()
            .enumerate()
            .find(|(_, h)| h.dim() != expected)
        {
            return Err(SolverError::DimensionMismatch {
                index,
                expected,
                found: h.dim(),
            });
        }
        Ok(Self {
            accepted: Vec::with_capacity(half_spaces.len()),
            pending: half_spaces,
            direction,
            cfg: GeomCfg::default(),
            interval: (f64::NEG_INFINITY, f64::INFINITY),
            state: None,
            started: false,
        })
    }

    pub fn with_cfg(mut self, cfg: GeomCfg) -> Self {
        self.cfg = cfg;
        self
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.direction.dim()
    }

    /// Run with the thread RNG.
    pub fn run(&mut self) -> Result<ResultType, SolverError> {
        self.run_with(&mut rand::thread_rng())
    }

    /// Run with a caller-supplied RNG; the same RNG drives every child level.
    pub fn run_with<R: Rng>(&mut self, rng: &mut R) -> Result<ResultType, SolverError> {
        if self.started {
            return Err(SolverError::AlreadyRun);
        }
        self.started = true;
        let span = tracing::debug_span!("seidel", dim = self.dim(), constraints = self.pending.len());
        let _enter = span.enter();

        while !self.pending.is_empty() {
            let pick = rng.gen_range(0..self.pending.len());
            let h = self.pending.swap_remove(pick);
            if self.dim() == 1 {
                self.tighten(&h);
            }
            let prev = self.state.take();
            let next = self.insert(prev, &h, rng)?;
            self.state = Some(next);
            self.accepted.push(h);
            if matches!(self.state, Some(State::Infeasible)) {
                break;
            }
        }

        if self.dim() > 1 && matches!(self.state, Some(State::Ambiguous(_))) {
            if let Some(v) = vertices::best_vertex(&self.accepted, &self.direction, &self.cfg) {
                tracing::trace!("unbounded objective, settling on best vertex");
                self.state = Some(State::Minimum(v));
            }
        }

        let kind = self.result_type().ok_or(SolverError::EmptyConstraintSet)?;
        tracing::debug!(result = ?kind, accepted = self.accepted.len(), "level done");
        Ok(kind)
    }

    /// `None` before `run`.
    pub fn result_type(&self) -> Option<ResultType> {
        self.state.as_ref().map(|s| match s {
            State::Minimum(_) => ResultType::Minimum,
            State::Ambiguous(_) => ResultType::Ambiguous,
            State::Infeasible => ResultType::Infeasible,
        })
    }

    /// Present iff the run ended in `Minimum` or `Ambiguous`.
    pub fn result_point(&self) -> Option<&Point> {
        match self.state.as_ref()? {
            State::Minimum(p) | State::Ambiguous(p) => Some(p),
            State::Infeasible => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        Some(match self.state? {
            State::Minimum(p) => Solution::Minimum(p),
            State::Ambiguous(p) => Solution::Ambiguous(p),
            State::Infeasible => Solution::Infeasible,
        })
    }

    fn insert<R: Rng>(
        &self,
        prev: Option<State>,
        h: &HalfSpace,
        rng: &mut R,
    ) -> Result<State, SolverError> {
        let eps = self.cfg.eps_feas;
        match prev {
            None => Ok(State::Ambiguous(h.plane().point().clone())),
            Some(State::Infeasible) => Ok(State::Infeasible),
            Some(_) if self.dim() == 1 => Ok(self.settle_interval()),
            Some(State::Minimum(p)) if h.contains_eps(&p, eps) => Ok(State::Minimum(p)),
            Some(State::Minimum(_)) => {
                tracing::trace!(accepted = self.accepted.len(), "candidate violated");
                self.descend(h, true, rng)
            }
            Some(State::Ambiguous(p)) => self.insert_unsettled(p, h, rng),
        }
    }

    fn insert_unsettled<R: Rng>(
        &self,
        p: Point,
        h: &HalfSpace,
        rng: &mut R,
    ) -> Result<State, SolverError> {
        let eps = self.cfg.eps_feas;
        // A lone first half-space may already bound the objective; then its
        // representative point is optimal and `p` is a settled candidate.
        if self.accepted.len() == 1 && self.objective_bounded(None, rng)? {
            return if h.contains_eps(&p, eps) {
                Ok(State::Minimum(p))
            } else {
                self.descend(h, true, rng)
            };
        }
        if self.objective_bounded(Some(h), rng)? {
            return self.descend(h, true, rng);
        }
        if h.contains_eps(&p, eps) {
            Ok(State::Ambiguous(p))
        } else {
            self.descend(h, false, rng)
        }
    }

    /// Solve on the boundary of `h` against the accepted half-spaces, one
    /// dimension down, and lift the answer back.
    ///
    /// `bounded` says whether the objective is known to be bounded over the
    /// accepted half-spaces plus `h`; it picks `Minimum` over `Ambiguous`.
    fn descend<R: Rng>(
        &self,
        h: &HalfSpace,
        bounded: bool,
        rng: &mut R,
    ) -> Result<State, SolverError> {
        let frame = Frame::new(h.plane().clone())?;
        let mut reduced = Vec::with_capacity(self.accepted.len());
        for s in &self.accepted {
            match s.reduce(&frame, &self.cfg) {
                Reduced::Bound(r) => reduced.push(r),
                Reduced::Free => {}
                Reduced::Empty => {
                    tracing::trace!("parallel bound excludes the boundary");
                    return Ok(State::Infeasible);
                }
            }
        }
        tracing::trace!(axis = frame.axis(), reduced = reduced.len(), bounded, "descend");

        let found = if reduced.is_empty() {
            Some(frame.plane().point().clone())
        } else {
            let mut child = Solver::new(reduced, self.direction.reduce(&frame))?.with_cfg(self.cfg);
            child.run_with(rng)?;
            child.result_point().map(|q| frame.lift(q))
        };
        Ok(match found {
            None => State::Infeasible,
            Some(x) if bounded => State::Minimum(x),
            Some(x) => State::Ambiguous(x),
        })
    }

    /// Recession test: is there a direction `d` with `N_i·d <= 0` for every
    /// accepted half-space (and `extra`) and `c·d = -1`? No such ray means the
    /// objective is bounded below (or the region is empty).
    fn objective_bounded<R: Rng>(
        &self,
        extra: Option<&HalfSpace>,
        rng: &mut R,
    ) -> Result<bool, SolverError> {
        if self.direction.is_zero(self.cfg.eps_det) {
            return Ok(true);
        }
        let slice = Plane::new(self.direction.clone(), -self.direction.length())?;
        let frame = Frame::new(slice)?;
        let mut cone = Vec::with_capacity(self.accepted.len() + 1);
        for s in self.accepted.iter().chain(extra) {
            match s.recession().reduce(&frame, &self.cfg) {
                Reduced::Bound(r) => cone.push(r),
                Reduced::Free => {}
                Reduced::Empty => return Ok(true),
            }
        }
        if cone.is_empty() {
            return Ok(false);
        }
        let mut probe = Solver::new(cone, Vector::zeros(self.dim() - 1)?)?.with_cfg(self.cfg);
        Ok(probe.run_with(rng)? == ResultType::Infeasible)
    }

    fn tighten(&mut self, h: &HalfSpace) {
        let bound = h.plane().point().get(0);
        if h.plane().normal().get(0) > 0.0 {
            self.interval.1 = self.interval.1.min(bound);
        } else {
            self.interval.0 = self.interval.0.max(bound);
        }
    }

    /// Dimension 1: pick the end of the running interval the objective points to,
    /// or the finite end when that side is open.
    fn settle_interval(&self) -> State {
        let (lo, hi) = self.interval;
        if lo > hi + self.cfg.eps_feas {
            return State::Infeasible;
        }
        let at = |x: f64| Point::from_dvector(DVector::from_element(1, x));
        let c = self.direction.get(0);
        let (end, fallback) = if c < -self.cfg.eps_det {
            (hi, lo)
        } else {
            (lo, hi)
        };
        // An open objective side settles on the extreme accepted bound.
        State::Minimum(at(if end.is_finite() { end } else { fallback }))
    }
}

/// Build, run and unpack a solver in one call.
pub fn solve<R: Rng>(
    half_spaces: Vec<HalfSpace>,
    direction: Vector,
    cfg: GeomCfg,
    rng: &mut R,
) -> Result<Solution, SolverError> {
    let mut solver = Solver::new(half_spaces, direction)?.with_cfg(cfg);
    solver.run_with(rng)?;
    solver
        .into_solution()
        .ok_or(SolverError::EmptyConstraintSet)
}

#[cfg(test)]
mod tests;
