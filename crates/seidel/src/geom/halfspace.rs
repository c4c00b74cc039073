//! Closed half-spaces `N·x <= D` bound to a `Plane`.

use super::cfg::GeomCfg;
use super::plane::{Frame, Plane};
use super::point::Point;
use super::vector::Vector;
use crate::error::GeomError;

/// Closed half-space `N·x <= D`; the feasible side is opposite the normal.
///
/// Invariants:
/// - `N` is unit length (inherited from `Plane`), so containment slack is a distance.
/// - Boundary points are contained.
#[derive(Clone, Debug, PartialEq)]
pub struct HalfSpace {
    plane: Plane,
}

/// A half-space restricted to a frame plane.
#[derive(Clone, Debug, PartialEq)]
pub enum Reduced {
    /// Proper (n-1)-dimensional bound in frame coordinates.
    Bound(HalfSpace),
    /// Boundary parallel to the frame and the whole frame plane is inside: no constraint.
    Free,
    /// Boundary parallel to the frame and the whole frame plane is outside.
    Empty,
}

impl HalfSpace {
    /// `normal·x <= offset`.
    pub fn new(normal: Vector, offset: f64) -> Result<Self, GeomError> {
        Ok(Self::from_plane(Plane::new(normal, offset)?))
    }

    #[inline]
    pub fn from_plane(plane: Plane) -> Self {
        Self { plane }
    }

    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.plane.dim()
    }

    /// Containment with the default slack.
    #[inline]
    pub fn contains(&self, p: &Point) -> bool {
        self.contains_eps(p, GeomCfg::default().eps_feas)
    }

    #[inline]
    pub fn contains_eps(&self, p: &Point, eps: f64) -> bool {
        self.plane.signed_distance(p) <= eps
    }

    /// Same normal through the origin: `N·d <= 0`, the directions along
    /// which the half-space is unbounded.
    pub fn recession(&self) -> HalfSpace {
        HalfSpace {
            plane: self.plane.through_origin(),
        }
    }

    /// Restrict to `frame`'s plane.
    pub fn reduce(&self, frame: &Frame, cfg: &GeomCfg) -> Reduced {
        match self.plane.reduce(frame, cfg) {
            Some(plane) => Reduced::Bound(HalfSpace { plane }),
            None if self.contains_eps(frame.plane().point(), cfg.eps_feas) => Reduced::Free,
            None => Reduced::Empty,
        }
    }
}
