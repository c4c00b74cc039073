//! Oriented hyperplanes and the reduction frame built on them.
//!
//! A `Plane` is `{x : N·x = D}` with `N` stored unit-length and a
//! representative point `P = D·N`. Results that would be a "non-existent"
//! plane (parallel inputs) are `None`.
//!
//! A `Frame` fixes how a plane is charted as R^(n-1): the coordinate with
//! the largest normal component is eliminated (the sweep axis) and the
//! remaining coordinates are kept in order. Reducing points, vectors,
//! planes and half-spaces all go through the same frame, and `Frame::lift`
//! inverts the chart.

use nalgebra::DVector;

use super::cfg::GeomCfg;
use super::point::Point;
use super::vector::Vector;
use crate::error::GeomError;

/// Oriented hyperplane `N·x = D` in R^n.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    normal: Vector,
    offset: f64,
    point: Point,
}

/// Result of intersecting two hyperplanes.
#[derive(Clone, Debug, PartialEq)]
pub enum Intersection {
    /// n >= 2: the common (n-2)-flat, written as a hyperplane in the first
    /// plane's frame coordinates.
    Plane(Plane),
    /// n = 1: both "planes" are the same point.
    Point(Point),
}

impl Plane {
    /// Plane `normal·x = offset`; the pair is rescaled so the normal has unit length.
    pub fn new(normal: Vector, offset: f64) -> Result<Self, GeomError> {
        let len = normal.length();
        if !len.is_finite() || len <= 0.0 || !offset.is_finite() {
            return Err(GeomError::DegenerateNormal);
        }
        let normal = normal.scaled(1.0 / len);
        let offset = offset / len;
        let point = Point::from_dvector(&normal.coords * offset);
        Ok(Self {
            normal,
            offset,
            point,
        })
    }

    #[inline]
    pub fn normal(&self) -> &Vector {
        &self.normal
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Representative point on the plane (closest to the origin).
    #[inline]
    pub fn point(&self) -> &Point {
        &self.point
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.normal.dim()
    }

    /// `N·p - D`; positive on the side the normal points to.
    #[inline]
    pub fn signed_distance(&self, p: &Point) -> f64 {
        self.normal.eval(p) - self.offset
    }

    /// Parallel plane through the origin.
    pub(crate) fn through_origin(&self) -> Plane {
        Plane {
            normal: self.normal.clone(),
            offset: 0.0,
            point: Point::from_dvector(DVector::zeros(self.dim())),
        }
    }

    /// Intersect with another plane of the same dimension.
    ///
    /// - n = 1: `Point` when both describe the same point, else `None`.
    /// - n >= 2: the other plane reduced into this plane's frame, `None` if parallel.
    pub fn intersect(
        &self,
        other: &Plane,
        cfg: &GeomCfg,
    ) -> Result<Option<Intersection>, GeomError> {
        if self.dim() != other.dim() {
            return Err(GeomError::DimensionMismatch {
                left: self.dim(),
                right: other.dim(),
            });
        }
        if self.dim() == 1 {
            let gap = self.point.get(0) - other.point.get(0);
            let same = gap.abs() <= cfg.eps_feas;
            return Ok(same.then(|| Intersection::Point(self.point.clone())));
        }
        let frame = Frame::new(self.clone())?;
        Ok(other.reduce(&frame, cfg).map(Intersection::Plane))
    }

    /// Express this plane's trace on the frame plane in frame coordinates.
    ///
    /// `None` when this plane is parallel to the frame plane.
    pub fn reduce(&self, frame: &Frame, cfg: &GeomCfg) -> Option<Plane> {
        debug_assert_eq!(self.dim(), frame.dim());
        let (normal, ratio) = frame.pull_back(&self.normal);
        if normal.is_zero(cfg.eps_det) {
            return None;
        }
        Plane::new(normal, self.offset - ratio * frame.plane.offset).ok()
    }

    /// Common point of exactly `n` planes in R^n, `None` if they are not in
    /// general position.
    pub fn meet(planes: &[Plane], cfg: &GeomCfg) -> Option<Point> {
        let (first, rest) = planes.split_first()?;
        if planes.len() != first.dim() {
            return None;
        }
        if rest.is_empty() {
            return Some(first.point.clone());
        }
        let mut reduced = Vec::with_capacity(rest.len());
        for p in rest {
            match first.intersect(p, cfg).ok().flatten()? {
                Intersection::Plane(q) => reduced.push(q),
                Intersection::Point(_) => return None,
            }
        }
        let q = Plane::meet(&reduced, cfg)?;
        let frame = Frame::new(first.clone()).ok()?;
        Some(frame.lift(&q))
    }
}

/// Reduction frame: a plane plus the coordinate axis swept onto it.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    plane: Plane,
    axis: usize,
}

impl Frame {
    /// Frame on `plane`, sweeping along the axis of its largest normal component.
    pub fn new(plane: Plane) -> Result<Self, GeomError> {
        if plane.dim() < 2 {
            return Err(GeomError::UnsupportedDimension {
                op: "dimension reduction",
                dim: plane.dim(),
            });
        }
        let axis = plane.normal.coords.iamax();
        Ok(Self { plane, axis })
    }

    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Eliminated coordinate.
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.plane.dim()
    }

    /// Unit vector along the eliminated axis.
    pub fn sweep(&self) -> Vector {
        let axis = self.axis;
        Vector::from_dvector(DVector::from_fn(self.dim(), |i, _| {
            if i == axis {
                1.0
            } else {
                0.0
            }
        }))
    }

    /// Substitute `x_k` from the plane equation into `v·x`.
    ///
    /// Returns the (n-1)-dimensional coefficients and `r = v_k / N_k`, so that
    /// `v·x = reduced·y + r·D` for every `x` on the plane with frame coordinates `y`.
    pub(crate) fn pull_back(&self, v: &Vector) -> (Vector, f64) {
        let n = &self.plane.normal.coords;
        let ratio = v.get(self.axis) / n[self.axis];
        let full = DVector::from_fn(self.dim(), |i, _| v.get(i) - ratio * n[i]);
        (Vector::from_dvector(full.remove_row(self.axis)), ratio)
    }

    /// Inverse chart: re-insert the eliminated coordinate so the result lies on the plane.
    pub fn lift(&self, q: &Point) -> Point {
        debug_assert_eq!(q.dim() + 1, self.dim());
        let mut coords = q.coords.clone().insert_row(self.axis, 0.0);
        let n = &self.plane.normal.coords;
        coords[self.axis] = (self.plane.offset - n.dot(&coords)) / n[self.axis];
        Point::from_dvector(coords)
    }
}
