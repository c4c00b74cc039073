//! Positions in R^n.

use nalgebra::DVector;

use super::cfg::GeomCfg;
use super::plane::Frame;
use super::vector::Vector;
use crate::error::GeomError;

/// Point in R^n (n >= 1). Every translation or reduction yields a fresh value.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub(crate) coords: DVector<f64>,
}

impl Point {
    pub fn new(coords: impl Into<Vec<f64>>) -> Result<Self, GeomError> {
        let coords: Vec<f64> = coords.into();
        if coords.is_empty() {
            return Err(GeomError::UnsupportedDimension { op: "point", dim: 0 });
        }
        Ok(Self::from_dvector(DVector::from_vec(coords)))
    }

    #[inline]
    pub(crate) fn from_dvector(coords: DVector<f64>) -> Self {
        Self { coords }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Coordinate `i`, zero beyond the dimension.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        self.coords.get(i).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.coords.as_slice()
    }

    /// `self + v`, keeping the point's dimension.
    pub fn translate(&self, v: &Vector) -> Point {
        Self::from_dvector(DVector::from_fn(self.dim(), |i, _| self.get(i) + v.get(i)))
    }

    /// Slide along the frame's sweep direction onto the frame plane and
    /// return the plane-local (n-1)-dimensional coordinates of the hit.
    ///
    /// `None` when the sweep direction is parallel to the plane.
    pub fn reduce(&self, frame: &Frame, cfg: &GeomCfg) -> Option<Point> {
        let plane = frame.plane();
        let sweep = frame.sweep();
        let rate = plane.normal().dot(&sweep).ok()?;
        if rate.abs() <= cfg.eps_det {
            return None;
        }
        let t = -plane.signed_distance(self) / rate;
        let hit = self.translate(&sweep.scaled(t));
        Some(Self::from_dvector(hit.coords.remove_row(frame.axis())))
    }

    /// Euclidean distance to `other` (zero-padded).
    pub fn distance(&self, other: &Point) -> f64 {
        let n = self.dim().max(other.dim());
        (0..n)
            .map(|i| (self.get(i) - other.get(i)).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}
