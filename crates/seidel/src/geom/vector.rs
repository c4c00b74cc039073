//! Free vectors of fixed (runtime) dimension.
//!
//! Coordinates past the dimension read as zero, so vectors of different
//! dimensions combine as if the shorter one were zero-padded. All arithmetic
//! returns new values; nothing mutates in place.

use std::cell::OnceCell;
use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::{DVector, Vector3};

use super::plane::Frame;
use super::point::Point;
use crate::error::GeomError;

/// Free vector in R^n (n >= 1) with a lazily cached Euclidean length.
#[derive(Clone, Debug)]
pub struct Vector {
    pub(crate) coords: DVector<f64>,
    length: OnceCell<f64>,
}

impl Vector {
    pub fn new(coords: impl Into<Vec<f64>>) -> Result<Self, GeomError> {
        let coords: Vec<f64> = coords.into();
        if coords.is_empty() {
            return Err(GeomError::UnsupportedDimension {
                op: "vector",
                dim: 0,
            });
        }
        Ok(Self::from_dvector(DVector::from_vec(coords)))
    }

    pub fn zeros(dim: usize) -> Result<Self, GeomError> {
        Self::new(vec![0.0; dim])
    }

    #[inline]
    pub(crate) fn from_dvector(coords: DVector<f64>) -> Self {
        Self {
            coords,
            length: OnceCell::new(),
        }
    }

    /// `point1 - point0`.
    pub fn from_points(point0: &Point, point1: &Point) -> Result<Self, GeomError> {
        if point0.dim() != point1.dim() {
            return Err(GeomError::DimensionMismatch {
                left: point0.dim(),
                right: point1.dim(),
            });
        }
        Ok(Self::from_dvector(&point1.coords - &point0.coords))
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

    /// Euclidean length, computed on first use.
    pub fn length(&self) -> f64 {
        *self.length.get_or_init(|| self.coords.norm())
    }

    #[inline]
    pub fn is_zero(&self, eps: f64) -> bool {
        self.length() <= eps
    }

    pub fn dot(&self, other: &Vector) -> Result<f64, GeomError> {
        if self.dim() != other.dim() {
            return Err(GeomError::DimensionMismatch {
                left: self.dim(),
                right: other.dim(),
            });
        }
        Ok(self.coords.dot(&other.coords))
    }

    /// Linear functional `self · p` (zero-padded).
    pub fn eval(&self, p: &Point) -> f64 {
        let n = self.dim().max(p.dim());
        (0..n).map(|i| self.get(i) * p.get(i)).sum()
    }

    /// Cross product; 1-D and 2-D inputs are embedded in R^3 with trailing zeros.
    pub fn cross(&self, other: &Vector) -> Result<Vector, GeomError> {
        let dim = self.dim().max(other.dim());
        if dim > 3 {
            return Err(GeomError::UnsupportedDimension {
                op: "cross product",
                dim,
            });
        }
        let a = Vector3::new(self.get(0), self.get(1), self.get(2));
        let b = Vector3::new(other.get(0), other.get(1), other.get(2));
        let c = a.cross(&b);
        Ok(Self::from_dvector(DVector::from_column_slice(c.as_slice())))
    }

    /// All coordinates negated.
    #[inline]
    pub fn flipped(&self) -> Vector {
        -self
    }

    /// Counterclockwise quarter turn in the plane of the first two
    /// coordinates: `(x, y, ..) ↦ (-y, x, ..)`. 1-D vectors are returned as is.
    pub fn rotate90(&self) -> Vector {
        let mut coords = self.coords.clone();
        if coords.len() > 1 {
            coords.swap_rows(0, 1);
            coords[0] = -coords[0];
        }
        Self::from_dvector(coords)
    }

    #[inline]
    pub fn scaled(&self, s: f64) -> Vector {
        Self::from_dvector(&self.coords * s)
    }

    /// Pull the linear functional `x ↦ self·x` back onto `frame`'s plane,
    /// expressed in the frame's (n-1)-dimensional coordinates.
    ///
    /// Along the plane, `self·lift(y) = reduced·y + const`.
    pub fn reduce(&self, frame: &Frame) -> Vector {
        frame.pull_back(self).0
    }

    fn zip_padded(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Vector {
        let n = self.dim().max(other.dim());
        Self::from_dvector(DVector::from_fn(n, |i, _| f(self.get(i), other.get(i))))
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl Add for &Vector {
    type Output = Vector;
    fn add(self, rhs: &Vector) -> Vector {
        self.zip_padded(rhs, |a, b| a + b)
    }
}

impl Sub for &Vector {
    type Output = Vector;
    fn sub(self, rhs: &Vector) -> Vector {
        self.zip_padded(rhs, |a, b| a - b)
    }
}

impl Neg for &Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::from_dvector(-&self.coords)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        -&self
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Vector {
        self.scaled(rhs)
    }
}
