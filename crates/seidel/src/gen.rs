//! Seeded random LP instances (benchmarks, property tests, `cli gen`).
//!
//! Model
//! - `count` half-spaces with uniformly random unit normals, each tangent to a
//!   sphere of radius `1 ± radius_jitter` around the origin, so the origin is
//!   always strictly feasible.
//! - An axis box `|x_i| <= box_half_width` keeps every instance bounded.
//! - The objective direction is a random unit vector.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GeomError;
use crate::geom::{HalfSpace, Vector};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Generator configuration.
#[derive(Clone, Copy, Debug)]
pub struct GenCfg {
    pub dim: usize,
    /// Random half-spaces, not counting the `2·dim` box sides.
    pub count: usize,
    /// Tangent radius is `1 + u`, `u ∈ [-radius_jitter, radius_jitter]`. Clamped to [0, 0.9].
    pub radius_jitter: f64,
    pub box_half_width: f64,
}

impl Default for GenCfg {
    fn default() -> Self {
        Self {
            dim: 2,
            count: 16,
            radius_jitter: 0.5,
            box_half_width: 4.0,
        }
    }
}

/// A constraint set with its objective direction.
#[derive(Clone, Debug)]
pub struct Problem {
    pub half_spaces: Vec<HalfSpace>,
    pub direction: Vector,
}

/// Draw a feasible, bounded instance.
pub fn random_bounded_problem(cfg: GenCfg, tok: ReplayToken) -> Result<Problem, GeomError> {
    let mut rng = tok.to_std_rng();
    let dim = cfg.dim;
    let jitter = cfg.radius_jitter.clamp(0.0, 0.9);
    let mut half_spaces = Vec::with_capacity(cfg.count + 2 * dim);
    for _ in 0..cfg.count {
        let normal = random_unit(&mut rng, dim)?;
        let radius = 1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * jitter;
        half_spaces.push(HalfSpace::new(normal, radius)?);
    }
    let w = cfg.box_half_width.max(1.0);
    for axis in 0..dim {
        let mut e = vec![0.0; dim];
        e[axis] = 1.0;
        let e = Vector::new(e)?;
        half_spaces.push(HalfSpace::new(-&e, w)?);
        half_spaces.push(HalfSpace::new(e, w)?);
    }
    let direction = random_unit(&mut rng, dim)?;
    Ok(Problem {
        half_spaces,
        direction,
    })
}

/// Uniform direction on the unit sphere (rejection from the cube).
fn random_unit<R: Rng>(rng: &mut R, dim: usize) -> Result<Vector, GeomError> {
    if dim == 0 {
        return Vector::new(Vec::new());
    }
    loop {
        let v: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 1e-3 && norm <= 1.0 {
            return Vector::new(v.into_iter().map(|x| x / norm).collect::<Vec<_>>());
        }
    }
}
