//! Vertex enumeration for the final settle step.

use crate::geom::{GeomCfg, HalfSpace, Plane, Point, Vector};

/// Vertex of `∩ accepted` minimizing `direction·v`, by brute force over all
/// n-subsets of boundary planes (pairs in 2-D).
///
/// Complexity: O(C(m, n) · m). Only reached when the objective is unbounded.
pub(crate) fn best_vertex(
    accepted: &[HalfSpace],
    direction: &Vector,
    cfg: &GeomCfg,
) -> Option<Point> {
    let dim = direction.dim();
    let mut best: Option<(Point, f64)> = None;
    let mut planes: Vec<Plane> = Vec::with_capacity(dim);
    for comb in Combinations::new(accepted.len(), dim) {
        planes.clear();
        planes.extend(comb.iter().map(|&i| accepted[i].plane().clone()));
        let Some(v) = Plane::meet(&planes, cfg) else {
            continue;
        };
        if !accepted.iter().all(|h| h.contains_eps(&v, cfg.eps_feas)) {
            continue;
        }
        let value = direction.eval(&v);
        if best.as_ref().map_or(true, |(_, b)| value < *b) {
            best = Some((v, value));
        }
    }
    best.map(|(v, _)| v)
}

/// k-combinations of `0..n` in lexicographic order.
pub(crate) struct Combinations {
    n: usize,
    idx: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            idx: (0..k).collect(),
            done: k == 0 || k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let out = self.idx.clone();
        let k = self.idx.len();
        match (0..k).rev().find(|&i| self.idx[i] < self.n - k + i) {
            Some(i) => {
                self.idx[i] += 1;
                for j in i + 1..k {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(out)
    }
}
