//! Tolerance policy shared by the primitives and every solver level.
//!
//! Policy
//! - Half-space normals are stored unit-length, so `eps_feas` is a distance.
//! - `eps_det` decides when a normal, a reduced normal or a reduced
//!   direction counts as zero (parallel planes, flat objectives).

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps_det: f64,
    pub eps_feas: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-10,
            eps_feas: 1e-9,
        }
    }
}
