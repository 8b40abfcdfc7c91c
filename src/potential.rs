//! Flux-qubit potential surface.
//!
//! The potential of the flux qubit as a function of the two phase angles
//! `phi_m` and `phi_p`:
//!
//! ```text
//! U = 2 + alpha - 2 cos(phi_p) cos(phi_m) - alpha cos(phi_ext - 2 phi_p)
//! ```
//!
//! sampled over [0, 2π] on both axes for surface and contour plots.

use crate::logging::{self, Source};
use ndarray::{Array1, Array2, Zip};
use serde::Serialize;
use std::f64::consts::PI;

/// Junction asymmetry.
pub const ALPHA: f64 = 0.7;

/// External flux, as a fraction of a flux quantum.
pub const PHI_EXT_FRACTION: f64 = 0.5;

/// External phase, `2π * PHI_EXT_FRACTION` (= π).
pub const PHI_EXT: f64 = 2.0 * PI * PHI_EXT_FRACTION;

/// Samples per axis of the default surface.
pub const GRID_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Potential
// ---------------------------------------------------------------------------

/// Parameters of the potential. `Default` gives `ALPHA` and `PHI_EXT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialParams {
    pub alpha: f64,
    pub phi_ext: f64,
}

impl Default for PotentialParams {
    fn default() -> Self {
        Self { alpha: ALPHA, phi_ext: PHI_EXT }
    }
}

impl PotentialParams {
    pub fn evaluate(&self, phi_m: f64, phi_p: f64) -> f64 {
        2.0 + self.alpha
            - 2.0 * phi_p.cos() * phi_m.cos()
            - self.alpha * (self.phi_ext - 2.0 * phi_p).cos()
    }
}

/// The potential at one point with the fixed `ALPHA` and `PHI_EXT`.
pub fn flux_qubit_potential(phi_m: f64, phi_p: f64) -> f64 {
    PotentialParams::default().evaluate(phi_m, phi_p)
}

/// Elementwise potential over two equal-shaped meshes.
///
/// # Panics
/// If `phi_m` and `phi_p` differ in shape.
pub fn evaluate_mesh(phi_m: &Array2<f64>, phi_p: &Array2<f64>, params: &PotentialParams) -> Array2<f64> {
    Zip::from(phi_m)
        .and(phi_p)
        .map_collect(|&m, &p| params.evaluate(m, p))
}

// ---------------------------------------------------------------------------
// Grid construction
// ---------------------------------------------------------------------------

/// `n` evenly spaced samples from `start` to `stop`, both ends included.
///
/// The last sample is exactly `stop`. `n == 1` yields `[start]`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    if n == 1 {
        return Array1::from_elem(1, start);
    }
    let step = (stop - start) / (n.saturating_sub(1)) as f64;
    Array1::from_shape_fn(n, |i| if i == n - 1 { stop } else { start + step * i as f64 })
}

/// Outer-product broadcast of two axes.
///
/// Both meshes have shape `(y.len(), x.len())` with
/// `X[(i, j)] = x[j]` and `Y[(i, j)] = y[i]`.
pub fn meshgrid(x: &Array1<f64>, y: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (y.len(), x.len());
    let xx = Array2::from_shape_fn(shape, |(_, j)| x[j]);
    let yy = Array2::from_shape_fn(shape, |(i, _)| y[i]);
    (xx, yy)
}

/// Both angle meshes for a `points`×`points` grid over [0, 2π].
pub fn angle_grid(points: usize) -> (Array2<f64>, Array2<f64>) {
    let axis = linspace(0.0, 2.0 * PI, points);
    meshgrid(&axis, &axis)
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// The sampled potential ready for plotting.
///
/// `values[(i, j)]` is the potential at `phi_m = axis[i]`,
/// `phi_p = axis[j]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialSurface {
    pub axis: Array1<f64>,
    pub values: Array2<f64>,
}

impl PotentialSurface {
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Smallest and largest value on the surface, for color scaling.
    /// `None` for an empty surface.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// `{"axis": [...], "values": [[row], ...]}` with rows indexed by `phi_m`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Export {
            axis: Vec<f64>,
            values: Vec<Vec<f64>>,
        }

        let export = Export {
            axis: self.axis.to_vec(),
            values: self.values.rows().into_iter().map(|row| row.to_vec()).collect(),
        };
        serde_json::to_string(&export)
    }
}

/// The default 200×200 surface with the fixed parameters.
pub fn potential_surface() -> PotentialSurface {
    potential_surface_with(GRID_POINTS, &PotentialParams::default())
}

/// Evaluate the potential on the `(X, Y)` mesh, `phi_m = X` and `phi_p = Y`,
/// then transpose.
pub fn potential_surface_with(points: usize, params: &PotentialParams) -> PotentialSurface {
    let axis = linspace(0.0, 2.0 * PI, points);
    let (phi_m, phi_p) = meshgrid(&axis, &axis);
    let values = evaluate_mesh(&phi_m, &phi_p, params).reversed_axes();

    logging::debug(
        Source::Potential,
        None,
        &format!(
            "Evaluated {}x{} potential surface (alpha={}, phi_ext={:.4})",
            points, points, params.alpha, params.phi_ext
        ),
    );

    PotentialSurface { axis, values }
}

/// `potential_surface_with` at the configured resolution.
pub fn potential_surface_from_config(config: &crate::config::Config) -> PotentialSurface {
    potential_surface_with(config.grid_points, &PotentialParams::default())
}
