//! Interfaces to parametric light and mass distributions
//!
//! The crate evaluates profiles as black boxes: anything able to produce its values on a
//! [Grid2D] can take part in a fit.

use crate::data::Grid2D;

use ndarray::{Array1, Array2};
use std::fmt::Debug;

/// Surface brightness distribution
pub trait LightProfile: Debug + Send + Sync {
    /// One intensity per grid point
    fn image_from_grid(&self, grid: &Grid2D) -> Array1<f64>;
}

/// Projected mass distribution
pub trait MassProfile: Debug + Send + Sync {
    /// One convergence value per grid point
    fn convergence_from_grid(&self, grid: &Grid2D) -> Array1<f64>;

    /// One lensing potential value per grid point
    fn potential_from_grid(&self, grid: &Grid2D) -> Array1<f64>;

    /// `(y, x)` deflection angles, one row per grid point
    fn deflections_from_grid(&self, grid: &Grid2D) -> Array2<f64>;
}
