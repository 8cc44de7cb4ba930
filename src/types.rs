use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;

pub type Visibilities = Array1<Complex64>;
pub type VisibilitiesView<'a> = ArrayView1<'a, Complex64>;

/// arc-second to radian conversion factor
pub const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / 648_000.0;
