//! Fixture arrays shared by galaxy-fit tests and benchmarks
//!
//! Only `ndarray` and `num-complex` values are returned, so the fixtures are usable from the
//! library's own unit tests.

use galaxy_fit::ndarray::{Array1, Array2, array};
use galaxy_fit::num_complex::Complex64;

/// 7x7 native mask, `true` is masked, with the central 3x3 pixels unmasked
pub fn mask_7x7() -> Array2<bool> {
    Array2::from_shape_fn((7, 7), |(row, col)| {
        !((2..5).contains(&row) && (2..5).contains(&col))
    })
}

/// Image of the nine unmasked pixels of [mask_7x7]
pub fn image_7x7() -> Array1<f64> {
    array![1.0, 2.0, 1.0, 2.0, 5.0, 2.0, 1.0, 2.0, 1.0]
}

pub fn noise_map_7x7() -> Array1<f64> {
    Array1::from_elem(9, 2.0)
}

pub fn visibilities_7() -> Array1<Complex64> {
    array![
        Complex64::new(17.0, 0.0),
        Complex64::new(3.0, -1.0),
        Complex64::new(-2.0, 4.0),
        Complex64::new(1.5, 1.5),
        Complex64::new(0.5, -3.0),
        Complex64::new(-1.0, -1.0),
        Complex64::new(2.0, 0.5),
    ]
}

pub fn visibilities_noise_map_7() -> Array1<Complex64> {
    Array1::from_elem(7, Complex64::new(2.0, 2.0))
}

/// `(u, v)` baselines in wavelengths, the first one has zero length
pub fn uv_wavelengths_7x2() -> Array2<f64> {
    array![
        [0.0, 0.0],
        [1.0e4, 0.0],
        [0.0, 1.0e4],
        [2.5e4, -1.5e4],
        [-4.0e4, 3.0e4],
        [6.0e4, 5.5e4],
        [-8.0e4, -2.0e4],
    ]
}
