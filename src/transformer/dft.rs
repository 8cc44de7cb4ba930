use crate::data::Grid2D;
use crate::error::FitError;
use crate::transformer::TransformerTrait;
use crate::types::{Visibilities, VisibilitiesView};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Direct Fourier transform with preloaded phase tables
///
/// For visibility $j$ and image pixel $i$ the phase is
/// $\phi_{ji} = -2\pi (x_i u_j + y_i v_j)$ with the grid in radians, and the visibility is
/// $V_j = \sum_i I_i (\cos\phi_{ji} + i \sin\phi_{ji})$.
#[derive(Clone, Debug)]
pub struct TransformerDft {
    cos_phases: Array2<f64>,
    sin_phases: Array2<f64>,
}

impl TransformerDft {
    /// `uv_wavelengths` rows are `(u, v)` baselines in wavelengths
    pub fn new(uv_wavelengths: ArrayView2<f64>, grid: &Grid2D) -> Result<Self, FitError> {
        FitError::check_len("uv-wavelength pair", 2, uv_wavelengths.ncols())?;
        let grid_radians = grid.in_radians();
        let phases = Array2::from_shape_fn((uv_wavelengths.nrows(), grid.len()), |(j, i)| {
            -2.0 * PI
                * (grid_radians[[i, 1]] * uv_wavelengths[[j, 0]]
                    + grid_radians[[i, 0]] * uv_wavelengths[[j, 1]])
        });
        Ok(Self {
            cos_phases: phases.mapv(f64::cos),
            sin_phases: phases.mapv(f64::sin),
        })
    }
}

impl TransformerTrait for TransformerDft {
    #[inline]
    fn total_visibilities(&self) -> usize {
        self.cos_phases.nrows()
    }

    #[inline]
    fn total_image_pixels(&self) -> usize {
        self.cos_phases.ncols()
    }

    fn visibilities_from_image(&self, image: ArrayView1<f64>) -> Visibilities {
        let real = self.cos_phases.dot(&image);
        let imag = self.sin_phases.dot(&image);
        Zip::from(&real)
            .and(&imag)
            .map_collect(|&re, &im| Complex64::new(re, im))
    }

    fn image_from_visibilities(&self, visibilities: VisibilitiesView) -> Array1<f64> {
        let real = visibilities.mapv(|v| v.re);
        let imag = visibilities.mapv(|v| v.im);
        self.cos_phases.t().dot(&real) + self.sin_phases.t().dot(&imag)
    }

    fn transformed_mapping_matrices(
        &self,
        mapping_matrix: ArrayView2<f64>,
    ) -> (Array2<f64>, Array2<f64>) {
        (
            self.cos_phases.dot(&mapping_matrix),
            self.sin_phases.dot(&mapping_matrix),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use galaxy_fit_test_util::uv_wavelengths_7x2;
    use ndarray::array;
    use rand::prelude::*;
    use rand_distr::StandardNormal;

    fn grid_3() -> Grid2D {
        Grid2D::new(array![[0.1, 0.2], [-0.3, 0.5], [1.0, -1.0]]).unwrap()
    }

    #[test]
    fn zero_baseline_sums_image() {
        let grid = grid_3();
        let transformer = TransformerDft::new(array![[0.0, 0.0]].view(), &grid).unwrap();
        let visibilities = transformer.visibilities_from_image(array![1.0, 2.0, 3.0].view());
        assert_abs_diff_eq!(visibilities[0].re, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(visibilities[0].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn point_at_origin_has_flat_visibilities() {
        let grid = Grid2D::new(array![[0.0, 0.0]]).unwrap();
        let transformer = TransformerDft::new(uv_wavelengths_7x2().view(), &grid).unwrap();
        let visibilities = transformer.visibilities_from_image(array![2.5].view());
        for v in visibilities.iter() {
            assert_abs_diff_eq!(v.re, 2.5, epsilon = 1e-12);
            assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_phase() {
        // x = 1 arcsec, u chosen to give a quarter turn
        let grid = Grid2D::new(array![[0.0, 1.0]]).unwrap();
        let u = 0.25 / crate::types::ARCSEC_TO_RAD;
        let transformer = TransformerDft::new(array![[u, 0.0]].view(), &grid).unwrap();
        let visibilities = transformer.visibilities_from_image(array![1.0].view());
        assert_abs_diff_eq!(visibilities[0].re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(visibilities[0].im, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn adjoint_identity() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = grid_3();
        let transformer = TransformerDft::new(uv_wavelengths_7x2().view(), &grid).unwrap();

        let image: Array1<f64> = (0..3).map(|_| rng.sample(StandardNormal)).collect();
        let visibilities: Visibilities = (0..7)
            .map(|_| Complex64::new(rng.sample(StandardNormal), rng.sample(StandardNormal)))
            .collect();

        let forward = transformer.visibilities_from_image(image.view());
        let lhs: f64 = forward
            .iter()
            .zip(visibilities.iter())
            .map(|(f, v)| f.re * v.re + f.im * v.im)
            .sum();
        let rhs = image.dot(&transformer.image_from_visibilities(visibilities.view()));
        assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-9);
    }

    #[test]
    fn mapping_matrix_transform_matches_columns() {
        let grid = grid_3();
        let transformer: crate::transformer::Transformer =
            TransformerDft::new(uv_wavelengths_7x2().view(), &grid)
                .unwrap()
                .into();
        let mapping_matrix = array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.5]];
        let (real, imag) = transformer.transformed_mapping_matrices(mapping_matrix.view());
        for (k, column) in mapping_matrix.columns().into_iter().enumerate() {
            let visibilities = transformer.visibilities_from_image(column);
            assert_abs_diff_eq!(real.column(k), visibilities.mapv(|v| v.re), epsilon = 1e-12);
            assert_abs_diff_eq!(imag.column(k), visibilities.mapv(|v| v.im), epsilon = 1e-12);
        }
    }
}
