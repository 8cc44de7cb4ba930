use crate::data::grid::Grid2D;
use crate::data::mask::Mask2D;
use crate::error::FitError;
use crate::transformer::{Transformer, TransformerDft};
use crate::types::Visibilities;

use ndarray::Array2;

/// Interferometer dataset: complex visibilities, their noise and the real-space geometry
///
/// Real and imaginary parts of `noise_map` are the independent noise levels of the two
/// channels of every visibility.
#[derive(Clone, Debug)]
pub struct Interferometer {
    visibilities: Visibilities,
    noise_map: Visibilities,
    uv_wavelengths: Array2<f64>,
    real_space_mask: Mask2D,
    grid: Grid2D,
    transformer: Transformer,
}

impl Interferometer {
    pub fn new(
        visibilities: Visibilities,
        noise_map: Visibilities,
        uv_wavelengths: Array2<f64>,
        real_space_mask: Mask2D,
    ) -> Result<Self, FitError> {
        FitError::check_len("visibility noise map", visibilities.len(), noise_map.len())?;
        FitError::check_len("uv-wavelengths", visibilities.len(), uv_wavelengths.nrows())?;
        let grid = Grid2D::from_mask(&real_space_mask);
        let transformer = TransformerDft::new(uv_wavelengths.view(), &grid)?.into();
        Ok(Self {
            visibilities,
            noise_map,
            uv_wavelengths,
            real_space_mask,
            grid,
            transformer,
        })
    }

    #[inline]
    pub fn visibilities(&self) -> &Visibilities {
        &self.visibilities
    }

    #[inline]
    pub fn noise_map(&self) -> &Visibilities {
        &self.noise_map
    }

    #[inline]
    pub fn uv_wavelengths(&self) -> &Array2<f64> {
        &self.uv_wavelengths
    }

    #[inline]
    pub fn real_space_mask(&self) -> &Mask2D {
        &self.real_space_mask
    }

    #[inline]
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    #[inline]
    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformer::TransformerTrait;

    use galaxy_fit_test_util::{
        mask_7x7, uv_wavelengths_7x2, visibilities_7, visibilities_noise_map_7,
    };
    use ndarray::Array1;
    use num_complex::Complex64;

    #[test]
    fn builds_transformer_on_real_space_grid() {
        let mask = Mask2D::new(mask_7x7(), (1.0, 1.0)).unwrap();
        let interferometer = Interferometer::new(
            visibilities_7(),
            visibilities_noise_map_7(),
            uv_wavelengths_7x2(),
            mask,
        )
        .unwrap();
        assert_eq!(interferometer.grid().len(), 9);
        assert_eq!(interferometer.transformer().total_visibilities(), 7);
        assert_eq!(interferometer.transformer().total_image_pixels(), 9);
    }

    #[test]
    fn lengths_are_checked() {
        let mask = Mask2D::new(mask_7x7(), (1.0, 1.0)).unwrap();
        let noise = Array1::from_elem(6, Complex64::new(1.0, 1.0));
        assert!(matches!(
            Interferometer::new(visibilities_7(), noise, uv_wavelengths_7x2(), mask.clone()),
            Err(FitError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            Interferometer::new(
                visibilities_7(),
                visibilities_noise_map_7(),
                Array2::zeros((7, 3)),
                mask
            ),
            Err(FitError::ShapeMismatch { .. })
        ));
    }
}
