use crate::data::grid::Grid2D;
use crate::data::mask::Mask2D;
use crate::error::FitError;

use ndarray::{Array1, ArrayView2};

/// Masked imaging dataset: image and noise map of the unmasked pixels
#[derive(Clone, Debug)]
pub struct Imaging {
    image: Array1<f64>,
    noise_map: Array1<f64>,
    mask: Mask2D,
    grid: Grid2D,
}

impl Imaging {
    /// `image` and `noise_map` are slim arrays, one value per unmasked pixel
    pub fn new(image: Array1<f64>, noise_map: Array1<f64>, mask: Mask2D) -> Result<Self, FitError> {
        let pixels = mask.pixels_in_mask();
        FitError::check_len("image", pixels, image.len())?;
        FitError::check_len("noise map", pixels, noise_map.len())?;
        let grid = Grid2D::from_mask(&mask);
        Ok(Self {
            image,
            noise_map,
            mask,
            grid,
        })
    }

    pub fn from_native(
        image: ArrayView2<f64>,
        noise_map: ArrayView2<f64>,
        mask: Mask2D,
    ) -> Result<Self, FitError> {
        let image = mask.slim_from_native(image)?;
        let noise_map = mask.slim_from_native(noise_map)?;
        Self::new(image, noise_map, mask)
    }

    #[inline]
    pub fn image(&self) -> &Array1<f64> {
        &self.image
    }

    #[inline]
    pub fn noise_map(&self) -> &Array1<f64> {
        &self.noise_map
    }

    #[inline]
    pub fn mask(&self) -> &Mask2D {
        &self.mask
    }

    #[inline]
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }
}
