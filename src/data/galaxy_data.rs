use crate::data::grid::Grid2D;
use crate::data::mask::Mask2D;
use crate::error::FitError;

use ndarray::Array1;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Galaxy quantity compared against [GalaxyData]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum GalaxyQuantity {
    Image,
    Convergence,
    Potential,
    DeflectionsY,
    DeflectionsX,
}

impl GalaxyQuantity {
    /// Select the quantity from a set of `use_*` flags, exactly one of which must be set
    pub fn from_flags(
        use_image: bool,
        use_convergence: bool,
        use_potential: bool,
        use_deflections_y: bool,
        use_deflections_x: bool,
    ) -> Result<Self, FitError> {
        let candidates = [
            (use_image, Self::Image),
            (use_convergence, Self::Convergence),
            (use_potential, Self::Potential),
            (use_deflections_y, Self::DeflectionsY),
            (use_deflections_x, Self::DeflectionsX),
        ];
        let mut selected = candidates.iter().filter(|(flag, _)| *flag).map(|&(_, q)| q);
        match (selected.next(), selected.next()) {
            (Some(quantity), None) => Ok(quantity),
            (None, _) => Err(FitError::InvalidConfiguration(
                "galaxy data must use one of image, convergence, potential or deflections".into(),
            )),
            (Some(_), Some(_)) => Err(FitError::InvalidConfiguration(
                "galaxy data can use only one of image, convergence, potential or deflections"
                    .into(),
            )),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Image => "Galaxy Data Image",
            Self::Convergence => "Galaxy Data Convergence",
            Self::Potential => "Galaxy Data Potential",
            Self::DeflectionsY => "Galaxy Data Deflections (y)",
            Self::DeflectionsX => "Galaxy Data Deflections (x)",
        }
    }
}

/// A galaxy quantity measured on masked pixels, with its noise
#[derive(Clone, Debug)]
pub struct GalaxyData {
    data: Array1<f64>,
    noise_map: Array1<f64>,
    mask: Mask2D,
    grid: Grid2D,
    quantity: GalaxyQuantity,
}

impl GalaxyData {
    pub fn new(
        data: Array1<f64>,
        noise_map: Array1<f64>,
        mask: Mask2D,
        quantity: GalaxyQuantity,
    ) -> Result<Self, FitError> {
        let pixels = mask.pixels_in_mask();
        FitError::check_len("galaxy data", pixels, data.len())?;
        FitError::check_len("galaxy data noise map", pixels, noise_map.len())?;
        let grid = Grid2D::from_mask(&mask);
        Ok(Self {
            data,
            noise_map,
            mask,
            grid,
            quantity,
        })
    }

    #[inline]
    pub fn data(&self) -> &Array1<f64> {
        &self.data
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

    #[inline]
    pub fn quantity(&self) -> GalaxyQuantity {
        self.quantity
    }
}
