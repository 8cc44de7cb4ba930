use crate::data::GalaxyData;
use crate::error::FitError;
use crate::fit::FitTrait;
use crate::fit::fit_data::FitData;
use crate::galaxy::Galaxy;
use crate::inversion::Inversion;

use ndarray::Array1;

/// Galaxies fitted directly to a measured galaxy quantity
///
/// The model is the sum of the selected quantity over all galaxies, the figure of merit is the
/// log likelihood.
#[derive(Clone, Debug)]
pub struct FitGalaxy<'a> {
    galaxy_data: &'a GalaxyData,
    galaxies: &'a [Galaxy],
    fit: FitData<f64>,
}

impl<'a> FitGalaxy<'a> {
    pub fn new(galaxy_data: &'a GalaxyData, galaxies: &'a [Galaxy]) -> Result<Self, FitError> {
        let grid = galaxy_data.grid();
        let mut model_data = Array1::zeros(grid.len());
        for galaxy in galaxies {
            model_data += &galaxy.quantity_from_grid(galaxy_data.quantity(), grid)?;
        }
        let fit = FitData::new(
            galaxy_data.data().clone(),
            galaxy_data.noise_map().clone(),
            model_data,
        )?;
        Ok(Self {
            galaxy_data,
            galaxies,
            fit,
        })
    }

    #[inline]
    pub fn galaxy_data(&self) -> &'a GalaxyData {
        self.galaxy_data
    }

    #[inline]
    pub fn galaxies(&self) -> &'a [Galaxy] {
        self.galaxies
    }
}

impl FitTrait<f64> for FitGalaxy<'_> {
    #[inline]
    fn fit_data(&self) -> &FitData<f64> {
        &self.fit
    }

    #[inline]
    fn inversion(&self) -> Option<&Inversion<f64>> {
        None
    }
}
