use crate::data::{GalaxyQuantity, Grid2D};
use crate::error::FitError;
use crate::hyper::HyperGalaxy;
use crate::inversion::{Pixelization, Regularization};
use crate::profiles::{LightProfile, MassProfile};
use crate::transformer::{Transformer, TransformerTrait};
use crate::types::Visibilities;

use ndarray::{Array1, Array2, ArrayView1};
use std::sync::Arc;

/// What a galaxy contributes to a fit, decided once at construction
#[derive(Clone, Debug)]
pub enum GalaxyKind {
    /// Parametric light and mass profiles
    Profile {
        light: Vec<Arc<dyn LightProfile>>,
        mass: Vec<Arc<dyn MassProfile>>,
    },
    /// Light reconstructed by a linear inversion
    Pixelized {
        pixelization: Pixelization,
        regularization: Regularization,
    },
    /// Neither light nor mass
    Inert,
}

/// A galaxy at a redshift, with optional hyper-galaxy noise scaling
///
/// Hyper images are given when the galaxy is instantiated and never change afterwards.
#[derive(Clone, Debug)]
pub struct Galaxy {
    redshift: f64,
    kind: GalaxyKind,
    hyper_galaxy: Option<HyperGalaxy>,
    hyper_model_image: Option<Array1<f64>>,
    hyper_galaxy_image: Option<Array1<f64>>,
}

impl Galaxy {
    fn with_kind(redshift: f64, kind: GalaxyKind) -> Self {
        Self {
            redshift,
            kind,
            hyper_galaxy: None,
            hyper_model_image: None,
            hyper_galaxy_image: None,
        }
    }

    pub fn inert(redshift: f64) -> Self {
        Self::with_kind(redshift, GalaxyKind::Inert)
    }

    /// Galaxy made of profiles, inert if both lists are empty
    pub fn from_profiles(
        redshift: f64,
        light: Vec<Arc<dyn LightProfile>>,
        mass: Vec<Arc<dyn MassProfile>>,
    ) -> Self {
        if light.is_empty() && mass.is_empty() {
            Self::inert(redshift)
        } else {
            Self::with_kind(redshift, GalaxyKind::Profile { light, mass })
        }
    }

    pub fn pixelized(
        redshift: f64,
        pixelization: Pixelization,
        regularization: Regularization,
    ) -> Self {
        Self::with_kind(
            redshift,
            GalaxyKind::Pixelized {
                pixelization,
                regularization,
            },
        )
    }

    pub fn with_hyper_galaxy(self, hyper_galaxy: HyperGalaxy) -> Self {
        Self {
            hyper_galaxy: Some(hyper_galaxy),
            ..self
        }
    }

    pub fn with_hyper_images(
        self,
        hyper_model_image: Array1<f64>,
        hyper_galaxy_image: Array1<f64>,
    ) -> Result<Self, FitError> {
        FitError::check_len(
            "hyper galaxy image",
            hyper_model_image.len(),
            hyper_galaxy_image.len(),
        )?;
        Ok(Self {
            hyper_model_image: Some(hyper_model_image),
            hyper_galaxy_image: Some(hyper_galaxy_image),
            ..self
        })
    }

    #[inline]
    pub fn redshift(&self) -> f64 {
        self.redshift
    }

    #[inline]
    pub fn kind(&self) -> &GalaxyKind {
        &self.kind
    }

    #[inline]
    pub fn hyper_galaxy(&self) -> Option<&HyperGalaxy> {
        self.hyper_galaxy.as_ref()
    }

    #[inline]
    pub fn hyper_model_image(&self) -> Option<&Array1<f64>> {
        self.hyper_model_image.as_ref()
    }

    #[inline]
    pub fn hyper_galaxy_image(&self) -> Option<&Array1<f64>> {
        self.hyper_galaxy_image.as_ref()
    }

    pub fn has_light_profile(&self) -> bool {
        matches!(&self.kind, GalaxyKind::Profile { light, .. } if !light.is_empty())
    }

    pub fn has_mass_profile(&self) -> bool {
        matches!(&self.kind, GalaxyKind::Profile { mass, .. } if !mass.is_empty())
    }

    pub fn has_pixelization(&self) -> bool {
        matches!(self.kind, GalaxyKind::Pixelized { .. })
    }

    pub fn pixelization(&self) -> Option<&Pixelization> {
        match &self.kind {
            GalaxyKind::Pixelized { pixelization, .. } => Some(pixelization),
            _ => None,
        }
    }

    pub fn regularization(&self) -> Option<&Regularization> {
        match &self.kind {
            GalaxyKind::Pixelized { regularization, .. } => Some(regularization),
            _ => None,
        }
    }

    fn light_profiles(&self) -> &[Arc<dyn LightProfile>] {
        match &self.kind {
            GalaxyKind::Profile { light, .. } => light,
            _ => &[],
        }
    }

    fn mass_profiles(&self) -> &[Arc<dyn MassProfile>] {
        match &self.kind {
            GalaxyKind::Profile { mass, .. } => mass,
            _ => &[],
        }
    }

    /// Summed image of all light profiles, zeros without them
    pub fn image_from_grid(&self, grid: &Grid2D) -> Result<Array1<f64>, FitError> {
        sum_profiles(grid, self.light_profiles(), |profile, grid| {
            profile.image_from_grid(grid)
        })
    }

    pub fn convergence_from_grid(&self, grid: &Grid2D) -> Result<Array1<f64>, FitError> {
        sum_profiles(grid, self.mass_profiles(), |profile, grid| {
            profile.convergence_from_grid(grid)
        })
    }

    pub fn potential_from_grid(&self, grid: &Grid2D) -> Result<Array1<f64>, FitError> {
        sum_profiles(grid, self.mass_profiles(), |profile, grid| {
            profile.potential_from_grid(grid)
        })
    }

    /// `(y, x)` deflections, one row per grid point
    pub fn deflections_from_grid(&self, grid: &Grid2D) -> Result<Array2<f64>, FitError> {
        let mut deflections = Array2::zeros((grid.len(), 2));
        for profile in self.mass_profiles() {
            let profile_deflections = profile.deflections_from_grid(grid);
            if profile_deflections.dim() != deflections.dim() {
                return Err(FitError::ShapeMismatch {
                    what: "profile deflections",
                    expected: deflections.len(),
                    actual: profile_deflections.len(),
                });
            }
            deflections += &profile_deflections;
        }
        Ok(deflections)
    }

    pub fn quantity_from_grid(
        &self,
        quantity: GalaxyQuantity,
        grid: &Grid2D,
    ) -> Result<Array1<f64>, FitError> {
        match quantity {
            GalaxyQuantity::Image => self.image_from_grid(grid),
            GalaxyQuantity::Convergence => self.convergence_from_grid(grid),
            GalaxyQuantity::Potential => self.potential_from_grid(grid),
            GalaxyQuantity::DeflectionsY => Ok(self.deflections_from_grid(grid)?.column(0).to_owned()),
            GalaxyQuantity::DeflectionsX => Ok(self.deflections_from_grid(grid)?.column(1).to_owned()),
        }
    }

    pub fn profile_visibilities_from_grid_and_transformer(
        &self,
        grid: &Grid2D,
        transformer: &Transformer,
    ) -> Result<Visibilities, FitError> {
        let image = self.image_from_grid(grid)?;
        FitError::check_len("galaxy image", transformer.total_image_pixels(), image.len())?;
        Ok(transformer.visibilities_from_image(image.view()))
    }

    /// Contribution map of a hyper galaxy, `None` without one
    pub fn contribution_map(&self) -> Result<Option<Array1<f64>>, FitError> {
        let Some(hyper_galaxy) = &self.hyper_galaxy else {
            return Ok(None);
        };
        match (&self.hyper_model_image, &self.hyper_galaxy_image) {
            (Some(model), Some(galaxy)) => hyper_galaxy
                .contribution_map_from_hyper_images(model.view(), galaxy.view())
                .map(Some),
            _ => Err(FitError::InvalidConfiguration(
                "hyper galaxy requires hyper model and galaxy images".into(),
            )),
        }
    }

    /// Extra noise of a hyper galaxy computed from the base noise map, `None` without one
    pub fn hyper_noise_map_from_noise_map(
        &self,
        noise_map: ArrayView1<f64>,
    ) -> Result<Option<Array1<f64>>, FitError> {
        match (&self.hyper_galaxy, self.contribution_map()?) {
            (Some(hyper_galaxy), Some(contribution_map)) => hyper_galaxy
                .hyper_noise_map_from_contribution_map(noise_map, contribution_map.view())
                .map(Some),
            _ => Ok(None),
        }
    }
}

fn sum_profiles<P: ?Sized>(
    grid: &Grid2D,
    profiles: &[Arc<P>],
    evaluate: impl Fn(&P, &Grid2D) -> Array1<f64>,
) -> Result<Array1<f64>, FitError> {
    let mut total = Array1::zeros(grid.len());
    for profile in profiles {
        let values = evaluate(&**profile, grid);
        FitError::check_len("profile values", grid.len(), values.len())?;
        total += &values;
    }
    Ok(total)
}
