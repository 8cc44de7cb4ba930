use crate::data::{Grid2D, Imaging, Mask2D};
use crate::error::FitError;
use crate::fit::fit_data::FitData;
use crate::fit::settings::SettingsFit;
use crate::fit::{FitTrait, assign_mapped_reconstructions, sum_images};
use crate::galaxy::Galaxy;
use crate::hyper::{HyperBackgroundNoise, HyperImageSky};
use crate::inversion::InversionImaging;
use crate::plane::Plane;

use ndarray::Array1;

/// A plane fitted to imaging data
///
/// With hyper scalings enabled the image is raised by the hyper sky, and the noise map is the
/// background-scaled noise plus the hyper-galaxy noise of every galaxy, both computed from the
/// dataset noise map.
#[derive(Clone, Debug)]
pub struct FitImaging<'a> {
    imaging: &'a Imaging,
    plane: &'a Plane,
    profile_image: Array1<f64>,
    model_images_of_galaxies: Vec<Array1<f64>>,
    inversion: Option<InversionImaging>,
    fit: FitData<f64>,
}

impl<'a> FitImaging<'a> {
    pub fn new(
        imaging: &'a Imaging,
        plane: &'a Plane,
        hyper_image_sky: Option<&HyperImageSky>,
        hyper_background_noise: Option<&HyperBackgroundNoise>,
        settings: &SettingsFit,
    ) -> Result<Self, FitError> {
        let use_hyper_scalings = settings.use_hyper_scalings;
        let image = match hyper_image_sky {
            Some(sky) if use_hyper_scalings => sky.hyper_image_from_image(imaging.image().view()),
            _ => imaging.image().clone(),
        };
        let mut noise_map = match hyper_background_noise {
            Some(background) if use_hyper_scalings => {
                background.hyper_noise_map_from_noise_map(imaging.noise_map().view())
            }
            _ => imaging.noise_map().clone(),
        };
        if use_hyper_scalings && plane.has_hyper_galaxy() {
            noise_map += &plane.hyper_noise_map_from_noise_map(imaging.noise_map().view())?;
        }

        let mut model_images_of_galaxies = plane.images_of_galaxies_from_grid(imaging.grid())?;
        let profile_image = sum_images(image.len(), &model_images_of_galaxies);

        let inversion = if plane.has_pixelization() {
            let linear_objects = plane.linear_objects_from_grid(
                imaging.grid(),
                &imaging.mask().border_grid(),
                &settings.settings_pixelization,
            )?;
            let profile_subtracted_image = &image - &profile_image;
            Some(InversionImaging::imaging(
                profile_subtracted_image.view(),
                noise_map.view(),
                &linear_objects,
                &settings.settings_inversion,
            )?)
        } else {
            None
        };

        let model_image = match &inversion {
            Some(inversion) => {
                assign_mapped_reconstructions(
                    plane.galaxies(),
                    &mut model_images_of_galaxies,
                    inversion,
                );
                &profile_image + inversion.mapped_reconstructed_image()
            }
            None => profile_image.clone(),
        };

        Ok(Self {
            imaging,
            plane,
            profile_image,
            model_images_of_galaxies,
            inversion,
            fit: FitData::new(image, noise_map, model_image)?,
        })
    }

    #[inline]
    pub fn imaging(&self) -> &'a Imaging {
        self.imaging
    }

    #[inline]
    pub fn plane(&self) -> &'a Plane {
        self.plane
    }

    #[inline]
    pub fn mask(&self) -> &'a Mask2D {
        self.imaging.mask()
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid2D {
        self.imaging.grid()
    }

    /// Fitted image, including the hyper sky
    #[inline]
    pub fn image(&self) -> &Array1<f64> {
        self.fit.data()
    }

    #[inline]
    pub fn model_image(&self) -> &Array1<f64> {
        self.fit.model_data()
    }

    /// Summed image of all light profiles
    #[inline]
    pub fn profile_image(&self) -> &Array1<f64> {
        &self.profile_image
    }

    /// Image left for the inversion to reconstruct
    pub fn profile_subtracted_image(&self) -> Array1<f64> {
        self.image() - &self.profile_image
    }

    /// Model image of every galaxy in plane order
    #[inline]
    pub fn model_images_of_galaxies(&self) -> &[Array1<f64>] {
        &self.model_images_of_galaxies
    }

    /// Every galaxy of the plane with its model image
    ///
    /// Profile galaxies map to their profile image, pixelized galaxies to their part of the
    /// inversion and all other galaxies to zeros.
    pub fn galaxy_model_image_dict(&self) -> Vec<(&'a Galaxy, &Array1<f64>)> {
        self.plane
            .galaxies()
            .iter()
            .zip(self.model_images_of_galaxies.iter())
            .collect()
    }

    /// The image minus the model images of all other galaxies, for every galaxy
    pub fn subtracted_images_of_galaxies(&self) -> Vec<Array1<f64>> {
        let residual_map = self.fit.residual_map();
        self.model_images_of_galaxies
            .iter()
            .map(|image| residual_map + image)
            .collect()
    }
}

impl FitTrait<f64> for FitImaging<'_> {
    #[inline]
    fn fit_data(&self) -> &FitData<f64> {
        &self.fit
    }

    #[inline]
    fn inversion(&self) -> Option<&InversionImaging> {
        self.inversion.as_ref()
    }
}
