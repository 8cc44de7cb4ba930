//! Scoring interface used by a non-linear search
//!
//! The search draws a [Plane] per sample and asks an [Analysis] for its figure of merit.
//! Numerically degenerate samples are reported as [FitError::is_candidate_rejection] errors,
//! which [figure_of_merit_or_penalty] turns into a very low figure of merit.

use crate::data::{Imaging, Interferometer, Mask2D};
use crate::error::FitError;
use crate::fit::{FitImaging, FitInterferometer, FitTrait, SettingsFit};
use crate::hyper::{HyperBackgroundNoise, HyperImageSky, HyperImages};
use crate::inversion::Pixelization;
use crate::plane::Plane;

use std::borrow::Cow;

/// Figure of merit given to rejected samples
pub const PENALTY_FIGURE_OF_MERIT: f64 = -1e99;

/// Replace a candidate rejection by [PENALTY_FIGURE_OF_MERIT], propagate other errors
pub fn figure_of_merit_or_penalty(result: Result<f64, FitError>) -> Result<f64, FitError> {
    match result {
        Err(error) if error.is_candidate_rejection() => {
            log::warn!("sample rejected: {error}");
            Ok(PENALTY_FIGURE_OF_MERIT)
        }
        result => result,
    }
}

pub trait Analysis {
    /// Hyper images associated with every sample, from a previous search
    fn hyper_images(&self) -> Option<&HyperImages>;

    /// Figure of merit of a plane which already carries its hyper images
    fn figure_of_merit_from_plane(&self, plane: &Plane) -> Result<f64, FitError>;

    /// The plane with hyper images associated, borrowed unchanged without hyper images
    fn associate_hyper_images<'p>(&self, plane: &'p Plane) -> Result<Cow<'p, Plane>, FitError> {
        match self.hyper_images() {
            Some(hyper_images) => Ok(Cow::Owned(plane.with_hyper_images(hyper_images)?)),
            None => Ok(Cow::Borrowed(plane)),
        }
    }

    fn log_likelihood_function(&self, instance: &Plane) -> Result<f64, FitError> {
        let plane = self.associate_hyper_images(instance)?;
        self.figure_of_merit_from_plane(&plane)
    }

    /// [Analysis::log_likelihood_function] with rejected samples penalised
    fn log_likelihood_or_penalty(&self, instance: &Plane) -> Result<f64, FitError> {
        figure_of_merit_or_penalty(self.log_likelihood_function(instance))
    }
}

#[derive(Clone, Debug)]
pub struct AnalysisImaging {
    imaging: Imaging,
    hyper_image_sky: Option<HyperImageSky>,
    hyper_background_noise: Option<HyperBackgroundNoise>,
    hyper_images: Option<HyperImages>,
    settings: SettingsFit,
}

impl AnalysisImaging {
    pub fn new(imaging: Imaging, settings: SettingsFit) -> Self {
        Self {
            imaging,
            hyper_image_sky: None,
            hyper_background_noise: None,
            hyper_images: None,
            settings,
        }
    }

    pub fn with_hyper_image_sky(self, hyper_image_sky: HyperImageSky) -> Self {
        Self {
            hyper_image_sky: Some(hyper_image_sky),
            ..self
        }
    }

    pub fn with_hyper_background_noise(self, hyper_background_noise: HyperBackgroundNoise) -> Self {
        Self {
            hyper_background_noise: Some(hyper_background_noise),
            ..self
        }
    }

    pub fn with_hyper_images(self, hyper_images: HyperImages) -> Result<Self, FitError> {
        FitError::check_len(
            "hyper model image",
            self.imaging.image().len(),
            hyper_images.hyper_model_image().len(),
        )?;
        Ok(Self {
            hyper_images: Some(hyper_images),
            ..self
        })
    }

    #[inline]
    pub fn imaging(&self) -> &Imaging {
        &self.imaging
    }

    #[inline]
    pub fn settings(&self) -> &SettingsFit {
        &self.settings
    }

    pub fn fit_from_plane<'a>(&'a self, plane: &'a Plane) -> Result<FitImaging<'a>, FitError> {
        FitImaging::new(
            &self.imaging,
            plane,
            self.hyper_image_sky.as_ref(),
            self.hyper_background_noise.as_ref(),
            &self.settings,
        )
    }
}

impl Analysis for AnalysisImaging {
    fn hyper_images(&self) -> Option<&HyperImages> {
        self.hyper_images.as_ref()
    }

    fn figure_of_merit_from_plane(&self, plane: &Plane) -> Result<f64, FitError> {
        Ok(self.fit_from_plane(plane)?.figure_of_merit())
    }
}

#[derive(Clone, Debug)]
pub struct AnalysisInterferometer {
    interferometer: Interferometer,
    hyper_background_noise: Option<HyperBackgroundNoise>,
    hyper_images: Option<HyperImages>,
    settings: SettingsFit,
}

impl AnalysisInterferometer {
    pub fn new(interferometer: Interferometer, settings: SettingsFit) -> Self {
        Self {
            interferometer,
            hyper_background_noise: None,
            hyper_images: None,
            settings,
        }
    }

    pub fn with_hyper_background_noise(self, hyper_background_noise: HyperBackgroundNoise) -> Self {
        Self {
            hyper_background_noise: Some(hyper_background_noise),
            ..self
        }
    }

    /// Hyper images are real-space images on the real-space grid
    pub fn with_hyper_images(self, hyper_images: HyperImages) -> Result<Self, FitError> {
        FitError::check_len(
            "hyper model image",
            self.interferometer.grid().len(),
            hyper_images.hyper_model_image().len(),
        )?;
        Ok(Self {
            hyper_images: Some(hyper_images),
            ..self
        })
    }

    #[inline]
    pub fn interferometer(&self) -> &Interferometer {
        &self.interferometer
    }

    #[inline]
    pub fn settings(&self) -> &SettingsFit {
        &self.settings
    }

    pub fn fit_from_plane<'a>(&'a self, plane: &'a Plane) -> Result<FitInterferometer<'a>, FitError> {
        FitInterferometer::new(
            &self.interferometer,
            plane,
            self.hyper_background_noise.as_ref(),
            &self.settings,
        )
    }
}

impl Analysis for AnalysisInterferometer {
    fn hyper_images(&self) -> Option<&HyperImages> {
        self.hyper_images.as_ref()
    }

    fn figure_of_merit_from_plane(&self, plane: &Plane) -> Result<f64, FitError> {
        Ok(self.fit_from_plane(plane)?.figure_of_merit())
    }
}

/// Maximum likelihood sample of a finished search with the analysis that scored it
#[derive(Clone, Debug)]
pub struct AnalysisResult<A: Analysis> {
    analysis: A,
    max_log_likelihood_plane: Plane,
}

impl<A: Analysis> AnalysisResult<A> {
    /// Hyper images of the analysis are associated with the plane
    pub fn new(analysis: A, max_log_likelihood_instance: &Plane) -> Result<Self, FitError> {
        let max_log_likelihood_plane = analysis
            .associate_hyper_images(max_log_likelihood_instance)?
            .into_owned();
        Ok(Self {
            analysis,
            max_log_likelihood_plane,
        })
    }

    #[inline]
    pub fn analysis(&self) -> &A {
        &self.analysis
    }

    #[inline]
    pub fn max_log_likelihood_plane(&self) -> &Plane {
        &self.max_log_likelihood_plane
    }

    /// Pixelization of the first pixelized galaxy
    pub fn pixelization(&self) -> Option<&Pixelization> {
        self.max_log_likelihood_plane
            .pixelized_galaxies()
            .find_map(|galaxy| galaxy.pixelization())
    }
}

impl AnalysisResult<AnalysisImaging> {
    pub fn max_log_likelihood_fit(&self) -> Result<FitImaging<'_>, FitError> {
        self.analysis.fit_from_plane(&self.max_log_likelihood_plane)
    }

    #[inline]
    pub fn mask(&self) -> &Mask2D {
        self.analysis.imaging().mask()
    }
}

impl AnalysisResult<AnalysisInterferometer> {
    pub fn max_log_likelihood_fit(&self) -> Result<FitInterferometer<'_>, FitError> {
        self.analysis.fit_from_plane(&self.max_log_likelihood_plane)
    }

    #[inline]
    pub fn mask(&self) -> &Mask2D {
        self.analysis.interferometer().real_space_mask()
    }
}
