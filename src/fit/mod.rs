//! Scoring a model against a dataset

mod fit_data;
pub use fit_data::{FitData, FitValue};

pub mod fit_util;

mod galaxy;
pub use galaxy::FitGalaxy;

mod imaging;
pub use imaging::FitImaging;

mod interferometer;
pub use interferometer::FitInterferometer;

mod settings;
pub use settings::SettingsFit;

use crate::inversion::Inversion;

use ndarray::Array1;

/// Statistics shared by every fit
///
/// All quantities derive from [FitTrait::fit_data] and the optional [FitTrait::inversion].
pub trait FitTrait<V: FitValue> {
    fn fit_data(&self) -> &FitData<V>;

    fn inversion(&self) -> Option<&Inversion<V>>;

    fn data(&self) -> &Array1<V> {
        self.fit_data().data()
    }

    fn noise_map(&self) -> &Array1<V> {
        self.fit_data().noise_map()
    }

    fn model_data(&self) -> &Array1<V> {
        self.fit_data().model_data()
    }

    fn residual_map(&self) -> &Array1<V> {
        self.fit_data().residual_map()
    }

    fn normalized_residual_map(&self) -> &Array1<V> {
        self.fit_data().normalized_residual_map()
    }

    fn chi_squared_map(&self) -> &Array1<V> {
        self.fit_data().chi_squared_map()
    }

    fn chi_squared(&self) -> f64 {
        self.fit_data().chi_squared()
    }

    fn noise_normalization(&self) -> f64 {
        self.fit_data().noise_normalization()
    }

    fn log_likelihood(&self) -> f64 {
        self.fit_data().log_likelihood()
    }

    /// `None` without an inversion
    fn log_likelihood_with_regularization(&self) -> Option<f64> {
        let inversion = self.inversion()?;
        Some(fit_util::log_likelihood_with_regularization(
            self.chi_squared(),
            inversion.regularization_term(),
            self.noise_normalization(),
        ))
    }

    /// `None` without an inversion
    fn log_evidence(&self) -> Option<f64> {
        let inversion = self.inversion()?;
        Some(fit_util::log_evidence(
            self.chi_squared(),
            inversion.regularization_term(),
            inversion.log_det_curvature_reg_matrix_term(),
            inversion.log_det_regularization_matrix_term(),
            self.noise_normalization(),
        ))
    }

    /// Log evidence with an inversion, log likelihood otherwise
    fn figure_of_merit(&self) -> f64 {
        self.log_evidence().unwrap_or_else(|| self.log_likelihood())
    }

    fn total_inversions(&self) -> usize {
        usize::from(self.inversion().is_some())
    }
}

/// Replace the (zero) profile images of pixelized galaxies by their part of the inversion
fn assign_mapped_reconstructions<V: FitValue>(
    galaxies: &[crate::galaxy::Galaxy],
    images_of_galaxies: &mut [Array1<f64>],
    inversion: &Inversion<V>,
) {
    let pixelized = galaxies
        .iter()
        .zip(images_of_galaxies.iter_mut())
        .filter(|(galaxy, _)| galaxy.has_pixelization())
        .map(|(_, image)| image);
    for (image, mapped) in pixelized.zip(inversion.mapped_reconstructed_images_of_mappers()) {
        *image = mapped;
    }
}

/// Sum of equally long images, `len` zeros for no images
fn sum_images<'i>(len: usize, images: impl IntoIterator<Item = &'i Array1<f64>>) -> Array1<f64> {
    images
        .into_iter()
        .fold(Array1::zeros(len), |total, image| total + image)
}
