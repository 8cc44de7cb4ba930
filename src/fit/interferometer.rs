use crate::data::{Grid2D, Interferometer, Mask2D};
use crate::error::FitError;
use crate::fit::fit_data::FitData;
use crate::fit::settings::SettingsFit;
use crate::fit::{FitTrait, assign_mapped_reconstructions, sum_images};
use crate::galaxy::{Galaxy, GalaxyKind};
use crate::hyper::HyperBackgroundNoise;
use crate::inversion::InversionInterferometer;
use crate::plane::Plane;
use crate::transformer::TransformerTrait;
use crate::types::Visibilities;

use ndarray::Array1;
use num_complex::Complex64;

/// A plane fitted to interferometer visibilities
///
/// The plane is evaluated on the real-space grid and transformed to visibilities. Real and
/// imaginary channels carry independent noise; with hyper scalings enabled both are raised by
/// the hyper background noise.
#[derive(Clone, Debug)]
pub struct FitInterferometer<'a> {
    interferometer: &'a Interferometer,
    plane: &'a Plane,
    profile_visibilities: Visibilities,
    model_images_of_galaxies: Vec<Array1<f64>>,
    inversion: Option<InversionInterferometer>,
    fit: FitData<Complex64>,
}

impl<'a> FitInterferometer<'a> {
    pub fn new(
        interferometer: &'a Interferometer,
        plane: &'a Plane,
        hyper_background_noise: Option<&HyperBackgroundNoise>,
        settings: &SettingsFit,
    ) -> Result<Self, FitError> {
        let noise_map = match hyper_background_noise {
            Some(background) if settings.use_hyper_scalings => {
                background.hyper_noise_map_from_complex_noise_map(interferometer.noise_map().view())
            }
            _ => interferometer.noise_map().clone(),
        };

        let grid = interferometer.grid();
        let transformer = interferometer.transformer();
        let mut model_images_of_galaxies = plane.images_of_galaxies_from_grid(grid)?;
        let profile_image = sum_images(grid.len(), &model_images_of_galaxies);
        FitError::check_len(
            "profile image",
            transformer.total_image_pixels(),
            profile_image.len(),
        )?;
        let profile_visibilities = transformer.visibilities_from_image(profile_image.view());

        let inversion = if plane.has_pixelization() {
            let linear_objects = plane.linear_objects_from_grid(
                grid,
                &interferometer.real_space_mask().border_grid(),
                &settings.settings_pixelization,
            )?;
            let profile_subtracted_visibilities =
                interferometer.visibilities() - &profile_visibilities;
            Some(InversionInterferometer::interferometer(
                profile_subtracted_visibilities.view(),
                noise_map.view(),
                transformer,
                &linear_objects,
                &settings.settings_inversion,
            )?)
        } else {
            None
        };

        let model_visibilities = match &inversion {
            Some(inversion) => {
                assign_mapped_reconstructions(
                    plane.galaxies(),
                    &mut model_images_of_galaxies,
                    inversion,
                );
                &profile_visibilities + inversion.mapped_reconstructed_visibilities()
            }
            None => profile_visibilities.clone(),
        };

        Ok(Self {
            interferometer,
            plane,
            profile_visibilities,
            model_images_of_galaxies,
            inversion,
            fit: FitData::new(
                interferometer.visibilities().clone(),
                noise_map,
                model_visibilities,
            )?,
        })
    }

    #[inline]
    pub fn interferometer(&self) -> &'a Interferometer {
        self.interferometer
    }

    #[inline]
    pub fn plane(&self) -> &'a Plane {
        self.plane
    }

    #[inline]
    pub fn real_space_mask(&self) -> &'a Mask2D {
        self.interferometer.real_space_mask()
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid2D {
        self.interferometer.grid()
    }

    #[inline]
    pub fn visibilities(&self) -> &Visibilities {
        self.fit.data()
    }

    #[inline]
    pub fn model_visibilities(&self) -> &Visibilities {
        self.fit.model_data()
    }

    /// Visibilities of the summed light profiles
    #[inline]
    pub fn profile_visibilities(&self) -> &Visibilities {
        &self.profile_visibilities
    }

    /// Visibilities left for the inversion to reconstruct
    pub fn profile_subtracted_visibilities(&self) -> Visibilities {
        self.visibilities() - &self.profile_visibilities
    }

    /// Real-space model image of every galaxy in plane order
    #[inline]
    pub fn model_images_of_galaxies(&self) -> &[Array1<f64>] {
        &self.model_images_of_galaxies
    }

    /// Every galaxy of the plane with its real-space model image
    pub fn galaxy_model_image_dict(&self) -> Vec<(&'a Galaxy, &Array1<f64>)> {
        self.plane
            .galaxies()
            .iter()
            .zip(self.model_images_of_galaxies.iter())
            .collect()
    }

    /// Every galaxy of the plane with its model visibilities
    ///
    /// Profile galaxies map to the transform of their image, pixelized galaxies to their part
    /// of the inversion and all other galaxies to zeros.
    pub fn galaxy_model_visibilities_dict(&self) -> Vec<(&'a Galaxy, Visibilities)> {
        let transformer = self.interferometer.transformer();
        self.plane
            .galaxies()
            .iter()
            .zip(self.model_images_of_galaxies.iter())
            .map(|(galaxy, image)| {
                let visibilities = match galaxy.kind() {
                    GalaxyKind::Inert => Visibilities::zeros(transformer.total_visibilities()),
                    _ => transformer.visibilities_from_image(image.view()),
                };
                (galaxy, visibilities)
            })
            .collect()
    }
}

impl FitTrait<Complex64> for FitInterferometer<'_> {
    #[inline]
    fn fit_data(&self) -> &FitData<Complex64> {
        &self.fit
    }

    #[inline]
    fn inversion(&self) -> Option<&InversionInterferometer> {
        self.inversion.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::inversion::{Constant, Rectangular, SettingsInversion};
    use crate::tests::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;
    use std::f64::consts::PI;

    fn one_visibility_interferometer(visibility: Complex64, noise: Complex64) -> Interferometer {
        let mask = Mask2D::new(
            array![
                [true, true, true, true],
                [true, false, false, true],
                [true, true, true, true],
            ],
            (1.0, 1.0),
        )
        .unwrap();
        Interferometer::new(array![visibility], array![noise], array![[0.0, 0.0]], mask).unwrap()
    }

    #[test]
    fn worked_example() {
        let interferometer =
            one_visibility_interferometer(Complex64::new(5.0, 4.0), Complex64::new(1.0, 1.0));
        let plane = Plane::new(vec![Galaxy::from_profiles(
            0.5,
            vec![MockLightProfile::arc(1.0)],
            vec![],
        )]);
        let fit = FitInterferometer::new(&interferometer, &plane, None, &SettingsFit::default())
            .unwrap();

        assert_complex_abs_diff_eq(
            fit.model_visibilities().as_slice().unwrap(),
            &[Complex64::new(2.0, 0.0)],
            1e-12,
        );
        assert_complex_abs_diff_eq(
            fit.residual_map().as_slice().unwrap(),
            &[Complex64::new(3.0, 4.0)],
            1e-12,
        );
        assert_complex_abs_diff_eq(
            fit.normalized_residual_map().as_slice().unwrap(),
            &[Complex64::new(3.0, 4.0)],
            1e-12,
        );
        assert_complex_abs_diff_eq(
            fit.chi_squared_map().as_slice().unwrap(),
            &[Complex64::new(9.0, 16.0)],
            1e-12,
        );
        assert_abs_diff_eq!(fit.chi_squared(), 25.0, epsilon = 1e-12);
        assert_relative_eq!(fit.noise_normalization(), 2.0 * (2.0 * PI).ln(), max_relative = 1e-15);
        assert_relative_eq!(
            fit.log_likelihood(),
            -0.5 * (25.0 + 2.0 * (2.0 * PI).ln()),
            max_relative = 1e-12
        );
        assert!(fit.inversion().is_none());
        assert_eq!(fit.figure_of_merit(), fit.log_likelihood());
    }

    #[test]
    fn hyper_background_noise() {
        let mask = Mask2D::new(mask_7x7(), (1.0, 1.0)).unwrap();
        let interferometer = Interferometer::new(
            Array1::from_elem(3, Complex64::new(5.0, 5.0)),
            Array1::from_elem(3, Complex64::new(2.0, 2.0)),
            array![[0.0, 0.0], [1e4, 0.0], [0.0, 1e4]],
            mask,
        )
        .unwrap();
        let plane = Plane::new(vec![Galaxy::inert(0.5)]);
        let background = HyperBackgroundNoise::new(1.0);

        let fit = FitInterferometer::new(
            &interferometer,
            &plane,
            Some(&background),
            &SettingsFit::default(),
        )
        .unwrap();
        assert_eq!(fit.noise_map(), &Array1::from_elem(3, Complex64::new(3.0, 3.0)));
        assert_eq!(fit.visibilities(), &Array1::from_elem(3, Complex64::new(5.0, 5.0)));

        let settings = SettingsFit {
            use_hyper_scalings: false,
            ..Default::default()
        };
        let fit = FitInterferometer::new(&interferometer, &plane, Some(&background), &settings)
            .unwrap();
        assert_eq!(fit.noise_map(), &Array1::from_elem(3, Complex64::new(2.0, 2.0)));
    }

    #[test]
    fn galaxy_dicts() {
        let interferometer = interferometer_7();
        let plane = Plane::new(vec![
            Galaxy::from_profiles(0.5, vec![MockLightProfile::arc(0.5)], vec![]),
            Galaxy::inert(0.5),
            Galaxy::pixelized(
                1.0,
                Rectangular::new((3, 3)).unwrap().into(),
                Constant::new(1.0).into(),
            ),
        ]);
        let fit = FitInterferometer::new(&interferometer, &plane, None, &SettingsFit::default())
            .unwrap();
        let inversion = fit.inversion().unwrap();
        assert_eq!(fit.total_inversions(), 1);
        assert_eq!(fit.figure_of_merit(), fit.log_evidence().unwrap());

        let images = fit.galaxy_model_image_dict();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].1, &Array1::from_elem(9, 0.5));
        assert_eq!(images[1].1, &Array1::<f64>::zeros(9));
        assert_abs_diff_eq!(images[2].1, inversion.mapped_reconstructed_image(), epsilon = 1e-12);

        let visibilities = fit.galaxy_model_visibilities_dict();
        assert_eq!(visibilities.len(), 3);
        assert_eq!(visibilities[1].1, Visibilities::zeros(7));
        assert_complex_abs_diff_eq(
            visibilities[2].1.as_slice().unwrap(),
            inversion.mapped_reconstructed_visibilities().as_slice().unwrap(),
            1e-10,
        );
        let total = visibilities
            .iter()
            .fold(Visibilities::zeros(7), |acc, (_, v)| acc + v);
        assert_complex_abs_diff_eq(
            total.as_slice().unwrap(),
            fit.model_visibilities().as_slice().unwrap(),
            1e-10,
        );
        assert_complex_abs_diff_eq(
            (fit.profile_visibilities() + inversion.mapped_reconstructed_visibilities())
                .as_slice()
                .unwrap(),
            fit.model_visibilities().as_slice().unwrap(),
            1e-12,
        );
    }

    #[test]
    fn solvers_give_same_figure_of_merit() {
        let interferometer = interferometer_7();
        let plane = Plane::new(vec![Galaxy::pixelized(
            1.0,
            Rectangular::new((3, 3)).unwrap().into(),
            Constant::new(1.0).into(),
        )]);
        let matrix = FitInterferometer::new(&interferometer, &plane, None, &SettingsFit::default())
            .unwrap();
        let settings = SettingsFit {
            settings_inversion: SettingsInversion {
                use_linear_operators: true,
                tolerance: 1e-12,
                ..Default::default()
            },
            ..Default::default()
        };
        let iterative = FitInterferometer::new(&interferometer, &plane, None, &settings).unwrap();
        assert_relative_eq!(
            matrix.figure_of_merit(),
            iterative.figure_of_merit(),
            max_relative = 1e-8
        );
        assert_complex_abs_diff_eq(
            matrix.model_visibilities().as_slice().unwrap(),
            iterative.model_visibilities().as_slice().unwrap(),
            1e-6,
        );
    }

    #[test]
    fn profile_subtracted_visibilities() {
        let interferometer =
            one_visibility_interferometer(Complex64::new(5.0, 4.0), Complex64::new(1.0, 1.0));
        let plane = Plane::new(vec![Galaxy::from_profiles(
            0.5,
            vec![MockLightProfile::arc(1.0)],
            vec![],
        )]);
        let fit = FitInterferometer::new(&interferometer, &plane, None, &SettingsFit::default())
            .unwrap();
        assert_complex_abs_diff_eq(
            fit.profile_subtracted_visibilities().as_slice().unwrap(),
            &[Complex64::new(3.0, 4.0)],
            1e-12,
        );
    }
}
