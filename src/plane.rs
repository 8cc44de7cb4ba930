use crate::data::Grid2D;
use crate::error::FitError;
use crate::galaxy::Galaxy;
use crate::hyper::HyperImages;
use crate::inversion::{Mapper, PixelizationTrait, Regularization, SettingsPixelization};
use crate::transformer::{Transformer, TransformerTrait};
use crate::types::Visibilities;

use ndarray::{Array1, ArrayView1};

/// Galaxies sharing one redshift, the model evaluated against a dataset
#[derive(Clone, Debug)]
pub struct Plane {
    redshift: Option<f64>,
    galaxies: Vec<Galaxy>,
}

impl Plane {
    /// The plane redshift is the redshift of the first galaxy
    pub fn new(galaxies: Vec<Galaxy>) -> Self {
        Self {
            redshift: galaxies.first().map(Galaxy::redshift),
            galaxies,
        }
    }

    #[inline]
    pub fn redshift(&self) -> Option<f64> {
        self.redshift
    }

    #[inline]
    pub fn galaxies(&self) -> &[Galaxy] {
        &self.galaxies
    }

    pub fn has_light_profile(&self) -> bool {
        self.galaxies.iter().any(Galaxy::has_light_profile)
    }

    pub fn has_pixelization(&self) -> bool {
        self.galaxies.iter().any(Galaxy::has_pixelization)
    }

    pub fn has_hyper_galaxy(&self) -> bool {
        self.galaxies.iter().any(|galaxy| galaxy.hyper_galaxy().is_some())
    }

    pub fn pixelized_galaxies(&self) -> impl Iterator<Item = &Galaxy> {
        self.galaxies.iter().filter(|galaxy| galaxy.has_pixelization())
    }

    /// Profile image of every galaxy in plane order, zeros for galaxies without light
    pub fn images_of_galaxies_from_grid(&self, grid: &Grid2D) -> Result<Vec<Array1<f64>>, FitError> {
        self.galaxies
            .iter()
            .map(|galaxy| galaxy.image_from_grid(grid))
            .collect()
    }

    pub fn profile_image_from_grid(&self, grid: &Grid2D) -> Result<Array1<f64>, FitError> {
        let mut image = Array1::zeros(grid.len());
        for galaxy in &self.galaxies {
            image += &galaxy.image_from_grid(grid)?;
        }
        Ok(image)
    }

    pub fn profile_visibilities_from_grid_and_transformer(
        &self,
        grid: &Grid2D,
        transformer: &Transformer,
    ) -> Result<Visibilities, FitError> {
        let image = self.profile_image_from_grid(grid)?;
        FitError::check_len("plane image", transformer.total_image_pixels(), image.len())?;
        Ok(transformer.visibilities_from_image(image.view()))
    }

    /// One mapper and regularization per pixelized galaxy, in plane order
    pub fn linear_objects_from_grid(
        &self,
        grid: &Grid2D,
        border: &Grid2D,
        settings: &SettingsPixelization,
    ) -> Result<Vec<(Mapper, Regularization)>, FitError> {
        self.galaxies
            .iter()
            .filter_map(|galaxy| Some((galaxy.pixelization()?, galaxy.regularization()?)))
            .map(|(pixelization, regularization)| {
                Ok((
                    pixelization.mapper_from_grid(grid, border, settings)?,
                    regularization.clone(),
                ))
            })
            .collect()
    }

    /// Contribution map of every galaxy, `None` for galaxies without a hyper galaxy
    pub fn contribution_maps(&self) -> Result<Vec<Option<Array1<f64>>>, FitError> {
        self.galaxies.iter().map(Galaxy::contribution_map).collect()
    }

    /// Sum of the hyper-galaxy noise maps computed from the base noise map
    pub fn hyper_noise_map_from_noise_map(
        &self,
        noise_map: ArrayView1<f64>,
    ) -> Result<Array1<f64>, FitError> {
        let mut hyper_noise_map = Array1::zeros(noise_map.len());
        for galaxy in &self.galaxies {
            if let Some(galaxy_noise_map) = galaxy.hyper_noise_map_from_noise_map(noise_map)? {
                hyper_noise_map += &galaxy_noise_map;
            }
        }
        Ok(hyper_noise_map)
    }

    /// Copy of the plane whose galaxies carry the hyper images
    pub fn with_hyper_images(&self, hyper_images: &HyperImages) -> Result<Self, FitError> {
        FitError::check_len(
            "hyper galaxy images",
            self.galaxies.len(),
            hyper_images.hyper_galaxy_images().len(),
        )?;
        let galaxies = self
            .galaxies
            .iter()
            .zip(hyper_images.hyper_galaxy_images())
            .map(|(galaxy, hyper_galaxy_image)| {
                galaxy.clone().with_hyper_images(
                    hyper_images.hyper_model_image().clone(),
                    hyper_galaxy_image.clone(),
                )
            })
            .collect::<Result<_, _>>()?;
        Ok(Self {
            redshift: self.redshift,
            galaxies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Mask2D;
    use crate::hyper::HyperGalaxy;
    use crate::inversion::{Constant, Rectangular, Zeroth};
    use crate::tests::MockLightProfile;

    use approx::assert_abs_diff_eq;
    use galaxy_fit_test_util::mask_7x7;
    use ndarray::array;

    fn mask() -> Mask2D {
        Mask2D::new(mask_7x7(), (1.0, 1.0)).unwrap()
    }

    fn pixelized_galaxy() -> Galaxy {
        Galaxy::pixelized(
            1.0,
            Rectangular::new((3, 3)).unwrap().into(),
            Constant::new(1.0).into(),
        )
    }

    #[test]
    fn profile_image_sums_galaxies() {
        let grid = Grid2D::from_mask(&mask());
        let plane = Plane::new(vec![
            Galaxy::from_profiles(0.5, vec![MockLightProfile::arc(1.0)], vec![]),
            Galaxy::inert(0.5),
            Galaxy::from_profiles(0.5, vec![MockLightProfile::arc(2.0)], vec![]),
            pixelized_galaxy(),
        ]);
        assert_eq!(plane.redshift(), Some(0.5));
        assert!(plane.has_light_profile());
        assert!(plane.has_pixelization());
        assert!(!plane.has_hyper_galaxy());

        let image = plane.profile_image_from_grid(&grid).unwrap();
        assert_eq!(image, Array1::from_elem(9, 3.0));
        let images = plane.images_of_galaxies_from_grid(&grid).unwrap();
        assert_eq!(images.len(), 4);
        assert_eq!(images[1], Array1::<f64>::zeros(9));
        assert_eq!(images[3], Array1::<f64>::zeros(9));
    }

    #[test]
    fn linear_objects_per_pixelized_galaxy() {
        let mask = mask();
        let grid = Grid2D::from_mask(&mask);
        let plane = Plane::new(vec![
            pixelized_galaxy(),
            Galaxy::inert(0.5),
            Galaxy::pixelized(
                1.0,
                Rectangular::new((4, 4)).unwrap().into(),
                Zeroth::new(1.0).into(),
            ),
        ]);
        let linear_objects = plane
            .linear_objects_from_grid(&grid, &mask.border_grid(), &SettingsPixelization::default())
            .unwrap();
        assert_eq!(linear_objects.len(), 2);
        assert_eq!(linear_objects[0].0.pixels(), 9);
        assert_eq!(linear_objects[1].0.pixels(), 16);
        assert_eq!(linear_objects[1].1, Regularization::from(Zeroth::new(1.0)));
        assert_eq!(plane.pixelized_galaxies().count(), 2);
    }

    #[test]
    fn hyper_noise_of_plane() {
        let plane = Plane::new(vec![
            Galaxy::inert(0.5).with_hyper_galaxy(HyperGalaxy::new(0.0, 1.0, 1.0)),
            Galaxy::inert(0.5),
            Galaxy::inert(0.5).with_hyper_galaxy(HyperGalaxy::new(0.0, 2.0, 1.0)),
        ]);
        assert!(plane.has_hyper_galaxy());
        assert!(plane.hyper_noise_map_from_noise_map(array![1.0, 1.0].view()).is_err());

        let hyper_images = HyperImages::new(
            array![2.0, 2.0],
            vec![array![2.0, 1.0], array![0.0, 0.0], array![0.0, 2.0]],
        )
        .unwrap();
        let plane = plane.with_hyper_images(&hyper_images).unwrap();
        let contribution_maps = plane.contribution_maps().unwrap();
        assert_abs_diff_eq!(
            contribution_maps[0].as_ref().unwrap(),
            &array![1.0, 0.5],
            epsilon = 1e-12
        );
        assert!(contribution_maps[1].is_none());
        assert_abs_diff_eq!(
            contribution_maps[2].as_ref().unwrap(),
            &array![0.0, 1.0],
            epsilon = 1e-12
        );
        let noise = plane.hyper_noise_map_from_noise_map(array![1.0, 1.0].view()).unwrap();
        // 1 * [1, 0.5] + 2 * [0, 1]
        assert_abs_diff_eq!(noise, array![1.0, 2.5], epsilon = 1e-12);
    }

    #[test]
    fn hyper_images_must_match_galaxies() {
        let plane = Plane::new(vec![Galaxy::inert(0.5)]);
        let hyper_images = HyperImages::new(array![1.0], vec![array![1.0], array![1.0]]).unwrap();
        assert!(matches!(
            plane.with_hyper_images(&hyper_images),
            Err(FitError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn visibilities_of_profiles() {
        use crate::transformer::TransformerDft;

        let grid = Grid2D::from_mask(&mask());
        let transformer: Transformer = TransformerDft::new(array![[0.0, 0.0]].view(), &grid)
            .unwrap()
            .into();
        let plane = Plane::new(vec![Galaxy::from_profiles(
            0.5,
            vec![MockLightProfile::arc(1.0)],
            vec![],
        )]);
        let visibilities = plane
            .profile_visibilities_from_grid_and_transformer(&grid, &transformer)
            .unwrap();
        assert_abs_diff_eq!(visibilities[0].re, 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(visibilities[0].im, 0.0, epsilon = 1e-12);
    }
}
