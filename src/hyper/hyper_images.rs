use crate::error::FitError;

use ndarray::Array1;

/// Model image of a previous fit and its per-galaxy parts, in plane order
#[derive(Clone, Debug, PartialEq)]
pub struct HyperImages {
    hyper_model_image: Array1<f64>,
    hyper_galaxy_images: Vec<Array1<f64>>,
}

impl HyperImages {
    pub fn new(
        hyper_model_image: Array1<f64>,
        hyper_galaxy_images: Vec<Array1<f64>>,
    ) -> Result<Self, FitError> {
        for image in &hyper_galaxy_images {
            FitError::check_len("hyper galaxy image", hyper_model_image.len(), image.len())?;
        }
        Ok(Self {
            hyper_model_image,
            hyper_galaxy_images,
        })
    }

    /// The model image is the sum of the galaxy images
    pub fn from_galaxy_images(hyper_galaxy_images: Vec<Array1<f64>>) -> Result<Self, FitError> {
        let Some(first) = hyper_galaxy_images.first() else {
            return Err(FitError::InvalidConfiguration(
                "hyper images require at least one galaxy image".into(),
            ));
        };
        let mut hyper_model_image = Array1::zeros(first.len());
        for image in &hyper_galaxy_images {
            FitError::check_len("hyper galaxy image", hyper_model_image.len(), image.len())?;
            hyper_model_image += image;
        }
        Ok(Self {
            hyper_model_image,
            hyper_galaxy_images,
        })
    }

    #[inline]
    pub fn hyper_model_image(&self) -> &Array1<f64> {
        &self.hyper_model_image
    }

    #[inline]
    pub fn hyper_galaxy_images(&self) -> &[Array1<f64>] {
        &self.hyper_galaxy_images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn model_image_is_sum() {
        let hyper_images =
            HyperImages::from_galaxy_images(vec![array![1.0, 2.0], array![0.5, 0.0]]).unwrap();
        assert_eq!(hyper_images.hyper_model_image(), &array![1.5, 2.0]);
        assert_eq!(hyper_images.hyper_galaxy_images().len(), 2);
    }

    #[test]
    fn invalid() {
        assert!(HyperImages::from_galaxy_images(vec![]).is_err());
        assert!(HyperImages::from_galaxy_images(vec![array![1.0], array![1.0, 2.0]]).is_err());
        assert!(HyperImages::new(array![1.0], vec![array![1.0, 2.0]]).is_err());
    }
}
