use crate::types::{Visibilities, VisibilitiesView};

use macro_const::macro_const;
use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Uniform increase of the noise level

Every noise-map value is raised by `noise_scale`:
$$
\sigma_i' = \sigma_i + \mathrm{noise\_scale}.
$$
For visibilities the real and imaginary noise channels are raised independently by the same
amount.
";
}

#[doc = DOC!()]
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HyperBackgroundNoise {
    pub noise_scale: f64,
}

impl HyperBackgroundNoise {
    pub fn new(noise_scale: f64) -> Self {
        Self { noise_scale }
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    pub fn hyper_noise_map_from_noise_map(&self, noise_map: ArrayView1<f64>) -> Array1<f64> {
        noise_map.mapv(|sigma| sigma + self.noise_scale)
    }

    pub fn hyper_noise_map_from_complex_noise_map(&self, noise_map: VisibilitiesView) -> Visibilities {
        noise_map.mapv(|sigma| Complex64::new(sigma.re + self.noise_scale, sigma.im + self.noise_scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn real_noise_map() {
        let hyper = HyperBackgroundNoise::new(1.5);
        assert_eq!(
            hyper.hyper_noise_map_from_noise_map(array![1.0, 2.0].view()),
            array![2.5, 3.5]
        );
    }

    #[test]
    fn complex_noise_map_channels_are_independent() {
        let hyper = HyperBackgroundNoise::new(1.0);
        let noise_map = array![Complex64::new(2.0, 2.0), Complex64::new(1.0, 4.0)];
        assert_eq!(
            hyper.hyper_noise_map_from_complex_noise_map(noise_map.view()),
            array![Complex64::new(3.0, 3.0), Complex64::new(2.0, 5.0)]
        );
    }

    #[test]
    fn zero_scale_is_identity() {
        let noise_map = array![0.3, 0.7];
        assert_eq!(
            HyperBackgroundNoise::default().hyper_noise_map_from_noise_map(noise_map.view()),
            noise_map
        );
    }

    #[test]
    fn deserialize() {
        let hyper: HyperBackgroundNoise = serde_json::from_str(r#"{"noise_scale": 2.0}"#).unwrap();
        assert_eq!(hyper, HyperBackgroundNoise::new(2.0));
    }
}
