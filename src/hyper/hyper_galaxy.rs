use crate::error::FitError;

use macro_const::macro_const;
use ndarray::{Array1, ArrayView1, Zip};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Per-galaxy noise scaling driven by the galaxy's share of the model image

The contribution map of a galaxy is its hyper image divided by the hyper model image of the
whole plane, normalised to unit maximum:
$$
C_i = \frac{G_i / (M_i + \omega_1)}{\max_j G_j / (M_j + \omega_1)},
$$
and the extra noise is
$$
\sigma_{\mathrm{hyper}, i} = \omega_2 (\sigma_i C_i)^{\omega_3},
$$
where $\omega_1$ is `contribution_factor`, $\omega_2$ is `noise_factor` and $\omega_3$ is
`noise_power`.
";
}

#[doc = DOC!()]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct HyperGalaxy {
    pub contribution_factor: f64,
    pub noise_factor: f64,
    pub noise_power: f64,
}

impl HyperGalaxy {
    pub fn new(contribution_factor: f64, noise_factor: f64, noise_power: f64) -> Self {
        Self {
            contribution_factor,
            noise_factor,
            noise_power,
        }
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    pub fn contribution_map_from_hyper_images(
        &self,
        hyper_model_image: ArrayView1<f64>,
        hyper_galaxy_image: ArrayView1<f64>,
    ) -> Result<Array1<f64>, FitError> {
        FitError::check_len(
            "hyper galaxy image",
            hyper_model_image.len(),
            hyper_galaxy_image.len(),
        )?;
        let contribution_map = Zip::from(&hyper_galaxy_image)
            .and(&hyper_model_image)
            .map_collect(|&galaxy, &model| galaxy / (model + self.contribution_factor));
        let maximum = contribution_map.fold(f64::NEG_INFINITY, |acc, &c| acc.max(c));
        if maximum.is_finite() && maximum > 0.0 {
            Ok(contribution_map / maximum)
        } else {
            Ok(contribution_map)
        }
    }

    pub fn hyper_noise_map_from_contribution_map(
        &self,
        noise_map: ArrayView1<f64>,
        contribution_map: ArrayView1<f64>,
    ) -> Result<Array1<f64>, FitError> {
        FitError::check_len("contribution map", noise_map.len(), contribution_map.len())?;
        Ok(Zip::from(&noise_map)
            .and(&contribution_map)
            .map_collect(|&sigma, &c| self.noise_factor * (sigma * c).powf(self.noise_power)))
    }
}

impl Default for HyperGalaxy {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}
