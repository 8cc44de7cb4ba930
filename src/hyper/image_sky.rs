use macro_const::macro_const;
use ndarray::{Array1, ArrayView1};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

macro_const! {
    const DOC: &str = r"
Background sky level missed by the data reduction

The sky level is added to every pixel of an image before it is fitted:
$$
I_i' = I_i + \mathrm{sky\_scale}.
$$
";
}

#[doc = DOC!()]
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HyperImageSky {
    pub sky_scale: f64,
}

impl HyperImageSky {
    pub fn new(sky_scale: f64) -> Self {
        Self { sky_scale }
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    pub fn hyper_image_from_image(&self, image: ArrayView1<f64>) -> Array1<f64> {
        image.mapv(|value| value + self.sky_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn adds_sky() {
        let sky = HyperImageSky::new(-0.5);
        assert_eq!(sky.hyper_image_from_image(array![1.0, 3.0].view()), array![0.5, 2.5]);
    }
}
