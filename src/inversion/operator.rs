use crate::transformer::{Transformer, TransformerTrait};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, concatenate, s};
use num_complex::Complex64;

/// Linear map from an image-plane vector to real data-space values
///
/// Complex data are represented by their real channels followed by their imaginary channels,
/// so every data-space value carries its own noise.
pub trait DataOperator {
    fn image_len(&self) -> usize;

    fn data_len(&self) -> usize;

    fn forward(&self, image: ArrayView1<f64>) -> Array1<f64>;

    fn adjoint(&self, data: ArrayView1<f64>) -> Array1<f64>;

    /// [DataOperator::forward] applied to every column
    fn forward_matrix(&self, matrix: ArrayView2<f64>) -> Array2<f64>;
}

/// Imaging data are the image itself
#[derive(Clone, Copy, Debug)]
pub struct ImageOperator {
    pixels: usize,
}

impl ImageOperator {
    pub fn new(pixels: usize) -> Self {
        Self { pixels }
    }
}

impl DataOperator for ImageOperator {
    fn image_len(&self) -> usize {
        self.pixels
    }

    fn data_len(&self) -> usize {
        self.pixels
    }

    fn forward(&self, image: ArrayView1<f64>) -> Array1<f64> {
        image.to_owned()
    }

    fn adjoint(&self, data: ArrayView1<f64>) -> Array1<f64> {
        data.to_owned()
    }

    fn forward_matrix(&self, matrix: ArrayView2<f64>) -> Array2<f64> {
        matrix.to_owned()
    }
}

/// Visibilities of an image, stacked as `[real..., imaginary...]`
#[derive(Clone, Copy, Debug)]
pub struct VisibilityOperator<'a> {
    transformer: &'a Transformer,
}

impl<'a> VisibilityOperator<'a> {
    pub fn new(transformer: &'a Transformer) -> Self {
        Self { transformer }
    }
}

impl DataOperator for VisibilityOperator<'_> {
    fn image_len(&self) -> usize {
        self.transformer.total_image_pixels()
    }

    fn data_len(&self) -> usize {
        2 * self.transformer.total_visibilities()
    }

    fn forward(&self, image: ArrayView1<f64>) -> Array1<f64> {
        let visibilities = self.transformer.visibilities_from_image(image);
        visibilities
            .iter()
            .map(|v| v.re)
            .chain(visibilities.iter().map(|v| v.im))
            .collect()
    }

    fn adjoint(&self, data: ArrayView1<f64>) -> Array1<f64> {
        let n = self.transformer.total_visibilities();
        let (real, imag) = (data.slice(s![..n]), data.slice(s![n..]));
        let visibilities: Array1<Complex64> = real
            .iter()
            .zip(imag.iter())
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect();
        self.transformer.image_from_visibilities(visibilities.view())
    }

    fn forward_matrix(&self, matrix: ArrayView2<f64>) -> Array2<f64> {
        let (real, imag) = self.transformer.transformed_mapping_matrices(matrix);
        // shapes agree by construction
        concatenate![Axis(0), real, imag]
    }
}
