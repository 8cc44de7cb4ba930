use crate::transformer::TransformerDft;
use crate::types::{Visibilities, VisibilitiesView};

use enum_dispatch::enum_dispatch;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};
use std::fmt::Debug;

/// Linear map from real-space image pixels to complex visibilities
///
/// Array lengths are not checked, implementations panic on a length different from
/// [TransformerTrait::total_image_pixels] or [TransformerTrait::total_visibilities].
#[enum_dispatch]
pub trait TransformerTrait: Clone + Debug + Send + Sync {
    fn total_visibilities(&self) -> usize;

    fn total_image_pixels(&self) -> usize;

    fn visibilities_from_image(&self, image: ArrayView1<f64>) -> Visibilities;

    /// Adjoint of [TransformerTrait::visibilities_from_image] with visibilities treated as
    /// pairs of real channels
    fn image_from_visibilities(&self, visibilities: VisibilitiesView) -> Array1<f64>;

    /// Real and imaginary parts of every transformed mapping-matrix column
    fn transformed_mapping_matrices(
        &self,
        mapping_matrix: ArrayView2<f64>,
    ) -> (Array2<f64>, Array2<f64>) {
        let shape = (self.total_visibilities(), mapping_matrix.ncols());
        let mut real = Array2::zeros(shape);
        let mut imag = Array2::zeros(shape);
        Zip::from(real.columns_mut())
            .and(imag.columns_mut())
            .and(mapping_matrix.columns())
            .for_each(|mut re, mut im, column| {
                let visibilities = self.visibilities_from_image(column);
                re.assign(&visibilities.mapv(|v| v.re));
                im.assign(&visibilities.mapv(|v| v.im));
            });
        (real, imag)
    }
}

#[enum_dispatch(TransformerTrait)]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Transformer {
    Dft(TransformerDft),
}
