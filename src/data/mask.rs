use crate::data::grid::Grid2D;
use crate::error::FitError;

use itertools::iproduct;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Native 2-D mask, `true` marks a pixel excluded from the fit
///
/// Masked quantities are stored "slim": a 1-D array of the unmasked pixels in row-major order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "MaskParameters", into = "MaskParameters")]
pub struct Mask2D {
    mask: Array2<bool>,
    pixel_scales: (f64, f64),
}

impl Mask2D {
    /// `pixel_scales` are `(y, x)` arc-seconds per pixel and must be positive
    pub fn new(mask: Array2<bool>, pixel_scales: (f64, f64)) -> Result<Self, FitError> {
        if !(pixel_scales.0 > 0.0 && pixel_scales.1 > 0.0) {
            return Err(FitError::InvalidConfiguration(format!(
                "pixel scales must be positive, got {pixel_scales:?}"
            )));
        }
        Ok(Self { mask, pixel_scales })
    }

    pub fn unmasked(shape_native: (usize, usize), pixel_scales: (f64, f64)) -> Result<Self, FitError> {
        Self::new(Array2::from_elem(shape_native, false), pixel_scales)
    }

    #[inline]
    pub fn shape_native(&self) -> (usize, usize) {
        self.mask.dim()
    }

    #[inline]
    pub fn pixel_scales(&self) -> (f64, f64) {
        self.pixel_scales
    }

    #[inline]
    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        self.mask[[row, col]]
    }

    pub fn pixels_in_mask(&self) -> usize {
        self.mask.iter().filter(|&&masked| !masked).count()
    }

    /// Native `(row, column)` indices of unmasked pixels in slim order
    pub fn unmasked_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (rows, cols) = self.shape_native();
        iproduct!(0..rows, 0..cols).filter(move |&(row, col)| !self.mask[[row, col]])
    }

    /// `(y, x)` arc-second coordinates of a pixel centre, origin at the array centre
    pub fn pixel_centre(&self, row: usize, col: usize) -> (f64, f64) {
        let (rows, cols) = self.shape_native();
        let y_centre = (rows as f64 - 1.0) * 0.5;
        let x_centre = (cols as f64 - 1.0) * 0.5;
        (
            -(row as f64 - y_centre) * self.pixel_scales.0,
            (col as f64 - x_centre) * self.pixel_scales.1,
        )
    }

    fn is_border_pixel(&self, row: usize, col: usize) -> bool {
        let (rows, cols) = self.shape_native();
        if row == 0 || col == 0 || row + 1 == rows || col + 1 == cols {
            return true;
        }
        iproduct!(row - 1..=row + 1, col - 1..=col + 1).any(|(i, j)| self.mask[[i, j]])
    }

    /// Grid of unmasked pixels which touch a masked pixel or the array edge
    pub fn border_grid(&self) -> Grid2D {
        let points: Vec<_> = self
            .unmasked_pixels()
            .filter(|&(row, col)| self.is_border_pixel(row, col))
            .map(|(row, col)| self.pixel_centre(row, col))
            .collect();
        Grid2D::from_points(&points)
    }

    /// Extract unmasked pixels of a native array
    pub fn slim_from_native<T: Clone>(&self, native: ArrayView2<T>) -> Result<Array1<T>, FitError> {
        let (rows, cols) = self.shape_native();
        if native.dim() != (rows, cols) {
            return Err(FitError::ShapeMismatch {
                what: "native array",
                expected: rows * cols,
                actual: native.len(),
            });
        }
        Ok(self
            .unmasked_pixels()
            .map(|(row, col)| native[[row, col]].clone())
            .collect())
    }

    /// Scatter a slim array back onto the native shape, masked pixels are zero
    pub fn native_from_slim<T: Clone + Zero>(&self, slim: ArrayView1<T>) -> Result<Array2<T>, FitError> {
        FitError::check_len("slim array", self.pixels_in_mask(), slim.len())?;
        let mut native = Array2::zeros(self.shape_native());
        for ((row, col), value) in self.unmasked_pixels().zip(slim.iter()) {
            native[[row, col]] = value.clone();
        }
        Ok(native)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "Mask2D")]
struct MaskParameters {
    mask: Array2<bool>,
    pixel_scales: (f64, f64),
}

impl From<Mask2D> for MaskParameters {
    fn from(m: Mask2D) -> Self {
        Self {
            mask: m.mask,
            pixel_scales: m.pixel_scales,
        }
    }
}

impl TryFrom<MaskParameters> for Mask2D {
    type Error = FitError;

    fn try_from(p: MaskParameters) -> Result<Self, Self::Error> {
        Self::new(p.mask, p.pixel_scales)
    }
}
