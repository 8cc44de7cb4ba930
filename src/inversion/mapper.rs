use crate::error::FitError;

use ndarray::{Array1, Array2, ArrayView1};

/// Linear map from pixelization pixels to data-grid points
///
/// `mapping_matrix[[i, j]]` is the fraction of data point `i` described by pixel `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct Mapper {
    mapping_matrix: Array2<f64>,
    pixel_neighbors: Vec<Vec<usize>>,
}

impl Mapper {
    pub fn new(mapping_matrix: Array2<f64>, pixel_neighbors: Vec<Vec<usize>>) -> Result<Self, FitError> {
        let pixels = mapping_matrix.ncols();
        FitError::check_len("pixel neighbor list", pixels, pixel_neighbors.len())?;
        if let Some(&invalid) = pixel_neighbors.iter().flatten().find(|&&j| j >= pixels) {
            return Err(FitError::InvalidConfiguration(format!(
                "pixel neighbor index {invalid} is out of range for {pixels} pixels"
            )));
        }
        Ok(Self {
            mapping_matrix,
            pixel_neighbors,
        })
    }

    #[inline]
    pub fn pixels(&self) -> usize {
        self.mapping_matrix.ncols()
    }

    #[inline]
    pub fn data_pixels(&self) -> usize {
        self.mapping_matrix.nrows()
    }

    #[inline]
    pub fn mapping_matrix(&self) -> &Array2<f64> {
        &self.mapping_matrix
    }

    #[inline]
    pub fn pixel_neighbors(&self) -> &[Vec<usize>] {
        &self.pixel_neighbors
    }

    pub fn mapped_data_from(&self, reconstruction: ArrayView1<f64>) -> Result<Array1<f64>, FitError> {
        FitError::check_len("reconstruction", self.pixels(), reconstruction.len())?;
        Ok(self.mapping_matrix.dot(&reconstruction))
    }
}
