use crate::data::Grid2D;
use crate::error::FitError;
use crate::inversion::mapper::Mapper;
use crate::inversion::settings::SettingsPixelization;

use enum_dispatch::enum_dispatch;
use ndarray::Array2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Padding added to each side of the grid extent so that edge points fall inside a pixel
const EXTENT_PADDING: f64 = 1e-8;

/// Source-plane discretisation producing a [Mapper] for a data grid
#[enum_dispatch]
pub trait PixelizationTrait: Clone + Debug {
    /// Number of reconstruction pixels
    fn pixels(&self) -> usize;

    fn mapper_from_grid(
        &self,
        grid: &Grid2D,
        border: &Grid2D,
        settings: &SettingsPixelization,
    ) -> Result<Mapper, FitError>;
}

/// All pixelizations are available as variants of this enum
#[enum_dispatch(PixelizationTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[non_exhaustive]
pub enum Pixelization {
    Rectangular,
}

/// Uniform rectangular grid of pixels spanning the data grid
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RectangularParameters", into = "RectangularParameters")]
pub struct Rectangular {
    shape: (usize, usize),
}

impl Rectangular {
    /// `shape` is `(rows, columns)`, both at least 3
    pub fn new(shape: (usize, usize)) -> Result<Self, FitError> {
        if shape.0 < 3 || shape.1 < 3 {
            return Err(FitError::InvalidConfiguration(format!(
                "rectangular pixelization requires at least 3x3 pixels, got {}x{}",
                shape.0, shape.1
            )));
        }
        Ok(Self { shape })
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    fn neighbors(&self) -> Vec<Vec<usize>> {
        let (rows, cols) = self.shape;
        (0..rows * cols)
            .map(|pixel| {
                let (row, col) = (pixel / cols, pixel % cols);
                let mut neighbors = Vec::with_capacity(4);
                if row > 0 {
                    neighbors.push(pixel - cols);
                }
                if col > 0 {
                    neighbors.push(pixel - 1);
                }
                if col + 1 < cols {
                    neighbors.push(pixel + 1);
                }
                if row + 1 < rows {
                    neighbors.push(pixel + cols);
                }
                neighbors
            })
            .collect()
    }
}

impl PixelizationTrait for Rectangular {
    fn pixels(&self) -> usize {
        self.shape.0 * self.shape.1
    }

    fn mapper_from_grid(
        &self,
        grid: &Grid2D,
        border: &Grid2D,
        settings: &SettingsPixelization,
    ) -> Result<Mapper, FitError> {
        let relocated;
        let grid = if settings.use_border && !border.is_empty() {
            relocated = grid.relocated_to_border(border);
            &relocated
        } else {
            grid
        };
        let (y_min, y_max, x_min, x_max) = grid.extent().ok_or_else(|| {
            FitError::InvalidConfiguration("cannot pixelize an empty grid".into())
        })?;
        let (y_min, y_max) = (y_min - EXTENT_PADDING, y_max + EXTENT_PADDING);
        let (x_min, x_max) = (x_min - EXTENT_PADDING, x_max + EXTENT_PADDING);

        let (rows, cols) = self.shape;
        let pixel_scale_y = (y_max - y_min) / rows as f64;
        let pixel_scale_x = (x_max - x_min) / cols as f64;

        let mut mapping_matrix = Array2::zeros((grid.len(), self.pixels()));
        for (i, point) in grid.coordinates().rows().into_iter().enumerate() {
            let row = (((y_max - point[0]) / pixel_scale_y).floor() as usize).min(rows - 1);
            let col = (((point[1] - x_min) / pixel_scale_x).floor() as usize).min(cols - 1);
            mapping_matrix[[i, row * cols + col]] = 1.0;
        }
        Mapper::new(mapping_matrix, self.neighbors())
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "Rectangular")]
struct RectangularParameters {
    shape: (usize, usize),
}

impl From<Rectangular> for RectangularParameters {
    fn from(p: Rectangular) -> Self {
        Self { shape: p.shape }
    }
}

impl TryFrom<RectangularParameters> for Rectangular {
    type Error = FitError;

    fn try_from(p: RectangularParameters) -> Result<Self, Self::Error> {
        Self::new(p.shape)
    }
}

impl JsonSchema for Rectangular {
    fn is_referenceable() -> bool {
        false
    }

    fn schema_name() -> String {
        RectangularParameters::schema_name()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        RectangularParameters::json_schema(generator)
    }
}
