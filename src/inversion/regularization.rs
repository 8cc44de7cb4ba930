use crate::inversion::mapper::Mapper;

use enum_dispatch::enum_dispatch;
use ndarray::Array2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Small diagonal term keeping constant regularization matrices positive-definite
const DIAGONAL_REGULARIZATION: f64 = 1e-8;

/// Smoothness prior over a pixelized reconstruction
#[enum_dispatch]
pub trait RegularizationTrait: Clone + Debug {
    fn regularization_matrix_from_mapper(&self, mapper: &Mapper) -> Array2<f64>;
}

/// All regularization schemes are available as variants of this enum
#[enum_dispatch(RegularizationTrait)]
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[non_exhaustive]
pub enum Regularization {
    Constant,
    Zeroth,
}

/// Penalises the squared difference between every pair of neighbouring pixels
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Constant {
    pub coefficient: f64,
}

impl Constant {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RegularizationTrait for Constant {
    fn regularization_matrix_from_mapper(&self, mapper: &Mapper) -> Array2<f64> {
        let c2 = self.coefficient.powi(2);
        let mut matrix = Array2::zeros((mapper.pixels(), mapper.pixels()));
        for (i, neighbors) in mapper.pixel_neighbors().iter().enumerate() {
            matrix[[i, i]] += DIAGONAL_REGULARIZATION;
            for &j in neighbors {
                matrix[[i, i]] += c2;
                matrix[[i, j]] -= c2;
            }
        }
        matrix
    }
}

/// Penalises the squared value of every pixel
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Zeroth {
    pub coefficient: f64,
}

impl Zeroth {
    pub fn new(coefficient: f64) -> Self {
        Self { coefficient }
    }
}

impl Default for Zeroth {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RegularizationTrait for Zeroth {
    fn regularization_matrix_from_mapper(&self, mapper: &Mapper) -> Array2<f64> {
        Array2::eye(mapper.pixels()) * self.coefficient.powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn chain_mapper() -> Mapper {
        Mapper::new(Array2::eye(3), vec![vec![1], vec![0, 2], vec![1]]).unwrap()
    }

    #[test]
    fn constant_matrix() {
        let regularization: Regularization = Constant::new(2.0).into();
        let matrix = regularization.regularization_matrix_from_mapper(&chain_mapper());
        let expected = array![
            [4.0 + 1e-8, -4.0, 0.0],
            [-4.0, 8.0 + 1e-8, -4.0],
            [0.0, -4.0, 4.0 + 1e-8],
        ];
        assert_abs_diff_eq!(matrix, expected, epsilon = 1e-15);
    }

    #[test]
    fn constant_matrix_is_symmetric_for_symmetric_neighbors() {
        let matrix = Constant::new(1.3).regularization_matrix_from_mapper(&chain_mapper());
        assert_abs_diff_eq!(matrix, matrix.t(), epsilon = 0.0);
    }

    #[test]
    fn zeroth_matrix() {
        let regularization: Regularization = Zeroth::new(3.0).into();
        assert_eq!(
            regularization.regularization_matrix_from_mapper(&chain_mapper()),
            Array2::<f64>::eye(3) * 9.0
        );
    }

    #[test]
    fn deserialize() {
        let regularization: Regularization =
            serde_json::from_str(r#"{"Constant": {"coefficient": 0.5}}"#).unwrap();
        assert_eq!(regularization, Regularization::Constant(Constant::new(0.5)));
    }
}
