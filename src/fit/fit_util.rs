//! Fit statistics for real and complex data
//!
//! Complex values are pairs of independent real channels: they are normalised, squared and
//! summed component-wise, never with complex division or multiplication.

use crate::error::FitError;
use crate::float_trait::Float;

use ndarray::{Array1, ArrayView1, Zip};
use num_complex::Complex;

pub fn residual_map<T: Float>(
    data: ArrayView1<T>,
    model_data: ArrayView1<T>,
) -> Result<Array1<T>, FitError> {
    FitError::check_len("model data", data.len(), model_data.len())?;
    Ok(&data - &model_data)
}

pub fn normalized_residual_map<T: Float>(
    residual_map: ArrayView1<T>,
    noise_map: ArrayView1<T>,
) -> Result<Array1<T>, FitError> {
    FitError::check_len("noise map", residual_map.len(), noise_map.len())?;
    Ok(&residual_map / &noise_map)
}

pub fn chi_squared_map<T: Float>(normalized_residual_map: ArrayView1<T>) -> Array1<T> {
    normalized_residual_map.mapv(|x| x * x)
}

pub fn chi_squared<T: Float>(chi_squared_map: ArrayView1<T>) -> T {
    chi_squared_map.sum()
}

/// $\sum_i \ln(2\pi\sigma_i^2)$
pub fn noise_normalization<T: Float>(noise_map: ArrayView1<T>) -> T {
    noise_map.fold(T::zero(), |acc, &sigma| {
        acc + (T::two() * T::PI() * sigma * sigma).ln()
    })
}

pub fn residual_map_complex<T: Float>(
    data: ArrayView1<Complex<T>>,
    model_data: ArrayView1<Complex<T>>,
) -> Result<Array1<Complex<T>>, FitError> {
    FitError::check_len("model data", data.len(), model_data.len())?;
    Ok(Zip::from(&data)
        .and(&model_data)
        .map_collect(|&d, &m| Complex::new(d.re - m.re, d.im - m.im)))
}

pub fn normalized_residual_map_complex<T: Float>(
    residual_map: ArrayView1<Complex<T>>,
    noise_map: ArrayView1<Complex<T>>,
) -> Result<Array1<Complex<T>>, FitError> {
    FitError::check_len("noise map", residual_map.len(), noise_map.len())?;
    Ok(Zip::from(&residual_map)
        .and(&noise_map)
        .map_collect(|&r, &sigma| Complex::new(r.re / sigma.re, r.im / sigma.im)))
}

pub fn chi_squared_map_complex<T: Float>(
    normalized_residual_map: ArrayView1<Complex<T>>,
) -> Array1<Complex<T>> {
    normalized_residual_map.mapv(|x| Complex::new(x.re * x.re, x.im * x.im))
}

/// Sum of the real channels plus sum of the imaginary channels
pub fn chi_squared_complex<T: Float>(chi_squared_map: ArrayView1<Complex<T>>) -> T {
    chi_squared_map.fold(T::zero(), |acc, x| acc + x.re + x.im)
}

pub fn noise_normalization_complex<T: Float>(noise_map: ArrayView1<Complex<T>>) -> T {
    let two_pi = T::two() * T::PI();
    noise_map.fold(T::zero(), |acc, sigma| {
        acc + (two_pi * sigma.re * sigma.re).ln() + (two_pi * sigma.im * sigma.im).ln()
    })
}

#[inline]
pub fn log_likelihood<T: Float>(chi_squared: T, noise_normalization: T) -> T {
    -T::half() * (chi_squared + noise_normalization)
}

#[inline]
pub fn log_likelihood_with_regularization<T: Float>(
    chi_squared: T,
    regularization_term: T,
    noise_normalization: T,
) -> T {
    -T::half() * (chi_squared + regularization_term + noise_normalization)
}

/// Bayesian evidence of a regularized linear inversion
#[inline]
pub fn log_evidence<T: Float>(
    chi_squared: T,
    regularization_term: T,
    log_det_curvature_reg_matrix_term: T,
    log_det_regularization_matrix_term: T,
    noise_normalization: T,
) -> T {
    -T::half()
        * (chi_squared + regularization_term + log_det_curvature_reg_matrix_term
            - log_det_regularization_matrix_term
            + noise_normalization)
}
