use crate::error::FitError;
use crate::fit::fit_util;

use ndarray::{Array1, ArrayView1, s};
use num_complex::Complex64;
use num_traits::Zero;
use std::fmt::Debug;

/// Data value type a fit can be computed for: real image pixels or complex visibilities
pub trait FitValue: Copy + Debug + PartialEq + Zero + Send + Sync + 'static {
    /// Number of independent real channels per value
    const CHANNELS: usize;

    fn residual_map(data: ArrayView1<Self>, model_data: ArrayView1<Self>) -> Result<Array1<Self>, FitError>;

    fn normalized_residual_map(
        residual_map: ArrayView1<Self>,
        noise_map: ArrayView1<Self>,
    ) -> Result<Array1<Self>, FitError>;

    fn chi_squared_map(normalized_residual_map: ArrayView1<Self>) -> Array1<Self>;

    fn chi_squared(chi_squared_map: ArrayView1<Self>) -> f64;

    fn noise_normalization(noise_map: ArrayView1<Self>) -> f64;

    /// All real channels of the first value, then all of the second channel and so on
    fn to_real_channels(values: ArrayView1<Self>) -> Array1<f64>;

    /// Inverse of [FitValue::to_real_channels]
    fn from_real_channels(channels: ArrayView1<f64>) -> Array1<Self>;
}

impl FitValue for f64 {
    const CHANNELS: usize = 1;

    fn residual_map(data: ArrayView1<Self>, model_data: ArrayView1<Self>) -> Result<Array1<Self>, FitError> {
        fit_util::residual_map(data, model_data)
    }

    fn normalized_residual_map(
        residual_map: ArrayView1<Self>,
        noise_map: ArrayView1<Self>,
    ) -> Result<Array1<Self>, FitError> {
        fit_util::normalized_residual_map(residual_map, noise_map)
    }

    fn chi_squared_map(normalized_residual_map: ArrayView1<Self>) -> Array1<Self> {
        fit_util::chi_squared_map(normalized_residual_map)
    }

    fn chi_squared(chi_squared_map: ArrayView1<Self>) -> f64 {
        fit_util::chi_squared(chi_squared_map)
    }

    fn noise_normalization(noise_map: ArrayView1<Self>) -> f64 {
        fit_util::noise_normalization(noise_map)
    }

    fn to_real_channels(values: ArrayView1<Self>) -> Array1<f64> {
        values.to_owned()
    }

    fn from_real_channels(channels: ArrayView1<f64>) -> Array1<Self> {
        channels.to_owned()
    }
}

impl FitValue for Complex64 {
    const CHANNELS: usize = 2;

    fn residual_map(data: ArrayView1<Self>, model_data: ArrayView1<Self>) -> Result<Array1<Self>, FitError> {
        fit_util::residual_map_complex(data, model_data)
    }

    fn normalized_residual_map(
        residual_map: ArrayView1<Self>,
        noise_map: ArrayView1<Self>,
    ) -> Result<Array1<Self>, FitError> {
        fit_util::normalized_residual_map_complex(residual_map, noise_map)
    }

    fn chi_squared_map(normalized_residual_map: ArrayView1<Self>) -> Array1<Self> {
        fit_util::chi_squared_map_complex(normalized_residual_map)
    }

    fn chi_squared(chi_squared_map: ArrayView1<Self>) -> f64 {
        fit_util::chi_squared_complex(chi_squared_map)
    }

    fn noise_normalization(noise_map: ArrayView1<Self>) -> f64 {
        fit_util::noise_normalization_complex(noise_map)
    }

    fn to_real_channels(values: ArrayView1<Self>) -> Array1<f64> {
        values
            .iter()
            .map(|v| v.re)
            .chain(values.iter().map(|v| v.im))
            .collect()
    }

    fn from_real_channels(channels: ArrayView1<f64>) -> Array1<Self> {
        let n = channels.len() / 2;
        let (real, imag) = (channels.slice(s![..n]), channels.slice(s![n..2 * n]));
        real.iter()
            .zip(imag.iter())
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect()
    }
}

/// Data, noise and model of a fit with every statistic derived from them
#[derive(Clone, Debug)]
pub struct FitData<V: FitValue> {
    data: Array1<V>,
    noise_map: Array1<V>,
    model_data: Array1<V>,
    residual_map: Array1<V>,
    normalized_residual_map: Array1<V>,
    chi_squared_map: Array1<V>,
    chi_squared: f64,
    noise_normalization: f64,
}

impl<V: FitValue> FitData<V> {
    pub fn new(data: Array1<V>, noise_map: Array1<V>, model_data: Array1<V>) -> Result<Self, FitError> {
        let residual_map = V::residual_map(data.view(), model_data.view())?;
        let normalized_residual_map = V::normalized_residual_map(residual_map.view(), noise_map.view())?;
        let chi_squared_map = V::chi_squared_map(normalized_residual_map.view());
        let chi_squared = V::chi_squared(chi_squared_map.view());
        let noise_normalization = V::noise_normalization(noise_map.view());
        Ok(Self {
            data,
            noise_map,
            model_data,
            residual_map,
            normalized_residual_map,
            chi_squared_map,
            chi_squared,
            noise_normalization,
        })
    }

    #[inline]
    pub fn data(&self) -> &Array1<V> {
        &self.data
    }

    #[inline]
    pub fn noise_map(&self) -> &Array1<V> {
        &self.noise_map
    }

    #[inline]
    pub fn model_data(&self) -> &Array1<V> {
        &self.model_data
    }

    #[inline]
    pub fn residual_map(&self) -> &Array1<V> {
        &self.residual_map
    }

    #[inline]
    pub fn normalized_residual_map(&self) -> &Array1<V> {
        &self.normalized_residual_map
    }

    #[inline]
    pub fn chi_squared_map(&self) -> &Array1<V> {
        &self.chi_squared_map
    }

    #[inline]
    pub fn chi_squared(&self) -> f64 {
        self.chi_squared
    }

    #[inline]
    pub fn noise_normalization(&self) -> f64 {
        self.noise_normalization
    }

    #[inline]
    pub fn log_likelihood(&self) -> f64 {
        fit_util::log_likelihood(self.chi_squared, self.noise_normalization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn complex_channels() {
        let values = array![Complex64::new(1.0, 2.0), Complex64::new(3.0, 4.0)];
        let channels = Complex64::to_real_channels(values.view());
        assert_eq!(channels, array![1.0, 3.0, 2.0, 4.0]);
        assert_eq!(Complex64::from_real_channels(channels.view()), values);
    }

    #[test]
    fn fit_data_complex() {
        let fit = FitData::new(
            array![Complex64::new(5.0, 4.0)],
            array![Complex64::new(1.0, 1.0)],
            array![Complex64::new(2.0, 0.0)],
        )
        .unwrap();
        assert_eq!(fit.chi_squared(), 25.0);
        assert_relative_eq!(
            fit.log_likelihood(),
            -0.5 * (25.0 + 2.0 * (2.0 * std::f64::consts::PI).ln()),
            max_relative = 1e-15
        );
    }

    #[test]
    fn fit_data_perfect_model() {
        let data = array![1.0, 2.0];
        let fit = FitData::new(data.clone(), array![1.0, 1.0], data).unwrap();
        assert_eq!(fit.chi_squared(), 0.0);
        assert_eq!(fit.residual_map(), &array![0.0, 0.0]);
    }

    #[test]
    fn mismatched_noise() {
        assert!(FitData::new(array![1.0, 2.0], array![1.0], array![1.0, 2.0]).is_err());
    }
}
