use crate::error::FitError;
use crate::fit::FitValue;
use crate::inversion::mapper::Mapper;
use crate::inversion::operator::{DataOperator, ImageOperator, VisibilityOperator};
use crate::inversion::regularization::{Regularization, RegularizationTrait};
use crate::inversion::settings::SettingsInversion;
use crate::inversion::solver::{InversionSolver, LinearProblem, PositiveDefinite};
use crate::transformer::{Transformer, TransformerTrait};
use crate::types::{Visibilities, VisibilitiesView};

use ndarray::{Array1, Array2, ArrayView1, s};
use num_complex::Complex64;
use std::ops::Range;

/// Regularized linear reconstruction of the data in a pixel basis
///
/// Several mappers are solved together: their mapping matrices are stacked column-wise and
/// their regularization matrices are placed block-diagonally, so that pixels of one mapper
/// occupy a contiguous range of the reconstruction.
///
/// The solve minimises
/// $$
/// \chi^2 + x^T R x, \quad x = (F + R)^{-1} D,
/// $$
/// where $F$ is the curvature matrix and $D$ the data vector, and keeps the terms entering the
/// Bayesian evidence: $x^T R x$, $\ln\det(F + R)$ and $\ln\det R$.
#[derive(Clone, Debug)]
pub struct Inversion<V: FitValue> {
    noise_map: Array1<V>,
    mapping_matrix: Array2<f64>,
    regularization_matrix: Array2<f64>,
    reconstruction: Array1<f64>,
    mapped_reconstructed_image: Array1<f64>,
    mapped_reconstructed_data: Array1<V>,
    regularization_term: f64,
    log_det_curvature_reg_matrix_term: f64,
    log_det_regularization_matrix_term: f64,
    pixel_ranges: Vec<Range<usize>>,
    solver: InversionSolver,
}

pub type InversionImaging = Inversion<f64>;

pub type InversionInterferometer = Inversion<Complex64>;

impl<V: FitValue> Inversion<V> {
    /// Reconstruct `data` observed through `operator`
    ///
    /// Every mapper must be built on the image-plane grid the operator acts on. Returns
    /// [FitError::SingularSystem] if either the curvature plus regularization matrix or the
    /// regularization matrix is not positive-definite.
    pub fn new<O: DataOperator>(
        data: ArrayView1<V>,
        noise_map: ArrayView1<V>,
        linear_objects: &[(Mapper, Regularization)],
        operator: &O,
        settings: &SettingsInversion,
    ) -> Result<Self, FitError> {
        if linear_objects.is_empty() {
            return Err(FitError::InvalidConfiguration(
                "inversion requires at least one mapper".into(),
            ));
        }
        FitError::check_len("inversion noise map", data.len(), noise_map.len())?;
        FitError::check_len(
            "inversion data channels",
            operator.data_len(),
            data.len() * V::CHANNELS,
        )?;
        for (mapper, _) in linear_objects {
            FitError::check_len("mapper data grid", operator.image_len(), mapper.data_pixels())?;
        }

        let pixels: usize = linear_objects.iter().map(|(mapper, _)| mapper.pixels()).sum();
        let mut mapping_matrix = Array2::zeros((operator.image_len(), pixels));
        let mut regularization_matrix = Array2::zeros((pixels, pixels));
        let mut pixel_ranges = Vec::with_capacity(linear_objects.len());
        let mut start = 0;
        for (mapper, regularization) in linear_objects {
            let range = start..start + mapper.pixels();
            mapping_matrix
                .slice_mut(s![.., range.clone()])
                .assign(mapper.mapping_matrix());
            regularization_matrix
                .slice_mut(s![range.clone(), range.clone()])
                .assign(&regularization.regularization_matrix_from_mapper(mapper));
            start = range.end;
            pixel_ranges.push(range);
        }

        let data_channels = V::to_real_channels(data);
        let weights = V::to_real_channels(noise_map).mapv(|sigma| sigma.powi(-2));
        let solver = InversionSolver::from_settings(settings, pixels);
        log::debug!(
            "inverting {} data values with {} mappers and {pixels} pixels using {solver:?}",
            data_channels.len(),
            linear_objects.len(),
        );
        let solution = solver.solve(&LinearProblem {
            mapping_matrix: mapping_matrix.view(),
            regularization_matrix: regularization_matrix.view(),
            data: data_channels.view(),
            weights: weights.view(),
            operator,
        })?;

        let reconstruction = solution.reconstruction;
        let mapped_reconstructed_image = mapping_matrix.dot(&reconstruction);
        let mapped_reconstructed_data =
            V::from_real_channels(operator.forward(mapped_reconstructed_image.view()).view());
        let regularization_term = reconstruction.dot(&regularization_matrix.dot(&reconstruction));
        let log_det_regularization_matrix_term =
            PositiveDefinite::factorize(regularization_matrix.view(), "regularization")?.log_det();
        log::debug!(
            "regularization term {regularization_term}, log det curvature_reg {}, log det regularization {log_det_regularization_matrix_term}",
            solution.log_det_curvature_reg_matrix_term,
        );

        Ok(Self {
            noise_map: noise_map.to_owned(),
            mapping_matrix,
            regularization_matrix,
            reconstruction,
            mapped_reconstructed_image,
            mapped_reconstructed_data,
            regularization_term,
            log_det_curvature_reg_matrix_term: solution.log_det_curvature_reg_matrix_term,
            log_det_regularization_matrix_term,
            pixel_ranges,
            solver,
        })
    }

    #[inline]
    pub fn noise_map(&self) -> &Array1<V> {
        &self.noise_map
    }

    #[inline]
    pub fn mapping_matrix(&self) -> &Array2<f64> {
        &self.mapping_matrix
    }

    #[inline]
    pub fn regularization_matrix(&self) -> &Array2<f64> {
        &self.regularization_matrix
    }

    #[inline]
    pub fn reconstruction(&self) -> &Array1<f64> {
        &self.reconstruction
    }

    /// Reconstruction mapped back onto the image-plane grid
    #[inline]
    pub fn mapped_reconstructed_image(&self) -> &Array1<f64> {
        &self.mapped_reconstructed_image
    }

    /// Reconstruction mapped into data space
    #[inline]
    pub fn mapped_reconstructed_data(&self) -> &Array1<V> {
        &self.mapped_reconstructed_data
    }

    #[inline]
    pub fn regularization_term(&self) -> f64 {
        self.regularization_term
    }

    #[inline]
    pub fn log_det_curvature_reg_matrix_term(&self) -> f64 {
        self.log_det_curvature_reg_matrix_term
    }

    #[inline]
    pub fn log_det_regularization_matrix_term(&self) -> f64 {
        self.log_det_regularization_matrix_term
    }

    #[inline]
    pub fn solver(&self) -> InversionSolver {
        self.solver
    }

    #[inline]
    pub fn pixels(&self) -> usize {
        self.reconstruction.len()
    }

    #[inline]
    pub fn total_mappers(&self) -> usize {
        self.pixel_ranges.len()
    }

    pub fn reconstruction_of_mapper(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        let range = self.pixel_ranges.get(index)?.clone();
        Some(self.reconstruction.slice(s![range]))
    }

    /// Part of [Inversion::mapped_reconstructed_image] reconstructed by one mapper
    pub fn mapped_reconstructed_image_of_mapper(&self, index: usize) -> Option<Array1<f64>> {
        let range = self.pixel_ranges.get(index)?.clone();
        Some(
            self.mapping_matrix
                .slice(s![.., range.clone()])
                .dot(&self.reconstruction.slice(s![range])),
        )
    }

    pub fn mapped_reconstructed_images_of_mappers(&self) -> Vec<Array1<f64>> {
        (0..self.total_mappers())
            .filter_map(|index| self.mapped_reconstructed_image_of_mapper(index))
            .collect()
    }
}

impl Inversion<f64> {
    pub fn imaging(
        image: ArrayView1<f64>,
        noise_map: ArrayView1<f64>,
        linear_objects: &[(Mapper, Regularization)],
        settings: &SettingsInversion,
    ) -> Result<Self, FitError> {
        let operator = ImageOperator::new(image.len());
        Self::new(image, noise_map, linear_objects, &operator, settings)
    }
}

impl Inversion<Complex64> {
    pub fn interferometer(
        visibilities: VisibilitiesView,
        noise_map: VisibilitiesView,
        transformer: &Transformer,
        linear_objects: &[(Mapper, Regularization)],
        settings: &SettingsInversion,
    ) -> Result<Self, FitError> {
        let operator = VisibilityOperator::new(transformer);
        Self::new(visibilities, noise_map, linear_objects, &operator, settings)
    }

    #[inline]
    pub fn mapped_reconstructed_visibilities(&self) -> &Visibilities {
        &self.mapped_reconstructed_data
    }

    /// Part of [Inversion::mapped_reconstructed_visibilities] reconstructed by one mapper
    pub fn mapped_reconstructed_visibilities_of_mapper(
        &self,
        index: usize,
        transformer: &Transformer,
    ) -> Option<Visibilities> {
        let image = self.mapped_reconstructed_image_of_mapper(index)?;
        Some(transformer.visibilities_from_image(image.view()))
    }
}
