use crate::error::FitError;
use crate::inversion::operator::DataOperator;
use crate::inversion::settings::SettingsInversion;

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Weighted, regularized least-squares problem of a linear inversion
///
/// The solution minimises $\chi^2 + x^T R x$ with
/// $\chi^2 = \sum_k w_k (d_k - [\mathcal{F}(A x)]_k)^2$, where $A$ is the mapping matrix,
/// $\mathcal{F}$ the data operator and $w_k = \sigma_k^{-2}$.
pub struct LinearProblem<'a, O: DataOperator> {
    pub mapping_matrix: ArrayView2<'a, f64>,
    pub regularization_matrix: ArrayView2<'a, f64>,
    pub data: ArrayView1<'a, f64>,
    pub weights: ArrayView1<'a, f64>,
    pub operator: &'a O,
}

impl<O: DataOperator> LinearProblem<'_, O> {
    fn pixels(&self) -> usize {
        self.mapping_matrix.ncols()
    }

    /// $A^T \mathcal{F}^\dagger (W d)$
    fn data_vector(&self) -> Array1<f64> {
        let weighted = &self.data * &self.weights;
        self.mapping_matrix
            .t()
            .dot(&self.operator.adjoint(weighted.view()))
    }

    /// $v \mapsto A^T \mathcal{F}^\dagger (W \mathcal{F}(A v)) + R v$
    fn apply_curvature_reg(&self, v: ArrayView1<f64>) -> Array1<f64> {
        let image = self.mapping_matrix.dot(&v);
        let weighted = self.operator.forward(image.view()) * &self.weights;
        self.mapping_matrix
            .t()
            .dot(&self.operator.adjoint(weighted.view()))
            + self.regularization_matrix.dot(&v)
    }
}

/// Reconstruction and the log-determinant of the curvature plus regularization matrix
#[derive(Clone, Debug)]
pub struct LinearSolution {
    pub reconstruction: Array1<f64>,
    pub log_det_curvature_reg_matrix_term: f64,
}

/// Strategy solving a [LinearProblem]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InversionSolver {
    /// Cholesky factorisation of the dense curvature plus regularization matrix
    Matrix,
    /// Conjugate gradient on the operator form of the normal equations
    LinearOperator {
        tolerance: f64,
        maximum_iterations: usize,
    },
}

impl InversionSolver {
    pub fn from_settings(settings: &SettingsInversion, pixels: usize) -> Self {
        if settings.use_linear_operators {
            Self::LinearOperator {
                tolerance: settings.tolerance,
                maximum_iterations: settings
                    .maximum_iterations
                    .unwrap_or(10 * pixels.max(1)),
            }
        } else {
            Self::Matrix
        }
    }

    pub fn solve<O: DataOperator>(
        &self,
        problem: &LinearProblem<O>,
    ) -> Result<LinearSolution, FitError> {
        match *self {
            Self::Matrix => solve_matrix(problem),
            Self::LinearOperator {
                tolerance,
                maximum_iterations,
            } => solve_linear_operator(problem, tolerance, maximum_iterations),
        }
    }
}

fn solve_matrix<O: DataOperator>(problem: &LinearProblem<O>) -> Result<LinearSolution, FitError> {
    let blurred_mapping_matrix = problem.operator.forward_matrix(problem.mapping_matrix);
    let weighted = &blurred_mapping_matrix * &problem.weights.insert_axis(Axis(1));
    let curvature_matrix = blurred_mapping_matrix.t().dot(&weighted);
    let data_vector = weighted.t().dot(&problem.data);
    let curvature_reg_matrix = curvature_matrix + problem.regularization_matrix;

    let cholesky = PositiveDefinite::factorize(curvature_reg_matrix.view(), "curvature_reg")?;
    Ok(LinearSolution {
        reconstruction: cholesky.solve(data_vector.view()),
        log_det_curvature_reg_matrix_term: cholesky.log_det(),
    })
}

fn solve_linear_operator<O: DataOperator>(
    problem: &LinearProblem<O>,
    tolerance: f64,
    maximum_iterations: usize,
) -> Result<LinearSolution, FitError> {
    let b = problem.data_vector();
    let b_norm = b.dot(&b).sqrt();

    let mut x = Array1::zeros(problem.pixels());
    let mut r = b;
    let mut p = r.clone();
    let mut rs = r.dot(&r);
    let mut iterations = 0;
    while rs.sqrt() > tolerance * b_norm {
        if iterations == maximum_iterations {
            return Err(FitError::NotConverged {
                iterations,
                residual_norm: rs.sqrt(),
            });
        }
        let q = problem.apply_curvature_reg(p.view());
        let curvature = p.dot(&q);
        if curvature.is_nan() || curvature <= 0.0 {
            return Err(FitError::SingularSystem {
                matrix: "curvature_reg",
            });
        }
        let alpha = rs / curvature;
        x.scaled_add(alpha, &p);
        r.scaled_add(-alpha, &q);
        let rs_new = r.dot(&r);
        p = &r + &(p * (rs_new / rs));
        rs = rs_new;
        iterations += 1;
    }
    log::trace!("conjugate gradient converged after {iterations} iterations");

    let mut curvature_reg_matrix = Array2::zeros((problem.pixels(), problem.pixels()));
    let mut unit = Array1::zeros(problem.pixels());
    for (j, mut column) in curvature_reg_matrix.columns_mut().into_iter().enumerate() {
        unit[j] = 1.0;
        column.assign(&problem.apply_curvature_reg(unit.view()));
        unit[j] = 0.0;
    }
    let cholesky = PositiveDefinite::factorize(curvature_reg_matrix.view(), "curvature_reg")?;

    Ok(LinearSolution {
        reconstruction: x,
        log_det_curvature_reg_matrix_term: cholesky.log_det(),
    })
}

/// Cholesky factorisation of a symmetric positive-definite matrix
pub(crate) struct PositiveDefinite(nalgebra::Cholesky<f64, nalgebra::Dyn>);

impl PositiveDefinite {
    pub(crate) fn factorize(matrix: ArrayView2<f64>, name: &'static str) -> Result<Self, FitError> {
        let (n, m) = matrix.dim();
        FitError::check_len(name, n, m)?;
        let matrix = DMatrix::from_fn(n, n, |i, j| matrix[[i, j]]);
        let cholesky = matrix
            .cholesky()
            .ok_or(FitError::SingularSystem { matrix: name })?;
        if cholesky.l_dirty().diagonal().iter().all(|d| d.is_finite() && *d > 0.0) {
            Ok(Self(cholesky))
        } else {
            Err(FitError::SingularSystem { matrix: name })
        }
    }

    pub(crate) fn solve(&self, b: ArrayView1<f64>) -> Array1<f64> {
        let b = DVector::from_iterator(b.len(), b.iter().copied());
        self.0.solve(&b).iter().copied().collect()
    }

    /// $\ln\det M = 2 \sum_i \ln L_{ii}$
    pub(crate) fn log_det(&self) -> f64 {
        2.0 * self.0.l_dirty().diagonal().iter().map(|d| d.ln()).sum::<f64>()
    }
}
