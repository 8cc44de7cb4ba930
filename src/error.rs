/// Error returned from dataset, inversion and fit constructors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FitError {
    #[error("{what} has {actual} elements, {expected} are expected")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{matrix} matrix is not positive-definite")]
    SingularSystem { matrix: &'static str },

    #[error(
        "conjugate gradient stopped after {iterations} iterations with residual norm {residual_norm}"
    )]
    NotConverged {
        iterations: usize,
        residual_norm: f64,
    },
}

impl FitError {
    /// Is this a property of the candidate model rather than a misuse of the library?
    ///
    /// A search should resample or penalise the candidate and carry on.
    pub fn is_candidate_rejection(&self) -> bool {
        matches!(
            self,
            Self::SingularSystem { .. } | Self::NotConverged { .. }
        )
    }

    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::ShapeMismatch {
                what,
                expected,
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_kinds() {
        assert!(FitError::SingularSystem { matrix: "curvature" }.is_candidate_rejection());
        assert!(
            FitError::NotConverged {
                iterations: 10,
                residual_norm: 1.0
            }
            .is_candidate_rejection()
        );
        assert!(!FitError::InvalidConfiguration("x".into()).is_candidate_rejection());
        assert!(
            !FitError::ShapeMismatch {
                what: "noise map",
                expected: 2,
                actual: 3
            }
            .is_candidate_rejection()
        );
    }

    #[test]
    fn check_len() {
        assert_eq!(FitError::check_len("image", 3, 3), Ok(()));
        assert_eq!(
            FitError::check_len("image", 3, 4),
            Err(FitError::ShapeMismatch {
                what: "image",
                expected: 3,
                actual: 4
            })
        );
    }
}
