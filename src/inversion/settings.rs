use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How data grids are paired with pixelization pixels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SettingsPixelization {
    /// Relocate grid points beyond the mask border back onto it before pixelizing
    pub use_border: bool,
}

impl Default for SettingsPixelization {
    fn default() -> Self {
        Self { use_border: true }
    }
}

/// How the linear inversion is solved
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SettingsInversion {
    /// Use the iterative solver instead of forming the dense design matrix
    pub use_linear_operators: bool,
    /// Relative residual tolerance of the iterative solver
    pub tolerance: f64,
    /// Iteration limit of the iterative solver, ten times the number of pixels if unset
    pub maximum_iterations: Option<usize>,
}

impl Default for SettingsInversion {
    fn default() -> Self {
        Self {
            use_linear_operators: false,
            tolerance: 1e-10,
            maximum_iterations: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_json() {
        let settings: SettingsInversion = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SettingsInversion::default());
        let settings: SettingsPixelization = serde_json::from_str("{}").unwrap();
        assert!(settings.use_border);
    }

    #[test]
    fn partial_json() {
        let settings: SettingsInversion =
            serde_json::from_str(r#"{"use_linear_operators": true, "maximum_iterations": 50}"#)
                .unwrap();
        assert!(settings.use_linear_operators);
        assert_eq!(settings.maximum_iterations, Some(50));
        assert_eq!(settings.tolerance, 1e-10);
    }
}
