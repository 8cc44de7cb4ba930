use crate::inversion::{SettingsInversion, SettingsPixelization};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options of a fit evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SettingsFit {
    /// Apply hyper-parameter scaling of the data and noise, if hyper components are given
    pub use_hyper_scalings: bool,
    pub settings_pixelization: SettingsPixelization,
    pub settings_inversion: SettingsInversion,
}

impl Default for SettingsFit {
    fn default() -> Self {
        Self {
            use_hyper_scalings: true,
            settings_pixelization: SettingsPixelization::default(),
            settings_inversion: SettingsInversion::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_json() {
        let settings: SettingsFit = serde_json::from_str(
            r#"{"use_hyper_scalings": false, "settings_inversion": {"use_linear_operators": true}}"#,
        )
        .unwrap();
        assert!(!settings.use_hyper_scalings);
        assert!(settings.settings_inversion.use_linear_operators);
        assert!(settings.settings_pixelization.use_border);
    }

    #[test]
    fn schema_has_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(SettingsFit)).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("use_hyper_scalings").is_some());
        assert!(properties.get("settings_inversion").is_some());
    }
}
