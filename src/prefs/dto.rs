use serde::{Deserialize, Serialize};

use crate::prefs::repo_types::{Customization, ErrorCorrectionLevel, OutputFormat};

/// Wire form of a saved customization. Field names follow the public API
/// contract rather than Rust convention.
#[derive(Debug, Serialize)]
pub struct CustomizationSettings {
    pub size: i32,
    pub color: String,
    #[serde(rename = "errorCorrectionLevel")]
    pub error_correction_level: ErrorCorrectionLevel,
    pub format: Vec<OutputFormat>,
}

#[derive(Debug, Serialize)]
pub struct GetPreferencesResponse {
    #[serde(rename = "customizationPreferences")]
    pub customization_preferences: CustomizationSettings,
}

/// Request body for a preferences update. The format list replaces the
/// stored one wholesale, it is not merged.
#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub size: i32,
    pub color: String,
    #[serde(rename = "errorCorrection")]
    pub error_correction: ErrorCorrectionLevel,
    #[serde(rename = "outputFormat")]
    pub output_format: Vec<OutputFormat>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePreferencesResponse {
    pub success: bool,
    pub message: String,
}

impl From<Customization> for CustomizationSettings {
    fn from(c: Customization) -> Self {
        Self {
            size: c.size,
            color: c.color,
            error_correction_level: c.error_correction,
            format: c.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_response_uses_contract_field_names() {
        let response = GetPreferencesResponse {
            customization_preferences: CustomizationSettings {
                size: 300,
                color: "#FF0000".into(),
                error_correction_level: ErrorCorrectionLevel::Q,
                format: vec![OutputFormat::Svg, OutputFormat::Png],
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        let prefs = &json["customizationPreferences"];
        assert_eq!(prefs["size"], 300);
        assert_eq!(prefs["color"], "#FF0000");
        assert_eq!(prefs["errorCorrectionLevel"], "Q");
        assert_eq!(prefs["format"], serde_json::json!(["SVG", "PNG"]));
    }

    #[test]
    fn update_request_parses_contract_field_names() {
        let body = r##"{
            "size": 250,
            "color": "#00FF00",
            "errorCorrection": "H",
            "outputFormat": ["JPEG"]
        }"##;
        let req: UpdatePreferencesRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.size, 250);
        assert_eq!(req.error_correction, ErrorCorrectionLevel::H);
        assert_eq!(req.output_format, vec![OutputFormat::Jpeg]);
    }

    #[test]
    fn update_request_rejects_unknown_enum_values() {
        let body = r##"{
            "size": 250,
            "color": "#00FF00",
            "errorCorrection": "X",
            "outputFormat": ["SVG"]
        }"##;
        assert!(serde_json::from_str::<UpdatePreferencesRequest>(body).is_err());
    }
}
