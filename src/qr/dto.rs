use serde::{Deserialize, Serialize};

use crate::prefs::repo_types::{ErrorCorrectionLevel, OutputFormat};

/// Request body for QR generation. `data` is the arbitrary payload to
/// encode; the rest mirrors the preference schema.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub data: String,
    pub size: i32,
    pub color: String,
    pub error_correction: ErrorCorrectionLevel,
    pub output_format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub qr_code: String,
}
