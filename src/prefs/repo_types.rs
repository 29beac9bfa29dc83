use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// QR redundancy setting. Higher levels survive more damage at the cost
/// of payload capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrectionLevel {
    L,
    M,
    Q,
    H,
}

impl ErrorCorrectionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrectionLevel::L => "L",
            ErrorCorrectionLevel::M => "M",
            ErrorCorrectionLevel::Q => "Q",
            ErrorCorrectionLevel::H => "H",
        }
    }
}

impl FromStr for ErrorCorrectionLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(ErrorCorrectionLevel::L),
            "M" => Ok(ErrorCorrectionLevel::M),
            "Q" => Ok(ErrorCorrectionLevel::Q),
            "H" => Ok(ErrorCorrectionLevel::H),
            other => anyhow::bail!("unknown error correction level: {other}"),
        }
    }
}

/// Image formats a QR code can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "SVG",
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SVG" => Ok(OutputFormat::Svg),
            "PNG" => Ok(OutputFormat::Png),
            "JPEG" => Ok(OutputFormat::Jpeg),
            other => anyhow::bail!("unknown output format: {other}"),
        }
    }
}

/// Customization row as stored. Enum columns are plain text in Postgres
/// and parsed into the closed types on the way out.
#[derive(Debug, Clone, FromRow)]
pub struct CustomizationRow {
    pub id: Uuid,
    pub size: i32,
    pub color: String,
    pub error_correction: String,
    pub format: Vec<String>,
}

/// A user's saved QR rendering preferences.
#[derive(Debug, Clone)]
pub struct Customization {
    pub size: i32,
    pub color: String,
    pub error_correction: ErrorCorrectionLevel,
    pub format: Vec<OutputFormat>,
}

impl TryFrom<CustomizationRow> for Customization {
    type Error = anyhow::Error;

    fn try_from(row: CustomizationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            size: row.size,
            color: row.color,
            error_correction: row.error_correction.parse()?,
            format: row
                .format
                .iter()
                .map(|f| f.parse())
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
