use axum::{routing::post, Json, Router};
use tracing::{info, instrument};

use crate::qr::dto::{GenerateRequest, GenerateResponse};
use crate::state::AppState;

/// Returned until a real encoder is wired in.
pub const QR_PLACEHOLDER: &str = "Placeholder for generated QR code in specified format.";

pub fn routes() -> Router<AppState> {
    Router::new().route("/qr/generate", post(generate))
}

/// Encoding is delegated to a renderer that is not integrated yet, so
/// every request currently yields the same placeholder payload.
#[instrument(skip(payload))]
pub async fn generate(Json(payload): Json<GenerateRequest>) -> Json<GenerateResponse> {
    info!(
        size = payload.size,
        error_correction = payload.error_correction.as_str(),
        output_format = payload.output_format.as_str(),
        "qr generation requested"
    );
    Json(GenerateResponse {
        qr_code: QR_PLACEHOLDER.to_string(),
    })
}
