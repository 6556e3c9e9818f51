use axum::Json;
use serde::Serialize;

use vitalguard_core::models::vitals::{VitalBounds, VitalSigns};

#[derive(Serialize)]
pub struct BoundsResponse {
    pub bounds: VitalBounds,
    pub defaults: VitalSigns,
}

/// Slider ranges and starting values for the dashboard controls.
pub async fn bounds() -> Json<BoundsResponse> {
    Json(BoundsResponse {
        bounds: VitalBounds::STANDARD,
        defaults: VitalSigns::default(),
    })
}
