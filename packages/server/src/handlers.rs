//! HTTP handler functions for the e-waste recommender API.

use actix_web::{HttpResponse, web};
use ewaste_server_models::{
    AnalyzeForm, AnalyzeResponse, ApiHealth, ApiHome, EMPTY_TEXT_MESSAGE, UNIDENTIFIED_MESSAGE,
};

use crate::AppState;

/// `GET /`
pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(ApiHome {
        message: "♻️ Smart E-Waste Backend is Live (Text Mode)!".to_string(),
    })
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        categories: state.registry.len(),
        classifier_loaded: state.classifier.is_loaded(),
    })
}

/// `POST /analyze`
///
/// Classifies the description and, unless it is unidentifiable, looks up
/// the nearest bin for the predicted category.
pub async fn analyze(state: web::Data<AppState>, form: web::Form<AnalyzeForm>) -> HttpResponse {
    HttpResponse::Ok().json(analyze_waste(&state, &form))
}

/// Runs classification followed by the bin lookup.
#[must_use]
pub fn analyze_waste(state: &AppState, form: &AnalyzeForm) -> AnalyzeResponse {
    log::info!("Received text: {}", form.text);

    if form.text.trim().is_empty() {
        return AnalyzeResponse::error(EMPTY_TEXT_MESSAGE);
    }

    let classification = state.classifier.classify(&form.text);
    if classification.is_unknown() {
        return AnalyzeResponse::error(UNIDENTIFIED_MESSAGE);
    }

    log::info!(
        "Finding bin for {} near {}, {}",
        classification.final_category,
        form.lat,
        form.lng
    );
    let recommendation =
        state
            .registry
            .find_nearest_bin(&classification.final_category, form.lat, form.lng);

    AnalyzeResponse::Success {
        classification,
        recommendation,
    }
}
