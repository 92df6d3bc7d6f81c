#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the e-waste bin recommender.
//!
//! A client posts a free-text description of a waste item together with
//! its coordinates to `/analyze`. The server classifies the text and
//! returns the nearest bin accepting that category. The bin registry and
//! the text model are loaded once at startup; a missing or corrupt
//! artifact degrades the responses instead of stopping the server.

pub mod config;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use ewaste_bins::BinRegistry;
use ewaste_classifier::WasteClassifier;

pub use config::ServerConfig;
pub use handlers::analyze_waste;

/// Shared application state. Immutable after startup.
pub struct AppState {
    /// Category -> bin index registry.
    pub registry: Arc<BinRegistry>,
    /// Text classification adapter.
    pub classifier: Arc<WasteClassifier>,
}

impl AppState {
    /// Loads the registry and text model from the configured paths.
    #[must_use]
    pub fn load(config: &ServerConfig) -> Self {
        Self {
            registry: Arc::new(BinRegistry::load(&config.registry_path)),
            classifier: Arc::new(WasteClassifier::load(&config.model_path)),
        }
    }
}

/// Registers the API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::home))
        .route("/analyze", web::post().to(handlers::analyze))
        .service(web::scope("/api").route("/health", web::get().to(handlers::health)));
}

/// Starts the API server.
///
/// Loads the bin registry and text model, then runs the Actix-Web HTTP
/// server until shutdown. The caller is responsible for initializing
/// logging and providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState::load(&config));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use ewaste_bins_models::{BinRecord, FALLBACK_BIN_NAME, Recommendation};
    use ewaste_classifier::train::{DEFAULT_ALPHA, LabeledText, train};
    use ewaste_server_models::{
        AnalyzeForm, AnalyzeResponse, ApiHealth, EMPTY_TEXT_MESSAGE, UNIDENTIFIED_MESSAGE,
    };

    use super::*;

    fn labeled(text: &str, label: &str) -> LabeledText {
        LabeledText {
            text: text.to_string(),
            label: label.to_string(),
        }
    }

    fn state() -> web::Data<AppState> {
        let registry = BinRegistry::from_records(vec![
            BinRecord {
                bin_id: 1,
                address: "Central Dump".to_string(),
                latitude: 28.6139,
                longitude: 77.2090,
                category: "Battery".to_string(),
            },
            BinRecord {
                bin_id: 2,
                address: "Karol Bagh Depot".to_string(),
                latitude: 28.6519,
                longitude: 77.1909,
                category: "Battery".to_string(),
            },
        ])
        .unwrap();

        // "Screens" is classifiable but has no bins.
        let model = train(
            &[
                labeled("swollen lithium battery", "Battery"),
                labeled("dead phone battery", "Battery"),
                labeled("cracked laptop screen", "Screens"),
                labeled("broken monitor screen", "Screens"),
            ],
            DEFAULT_ALPHA,
        )
        .unwrap();

        web::Data::new(AppState {
            registry: Arc::new(registry),
            classifier: Arc::new(WasteClassifier::new(model)),
        })
    }

    fn form(text: &str, lat: f64, lng: f64) -> AnalyzeForm {
        AnalyzeForm {
            text: text.to_string(),
            lat,
            lng,
        }
    }

    #[::core::prelude::v1::test]
    fn shared_state_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BinRegistry>();
        assert_send_sync::<WasteClassifier>();
        assert_send_sync::<AppState>();
    }

    #[actix_web::test]
    async fn home_reports_liveness() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "♻️ Smart E-Waste Backend is Live (Text Mode)!");
    }

    #[actix_web::test]
    async fn health_reports_loaded_artifacts() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(health.healthy);
        assert_eq!(health.categories, 1);
        assert!(health.classifier_loaded);
    }

    #[actix_web::test]
    async fn analyze_returns_the_nearest_bin() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_form(form("my battery is swollen", 28.6139, 77.2090))
            .to_request();

        let response: AnalyzeResponse = test::call_and_read_body_json(&app, req).await;
        let AnalyzeResponse::Success {
            classification,
            recommendation,
        } = response
        else {
            panic!("expected success, got {response:?}");
        };

        assert_eq!(classification.final_category, "Battery");
        let bin = recommendation.as_found().unwrap();
        assert_eq!(bin.bin_id, 1);
        assert!(bin.distance_km.abs() < f64::EPSILON);
    }

    #[actix_web::test]
    async fn analyze_defaults_coordinates() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_form([("text", "dead battery")])
            .to_request();

        let response: AnalyzeResponse = test::call_and_read_body_json(&app, req).await;
        let AnalyzeResponse::Success { recommendation, .. } = response else {
            panic!("expected success, got {response:?}");
        };
        assert_eq!(recommendation.as_found().unwrap().name, "Central Dump");
    }

    #[actix_web::test]
    async fn analyze_falls_back_for_categories_without_bins() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_form(form("cracked screen", 28.6, 77.2))
            .to_request();

        let response: AnalyzeResponse = test::call_and_read_body_json(&app, req).await;
        let AnalyzeResponse::Success { recommendation, .. } = response else {
            panic!("expected success, got {response:?}");
        };
        let Recommendation::Fallback(fallback) = recommendation else {
            panic!("expected fallback, got {recommendation:?}");
        };
        assert_eq!(fallback.bin_name, FALLBACK_BIN_NAME);
    }

    #[actix_web::test]
    async fn analyze_rejects_blank_text() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_form(form("   ", 28.6, 77.2))
            .to_request();

        let response: AnalyzeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(response, AnalyzeResponse::error(EMPTY_TEXT_MESSAGE));
    }

    #[actix_web::test]
    async fn analyze_stops_on_unknown_classification() {
        let state = web::Data::new(AppState {
            registry: Arc::new(BinRegistry::empty()),
            classifier: Arc::new(WasteClassifier::unavailable()),
        });
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_form(form("swollen battery", 28.6, 77.2))
            .to_request();

        let response: AnalyzeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(response, AnalyzeResponse::error(UNIDENTIFIED_MESSAGE));
    }

    #[actix_web::test]
    async fn analyze_requires_text() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_form([("lat", "28.6")])
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
