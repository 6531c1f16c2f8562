//! HTTP API for the weighted calisthenics strength calculator.

use axum::{Router, extract::FromRef};
use scoring::FormulaVersion;
use storage::Database;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

use middleware::auth::ApiKeys;

/// Shared handler state. The formula version travels with every request
/// instead of living in a global.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub formula_version: FormulaVersion,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for FormulaVersion {
    fn from_ref(state: &AppState) -> Self {
        state.formula_version
    }
}

pub fn router(state: AppState, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(features::score::routes::routes())
        .nest("/calculator", features::calculator::routes::routes())
        .nest("/formulas", features::formulas::routes::routes(api_keys))
        .nest("/submissions", features::submissions::routes::routes());

    Router::new()
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}
