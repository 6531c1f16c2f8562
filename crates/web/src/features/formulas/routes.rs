use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::handlers::{get_formula, list_formulas, update_formula};
use crate::AppState;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:gender", put(update_formula))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_formulas))
        .route("/:gender", get(get_formula))
        .merge(protected)
}
