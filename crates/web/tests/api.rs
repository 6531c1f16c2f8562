use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use scoring::FormulaVersion;
use serde_json::{Value, json};
use storage::Database;
use tower::ServiceExt;
use web::{AppState, middleware::auth::ApiKeys, router};

/// Router over a pool that never connects: every request here must be
/// answered before the database is touched.
fn app() -> Router {
    let db = Database::connect_lazy("postgres://nobody@127.0.0.1:1/unused").unwrap();
    let state = AppState {
        db,
        formula_version: FormulaVersion::Current,
    };
    router(state, ApiKeys::from_comma_separated("secret"))
}

async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn bench_score_needs_no_stored_formula() {
    let (status, body) = send(
        Method::POST,
        "/api/calculate-score",
        Some(json!({
            "gender": "Male",
            "bodyweight": 80,
            "added_weight": 200,
            "reps": 1,
            "exercise_type": "bench"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimated_1rm"], 200.0);
    assert!((body["final_score"].as_f64().unwrap() - 137.909).abs() < 0.01);
}

#[tokio::test]
async fn domain_errors_are_reported_verbatim() {
    let (status, body) = send(
        Method::POST,
        "/api/calculate-score",
        Some(json!({
            "gender": "Female",
            "bodyweight": 60,
            "added_weight": 50,
            "reps": 40,
            "exercise_type": "squat"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "reps out of range: 40 (must be between 1 and 36)"
    );
}

#[tokio::test]
async fn penalty_outside_form_range_is_rejected() {
    let (status, body) = send(
        Method::POST,
        "/api/calculate-score",
        Some(json!({
            "gender": "Male",
            "bodyweight": 80,
            "added_weight": 100,
            "reps": 3,
            "exercise_type": "squat",
            "form_quality": "Extreme_Cheat",
            "penalty_weight": 5
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("penalty"));
}

#[tokio::test]
async fn field_validation_fails_before_scoring() {
    let (status, body) = send(
        Method::POST,
        "/api/calculate-score",
        Some(json!({
            "gender": "Robot",
            "bodyweight": 5,
            "added_weight": 20,
            "reps": 5
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_fields_are_bad_requests() {
    let (status, _) = send(
        Method::POST,
        "/api/calculate-score",
        Some(json!({ "gender": "Male", "bodyweight": 70 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn required_weight_for_barbell() {
    let (status, body) = send(
        Method::POST,
        "/api/calculator/required-weight",
        Some(json!({
            "gender": "Male",
            "bodyweight": 80,
            "target_added_1rm": 150,
            "reps": 1,
            "exercise_type": "deadlift"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((body["computed_added_weight"].as_f64().unwrap() - 150.0).abs() < 1e-9);
    assert_eq!(body["computed_reps"], Value::Null);
}

#[tokio::test]
async fn achievable_reps_reports_whole_reps() {
    let (status, body) = send(
        Method::POST,
        "/api/calculator/achievable-reps",
        Some(json!({
            "gender": "Male",
            "bodyweight": 80,
            "target_added_1rm": 115.53729810293396,
            "added_weight": 100,
            "exercise_type": "squat"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["whole_reps"], 5);

    let (status, body) = send(
        Method::POST,
        "/api/calculator/achievable-reps",
        Some(json!({
            "gender": "Male",
            "bodyweight": 80,
            "target_added_1rm": 100,
            "added_weight": 120,
            "exercise_type": "squat"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("must be below target"));
}

#[tokio::test]
async fn day_max_blends_both_sets() {
    let (status, body) = send(
        Method::POST,
        "/api/calculator/day-max",
        Some(json!({
            "bodyweight": 70,
            "added_weight": 20,
            "sets": 5,
            "reps_per_set": 5,
            "rest": "long",
            "first_set": { "type": "rir", "value": 2 },
            "last_set": { "type": "achieved_reps", "value": 5 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let first = body["first_set_1rm"].as_f64().unwrap();
    let last = body["last_set_1rm"].as_f64().unwrap();
    let total = body["total_1rm"].as_f64().unwrap();
    assert!((total - (0.8 * first + 0.2 * last)).abs() < 1e-9);
    assert!((body["fatigue_availability"].as_f64().unwrap() - 0.9).abs() < 1e-12);
    assert!((body["added_1rm"].as_f64().unwrap() - (total - 70.0)).abs() < 1e-9);
}

#[tokio::test]
async fn day_max_without_efforts_is_insufficient() {
    let (status, body) = send(
        Method::POST,
        "/api/calculator/day-max",
        Some(json!({
            "bodyweight": 70,
            "added_weight": 20,
            "sets": 5,
            "reps_per_set": 5,
            "rest": "moderate"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("insufficient data"));
}

#[tokio::test]
async fn formula_update_requires_api_key() {
    let update = json!({
        "coeff_b": 0.001,
        "coeff_c": -0.2,
        "coeff_d": 15.0,
        "coeff_e": -400.0,
        "coeff_f": 5000.0,
        "total_submissions_used": 10
    });

    let (status, body) = send(Method::PUT, "/api/formulas/Male", Some(update)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn leaderboard_rejects_bad_filters() {
    let (status, body) = send(Method::GET, "/api/submissions?page_size=500", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("page_size"));

    let (status, _) = send(Method::GET, "/api/submissions?has_video=maybe", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(Method::GET, "/api/submissions?gender=robot", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown gender 'robot'");
}

#[tokio::test]
async fn day_max_penalty_checked_against_form_quality() {
    let (status, body) = send(
        Method::POST,
        "/api/calculator/day-max",
        Some(json!({
            "bodyweight": 70,
            "added_weight": 20,
            "form_quality": "Extreme_Cheat",
            "penalty_weight": 10,
            "sets": 3,
            "reps_per_set": 5,
            "rest": "long",
            "first_set": { "type": "rir", "value": 1 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("penalty 10 kg"));
}

#[tokio::test]
async fn submission_validation_runs_before_insert() {
    let (status, body) = send(
        Method::POST,
        "/api/submissions",
        Some(json!({
            "gender": "Male",
            "bodyweight": 75,
            "added_weight": 20,
            "reps": 37,
            "form_quality": "Competition",
            "exercise_type": "weighted_pullup"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
}
