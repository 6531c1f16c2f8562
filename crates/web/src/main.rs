use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use web::config::Config;
use web::features::{calculator, formulas, score, submissions};
use web::middleware::auth::ApiKeys;
use web::{AppState, router};

#[derive(OpenApi)]
#[openapi(
    paths(
        score::handlers::calculate_score,
        calculator::handlers::required_weight,
        calculator::handlers::achievable_reps,
        calculator::handlers::day_max,
        formulas::handlers::list_formulas,
        formulas::handlers::get_formula,
        formulas::handlers::update_formula,
        submissions::handlers::get_leaderboard,
        submissions::handlers::create_submission,
    ),
    components(
        schemas(
            storage::dto::score::CalculateScoreRequest,
            storage::dto::score::CalculateScoreResponse,
            storage::dto::score::RequiredWeightRequest,
            storage::dto::score::AchievableRepsRequest,
            storage::dto::score::ReverseCalculationResponse,
            storage::dto::score::EffortPayload,
            storage::dto::score::DayMaxRequest,
            storage::dto::score::DayMaxResponse,
            storage::dto::formula::FormulaResponse,
            storage::dto::formula::UpdateFormulaRequest,
            storage::dto::submission::CreateSubmissionRequest,
            storage::dto::submission::SubmissionResponse,
            storage::dto::submission::LeaderboardEntry,
            storage::dto::submission::LeaderboardSort,
            storage::dto::common::PaginationMeta,
        )
    ),
    tags(
        (name = "score", description = "Score a performed lift"),
        (name = "calculator", description = "Reverse and training-session calculators"),
        (name = "formulas", description = "Community-fitted coefficient formulas"),
        (name = "submissions", description = "Community submissions and leaderboard"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting strength calculator API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        formula_version = config.formula_version.as_str(),
        "Configuration loaded successfully"
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("No API_KEYS configured; formula updates are disabled");
    }

    let state = AppState {
        db,
        formula_version: config.formula_version,
    };

    let app = router(state, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
