use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post, put};
use axum::Router;
use provider_advisor::catalog::fixture::FixtureCatalog;
use provider_advisor::config::AppConfig;
use provider_advisor::repo::providers_repo::ProvidersRepo;
use provider_advisor::repo::runs_repo::RunsRepo;
use provider_advisor::repo::weights_repo::WeightsRepo;
use provider_advisor::service::advisor_service::AdvisorService;
use provider_advisor::service::config_cache::ConfigCache;
use provider_advisor::AppState;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let providers_repo = ProvidersRepo { pool: pool.clone() };
    let runs_repo = RunsRepo { pool: pool.clone() };
    let weights_repo = WeightsRepo { pool: pool.clone() };
    let config_cache = ConfigCache::new(
        weights_repo.clone(),
        std::time::Duration::from_secs(cfg.weights_cache_ttl_secs),
    );

    // Fail fast on a bad weight vector instead of serving runs that will all
    // error out.
    config_cache.scoring_weights().await?;

    let advisor_service = AdvisorService {
        runs_repo,
        config_cache,
    };

    let state = AppState {
        advisor_service,
        providers_repo,
        weights_repo,
        fixture: FixtureCatalog,
        pool,
    };

    let admin_key = cfg.internal_api_key.clone();
    let admin_routes = Router::new()
        .route(
            "/providers/:provider_id",
            patch(provider_advisor::http::handlers::providers::update_provider),
        )
        .route(
            "/scoring/weights",
            put(provider_advisor::http::handlers::weights::put_weights),
        )
        .layer(from_fn_with_state(
            admin_key,
            provider_advisor::http::middleware::admin_auth::require_internal_api_key,
        ));

    let app = Router::new()
        .route(
            "/health",
            get(provider_advisor::http::handlers::recommendations::health),
        )
        .route(
            "/recommendations",
            post(provider_advisor::http::handlers::recommendations::create_run),
        )
        .route(
            "/recommendations/:run_id",
            get(provider_advisor::http::handlers::recommendations::get_run),
        )
        .route(
            "/compare",
            post(provider_advisor::http::handlers::compare::compare),
        )
        .route(
            "/providers",
            get(provider_advisor::http::handlers::providers::list_providers),
        )
        .route(
            "/scoring/weights",
            get(provider_advisor::http::handlers::weights::get_weights),
        )
        .route(
            "/scoring/debug",
            post(provider_advisor::http::handlers::scoring_debug::scoring_debug),
        )
        .route(
            "/ops/readiness",
            get(provider_advisor::http::handlers::ops::readiness),
        )
        .route(
            "/ops/liveness",
            get(provider_advisor::http::handlers::ops::liveness),
        )
        .merge(admin_routes)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
