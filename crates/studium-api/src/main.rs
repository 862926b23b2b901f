//! studium-api - HTTP API server for the studium backend.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Request;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use studium_api::{AppState, GenerationService, PlainTextExtractor};
use studium_db::{init_schema, Database};
use studium_inference::OpenAiBackend;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "studium_api=debug,studium_db=debug,studium_inference=debug,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("STUDIUM_DATABASE_URL").unwrap_or_else(|_| "sqlite://studium.db".to_string());
    let db = Database::connect(&database_url).await?;
    init_schema(&db.pool).await?;

    // External capabilities are constructed here, once, and injected; the
    // generation logic never owns a client of its own.
    let provider = Arc::new(OpenAiBackend::from_env()?);
    let state = AppState {
        generation: GenerationService::new(db.clone(), provider),
        db,
        extractor: Arc::new(PlainTextExtractor),
        verifier: Arc::new(studium_api::auth::StaticTokenVerifier::from_env()),
    };

    let app = studium_api::router(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr: SocketAddr = std::env::var("STUDIUM_BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()?;
    info!(subsystem = "api", %addr, "Starting studium-api");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
