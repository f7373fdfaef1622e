use axum::{extract::State, http, routing::get, Json, Router};
use database::Database;
use dotenv::dotenv;
use serde_json::json;
use std::net::SocketAddr;

use moodboard_api::router;
use moodboard_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load Config
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4000);
    let allow_origin =
        std::env::var("ALLOW_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

    // Connect to Database (Returns Arc<Database>)
    let db = Database::connect(&database_url).await?;

    // Run Migrations
    db.migrate().await?;

    let state = AppState { db };

    // Setup CORS
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(allow_origin.parse::<http::HeaderValue>()?)
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PATCH,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE]);

    // Setup Router
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(router::routes())
        .layer(cors)
        .with_state(state);

    // Start Server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Moodboard API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    match state.db.health_check().await {
        Ok(_) => Json(json!({ "status": "ok", "database": "connected" })),
        Err(e) => Json(json!({ "status": "error", "database": e.to_string() })),
    }
}
