use crate::handlers;
use crate::state::AppState;
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::boards::router())
        .merge(handlers::items::router())
        .merge(handlers::search::router())
}
