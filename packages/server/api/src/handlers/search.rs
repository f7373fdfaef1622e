use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ServiceError;
use crate::services::search::engine::{self, SearchHit};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search_handler))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: String,
    pub board_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ServiceError> {
    if params.q.is_empty() {
        return Err(ServiceError::BadRequest(
            "q must not be empty".to_string(),
        ));
    }

    let results = engine::hybrid_search(&state.db.pool, &params.q, params.board_id).await?;
    Ok(Json(SearchResponse { results }))
}
