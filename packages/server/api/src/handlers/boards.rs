use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use database::models::{Board, BoardItem};
use database::repositories::{BoardRepository, ItemRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ServiceError;
use crate::state::AppState;

const BOARD_LIST_LIMIT: i64 = 12;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/boards", get(list_boards).post(create_board))
        .route("/boards/:id", get(get_board))
}

#[derive(Serialize)]
pub struct BoardListResponse {
    pub boards: Vec<Board>,
}

async fn list_boards(
    State(state): State<AppState>,
) -> Result<Json<BoardListResponse>, ServiceError> {
    let boards = BoardRepository::new(state.db.pool.clone())
        .list_recent(BOARD_LIST_LIMIT)
        .await?;
    Ok(Json(BoardListResponse { boards }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Option<Uuid>,
}

async fn create_board(
    State(state): State<AppState>,
    Json(body): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), ServiceError> {
    if body.title.is_empty() || body.title.chars().count() > 120 {
        return Err(ServiceError::BadRequest(
            "title must be 1-120 characters".to_string(),
        ));
    }
    if let Some(description) = &body.description {
        if description.chars().count() > 400 {
            return Err(ServiceError::BadRequest(
                "description must be at most 400 characters".to_string(),
            ));
        }
    }

    let board = BoardRepository::new(state.db.pool.clone())
        .create(&body.title, body.description.as_deref(), body.owner_id)
        .await?;
    Ok((StatusCode::CREATED, Json(board)))
}

#[derive(Serialize)]
pub struct BoardDetailResponse {
    pub board: Board,
    pub items: Vec<BoardItem>,
}

async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BoardDetailResponse>, ServiceError> {
    let board = BoardRepository::new(state.db.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Not found".to_string()))?;

    let items = ItemRepository::new(state.db.pool.clone())
        .list_for_board(id)
        .await?;

    Ok(Json(BoardDetailResponse { board, items }))
}
