use database::models::BoardItem;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{codec, embedding};

/// Hard cap on hybrid search results. No pagination; callers that want more
/// context narrow the query instead.
pub const RESULT_LIMIT: i64 = 12;

#[derive(Debug, FromRow, Serialize)]
pub struct SearchHit {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub item: BoardItem,
    /// Full-text relevance, higher is better.
    pub rank: Option<f32>,
    /// Cosine distance to the query vector, lower is better.
    pub distance: Option<f64>,
}

/// One read against the store combining both signals.
///
/// Candidates either match the plain-text query parser or carry an
/// embedding, so purely semantic neighbors can surface without a lexical
/// hit. The ordering is a three-tier composite key - lexical matches always
/// outrank vector-only ones, full-text rank decides within the lexical
/// tier, vector distance decides the rest. The two scores live on
/// incomparable scales (unbounded rank vs. normalized distance), which is
/// why they are never blended into a single number.
pub async fn hybrid_search(
    pool: &PgPool,
    query: &str,
    board_id: Option<Uuid>,
) -> sqlx::Result<Vec<SearchHit>> {
    let vector = codec::encode(&embedding::embed(query));

    sqlx::query_as::<_, SearchHit>(
        r#"
        SELECT bi.id, bi.board_id, bi.created_by, bi.kind, bi.title, bi.description,
               bi.content_url, bi.color_hex, bi.meta, bi.pos_x, bi.pos_y, bi.rotation,
               bi.z_index, bi.embedding, bi.created_at, bi.updated_at,
               ts_rank(bi.search_tsv, plainto_tsquery('english', $2)) AS rank,
               (bi.embedding <=> $3::vector) AS distance
        FROM board_item bi
        WHERE ($1::uuid IS NULL OR bi.board_id = $1)
          AND (bi.search_tsv @@ plainto_tsquery('english', $2) OR bi.embedding IS NOT NULL)
        ORDER BY (bi.search_tsv @@ plainto_tsquery('english', $2)) DESC,
                 rank DESC NULLS LAST,
                 distance ASC NULLS LAST
        LIMIT $4
        "#,
    )
    .bind(board_id)
    .bind(query)
    .bind(vector)
    .bind(RESULT_LIMIT)
    .fetch_all(pool)
    .await
}
