use crate::models::Board;
use sqlx::{PgPool, Result};
use uuid::Uuid;

pub struct BoardRepository {
    pool: PgPool,
}

impl BoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recently created boards, newest first.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Board>> {
        sqlx::query_as::<_, Board>(
            "SELECT * FROM board ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>> {
        sqlx::query_as::<_, Board>("SELECT * FROM board WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        owner_id: Option<Uuid>,
    ) -> Result<Board> {
        sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO board (title, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }
}
