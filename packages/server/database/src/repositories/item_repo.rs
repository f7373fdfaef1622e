use crate::models::{BoardItem, ItemChanges, NewBoardItem};
use sqlx::{PgPool, Postgres, QueryBuilder, Result};
use uuid::Uuid;

/// Explicit column list: `search_tsv` stays inside the database (no Rust
/// representation for tsvector), so `SELECT *` is not an option here.
pub(crate) const ITEM_COLUMNS: &str = "id, board_id, created_by, kind, title, description, \
     content_url, color_hex, meta, pos_x, pos_y, rotation, z_index, embedding, \
     created_at, updated_at";

pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Items of one board in stacking order.
    pub async fn list_for_board(&self, board_id: Uuid) -> Result<Vec<BoardItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM board_item WHERE board_id = $1 ORDER BY z_index ASC"
        );
        sqlx::query_as::<_, BoardItem>(&sql)
            .bind(board_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Inserts the row and its embedding as one atomic write, so no reader
    /// ever observes the text fields without their vector.
    pub async fn create(&self, new: &NewBoardItem) -> Result<BoardItem> {
        let sql = format!(
            r#"
            INSERT INTO board_item
                (board_id, created_by, kind, title, description, content_url,
                 color_hex, meta, pos_x, pos_y, rotation, z_index, embedding)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13::vector)
            RETURNING {ITEM_COLUMNS}
            "#
        );
        sqlx::query_as::<_, BoardItem>(&sql)
            .bind(new.board_id)
            .bind(new.created_by)
            .bind(new.kind)
            .bind(&new.title)
            .bind(&new.description)
            .bind(&new.content_url)
            .bind(&new.color_hex)
            .bind(&new.meta)
            .bind(new.pos_x)
            .bind(new.pos_y)
            .bind(new.rotation)
            .bind(new.z_index)
            .bind(&new.embedding)
            .fetch_one(&self.pool)
            .await
    }

    /// Applies only the supplied fields; the embedding (when present in
    /// `changes`) rides along in the same statement. Returns `None` when no
    /// row matches the board+item pair.
    pub async fn update(
        &self,
        board_id: Uuid,
        item_id: Uuid,
        changes: &ItemChanges,
    ) -> Result<Option<BoardItem>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE board_item SET ");
        {
            let mut fields = qb.separated(", ");
            if let Some(title) = &changes.title {
                fields.push("title = ");
                fields.push_bind_unseparated(title.clone());
            }
            if let Some(description) = &changes.description {
                fields.push("description = ");
                fields.push_bind_unseparated(description.clone());
            }
            if let Some(pos_x) = changes.pos_x {
                fields.push("pos_x = ");
                fields.push_bind_unseparated(pos_x);
            }
            if let Some(pos_y) = changes.pos_y {
                fields.push("pos_y = ");
                fields.push_bind_unseparated(pos_y);
            }
            if let Some(rotation) = changes.rotation {
                fields.push("rotation = ");
                fields.push_bind_unseparated(rotation);
            }
            if let Some(z_index) = changes.z_index {
                fields.push("z_index = ");
                fields.push_bind_unseparated(z_index);
            }
            if let Some(embedding) = &changes.embedding {
                fields.push("embedding = ");
                fields.push_bind_unseparated(embedding.clone());
                fields.push_unseparated("::vector");
            }
            fields.push("updated_at = now()");
        }
        qb.push(" WHERE board_id = ");
        qb.push_bind(board_id);
        qb.push(" AND id = ");
        qb.push_bind(item_id);
        qb.push(" RETURNING ");
        qb.push(ITEM_COLUMNS);

        qb.build_query_as::<BoardItem>()
            .fetch_optional(&self.pool)
            .await
    }
}
