use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Board {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The closed set of placeable element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "item_kind", rename_all = "lowercase")]
pub enum ItemKind {
    Image,
    Link,
    Color,
    Note,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Image => "image",
            ItemKind::Link => "link",
            ItemKind::Color => "color",
            ItemKind::Note => "note",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BoardItem {
    pub id: Uuid,
    pub board_id: Uuid,
    pub created_by: Option<Uuid>,
    pub kind: ItemKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub color_hex: Option<String>,
    pub meta: JsonValue,
    pub pos_x: f64,
    pub pos_y: f64,
    pub rotation: f64,
    pub z_index: i32,
    /// Written by the server on every create; never accepted from clients.
    pub embedding: Option<Vector>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to insert a `board_item` row in one statement,
/// embedding included.
#[derive(Debug, Clone)]
pub struct NewBoardItem {
    pub board_id: Uuid,
    pub created_by: Option<Uuid>,
    pub kind: ItemKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub color_hex: Option<String>,
    pub meta: JsonValue,
    pub pos_x: f64,
    pub pos_y: f64,
    pub rotation: f64,
    pub z_index: i32,
    /// Vector literal in the store's `[c1,c2,...]` input syntax.
    pub embedding: String,
}

/// A partial update for a `board_item` row. Outer `None` = field untouched;
/// inner `None` (title/description) = set the column to NULL.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub title: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
    /// Recomputed vector literal, set only when the patch touches the text
    /// fields and the resulting text is non-empty.
    pub embedding: Option<String>,
}

impl ItemChanges {
    /// True when the patch addresses no known column. The embedding is
    /// derived state and never makes a patch non-empty on its own.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.pos_x.is_none()
            && self.pos_y.is_none()
            && self.rotation.is_none()
            && self.z_index.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tokens_match_wire_format() {
        assert_eq!(ItemKind::Image.as_str(), "image");
        assert_eq!(ItemKind::Note.as_str(), "note");
        let parsed: ItemKind = serde_json::from_str("\"color\"").unwrap();
        assert_eq!(parsed, ItemKind::Color);
    }

    #[test]
    fn empty_changes_ignore_embedding() {
        let changes = ItemChanges {
            embedding: Some("[0,0]".to_string()),
            ..ItemChanges::default()
        };
        assert!(changes.is_empty());

        let changes = ItemChanges {
            pos_x: Some(10.0),
            ..ItemChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
