//! Item mutation pipeline. Whatever else a write changes, the stored
//! embedding has to stay consistent with the item's text fields, and the
//! fields + embedding must land in a single atomic statement.

use database::models::{BoardItem, ItemChanges, ItemKind, NewBoardItem};
use database::repositories::ItemRepository;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::search::{codec, embedding};

/// Already-validated fields for a new item. Validation (kind enum, length
/// bounds, URL/color shape) happens in the handlers before this layer.
#[derive(Debug, Clone)]
pub struct NewItemInput {
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
    pub created_by: Option<Uuid>,
}

/// Client-suppliable subset of an item. Outer `None` = not part of the
/// patch; inner `None` on the text fields = clear the column.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.pos_x.is_none()
            && self.pos_y.is_none()
            && self.rotation.is_none()
            && self.z_index.is_none()
    }
}

#[derive(Debug)]
pub enum ItemUpdate {
    /// Patch addressed no known field; nothing was written.
    Noop,
    Updated(BoardItem),
    /// No row for the board+item pair.
    NotFound,
}

/// Title and description joined by a single space, trimmed.
pub fn derived_text(title: Option<&str>, description: Option<&str>) -> String {
    format!("{} {}", title.unwrap_or(""), description.unwrap_or(""))
        .trim()
        .to_string()
}

/// What a freshly created item gets embedded from: its derived text, or its
/// kind token when the item carries no text at all. Every item therefore
/// has an embedding from the moment it exists.
pub fn embedding_source(kind: ItemKind, title: Option<&str>, description: Option<&str>) -> String {
    let text = derived_text(title, description);
    if text.is_empty() {
        kind.as_str().to_string()
    } else {
        text
    }
}

pub async fn create_item(
    repo: &ItemRepository,
    board_id: Uuid,
    input: NewItemInput,
) -> sqlx::Result<BoardItem> {
    let source = embedding_source(input.kind, input.title.as_deref(), input.description.as_deref());
    let embedding = codec::encode(&embedding::embed(&source));

    repo.create(&NewBoardItem {
        board_id,
        created_by: input.created_by,
        kind: input.kind,
        title: input.title,
        description: input.description,
        content_url: input.content_url,
        color_hex: input.color_hex,
        meta: input.meta,
        pos_x: input.pos_x,
        pos_y: input.pos_y,
        rotation: input.rotation,
        z_index: input.z_index,
        embedding,
    })
    .await
}

/// Turns a patch into the column changes to apply, recomputing the
/// embedding only from the patch's own text fields (absent fields count as
/// empty - prior stored values are not consulted). A patch that empties the
/// derived text leaves the old embedding in place rather than clearing it.
pub fn plan_changes(patch: ItemPatch) -> ItemChanges {
    let embedding = recomputed_embedding(&patch);
    ItemChanges {
        title: patch.title,
        description: patch.description,
        pos_x: patch.pos_x,
        pos_y: patch.pos_y,
        rotation: patch.rotation,
        z_index: patch.z_index,
        embedding,
    }
}

fn recomputed_embedding(patch: &ItemPatch) -> Option<String> {
    let title = patch.title.as_ref().and_then(|t| t.as_deref());
    let description = patch.description.as_ref().and_then(|d| d.as_deref());
    let text = derived_text(title, description);
    if text.is_empty() {
        None
    } else {
        Some(codec::encode(&embedding::embed(&text)))
    }
}

pub async fn update_item(
    repo: &ItemRepository,
    board_id: Uuid,
    item_id: Uuid,
    patch: ItemPatch,
) -> sqlx::Result<ItemUpdate> {
    if patch.is_empty() {
        return Ok(ItemUpdate::Noop);
    }
    let changes = plan_changes(patch);
    match repo.update(board_id, item_id, &changes).await? {
        Some(item) => Ok(ItemUpdate::Updated(item)),
        None => Ok(ItemUpdate::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::search::{codec, embedding};

    #[test]
    fn derived_text_joins_and_trims() {
        assert_eq!(derived_text(Some("Amber haze"), None), "Amber haze");
        assert_eq!(derived_text(None, Some("muted blues")), "muted blues");
        assert_eq!(
            derived_text(Some("Amber"), Some("haze")),
            "Amber haze"
        );
        assert_eq!(derived_text(Some("  "), Some("")), "");
        assert_eq!(derived_text(None, None), "");
    }

    #[test]
    fn textless_items_embed_their_kind_token() {
        let source = embedding_source(ItemKind::Note, None, None);
        assert_eq!(source, "note");
        assert_eq!(embedding::embed(&source), embedding::embed("note"));

        // Whitespace-only text also falls back
        assert_eq!(
            embedding_source(ItemKind::Color, Some("  "), None),
            "color"
        );
    }

    #[test]
    fn titled_items_embed_their_text() {
        let source = embedding_source(ItemKind::Image, Some("Amber haze"), Some(""));
        assert_eq!(source, "Amber haze");
    }

    #[test]
    fn position_patches_never_recompute() {
        let changes = plan_changes(ItemPatch {
            pos_x: Some(120.0),
            pos_y: Some(-14.5),
            ..ItemPatch::default()
        });
        assert!(changes.embedding.is_none());
        assert_eq!(changes.pos_x, Some(120.0));
        assert!(changes.title.is_none());
    }

    #[test]
    fn title_patches_recompute() {
        let changes = plan_changes(ItemPatch {
            title: Some(Some("Sunset over water".to_string())),
            ..ItemPatch::default()
        });
        let expected = codec::encode(&embedding::embed("Sunset over water"));
        assert_eq!(changes.embedding.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn clearing_all_text_keeps_the_old_embedding() {
        // title -> NULL with no description in the patch: the column is
        // cleared but the embedding is deliberately left as it was.
        let changes = plan_changes(ItemPatch {
            title: Some(None),
            ..ItemPatch::default()
        });
        assert_eq!(changes.title, Some(None));
        assert!(changes.embedding.is_none());

        let changes = plan_changes(ItemPatch {
            title: Some(Some(String::new())),
            description: Some(None),
            ..ItemPatch::default()
        });
        assert!(changes.embedding.is_none());
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ItemPatch::default().is_empty());
        assert!(!ItemPatch {
            z_index: Some(3),
            ..ItemPatch::default()
        }
        .is_empty());
    }
}
