use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::dimension::Dimension;
use crate::item::RecommendedItem;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("list title cannot be empty")]
    EmptyTitle,
    #[error("item {0} is already in the list")]
    DuplicateItem(u64),
}

/// What a list recommends. Decides which rating dimensions apply.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    #[default]
    Game,
    /// Manga and other illustrated works; covers come from outside Steam
    Manga,
}

impl ListKind {
    pub fn dimensions(self) -> &'static [Dimension] {
        match self {
            ListKind::Game => &[
                Dimension::Gameplay,
                Dimension::Visuals,
                Dimension::Story,
                Dimension::Subjective,
            ],
            ListKind::Manga => &[
                Dimension::Visuals,
                Dimension::Story,
                Dimension::Character,
                Dimension::Subjective,
            ],
        }
    }

    pub fn wire_code(self) -> char {
        match self {
            ListKind::Game => 'g',
            ListKind::Manga => 'm',
        }
    }

    /// Anything other than `'m'` is a game list, including a missing code.
    pub fn from_wire_code(code: Option<&str>) -> Self {
        match code {
            Some("m") => ListKind::Manga,
            _ => ListKind::Game,
        }
    }

    pub fn covers_reconstructible(self) -> bool {
        self == ListKind::Game
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationList {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub kind: ListKind,
    #[serde(default = "Utc::now", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<RecommendedItem>,
}

impl RecommendationList {
    pub fn new(title: impl Into<String>, kind: ListKind) -> Result<Self, ListError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ListError::EmptyTitle);
        }

        Ok(Self::with_identity(title, kind, Vec::new()))
    }

    /// Build a list with a fresh id and creation time around existing items.
    /// Used when a list arrives from elsewhere and must not collide with local ones.
    pub fn with_identity(title: String, kind: ListKind, items: Vec<RecommendedItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            kind,
            created_at: Utc::now(),
            items,
        }
    }

    pub fn rename(&mut self, title: impl Into<String>) -> Result<(), ListError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ListError::EmptyTitle);
        }
        self.title = title;
        Ok(())
    }

    pub fn add_item(&mut self, item: RecommendedItem) -> Result<(), ListError> {
        if self.item(item.id).is_some() {
            return Err(ListError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, id: u64) -> Option<RecommendedItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Apply `edit` to the item with `id`. Returns `false` if no such item exists.
    pub fn update_item<F>(&mut self, id: u64, edit: F) -> bool
    where
        F: FnOnce(&mut RecommendedItem),
    {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                edit(item);
                true
            }
            None => false,
        }
    }

    pub fn item(&self, id: u64) -> Option<&RecommendedItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_list() -> RecommendationList {
        let mut list = RecommendationList::new("2024 favourites", ListKind::Game).unwrap();
        list.add_item(RecommendedItem::steam(440, "Team Fortress 2", 90)).unwrap();
        list.add_item(RecommendedItem::steam(620, "Portal 2", 97)).unwrap();
        list
    }

    #[test]
    fn test_new_rejects_empty_title() {
        assert_eq!(RecommendationList::new("", ListKind::Game), Err(ListError::EmptyTitle));
        assert_eq!(RecommendationList::new("   ", ListKind::Manga), Err(ListError::EmptyTitle));
    }

    #[test]
    fn test_new_list_is_empty() {
        let list = RecommendationList::new("Empty", ListKind::Manga).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.kind, ListKind::Manga);
    }

    #[test]
    fn test_add_item_rejects_duplicates() {
        let mut list = create_list();
        let result = list.add_item(RecommendedItem::steam(440, "TF2 again", 10));
        assert_eq!(result, Err(ListError::DuplicateItem(440)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_item_preserves_order() {
        let mut list = create_list();
        list.add_item(RecommendedItem::steam(400, "Portal", 93)).unwrap();

        let removed = list.remove_item(620).unwrap();
        assert_eq!(removed.name, "Portal 2");
        let ids: Vec<u64> = list.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![440, 400]);

        assert!(list.remove_item(620).is_none());
    }

    #[test]
    fn test_update_item() {
        let mut list = create_list();
        assert!(list.update_item(620, |item| item.reason = Some("Best co-op".to_string())));
        assert_eq!(list.item(620).unwrap().reason.as_deref(), Some("Best co-op"));
        assert!(!list.update_item(1, |item| item.rating = 0));
    }

    #[test]
    fn test_rename() {
        let mut list = create_list();
        list.rename("Renamed").unwrap();
        assert_eq!(list.title, "Renamed");
        assert_eq!(list.rename(""), Err(ListError::EmptyTitle));
        assert_eq!(list.title, "Renamed");
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(ListKind::Game.wire_code(), 'g');
        assert_eq!(ListKind::Manga.wire_code(), 'm');
        assert_eq!(ListKind::from_wire_code(Some("m")), ListKind::Manga);
        assert_eq!(ListKind::from_wire_code(Some("g")), ListKind::Game);
        assert_eq!(ListKind::from_wire_code(Some("x")), ListKind::Game);
        assert_eq!(ListKind::from_wire_code(None), ListKind::Game);
    }

    #[test]
    fn test_deserialize_fills_identity() {
        let json = r#"{"title":"From a file","items":[{"id":1,"name":"A","rating":70}]}"#;
        let list: RecommendationList = serde_json::from_str(json).unwrap();
        assert_eq!(list.kind, ListKind::Game);
        assert_eq!(list.items[0].cover_url, "");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_created_at_is_epoch_millis() {
        let list = create_list();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["createdAt"].as_i64(), Some(list.created_at.timestamp_millis()));
        assert_eq!(json["kind"], "game");
    }
}
