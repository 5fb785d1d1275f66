//! Wire shapes of a share token before compression.
//!
//! Two shapes exist in the wild and neither carries a version field:
//! the compact shape (one or two letter keys, falsy fields omitted) and the
//! legacy shape (full field names, `games` instead of `g`, no kind).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use share_list_models::{
    steam_header_url, Dimension, ListKind, RecommendationList, RecommendedItem, SubRatings,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireShape {
    Compact,
    Legacy,
    Unrecognized,
}

impl WireShape {
    /// Probe a parsed payload for the keys each shape is known by.
    pub fn detect(payload: &Value) -> Self {
        let has_text = |key: &str| {
            payload
                .get(key)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty())
        };
        let has_array = |key: &str| payload.get(key).is_some_and(Value::is_array);

        if has_text("title") && has_array("games") {
            WireShape::Legacy
        } else if has_text("t") && has_array("g") {
            WireShape::Compact
        } else {
            WireShape::Unrecognized
        }
    }
}

fn nonzero_u8(value: Option<u8>) -> Option<u8> {
    value.filter(|v| *v != 0)
}

fn cover_or_default(cover: Option<String>, id: u64, kind: ListKind) -> String {
    match cover.filter(|c| !c.is_empty()) {
        Some(cover) => cover,
        None if kind.covers_reconstructible() => steam_header_url(id),
        None => String::new(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompactList {
    pub t: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp: Option<String>,
    pub g: Vec<CompactItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompactItem {
    pub i: u64,
    pub n: String,
    pub r: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rg: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rv: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rs: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rj: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rc: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<String>,
    /// Positions in `Dimension::WIRE_ORDER`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sk: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt: Option<u32>,
}

impl CompactList {
    pub fn from_list(list: &RecommendationList) -> Self {
        Self {
            t: list.title.clone(),
            tp: Some(list.kind.wire_code().to_string()),
            g: list
                .items
                .iter()
                .map(|item| CompactItem::from_item(item, list.kind))
                .collect(),
        }
    }

    /// Identity (`id`, `created_at`) is not on the wire; the result gets a fresh one.
    pub fn into_list(self) -> RecommendationList {
        let kind = ListKind::from_wire_code(self.tp.as_deref());
        let items = self.g.into_iter().map(|item| item.into_item(kind)).collect();
        RecommendationList::with_identity(self.t, kind, items)
    }
}

impl CompactItem {
    pub fn from_item(item: &RecommendedItem, kind: ListKind) -> Self {
        let ratings = &item.ratings;
        let skipped: Vec<i64> = item
            .skipped_dimensions
            .iter()
            .map(|d| i64::from(d.wire_index()))
            .collect();

        Self {
            i: item.id,
            n: item.name.clone(),
            r: item.rating,
            rg: nonzero_u8(ratings.gameplay),
            rv: nonzero_u8(ratings.visuals),
            rs: nonzero_u8(ratings.story),
            rj: nonzero_u8(ratings.subjective),
            rc: nonzero_u8(ratings.character),
            tg: Some(item.tags.clone()).filter(|t| !t.is_empty()),
            // Steam covers are rebuilt from the id on the other side
            cv: Some(item.cover_url.clone())
                .filter(|c| kind == ListKind::Manga && !c.is_empty()),
            sk: Some(skipped).filter(|s| !s.is_empty()),
            c: item.reason.clone().filter(|r| !r.is_empty()),
            pt: item.playtime_minutes.filter(|m| *m != 0),
        }
    }

    pub fn into_item(self, kind: ListKind) -> RecommendedItem {
        let skipped_dimensions = self
            .sk
            .unwrap_or_default()
            .into_iter()
            .filter_map(|i| u8::try_from(i).ok())
            .filter_map(Dimension::from_wire_index)
            .collect();

        RecommendedItem {
            id: self.i,
            name: self.n,
            cover_url: cover_or_default(self.cv, self.i, kind),
            rating: self.r,
            ratings: SubRatings {
                gameplay: self.rg,
                visuals: self.rv,
                story: self.rs,
                subjective: self.rj,
                character: self.rc,
            },
            skipped_dimensions,
            tags: self.tg.unwrap_or_default(),
            reason: self.c,
            playtime_minutes: self.pt,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyList {
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub games: Vec<LegacyItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub rating_gameplay: Option<u8>,
    #[serde(default)]
    pub rating_visuals: Option<u8>,
    #[serde(default)]
    pub rating_story: Option<u8>,
    #[serde(default)]
    pub rating_subjective: Option<u8>,
    #[serde(default)]
    pub rating_character: Option<u8>,
    #[serde(default, deserialize_with = "share_list_models::dimension::deserialize_lenient")]
    pub skipped_ratings: Vec<Dimension>,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub playtime: Option<u32>,
}

impl LegacyList {
    /// Lists from before manga support carry no kind and are game lists.
    pub fn into_list(self) -> RecommendationList {
        let kind = match self.kind.as_deref() {
            Some("manga") => ListKind::Manga,
            _ => ListKind::Game,
        };
        let items = self
            .games
            .into_iter()
            .map(|game| RecommendedItem {
                id: game.id,
                name: game.name,
                cover_url: cover_or_default(game.cover_url, game.id, kind),
                rating: game.rating,
                ratings: SubRatings {
                    gameplay: game.rating_gameplay,
                    visuals: game.rating_visuals,
                    story: game.rating_story,
                    subjective: game.rating_subjective,
                    character: game.rating_character,
                },
                skipped_dimensions: game.skipped_ratings,
                tags: game.tags.unwrap_or_default(),
                reason: game.reason,
                playtime_minutes: game.playtime,
            })
            .collect();

        RecommendationList::with_identity(self.title, kind, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_shapes() {
        assert_eq!(
            WireShape::detect(&json!({"title": "Old", "games": []})),
            WireShape::Legacy
        );
        assert_eq!(WireShape::detect(&json!({"t": "New", "g": []})), WireShape::Compact);
        assert_eq!(WireShape::detect(&json!({"t": "", "g": []})), WireShape::Unrecognized);
        assert_eq!(WireShape::detect(&json!({"t": "New"})), WireShape::Unrecognized);
        assert_eq!(WireShape::detect(&json!({"t": "New", "g": {}})), WireShape::Unrecognized);
        assert_eq!(WireShape::detect(&json!({"g": []})), WireShape::Unrecognized);
        assert_eq!(WireShape::detect(&json!([1, 2, 3])), WireShape::Unrecognized);
        assert_eq!(WireShape::detect(&json!("t")), WireShape::Unrecognized);
    }

    #[test]
    fn test_legacy_wins_when_both_present() {
        let payload = json!({"title": "Old", "games": [], "t": "New", "g": []});
        assert_eq!(WireShape::detect(&payload), WireShape::Legacy);
    }

    #[test]
    fn test_compact_item_omits_falsy_fields() {
        let item = RecommendedItem::steam(440, "Team Fortress 2", 88)
            .with_rating(Dimension::Gameplay, 92)
            .with_rating(Dimension::Story, 0)
            .with_reason("");
        let value = serde_json::to_value(CompactItem::from_item(&item, ListKind::Game)).unwrap();

        assert_eq!(value, json!({"i": 440, "n": "Team Fortress 2", "r": 88, "rg": 92}));
    }

    #[test]
    fn test_compact_item_cover_only_for_manga() {
        let item = RecommendedItem::new(9, "Some manga", 70).with_cover("https://img.example/9.jpg");

        let as_game = CompactItem::from_item(&item, ListKind::Game);
        assert!(as_game.cv.is_none());

        let as_manga = CompactItem::from_item(&item, ListKind::Manga);
        assert_eq!(as_manga.cv.as_deref(), Some("https://img.example/9.jpg"));
    }

    #[test]
    fn test_compact_item_skip_indices() {
        let item = RecommendedItem::new(1, "x", 50)
            .with_skipped(Dimension::Story)
            .with_skipped(Dimension::Character);
        let compact = CompactItem::from_item(&item, ListKind::Manga);
        assert_eq!(compact.sk, Some(vec![2, 4]));
    }

    #[test]
    fn test_into_item_drops_out_of_range_indices() {
        let compact: CompactItem =
            serde_json::from_value(json!({"i": 1, "n": "x", "r": 1, "sk": [2, 9, -1, 0]})).unwrap();
        let item = compact.into_item(ListKind::Game);
        assert_eq!(item.skipped_dimensions, vec![Dimension::Story, Dimension::Gameplay]);
    }

    #[test]
    fn test_missing_manga_cover_is_empty() {
        let compact: CompactItem = serde_json::from_value(json!({"i": 3, "n": "x", "r": 1})).unwrap();
        assert_eq!(compact.into_item(ListKind::Manga).cover_url, "");
    }

    #[test]
    fn test_legacy_manga_kind() {
        let legacy: LegacyList = serde_json::from_value(json!({
            "title": "Old manga",
            "type": "manga",
            "games": [{"id": 5, "name": "Vagabond", "coverUrl": "https://img.example/5.jpg", "rating": 99}]
        }))
        .unwrap();
        let list = legacy.into_list();
        assert_eq!(list.kind, ListKind::Manga);
        assert_eq!(list.items[0].cover_url, "https://img.example/5.jpg");
    }
}
