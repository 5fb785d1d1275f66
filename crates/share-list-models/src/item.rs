use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cover::steam_header_url;
use crate::dimension::Dimension;
use crate::list::ListKind;

/// Per-dimension scores, each 0-100
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubRatings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameplay: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visuals: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjective: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<u8>,
}

impl SubRatings {
    pub fn get(&self, dimension: Dimension) -> Option<u8> {
        match dimension {
            Dimension::Gameplay => self.gameplay,
            Dimension::Visuals => self.visuals,
            Dimension::Story => self.story,
            Dimension::Subjective => self.subjective,
            Dimension::Character => self.character,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: Option<u8>) {
        let slot = match dimension {
            Dimension::Gameplay => &mut self.gameplay,
            Dimension::Visuals => &mut self.visuals,
            Dimension::Story => &mut self.story,
            Dimension::Subjective => &mut self.subjective,
            Dimension::Character => &mut self.character,
        };
        *slot = value;
    }

    /// Present scores in wire order
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::WIRE_ORDER
            .into_iter()
            .filter_map(move |d| self.get(d).map(|v| (d, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedItem {
    /// Steam app id, or an external id for items that are not on Steam
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub cover_url: String,
    /// Aggregate score 0-100; authoritative even when sub-ratings disagree
    pub rating: u8,
    #[serde(default, skip_serializing_if = "SubRatings::is_empty")]
    pub ratings: SubRatings,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "crate::dimension::deserialize_lenient"
    )]
    pub skipped_dimensions: Vec<Dimension>,
    /// Attribute name to 0-10 score, only used by manga lists
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_minutes: Option<u32>,
}

impl RecommendedItem {
    pub fn new(id: u64, name: impl Into<String>, rating: u8) -> Self {
        Self {
            id,
            name: name.into(),
            cover_url: String::new(),
            rating,
            ratings: SubRatings::default(),
            skipped_dimensions: Vec::new(),
            tags: BTreeMap::new(),
            reason: None,
            playtime_minutes: None,
        }
    }

    /// A Steam game with its CDN header as cover
    pub fn steam(app_id: u64, name: impl Into<String>, rating: u8) -> Self {
        Self {
            cover_url: steam_header_url(app_id),
            ..Self::new(app_id, name, rating)
        }
    }

    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    pub fn with_rating(mut self, dimension: Dimension, value: u8) -> Self {
        self.ratings.set(dimension, Some(value));
        self
    }

    pub fn with_skipped(mut self, dimension: Dimension) -> Self {
        self.skipped_dimensions.push(dimension);
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, score: f64) -> Self {
        self.tags.insert(name.into(), score);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_playtime(mut self, minutes: u32) -> Self {
        self.playtime_minutes = Some(minutes);
        self
    }

    pub fn is_skipped(&self, dimension: Dimension) -> bool {
        self.skipped_dimensions.contains(&dimension)
    }

    /// Mean of the kind's present, non-skipped sub-ratings, rounded half up.
    ///
    /// Returns `None` when no dimension qualifies; the stored `rating` is then
    /// whatever the caller last supplied.
    pub fn aggregate_rating(&self, kind: ListKind) -> Option<u8> {
        let values: Vec<u32> = kind
            .dimensions()
            .iter()
            .filter(|d| !self.is_skipped(**d))
            .filter_map(|d| self.ratings.get(*d))
            .map(u32::from)
            .collect();

        if values.is_empty() {
            return None;
        }

        let count = values.len() as u32;
        let sum: u32 = values.iter().sum();
        Some(((2 * sum + count) / (2 * count)) as u8)
    }

    /// Store the aggregate as `rating` if one can be computed
    pub fn recompute_rating(&mut self, kind: ListKind) {
        if let Some(aggregate) = self.aggregate_rating(kind) {
            self.rating = aggregate;
        }
    }

    /// Flip a dimension in or out of the skip set and recompute the aggregate.
    ///
    /// Returns `false` without changing anything for dimensions that cannot be skipped.
    pub fn toggle_skip(&mut self, dimension: Dimension, kind: ListKind) -> bool {
        if !dimension.is_skippable() {
            return false;
        }

        if self.is_skipped(dimension) {
            self.skipped_dimensions.retain(|d| *d != dimension);
        } else {
            self.skipped_dimensions.push(dimension);
        }
        self.recompute_rating(kind);
        true
    }

    pub fn hours_played(&self) -> Option<u32> {
        self.playtime_minutes.map(|m| m / 60 + u32::from(m % 60 >= 30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_game(id: u64) -> RecommendedItem {
        RecommendedItem::steam(id, format!("Game {}", id), 80)
            .with_rating(Dimension::Gameplay, 90)
            .with_rating(Dimension::Visuals, 70)
            .with_rating(Dimension::Story, 60)
            .with_rating(Dimension::Subjective, 85)
    }

    #[test]
    fn test_sub_ratings_get_set() {
        let mut ratings = SubRatings::default();
        assert!(ratings.is_empty());

        ratings.set(Dimension::Story, Some(75));
        assert_eq!(ratings.get(Dimension::Story), Some(75));
        assert_eq!(ratings.get(Dimension::Gameplay), None);
        assert!(!ratings.is_empty());

        ratings.set(Dimension::Story, None);
        assert!(ratings.is_empty());
    }

    #[test]
    fn test_aggregate_rating_all_dimensions() {
        let item = create_game(440);
        // (90 + 70 + 60 + 85) / 4 = 76.25
        assert_eq!(item.aggregate_rating(ListKind::Game), Some(76));
    }

    #[test]
    fn test_aggregate_rating_excludes_skipped() {
        let item = create_game(440).with_skipped(Dimension::Story);
        // (90 + 70 + 85) / 3 = 81.67
        assert_eq!(item.aggregate_rating(ListKind::Game), Some(82));
    }

    #[test]
    fn test_aggregate_rating_rounds_half_up() {
        let item = RecommendedItem::new(1, "Half", 0)
            .with_rating(Dimension::Gameplay, 80)
            .with_rating(Dimension::Subjective, 81);
        assert_eq!(item.aggregate_rating(ListKind::Game), Some(81));
    }

    #[test]
    fn test_aggregate_rating_ignores_other_kind_dimensions() {
        let item = RecommendedItem::new(7, "Manga", 50)
            .with_rating(Dimension::Character, 100)
            .with_rating(Dimension::Gameplay, 0);
        assert_eq!(item.aggregate_rating(ListKind::Manga), Some(100));
        assert_eq!(item.aggregate_rating(ListKind::Game), Some(0));
    }

    #[test]
    fn test_aggregate_rating_none_when_nothing_present() {
        let item = RecommendedItem::new(1, "Bare", 65);
        assert_eq!(item.aggregate_rating(ListKind::Game), None);

        let mut item = item;
        item.recompute_rating(ListKind::Game);
        assert_eq!(item.rating, 65);
    }

    #[test]
    fn test_toggle_skip_recomputes() {
        let mut item = create_game(620);
        assert!(item.toggle_skip(Dimension::Story, ListKind::Game));
        assert_eq!(item.skipped_dimensions, vec![Dimension::Story]);
        assert_eq!(item.rating, 82);

        assert!(item.toggle_skip(Dimension::Story, ListKind::Game));
        assert!(item.skipped_dimensions.is_empty());
        assert_eq!(item.rating, 76);
    }

    #[test]
    fn test_toggle_skip_refuses_subjective() {
        let mut item = create_game(620);
        assert!(!item.toggle_skip(Dimension::Subjective, ListKind::Game));
        assert!(item.skipped_dimensions.is_empty());
        assert_eq!(item.rating, 80);
    }

    #[test]
    fn test_hours_played() {
        assert_eq!(RecommendedItem::new(1, "a", 0).hours_played(), None);
        assert_eq!(RecommendedItem::new(1, "a", 0).with_playtime(89).hours_played(), Some(1));
        assert_eq!(RecommendedItem::new(1, "a", 0).with_playtime(90).hours_played(), Some(2));
    }

    #[test]
    fn test_hours_played_at_max_minutes() {
        // Playtime comes from untrusted tokens and can be any u32
        let item = RecommendedItem::new(1, "a", 0).with_playtime(u32::MAX);
        assert_eq!(item.hours_played(), Some(71_582_788));
    }

    #[test]
    fn test_json_shape() {
        let item = RecommendedItem::new(1, "Celeste", 95)
            .with_rating(Dimension::Story, 88)
            .with_skipped(Dimension::Gameplay);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["coverUrl"], "");
        assert_eq!(json["ratings"]["story"], 88);
        assert_eq!(json["skippedDimensions"][0], "gameplay");
        assert!(json.get("reason").is_none());
        assert!(json.get("tags").is_none());
    }
}
