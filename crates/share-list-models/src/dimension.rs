use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A named sub-rating axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Gameplay,
    Visuals,
    Story,
    Subjective,
    Character,
}

impl Dimension {
    /// Skip-index table used by share tokens.
    ///
    /// Positions are part of every link ever generated: append new dimensions
    /// at the end, never reorder or remove entries.
    pub const WIRE_ORDER: [Dimension; 5] = [
        Dimension::Gameplay,
        Dimension::Visuals,
        Dimension::Story,
        Dimension::Subjective,
        Dimension::Character,
    ];

    pub fn wire_index(self) -> u8 {
        // must agree with WIRE_ORDER
        match self {
            Dimension::Gameplay => 0,
            Dimension::Visuals => 1,
            Dimension::Story => 2,
            Dimension::Subjective => 3,
            Dimension::Character => 4,
        }
    }

    pub fn from_wire_index(index: u8) -> Option<Self> {
        Self::WIRE_ORDER.get(index as usize).copied()
    }

    /// Field name used by the verbose (pre-minification) share format
    pub fn legacy_key(self) -> &'static str {
        match self {
            Dimension::Gameplay => "ratingGameplay",
            Dimension::Visuals => "ratingVisuals",
            Dimension::Story => "ratingStory",
            Dimension::Subjective => "ratingSubjective",
            Dimension::Character => "ratingCharacter",
        }
    }

    pub fn from_legacy_key(key: &str) -> Option<Self> {
        Self::WIRE_ORDER.into_iter().find(|d| d.legacy_key() == key)
    }

    /// Accepts either the short name (`story`) or the legacy key (`ratingStory`)
    pub fn parse(name: &str) -> Option<Self> {
        Self::WIRE_ORDER
            .into_iter()
            .find(|d| d.as_str() == name)
            .or_else(|| Self::from_legacy_key(name))
    }

    /// Subjective is the one axis a reviewer can never opt out of.
    pub fn is_skippable(self) -> bool {
        self != Dimension::Subjective
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Gameplay => "gameplay",
            Dimension::Visuals => "visuals",
            Dimension::Story => "story",
            Dimension::Subjective => "subjective",
            Dimension::Character => "character",
        }
    }
}

/// Deserialize a list of dimension names, silently dropping names this
/// version does not know.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Vec<Dimension>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(names
        .unwrap_or_default()
        .iter()
        .filter_map(|name| Dimension::parse(name))
        .collect())
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
