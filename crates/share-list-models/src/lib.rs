pub mod cover;
pub mod dimension;
pub mod item;
pub mod list;

pub use cover::steam_header_url;
pub use dimension::Dimension;
pub use item::{RecommendedItem, SubRatings};
pub use list::{ListError, ListKind, RecommendationList};
