//! View model types.
//!
//! These are the presentation-ready shapes produced by the reducer. Unlike
//! the wire types in [`crate::protocol::snapshot`], every field is resolved:
//! flags default to `false`, staleness is in whole seconds, and obscured
//! entities have their tactical fields cleared.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Serialize, Serializer};

use crate::identifiers::{EntityId, LootId};
use crate::protocol::{Exits, Position, RawEntity, RawLoot};

// ============================================================================
// Tag
// ============================================================================

/// A category tag attached to an entity or loot item.
///
/// Tags are consumed by presentation as style classes; the string form of
/// each tag is part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Server-controlled bot.
    Npc,
    /// Human player.
    Player,
    /// Scavenger faction.
    Scav,
    /// Alive.
    Alive,
    /// Dead.
    Dead,
    /// Self, or same group as self.
    MyGroup,
    /// Member of another group.
    OtherGroup,
    /// Literal group identifier.
    Group(String),
    /// Within brawl distance.
    Brawl,
    /// Within nearby distance.
    Nearby,
    /// Wanted scavenger.
    PlayerWanted,
    /// Loot item.
    Loot,
    /// Wanted loot item.
    Wanted,
}

impl Tag {
    /// Returns the tag's string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Npc => "npc",
            Self::Player => "player",
            Self::Scav => "scav",
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::MyGroup => "my_group",
            Self::OtherGroup => "other_group",
            Self::Group(group) => group.as_str(),
            Self::Brawl => "brawl",
            Self::Nearby => "nearby",
            Self::PlayerWanted => "player_wanted",
            Self::Loot => "loot",
            Self::Wanted => "wanted",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// Category
// ============================================================================

/// An insertion-ordered set of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Category(Vec<Tag>);

impl Category {
    /// Creates an empty category.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a tag unless one with the same string form is already present.
    pub fn insert(&mut self, tag: Tag) {
        if !self.contains_str(tag.as_str()) {
            self.0.push(tag);
        }
    }

    /// Returns `true` if a tag with the same string form is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, tag: &Tag) -> bool {
        self.contains_str(tag.as_str())
    }

    /// Returns `true` if a tag with this string form is present.
    #[must_use]
    pub fn contains_str(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t.as_str() == tag)
    }

    /// Iterates tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    /// Number of tags.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no tags.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Space-separated tags, ready for use as a style class.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.0
            .iter()
            .map(Tag::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<Tag> for Category {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut category = Self::new();
        for tag in iter {
            category.insert(tag);
        }
        category
    }
}

// ============================================================================
// Entity
// ============================================================================

/// A player or NPC in the view model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Identity within the snapshot.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// World position, `None` when unknown or obscured.
    pub position: Option<Position>,
    /// Horizontal distance, `None` when unknown or obscured.
    pub distance: Option<f64>,
    /// Vertical distance, `None` when unknown or obscured.
    pub vertical_distance: Option<f64>,
    /// Bearing in degrees, `None` when unknown or obscured.
    pub angle: Option<f64>,
    /// Alive flag. Always `true` for obscured entities.
    pub is_alive: bool,
    /// Server-controlled bot.
    pub is_npc: bool,
    /// Scavenger faction.
    pub is_scavenger: bool,
    /// Marked as wanted.
    pub wanted: bool,
    /// Group identifier.
    pub group: Option<String>,
    /// Tactical details withheld.
    pub is_obscured: bool,
    /// Whole seconds since the position was last confirmed.
    pub staleness: u64,
    /// Carried inventory value. Zero for obscured entities.
    pub loot_value: f64,
    /// Computed tags.
    pub category: Category,
}

impl Entity {
    /// Resolves a wire entity, normalizing staleness and clearing the
    /// tactical fields of obscured entities. The category is left empty.
    #[must_use]
    pub fn from_raw(raw: &RawEntity) -> Self {
        let is_obscured = raw.is_obscured.unwrap_or(false);
        let id = raw
            .id
            .clone()
            .or_else(|| raw.name.clone())
            .unwrap_or_default();
        let staleness = normalize_staleness(raw.seconds_since_update.unwrap_or(0.0));

        let mut entity = Self {
            id: EntityId::from(id),
            name: raw.name.clone().unwrap_or_default(),
            position: raw.position,
            distance: raw.distance,
            vertical_distance: raw.vertical_distance,
            angle: raw.angle,
            is_alive: raw.is_alive.unwrap_or(false),
            is_npc: raw.is_npc.unwrap_or(false),
            is_scavenger: raw.is_scavenger.unwrap_or(false),
            wanted: raw.wanted.unwrap_or(false),
            group: raw.group.clone(),
            is_obscured,
            staleness,
            loot_value: raw.loot_value.unwrap_or(0.0),
            category: Category::new(),
        };

        if is_obscured {
            entity.position = None;
            entity.distance = None;
            entity.vertical_distance = None;
            entity.angle = None;
            entity.loot_value = 0.0;
            entity.is_alive = true;
        }

        entity
    }
}

/// Converts deciseconds to whole seconds, rounding halves up.
///
/// Negative and non-finite inputs clamp to zero.
#[inline]
#[must_use]
pub fn normalize_staleness(deciseconds: f64) -> u64 {
    // `as` saturates and maps NaN to 0.
    (deciseconds / 10.0 + 0.5).floor().max(0.0) as u64
}

// ============================================================================
// LootItem
// ============================================================================

/// A loot item in the view model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LootItem {
    /// Item identity.
    pub id: LootId,
    /// Display name.
    pub name: String,
    /// Horizontal distance.
    pub distance: Option<f64>,
    /// Vertical distance.
    pub vertical_distance: Option<f64>,
    /// Bearing in degrees.
    pub angle: Option<f64>,
    /// Price including contents.
    pub total_price: f64,
    /// Marked as wanted.
    pub wanted: bool,
    /// Computed tags.
    pub category: Category,
}

impl LootItem {
    /// Resolves a wire loot item. The category is left empty.
    #[must_use]
    pub fn from_raw(raw: &RawLoot) -> Self {
        Self {
            id: LootId::from(raw.id.clone().unwrap_or_default()),
            name: raw.name.clone().unwrap_or_default(),
            distance: raw.distance,
            vertical_distance: raw.vertical_distance,
            angle: raw.angle,
            total_price: raw.total_price.unwrap_or(0.0),
            wanted: raw.wanted.unwrap_or(false),
            category: Category::new(),
        }
    }
}

// ============================================================================
// ViewModel
// ============================================================================

/// The presentation-ready result of reducing one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// The local player.
    #[serde(rename = "self")]
    pub me: Option<Entity>,
    /// Alive (and obscured) players, sorted.
    pub alive_players: Vec<Entity>,
    /// Dead players worth looting, sorted.
    pub dead_players: Vec<Entity>,
    /// Loot worth showing.
    pub visible_loot: Vec<LootItem>,
    /// Exit statuses.
    pub exits: Exits,
}

impl ViewModel {
    /// Looks up a player in either list by id.
    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Entity> {
        self.alive_players
            .iter()
            .chain(&self.dead_players)
            .find(|e| e.id.as_str() == id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_staleness() {
        assert_eq!(normalize_staleness(0.0), 0);
        assert_eq!(normalize_staleness(14.0), 1);
        assert_eq!(normalize_staleness(15.0), 2);
        assert_eq!(normalize_staleness(25.0), 3);
        assert_eq!(normalize_staleness(123.0), 12);
        assert_eq!(normalize_staleness(-30.0), 0);
        assert_eq!(normalize_staleness(f64::NAN), 0);
    }

    #[test]
    fn test_category_is_a_set() {
        let mut category = Category::new();
        category.insert(Tag::Player);
        category.insert(Tag::Alive);
        category.insert(Tag::Player);
        assert_eq!(category.len(), 2);
        assert_eq!(category.class_name(), "player alive");
    }

    #[test]
    fn test_group_named_like_a_tag_is_not_duplicated() {
        let category: Category = [
            Tag::Player,
            Tag::Alive,
            Tag::OtherGroup,
            Tag::Group("alive".into()),
            Tag::Group("brawl".into()),
            Tag::Brawl,
        ]
        .into_iter()
        .collect();

        assert_eq!(category.class_name(), "player alive other_group brawl");
        assert!(category.contains(&Tag::Brawl));
        assert!(category.contains(&Tag::Group("alive".into())));
    }

    #[test]
    fn test_category_serializes_as_strings() {
        let category: Category = [Tag::OtherGroup, Tag::Group("B".into())]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, r#"["other_group","B"]"#);
        assert!(category.contains_str("B"));
    }

    #[test]
    fn test_entity_from_raw_defaults() {
        let entity = Entity::from_raw(&RawEntity {
            name: Some("Bob".into()),
            ..RawEntity::default()
        });
        assert_eq!(entity.id.as_str(), "Bob");
        assert!(!entity.is_alive);
        assert_eq!(entity.staleness, 0);
        assert!(entity.category.is_empty());
    }

    #[test]
    fn test_obscured_entity_drops_tactical_fields() {
        let entity = Entity::from_raw(&RawEntity {
            id: Some("x".into()),
            distance: Some(10.0),
            angle: Some(90.0),
            loot_value: Some(99_999.0),
            is_alive: Some(false),
            is_obscured: Some(true),
            seconds_since_update: Some(47.0),
            ..RawEntity::default()
        });
        assert!(entity.distance.is_none());
        assert!(entity.angle.is_none());
        assert_eq!(entity.loot_value, 0.0);
        assert!(entity.is_alive);
        assert_eq!(entity.staleness, 5);
    }

    #[test]
    fn test_view_model_serializes_self_key() {
        let json = serde_json::to_value(ViewModel::default()).unwrap();
        assert!(json.get("self").is_some());
        assert!(json.get("alivePlayers").is_some());
        assert!(json.get("visibleLoot").is_some());
    }
}
