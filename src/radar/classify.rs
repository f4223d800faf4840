//! Entity and loot classification.
//!
//! Computes the [`Category`] of each entity relative to the local player.
//! Both functions are pure and deterministic.
//!
//! # Entity Rules
//!
//! Applied in order:
//!
//! | Step | Tags |
//! |------|------|
//! | Base | `npc` or `player` |
//! | Faction | `scav` |
//! | Life | `alive` or `dead` |
//! | Group | `my_group`, or `other_group` + the group id |
//! | Proximity | `brawl` or `nearby` (never for self or obscured) |
//! | Bounty | `player_wanted` for wanted scavengers |
//!
//! # Loot Rules
//!
//! `loot`, plus `wanted` and `nearby` when they apply.

// ============================================================================
// Imports
// ============================================================================

use std::ptr;

use super::model::{Category, Entity, LootItem, Tag};
use super::thresholds::Thresholds;

// ============================================================================
// Entity Classification
// ============================================================================

/// Classifies an entity relative to `me`.
///
/// `entity` may be `me` itself; it is recognized either by reference or by a
/// non-empty matching id.
#[must_use]
pub fn classify(me: Option<&Entity>, entity: &Entity, thresholds: &Thresholds) -> Category {
    let is_self = me.is_some_and(|me| is_same_entity(me, entity));
    let mut category = Category::new();

    category.insert(if entity.is_npc { Tag::Npc } else { Tag::Player });

    if entity.is_scavenger {
        category.insert(Tag::Scav);
    }

    category.insert(if entity.is_alive { Tag::Alive } else { Tag::Dead });

    let my_group = me.and_then(|me| me.group.as_deref());
    match entity.group.as_deref() {
        _ if is_self => category.insert(Tag::MyGroup),
        Some(group) if Some(group) == my_group => category.insert(Tag::MyGroup),
        Some(group) => {
            category.insert(Tag::OtherGroup);
            category.insert(Tag::Group(group.to_owned()));
        }
        None => {}
    }

    if !is_self
        && !entity.is_obscured
        && let Some(distance) = entity.distance
    {
        if distance < thresholds.brawl_distance {
            category.insert(Tag::Brawl);
        } else if distance < thresholds.nearby_distance {
            category.insert(Tag::Nearby);
        }
    }

    if entity.is_scavenger && entity.wanted {
        category.insert(Tag::PlayerWanted);
    }

    category
}

/// Returns `true` if both refer to the same entity.
#[inline]
fn is_same_entity(a: &Entity, b: &Entity) -> bool {
    ptr::eq(a, b) || (!a.id.is_empty() && a.id == b.id)
}

// ============================================================================
// Loot Classification
// ============================================================================

/// Classifies a loot item.
#[must_use]
pub fn classify_loot(item: &LootItem, thresholds: &Thresholds) -> Category {
    let mut category = Category::new();
    category.insert(Tag::Loot);

    if item.wanted {
        category.insert(Tag::Wanted);
    }

    if item
        .distance
        .is_some_and(|distance| distance < thresholds.loot_nearby_distance)
    {
        category.insert(Tag::Nearby);
    }

    category
}

// ============================================================================
// Tests
// ============================================================================
