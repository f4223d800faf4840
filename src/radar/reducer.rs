//! Snapshot reduction.
//!
//! [`reduce`] turns one [`Snapshot`] into a complete [`ViewModel`]. The
//! previous view model contributes nothing but its exits, and only when the
//! snapshot carries none, so stale players or loot can never leak across
//! updates.
//!
//! # Pipeline
//!
//! 1. Resolve wire entities (staleness in seconds, obscured fields cleared)
//! 2. Partition players into alive and valuable-dead, drop the rest
//! 3. Classify self and every surviving player
//! 4. Sort by staleness when self is obscured, by distance otherwise
//! 5. Select visible loot: nearest candidates plus valuable or wanted ones
//! 6. Carry exits over when absent

// ============================================================================
// Imports
// ============================================================================

use std::cmp::Ordering;

use crate::protocol::Snapshot;

use super::classify::{classify, classify_loot};
use super::model::{Entity, LootItem, ViewModel};
use super::thresholds::Thresholds;

// ============================================================================
// Reduce
// ============================================================================

/// Reduces a snapshot into a fresh view model.
#[must_use]
pub fn reduce(previous: &ViewModel, snapshot: &Snapshot, thresholds: &Thresholds) -> ViewModel {
    let mut me = snapshot.me.as_ref().map(Entity::from_raw);

    let (mut alive_players, mut dead_players) = partition_players(me.as_ref(), snapshot, thresholds);

    for entity in alive_players.iter_mut().chain(dead_players.iter_mut()) {
        entity.category = classify(me.as_ref(), entity, thresholds);
    }

    if let Some(me) = me.as_mut() {
        me.category = classify(Some(&*me), &*me, thresholds);
    }

    let by_staleness = me.as_ref().is_some_and(|me| me.is_obscured);
    sort_players(&mut alive_players, by_staleness);
    sort_players(&mut dead_players, by_staleness);

    let visible_loot = select_loot(snapshot, thresholds);

    let exits = snapshot
        .exits
        .clone()
        .unwrap_or_else(|| previous.exits.clone());

    ViewModel {
        me,
        alive_players,
        dead_players,
        visible_loot,
        exits,
    }
}

// ============================================================================
// Players
// ============================================================================

/// Splits non-self players into alive and dead-but-valuable lists.
///
/// Obscured entities resolve as alive and always land in the first list.
fn partition_players(
    me: Option<&Entity>,
    snapshot: &Snapshot,
    thresholds: &Thresholds,
) -> (Vec<Entity>, Vec<Entity>) {
    let self_id = me.map(|me| &me.id).filter(|id| !id.is_empty());

    let mut alive = Vec::with_capacity(snapshot.players().len());
    let mut dead = Vec::new();

    for entity in snapshot.players().iter().map(Entity::from_raw) {
        if self_id == Some(&entity.id) {
            continue;
        }

        if entity.is_alive {
            alive.push(entity);
        } else if entity.loot_value > thresholds.dead_loot_value {
            dead.push(entity);
        }
    }

    (alive, dead)
}

/// Stable sort by staleness or by distance, ascending.
fn sort_players(players: &mut [Entity], by_staleness: bool) {
    if by_staleness {
        players.sort_by_key(|entity| entity.staleness);
    } else {
        players.sort_by(|a, b| cmp_distance(a.distance, b.distance));
    }
}

/// Orders distances ascending; unknown distances sort last.
#[inline]
fn cmp_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(f64::INFINITY)
        .total_cmp(&b.unwrap_or(f64::INFINITY))
}

// ============================================================================
// Loot
// ============================================================================

/// Picks the loot worth showing.
///
/// Candidates above the base price are sorted by distance; the nearest few
/// are always kept, the rest only if valuable or wanted.
fn select_loot(snapshot: &Snapshot, thresholds: &Thresholds) -> Vec<LootItem> {
    let mut visible: Vec<LootItem> = snapshot
        .loot()
        .iter()
        .map(LootItem::from_raw)
        .filter(|item| item.total_price > thresholds.loot_candidate_price)
        .collect();

    visible.sort_by(|a, b| cmp_distance(a.distance, b.distance));

    let near_count = thresholds.near_loot_count.min(visible.len());
    let rest = visible.split_off(near_count);
    visible.extend(
        rest.into_iter()
            .filter(|item| item.total_price > thresholds.loot_valuable_price || item.wanted),
    );

    for item in &mut visible {
        item.category = classify_loot(item, thresholds);
    }

    visible
}

// ============================================================================
// Tests
// ============================================================================
