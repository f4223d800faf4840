//! Radar classification and state.
//!
//! Turns raw snapshots into the presentation view and keeps the latest
//! application state.
//!
//! # Data Flow
//!
//! ```text
//! Snapshot ──► reduce ──► ViewModel ──► Store ──► watch<Arc<RadarState>>
//!                │
//!                └──► classify / classify_loot (per entity)
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `classify` | Category tags for players and loot |
//! | `model` | [`Entity`], [`LootItem`], [`ViewModel`] |
//! | `reducer` | Snapshot to view reduction |
//! | `store` | [`Store`] and [`RadarState`] |
//! | `thresholds` | Classification thresholds |

// ============================================================================
// Submodules
// ============================================================================

/// Category tags for players and loot.
pub mod classify;

/// Presentation model.
pub mod model;

/// Snapshot to view reduction.
pub mod reducer;

/// Latest-state store.
pub mod store;

/// Classification thresholds.
pub mod thresholds;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::{classify, classify_loot};
pub use model::{Category, Entity, LootItem, Tag, ViewModel};
pub use reducer::reduce;
pub use store::{RadarState, Store};
pub use thresholds::Thresholds;
