//! Numeric thresholds used by classification and reduction.

// ============================================================================
// Thresholds
// ============================================================================

/// Distance and value cut-offs for the snapshot pipeline.
///
/// All comparisons are strict: an entity at exactly `brawl_distance` is
/// `nearby`, not `brawl`; loot priced exactly at `loot_candidate_price` is
/// not a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum price (exclusive) for loot to be considered at all.
    pub loot_candidate_price: f64,

    /// Minimum price (exclusive) for loot beyond the nearest few to stay visible.
    pub loot_valuable_price: f64,

    /// Number of nearest candidates always shown regardless of value.
    pub near_loot_count: usize,

    /// Minimum carried value (exclusive) for a dead entity to be retained.
    pub dead_loot_value: f64,

    /// Distance (exclusive) below which an entity is tagged `brawl`.
    pub brawl_distance: f64,

    /// Distance (exclusive) below which an entity is tagged `nearby`.
    pub nearby_distance: f64,

    /// Distance (exclusive) below which a loot item is tagged `nearby`.
    pub loot_nearby_distance: f64,
}

impl Thresholds {
    /// Returns the default thresholds.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            loot_candidate_price: 18_000.0,
            loot_valuable_price: 70_000.0,
            near_loot_count: 3,
            dead_loot_value: 30_000.0,
            brawl_distance: 50.0,
            nearby_distance: 150.0,
            loot_nearby_distance: 50.0,
        }
    }

    /// Validates the thresholds.
    ///
    /// # Errors
    ///
    /// Returns error message if a value is negative or not finite, or if the
    /// proximity tiers are out of order.
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            ("loot_candidate_price", self.loot_candidate_price),
            ("loot_valuable_price", self.loot_valuable_price),
            ("dead_loot_value", self.dead_loot_value),
            ("brawl_distance", self.brawl_distance),
            ("nearby_distance", self.nearby_distance),
            ("loot_nearby_distance", self.loot_nearby_distance),
        ];

        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }

        if self.brawl_distance > self.nearby_distance {
            return Err("brawl_distance must not exceed nearby_distance".to_string());
        }

        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
