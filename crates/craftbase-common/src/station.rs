//! Crafting stations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The context required to perform a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    /// The 2x2 grid in the player's inventory.
    Player,
    /// The 3x3 crafting table grid.
    CraftingTable,
    /// A furnace (smelting).
    Furnace,
    /// Killing an entity and collecting its drops.
    Combat,
}

impl Station {
    /// Picks the crafting grid able to hold a shapeless recipe with
    /// `ingredient_count` ingredients.
    #[must_use]
    pub const fn for_ingredient_count(ingredient_count: usize) -> Self {
        if ingredient_count > 4 {
            Self::CraftingTable
        } else {
            Self::Player
        }
    }

    /// Returns the snake_case name used in serialized indices.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::CraftingTable => "crafting_table",
            Self::Furnace => "furnace",
            Self::Combat => "combat",
        }
    }

    /// Get all stations.
    #[must_use]
    pub fn all() -> &'static [Station] {
        &[
            Self::Player,
            Self::CraftingTable,
            Self::Furnace,
            Self::Combat,
        ]
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
