//! Crafting graph indices.
//!
//! This module provides:
//! - `RecipeVariant`: one concrete, quantity-annotated way to obtain an item
//! - `CraftEdge`: a material's link to something it can produce
//! - `KnowledgeGraph`: the two indices and the only functions allowed to
//!   mutate them, which enforce the dedup rules

use std::collections::{BTreeMap, HashMap};

use craftbase_common::{ItemId, Station};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// All known ways to obtain each item.
pub type CraftedToMaterial = HashMap<ItemId, Vec<RecipeVariant>>;

/// All known things each material can produce.
pub type MaterialToCrafted = HashMap<ItemId, Vec<CraftEdge>>;

// ============================================================================
// Recipe variants
// ============================================================================

/// One concrete way to obtain an item: ingredient counts plus a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeVariant {
    /// Required count per ingredient.
    pub ingredients: BTreeMap<ItemId, u32>,
    /// Where the recipe is performed.
    pub station: Station,
}

impl RecipeVariant {
    /// Creates a variant with no ingredients.
    #[must_use]
    pub fn new(station: Station) -> Self {
        Self {
            ingredients: BTreeMap::new(),
            station,
        }
    }

    /// Creates a variant needing one of `item`.
    #[must_use]
    pub fn single(item: ItemId, station: Station) -> Self {
        let mut variant = Self::new(station);
        variant.add(item);
        variant
    }

    /// Adds one more of `item`.
    pub fn add(&mut self, item: ItemId) {
        *self.ingredients.entry(item).or_insert(0) += 1;
    }

    /// Sets the required count of `item`, replacing any previous count.
    pub fn set(&mut self, item: ItemId, count: u32) {
        self.ingredients.insert(item, count);
    }

    /// Required count of `item` (0 if not an ingredient).
    #[must_use]
    pub fn count(&self, item: &str) -> u32 {
        self.ingredients.get(item).copied().unwrap_or(0)
    }

    /// Returns true if `item` is an ingredient.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.ingredients.contains_key(item)
    }

    /// Returns true if the variant has no ingredients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Number of distinct ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Iterates over `(ingredient, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u32)> {
        self.ingredients.iter().map(|(item, count)| (item, *count))
    }
}

/// Link from a material to an item it helps produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CraftEdge {
    /// Produced item.
    pub item: ItemId,
    /// Station of the first recipe that linked the two.
    pub station: Station,
}

// ============================================================================
// Knowledge graph
// ============================================================================

/// The two complementary indices over one edge set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    crafted_to_material: CraftedToMaterial,
    material_to_crafted: MaterialToCrafted,
}

impl KnowledgeGraph {
    /// Creates empty indices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `variant` to the ways of obtaining `crafted`.
    ///
    /// Structurally identical variants from different records are kept.
    pub fn register_crafted_variant(&mut self, crafted: &ItemId, variant: RecipeVariant) {
        self.crafted_to_material
            .entry(crafted.clone())
            .or_default()
            .push(variant);
    }

    /// Appends `variant` unless `crafted` already has one with the same
    /// ingredients. Returns true if it was added.
    pub fn register_unique_crafted_variant(&mut self, crafted: &ItemId, variant: RecipeVariant) -> bool {
        let variants = self.crafted_to_material.entry(crafted.clone()).or_default();
        if variants.iter().any(|v| v.ingredients == variant.ingredients) {
            return false;
        }
        variants.push(variant);
        true
    }

    /// Records that `material` can produce `crafted` at `station`.
    ///
    /// Deduplicated on the crafted item alone: the first station seen for a
    /// `(material, crafted)` pair is kept. Returns true if a new edge was added.
    pub fn register_material_edge(&mut self, material: &ItemId, crafted: &ItemId, station: Station) -> bool {
        let edges = self.material_to_crafted.entry(material.clone()).or_default();
        if edges.iter().any(|edge| edge.item == *crafted) {
            return false;
        }
        trace!("Edge {} -> {} ({})", material, crafted, station);
        edges.push(CraftEdge {
            item: crafted.clone(),
            station,
        });
        true
    }

    /// Registers every variant of one recipe together with the material edges
    /// of all its ingredients.
    pub fn register_recipe(&mut self, crafted: &ItemId, variants: Vec<RecipeVariant>) {
        self.crafted_to_material.entry(crafted.clone()).or_default();
        for variant in variants {
            for (material, _) in variant.iter() {
                self.register_material_edge(material, crafted, variant.station);
            }
            self.register_crafted_variant(crafted, variant);
        }
    }

    /// All known ways to obtain each item.
    #[must_use]
    pub fn crafted_to_material(&self) -> &CraftedToMaterial {
        &self.crafted_to_material
    }

    /// All known things each material can produce.
    #[must_use]
    pub fn material_to_crafted(&self) -> &MaterialToCrafted {
        &self.material_to_crafted
    }

    /// Known ways to obtain `item`.
    #[must_use]
    pub fn variants_for(&self, item: &str) -> &[RecipeVariant] {
        self.crafted_to_material.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Known products of `material`.
    #[must_use]
    pub fn uses_of(&self, material: &str) -> &[CraftEdge] {
        self.material_to_crafted.get(material).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of recipe variants.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.crafted_to_material.values().map(Vec::len).sum()
    }

    /// Total number of material edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.material_to_crafted.values().map(Vec::len).sum()
    }

    /// Returns true if neither index has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crafted_to_material.is_empty() && self.material_to_crafted.is_empty()
    }

    /// Empties both indices.
    pub fn clear(&mut self) {
        self.crafted_to_material.clear();
        self.material_to_crafted.clear();
    }
}
