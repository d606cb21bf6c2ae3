//! Raw record shapes as they appear on disk.
//!
//! Every file is decoded once, here, into a tagged type. The normalizer and
//! the loot indexer only ever match over these types.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use craftbase_common::ItemId;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::{KnowledgeError, KnowledgeResult};

/// Prefix marking a tag reference inside a tag's `values` list.
pub const TAG_REFERENCE_PREFIX: char = '#';

/// Reads and decodes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> KnowledgeResult<T> {
    let content = fs::read_to_string(path).map_err(|e| KnowledgeError::from_io(path, e))?;
    serde_json::from_str(&content).map_err(|e| KnowledgeError::malformed(path, e))
}

// ============================================================================
// Recipes
// ============================================================================

/// A recipe file, tagged by its declared craft type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RecipeRecord {
    /// Unordered crafting-grid recipe.
    #[serde(rename = "minecraft:crafting_shapeless", alias = "crafting_shapeless")]
    Shapeless(ShapelessRecipe),
    /// Grid recipe with a fixed pattern.
    #[serde(rename = "minecraft:crafting_shaped", alias = "crafting_shaped")]
    Shaped(ShapedRecipe),
    /// Furnace recipe.
    #[serde(rename = "minecraft:smelting", alias = "smelting")]
    Smelting(SmeltingRecipe),
    /// Any other craft type (smithing, stonecutting, ...). Skipped.
    #[serde(other)]
    Unrecognized,
}

/// A shapeless crafting recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct ShapelessRecipe {
    /// One entry per occupied grid slot.
    pub ingredients: Vec<Ingredient>,
    /// Crafted item.
    pub result: RecipeResult,
}

/// A shaped crafting recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct ShapedRecipe {
    /// Grid rows; each character is a key symbol, spaces are blank cells.
    pub pattern: Vec<String>,
    /// Symbol definitions in file order.
    #[serde(deserialize_with = "ordered_keys")]
    pub key: Vec<(String, Ingredient)>,
    /// Crafted item.
    pub result: RecipeResult,
}

impl ShapedRecipe {
    /// Counts how many cells each symbol occupies in the pattern.
    #[must_use]
    pub fn symbol_counts(&self) -> HashMap<char, u32> {
        let mut counts = HashMap::new();
        for cell in self.pattern.iter().flat_map(|row| row.chars()) {
            if cell == ' ' {
                continue;
            }
            *counts.entry(cell).or_insert(0) += 1;
        }
        counts
    }

    /// Returns true if the pattern does not fit in the 2x2 inventory grid.
    #[must_use]
    pub fn needs_crafting_table(&self) -> bool {
        self.pattern.len() >= 3 || self.pattern.iter().any(|row| row.chars().count() >= 3)
    }
}

/// A furnace recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct SmeltingRecipe {
    /// The single input slot.
    pub ingredient: Ingredient,
    /// Smelted item.
    pub result: RecipeResult,
}

/// One ingredient slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    /// A concrete item.
    Item {
        /// Namespaced item identifier
        item: String,
    },
    /// Any item of a tag.
    Tag {
        /// Namespaced tag name
        tag: String,
    },
    /// Any one of several alternatives.
    Choice(Vec<Alternative>),
}

/// One alternative inside a choice group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Alternative {
    /// A concrete item.
    Item {
        /// Namespaced item identifier
        item: String,
    },
    /// Every item of a tag, spliced in at this position.
    Tag {
        /// Namespaced tag name
        tag: String,
    },
}

/// The produced item of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipeResult {
    /// Bare identifier (`"minecraft:iron_ingot"`).
    Id(String),
    /// Item stack object; `count` is accepted and ignored.
    Stack {
        /// Namespaced item identifier
        #[serde(alias = "id")]
        item: String,
    },
}

impl RecipeResult {
    /// The crafted item with its namespace stripped.
    #[must_use]
    pub fn item(&self) -> ItemId {
        match self {
            Self::Id(id) | Self::Stack { item: id } => ItemId::from_namespaced(id),
        }
    }
}

/// Decodes a JSON object into `(symbol, ingredient)` pairs, keeping file order.
fn ordered_keys<'de, D>(deserializer: D) -> Result<Vec<(String, Ingredient)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct KeyVisitor;

    impl<'de> Visitor<'de> for KeyVisitor {
        type Value = Vec<(String, Ingredient)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from pattern symbols to ingredients")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut keys = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, Ingredient>()? {
                keys.push(entry);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_map(KeyVisitor)
}

// ============================================================================
// Tags
// ============================================================================

/// Contents of `tags/items/<name>.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagFile {
    /// Members in declaration order.
    pub values: Vec<TagEntry>,
}

/// One member of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagEntry {
    /// `"minecraft:oak_planks"` or `"#minecraft:planks"`.
    Id(String),
    /// `{ "id": "...", "required": false }`.
    Object {
        /// Identifier, possibly with the tag prefix
        id: String,
        /// Whether the member must exist
        #[serde(default = "default_required")]
        required: bool,
    },
}

const fn default_required() -> bool {
    true
}

/// What a tag entry refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagMember {
    /// A concrete item.
    Item(ItemId),
    /// Another tag, by local name.
    Tag(String),
}

impl TagEntry {
    /// Raw identifier of the entry.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Object { id, .. } => id,
        }
    }

    /// Interprets the entry as an item or a nested tag reference.
    #[must_use]
    pub fn member(&self) -> TagMember {
        let id = self.id();
        match id.strip_prefix(TAG_REFERENCE_PREFIX) {
            Some(tag) => TagMember::Tag(ItemId::from_namespaced(tag).into_inner()),
            None => TagMember::Item(ItemId::from_namespaced(id)),
        }
    }
}

// ============================================================================
// Loot tables
// ============================================================================

/// Entry kinds that never name a droppable item.
const NON_ITEM_ENTRY_TYPES: &[&str] = &[
    "loot_table",
    "tag",
    "dynamic",
    "empty",
    "alternatives",
    "group",
    "sequence",
];

/// Contents of `loot_tables/entities/<entity>.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct LootTable {
    /// Drop pools; absent for tables that only exist to be referenced.
    #[serde(default)]
    pub pools: Option<Vec<LootPool>>,
}

/// One roll of a loot table.
#[derive(Debug, Clone, Deserialize)]
pub struct LootPool {
    /// Candidate drops.
    pub entries: Vec<LootEntry>,
}

/// A candidate drop.
#[derive(Debug, Clone, Deserialize)]
pub struct LootEntry {
    /// Entry kind, e.g. `minecraft:item`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Namespaced item identifier for item entries.
    #[serde(default)]
    pub name: Option<String>,
}

impl LootEntry {
    /// The dropped item, if this entry names one directly.
    #[must_use]
    pub fn dropped_item(&self) -> Option<ItemId> {
        if let Some(kind) = &self.kind {
            let kind = craftbase_common::strip_namespace(kind);
            if NON_ITEM_ENTRY_TYPES.contains(&kind) {
                return None;
            }
        }
        self.name.as_deref().map(ItemId::from_namespaced)
    }
}
