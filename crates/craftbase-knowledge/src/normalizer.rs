//! Recipe normalization.
//!
//! Converts one decoded recipe record into the ordered list of concrete
//! recipe variants it stands for. Choice groups and tags become one variant
//! per alternative; the station follows from the record type and footprint.

use std::collections::HashMap;
use std::path::Path;

use craftbase_common::{ItemId, Station};
use tracing::debug;

use crate::error::{KnowledgeError, KnowledgeResult};
use crate::graph::RecipeVariant;
use crate::records::{
    Alternative, Ingredient, RecipeRecord, ShapedRecipe, ShapelessRecipe, SmeltingRecipe,
};
use crate::tags::TagResolver;

/// Shaped results never indexed: their recipes loop back on themselves.
pub const EXCLUDED_SHAPED_RESULTS: &[&str] = &["barrel", "campfire", "soul_campfire"];

/// All variants produced by one recipe record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecipe {
    /// Item the recipe produces.
    pub crafted: ItemId,
    /// Station shared by every variant.
    pub station: Station,
    /// Variants in distribution order.
    pub variants: Vec<RecipeVariant>,
}

/// An ingredient slot after tag resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    /// Exactly one item.
    Fixed(ItemId),
    /// Alternatives listed inline in the record.
    List(Vec<ItemId>),
    /// Alternatives coming from a tag.
    Tag(Vec<ItemId>),
}

/// Normalizes recipe records, resolving tags on demand.
#[derive(Debug)]
pub struct RecipeNormalizer {
    tags: TagResolver,
}

impl RecipeNormalizer {
    /// Creates a normalizer resolving tags through `tags`.
    #[must_use]
    pub fn new(tags: TagResolver) -> Self {
        Self { tags }
    }

    /// Returns the tag resolver.
    #[must_use]
    pub fn tags(&self) -> &TagResolver {
        &self.tags
    }

    /// Normalizes a record read from `source`.
    ///
    /// Returns `None` for unrecognized craft types and excluded results.
    pub fn normalize(
        &mut self,
        record: &RecipeRecord,
        source: &Path,
    ) -> KnowledgeResult<Option<NormalizedRecipe>> {
        match record {
            RecipeRecord::Shapeless(recipe) => self.shapeless(recipe, source).map(Some),
            RecipeRecord::Shaped(recipe) => self.shaped(recipe, source),
            RecipeRecord::Smelting(recipe) => self.smelting(recipe).map(Some),
            RecipeRecord::Unrecognized => {
                debug!("Skipping unrecognized craft type in {:?}", source);
                Ok(None)
            },
        }
    }

    /// Shapeless crafting: plain items first, then inline lists, then tags.
    ///
    /// The first choice slot with more than one alternative fans the recipe
    /// out; later choice slots are paired with the existing variants by
    /// position. Lists go before tags so a list sets the variant count even
    /// when a tag appears earlier in the record.
    pub fn shapeless(
        &mut self,
        recipe: &ShapelessRecipe,
        source: &Path,
    ) -> KnowledgeResult<NormalizedRecipe> {
        let station = Station::for_ingredient_count(recipe.ingredients.len());
        let mut base = RecipeVariant::new(station);
        let mut lists = Vec::new();
        let mut tags = Vec::new();
        for ingredient in &recipe.ingredients {
            match self.slot(ingredient)? {
                Slot::Fixed(item) => base.add(item),
                Slot::List(items) => lists.push(items),
                Slot::Tag(items) => tags.push(items),
            }
        }

        let mut variants = vec![base];
        for alternatives in lists.into_iter().chain(tags) {
            if variants.len() == 1 && alternatives.len() > 1 {
                let base = variants[0].clone();
                variants = vec![base; alternatives.len()];
            }
            if alternatives.len() > variants.len() {
                return Err(KnowledgeError::malformed(
                    source,
                    format!(
                        "choice of {} alternatives cannot pair with {} variants",
                        alternatives.len(),
                        variants.len()
                    ),
                ));
            }
            for (variant, item) in variants.iter_mut().zip(alternatives) {
                variant.add(item);
            }
        }

        Ok(NormalizedRecipe {
            crafted: recipe.result.item(),
            station,
            variants,
        })
    }

    /// Shaped crafting: every choice dimension multiplies the variant count.
    ///
    /// Inline lists are laid out in contiguous blocks. Tags are laid out in
    /// blocks too, unless a list was already laid out, in which case each tag
    /// alternative is written every `variants / alternatives` slots starting
    /// at its own index. This only enumerates the full product for one list
    /// and one tag of equal length; other combinations can leave two
    /// alternatives of one key in a variant and miss others.
    pub fn shaped(
        &mut self,
        recipe: &ShapedRecipe,
        source: &Path,
    ) -> KnowledgeResult<Option<NormalizedRecipe>> {
        let crafted = recipe.result.item();
        if EXCLUDED_SHAPED_RESULTS.contains(&crafted.as_str()) {
            debug!("Skipping excluded shaped result {}", crafted);
            return Ok(None);
        }

        let station = if recipe.needs_crafting_table() {
            Station::CraftingTable
        } else {
            Station::Player
        };
        let counts = recipe.symbol_counts();

        let mut base = RecipeVariant::new(station);
        let mut lists = Vec::new();
        let mut tags = Vec::new();
        for (symbol, ingredient) in &recipe.key {
            let count = symbol_count(&counts, symbol, source)?;
            match self.slot(ingredient)? {
                Slot::Fixed(item) => base.set(item, count),
                Slot::List(items) => lists.push((count, items)),
                Slot::Tag(items) => tags.push((count, items)),
            }
        }

        let required = lists
            .iter()
            .chain(&tags)
            .try_fold(1usize, |acc, (_, items)| acc.checked_mul(items.len()))
            .ok_or_else(|| {
                KnowledgeError::malformed(source, "too many ingredient combinations")
            })?;
        let mut variants = vec![base; required.max(1)];

        if required > 0 {
            for (count, items) in &lists {
                fill_blocks(&mut variants, items, *count);
            }
            let interleave = !lists.is_empty();
            for (count, items) in &tags {
                if interleave {
                    fill_strided(&mut variants, items, *count);
                } else {
                    fill_blocks(&mut variants, items, *count);
                }
            }
        }

        Ok(Some(NormalizedRecipe {
            crafted,
            station,
            variants,
        }))
    }

    /// Smelting: one variant per accepted input, one of each.
    pub fn smelting(&mut self, recipe: &SmeltingRecipe) -> KnowledgeResult<NormalizedRecipe> {
        let station = Station::Furnace;
        let variants = match self.slot(&recipe.ingredient)? {
            Slot::Fixed(item) => vec![RecipeVariant::single(item, station)],
            Slot::List(items) | Slot::Tag(items) if items.is_empty() => {
                vec![RecipeVariant::new(station)]
            },
            Slot::List(items) | Slot::Tag(items) => items
                .into_iter()
                .map(|item| RecipeVariant::single(item, station))
                .collect(),
        };

        Ok(NormalizedRecipe {
            crafted: recipe.result.item(),
            station,
            variants,
        })
    }

    fn slot(&mut self, ingredient: &Ingredient) -> KnowledgeResult<Slot> {
        Ok(match ingredient {
            Ingredient::Item { item } => Slot::Fixed(ItemId::from_namespaced(item)),
            Ingredient::Tag { tag } => Slot::Tag(self.tags.resolve(tag)?),
            Ingredient::Choice(alternatives) => {
                let mut items = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    match alternative {
                        Alternative::Item { item } => items.push(ItemId::from_namespaced(item)),
                        Alternative::Tag { tag } => items.extend(self.tags.resolve(tag)?),
                    }
                }
                Slot::List(items)
            },
        })
    }
}

/// Looks up how many cells a key symbol occupies.
fn symbol_count(counts: &HashMap<char, u32>, symbol: &str, source: &Path) -> KnowledgeResult<u32> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => counts.get(&c).copied().ok_or_else(|| {
            KnowledgeError::malformed(source, format!("key '{symbol}' is not used in the pattern"))
        }),
        _ => Err(KnowledgeError::malformed(
            source,
            format!("key '{symbol}' is not a single character"),
        )),
    }
}

/// Gives alternative `i` the slots `i * stride .. (i + 1) * stride`.
fn fill_blocks(variants: &mut [RecipeVariant], items: &[ItemId], count: u32) {
    if items.is_empty() {
        return;
    }
    let stride = variants.len() / items.len();
    for (i, item) in items.iter().enumerate() {
        for variant in &mut variants[i * stride..(i + 1) * stride] {
            variant.set(item.clone(), count);
        }
    }
}

/// Gives alternative `i` the slots `i, i + stride, i + 2 * stride, ...`.
fn fill_strided(variants: &mut [RecipeVariant], items: &[ItemId], count: u32) {
    if items.is_empty() {
        return;
    }
    let stride = (variants.len() / items.len()).max(1);
    for (i, item) in items.iter().enumerate() {
        for variant in variants.iter_mut().skip(i).step_by(stride) {
            variant.set(item.clone(), count);
        }
    }
}
