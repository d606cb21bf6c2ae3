//! Knowledge-base loading.
//!
//! This module provides:
//! - Scanning of the recipe and entity loot-table directories
//! - Dispatch of each record to the recipe normalizer or the loot indexer
//! - Atomic publication of the finished indices
//! - Read-only access and lookups on the published indices

use std::fs;
use std::path::{Path, PathBuf};

use craftbase_common::ItemId;
use tracing::{debug, info};

use crate::config::{KnowledgeBaseConfig, LoadOptions};
use crate::error::{KnowledgeError, KnowledgeResult};
use crate::graph::{CraftEdge, CraftedToMaterial, KnowledgeGraph, MaterialToCrafted, RecipeVariant};
use crate::loot::index_loot_table;
use crate::normalizer::RecipeNormalizer;
use crate::records::{read_json, LootTable, RecipeRecord};
use crate::tags::TagResolver;

/// Location of recipe records below the knowledge-base root.
pub const RECIPES_DIR: &str = "recipes";

/// Location of entity loot tables below the knowledge-base root.
pub const LOOT_DIR: &str = "loot_tables/entities";

/// Statistics for the last successful load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of recipe files read.
    pub recipe_files: u32,
    /// Number of recipe records indexed.
    pub recipes_indexed: u32,
    /// Number of recipe records skipped (unrecognized type or excluded result).
    pub recipes_skipped: u32,
    /// Number of loot tables indexed.
    pub loot_tables: u32,
    /// Number of loot tables without drop pools.
    pub loot_tables_without_pools: u32,
}

/// Item knowledge built from a directory of recipes, tags and loot tables.
///
/// Both indices are built in full by [`KnowledgeBase::new`] and replaced only
/// by a successful [`KnowledgeBase::load`] or [`KnowledgeBase::reload`]. A
/// failed load leaves the previously published indices untouched.
#[derive(Debug)]
pub struct KnowledgeBase {
    base_path: PathBuf,
    options: LoadOptions,
    graph: KnowledgeGraph,
    stats: LoadStats,
}

impl KnowledgeBase {
    /// Builds a knowledge base from `base_path`.
    pub fn new(base_path: impl Into<PathBuf>, recipes: bool, loot: bool) -> KnowledgeResult<Self> {
        let base_path = base_path.into();
        let options = LoadOptions::new(recipes, loot);
        let (graph, stats) = build(&base_path, options)?;
        Ok(Self {
            base_path,
            options,
            graph,
            stats,
        })
    }

    /// Builds a knowledge base as described by `config`.
    pub fn from_config(config: &KnowledgeBaseConfig) -> KnowledgeResult<Self> {
        Self::new(&config.base_path, config.load_recipes, config.load_loot)
    }

    /// Rebuilds both indices from the current base path.
    pub fn load(&mut self, recipes: bool, loot: bool) -> KnowledgeResult<()> {
        let base_path = self.base_path.clone();
        self.reload(base_path, recipes, loot)
    }

    /// Rebuilds both indices from `base_path`, which becomes the new base
    /// path on success.
    pub fn reload(&mut self, base_path: impl Into<PathBuf>, recipes: bool, loot: bool) -> KnowledgeResult<()> {
        let base_path = base_path.into();
        let options = LoadOptions::new(recipes, loot);
        let (graph, stats) = build(&base_path, options)?;

        self.base_path = base_path;
        self.options = options;
        self.graph = graph;
        self.stats = stats;
        Ok(())
    }

    /// Root of the knowledge-base directory.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Options of the last successful load.
    #[must_use]
    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// Statistics of the last successful load.
    #[must_use]
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    /// Both indices.
    #[must_use]
    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    /// What each material can be used to obtain.
    #[must_use]
    pub fn material_to_crafted(&self) -> &MaterialToCrafted {
        self.graph.material_to_crafted()
    }

    /// What each item can be obtained from.
    #[must_use]
    pub fn crafted_to_material(&self) -> &CraftedToMaterial {
        self.graph.crafted_to_material()
    }

    /// Known ways to obtain `item`.
    #[must_use]
    pub fn recipes_for(&self, item: &str) -> &[RecipeVariant] {
        self.graph.variants_for(item)
    }

    /// Known products of `material`.
    #[must_use]
    pub fn uses_of(&self, material: &str) -> &[CraftEdge] {
        self.graph.uses_of(material)
    }
}

/// Builds fresh indices; nothing is published if any file fails.
fn build(base_path: &Path, options: LoadOptions) -> KnowledgeResult<(KnowledgeGraph, LoadStats)> {
    info!(
        "Loading knowledge base from {:?} (recipes: {}, loot: {})",
        base_path, options.recipes, options.loot
    );

    let mut graph = KnowledgeGraph::new();
    let mut stats = LoadStats::default();

    if options.recipes {
        index_recipes(base_path, &mut graph, &mut stats)?;
    }
    if options.loot {
        index_loot(base_path, &mut graph, &mut stats)?;
    }

    info!(
        "Indexed {} recipes from {} files and {} loot tables: {} items, {} materials",
        stats.recipes_indexed,
        stats.recipe_files,
        stats.loot_tables,
        graph.crafted_to_material().len(),
        graph.material_to_crafted().len()
    );
    Ok((graph, stats))
}

fn index_recipes(base_path: &Path, graph: &mut KnowledgeGraph, stats: &mut LoadStats) -> KnowledgeResult<()> {
    let mut normalizer = RecipeNormalizer::new(TagResolver::for_base(base_path));

    for path in list_files(&base_path.join(RECIPES_DIR), None)? {
        debug!("Loading recipe file: {:?}", path);
        let record: RecipeRecord = read_json(&path)?;
        stats.recipe_files += 1;

        match normalizer.normalize(&record, &path)? {
            Some(recipe) => {
                graph.register_recipe(&recipe.crafted, recipe.variants);
                stats.recipes_indexed += 1;
            },
            None => stats.recipes_skipped += 1,
        }
    }

    debug!("Resolved {} tags", normalizer.tags().cached_len());
    Ok(())
}

fn index_loot(base_path: &Path, graph: &mut KnowledgeGraph, stats: &mut LoadStats) -> KnowledgeResult<()> {
    for path in list_files(&base_path.join(LOOT_DIR), Some("json"))? {
        debug!("Loading loot table: {:?}", path);
        let entity = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(ItemId::new)
            .ok_or_else(|| KnowledgeError::malformed(&path, "loot table file name is not valid UTF-8"))?;
        let table: LootTable = read_json(&path)?;

        match index_loot_table(graph, &entity, &table) {
            Some(_) => stats.loot_tables += 1,
            None => {
                debug!("Loot table {} has no pools", entity);
                stats.loot_tables_without_pools += 1;
            },
        }
    }
    Ok(())
}

/// Regular files directly inside `dir`, sorted, optionally filtered by extension.
fn list_files(dir: &Path, extension: Option<&str>) -> KnowledgeResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| KnowledgeError::from_io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| KnowledgeError::from_io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(extension) = extension {
            if path.extension().map_or(true, |ext| ext != extension) {
                continue;
            }
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}
