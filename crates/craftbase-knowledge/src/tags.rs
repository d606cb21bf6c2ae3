//! Item tag resolution.
//!
//! A tag is an ordered list of items and references to other tags. Resolving
//! it splices every nested tag in place, so the flattened list keeps the
//! positions recipes rely on when they pair several choice groups.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use craftbase_common::{strip_namespace, ItemId};
use tracing::trace;

use crate::error::{KnowledgeError, KnowledgeResult};
use crate::records::{read_json, TagEntry, TagFile, TagMember};

/// Location of item tags below the knowledge-base root.
pub const TAGS_DIR: &str = "tags/items";

/// Flattens item tags read from a tag directory.
///
/// Resolved tags are cached for the lifetime of the resolver; a knowledge-base
/// load creates a fresh resolver so edits on disk are picked up by a reload.
#[derive(Debug)]
pub struct TagResolver {
    tags_dir: PathBuf,
    cache: HashMap<String, Vec<ItemId>>,
}

impl TagResolver {
    /// Creates a resolver reading `<tags_dir>/<name>.json`.
    #[must_use]
    pub fn new(tags_dir: impl Into<PathBuf>) -> Self {
        Self {
            tags_dir: tags_dir.into(),
            cache: HashMap::new(),
        }
    }

    /// Creates a resolver for the tag directory of a knowledge-base root.
    #[must_use]
    pub fn for_base(base_path: &Path) -> Self {
        Self::new(base_path.join(TAGS_DIR))
    }

    /// Path of the file defining `name` (local tag name).
    #[must_use]
    pub fn tag_path(&self, name: &str) -> PathBuf {
        self.tags_dir.join(format!("{name}.json"))
    }

    /// Number of tags resolved so far.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Resolves a possibly namespaced tag name into its concrete items.
    ///
    /// Fails with [`KnowledgeError::MissingResource`] if the tag, or any tag it
    /// references, has no definition file.
    pub fn resolve(&mut self, tag: &str) -> KnowledgeResult<Vec<ItemId>> {
        let mut chain = Vec::new();
        self.resolve_in(strip_namespace(tag), &mut chain)
    }

    /// `chain` holds the tags currently being expanded, outermost first.
    fn resolve_in(&mut self, name: &str, chain: &mut Vec<String>) -> KnowledgeResult<Vec<ItemId>> {
        if let Some(items) = self.cache.get(name) {
            return Ok(items.clone());
        }

        let path = self.tag_path(name);
        if chain.iter().any(|open| open == name) {
            return Err(KnowledgeError::malformed(
                &path,
                format!("tag reference cycle: {} -> {name}", chain.join(" -> ")),
            ));
        }

        let file: TagFile = read_json(&path)?;
        chain.push(name.to_string());
        let expanded = self.expand(&file.values, chain);
        chain.pop();
        let items = expanded?;

        trace!("Resolved tag {} to {} items", name, items.len());
        self.cache.insert(name.to_string(), items.clone());
        Ok(items)
    }

    fn expand(&mut self, entries: &[TagEntry], chain: &mut Vec<String>) -> KnowledgeResult<Vec<ItemId>> {
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.member() {
                TagMember::Item(item) => items.push(item),
                // Tag files are keyed by local name, so an optional reference
                // back into the chain can only be another namespace's tag.
                TagMember::Tag(nested) if is_optional(entry) && chain.contains(&nested) => {
                    trace!("Optional tag #{} is already being expanded, skipping", nested);
                },
                TagMember::Tag(nested) => match self.resolve_in(&nested, chain) {
                    Ok(nested_items) => items.extend(nested_items),
                    Err(KnowledgeError::MissingResource { .. }) if is_optional(entry) => {
                        trace!("Optional tag #{} not found, skipping", nested);
                    },
                    Err(e) => return Err(e),
                },
            }
        }
        Ok(items)
    }
}

fn is_optional(entry: &TagEntry) -> bool {
    matches!(entry, TagEntry::Object { required: false, .. })
}
