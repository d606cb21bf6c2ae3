//! # Craftbase Knowledge
//!
//! Builds item knowledge from a directory of game data records.
//!
//! A knowledge-base directory holds crafting and smelting recipes, item tags
//! and entity loot tables. Loading it produces two indices over one edge set:
//! - what every item can be crafted or obtained from
//! - what every material can be used to craft or obtain
//!
//! The pieces, leaf first:
//! - `records`: on-disk record shapes, decoded once
//! - `tags`: recursive item tag resolution
//! - `normalizer`: shapeless, shaped and smelting recipes to variants
//! - `loot`: entity drops as combat recipes
//! - `graph`: the two indices and their dedup rules
//! - `knowledge_base`: directory scanning and atomic publication

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod graph;
pub mod knowledge_base;
pub mod loot;
pub mod normalizer;
pub mod records;
pub mod tags;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::graph::*;
    pub use crate::knowledge_base::*;
    pub use crate::loot::*;
    pub use crate::normalizer::*;
    pub use crate::tags::*;
    pub use craftbase_common::{ItemId, Station};
}

pub use prelude::*;
