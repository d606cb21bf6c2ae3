//! # Craftbase Common
//!
//! Common types and shared abstractions for Craftbase.
//!
//! This crate provides the vocabulary shared by the knowledge base and any
//! game client that consumes it:
//! - Item identifiers with namespace stripping
//! - Crafting stations
//! - Positions in the game world
//! - The game client seam (position query and goal move)
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod client;
pub mod coords;
pub mod error;
pub mod ids;
pub mod station;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::*;
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::station::*;
}

pub use prelude::*;
