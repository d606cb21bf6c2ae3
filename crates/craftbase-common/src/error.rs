//! Error types shared across Craftbase crates.

use thiserror::Error;

use crate::coords::BlockPos;

/// Errors reported by a game client implementation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client is not connected to a game server.
    #[error("Client is not connected")]
    Disconnected,

    /// No path exists to the requested goal.
    #[error("Goal {goal} is unreachable")]
    Unreachable {
        /// Requested goal
        goal: BlockPos,
    },

    /// Error raised by the underlying client library.
    #[error("Client backend error: {0}")]
    Backend(String),
}

/// Result type alias for game client operations.
pub type ClientResult<T> = Result<T, ClientError>;
