//! Game client seam.
//!
//! Movement and world interaction are provided by an external client library.
//! The knowledge base only needs to know where the player is and how to ask
//! it to move, so this trait is the whole contract.

use crate::coords::{BlockPos, Position};
use crate::error::ClientResult;

/// A player controlled through an external game client.
pub trait GameClient {
    /// Current position of the player.
    fn position(&self) -> ClientResult<Position>;

    /// Sets a movement goal. Pathing happens inside the client; this returns
    /// once the goal has been accepted.
    fn goto(&mut self, goal: BlockPos) -> ClientResult<()>;

    /// Returns true if the player stands inside `goal`.
    fn is_at(&self, goal: BlockPos) -> ClientResult<bool> {
        Ok(self.position()?.to_block() == goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    /// Client that teleports to the accepted goal.
    struct TeleportClient {
        position: Position,
        connected: bool,
    }

    impl GameClient for TeleportClient {
        fn position(&self) -> ClientResult<Position> {
            if !self.connected {
                return Err(ClientError::Disconnected);
            }
            Ok(self.position)
        }

        fn goto(&mut self, goal: BlockPos) -> ClientResult<()> {
            if !self.connected {
                return Err(ClientError::Disconnected);
            }
            if goal.y < -64 {
                return Err(ClientError::Unreachable { goal });
            }
            self.position = goal.center();
            Ok(())
        }
    }

    #[test]
    fn test_goto_then_is_at() {
        let mut client = TeleportClient {
            position: Position::default(),
            connected: true,
        };
        let goal = BlockPos::new(10, 64, -3);

        assert!(!client.is_at(goal).expect("connected"));
        client.goto(goal).expect("goal accepted");
        assert!(client.is_at(goal).expect("connected"));
    }

    #[test]
    fn test_unreachable_goal() {
        let mut client = TeleportClient {
            position: Position::default(),
            connected: true,
        };
        let result = client.goto(BlockPos::new(0, -100, 0));
        assert!(matches!(result, Err(ClientError::Unreachable { .. })));
    }

    #[test]
    fn test_disconnected_client() {
        let client = TeleportClient {
            position: Position::default(),
            connected: false,
        };
        assert!(matches!(client.position(), Err(ClientError::Disconnected)));
    }
}
