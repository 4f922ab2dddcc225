#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tile-race engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative board model, and pure systems. Adapters submit [`Command`]
//! values describing what a player wants to do, the turn controller executes
//! them against the board, and then appends [`Event`] values to a queue the
//! host drains after every call. Nothing in here holds mutable game state.

use std::fmt;

use serde::{Deserialize, Serialize};

mod config;
mod error;

pub use config::{checked_tile_count, BoardConfig, TreasureGridConfig, MAX_TILES};
pub use error::{ConfigError, EngineError, Result};

/// One-based number identifying a tile on a board.
///
/// A `TileNumber` is only a label; whether it refers to an existing tile is
/// decided by the board it is looked up on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileNumber(u32);

impl TileNumber {
    /// Number of the first tile on every non-empty board.
    pub const FIRST: Self = Self(1);

    /// Creates a new tile number wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying one-based tile number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Signed distance travelled when moving from `self` to `other`.
    #[must_use]
    pub fn displacement_to(self, other: TileNumber) -> i32 {
        let delta = i64::from(other.0) - i64::from(self.0);
        i32::try_from(delta).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX })
    }
}

impl fmt::Display for TileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier assigned to a seated player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of the visual piece a presentation layer draws for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u32);

impl PieceId {
    /// Creates a new piece identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the piece identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cardinal directions available to directional movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward the top edge of the board.
    Up,
    /// Movement toward the bottom edge of the board.
    Down,
    /// Movement toward the left edge of the board.
    Left,
    /// Movement toward the right edge of the board.
    Right,
}

impl Direction {
    /// Every direction in the order the engine probes them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column offsets of a single step on a grid whose row zero is the top row.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(label)
    }
}

/// Terrain carried by tiles on a treasure-hunt grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Impassable cell outside the playable area.
    Void,
    /// Walkable cell.
    Path,
    /// Walkable cell holding the treasure; entering it wins the game.
    Treasure,
    /// Walkable cell where players may begin.
    Start,
}

impl TerrainKind {
    /// Decodes a terrain code from a treasure grid record.
    ///
    /// Codes are `0 = Void`, `1 = Path`, `2 = Treasure` and `3 = Start`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Void),
            1 => Some(Self::Path),
            2 => Some(Self::Treasure),
            3 => Some(Self::Start),
            _ => None,
        }
    }

    /// Encodes the terrain back into its grid record code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Void => 0,
            Self::Path => 1,
            Self::Treasure => 2,
            Self::Start => 3,
        }
    }

    /// Reports whether a player may stand on the terrain.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Void)
    }
}

/// Where a tile action sends a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// A fixed tile chosen when the board was built.
    Tile(TileNumber),
    /// A destination re-rolled every time the tile is landed on.
    Random,
}

/// Everything a single tile can carry.
///
/// Ladder-race tiles use the action variants while treasure-hunt tiles use
/// [`TileKind::Terrain`]; a tile is never both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Tile without any special behaviour.
    Plain,
    /// Tile that lifts the player up to a fixed destination.
    Ladder {
        /// Tile the ladder ends on.
        destination: TileNumber,
    },
    /// Tile that drops the player down to a fixed destination.
    Snake {
        /// Tile the snake's tail rests on.
        destination: TileNumber,
    },
    /// Tile that teleports the player elsewhere.
    Wormhole {
        /// Fixed or re-rolled destination of the wormhole.
        destination: Destination,
    },
    /// Treasure-hunt terrain.
    Terrain(TerrainKind),
}

impl TileKind {
    /// Reports whether the tile carries a ladder, snake or wormhole.
    #[must_use]
    pub const fn has_action(&self) -> bool {
        matches!(
            self,
            Self::Ladder { .. } | Self::Snake { .. } | Self::Wormhole { .. }
        )
    }

    /// Destination of the tile's action, if it carries one.
    #[must_use]
    pub const fn action_destination(&self) -> Option<Destination> {
        match self {
            Self::Ladder { destination } | Self::Snake { destination } => {
                Some(Destination::Tile(*destination))
            }
            Self::Wormhole { destination } => Some(*destination),
            Self::Plain | Self::Terrain(_) => None,
        }
    }

    /// Terrain of a treasure-hunt tile.
    #[must_use]
    pub const fn terrain(&self) -> Option<TerrainKind> {
        match self {
            Self::Terrain(terrain) => Some(*terrain),
            _ => None,
        }
    }
}

/// Commands that express every request a host may make during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Rolls the dice for the current player.
    RollDice,
    /// Spends one unit of move budget stepping in the provided direction.
    Step {
        /// Direction chosen by the current player.
        direction: Direction,
    },
    /// Passes the turn to the next seated player.
    AdvanceTurn,
    /// Returns every player to the start and clears the winner.
    Reset,
}

/// Events appended by the engine after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Announces that players were seated and play may begin.
    GameStarted {
        /// Number of seated players.
        players: u32,
    },
    /// Reports the total shown by the dice.
    DiceRolled {
        /// Player that rolled.
        player: PlayerId,
        /// Sum of all dice.
        value: u32,
    },
    /// Confirms a linear move driven by a dice roll.
    PlayerMoved {
        /// Player that moved.
        player: PlayerId,
        /// Tile occupied before the roll.
        from: TileNumber,
        /// Tile the player landed on before any action fired.
        to: TileNumber,
    },
    /// Confirms that a ladder lifted the player.
    LadderClimbed {
        /// Player that climbed.
        player: PlayerId,
        /// Tile holding the ladder's foot.
        from: TileNumber,
        /// Tile at the top of the ladder.
        to: TileNumber,
    },
    /// Confirms that a snake dropped the player.
    SnakeSlid {
        /// Player that slid.
        player: PlayerId,
        /// Tile holding the snake's head.
        from: TileNumber,
        /// Tile holding the snake's tail.
        to: TileNumber,
    },
    /// Confirms that a wormhole teleported the player.
    WormholeTeleport {
        /// Player that was teleported.
        player: PlayerId,
        /// Tile holding the wormhole.
        from: TileNumber,
        /// Tile the player ended on.
        to: TileNumber,
        /// Displacement drawn (or implied, for fixed wormholes) by the wormhole.
        displacement: i32,
    },
    /// Reports the move budget granted by a treasure-hunt roll.
    MoveBudgetGranted {
        /// Player holding the budget.
        player: PlayerId,
        /// Number of single steps the player may take.
        budget: u32,
    },
    /// Confirms a single directional step.
    PlayerStepped {
        /// Player that stepped.
        player: PlayerId,
        /// Tile occupied before the step.
        from: TileNumber,
        /// Tile occupied after the step.
        to: TileNumber,
        /// Direction of the step.
        direction: Direction,
        /// Budget left after the step.
        remaining: u32,
    },
    /// Reports that a player had budget left but nowhere to go.
    MovesForfeited {
        /// Player whose budget was discarded.
        player: PlayerId,
        /// Number of steps discarded.
        remaining: u32,
    },
    /// Announces that a player stepped onto the treasure.
    TreasureFound {
        /// Player that found the treasure.
        player: PlayerId,
        /// Tile holding the treasure.
        tile: TileNumber,
    },
    /// Announces the end of the game.
    VictoryReached {
        /// Winning player.
        player: PlayerId,
        /// Tile the winner stands on.
        tile: TileNumber,
    },
    /// Announces whose turn it is now.
    TurnAdvanced {
        /// Player who may roll next.
        player: PlayerId,
    },
    /// Confirms that every player was returned to the start.
    GameReset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_codes_round_trip() {
        for code in 0..=3 {
            let terrain = TerrainKind::from_code(code).expect("known code");
            assert_eq!(terrain.code(), code);
        }
        assert_eq!(TerrainKind::from_code(4), None);
    }

    #[test]
    fn only_void_terrain_blocks_movement() {
        assert!(!TerrainKind::Void.is_walkable());
        assert!(TerrainKind::Path.is_walkable());
        assert!(TerrainKind::Treasure.is_walkable());
        assert!(TerrainKind::Start.is_walkable());
    }

    #[test]
    fn terrain_tiles_never_report_actions() {
        let kind = TileKind::Terrain(TerrainKind::Treasure);
        assert!(!kind.has_action());
        assert_eq!(kind.action_destination(), None);
        assert_eq!(kind.terrain(), Some(TerrainKind::Treasure));
    }

    #[test]
    fn action_destinations_match_their_kind() {
        let ladder = TileKind::Ladder {
            destination: TileNumber::new(22),
        };
        let wormhole = TileKind::Wormhole {
            destination: Destination::Random,
        };
        assert_eq!(
            ladder.action_destination(),
            Some(Destination::Tile(TileNumber::new(22)))
        );
        assert_eq!(wormhole.action_destination(), Some(Destination::Random));
        assert!(!TileKind::Plain.has_action());
    }

    #[test]
    fn displacement_is_signed() {
        let from = TileNumber::new(40);
        assert_eq!(from.displacement_to(TileNumber::new(25)), -15);
        assert_eq!(from.displacement_to(TileNumber::new(60)), 20);
        assert_eq!(from.displacement_to(from), 0);
    }

    #[test]
    fn direction_offsets_are_unit_steps() {
        for direction in Direction::ALL {
            let (rows, columns) = direction.offset();
            assert_eq!(rows.abs() + columns.abs(), 1);
        }
    }
}
