//! Seated players and the records used to seat them.

use tilequest_core::{PieceId, PlayerId, TileNumber};

/// Player taking part in a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    piece: PieceId,
    tile: TileNumber,
}

impl Player {
    /// Creates a player standing on the provided tile.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, piece: PieceId, tile: TileNumber) -> Self {
        Self {
            id,
            name: name.into(),
            piece,
            tile,
        }
    }

    /// Identifier assigned when the player was seated.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name of the player.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Piece drawn for the player.
    #[must_use]
    pub const fn piece(&self) -> PieceId {
        self.piece
    }

    /// Tile the player currently stands on.
    #[must_use]
    pub const fn tile(&self) -> TileNumber {
        self.tile
    }

    /// Moves the player to the provided tile.
    ///
    /// Callers are responsible for checking that the tile exists.
    pub fn move_to(&mut self, tile: TileNumber) {
        self.tile = tile;
    }
}

/// Request to seat a player at game setup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSetup {
    /// Display name of the player.
    pub name: String,
    /// Piece drawn for the player.
    pub piece: PieceId,
}

impl PlayerSetup {
    /// Creates a new seating request.
    #[must_use]
    pub fn new(name: impl Into<String>, piece: PieceId) -> Self {
        Self {
            name: name.into(),
            piece,
        }
    }
}
