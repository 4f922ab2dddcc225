//! Error taxonomy shared by every engine crate.

use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

/// Hard failures raised by the engine.
///
/// Ordinary "not right now" conditions during play are reported with
/// `Option::None` instead and never surface here.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A tile lookup referenced a number outside `1..=tile_count`.
    #[error("tile {number} does not exist on a board of {tile_count} tiles")]
    InvalidTileNumber {
        /// Number that was requested.
        number: u32,
        /// Number of tiles on the board.
        tile_count: u32,
    },
    /// A board, dice set or seating request was malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Defects detected while building a board, dice set or game session.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A dice set must contain at least one die.
    #[error("a dice set needs at least one die")]
    ZeroDice,
    /// The requested dimensions exceed the supported tile count.
    #[error("a {rows}x{columns} board has more tiles than the engine supports")]
    BoardTooLarge {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
    /// A game cannot be played on a board without tiles.
    #[error("the board has no tiles to play on")]
    EmptyBoard,
    /// Two parallel arrays in a board record differ in length.
    #[error("`{starts_field}` has {starts} entries but `{ends_field}` has {ends}")]
    MismatchedPairs {
        /// Name of the array holding action sources.
        starts_field: &'static str,
        /// Name of the array holding action destinations.
        ends_field: &'static str,
        /// Length of the sources array.
        starts: usize,
        /// Length of the destinations array.
        ends: usize,
    },
    /// A board record referenced a tile outside `1..=tile_count`.
    #[error("`{field}` references tile {number} but the board has {tile_count} tiles")]
    TileOutOfRange {
        /// Name of the array holding the reference.
        field: &'static str,
        /// Referenced tile number as written in the record.
        number: i64,
        /// Number of tiles on the board.
        tile_count: u32,
    },
    /// A ladder that does not climb or a snake that does not slide.
    #[error("a {action} from tile {from} to tile {to} goes the wrong way")]
    WrongWay {
        /// `"ladder"` or `"snake"`.
        action: &'static str,
        /// Tile the action starts on.
        from: u32,
        /// Tile the action leads to.
        to: u32,
    },
    /// A tile that already carries an action or terrain was given another one.
    #[error("tile {number} already carries an action or terrain")]
    TileOccupied {
        /// Tile that was already taken.
        number: u32,
    },
    /// A treasure grid row differs in length from the first row.
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        /// Zero-based row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A treasure grid cell holds a code outside `0..=3`.
    #[error("grid cell ({row}, {column}) holds unknown terrain code {code}")]
    UnknownTerrain {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// Offending code.
        code: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert_into_engine_errors() {
        let error: EngineError = ConfigError::ZeroDice.into();
        assert_eq!(
            error,
            EngineError::InvalidConfiguration(ConfigError::ZeroDice)
        );
        assert_eq!(
            error.to_string(),
            "invalid configuration: a dice set needs at least one die"
        );
    }

    #[test]
    fn out_of_range_tiles_name_the_board_size() {
        let error = EngineError::InvalidTileNumber {
            number: 91,
            tile_count: 90,
        };
        assert_eq!(
            error.to_string(),
            "tile 91 does not exist on a board of 90 tiles"
        );
    }
}
