//! Board configuration records consumed from external loaders.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, TerrainKind};

/// Largest number of tiles a board may hold.
pub const MAX_TILES: u32 = 1 << 20;

/// Number of tiles on a `rows` by `columns` board, if it fits under [`MAX_TILES`].
pub fn checked_tile_count(rows: u32, columns: u32) -> Result<u32, ConfigError> {
    rows.checked_mul(columns)
        .filter(|count| *count <= MAX_TILES)
        .ok_or(ConfigError::BoardTooLarge { rows, columns })
}

/// Ladder-race board description as produced by a loader.
///
/// Tile references are kept signed so that negative or zero numbers are
/// reported as [`ConfigError::TileOutOfRange`] when the board is built
/// instead of failing deserialisation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardConfig {
    /// Display name of the board.
    pub name: String,
    /// Free-form description shown alongside the name.
    #[serde(default)]
    pub description: String,
    /// Number of tile rows.
    pub rows: u32,
    /// Number of tile columns.
    pub columns: u32,
    /// Tiles holding snake heads, parallel to `snake_tails`.
    #[serde(default)]
    pub snake_heads: Vec<i64>,
    /// Tiles holding snake tails, parallel to `snake_heads`.
    #[serde(default)]
    pub snake_tails: Vec<i64>,
    /// Tiles holding ladder feet, parallel to `ladder_ends`.
    #[serde(default)]
    pub ladder_starts: Vec<i64>,
    /// Tiles holding ladder tops, parallel to `ladder_starts`.
    #[serde(default)]
    pub ladder_ends: Vec<i64>,
    /// Tiles holding wormholes whose destinations are rolled at landing time.
    #[serde(default)]
    pub wormhole_starts: Vec<i64>,
}

impl BoardConfig {
    /// Number of tiles described by the record.
    pub fn tile_count(&self) -> Result<u32, ConfigError> {
        checked_tile_count(self.rows, self.columns)
    }

    /// Snake `(head, tail)` pairs in record order.
    pub fn snakes(&self) -> Result<Vec<(i64, i64)>, ConfigError> {
        paired(
            &self.snake_heads,
            &self.snake_tails,
            "snakeHeads",
            "snakeTails",
        )
    }

    /// Ladder `(start, end)` pairs in record order.
    pub fn ladders(&self) -> Result<Vec<(i64, i64)>, ConfigError> {
        paired(
            &self.ladder_starts,
            &self.ladder_ends,
            "ladderStarts",
            "ladderEnds",
        )
    }
}

fn paired(
    starts: &[i64],
    ends: &[i64],
    starts_field: &'static str,
    ends_field: &'static str,
) -> Result<Vec<(i64, i64)>, ConfigError> {
    if starts.len() != ends.len() {
        return Err(ConfigError::MismatchedPairs {
            starts_field,
            ends_field,
            starts: starts.len(),
            ends: ends.len(),
        });
    }
    Ok(starts.iter().copied().zip(ends.iter().copied()).collect())
}

/// Treasure-hunt grid description as produced by a loader.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureGridConfig {
    /// Display name of the grid.
    pub name: String,
    /// Free-form description shown alongside the name.
    #[serde(default)]
    pub description: String,
    /// Terrain codes in row-major order, top row first.
    pub cells: Vec<Vec<u8>>,
}

impl TreasureGridConfig {
    /// Decodes the grid into `(rows, columns, terrain)` with terrain in row-major order.
    pub fn decode(&self) -> Result<(u32, u32, Vec<TerrainKind>), ConfigError> {
        let expected = self.cells.first().map_or(0, Vec::len);
        let mut terrain = Vec::with_capacity(expected.saturating_mul(self.cells.len()));
        for (row, cells) in self.cells.iter().enumerate() {
            if cells.len() != expected {
                return Err(ConfigError::RaggedGrid {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            for (column, code) in cells.iter().copied().enumerate() {
                let kind = TerrainKind::from_code(code)
                    .ok_or(ConfigError::UnknownTerrain { row, column, code })?;
                terrain.push(kind);
            }
        }

        let too_large = || ConfigError::BoardTooLarge {
            rows: u32::try_from(self.cells.len()).unwrap_or(u32::MAX),
            columns: u32::try_from(expected).unwrap_or(u32::MAX),
        };
        let rows = u32::try_from(self.cells.len()).map_err(|_| too_large())?;
        let columns = u32::try_from(expected).map_err(|_| too_large())?;
        let _ = checked_tile_count(rows, columns)?;

        Ok((rows, columns, terrain))
    }
}
