//! Built-in layouts a host may fall back to when no configuration is supplied.

use tilequest_core::{BoardConfig, TileNumber, TreasureGridConfig};

/// Start tile of the built-in treasure grid.
pub const STANDARD_TREASURE_START: TileNumber = TileNumber::new(95);

const TREASURE_CELLS: [[u8; 10]; 10] = [
    [0, 0, 1, 1, 1, 1, 1, 2, 0, 0],
    [0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
    [0, 1, 1, 1, 0, 0, 1, 1, 1, 0],
    [0, 1, 0, 1, 1, 1, 1, 0, 1, 0],
    [0, 1, 0, 0, 0, 1, 0, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 0, 1, 0],
    [0, 0, 0, 1, 0, 0, 1, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 1, 0, 0, 1, 0, 0, 0, 1, 0],
    [0, 0, 0, 0, 3, 0, 0, 0, 0, 0],
];

/// Classic nine-by-ten ladder-race board.
#[must_use]
pub fn standard_ladder_config() -> BoardConfig {
    BoardConfig {
        name: "Classic".to_owned(),
        description: "Ninety tiles of ladders, snakes and two restless wormholes.".to_owned(),
        rows: 9,
        columns: 10,
        snake_heads: vec![17, 32, 54, 62, 87, 89],
        snake_tails: vec![4, 12, 34, 19, 24, 53],
        ladder_starts: vec![3, 5, 11, 20, 36, 51, 71],
        ladder_ends: vec![22, 8, 26, 29, 44, 67, 88],
        wormhole_starts: vec![45, 77],
    }
}

/// Ten-by-ten treasure grid with a single start and a single treasure.
#[must_use]
pub fn standard_treasure_config() -> TreasureGridConfig {
    TreasureGridConfig {
        name: "Sunken Vault".to_owned(),
        description: "Wind up from the southern gate to the vault in the north-east.".to_owned(),
        cells: TREASURE_CELLS.iter().map(|row| row.to_vec()).collect(),
    }
}
