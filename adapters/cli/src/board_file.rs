//! Loading board and grid records from JSON files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tilequest_board::{standard_ladder_config, standard_treasure_config, Board};
use tilequest_core::{BoardConfig, TerrainKind, TileKind, TreasureGridConfig};

/// Builds the ladder-race board stored at `path`, or the standard board.
pub(crate) fn ladder_board(path: Option<&Path>) -> Result<Board> {
    let config = match path {
        Some(path) => read_record::<BoardConfig>(path, "board")?,
        None => standard_ladder_config(),
    };
    Board::from_config(&config).with_context(|| format!("board `{}` is invalid", config.name))
}

/// Builds the treasure grid stored at `path`, or the standard grid.
pub(crate) fn treasure_board(path: Option<&Path>) -> Result<Board> {
    let config = match path {
        Some(path) => read_record::<TreasureGridConfig>(path, "grid")?,
        None => standard_treasure_config(),
    };
    Board::from_treasure_grid(&config)
        .with_context(|| format!("grid `{}` is invalid", config.name))
}

/// One-line account of what a validated board contains.
pub(crate) fn summarize(board: &Board) -> String {
    let count = |matches: fn(&TileKind) -> bool| {
        board
            .tiles()
            .iter()
            .filter(|tile| matches(&tile.kind()))
            .count()
    };

    if board.tiles().iter().any(|tile| tile.kind().terrain().is_some()) {
        let starts = board.tiles_with_terrain(TerrainKind::Start).len();
        let treasures = board.tiles_with_terrain(TerrainKind::Treasure).len();
        let walkable = count(|kind| kind.terrain().is_some_and(TerrainKind::is_walkable));
        return format!(
            "grid `{}` is valid: {}x{}, {walkable} walkable tiles, {starts} start tiles, {treasures} treasure tiles",
            board.name(),
            board.rows(),
            board.columns(),
        );
    }

    let snakes = count(|kind| matches!(kind, TileKind::Snake { .. }));
    let ladders = count(|kind| matches!(kind, TileKind::Ladder { .. }));
    let wormholes = count(|kind| matches!(kind, TileKind::Wormhole { .. }));
    format!(
        "board `{}` is valid: {}x{}, {} tiles, {snakes} snakes, {ladders} ladders, {wormholes} wormholes",
        board.name(),
        board.rows(),
        board.columns(),
        board.tile_count(),
    )
}

fn read_record<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file at {}", path.display()))?;
    parse_record(&contents)
        .with_context(|| format!("failed to parse {what} file at {}", path.display()))
}

fn parse_record<T: DeserializeOwned>(contents: &str) -> Result<T> {
    let trimmed = contents.trim();
    anyhow::ensure!(!trimmed.is_empty(), "file is empty");
    Ok(serde_json::from_str(trimmed)?)
}
