#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board model shared by both game variants.
//!
//! A [`Board`] is built once per session, either from dimensions or from a
//! configuration record, and is immutable afterwards. Ladder-race boards are
//! numbered in boustrophedon order starting from the bottom-left corner;
//! treasure-hunt grids are numbered row-major from the top-left corner.

use log::{debug, warn};
use tilequest_core::{
    checked_tile_count, BoardConfig, ConfigError, Destination, Direction, EngineError, Result,
    TerrainKind, TileKind, TileNumber, TreasureGridConfig,
};

mod player;
mod standard;

pub use player::{Player, PlayerSetup};
pub use standard::{
    standard_ladder_config, standard_treasure_config, STANDARD_TREASURE_START,
};

/// Numbering scheme used to lay tiles out on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Row zero is the bottom row; even rows run left to right and odd rows
    /// run right to left so that tile `n + 1` always neighbours tile `n`.
    Boustrophedon,
    /// Row zero is the top row and every row runs left to right.
    RowMajor,
}

impl Layout {
    fn position_of(self, index: u32, columns: u32) -> (u32, u32) {
        let row = index / columns;
        let offset = index % columns;
        match self {
            Self::Boustrophedon if row % 2 == 1 => (row, columns - 1 - offset),
            _ => (row, offset),
        }
    }

    fn index_at(self, row: u32, column: u32, columns: u32) -> u32 {
        match self {
            Self::Boustrophedon if row % 2 == 1 => row * columns + (columns - 1 - column),
            _ => row * columns + column,
        }
    }

    fn row_step(self, direction: Direction) -> (i64, i64) {
        let (rows, columns) = direction.offset();
        match self {
            Self::Boustrophedon => (-rows, columns),
            Self::RowMajor => (rows, columns),
        }
    }
}

/// Single numbered cell of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    number: TileNumber,
    row: u32,
    column: u32,
    kind: TileKind,
}

impl Tile {
    /// One-based number of the tile.
    #[must_use]
    pub const fn number(&self) -> TileNumber {
        self.number
    }

    /// Row holding the tile, counted as described by the board's [`Layout`].
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Column holding the tile, counted from the left edge.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Action or terrain carried by the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }
}

/// Ordered collection of tiles addressed by one-based tile number.
#[derive(Clone, Debug)]
pub struct Board {
    name: String,
    description: String,
    rows: u32,
    columns: u32,
    layout: Layout,
    tiles: Vec<Tile>,
}

impl Board {
    /// Builds an unnamed ladder-race board of plain tiles.
    ///
    /// Zero-sized boards are legal and contain no tiles.
    pub fn new(rows: u32, columns: u32) -> Result<Self> {
        Self::with_layout(rows, columns, Layout::Boustrophedon)
    }

    /// Builds an unnamed board of plain tiles using the provided numbering.
    pub fn with_layout(rows: u32, columns: u32, layout: Layout) -> Result<Self> {
        let tile_count = checked_tile_count(rows, columns)?;
        let tiles = (0..tile_count)
            .map(|index| {
                let (row, column) = layout.position_of(index, columns);
                Tile {
                    number: TileNumber::new(index + 1),
                    row,
                    column,
                    kind: TileKind::Plain,
                }
            })
            .collect();

        debug!("built {rows}x{columns} {layout:?} board with {tile_count} tiles");
        Ok(Self {
            name: String::new(),
            description: String::new(),
            rows,
            columns,
            layout,
            tiles,
        })
    }

    /// Replaces the board's display name and description.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.name = name.into();
        self.description = description.into();
        self
    }

    /// Builds a ladder-race board from a configuration record.
    ///
    /// Every referenced tile must lie within `1..=rows*columns`; any defect
    /// fails the whole build and no partially configured board is returned.
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        Self::build_from_config(config).map_err(|error| {
            warn!("rejected board configuration `{}`: {error}", config.name);
            error
        })
    }

    /// Builds a treasure-hunt board from a grid of terrain codes.
    pub fn from_treasure_grid(config: &TreasureGridConfig) -> Result<Self> {
        Self::build_from_grid(config).map_err(|error| {
            warn!("rejected treasure grid `{}`: {error}", config.name);
            error
        })
    }

    fn build_from_config(config: &BoardConfig) -> Result<Self> {
        let tile_count = config.tile_count()?;
        let snakes = config.snakes()?;
        let ladders = config.ladders()?;

        let mut board =
            Self::new(config.rows, config.columns)?.named(&config.name, &config.description);
        for (head, tail) in snakes {
            let from = checked_reference("snakeHeads", head, tile_count)?;
            let to = checked_reference("snakeTails", tail, tile_count)?;
            board.set_snake(from, to)?;
        }
        for (start, end) in ladders {
            let from = checked_reference("ladderStarts", start, tile_count)?;
            let to = checked_reference("ladderEnds", end, tile_count)?;
            board.set_ladder(from, to)?;
        }
        for start in config.wormhole_starts.iter().copied() {
            let from = checked_reference("wormholeStarts", start, tile_count)?;
            board.set_wormhole(from, Destination::Random)?;
        }
        Ok(board)
    }

    fn build_from_grid(config: &TreasureGridConfig) -> Result<Self> {
        let (rows, columns, terrain) = config.decode()?;
        let mut board = Self::with_layout(rows, columns, Layout::RowMajor)?
            .named(&config.name, &config.description);
        for (tile, terrain) in board.tiles.iter_mut().zip(terrain) {
            tile.kind = TileKind::Terrain(terrain);
        }
        Ok(board)
    }

    /// Display name of the board.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description of the board.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Numbering scheme used by the board.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of tiles on the board.
    #[must_use]
    pub const fn tile_count(&self) -> u32 {
        self.rows * self.columns
    }

    /// Reports whether the number refers to a tile on this board.
    #[must_use]
    pub fn contains(&self, number: TileNumber) -> bool {
        self.index_of(number).is_some()
    }

    /// All tiles in ascending number order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Looks up the unique tile carrying the provided number.
    pub fn tile(&self, number: TileNumber) -> Result<&Tile> {
        self.index_of(number)
            .and_then(|index| self.tiles.get(index))
            .ok_or(self.invalid(number))
    }

    /// Looks up the tile at the provided row and column, if it exists.
    #[must_use]
    pub fn tile_at(&self, row: u32, column: u32) -> Option<&Tile> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        let index = self.layout.index_at(row, column, self.columns);
        usize::try_from(index)
            .ok()
            .and_then(|index| self.tiles.get(index))
    }

    /// Tile one step away in the provided direction, or `None` at the edge.
    ///
    /// Directions are visual: `Up` moves toward the top edge whichever
    /// numbering the board uses.
    pub fn neighbour(&self, number: TileNumber, direction: Direction) -> Result<Option<TileNumber>> {
        let tile = self.tile(number)?;
        let (row_step, column_step) = self.layout.row_step(direction);
        let row = i64::from(tile.row) + row_step;
        let column = i64::from(tile.column) + column_step;
        let (Ok(row), Ok(column)) = (u32::try_from(row), u32::try_from(column)) else {
            return Ok(None);
        };
        Ok(self.tile_at(row, column).map(Tile::number))
    }

    /// Reports whether the tile carries a ladder, snake or wormhole.
    pub fn has_tile_action(&self, number: TileNumber) -> Result<bool> {
        self.tile(number).map(|tile| tile.kind.has_action())
    }

    /// Destination of the tile's action, or `None` for tiles without one.
    pub fn action_destination(&self, number: TileNumber) -> Result<Option<Destination>> {
        self.tile(number).map(|tile| tile.kind.action_destination())
    }

    /// Terrain of a treasure-hunt tile, or `None` for ladder-race tiles.
    pub fn terrain(&self, number: TileNumber) -> Result<Option<TerrainKind>> {
        self.tile(number).map(|tile| tile.kind.terrain())
    }

    /// Numbers of every tile carrying the provided terrain, ascending.
    #[must_use]
    pub fn tiles_with_terrain(&self, terrain: TerrainKind) -> Vec<TileNumber> {
        self.tiles
            .iter()
            .filter(|tile| tile.kind.terrain() == Some(terrain))
            .map(Tile::number)
            .collect()
    }

    /// Attaches a ladder climbing from `from` to the higher tile `to`.
    pub fn set_ladder(&mut self, from: TileNumber, to: TileNumber) -> Result<()> {
        self.check_way("ladder", from, to, to > from)?;
        self.attach(from, TileKind::Ladder { destination: to })
    }

    /// Attaches a snake sliding from `from` to the lower tile `to`.
    pub fn set_snake(&mut self, from: TileNumber, to: TileNumber) -> Result<()> {
        self.check_way("snake", from, to, to < from)?;
        self.attach(from, TileKind::Snake { destination: to })
    }

    /// Attaches a wormhole with a fixed or re-rolled destination.
    pub fn set_wormhole(&mut self, from: TileNumber, destination: Destination) -> Result<()> {
        self.attach(from, TileKind::Wormhole { destination })
    }

    fn check_way(
        &self,
        action: &'static str,
        from: TileNumber,
        to: TileNumber,
        right_way: bool,
    ) -> Result<()> {
        let _ = self.tile(from)?;
        let _ = self.tile(to)?;
        if right_way {
            return Ok(());
        }
        Err(ConfigError::WrongWay {
            action,
            from: from.get(),
            to: to.get(),
        }
        .into())
    }

    fn attach(&mut self, from: TileNumber, kind: TileKind) -> Result<()> {
        if let Some(Destination::Tile(to)) = kind.action_destination() {
            let _ = self.tile(to)?;
        }
        let invalid = self.invalid(from);
        let tile = self
            .index_of(from)
            .and_then(|index| self.tiles.get_mut(index))
            .ok_or(invalid)?;
        if tile.kind != TileKind::Plain {
            return Err(ConfigError::TileOccupied { number: from.get() }.into());
        }
        tile.kind = kind;
        debug!("tile {from} now carries {kind:?}");
        Ok(())
    }

    fn index_of(&self, number: TileNumber) -> Option<usize> {
        let value = number.get();
        if value == 0 || value > self.tile_count() {
            return None;
        }
        usize::try_from(value - 1).ok()
    }

    fn invalid(&self, number: TileNumber) -> EngineError {
        EngineError::InvalidTileNumber {
            number: number.get(),
            tile_count: self.tile_count(),
        }
    }
}

fn checked_reference(
    field: &'static str,
    number: i64,
    tile_count: u32,
) -> std::result::Result<TileNumber, ConfigError> {
    u32::try_from(number)
        .ok()
        .filter(|value| (1..=tile_count).contains(value))
        .map(TileNumber::new)
        .ok_or(ConfigError::TileOutOfRange {
            field,
            number,
            tile_count,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(number: u32) -> TileNumber {
        TileNumber::new(number)
    }

    #[test]
    fn boustrophedon_rows_alternate_direction() {
        let board = Board::new(3, 4).expect("board builds");

        let bottom: Vec<u32> = (0..4)
            .map(|column| board.tile_at(0, column).expect("tile").number().get())
            .collect();
        let middle: Vec<u32> = (0..4)
            .map(|column| board.tile_at(1, column).expect("tile").number().get())
            .collect();

        assert_eq!(bottom, vec![1, 2, 3, 4]);
        assert_eq!(middle, vec![8, 7, 6, 5]);
        assert_eq!(board.tile_at(2, 0).map(Tile::number), Some(tile(9)));
    }

    #[test]
    fn row_major_numbering_matches_grid_address() {
        let board = Board::with_layout(4, 10, Layout::RowMajor).expect("board builds");
        for row in 0..4 {
            for column in 0..10 {
                let expected = row * 10 + column + 1;
                assert_eq!(
                    board.tile_at(row, column).map(Tile::number),
                    Some(tile(expected))
                );
            }
        }
    }

    #[test]
    fn zero_sized_boards_have_no_tiles() {
        let board = Board::new(0, 7).expect("zero rows are legal");
        assert_eq!(board.tile_count(), 0);
        assert!(board.tiles().is_empty());
        assert!(board.tile(TileNumber::FIRST).is_err());
    }

    #[test]
    fn lookups_outside_the_board_fail() {
        let board = Board::new(9, 10).expect("board builds");
        for number in [0, 91, u32::MAX] {
            assert_eq!(
                board.tile(tile(number)),
                Err(EngineError::InvalidTileNumber {
                    number,
                    tile_count: 90,
                })
            );
        }
        assert_eq!(board.tile(tile(90)).map(Tile::number), Ok(tile(90)));
    }

    #[test]
    fn actions_require_existing_destinations() {
        let mut board = Board::new(2, 5).expect("board builds");
        assert_eq!(
            board.set_ladder(tile(3), tile(11)),
            Err(EngineError::InvalidTileNumber {
                number: 11,
                tile_count: 10,
            })
        );
        assert_eq!(board.has_tile_action(tile(3)), Ok(false));
    }

    #[test]
    fn ladders_climb_and_snakes_slide() {
        let mut board = Board::new(9, 10).expect("board builds");
        assert_eq!(
            board.set_ladder(tile(40), tile(12)),
            Err(EngineError::InvalidConfiguration(ConfigError::WrongWay {
                action: "ladder",
                from: 40,
                to: 12,
            }))
        );
        assert_eq!(
            board.set_snake(tile(12), tile(40)),
            Err(EngineError::InvalidConfiguration(ConfigError::WrongWay {
                action: "snake",
                from: 12,
                to: 40,
            }))
        );
        assert!(board.set_snake(tile(7), tile(7)).is_err());
        assert_eq!(board.has_tile_action(tile(40)), Ok(false));
        assert_eq!(board.has_tile_action(tile(12)), Ok(false));
    }

    #[test]
    fn oversized_boards_are_refused_before_allocating() {
        assert_eq!(
            Board::new(65_535, 65_535).map(|board| board.tile_count()),
            Err(EngineError::InvalidConfiguration(ConfigError::BoardTooLarge {
                rows: 65_535,
                columns: 65_535,
            }))
        );
    }

    #[test]
    fn tiles_accept_a_single_action() {
        let mut board = Board::new(2, 5).expect("board builds");
        board.set_snake(tile(9), tile(2)).expect("snake attaches");
        assert_eq!(
            board.set_wormhole(tile(9), Destination::Random),
            Err(EngineError::InvalidConfiguration(ConfigError::TileOccupied {
                number: 9
            }))
        );
        assert_eq!(
            board.action_destination(tile(9)),
            Ok(Some(Destination::Tile(tile(2))))
        );
    }

    #[test]
    fn neighbours_follow_the_visual_grid() {
        let ladder = Board::new(3, 4).expect("board builds");
        assert_eq!(ladder.neighbour(tile(1), Direction::Up), Ok(Some(tile(8))));
        assert_eq!(ladder.neighbour(tile(1), Direction::Down), Ok(None));
        assert_eq!(ladder.neighbour(tile(5), Direction::Left), Ok(Some(tile(6))));

        let grid = Board::with_layout(3, 4, Layout::RowMajor).expect("board builds");
        assert_eq!(grid.neighbour(tile(6), Direction::Up), Ok(Some(tile(2))));
        assert_eq!(grid.neighbour(tile(6), Direction::Down), Ok(Some(tile(10))));
        assert_eq!(grid.neighbour(tile(5), Direction::Left), Ok(None));
        assert_eq!(grid.neighbour(tile(8), Direction::Right), Ok(None));
    }

    #[test]
    fn treasure_grid_attaches_terrain_to_every_tile() {
        let config = TreasureGridConfig {
            name: "tiny".to_owned(),
            description: String::new(),
            cells: vec![vec![0, 2], vec![3, 1]],
        };
        let board = Board::from_treasure_grid(&config).expect("grid builds");

        assert_eq!(board.layout(), Layout::RowMajor);
        assert_eq!(board.terrain(tile(1)), Ok(Some(TerrainKind::Void)));
        assert_eq!(board.tiles_with_terrain(TerrainKind::Treasure), vec![tile(2)]);
        assert_eq!(board.tiles_with_terrain(TerrainKind::Start), vec![tile(3)]);
        assert_eq!(board.has_tile_action(tile(2)), Ok(false));
    }

    #[test]
    fn terrain_tiles_reject_actions() {
        let config = TreasureGridConfig {
            cells: vec![vec![1, 1]],
            ..TreasureGridConfig::default()
        };
        let mut board = Board::from_treasure_grid(&config).expect("grid builds");
        assert!(board.set_ladder(tile(1), tile(2)).is_err());
    }
}
