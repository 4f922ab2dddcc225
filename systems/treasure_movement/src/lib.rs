#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Directional movement used by the treasure hunt.
//!
//! A dice roll grants a move budget; every unit of budget buys a single step
//! to an adjacent walkable tile. Stepping onto treasure ends the game no
//! matter how much budget is left.

use log::debug;
use tilequest_board::Board;
use tilequest_core::{Direction, Event, PlayerId, Result, TerrainKind, TileNumber};

mod navigation;

pub use navigation::TreasureField;

/// Single directional step taken with one unit of budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    /// Tile occupied before the step.
    pub from: TileNumber,
    /// Tile occupied after the step.
    pub to: TileNumber,
    /// Direction of the step.
    pub direction: Direction,
    /// Budget left after the step.
    pub remaining: u32,
    /// Whether the step entered a treasure tile.
    pub treasure_found: bool,
}

impl Step {
    /// Appends the step event and, when the treasure was reached, its event.
    pub fn emit(&self, player: PlayerId, out: &mut Vec<Event>) {
        out.push(Event::PlayerStepped {
            player,
            from: self.from,
            to: self.to,
            direction: self.direction,
            remaining: self.remaining,
        });
        if self.treasure_found {
            out.push(Event::TreasureFound {
                player,
                tile: self.to,
            });
        }
    }

    /// Human-readable account of the step.
    #[must_use]
    pub fn describe(&self, player_name: &str) -> String {
        let Self {
            from,
            to,
            direction,
            remaining,
            treasure_found,
        } = *self;
        if treasure_found {
            return format!("{player_name} stepped {direction} from {from} to {to} and found the treasure!");
        }
        match remaining {
            0 => format!("{player_name} stepped {direction} from {from} to {to} and has no moves left."),
            1 => format!("{player_name} stepped {direction} from {from} to {to} with 1 move left."),
            _ => format!("{player_name} stepped {direction} from {from} to {to} with {remaining} moves left."),
        }
    }
}

/// Pure system resolving directional steps on a terrain grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreasureMovementResolver;

impl TreasureMovementResolver {
    /// Tile reachable from `from` by spending one unit of budget in `direction`.
    ///
    /// Returns `None` when the budget is spent, the step leaves the board or
    /// the target is void. Fails only when `from` is not on the board.
    pub fn valid_position_in_direction(
        &self,
        board: &Board,
        from: TileNumber,
        direction: Direction,
        remaining: u32,
    ) -> Result<Option<TileNumber>> {
        let Some(target) = board.neighbour(from, direction)? else {
            return Ok(None);
        };
        if remaining == 0 || !is_walkable(board, target)? {
            return Ok(None);
        }
        Ok(Some(target))
    }

    /// Directions that currently lead somewhere, in [`Direction::ALL`] order.
    pub fn valid_directions(
        &self,
        board: &Board,
        from: TileNumber,
        remaining: u32,
    ) -> Result<Vec<Direction>> {
        let mut directions = Vec::with_capacity(Direction::ALL.len());
        for direction in Direction::ALL {
            if self
                .valid_position_in_direction(board, from, direction, remaining)?
                .is_some()
            {
                directions.push(direction);
            }
        }
        Ok(directions)
    }

    /// Reports whether any direction is open with the provided budget.
    pub fn has_any_move(&self, board: &Board, from: TileNumber, remaining: u32) -> Result<bool> {
        Ok(!self.valid_directions(board, from, remaining)?.is_empty())
    }

    /// Spends one unit of budget stepping in `direction`.
    ///
    /// Returns `None`, leaving the budget untouched, when the step is blocked.
    pub fn step(
        &self,
        board: &Board,
        from: TileNumber,
        direction: Direction,
        remaining: u32,
    ) -> Result<Option<Step>> {
        let Some(to) = self.valid_position_in_direction(board, from, direction, remaining)? else {
            debug!("step {direction} from {from} blocked with {remaining} moves left");
            return Ok(None);
        };
        let treasure_found = board.terrain(to)? == Some(TerrainKind::Treasure);
        Ok(Some(Step {
            from,
            to,
            direction,
            remaining: remaining - 1,
            treasure_found,
        }))
    }
}

/// Tile seat `seat` starts on.
///
/// Seats cycle through the grid's start tiles in number order. Grids without
/// start tiles seat everyone on the first walkable tile that is not treasure,
/// and grids without such a tile fall back to the first tile.
#[must_use]
pub fn start_tile(board: &Board, seat: usize) -> TileNumber {
    let starts = board.tiles_with_terrain(TerrainKind::Start);
    if let Some(tile) = starts.get(seat % starts.len().max(1)) {
        return *tile;
    }
    board
        .tiles()
        .iter()
        .find(|tile| match tile.kind().terrain() {
            Some(TerrainKind::Treasure) => false,
            terrain => terrain.map_or(true, TerrainKind::is_walkable),
        })
        .map_or(TileNumber::FIRST, |tile| tile.number())
}

fn is_walkable(board: &Board, number: TileNumber) -> Result<bool> {
    Ok(board
        .terrain(number)?
        .map_or(true, TerrainKind::is_walkable))
}

#[cfg(test)]
mod tests {
    use tilequest_board::{standard_treasure_config, STANDARD_TREASURE_START};
    use tilequest_core::TreasureGridConfig;

    use super::*;

    fn tile(number: u32) -> TileNumber {
        TileNumber::new(number)
    }

    fn grid(cells: Vec<Vec<u8>>) -> Board {
        let config = TreasureGridConfig {
            cells,
            ..TreasureGridConfig::default()
        };
        Board::from_treasure_grid(&config).expect("grid builds")
    }

    fn standard() -> Board {
        Board::from_treasure_grid(&standard_treasure_config()).expect("standard grid builds")
    }

    #[test]
    fn stepping_up_from_the_standard_start_spends_one_move() {
        let board = standard();
        let step = TreasureMovementResolver
            .step(&board, STANDARD_TREASURE_START, Direction::Up, 3)
            .expect("start exists")
            .expect("path above the start");
        assert_eq!(step.to, tile(85));
        assert_eq!(step.remaining, 2);
        assert!(!step.treasure_found);
    }

    #[test]
    fn void_edges_and_spent_budgets_block_movement() {
        let board = standard();
        let resolver = TreasureMovementResolver;
        let start = STANDARD_TREASURE_START;
        assert_eq!(
            resolver.valid_position_in_direction(&board, start, Direction::Left, 3),
            Ok(None)
        );
        assert_eq!(
            resolver.valid_position_in_direction(&board, start, Direction::Down, 3),
            Ok(None)
        );
        assert_eq!(
            resolver.valid_position_in_direction(&board, start, Direction::Up, 0),
            Ok(None)
        );
        assert_eq!(
            resolver.valid_directions(&board, start, 1),
            Ok(vec![Direction::Up])
        );
    }

    #[test]
    fn blocked_steps_leave_no_trace() {
        let board = standard();
        assert_eq!(
            TreasureMovementResolver.step(&board, STANDARD_TREASURE_START, Direction::Right, 2),
            Ok(None)
        );
    }

    #[test]
    fn treasure_is_found_with_budget_to_spare() {
        let board = grid(vec![vec![3, 1, 2]]);
        let resolver = TreasureMovementResolver;
        let first = resolver
            .step(&board, tile(1), Direction::Right, 6)
            .expect("start exists")
            .expect("path is open");
        let second = resolver
            .step(&board, first.to, Direction::Right, first.remaining)
            .expect("path exists")
            .expect("treasure is open");
        assert!(second.treasure_found);
        assert_eq!(second.remaining, 4);

        let mut events = Vec::new();
        second.emit(PlayerId::new(1), &mut events);
        assert_eq!(
            events.last(),
            Some(&Event::TreasureFound {
                player: PlayerId::new(1),
                tile: tile(3),
            })
        );
        assert!(second.describe("Ada").contains("found the treasure"));
    }

    #[test]
    fn unknown_origins_are_rejected() {
        let board = grid(vec![vec![3, 1]]);
        assert!(TreasureMovementResolver
            .valid_position_in_direction(&board, tile(9), Direction::Left, 1)
            .is_err());
    }

    #[test]
    fn enclosed_tiles_have_no_moves() {
        let board = grid(vec![vec![0, 0, 0], vec![0, 3, 0], vec![0, 2, 0]]);
        let resolver = TreasureMovementResolver;
        assert_eq!(resolver.has_any_move(&board, tile(5), 3), Ok(true));

        let sealed = grid(vec![vec![0, 0, 0], vec![0, 3, 0], vec![0, 0, 2]]);
        assert_eq!(resolver.has_any_move(&sealed, tile(5), 3), Ok(false));
    }

    #[test]
    fn seats_cycle_through_start_tiles() {
        let board = grid(vec![vec![3, 1, 3], vec![1, 2, 1]]);
        assert_eq!(start_tile(&board, 0), tile(1));
        assert_eq!(start_tile(&board, 1), tile(3));
        assert_eq!(start_tile(&board, 2), tile(1));
    }

    #[test]
    fn grids_without_starts_seat_on_the_first_walkable_tile() {
        assert_eq!(start_tile(&grid(vec![vec![0, 0, 1, 2]]), 4), tile(3));
        assert_eq!(start_tile(&grid(vec![vec![0, 0]]), 0), TileNumber::FIRST);
    }

    #[test]
    fn fallback_seats_never_start_on_the_treasure() {
        assert_eq!(start_tile(&grid(vec![vec![2, 1]]), 0), tile(2));
        assert_eq!(start_tile(&grid(vec![vec![0, 2], vec![1, 1]]), 1), tile(3));
    }

    #[test]
    fn budget_descriptions_count_remaining_moves() {
        let step = Step {
            from: tile(95),
            to: tile(85),
            direction: Direction::Up,
            remaining: 1,
            treasure_found: false,
        };
        assert_eq!(
            step.describe("Ada"),
            "Ada stepped up from 95 to 85 with 1 move left."
        );
    }
}
