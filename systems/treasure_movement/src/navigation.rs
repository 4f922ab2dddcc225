//! Distance field guiding automated treasure hunters.

use std::collections::VecDeque;

use tilequest_board::Board;
use tilequest_core::{Direction, Result, TerrainKind, TileNumber};

use crate::{is_walkable, TreasureMovementResolver};

/// Step distances from every tile to the closest treasure.
///
/// Built with a reverse breadth-first search seeded from every treasure tile.
/// Void tiles and tiles cut off from all treasure have no distance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreasureField {
    distances: Vec<Option<u32>>,
}

impl TreasureField {
    /// Computes the field for the provided grid.
    #[must_use]
    pub fn build(board: &Board) -> Self {
        let mut distances = vec![None; board.tiles().len()];
        let mut queue = VecDeque::new();

        for treasure in board.tiles_with_terrain(TerrainKind::Treasure) {
            if let Some(slot) = distance_slot(&mut distances, treasure) {
                *slot = Some(0);
                queue.push_back(treasure);
            }
        }

        while let Some(tile) = queue.pop_front() {
            let Some(Some(current)) = distance_slot(&mut distances, tile).map(|slot| *slot) else {
                continue;
            };
            let next = current.saturating_add(1);

            for direction in Direction::ALL {
                let Ok(Some(neighbour)) = board.neighbour(tile, direction) else {
                    continue;
                };
                if !matches!(is_walkable(board, neighbour), Ok(true)) {
                    continue;
                }
                let Some(slot) = distance_slot(&mut distances, neighbour) else {
                    continue;
                };
                if slot.is_some() {
                    continue;
                }
                *slot = Some(next);
                queue.push_back(neighbour);
            }
        }

        Self { distances }
    }

    /// Steps needed to reach treasure from `tile`, if it can be reached at all.
    #[must_use]
    pub fn distance(&self, tile: TileNumber) -> Option<u32> {
        let index = usize::try_from(tile.get().checked_sub(1)?).ok()?;
        self.distances.get(index).copied().flatten()
    }

    /// Open direction leading closest to treasure.
    ///
    /// Ties resolve in [`Direction::ALL`] order, so a tile cut off from every
    /// treasure still yields its first open direction.
    pub fn best_direction(
        &self,
        board: &Board,
        from: TileNumber,
        remaining: u32,
    ) -> Result<Option<Direction>> {
        let mut best: Option<(u32, Direction)> = None;
        for direction in TreasureMovementResolver.valid_directions(board, from, remaining)? {
            let Some(target) = board.neighbour(from, direction)? else {
                continue;
            };
            let rank = self.distance(target).unwrap_or(u32::MAX);
            if best.map_or(true, |(best_rank, _)| rank < best_rank) {
                best = Some((rank, direction));
            }
        }
        Ok(best.map(|(_, direction)| direction))
    }
}

fn distance_slot(distances: &mut [Option<u32>], tile: TileNumber) -> Option<&mut Option<u32>> {
    let index = usize::try_from(tile.get().checked_sub(1)?).ok()?;
    distances.get_mut(index)
}

#[cfg(test)]
mod tests {
    use tilequest_board::{standard_treasure_config, STANDARD_TREASURE_START};
    use tilequest_core::TreasureGridConfig;

    use super::*;

    #[test]
    fn distances_follow_the_path() {
        let config = TreasureGridConfig {
            cells: vec![vec![3, 1, 1, 2], vec![0, 0, 0, 0]],
            ..TreasureGridConfig::default()
        };
        let board = Board::from_treasure_grid(&config).expect("grid builds");
        let field = TreasureField::build(&board);

        assert_eq!(field.distance(TileNumber::new(1)), Some(3));
        assert_eq!(field.distance(TileNumber::new(4)), Some(0));
        assert_eq!(field.distance(TileNumber::new(5)), None);
        assert_eq!(field.distance(TileNumber::new(0)), None);
    }

    #[test]
    fn standard_grid_is_solvable_from_the_start() {
        let board = Board::from_treasure_grid(&standard_treasure_config()).expect("grid builds");
        let field = TreasureField::build(&board);
        assert!(field.distance(STANDARD_TREASURE_START).is_some());
        assert_eq!(
            field.best_direction(&board, STANDARD_TREASURE_START, 3),
            Ok(Some(Direction::Up))
        );
    }

    #[test]
    fn spent_budgets_have_no_best_direction() {
        let board = Board::from_treasure_grid(&standard_treasure_config()).expect("grid builds");
        let field = TreasureField::build(&board);
        assert_eq!(field.best_direction(&board, STANDARD_TREASURE_START, 0), Ok(None));
    }
}
