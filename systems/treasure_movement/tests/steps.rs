use proptest::prelude::*;
use tilequest_board::{standard_treasure_config, Board, STANDARD_TREASURE_START};
use tilequest_core::{Direction, TerrainKind, TileNumber};
use tilequest_system_treasure_movement::{TreasureField, TreasureMovementResolver};

fn standard() -> Board {
    Board::from_treasure_grid(&standard_treasure_config()).expect("standard grid builds")
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn steps_land_on_walkable_neighbours(start in 1u32..=100, direction in direction(), budget in 0u32..=6) {
        let board = standard();
        let from = TileNumber::new(start);
        let resolver = TreasureMovementResolver;
        match resolver.step(&board, from, direction, budget).expect("tile exists") {
            Some(step) => {
                prop_assert!(budget > 0);
                prop_assert_eq!(step.remaining, budget - 1);
                prop_assert_eq!(Some(step.to), board.neighbour(from, direction).expect("tile exists"));
                let terrain = board.terrain(step.to).expect("tile exists");
                prop_assert!(terrain.map_or(false, TerrainKind::is_walkable));
            }
            None => {
                let open = resolver
                    .valid_position_in_direction(&board, from, direction, budget)
                    .expect("tile exists");
                prop_assert_eq!(open, None);
            }
        }
    }

    #[test]
    fn wandering_never_leaves_the_path(directions in prop::collection::vec(direction(), 0..64)) {
        let board = standard();
        let resolver = TreasureMovementResolver;
        let mut tile = STANDARD_TREASURE_START;
        for direction in directions {
            if let Some(step) = resolver.step(&board, tile, direction, 1).expect("tile exists") {
                tile = step.to;
            }
            let terrain = board.terrain(tile).expect("tile exists");
            prop_assert!(terrain.map_or(false, TerrainKind::is_walkable));
        }
    }
}

#[test]
fn following_the_field_reaches_the_treasure() {
    let board = standard();
    let field = TreasureField::build(&board);
    let resolver = TreasureMovementResolver;
    let mut tile = STANDARD_TREASURE_START;
    let expected = field.distance(tile).expect("start reaches treasure");

    for taken in 1..=expected {
        let direction = field
            .best_direction(&board, tile, 1)
            .expect("tile exists")
            .expect("an open direction");
        let step = resolver
            .step(&board, tile, direction, 1)
            .expect("tile exists")
            .expect("direction is open");
        tile = step.to;
        assert_eq!(step.treasure_found, taken == expected);
    }
    assert_eq!(board.terrain(tile), Ok(Some(TerrainKind::Treasure)));
}
