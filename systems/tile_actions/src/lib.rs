#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Resolves where a ladder-race roll leaves a player.
//!
//! A roll first moves the player linearly, stopping at the last tile rather
//! than bouncing back. The tile landed on then gets one chance to fire its
//! action. Ladders and snakes jump to fixed destinations. Random wormholes
//! draw a fresh displacement from the injected [`RandomSource`] on every
//! landing. Actions never chain: the tile a jump ends on is not inspected.

use log::debug;
use tilequest_board::Board;
use tilequest_core::{Destination, Event, PlayerId, Result, TileKind, TileNumber};
use tilequest_system_dice::RandomSource;

/// Furthest a random wormhole may throw a player backwards.
pub const WORMHOLE_MIN_DISPLACEMENT: i32 = -15;
/// Furthest a random wormhole may throw a player forwards.
pub const WORMHOLE_MAX_DISPLACEMENT: i32 = 20;

/// Configuration parameters required to construct the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    min_displacement: i32,
    max_displacement: i32,
}

impl Config {
    /// Creates a configuration drawing wormhole displacements from
    /// `min_displacement..=max_displacement`.
    #[must_use]
    pub const fn new(min_displacement: i32, max_displacement: i32) -> Self {
        Self {
            min_displacement,
            max_displacement,
        }
    }

    /// Inclusive bounds of a random wormhole displacement.
    #[must_use]
    pub const fn displacement_range(&self) -> (i32, i32) {
        (self.min_displacement, self.max_displacement)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(WORMHOLE_MIN_DISPLACEMENT, WORMHOLE_MAX_DISPLACEMENT)
    }
}

/// Action that fired on the landing tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The landing tile carried no action.
    Plain,
    /// A ladder lifted the player.
    Ladder,
    /// A snake dropped the player.
    Snake,
    /// A wormhole teleported the player.
    Wormhole {
        /// Displacement drawn by a random wormhole, or implied by a fixed one.
        displacement: i32,
    },
}

/// Full account of a single ladder-race roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Tile occupied before the roll.
    pub start: TileNumber,
    /// Total shown by the dice.
    pub roll: u32,
    /// Tile reached by linear movement alone.
    pub landed: TileNumber,
    /// Tile the player ends the roll on.
    pub destination: TileNumber,
    /// Action that fired on the landing tile.
    pub outcome: Outcome,
}

impl Resolution {
    /// Appends the movement event and, if an action fired, its event.
    pub fn emit(&self, player: PlayerId, out: &mut Vec<Event>) {
        out.push(Event::PlayerMoved {
            player,
            from: self.start,
            to: self.landed,
        });
        let (from, to) = (self.landed, self.destination);
        match self.outcome {
            Outcome::Plain => {}
            Outcome::Ladder => out.push(Event::LadderClimbed { player, from, to }),
            Outcome::Snake => out.push(Event::SnakeSlid { player, from, to }),
            Outcome::Wormhole { displacement } => out.push(Event::WormholeTeleport {
                player,
                from,
                to,
                displacement,
            }),
        }
    }

    /// Human-readable account of the roll.
    ///
    /// A wormhole that draws no displacement gets its own wording instead of
    /// a "moved 0 tiles" message. One whose exit is held back by the edge of
    /// the board says so rather than pretending nothing was drawn.
    #[must_use]
    pub fn describe(&self, player_name: &str) -> String {
        let Self {
            start,
            roll,
            landed,
            destination,
            outcome,
        } = *self;
        match outcome {
            Outcome::Plain if roll == 0 => {
                format!("{player_name} rolled 0 and stayed on {start}.")
            }
            Outcome::Plain if start == landed => {
                format!("{player_name} rolled {roll} but is already on the last tile {landed}.")
            }
            Outcome::Plain => {
                format!("{player_name} rolled {roll} and moved from {start} to {landed}.")
            }
            Outcome::Ladder => format!(
                "{player_name} rolled {roll}, landed on {landed} and climbed a ladder to {destination}."
            ),
            Outcome::Snake => format!(
                "{player_name} rolled {roll}, landed on {landed} and slid down a snake to {destination}."
            ),
            Outcome::Wormhole { displacement: 0 } => format!(
                "{player_name} rolled {roll}, fell into the wormhole on {landed} and came out in the same place."
            ),
            Outcome::Wormhole { displacement } => {
                let travelled = landed.displacement_to(destination);
                if travelled == 0 {
                    let edge = if displacement > 0 { "last" } else { "first" };
                    format!(
                        "{player_name} rolled {roll}, fell into the wormhole on {landed} and was pinned against the {edge} tile {destination}."
                    )
                } else if travelled > 0 {
                    format!(
                        "{player_name} rolled {roll}, fell into the wormhole on {landed} and was thrown {travelled} tiles forward to {destination}."
                    )
                } else {
                    format!(
                        "{player_name} rolled {roll}, fell into the wormhole on {landed} and was thrown {} tiles back to {destination}.",
                        travelled.unsigned_abs()
                    )
                }
            }
        }
    }
}

/// Tile reached by moving `roll` tiles forward from `start`.
///
/// Movement stops on the last tile; overshooting rolls do not bounce back.
#[must_use]
pub fn landing_tile(start: TileNumber, roll: u32, tile_count: u32) -> TileNumber {
    TileNumber::new(start.get().saturating_add(roll).min(tile_count))
}

/// Tile a random wormhole on `landed` sends a player to.
///
/// The result never drops below the first tile and never passes the last.
#[must_use]
pub fn wormhole_exit(landed: TileNumber, displacement: i32, tile_count: u32) -> TileNumber {
    let raw = i64::from(landed.get()) + i64::from(displacement);
    let clamped = raw.clamp(1, i64::from(tile_count.max(1)));
    TileNumber::new(u32::try_from(clamped).unwrap_or(1))
}

/// Pure system resolving ladder, snake and wormhole tiles.
#[derive(Clone, Copy, Debug, Default)]
pub struct TileActionResolver {
    config: Config,
}

impl TileActionResolver {
    /// Creates a resolver using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Moves a player `roll` tiles from `start` and fires the landing tile's action.
    ///
    /// Fails only when `start` or a fixed destination does not exist on the board.
    pub fn resolve(
        &self,
        board: &Board,
        start: TileNumber,
        roll: u32,
        source: &mut dyn RandomSource,
    ) -> Result<Resolution> {
        let _ = board.tile(start)?;
        let landed = landing_tile(start, roll, board.tile_count());
        let (destination, outcome) = self.resolve_landing(board, landed, source)?;
        debug!("roll {roll} from {start}: landed on {landed}, finished on {destination} ({outcome:?})");
        Ok(Resolution {
            start,
            roll,
            landed,
            destination,
            outcome,
        })
    }

    /// Fires the action of the tile a player has just landed on.
    pub fn resolve_landing(
        &self,
        board: &Board,
        landed: TileNumber,
        source: &mut dyn RandomSource,
    ) -> Result<(TileNumber, Outcome)> {
        let resolved = match board.tile(landed)?.kind() {
            TileKind::Ladder { destination } => (destination, Outcome::Ladder),
            TileKind::Snake { destination } => (destination, Outcome::Snake),
            TileKind::Wormhole {
                destination: Destination::Tile(destination),
            } => (
                destination,
                Outcome::Wormhole {
                    displacement: landed.displacement_to(destination),
                },
            ),
            TileKind::Wormhole {
                destination: Destination::Random,
            } => {
                let (low, high) = self.config.displacement_range();
                let displacement = source.roll_between(low, high);
                (
                    wormhole_exit(landed, displacement, board.tile_count()),
                    Outcome::Wormhole { displacement },
                )
            }
            TileKind::Plain | TileKind::Terrain(_) => (landed, Outcome::Plain),
        };
        Ok(resolved)
    }
}
