//! Movement strategies plugged into the turn controller.

use std::{fmt, mem};

use tilequest_board::Board;
use tilequest_core::{Direction, Event, PlayerId, Result, TerrainKind, TileNumber};
use tilequest_system_dice::RandomSource;
use tilequest_system_tile_actions::{Resolution, TileActionResolver};
use tilequest_system_treasure_movement::{self as treasure, Step, TreasureMovementResolver};

/// What a dice roll did to the player who rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollEffect {
    /// The player was moved and the move is complete.
    Moved {
        /// Tile the player ends the roll on.
        destination: TileNumber,
    },
    /// The player received a budget of single steps to spend.
    BudgetGranted {
        /// Number of steps granted.
        budget: u32,
    },
}

/// Variant-specific movement rules.
///
/// The ladder race moves players linearly by the dice total. The treasure hunt
/// turns the dice total into a budget spent one direction at a time; the
/// directional methods default to "no move" for policies without one.
pub trait MovementPolicy: fmt::Debug {
    /// Tile the player in `seat` starts on.
    fn start_tile(&self, board: &Board, seat: usize) -> TileNumber;

    /// Applies a dice roll to `player`, who stands on `from`.
    fn apply_roll(
        &mut self,
        board: &Board,
        player: PlayerId,
        from: TileNumber,
        roll: u32,
        source: &mut dyn RandomSource,
        out: &mut Vec<Event>,
    ) -> Result<RollEffect>;

    /// Reports whether standing on `tile` wins the game.
    fn has_won(&self, board: &Board, tile: TileNumber) -> bool;

    /// Human-readable account of the most recent roll or step.
    fn describe_last(&self, player_name: &str) -> Option<String>;

    /// Clears any per-turn state.
    fn reset(&mut self);

    /// Steps left in the current budget.
    fn remaining_moves(&self) -> u32 {
        0
    }

    /// Tile one budget unit would reach in `direction`.
    fn position_in_direction(
        &self,
        _board: &Board,
        _from: TileNumber,
        _direction: Direction,
    ) -> Result<Option<TileNumber>> {
        Ok(None)
    }

    /// Spends one budget unit stepping in `direction`, returning the new tile.
    fn step(
        &mut self,
        _board: &Board,
        _player: PlayerId,
        _from: TileNumber,
        _direction: Direction,
        _out: &mut Vec<Event>,
    ) -> Result<Option<TileNumber>> {
        Ok(None)
    }

    /// Reports whether any direction is open from `from` with the current budget.
    fn has_any_move(&self, _board: &Board, _from: TileNumber) -> Result<bool> {
        Ok(false)
    }

    /// Discards the rest of the budget and returns how much was discarded.
    fn forfeit(&mut self) -> u32 {
        0
    }
}

/// Ladder-race movement: advance by the dice total, then fire the tile action.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearMovement {
    resolver: TileActionResolver,
    last: Option<Resolution>,
}

impl LinearMovement {
    /// Creates a policy resolving tile actions with the provided resolver.
    #[must_use]
    pub const fn new(resolver: TileActionResolver) -> Self {
        Self {
            resolver,
            last: None,
        }
    }
}

impl MovementPolicy for LinearMovement {
    fn start_tile(&self, _board: &Board, _seat: usize) -> TileNumber {
        TileNumber::FIRST
    }

    fn apply_roll(
        &mut self,
        board: &Board,
        player: PlayerId,
        from: TileNumber,
        roll: u32,
        source: &mut dyn RandomSource,
        out: &mut Vec<Event>,
    ) -> Result<RollEffect> {
        let resolution = self.resolver.resolve(board, from, roll, source)?;
        resolution.emit(player, out);
        self.last = Some(resolution);
        Ok(RollEffect::Moved {
            destination: resolution.destination,
        })
    }

    fn has_won(&self, board: &Board, tile: TileNumber) -> bool {
        board.tile_count() > 0 && tile.get() >= board.tile_count()
    }

    fn describe_last(&self, player_name: &str) -> Option<String> {
        self.last.map(|resolution| resolution.describe(player_name))
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Latest {
    Granted(u32),
    Stepped(Step),
}

/// Treasure-hunt movement: the dice total becomes a budget of single steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionalMovement {
    resolver: TreasureMovementResolver,
    remaining: u32,
    latest: Option<Latest>,
}

impl MovementPolicy for DirectionalMovement {
    fn start_tile(&self, board: &Board, seat: usize) -> TileNumber {
        treasure::start_tile(board, seat)
    }

    fn apply_roll(
        &mut self,
        board: &Board,
        player: PlayerId,
        from: TileNumber,
        roll: u32,
        _source: &mut dyn RandomSource,
        out: &mut Vec<Event>,
    ) -> Result<RollEffect> {
        let _ = board.tile(from)?;
        self.remaining = roll;
        self.latest = Some(Latest::Granted(roll));
        out.push(Event::MoveBudgetGranted {
            player,
            budget: roll,
        });
        Ok(RollEffect::BudgetGranted { budget: roll })
    }

    fn has_won(&self, board: &Board, tile: TileNumber) -> bool {
        board.terrain(tile) == Ok(Some(TerrainKind::Treasure))
    }

    fn describe_last(&self, player_name: &str) -> Option<String> {
        match self.latest? {
            Latest::Granted(budget) => Some(format!("{player_name} may take {budget} steps.")),
            Latest::Stepped(step) => Some(step.describe(player_name)),
        }
    }

    fn reset(&mut self) {
        self.remaining = 0;
        self.latest = None;
    }

    fn remaining_moves(&self) -> u32 {
        self.remaining
    }

    fn position_in_direction(
        &self,
        board: &Board,
        from: TileNumber,
        direction: Direction,
    ) -> Result<Option<TileNumber>> {
        self.resolver
            .valid_position_in_direction(board, from, direction, self.remaining)
    }

    fn has_any_move(&self, board: &Board, from: TileNumber) -> Result<bool> {
        self.resolver.has_any_move(board, from, self.remaining)
    }

    fn step(
        &mut self,
        board: &Board,
        player: PlayerId,
        from: TileNumber,
        direction: Direction,
        out: &mut Vec<Event>,
    ) -> Result<Option<TileNumber>> {
        let Some(step) = self.resolver.step(board, from, direction, self.remaining)? else {
            return Ok(None);
        };
        self.remaining = step.remaining;
        self.latest = Some(Latest::Stepped(step));
        step.emit(player, out);
        Ok(Some(step.to))
    }

    fn forfeit(&mut self) -> u32 {
        mem::take(&mut self.remaining)
    }
}
