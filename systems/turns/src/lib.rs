#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn sequencing shared by both game variants.
//!
//! A [`TurnController`] owns the board, the seated players and the only
//! random source of a session. Hosts drive it either through its methods or
//! through [`apply`], and drain the [`Event`] queue after every call. Requests
//! that are merely badly timed, such as rolling while a budget is still being
//! spent, are answered with `None` rather than an error.

use log::{debug, info};
use tilequest_board::{Board, Player, PlayerSetup};
use tilequest_core::{
    Command, ConfigError, Destination, Direction, Event, PlayerId, Result, TileNumber,
};
use tilequest_system_dice::{Dice, RandomSource};
use tilequest_system_tile_actions::TileActionResolver;

mod policy;

pub use policy::{DirectionalMovement, LinearMovement, MovementPolicy, RollEffect};
pub use tilequest_system_tile_actions::Config as WormholeConfig;

/// Stage of the turn cycle a controller is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Waiting for the current player to roll.
    AwaitingRoll,
    /// Dice have been rolled for the current player.
    Rolled,
    /// Tile actions have been applied to the current player.
    ActionResolved,
    /// The current player's position has been checked for victory.
    VictoryChecked,
    /// The turn has passed to the next player.
    TurnAdvanced,
    /// The current player is spending a move budget.
    Moving,
    /// A player has won; only a reset leaves this phase.
    GameWon,
}

/// State machine sequencing a single game session.
#[derive(Debug)]
pub struct TurnController<M> {
    board: Board,
    dice: Dice,
    source: Box<dyn RandomSource>,
    movement: M,
    players: Vec<Player>,
    current: usize,
    phase: TurnPhase,
    winner: Option<PlayerId>,
    last_actor: Option<usize>,
}

impl TurnController<LinearMovement> {
    /// Creates a ladder-race controller whose random wormholes draw from
    /// the window in `wormholes`.
    #[must_use]
    pub fn ladder_race(
        board: Board,
        dice: Dice,
        wormholes: WormholeConfig,
        source: Box<dyn RandomSource>,
    ) -> Self {
        let movement = LinearMovement::new(TileActionResolver::new(wormholes));
        Self::new(board, dice, movement, source)
    }
}

impl TurnController<DirectionalMovement> {
    /// Creates a treasure-hunt controller rolling a single die.
    #[must_use]
    pub fn treasure_hunt(board: Board, source: Box<dyn RandomSource>) -> Self {
        Self::new(board, Dice::default(), DirectionalMovement::default(), source)
    }
}

impl<M: MovementPolicy> TurnController<M> {
    /// Creates a controller with no seated players.
    #[must_use]
    pub fn new(board: Board, dice: Dice, movement: M, source: Box<dyn RandomSource>) -> Self {
        Self {
            board,
            dice,
            source,
            movement,
            players: Vec::new(),
            current: 0,
            phase: TurnPhase::AwaitingRoll,
            winner: None,
            last_actor: None,
        }
    }

    /// Seats the provided players and starts a fresh game.
    ///
    /// Players receive identifiers in seating order. A board without tiles
    /// cannot host a game.
    pub fn setup_game(&mut self, setups: Vec<PlayerSetup>, out: &mut Vec<Event>) -> Result<()> {
        if self.board.tile_count() == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        self.movement.reset();
        self.players = setups
            .into_iter()
            .enumerate()
            .map(|(seat, setup)| {
                let id = PlayerId::new(u32::try_from(seat).unwrap_or(u32::MAX));
                let tile = self.movement.start_tile(&self.board, seat);
                Player::new(id, setup.name, setup.piece, tile)
            })
            .collect();
        self.current = 0;
        self.winner = None;
        self.last_actor = None;
        self.enter(TurnPhase::AwaitingRoll);

        let players = u32::try_from(self.players.len()).unwrap_or(u32::MAX);
        info!("game started on `{}` with {players} players", self.board.name());
        out.push(Event::GameStarted { players });
        Ok(())
    }

    /// Rolls for the current player and carries the turn as far as it goes.
    ///
    /// Returns the dice total, or `None` when a roll is not accepted right
    /// now: nobody is seated, a budget is still being spent or the game is
    /// already won.
    pub fn roll_dice_and_move(&mut self, out: &mut Vec<Event>) -> Result<Option<u32>> {
        if self.phase != TurnPhase::AwaitingRoll {
            debug!("roll ignored during {:?}", self.phase);
            return Ok(None);
        }
        let Some((player, from)) = self
            .players
            .get(self.current)
            .map(|player| (player.id(), player.tile()))
        else {
            return Ok(None);
        };

        let value = self.dice.roll(&mut *self.source);
        self.enter(TurnPhase::Rolled);
        self.last_actor = Some(self.current);
        out.push(Event::DiceRolled { player, value });

        let effect = match self.movement.apply_roll(
            &self.board,
            player,
            from,
            value,
            &mut *self.source,
            out,
        ) {
            Ok(effect) => effect,
            Err(error) => {
                self.enter(TurnPhase::AwaitingRoll);
                return Err(error);
            }
        };

        match effect {
            RollEffect::Moved { destination } => {
                self.move_current(destination);
                self.enter(TurnPhase::ActionResolved);
                self.conclude_move(out);
            }
            RollEffect::BudgetGranted { .. } => {
                self.enter(TurnPhase::Moving);
                if !self.movement.has_any_move(&self.board, from)? {
                    self.advance_turn(out);
                }
            }
        }
        Ok(Some(value))
    }

    /// Spends one unit of the current budget stepping in `direction`.
    ///
    /// Returns the tile stepped onto, or `None` when no budget is being spent
    /// or the direction is blocked. A blocked step costs nothing.
    pub fn move_in_direction(
        &mut self,
        direction: Direction,
        out: &mut Vec<Event>,
    ) -> Result<Option<TileNumber>> {
        if self.phase != TurnPhase::Moving {
            return Ok(None);
        }
        let Some((player, from)) = self
            .players
            .get(self.current)
            .map(|player| (player.id(), player.tile()))
        else {
            return Ok(None);
        };
        let Some(to) = self
            .movement
            .step(&self.board, player, from, direction, out)?
        else {
            return Ok(None);
        };

        self.move_current(to);
        self.last_actor = Some(self.current);
        if self.movement.has_won(&self.board, to) {
            self.conclude_move(out);
        } else if self.movement.remaining_moves() == 0
            || !self.movement.has_any_move(&self.board, to)?
        {
            self.enter(TurnPhase::VictoryChecked);
            self.advance_turn(out);
        }
        Ok(Some(to))
    }

    /// Tile one budget unit would reach in `direction` for the current player.
    ///
    /// Returns `None` outside a budget or when the direction is blocked.
    pub fn valid_position_in_direction(&self, direction: Direction) -> Result<Option<TileNumber>> {
        if self.phase != TurnPhase::Moving {
            return Ok(None);
        }
        let Some(player) = self.current_player() else {
            return Ok(None);
        };
        self.movement
            .position_in_direction(&self.board, player.tile(), direction)
    }

    /// Passes the turn to the next seated player.
    ///
    /// Any unspent budget is forfeited. Does nothing when nobody is seated
    /// or once the game has been won.
    pub fn advance_turn(&mut self, out: &mut Vec<Event>) {
        if self.players.is_empty() || self.phase == TurnPhase::GameWon {
            return;
        }

        let forfeited = self.movement.forfeit();
        if forfeited > 0 {
            if let Some(player) = self.current_player().map(Player::id) {
                debug!("player {} forfeits {forfeited} moves", player.get());
                out.push(Event::MovesForfeited {
                    player,
                    remaining: forfeited,
                });
            }
        }

        self.current = (self.current + 1) % self.players.len();
        self.enter(TurnPhase::TurnAdvanced);
        if let Some(player) = self.current_player().map(Player::id) {
            out.push(Event::TurnAdvanced { player });
        }
        self.enter(TurnPhase::AwaitingRoll);
    }

    /// Returns every player to their start tile and clears the winner.
    pub fn reset_game(&mut self, out: &mut Vec<Event>) {
        self.movement.reset();
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.move_to(self.movement.start_tile(&self.board, seat));
        }
        self.current = 0;
        self.winner = None;
        self.last_actor = None;
        self.enter(TurnPhase::AwaitingRoll);
        info!("game on `{}` reset", self.board.name());
        out.push(Event::GameReset);
    }

    /// Reports whether the provided player stands on a winning tile.
    #[must_use]
    pub fn check_victory(&self, player: &Player) -> bool {
        self.movement.has_won(&self.board, player.tile())
    }

    /// Reports whether the tile carries a ladder, snake or wormhole.
    pub fn has_tile_action(&self, tile: TileNumber) -> Result<bool> {
        self.board.has_tile_action(tile)
    }

    /// Destination of the tile's action, or `None` for tiles without one.
    pub fn action_destination(&self, tile: TileNumber) -> Result<Option<Destination>> {
        self.board.action_destination(tile)
    }

    /// Player whose turn it is, or `None` when nobody is seated.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    /// Seated players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Board the session is played on.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Current stage of the turn cycle.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Winner of the session, once there is one.
    #[must_use]
    pub const fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Steps left in the current player's budget.
    #[must_use]
    pub fn remaining_moves(&self) -> u32 {
        self.movement.remaining_moves()
    }

    /// Human-readable account of the most recent roll or step.
    #[must_use]
    pub fn last_description(&self) -> Option<String> {
        let player = self.players.get(self.last_actor?)?;
        self.movement.describe_last(player.name())
    }

    fn move_current(&mut self, tile: TileNumber) {
        if let Some(player) = self.players.get_mut(self.current) {
            player.move_to(tile);
        }
    }

    fn conclude_move(&mut self, out: &mut Vec<Event>) {
        self.enter(TurnPhase::VictoryChecked);
        let Some(player) = self.current_player() else {
            return;
        };
        if self.check_victory(player) {
            let (id, tile) = (player.id(), player.tile());
            info!("player {} won on tile {tile}", id.get());
            self.winner = Some(id);
            let _ = self.movement.forfeit();
            self.enter(TurnPhase::GameWon);
            out.push(Event::VictoryReached { player: id, tile });
        } else {
            self.advance_turn(out);
        }
    }

    fn enter(&mut self, phase: TurnPhase) {
        if self.phase != phase {
            debug!("turn phase {:?} -> {phase:?}", self.phase);
        }
        self.phase = phase;
    }
}

/// Applies a command to the controller, appending the resulting events.
pub fn apply<M: MovementPolicy>(
    controller: &mut TurnController<M>,
    command: Command,
    out: &mut Vec<Event>,
) -> Result<()> {
    match command {
        Command::RollDice => {
            let _ = controller.roll_dice_and_move(out)?;
        }
        Command::Step { direction } => {
            let _ = controller.move_in_direction(direction, out)?;
        }
        Command::AdvanceTurn => controller.advance_turn(out),
        Command::Reset => controller.reset_game(out),
    }
    Ok(())
}
