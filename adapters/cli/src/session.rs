//! Automated play of a full session, narrated to a writer.

use std::io::Write;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use tilequest_board::Board;
use tilequest_core::{Command, Event, PlayerId};
use tilequest_system_dice::{Dice, EntropySource, RandomSource, SeededSource};
use tilequest_system_treasure_movement::TreasureField;
use tilequest_system_turns::{self as turns, MovementPolicy, TurnController, TurnPhase};

use crate::settings::Settings;

/// Plays a ladder race until someone wins or `max_turns` rolls were made.
pub(crate) fn play_ladders(
    board: Board,
    settings: &Settings,
    max_turns: u32,
    out: &mut impl Write,
) -> Result<()> {
    let dice = Dice::new(settings.dice).context("invalid dice count")?;
    let controller = TurnController::ladder_race(
        board,
        dice,
        settings.wormhole,
        random_source(settings.seed),
    );
    run(controller, settings, max_turns, out, |_| Ok(Command::RollDice))
}

/// Plays a treasure hunt, stepping every player along the shortest path.
pub(crate) fn play_treasure(
    board: Board,
    settings: &Settings,
    max_turns: u32,
    out: &mut impl Write,
) -> Result<()> {
    if settings.dice != 1 {
        warn!(
            "treasure hunts roll a single die; ignoring dice = {}",
            settings.dice
        );
    }
    let field = TreasureField::build(&board);
    let controller = TurnController::treasure_hunt(board, random_source(settings.seed));
    run(controller, settings, max_turns, out, |controller| {
        if controller.phase() != TurnPhase::Moving {
            return Ok(Command::RollDice);
        }
        let Some(player) = controller.current_player() else {
            bail!("no player is seated");
        };
        let direction = field
            .best_direction(controller.board(), player.tile(), controller.remaining_moves())?
            .context("no open direction while moving")?;
        Ok(Command::Step { direction })
    })
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => {
            info!("rolling with seed {seed}");
            Box::new(SeededSource::new(seed))
        }
        None => Box::new(EntropySource::new()),
    }
}

fn run<M: MovementPolicy>(
    mut controller: TurnController<M>,
    settings: &Settings,
    max_turns: u32,
    out: &mut impl Write,
    mut choose: impl FnMut(&TurnController<M>) -> Result<Command>,
) -> Result<()> {
    let mut events = Vec::new();
    controller
        .setup_game(settings.players.clone(), &mut events)
        .context("failed to start the game")?;

    let board = controller.board();
    writeln!(out, "{} ({}x{})", board.name(), board.rows(), board.columns())?;
    if !board.description().is_empty() {
        writeln!(out, "{}", board.description())?;
    }
    for player in controller.players() {
        writeln!(
            out,
            "  {} plays piece {} from tile {}",
            player.name(),
            player.piece().get(),
            player.tile()
        )?;
    }

    let mut rolls = 0;
    while controller.winner().is_none() && rolls < max_turns {
        events.clear();
        let command = choose(&controller)?;
        turns::apply(&mut controller, command, &mut events)?;
        if events.is_empty() {
            bail!("{command:?} was not accepted during {:?}", controller.phase());
        }
        for event in &events {
            if let Event::DiceRolled { .. } = event {
                rolls += 1;
            }
        }
        narrate(&controller, &events, rolls, out)?;
    }

    if controller.winner().is_none() {
        writeln!(out, "No winner after {rolls} turns.")?;
    }
    Ok(())
}

fn narrate<M: MovementPolicy>(
    controller: &TurnController<M>,
    events: &[Event],
    rolls: u32,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(description) = controller.last_description() {
        writeln!(out, "[{rolls:>3}] {description}")?;
    }
    for event in events {
        match *event {
            Event::MovesForfeited { player, remaining } => writeln!(
                out,
                "      {} has nowhere to go and forfeits {remaining} moves.",
                name_of(controller, player)
            )?,
            Event::VictoryReached { player, tile } => writeln!(
                out,
                "{} wins on tile {tile} after {rolls} turns.",
                name_of(controller, player)
            )?,
            _ => {}
        }
    }
    Ok(())
}

fn name_of<M>(controller: &TurnController<M>, id: PlayerId) -> &str
where
    M: MovementPolicy,
{
    controller
        .players()
        .iter()
        .find(|player| player.id() == id)
        .map_or("someone", |player| player.name())
}
