//! Computer-only tournaments, played without asking anything.

use std::io::Write;

use anyhow::Result;
use parlor_tictactoe::{
    Controller, Phase, Player, RoundOutcome, StartOrder, Tournament, TournamentSettings,
    Unattended, random_new_marker,
};
use tracing::{info, instrument};

use crate::config::GameConfig;
use crate::render;

/// Grid size used when the config does not name one.
pub const DEFAULT_GRID_SIZE: usize = 3;

/// Rounds played before giving up on a tournament that keeps tying.
pub const MAX_ROUNDS: u32 = 50;

/// Plays one tournament between `players` computers, writing each round's
/// final board and result to `out`.
///
/// Returns the winner's name, or `None` if [`MAX_ROUNDS`] rounds all tied.
///
/// # Errors
///
/// Fails on fewer than two players or when `out` cannot be written.
#[instrument(skip(config, out))]
pub fn run(config: &GameConfig, players: u32, out: &mut impl Write) -> Result<Option<String>> {
    let dimension = config.grid_size().unwrap_or(DEFAULT_GRID_SIZE);
    let mut rng = config.rng();

    let mut roster: Vec<Player> = Vec::new();
    for n in 1..=players {
        let taken: Vec<_> = roster.iter().map(Player::marker).collect();
        let marker = random_new_marker(&taken, &mut rng)
            .ok_or_else(|| anyhow::anyhow!("Ran out of markers"))?;
        roster.push(Player::new(format!("Computer {}", n), marker, Controller::Computer));
    }

    let settings = TournamentSettings::new(
        dimension,
        *config.score_limit(),
        config.strategy_for(dimension),
    );
    let mut tournament = Tournament::new(roster, settings, rng)?;
    tournament.begin(config.start_order().unwrap_or(StartOrder::Random))?;

    for round in 1..=MAX_ROUNDS {
        let outcome = tournament.play_round(&mut Unattended)?;
        writeln!(out, "Round {}", round)?;
        write!(out, "{}", render::board(tournament.board()))?;
        match outcome {
            RoundOutcome::Won { player, .. } => {
                let name = tournament
                    .player(player)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                writeln!(out, "=> {} won!", name)?;
            }
            RoundOutcome::Tie => writeln!(out, "=> It's a tie!")?,
        }
        writeln!(out)?;

        if tournament.phase() == Phase::TournamentComplete {
            break;
        }
        tournament.next_round()?;
    }

    for (player, score) in tournament.scores_by_player() {
        writeln!(out, "{}: {}", player, score)?;
    }

    let winner = tournament
        .tournament_winner()
        .map(|player| player.name().clone());
    match &winner {
        Some(name) => {
            writeln!(out, "=> {} won the tournament!", name)?;
            info!(winner = %name, "Simulation finished");
        }
        None => writeln!(out, "=> No winner after {} rounds", MAX_ROUNDS)?,
    }
    Ok(winner)
}
