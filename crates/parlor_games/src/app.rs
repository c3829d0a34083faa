//! The interactive tic-tac-toe session.
//!
//! Setup questions the config leaves open are asked once per session. Then
//! tournaments are played back to back until the players decline a rematch.

use std::io::{BufRead, Write};

use anyhow::Result;
use parlor_tictactoe::{
    Controller, Marker, Phase, Player, RoundOutcome, StartOrder, Tournament, TournamentError,
    TournamentSettings, random_new_marker,
};
use rand::Rng;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;
use crate::prompt::{Prompter, joinor};
use crate::render;

/// An interactive session over one prompter.
#[derive(Debug)]
pub struct App<R, W> {
    prompter: Prompter<R, W>,
    config: GameConfig,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Creates a session that talks through `prompter`.
    pub fn new(prompter: Prompter<R, W>, config: GameConfig) -> Self {
        Self { prompter, config }
    }

    /// Gives back the prompter, for inspecting a finished session.
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Runs the whole session: welcome, setup, tournaments, goodbye.
    ///
    /// # Errors
    ///
    /// Fails when input closes or the game core rejects the setup.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<()> {
        self.prompter.clear_screen()?;
        self.prompter.say("Welcome to Tic Tac Toe")?;
        self.prompter.blank_line()?;

        let dimension = match self.config.grid_size() {
            Some(size) => *size,
            None => self
                .prompter
                .strict_positive_int("How many squares do you want per side?")?
                as usize,
        };

        let mut rng = self.config.rng();
        let players = self.add_players(&mut rng)?;
        let settings = TournamentSettings::new(
            dimension,
            *self.config.score_limit(),
            self.config.strategy_for(dimension),
        );
        let mut tournament = Tournament::new(players, settings, rng)?;
        info!(dimension, "Session set up");

        let start = self.choose_order()?;
        tournament.begin(start)?;
        loop {
            self.play_tournament(&mut tournament)?;
            if let Some(winner) = tournament.tournament_winner() {
                self.prompter
                    .say(format!("{} won the tournament!", winner))?;
            }

            if !self.prompter.yes_no("Would you like to play again?")? {
                break;
            }
            let start = self.choose_order()?;
            tournament.restart(start)?;
            self.prompter.clear_screen()?;
            self.prompter.say("Let's play again!")?;
            self.prompter.blank_line()?;
        }

        self.prompter
            .say("Thanks for playing Tic Tac Toe! Goodbye!")?;
        Ok(())
    }

    fn player_counts(&mut self) -> Result<(u32, u32)> {
        if let (Some(humans), Some(computers)) = (self.config.humans(), self.config.computers()) {
            return Ok((*humans, *computers));
        }
        loop {
            let humans = match self.config.humans() {
                Some(humans) => *humans,
                None => self.prompter.positive_int("Choose the number of humans")?,
            };
            let computers = match self.config.computers() {
                Some(computers) => *computers,
                None => self
                    .prompter
                    .positive_int("Choose the number of computers")?,
            };
            if humans.saturating_add(computers) > 1 {
                return Ok((humans, computers));
            }
            self.prompter.say("Sorry, you need at least two players.")?;
        }
    }

    #[instrument(skip(self, rng))]
    fn add_players(&mut self, rng: &mut impl Rng) -> Result<Vec<Player>> {
        let (humans, computers) = self.player_counts()?;
        let defaults = match self.config.default_names() {
            Some(defaults) => *defaults,
            None => self
                .prompter
                .yes_no("Do you want to use default names and markers?")?,
        };

        let mut players: Vec<Player> = Vec::new();
        let taken = |players: &[Player]| players.iter().map(Player::marker).collect::<Vec<_>>();

        for n in 1..=humans {
            let default_name = format!("Human {}", n);
            let player = if defaults {
                let marker = fresh_marker(&taken(&players), rng)?;
                Player::new(default_name, marker, Controller::Human)
            } else {
                let name = self
                    .prompter
                    .name(&format!("Choose a name for {}", default_name))?;
                let marker = self
                    .prompter
                    .marker(&format!("Choose a marker for {}", name), &taken(&players))?;
                Player::new(name, marker, Controller::Human)
            };
            players.push(player);
        }

        for n in 1..=computers {
            let default_name = format!("Computer {}", n);
            let name = if defaults {
                default_name
            } else {
                self.prompter
                    .name(&format!("Choose a name for {}", default_name))?
            };
            let marker = fresh_marker(&taken(&players), rng)?;
            players.push(Player::new(name, marker, Controller::Computer));
        }

        debug!(players = players.len(), "Players added");
        Ok(players)
    }

    fn choose_order(&mut self) -> Result<StartOrder> {
        if let Some(start) = self.config.start_order() {
            return Ok(*start);
        }
        let options: Vec<String> = StartOrder::iter().map(|s| s.to_string()).collect();
        let answer = self.prompter.choice(&options, "Choose who goes first:")?;
        Ok(answer.parse()?)
    }

    fn play_tournament<G: Rng>(&mut self, tournament: &mut Tournament<G>) -> Result<()> {
        loop {
            self.display_board(tournament)?;
            self.play_round(tournament)?;
            self.display_result(tournament)?;

            if tournament.phase() == Phase::TournamentComplete {
                return Ok(());
            }
            self.prompter
                .wait_for_enter("Press enter to play the next round")?;
            tournament.next_round()?;
            self.prompter.clear_screen()?;
        }
    }

    fn play_round<G: Rng>(&mut self, tournament: &mut Tournament<G>) -> Result<()> {
        loop {
            if tournament.current_player().is_human() {
                let next: Vec<String> = tournament
                    .players_after_current()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                self.prompter
                    .say(format!("next players: {}", joinor(&next, ", ", "then")))?;
            }

            let report = match tournament.play_turn(&mut self.prompter) {
                Err(TournamentError::InvalidHumanMove { answer }) => {
                    warn!(answer = %answer, "Move rejected");
                    self.prompter.say("Sorry, invalid choice.")?;
                    continue;
                }
                other => other?,
            };
            if report.outcome().is_some() {
                return Ok(());
            }
            if tournament.current_player().is_human() {
                self.prompter.clear_screen()?;
                self.display_board(tournament)?;
            }
        }
    }

    fn display_board<G: Rng>(&mut self, tournament: &Tournament<G>) -> Result<()> {
        let humans = roster(tournament.players(), Controller::Human);
        let computers = roster(tournament.players(), Controller::Computer);
        self.prompter.say(format!(
            "Humans: {}\n   Computers: {}",
            joinor(&humans, ", ", "and"),
            joinor(&computers, ", ", "and")
        ))?;
        self.prompter.blank_line()?;
        write!(self.prompter.output(), "{}", render::board(tournament.board()))?;
        self.prompter.blank_line()?;
        Ok(())
    }

    fn display_result<G: Rng>(&mut self, tournament: &Tournament<G>) -> Result<()> {
        self.display_board(tournament)?;
        match tournament.last_outcome() {
            Some(RoundOutcome::Won { player, .. }) => {
                if let Some(winner) = tournament.player(player) {
                    self.prompter.say(format!("{} won!", winner))?;
                }
            }
            Some(RoundOutcome::Tie) | None => self.prompter.say("It's a tie!")?,
        }
        self.prompter.blank_line()?;
        self.prompter.say(score_summary(tournament.players()))?;
        Ok(())
    }
}

fn fresh_marker(taken: &[Marker], rng: &mut impl Rng) -> Result<Marker> {
    random_new_marker(taken, rng).ok_or_else(|| anyhow::anyhow!("Ran out of markers"))
}

fn roster(players: &[Player], controller: Controller) -> Vec<String> {
    players
        .iter()
        .filter(|p| p.controller() == controller)
        .map(ToString::to_string)
        .collect()
}

/// Scores grouped by humans and computers.
pub fn score_summary(players: &[Player]) -> String {
    let line = |controller: Controller| {
        players
            .iter()
            .filter(|p| p.controller() == controller)
            .map(|p| format!("{} points for {}. ", p.score(), p.name()))
            .collect::<String>()
    };
    format!(
        "Humans: {}\n   Computers: {}",
        line(Controller::Human),
        line(Controller::Computer)
    )
}
