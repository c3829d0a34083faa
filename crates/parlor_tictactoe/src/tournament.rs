//! Rounds, scoring and the tournament state machine.
//!
//! ```text
//! SettingUp ──begin──▶ RoundInProgress ──round ends──▶ RoundComplete ──next_round──▶ RoundInProgress
//!                                                           │
//!                                             score limit reached
//!                                                           ▼
//!                                                  TournamentComplete ──restart──▶ RoundInProgress
//! ```
//!
//! The tournament owns the only live [`Board`]. Computer moves come from the
//! configured [`Strategy`], human moves from a [`MoveProvider`]; both go
//! through [`Tournament::apply_move`], which refuses occupied cells.

use derive_getters::Getters;
use derive_new::new;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::board::{Board, BoardError};
use crate::marker::Marker;
use crate::player::{Player, PlayerId, StartOrder};
use crate::provider::{MoveProvider, MoveProviderError};
use crate::search::{SearchError, Strategy};
use crate::topology::CellKey;
use crate::turn_order::{TurnOrder, TurnOrderError};

/// Where a tournament stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "title_case")]
pub enum Phase {
    /// Players are registered; no round has started.
    SettingUp,
    /// Moves are being made.
    RoundInProgress,
    /// The last round ended and nobody has reached the score limit.
    RoundComplete,
    /// Somebody reached the score limit.
    TournamentComplete,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// A player completed a line and scored a point.
    Won {
        /// The winner.
        player: PlayerId,
        /// The winner's marker.
        marker: Marker,
    },
    /// The board filled up without a line.
    Tie,
}

impl RoundOutcome {
    /// The winner, if the round was not a tie.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            RoundOutcome::Won { player, .. } => Some(*player),
            RoundOutcome::Tie => None,
        }
    }
}

/// What a single move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct TurnReport {
    /// Who moved.
    player: PlayerId,
    /// The cell they marked.
    key: CellKey,
    /// Set when this move ended the round.
    outcome: Option<RoundOutcome>,
}

/// Fixed parameters of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct TournamentSettings {
    /// Cells per side of the board.
    dimension: usize,
    /// Round wins needed to take the tournament.
    score_limit: u32,
    /// How computer players move.
    strategy: Strategy,
}

/// Errors raised by tournament operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TournamentError {
    /// Fewer than two players were registered.
    #[display("A tournament needs at least two players, got {}", _0)]
    TooFewPlayers(usize),

    /// Two players share a marker.
    #[display("Marker {} is used by more than one player", _0)]
    DuplicateMarker(Marker),

    /// The score limit must be at least one.
    #[display("Score limit must be at least 1")]
    InvalidScoreLimit,

    /// The operation is not allowed in the current phase.
    #[display("Cannot {} while {}", operation, phase)]
    WrongPhase {
        /// What was attempted.
        operation: &'static str,
        /// The phase the tournament was in.
        phase: Phase,
    },

    /// The cell already holds a marker.
    #[display("Cell {} is already marked", _0)]
    CellOccupied(CellKey),

    /// A human's answer was not one of the offered cells.
    #[display("'{}' is not an unmarked cell", answer)]
    InvalidHumanMove {
        /// What the provider returned.
        answer: String,
    },

    /// Board construction or marking failed.
    #[display("{}", _0)]
    Board(BoardError),

    /// The human-move provider failed.
    #[display("{}", _0)]
    Provider(MoveProviderError),

    /// The computer could not pick a move.
    #[display("{}", _0)]
    Search(SearchError),

    /// The turn order could not be built.
    #[display("{}", _0)]
    TurnOrder(TurnOrderError),
}

impl std::error::Error for TournamentError {}

impl From<BoardError> for TournamentError {
    fn from(err: BoardError) -> Self {
        TournamentError::Board(err)
    }
}

impl From<MoveProviderError> for TournamentError {
    fn from(err: MoveProviderError) -> Self {
        TournamentError::Provider(err)
    }
}

impl From<SearchError> for TournamentError {
    fn from(err: SearchError) -> Self {
        TournamentError::Search(err)
    }
}

impl From<TurnOrderError> for TournamentError {
    fn from(err: TurnOrderError) -> Self {
        TournamentError::TurnOrder(err)
    }
}

/// A series of rounds played until one player reaches the score limit.
#[derive(Debug)]
pub struct Tournament<R> {
    board: Board,
    players: Vec<Player>,
    order: TurnOrder<PlayerId>,
    settings: TournamentSettings,
    rng: R,
    phase: Phase,
    last_outcome: Option<RoundOutcome>,
}

impl<R: Rng> Tournament<R> {
    /// Registers `players` and builds an empty board.
    ///
    /// # Errors
    ///
    /// Rejects fewer than two players, shared markers, a zero score limit and
    /// a zero dimension.
    #[instrument(skip(players, rng), fields(players = players.len()))]
    pub fn new(
        players: Vec<Player>,
        settings: TournamentSettings,
        rng: R,
    ) -> Result<Self, TournamentError> {
        if players.len() < 2 {
            return Err(TournamentError::TooFewPlayers(players.len()));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].iter().any(|p| p.marker() == player.marker()) {
                return Err(TournamentError::DuplicateMarker(player.marker()));
            }
        }
        if *settings.score_limit() == 0 {
            return Err(TournamentError::InvalidScoreLimit);
        }

        let board = Board::new(*settings.dimension())?;
        let order = TurnOrder::new((0..players.len()).map(PlayerId).collect())?;
        debug!(dimension = settings.dimension(), "Tournament set up");

        Ok(Self {
            board,
            players,
            order,
            settings,
            rng,
            phase: Phase::SettingUp,
            last_outcome: None,
        })
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every player in registration order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    /// The tournament's fixed parameters.
    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// How the most recent round ended, until the next one starts.
    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    /// Seat order of the current tournament.
    pub fn order(&self) -> &TurnOrder<PlayerId> {
        &self.order
    }

    /// Id of whoever moves now.
    pub fn current_player_id(&self) -> PlayerId {
        self.order.current()
    }

    /// Whoever moves now.
    pub fn current_player(&self) -> &Player {
        &self.players[self.order.current().0]
    }

    /// Every player with their score, in seat order.
    pub fn scores_by_player(&self) -> Vec<(&Player, u32)> {
        self.seated()
            .into_iter()
            .map(|player| (player, player.score()))
            .collect()
    }

    /// The player seated after `id`, wrapping around.
    pub fn next_player(&self, id: PlayerId) -> Option<PlayerId> {
        self.order.next_after(id)
    }

    /// The other players in the order they will move after the current one.
    pub fn players_after_current(&self) -> Vec<&Player> {
        self.order
            .players_after_current()
            .into_iter()
            .map(|id| &self.players[id.0])
            .collect()
    }

    /// The player holding `marker`, searched in seat order.
    pub fn find_player(&self, marker: Marker) -> Option<PlayerId> {
        self.order
            .seats()
            .iter()
            .copied()
            .find(|id| self.players[id.0].marker() == marker)
    }

    /// The first player in seat order whose score reached the limit.
    pub fn tournament_winner(&self) -> Option<&Player> {
        self.seated()
            .into_iter()
            .find(|player| player.score() >= *self.settings.score_limit())
    }

    /// Seats the players and starts the first round.
    ///
    /// # Errors
    ///
    /// [`TournamentError::WrongPhase`] unless the tournament is setting up.
    #[instrument(skip(self))]
    pub fn begin(&mut self, start: StartOrder) -> Result<(), TournamentError> {
        self.require(Phase::SettingUp, "begin a tournament")?;
        self.seat(start)?;
        info!(first = %self.current_player(), "Tournament started");
        Ok(())
    }

    /// Resolves one move for the current player.
    ///
    /// Humans answer through `provider`; computers use the configured strategy.
    ///
    /// # Errors
    ///
    /// Fails outside a round, when the provider fails or answers with a cell
    /// that is not on offer, or when the strategy cannot move.
    #[instrument(skip(self, provider), fields(player = %self.current_player()))]
    pub fn play_turn(
        &mut self,
        provider: &mut impl MoveProvider,
    ) -> Result<TurnReport, TournamentError> {
        self.require(Phase::RoundInProgress, "play a turn")?;

        let key = if self.current_player().is_human() {
            self.human_move(provider)?
        } else {
            let me = self.current_player().marker();
            let markers = self.marker_order();
            self.settings
                .strategy()
                .choose(&self.board, me, &markers, &mut self.rng)?
        };

        self.apply_move(key)
    }

    /// Plays turns until the round ends.
    ///
    /// # Errors
    ///
    /// See [`Tournament::play_turn`].
    pub fn play_round(
        &mut self,
        provider: &mut impl MoveProvider,
    ) -> Result<RoundOutcome, TournamentError> {
        loop {
            if let Some(outcome) = self.play_turn(provider)?.outcome() {
                return Ok(*outcome);
            }
        }
    }

    /// Marks `key` for the current player and advances the turn.
    ///
    /// When the move ends the round the winner is credited and the phase
    /// moves on to [`Phase::RoundComplete`] or [`Phase::TournamentComplete`].
    ///
    /// # Errors
    ///
    /// Fails outside a round, for keys off the board and for marked cells.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, key: CellKey) -> Result<TurnReport, TournamentError> {
        self.require(Phase::RoundInProgress, "apply a move")?;
        let cells = self.board.topology().cell_count();
        if key >= cells {
            return Err(BoardError::InvalidCell { key, cells }.into());
        }
        if !self.board.is_unmarked(key) {
            return Err(TournamentError::CellOccupied(key));
        }

        let mover = self.current_player_id();
        self.board.mark(key, self.players[mover.0].marker())?;
        self.order.advance();

        let outcome = self.round_outcome()?;
        if let Some(outcome) = outcome {
            self.finish_round(outcome);
        }
        Ok(TurnReport::new(mover, key, outcome))
    }

    /// Clears the board and starts the next round one seat after the last starter.
    ///
    /// # Errors
    ///
    /// [`TournamentError::WrongPhase`] unless a round just ended.
    #[instrument(skip(self))]
    pub fn next_round(&mut self) -> Result<(), TournamentError> {
        self.require(Phase::RoundComplete, "start the next round")?;
        self.board.reset();
        self.order.start_next_round();
        self.last_outcome = None;
        self.phase = Phase::RoundInProgress;
        debug!(first = %self.current_player(), "Next round");
        Ok(())
    }

    /// Starts a fresh tournament with the same players and zeroed scores.
    ///
    /// # Errors
    ///
    /// [`TournamentError::WrongPhase`] unless the tournament is over.
    #[instrument(skip(self))]
    pub fn restart(&mut self, start: StartOrder) -> Result<(), TournamentError> {
        self.require(Phase::TournamentComplete, "restart the tournament")?;
        for player in &mut self.players {
            player.reset_score();
        }
        self.seat(start)?;
        info!(first = %self.current_player(), "Tournament restarted");
        Ok(())
    }

    fn require(&self, phase: Phase, operation: &'static str) -> Result<(), TournamentError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(TournamentError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn seat(&mut self, start: StartOrder) -> Result<(), TournamentError> {
        self.order = TurnOrder::new(start.seat(&self.players, &mut self.rng))?;
        self.board.reset();
        self.last_outcome = None;
        self.phase = Phase::RoundInProgress;
        Ok(())
    }

    fn seated(&self) -> Vec<&Player> {
        self.order
            .seats()
            .iter()
            .map(|id| &self.players[id.0])
            .collect()
    }

    fn marker_order(&self) -> TurnOrder<Marker> {
        self.order.map(|id| self.players[id.0].marker())
    }

    fn human_move(&self, provider: &mut impl MoveProvider) -> Result<CellKey, TournamentError> {
        let options: Vec<String> = self
            .board
            .unmarked_keys()
            .iter()
            .map(ToString::to_string)
            .collect();
        let prompt = format!("{}, choose a square:", self.current_player());
        let answer = provider.choose_cell(&options, &prompt)?;

        let trimmed = answer.trim();
        if !options.iter().any(|option| option == trimmed) {
            warn!(answer = %answer, "Human answered with a cell not on offer");
            return Err(TournamentError::InvalidHumanMove { answer });
        }
        trimmed
            .parse()
            .map_err(|_| TournamentError::InvalidHumanMove { answer })
    }

    fn round_outcome(&self) -> Result<Option<RoundOutcome>, TournamentError> {
        if let Some(marker) = self.board.winning_marker() {
            let player = self
                .find_player(marker)
                .ok_or(TournamentError::Search(SearchError::UnknownMarker(marker)))?;
            return Ok(Some(RoundOutcome::Won { player, marker }));
        }
        Ok(self.board.is_full().then_some(RoundOutcome::Tie))
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        if let Some(winner) = outcome.winner() {
            self.players[winner.0].add_point();
        }
        self.last_outcome = Some(outcome);
        self.phase = if self.tournament_winner().is_some() {
            Phase::TournamentComplete
        } else {
            Phase::RoundComplete
        };
        info!(?outcome, phase = %self.phase, "Round finished");
    }
}
