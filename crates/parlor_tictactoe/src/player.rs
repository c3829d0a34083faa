//! Players, who controls them, and how they are seated at the start of a tournament.

use derive_getters::Getters;
use derive_new::new;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::marker::Marker;

/// Index of a player within a tournament's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("#{}", _0)]
pub struct PlayerId(pub usize);

/// Who decides a player's moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Controller {
    /// Moves are relayed from a person through a [`MoveProvider`](crate::MoveProvider).
    Human,
    /// Moves are picked by the configured search [`Strategy`](crate::Strategy).
    Computer,
}

/// A tournament participant.
///
/// The score accumulates across rounds and is only reset between tournaments.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    name: String,
    /// Symbol placed on the board.
    #[getter(skip)]
    marker: Marker,
    /// Human or computer.
    #[getter(skip)]
    controller: Controller,
    /// Rounds won in the current tournament.
    #[new(default)]
    #[getter(skip)]
    score: u32,
}

impl Player {
    /// Symbol placed on the board.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Human or computer.
    pub fn controller(&self) -> Controller {
        self.controller
    }

    /// Returns `true` if moves come from a person.
    pub fn is_human(&self) -> bool {
        self.controller == Controller::Human
    }

    /// Rounds won in the current tournament.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Credits a round win.
    pub fn add_point(&mut self) {
        self.score += 1;
    }

    /// Clears the score for a new tournament.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.marker)
    }
}

/// Who sits first when a tournament begins.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StartOrder {
    /// Humans in roster order, then computers.
    Humans,
    /// Computers in roster order, then humans.
    Computers,
    /// Everybody shuffled.
    Random,
}

impl StartOrder {
    /// Seats `players` according to this order.
    #[instrument(skip(players, rng))]
    pub fn seat(self, players: &[Player], rng: &mut impl Rng) -> Vec<PlayerId> {
        let ids = |controller: Controller| {
            players
                .iter()
                .enumerate()
                .filter(move |(_, p)| p.controller() == controller)
                .map(|(i, _)| PlayerId(i))
        };

        match self {
            StartOrder::Humans => ids(Controller::Human)
                .chain(ids(Controller::Computer))
                .collect(),
            StartOrder::Computers => ids(Controller::Computer)
                .chain(ids(Controller::Human))
                .collect(),
            StartOrder::Random => {
                let mut seats: Vec<PlayerId> = (0..players.len()).map(PlayerId).collect();
                seats.shuffle(rng);
                seats
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster() -> Vec<Player> {
        vec![
            Player::new("Computer 1".into(), Marker::from_glyph('C'), Controller::Computer),
            Player::new("Human 1".into(), Marker::from_glyph('H'), Controller::Human),
            Player::new("Computer 2".into(), Marker::from_glyph('D'), Controller::Computer),
        ]
    }

    #[test]
    fn test_score_lifecycle() {
        let mut player = Player::new("Ada".into(), Marker::from_glyph('X'), Controller::Human);
        assert_eq!(player.score(), 0);
        player.add_point();
        player.add_point();
        assert_eq!(player.score(), 2);
        player.reset_score();
        assert_eq!(player.score(), 0);
        assert_eq!(player.to_string(), "Ada (X)");
    }

    #[test]
    fn test_humans_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let seats = StartOrder::Humans.seat(&roster(), &mut rng);
        assert_eq!(seats, vec![PlayerId(1), PlayerId(0), PlayerId(2)]);
    }

    #[test]
    fn test_computers_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let seats = StartOrder::Computers.seat(&roster(), &mut rng);
        assert_eq!(seats, vec![PlayerId(0), PlayerId(2), PlayerId(1)]);
    }

    #[test]
    fn test_random_seats_everybody_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seats = StartOrder::Random.seat(&roster(), &mut rng);
        seats.sort();
        assert_eq!(seats, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    }

    #[test]
    fn test_start_order_parses_lowercase() {
        assert_eq!("random".parse::<StartOrder>().unwrap(), StartOrder::Random);
        assert_eq!(StartOrder::Humans.to_string(), "humans");
    }
}
