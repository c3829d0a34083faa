//! Rotating turn order.

use tracing::{debug, instrument};

/// Errors raised when building a [`TurnOrder`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnOrderError {
    /// A turn order needs at least one seat.
    #[display("Turn order has no seats")]
    NoSeats,
}

impl std::error::Error for TurnOrderError {}

/// An ordered ring of seats with a current slot and a round-starting slot.
///
/// The seats themselves never move. Each move advances the current slot by
/// one, wrapping after the last seat, and each new round starts one seat
/// after the previous round's first seat.
///
/// The type is generic so the tournament can rotate player ids while the
/// search engine rotates the corresponding markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOrder<T> {
    seats: Vec<T>,
    first: usize,
    current: usize,
}

impl<T: Copy + PartialEq> TurnOrder<T> {
    /// Creates a turn order starting at the first seat.
    ///
    /// # Errors
    ///
    /// Returns [`TurnOrderError::NoSeats`] if `seats` is empty.
    pub fn new(seats: Vec<T>) -> Result<Self, TurnOrderError> {
        if seats.is_empty() {
            return Err(TurnOrderError::NoSeats);
        }
        Ok(Self {
            seats,
            first: 0,
            current: 0,
        })
    }

    /// All seats in order.
    pub fn seats(&self) -> &[T] {
        &self.seats
    }

    /// Whoever moves now.
    pub fn current(&self) -> T {
        self.seats[self.current]
    }

    /// Whoever started the current round.
    pub fn first(&self) -> T {
        self.seats[self.first]
    }

    /// Moves the current slot one seat forward.
    pub fn advance(&mut self) {
        self.current = self.wrap(self.current + 1);
    }

    /// The seat after `seat`, wrapping to the first; `None` if `seat` is not seated.
    pub fn next_after(&self, seat: T) -> Option<T> {
        let index = self.position(seat)?;
        Some(self.seats[self.wrap(index + 1)])
    }

    /// Every other seat, starting after `seat` and wrapping around.
    pub fn players_after(&self, seat: T) -> Vec<T> {
        let Some(index) = self.position(seat) else {
            return Vec::new();
        };
        (1..self.seats.len())
            .map(|offset| self.seats[self.wrap(index + offset)])
            .collect()
    }

    /// Every other seat, starting after the current one.
    pub fn players_after_current(&self) -> Vec<T> {
        self.players_after(self.current())
    }

    /// Starts a new round one seat after the previous round's starter.
    pub fn start_next_round(&mut self) {
        self.first = self.wrap(self.first + 1);
        self.current = self.first;
        debug!(first = self.first, "Rotated round starter");
    }

    /// Projects every seat through `f`, keeping the slots.
    #[instrument(skip_all)]
    pub fn map<U: Copy + PartialEq>(&self, f: impl FnMut(&T) -> U) -> TurnOrder<U> {
        TurnOrder {
            seats: self.seats.iter().map(f).collect(),
            first: self.first,
            current: self.current,
        }
    }

    fn position(&self, seat: T) -> Option<usize> {
        self.seats.iter().position(|&s| s == seat)
    }

    fn wrap(&self, index: usize) -> usize {
        index % self.seats.len()
    }
}
