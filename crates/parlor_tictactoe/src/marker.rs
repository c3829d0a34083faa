//! Markers and squares: the tokens that occupy cells on the grid.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Longest marker accepted, in characters (`X`, `AA` and `ZZZ` all fit).
pub const MAX_GLYPHS: usize = 3;

/// Markers handed out first when players use default settings.
pub const CLASSIC_MARKERS: [Marker; 2] = [Marker::from_glyph('X'), Marker::from_glyph('O')];

/// A player's symbol on the board.
///
/// Markers are small `Copy` values so that boards can be snapshotted
/// cheaply during search. Two markers are equal iff their text is equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Marker {
    glyphs: [char; MAX_GLYPHS],
    len: u8,
}

/// Reasons a string cannot be used as a [`Marker`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MarkerError {
    /// The marker text was empty.
    #[display("Marker cannot be empty")]
    Empty,

    /// The marker contained whitespace.
    #[display("Marker {:?} contains whitespace", _0)]
    Whitespace(String),

    /// The marker was longer than [`MAX_GLYPHS`] characters.
    #[display("Marker {:?} is longer than {} characters", _0, MAX_GLYPHS)]
    TooLong(String),
}

impl std::error::Error for MarkerError {}

impl Marker {
    /// Creates a marker from its text.
    ///
    /// # Errors
    ///
    /// Fails if the text is empty, contains whitespace or is longer than
    /// [`MAX_GLYPHS`] characters.
    pub fn new(symbol: &str) -> Result<Self, MarkerError> {
        if symbol.is_empty() {
            return Err(MarkerError::Empty);
        }
        if symbol.chars().any(char::is_whitespace) {
            return Err(MarkerError::Whitespace(symbol.to_string()));
        }

        let mut glyphs = ['\0'; MAX_GLYPHS];
        let mut len = 0;
        for c in symbol.chars() {
            if len == MAX_GLYPHS {
                return Err(MarkerError::TooLong(symbol.to_string()));
            }
            glyphs[len] = c;
            len += 1;
        }

        Ok(Self {
            glyphs,
            len: len as u8,
        })
    }

    /// Single-character marker, usable in constants.
    pub const fn from_glyph(glyph: char) -> Self {
        Self {
            glyphs: [glyph, '\0', '\0'],
            len: 1,
        }
    }

    /// Characters of this marker.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs[..self.len as usize].iter().copied()
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.chars() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Marker({})", self)
    }
}

impl std::str::FromStr for Marker {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Marker {
    type Error = MarkerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Marker> for String {
    fn from(marker: Marker) -> Self {
        marker.to_string()
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Unmarked cell.
    #[default]
    Empty,
    /// Cell holding a player's marker.
    Occupied(Marker),
}

impl Square {
    /// Returns `true` if nobody has marked this cell.
    pub fn is_empty(self) -> bool {
        self == Square::Empty
    }

    /// The marker in this cell, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Square::Empty => None,
            Square::Occupied(marker) => Some(marker),
        }
    }
}

/// Picks a marker nobody in `taken` uses.
///
/// Unused classic markers (`X`, `O`) are preferred, then unused capital
/// letters, both chosen uniformly at random. After that the first free
/// two-letter marker in `AA`, `AB`, ... `AZ`, `BA` order is returned.
/// Returns `None` only when every marker up to [`MAX_GLYPHS`] letters is taken.
#[instrument(skip(rng))]
pub fn random_new_marker(taken: &[Marker], rng: &mut impl Rng) -> Option<Marker> {
    let classic: Vec<Marker> = CLASSIC_MARKERS
        .iter()
        .copied()
        .filter(|m| !taken.contains(m))
        .collect();
    if let Some(marker) = classic.choose(rng) {
        debug!(%marker, "Picked classic marker");
        return Some(*marker);
    }

    let letters: Vec<Marker> = ('A'..='Z')
        .map(Marker::from_glyph)
        .filter(|m| !taken.contains(m))
        .collect();
    if let Some(marker) = letters.choose(rng) {
        debug!(%marker, "Picked letter marker");
        return Some(*marker);
    }

    let mut candidate = String::from("AA");
    while candidate.len() <= MAX_GLYPHS {
        let marker = Marker::new(&candidate).ok()?;
        if !taken.contains(&marker) {
            debug!(%marker, "Picked multi-letter marker");
            return Some(marker);
        }
        candidate = successor(&candidate);
    }

    None
}

/// Next string in `A`..`Z` odometer order: `AZ` becomes `BA`, `ZZ` becomes `AAA`.
fn successor(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    for c in chars.iter_mut().rev() {
        if *c == 'Z' {
            *c = 'A';
        } else {
            *c = char::from(*c as u8 + 1);
            return chars.into_iter().collect();
        }
    }
    std::iter::once('A').chain(chars).collect()
}
