//! Lineup types: sides, fixed positions, and validated four-player lineups.
//!
//! A position's identity is permanent for the life of a match. Only its
//! occupant can change, and only through a substitution.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PlayerId, PoolmatchError, Result, constants};

/// Which team a player, frame break, or substitution belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "HOME"),
            Self::Away => write!(f, "AWAY"),
        }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Zero-based lineup position (0..=3).
///
/// Rendered as `1`..`4` for the home side and `A`..`D` for the away side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub u8);

impl Position {
    /// All four positions in lineup order.
    pub const ALL: [Position; constants::PLAYERS_PER_LINEUP] =
        [Position(0), Position(1), Position(2), Position(3)];

    /// Build a position from an index, or `None` if it is out of range.
    #[must_use]
    pub fn new(index: u8) -> Option<Self> {
        let pos = Self(index);
        pos.is_valid().then_some(pos)
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.index() < constants::PLAYERS_PER_LINEUP
    }

    /// Scoresheet label: numeric for home, alphabetic for away.
    #[must_use]
    pub fn label(self, side: Side) -> String {
        match side {
            Side::Home => (self.0 + 1).to_string(),
            Side::Away => char::from(b'A' + self.0).to_string(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Lineup
// ---------------------------------------------------------------------------

/// A filled lineup position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub position: Position,
    pub player_id: PlayerId,
}

/// A validated starting lineup: exactly four distinct, non-empty players
/// in position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lineup {
    side: Side,
    players: Vec<PlayerId>,
}

impl Lineup {
    /// Validate and build a lineup.
    ///
    /// # Errors
    /// [`PoolmatchError::InvalidLineup`] if there are not exactly four
    /// players, a slot is blank, or a player appears twice.
    pub fn new(side: Side, players: Vec<PlayerId>) -> Result<Self> {
        let invalid = |reason: String| PoolmatchError::InvalidLineup { side, reason };

        if players.len() != constants::PLAYERS_PER_LINEUP {
            return Err(invalid(format!(
                "expected {} players, got {}",
                constants::PLAYERS_PER_LINEUP,
                players.len()
            )));
        }

        let mut seen = HashSet::with_capacity(players.len());
        for (idx, player) in players.iter().enumerate() {
            if player.is_blank() {
                return Err(invalid(format!(
                    "position {} is empty",
                    Position(u8::try_from(idx).unwrap_or(u8::MAX)).label(side)
                )));
            }
            if !seen.insert(player) {
                return Err(invalid(format!("duplicate player {player}")));
            }
        }

        Ok(Self { side, players })
    }

    /// Build a lineup from slots that may be missing (`None`), as stored by
    /// older match documents.
    ///
    /// # Errors
    /// Same as [`Lineup::new`]; a `None` slot counts as empty.
    pub fn from_optional(side: Side, slots: Vec<Option<PlayerId>>) -> Result<Self> {
        let players = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| PlayerId::new("")))
            .collect();
        Self::new(side, players)
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The starting player at `position`, or `None` if out of range.
    #[must_use]
    pub fn player_at(&self, position: Position) -> Option<&PlayerId> {
        self.players.get(position.index())
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    /// The lineup as ordered slots.
    pub fn slots(&self) -> impl Iterator<Item = LineupSlot> + '_ {
        Position::ALL
            .iter()
            .zip(self.players.iter())
            .map(|(&position, player_id)| LineupSlot {
                position,
                player_id: player_id.clone(),
            })
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Lineup {
    /// `P1..P4` for home, `A..D` for away.
    pub fn dummy(side: Side) -> Self {
        let names: [&str; 4] = match side {
            Side::Home => ["P1", "P2", "P3", "P4"],
            Side::Away => ["A", "B", "C", "D"],
        };
        Self::new(side, names.iter().map(|n| PlayerId::from(*n)).collect())
            .expect("dummy lineup is valid")
    }

    /// Four distinct players drawn from a twelve-name roster for `side`.
    pub fn random<R: rand::Rng + ?Sized>(side: Side, rng: &mut R) -> Self {
        use rand::seq::SliceRandom;

        let roster: Vec<PlayerId> = (1..=12)
            .map(|n| PlayerId::new(format!("{side}-{n}")))
            .collect();
        let players = roster
            .choose_multiple(rng, constants::PLAYERS_PER_LINEUP)
            .cloned()
            .collect();
        Self::new(side, players).expect("random lineup is valid")
    }
}
