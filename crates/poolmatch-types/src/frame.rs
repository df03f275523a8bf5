//! Frame types: the position-only schedule entry and the resolved,
//! scoreable frame.
//!
//! A [`FrameSpec`] is derived once from the rotation and never changes.
//! A [`Frame`] carries the players resolved for that round and, once
//! recorded, the winner.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PlayerId, Position, Side, constants};

/// Composite key of a frame within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FrameKey {
    /// Round number, 1..=4.
    pub round: u8,
    /// Frame number within the round, 1..=4.
    pub frame_number: u8,
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}F{}", self.round, self.frame_number)
    }
}

/// One scheduled pairing of a home position against an away position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSpec {
    pub round: u8,
    pub frame_number: u8,
    pub home_position: Position,
    pub away_position: Position,
    pub breaking_side: Side,
}

impl FrameSpec {
    #[must_use]
    pub fn key(&self) -> FrameKey {
        FrameKey {
            round: self.round,
            frame_number: self.frame_number,
        }
    }

    /// Zero-based index across the whole match (0..=15).
    #[must_use]
    pub fn global_index(&self) -> usize {
        usize::from(self.round.saturating_sub(1)) * usize::from(constants::FRAMES_PER_ROUND)
            + usize::from(self.frame_number.saturating_sub(1))
    }

    /// The fixed position playing for `side` in this frame.
    #[must_use]
    pub fn position_for(&self, side: Side) -> Position {
        match side {
            Side::Home => self.home_position,
            Side::Away => self.away_position,
        }
    }
}

impl fmt::Display for FrameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} v {} (break: {})",
            self.key(),
            self.home_position.label(Side::Home),
            self.away_position.label(Side::Away),
            self.breaking_side,
        )
    }
}

/// A scheduled frame with players resolved for its round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub spec: FrameSpec,
    pub home_player: PlayerId,
    pub away_player: PlayerId,
    /// `None` until a result is recorded.
    pub winner: Option<PlayerId>,
    /// When the current result was recorded (or last corrected).
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Frame {
    #[must_use]
    pub fn new(spec: FrameSpec, home_player: PlayerId, away_player: PlayerId) -> Self {
        Self {
            spec,
            home_player,
            away_player,
            winner: None,
            recorded_at: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> FrameKey {
        self.spec.key()
    }

    #[must_use]
    pub fn round(&self) -> u8 {
        self.spec.round
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn player_for(&self, side: Side) -> &PlayerId {
        match side {
            Side::Home => &self.home_player,
            Side::Away => &self.away_player,
        }
    }

    /// Which side `player` is on in this frame, if they are playing it.
    #[must_use]
    pub fn side_of(&self, player: &PlayerId) -> Option<Side> {
        if *player == self.home_player {
            Some(Side::Home)
        } else if *player == self.away_player {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// The side that won, if a result has been recorded.
    #[must_use]
    pub fn winning_side(&self) -> Option<Side> {
        self.winner.as_ref().and_then(|w| self.side_of(w))
    }

    /// The player breaking this frame.
    #[must_use]
    pub fn breaker(&self) -> &PlayerId {
        self.player_for(self.spec.breaking_side)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} v {}",
            self.key(),
            self.home_player,
            self.away_player
        )?;
        if let Some(winner) = &self.winner {
            write!(f, " -> {winner}")?;
        }
        Ok(())
    }
}

/// Scoring progress of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub round: u8,
    pub frames_scored: u8,
    /// All frames of the round have a winner.
    pub complete: bool,
}
