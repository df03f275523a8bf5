//! Round-aware substitution gate.
//!
//! Substitutions are only accepted for rounds that have not started, and
//! never for a round earlier than one already in play. Re-resolving players
//! after an accepted substitution therefore never touches a scored frame.

use poolmatch_types::{Frame, PoolmatchError, Result};

/// Tracks the latest round with any recorded result.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundGate {
    latest_started: Option<u8>,
}

impl RoundGate {
    /// A gate for a match with no results yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the gate from the current frames.
    pub fn observe(&mut self, frames: &[Frame]) {
        self.latest_started = frames
            .iter()
            .filter(|f| f.is_complete())
            .map(Frame::round)
            .max();
    }

    /// The highest round with at least one scored frame.
    #[must_use]
    pub fn latest_started(&self) -> Option<u8> {
        self.latest_started
    }

    #[must_use]
    pub fn substitutions_allowed(&self, round: u8) -> bool {
        self.latest_started.is_none_or(|started| round > started)
    }

    /// Guard a substitution effective from `round`.
    pub fn check_substitution(&self, round: u8) -> Result<()> {
        if self.substitutions_allowed(round) {
            Ok(())
        } else {
            Err(PoolmatchError::RoundAlreadyStarted { round })
        }
    }
}
