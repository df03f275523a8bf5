//! Substitution records.
//!
//! A substitution replaces the occupant of a fixed position from its round
//! onward, until a later substitution at the same position supersedes it.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, Position, Side};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstitutionRecord {
    /// First round the new player occupies the position.
    pub round: u8,
    pub side: Side,
    pub position: Position,
    pub new_player_id: PlayerId,
}

impl SubstitutionRecord {
    #[must_use]
    pub fn new(round: u8, side: Side, position: Position, new_player_id: PlayerId) -> Self {
        Self {
            round,
            side,
            position,
            new_player_id,
        }
    }

    /// Whether this record can change the occupant of `(side, position)` in `round`.
    #[must_use]
    pub fn applies_to(&self, side: Side, position: Position, round: u8) -> bool {
        self.side == side && self.position == position && self.round <= round
    }
}
