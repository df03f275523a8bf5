//! Match standings derived from recorded frame results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PlayerId, Side, constants};

/// Outcome of a team match by frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Home,
    Away,
    Draw,
}

impl MatchResult {
    #[must_use]
    pub fn from_frames(home_frames_won: u8, away_frames_won: u8) -> Self {
        match home_frames_won.cmp(&away_frames_won) {
            std::cmp::Ordering::Greater => Self::Home,
            std::cmp::Ordering::Less => Self::Away,
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }

    /// The winning side, or `None` for a draw.
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            Self::Home => Some(Side::Home),
            Self::Away => Some(Side::Away),
            Self::Draw => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "HOME"),
            Self::Away => write!(f, "AWAY"),
            Self::Draw => write!(f, "DRAW"),
        }
    }
}

/// Individual frame record for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub played: u32,
    pub won: u32,
    pub lost: u32,
}

impl PlayerRecord {
    pub fn record(&mut self, won: bool) {
        self.played += 1;
        if won {
            self.won += 1;
        } else {
            self.lost += 1;
        }
    }

    /// Fold another record into this one.
    pub fn merge(&mut self, other: &PlayerRecord) {
        self.played += other.played;
        self.won += other.won;
        self.lost += other.lost;
    }
}

/// Frames won by each side in one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub round: u8,
    pub home_won: u8,
    pub away_won: u8,
}

/// Aggregated score of a match over its completed frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub home_frames_won: u8,
    pub away_frames_won: u8,
    pub frames_played: u8,
    pub per_player: BTreeMap<PlayerId, PlayerRecord>,
    pub per_round: Vec<RoundScore>,
    /// Provisional until [`Standings::is_final`] holds.
    pub match_result: MatchResult,
}

impl Standings {
    /// All frames of the match have a recorded winner.
    #[must_use]
    pub fn is_final(&self) -> bool {
        usize::from(self.frames_played) == constants::FRAMES_PER_MATCH
    }

    #[must_use]
    pub fn frames_won_by(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home_frames_won,
            Side::Away => self.away_frames_won,
        }
    }

    #[must_use]
    pub fn player(&self, player: &PlayerId) -> PlayerRecord {
        self.per_player.get(player).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_result_by_frame_count() {
        assert_eq!(MatchResult::from_frames(9, 7), MatchResult::Home);
        assert_eq!(MatchResult::from_frames(3, 5), MatchResult::Away);
        assert_eq!(MatchResult::from_frames(8, 8), MatchResult::Draw);
        assert_eq!(MatchResult::from_frames(0, 0), MatchResult::Draw);
        assert_eq!(MatchResult::Draw.winner(), None);
        assert_eq!(MatchResult::Away.winner(), Some(Side::Away));
    }

    #[test]
    fn player_record_counts() {
        let mut rec = PlayerRecord::default();
        rec.record(true);
        rec.record(false);
        rec.record(true);
        assert_eq!(rec, PlayerRecord { played: 3, won: 2, lost: 1 });

        let mut total = PlayerRecord::default();
        total.merge(&rec);
        total.merge(&rec);
        assert_eq!(total.played, 6);
        assert_eq!(total.won, 4);
    }

    #[test]
    fn final_only_after_all_frames() {
        let mut standings = Standings {
            home_frames_won: 4,
            away_frames_won: 0,
            frames_played: 4,
            per_player: BTreeMap::new(),
            per_round: Vec::new(),
            match_result: MatchResult::Home,
        };
        assert!(!standings.is_final());
        standings.frames_played = 16;
        assert!(standings.is_final());
        assert_eq!(standings.frames_won_by(Side::Home), 4);
        assert_eq!(standings.player(&"nobody".into()), PlayerRecord::default());
    }
}
