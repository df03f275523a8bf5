//! Standings aggregation over completed frames.
//!
//! Only frames with a recorded winner count. The match result is decided by
//! frame count alone; there is no tie-break. Counters saturate rather than
//! wrap when handed more frames than a match holds.

use std::collections::BTreeMap;

use poolmatch_types::{
    Frame, MatchResult, PlayerRecord, RoundScore, Side, Standings, constants,
};

/// Aggregate the score of a match from its frames.
///
/// Safe to call at any point during a match; the result is provisional
/// until [`Standings::is_final`] holds.
#[must_use]
pub fn compute_standings(frames: &[Frame]) -> Standings {
    let mut home_frames_won: u8 = 0;
    let mut away_frames_won: u8 = 0;
    let mut per_player: BTreeMap<_, PlayerRecord> = BTreeMap::new();
    let mut per_round: Vec<RoundScore> = (1..=constants::ROUNDS_PER_MATCH)
        .map(|round| RoundScore {
            round,
            ..RoundScore::default()
        })
        .collect();

    for frame in frames {
        let Some(side) = frame.winning_side() else {
            continue;
        };
        let round_score = per_round
            .iter_mut()
            .find(|r| r.round == frame.spec.round);

        match side {
            Side::Home => {
                home_frames_won = home_frames_won.saturating_add(1);
                if let Some(r) = round_score {
                    r.home_won = r.home_won.saturating_add(1);
                }
            }
            Side::Away => {
                away_frames_won = away_frames_won.saturating_add(1);
                if let Some(r) = round_score {
                    r.away_won = r.away_won.saturating_add(1);
                }
            }
        }

        per_player
            .entry(frame.home_player.clone())
            .or_default()
            .record(side == Side::Home);
        per_player
            .entry(frame.away_player.clone())
            .or_default()
            .record(side == Side::Away);
    }

    Standings {
        home_frames_won,
        away_frames_won,
        frames_played: home_frames_won.saturating_add(away_frames_won),
        per_player,
        per_round,
        match_result: MatchResult::from_frames(home_frames_won, away_frames_won),
    }
}
