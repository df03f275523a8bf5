//! Persistence adapter for stored match documents.
//!
//! The hosted store holds match records in several historical shapes. All
//! of them are translated here into one canonical [`MatchSnapshot`] so that
//! nothing downstream sees schema drift:
//!
//! ```text
//! canonical       { homeLineup, awayLineup, substitutions, results }
//! array lineup    { homeLineup: [id|null], awayLineup, substitutions, frames }
//! lineup history  { lineupHistory: { "1": {home, away}, "3": {...} }, results }
//! flat frames     { frames: [{ round, homePlayer, awayPlayer, winner }] }
//! ```

use std::collections::BTreeMap;

use poolmatch_scheduler::away_position_for;
use poolmatch_types::{
    Lineup, PlayerId, PoolmatchError, Position, Result, Side, SubstitutionRecord, constants,
};
use serde::{Deserialize, Serialize};

/// One recorded frame result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameResult {
    pub round: u8,
    pub frame_number: u8,
    pub winner: PlayerId,
}

/// Canonical persisted form of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MatchSnapshot {
    pub home_lineup: Vec<PlayerId>,
    pub away_lineup: Vec<PlayerId>,
    #[serde(default)]
    pub substitutions: Vec<SubstitutionRecord>,
    #[serde(default)]
    pub results: Vec<FrameResult>,
}

// ---------------------------------------------------------------------------
// Historical shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyResult {
    pub round: u8,
    pub frame_number: u8,
    #[serde(default)]
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySubstitution {
    pub round: u8,
    /// `"home"` or `"away"`, any case.
    pub side: String,
    pub position: u8,
    pub player_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayLineupDoc {
    pub home_lineup: Vec<Option<String>>,
    pub away_lineup: Vec<Option<String>>,
    #[serde(default)]
    pub substitutions: Vec<LegacySubstitution>,
    #[serde(default)]
    pub frames: Vec<LegacyResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoundLineup {
    pub home: Vec<Option<String>>,
    pub away: Vec<Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupHistoryDoc {
    /// Round number (as a string key) to the lineup in force that round.
    pub lineup_history: BTreeMap<String, RoundLineup>,
    #[serde(default)]
    pub results: Vec<LegacyResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatFrame {
    pub round: u8,
    /// Absent in the oldest records; inferred from order within the round.
    #[serde(default)]
    pub frame_number: Option<u8>,
    pub home_player: String,
    pub away_player: String,
    #[serde(default)]
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlatFramesDoc {
    pub frames: Vec<FlatFrame>,
}

/// A stored match document in any known shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MatchDocument {
    Canonical(MatchSnapshot),
    ArrayLineup(ArrayLineupDoc),
    LineupHistory(LineupHistoryDoc),
    FlatFrames(FlatFramesDoc),
}

impl MatchDocument {
    /// # Errors
    /// [`PoolmatchError::Serialization`] if the JSON matches no known shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Translate into the canonical snapshot.
    ///
    /// # Errors
    /// - [`PoolmatchError::InvalidLineup`] if a starting lineup has a
    ///   missing slot, a duplicate, or the wrong size
    /// - [`PoolmatchError::InvalidDocument`] if the document is structurally
    ///   incomplete
    pub fn into_snapshot(self) -> Result<MatchSnapshot> {
        let snapshot = match self {
            Self::Canonical(snapshot) => snapshot,
            Self::ArrayLineup(doc) => from_array_lineup(doc)?,
            Self::LineupHistory(doc) => from_lineup_history(doc)?,
            Self::FlatFrames(doc) => from_flat_frames(doc)?,
        };
        tracing::debug!(
            substitutions = snapshot.substitutions.len(),
            results = snapshot.results.len(),
            "match document translated"
        );
        Ok(snapshot)
    }
}

fn invalid(reason: impl Into<String>) -> PoolmatchError {
    PoolmatchError::InvalidDocument {
        reason: reason.into(),
    }
}

fn starting_lineup(side: Side, slots: Vec<Option<String>>) -> Result<Vec<PlayerId>> {
    let slots = slots.into_iter().map(|s| s.map(PlayerId::new)).collect();
    Ok(Lineup::from_optional(side, slots)?.players().to_vec())
}

fn parse_side(raw: &str) -> Result<Side> {
    match raw.to_ascii_lowercase().as_str() {
        "home" => Ok(Side::Home),
        "away" => Ok(Side::Away),
        other => Err(invalid(format!("unknown side {other:?}"))),
    }
}

fn legacy_results(results: Vec<LegacyResult>) -> Vec<FrameResult> {
    results
        .into_iter()
        .filter_map(|r| {
            let winner = r.winner.filter(|w| !w.trim().is_empty())?;
            Some(FrameResult {
                round: r.round,
                frame_number: r.frame_number,
                winner: PlayerId::new(winner),
            })
        })
        .collect()
}

fn from_array_lineup(doc: ArrayLineupDoc) -> Result<MatchSnapshot> {
    let substitutions = doc
        .substitutions
        .into_iter()
        .map(|s| {
            Ok(SubstitutionRecord::new(
                s.round,
                parse_side(&s.side)?,
                Position(s.position),
                PlayerId::new(s.player_id),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MatchSnapshot {
        home_lineup: starting_lineup(Side::Home, doc.home_lineup)?,
        away_lineup: starting_lineup(Side::Away, doc.away_lineup)?,
        substitutions,
        results: legacy_results(doc.frames),
    })
}

/// Emit a substitution for every position whose occupant differs from the
/// one currently tracked in `seated`.
fn diff_occupants(
    seated: &mut [PlayerId],
    round: u8,
    side: Side,
    incoming: impl IntoIterator<Item = (Position, PlayerId)>,
    out: &mut Vec<SubstitutionRecord>,
) {
    for (position, player) in incoming {
        let Some(current) = seated.get_mut(position.index()) else {
            continue;
        };
        if *current != player {
            tracing::debug!(round, %side, %position, player = %player, "substitution inferred");
            out.push(SubstitutionRecord::new(round, side, position, player.clone()));
            *current = player;
        }
    }
}

fn from_lineup_history(doc: LineupHistoryDoc) -> Result<MatchSnapshot> {
    let mut rounds: BTreeMap<u8, RoundLineup> = BTreeMap::new();
    for (key, lineup) in doc.lineup_history {
        let round: u8 = key
            .trim()
            .parse()
            .map_err(|_| invalid(format!("lineup history key {key:?} is not a round")))?;
        rounds.insert(round, lineup);
    }

    let first = rounds
        .remove(&1)
        .ok_or_else(|| invalid("lineup history has no round 1"))?;
    let home_lineup = starting_lineup(Side::Home, first.home)?;
    let away_lineup = starting_lineup(Side::Away, first.away)?;

    let mut home_seated = home_lineup.clone();
    let mut away_seated = away_lineup.clone();
    let mut substitutions = Vec::new();

    for (round, lineup) in rounds {
        if round == 0 || round > constants::ROUNDS_PER_MATCH {
            return Err(invalid(format!("lineup history round {round} out of range")));
        }
        // A null slot means the position is unchanged that round.
        let named = |side: Side, slots: Vec<Option<String>>| {
            if slots.len() != constants::PLAYERS_PER_LINEUP {
                return Err(invalid(format!(
                    "round {round} {side} lineup has {} slots, expected {}",
                    slots.len(),
                    constants::PLAYERS_PER_LINEUP
                )));
            }
            Ok(Position::ALL
                .into_iter()
                .zip(slots)
                .filter_map(|(pos, slot)| slot.map(|id| (pos, PlayerId::new(id))))
                .collect::<Vec<_>>())
        };
        let home_in = named(Side::Home, lineup.home)?;
        let away_in = named(Side::Away, lineup.away)?;
        diff_occupants(&mut home_seated, round, Side::Home, home_in, &mut substitutions);
        diff_occupants(&mut away_seated, round, Side::Away, away_in, &mut substitutions);
    }

    Ok(MatchSnapshot {
        home_lineup,
        away_lineup,
        substitutions,
        results: legacy_results(doc.results),
    })
}

fn from_flat_frames(doc: FlatFramesDoc) -> Result<MatchSnapshot> {
    let mut by_round: BTreeMap<u8, Vec<FlatFrame>> = BTreeMap::new();
    for frame in doc.frames {
        by_round.entry(frame.round).or_default().push(frame);
    }

    // Frame numbers follow home-position order; fill gaps from storage order.
    let mut numbered: BTreeMap<u8, Vec<(u8, FlatFrame)>> = BTreeMap::new();
    for (round, frames) in by_round {
        if round == 0 || round > constants::ROUNDS_PER_MATCH {
            return Err(invalid(format!("frame round {round} out of range")));
        }
        let mut entries: Vec<(u8, FlatFrame)> = frames
            .into_iter()
            .zip(1u8..)
            .map(|(f, fallback)| (f.frame_number.unwrap_or(fallback), f))
            .collect();
        entries.sort_by_key(|(n, _)| *n);
        if entries.len() != usize::from(constants::FRAMES_PER_ROUND)
            || entries.iter().zip(1u8..).any(|((n, _), expected)| *n != expected)
        {
            return Err(invalid(format!(
                "round {round} must hold frames 1..={}",
                constants::FRAMES_PER_ROUND
            )));
        }
        numbered.insert(round, entries);
    }

    let first = numbered
        .get(&1)
        .ok_or_else(|| invalid("flat frames have no round 1"))?;
    // Round 1 pairs home position p with away position p.
    let home_lineup = starting_lineup(
        Side::Home,
        first.iter().map(|(_, f)| Some(f.home_player.clone())).collect(),
    )?;
    let away_lineup = starting_lineup(
        Side::Away,
        first.iter().map(|(_, f)| Some(f.away_player.clone())).collect(),
    )?;

    let mut home_seated = home_lineup.clone();
    let mut away_seated = away_lineup.clone();
    let mut substitutions = Vec::new();
    let mut results = Vec::new();

    for (round, entries) in numbered {
        let mut home_in = Vec::with_capacity(entries.len());
        let mut away_in = Vec::with_capacity(entries.len());
        for (frame_number, frame) in entries {
            let home_position = Position(frame_number - 1);
            home_in.push((home_position, PlayerId::new(frame.home_player)));
            away_in.push((
                away_position_for(round, home_position),
                PlayerId::new(frame.away_player),
            ));
            if let Some(winner) = frame.winner.filter(|w| !w.trim().is_empty()) {
                results.push(FrameResult {
                    round,
                    frame_number,
                    winner: PlayerId::new(winner),
                });
            }
        }
        away_in.sort_by_key(|(pos, _)| *pos);
        diff_occupants(&mut home_seated, round, Side::Home, home_in, &mut substitutions);
        diff_occupants(&mut away_seated, round, Side::Away, away_in, &mut substitutions);
    }

    Ok(MatchSnapshot {
        home_lineup,
        away_lineup,
        substitutions,
        results,
    })
}
