//! Player resolution: seat the players for each scheduled frame.
//!
//! The schedule only knows positions. Who occupies a position in round `r`
//! is the starting lineup entry, overridden by the latest substitution at
//! that position with `round <= r`. Re-running resolution after a new
//! substitution never changes the pairings.

use poolmatch_types::{
    Frame, FrameSpec, Lineup, PlayerId, PoolmatchError, Position, Result, Side,
    SubstitutionRecord,
};

/// The player occupying `position` of `lineup` in `round`.
///
/// When several substitutions apply, the highest round wins; among records
/// for the same round, the later one in `substitutions` wins.
///
/// # Errors
/// [`PoolmatchError::UnresolvedPosition`] if the position is outside the
/// lineup or the applicable substitution names no player.
pub fn occupant_at(
    lineup: &Lineup,
    position: Position,
    round: u8,
    substitutions: &[SubstitutionRecord],
) -> Result<PlayerId> {
    let side = lineup.side();
    let unresolved = || PoolmatchError::UnresolvedPosition {
        side,
        position: position.0,
        round,
    };

    let starter = lineup.player_at(position).ok_or_else(unresolved)?;

    let latest = substitutions
        .iter()
        .filter(|sub| sub.applies_to(side, position, round))
        .fold(None::<&SubstitutionRecord>, |best, sub| match best {
            Some(b) if b.round > sub.round => Some(b),
            _ => Some(sub),
        });

    match latest {
        Some(sub) if sub.new_player_id.is_blank() => Err(unresolved()),
        Some(sub) => Ok(sub.new_player_id.clone()),
        None => Ok(starter.clone()),
    }
}

/// Resolve every frame of `schedule` to concrete players.
///
/// Returned frames carry no results; callers merge winners back in when
/// re-resolving a match in progress.
///
/// # Errors
/// [`PoolmatchError::UnresolvedPosition`] if any position cannot be seated,
/// [`PoolmatchError::Internal`] if the lineups are passed for the wrong sides.
pub fn resolve_players(
    schedule: &[FrameSpec],
    home: &Lineup,
    away: &Lineup,
    substitutions: &[SubstitutionRecord],
) -> Result<Vec<Frame>> {
    if home.side() != Side::Home || away.side() != Side::Away {
        return Err(PoolmatchError::Internal(format!(
            "lineups passed as ({}, {}), expected (HOME, AWAY)",
            home.side(),
            away.side()
        )));
    }

    schedule
        .iter()
        .map(|spec| {
            let home_player = occupant_at(home, spec.home_position, spec.round, substitutions)?;
            let away_player = occupant_at(away, spec.away_position, spec.round, substitutions)?;
            Ok(Frame::new(*spec, home_player, away_player))
        })
        .collect()
}
