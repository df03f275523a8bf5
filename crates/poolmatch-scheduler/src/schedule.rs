//! Round-robin rotation.
//!
//! ```text
//! generate_schedule(home lineup, away lineup) -> [FrameSpec; 16]
//! ```
//!
//! In round `r` (1-based), home position `p` (0-based) plays away position
//! `(p + r - 1) mod 4`:
//!
//! ```text
//! round 1:  1-A  2-B  3-C  4-D
//! round 2:  1-B  2-C  3-D  4-A
//! round 3:  1-C  2-D  3-A  4-B
//! round 4:  1-D  2-A  3-B  4-C
//! ```
//!
//! Every home position meets every away position exactly once. Frames
//! within a round follow home-position order, and the break alternates
//! across the whole match starting with home.

use poolmatch_types::{
    FrameSpec, Lineup, PlayerId, PoolmatchError, Position, Result, Side, constants,
};

/// Away position facing `home_position` in `round`.
#[must_use]
pub fn away_position_for(round: u8, home_position: Position) -> Position {
    // One frame per home position, so the round width is also the number of positions.
    let offset = round.saturating_sub(1) % constants::FRAMES_PER_ROUND;
    Position((home_position.0 + offset) % constants::FRAMES_PER_ROUND)
}

/// Side breaking the frame at `global_index`: home on even, away on odd.
#[must_use]
pub fn breaking_side_for(global_index: usize) -> Side {
    if global_index % 2 == 0 {
        Side::Home
    } else {
        Side::Away
    }
}

/// The position-only schedule, independent of who is playing.
#[must_use]
pub fn rotation() -> Vec<FrameSpec> {
    let mut specs = Vec::with_capacity(constants::FRAMES_PER_MATCH);
    for round in 1..=constants::ROUNDS_PER_MATCH {
        for idx in 0..constants::FRAMES_PER_ROUND {
            let home_position = Position(idx);
            let global_index = specs.len();
            specs.push(FrameSpec {
                round,
                frame_number: idx + 1,
                home_position,
                away_position: away_position_for(round, home_position),
                breaking_side: breaking_side_for(global_index),
            });
        }
    }
    specs
}

/// Validate both lineups and produce the 16-frame schedule.
///
/// The result holds positions, not players; pass it to
/// [`crate::resolve_players`] to seat the players for each round.
///
/// # Errors
/// [`PoolmatchError::InvalidLineup`] if either lineup does not have exactly
/// four distinct, non-empty players, or if a player is named by both teams.
pub fn generate_schedule(home: &[PlayerId], away: &[PlayerId]) -> Result<Vec<FrameSpec>> {
    let home = Lineup::new(Side::Home, home.to_vec())?;
    let away = Lineup::new(Side::Away, away.to_vec())?;
    if let Some(shared) = away.players().iter().find(|p| home.contains(p)) {
        return Err(PoolmatchError::InvalidLineup {
            side: Side::Away,
            reason: format!("{shared} is already in the home lineup"),
        });
    }
    Ok(rotation())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|n| PlayerId::from(*n)).collect()
    }

    #[test]
    fn sixteen_frames_in_order() {
        let specs = rotation();
        assert_eq!(specs.len(), 16);
        for (i, spec) in specs.iter().enumerate() {
            assert_eq!(spec.global_index(), i);
        }
        assert_eq!(specs[0].round, 1);
        assert_eq!(specs[15].round, 4);
        assert_eq!(specs[15].frame_number, 4);
    }

    #[test]
    fn every_pairing_exactly_once() {
        let pairs: HashSet<(Position, Position)> = rotation()
            .iter()
            .map(|s| (s.home_position, s.away_position))
            .collect();
        assert_eq!(pairs.len(), 16);
    }

    #[test]
    fn each_round_uses_each_away_position_once() {
        let specs = rotation();
        for round in specs.chunks(4) {
            let aways: HashSet<Position> = round.iter().map(|s| s.away_position).collect();
            assert_eq!(aways.len(), 4);
        }
    }

    #[test]
    fn round_two_rotation() {
        let specs = rotation();
        let round2: Vec<(u8, u8)> = specs[4..8]
            .iter()
            .map(|s| (s.home_position.0, s.away_position.0))
            .collect();
        assert_eq!(round2, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }

    #[test]
    fn round_four_rotation() {
        assert_eq!(away_position_for(4, Position(0)), Position(3));
        assert_eq!(away_position_for(4, Position(1)), Position(0));
        assert_eq!(away_position_for(4, Position(3)), Position(2));
    }

    #[test]
    fn break_alternates_from_home() {
        for (i, spec) in rotation().iter().enumerate() {
            let expected = if i % 2 == 0 { Side::Home } else { Side::Away };
            assert_eq!(spec.breaking_side, expected, "frame index {i}");
        }
    }

    #[test]
    fn generate_validates_lineups() {
        let ok = generate_schedule(&ids(&["P1", "P2", "P3", "P4"]), &ids(&["A", "B", "C", "D"]));
        assert_eq!(ok.unwrap().len(), 16);

        let err = generate_schedule(&ids(&["P1", "P2", "P3"]), &ids(&["A", "B", "C", "D"]))
            .unwrap_err();
        assert!(matches!(err, PoolmatchError::InvalidLineup { side: Side::Home, .. }));

        let err = generate_schedule(&ids(&["P1", "P2", "P3", "P4"]), &ids(&["A", "B", "", "D"]))
            .unwrap_err();
        assert!(matches!(err, PoolmatchError::InvalidLineup { side: Side::Away, .. }));
    }

    #[test]
    fn player_in_both_lineups_rejected() {
        let err = generate_schedule(&ids(&["P1", "P2", "P3", "X"]), &ids(&["X", "B", "C", "D"]))
            .unwrap_err();
        match err {
            PoolmatchError::InvalidLineup { side, reason } => {
                assert_eq!(side, Side::Away);
                assert!(reason.contains('X'), "reason should name the player: {reason}");
            }
            other => panic!("Expected InvalidLineup, got: {other:?}"),
        }
    }

    #[test]
    fn generate_is_deterministic() {
        let home = ids(&["P1", "P2", "P3", "P4"]);
        let away = ids(&["A", "B", "C", "D"]);
        assert_eq!(
            generate_schedule(&home, &away).unwrap(),
            generate_schedule(&home, &away).unwrap()
        );
    }
}
