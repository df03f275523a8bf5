//! Match card: one team match and the workflow rules around it.
//!
//! The card owns the generated schedule and the resolved frames, and is the
//! only place frames are mutated. Every substitution and result goes
//! through the same checks whether it comes from a captain's session or
//! from replaying a stored snapshot.

use poolmatch_scheduler::{
    active_round, compute_sheet_root, compute_standings, correct_frame_result, digest_hex,
    generate_schedule, occupant_at, record_frame_result, resolve_players,
};
use poolmatch_types::{
    Frame, FrameSpec, LeagueConfig, Lineup, MatchId, PlayerId, PoolmatchError, Position, Result,
    RoundStatus, Side, Standings, SubstitutionRecord, TeamId, constants,
};
use serde::{Deserialize, Serialize};

use crate::{FrameResult, MatchSnapshot, RoundGate, SubstitutionLog};

/// Fixture identity of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHeader {
    pub match_id: MatchId,
    pub home_team: TeamId,
    pub away_team: TeamId,
}

impl MatchHeader {
    /// Which side `team` plays on, if it is in this fixture.
    #[must_use]
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if team == self.home_team {
            Some(Side::Home)
        } else if team == self.away_team {
            Some(Side::Away)
        } else {
            None
        }
    }
}

/// State of a single team match.
#[derive(Debug, Clone)]
pub struct MatchCard {
    header: MatchHeader,
    config: LeagueConfig,
    home: Lineup,
    away: Lineup,
    schedule: Vec<FrameSpec>,
    frames: Vec<Frame>,
    substitutions: SubstitutionLog,
    gate: RoundGate,
}

impl MatchCard {
    /// Validate the lineups, generate the rotation, and seat the players.
    ///
    /// # Errors
    /// - [`PoolmatchError::Configuration`] if `config` is invalid
    /// - [`PoolmatchError::InvalidLineup`] if either lineup is malformed
    pub fn new(
        config: LeagueConfig,
        header: MatchHeader,
        home_players: Vec<PlayerId>,
        away_players: Vec<PlayerId>,
    ) -> Result<Self> {
        config.validate()?;
        let schedule = generate_schedule(&home_players, &away_players)?;
        let home = Lineup::new(Side::Home, home_players)?;
        let away = Lineup::new(Side::Away, away_players)?;
        let frames = resolve_players(&schedule, &home, &away, &[])?;

        tracing::debug!(match_id = %header.match_id, "match card created");

        Ok(Self {
            substitutions: SubstitutionLog::new(config.max_substitutions_per_round),
            header,
            config,
            home,
            away,
            schedule,
            frames,
            gate: RoundGate::new(),
        })
    }

    /// Rebuild a card by replaying a stored snapshot: substitutions first,
    /// then results, each through the normal checks.
    ///
    /// # Errors
    /// Any error the replayed operations would raise live.
    pub fn from_snapshot(
        config: LeagueConfig,
        header: MatchHeader,
        snapshot: MatchSnapshot,
    ) -> Result<Self> {
        let mut card = Self::new(config, header, snapshot.home_lineup, snapshot.away_lineup)?;
        for sub in snapshot.substitutions {
            card.substitute(sub.side, sub.round, sub.position, sub.new_player_id)?;
        }
        for result in snapshot.results {
            card.record_result(result.round, result.frame_number, &result.winner)?;
        }
        Ok(card)
    }

    /// The canonical persisted form of this card.
    #[must_use]
    pub fn to_snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            home_lineup: self.home.players().to_vec(),
            away_lineup: self.away.players().to_vec(),
            substitutions: self.substitutions.records().to_vec(),
            results: self
                .frames
                .iter()
                .filter_map(|f| {
                    f.winner.as_ref().map(|winner| FrameResult {
                        round: f.spec.round,
                        frame_number: f.spec.frame_number,
                        winner: winner.clone(),
                    })
                })
                .collect(),
        }
    }

    // -----------------------------------------------------------------
    // Substitutions
    // -----------------------------------------------------------------

    /// Seat `player` at `(side, position)` from `round` onward.
    ///
    /// # Errors
    /// - [`PoolmatchError::InvalidSubstitution`] for a malformed record, if
    ///   the player is already seated in that round on either side, or if
    ///   the player would end up in two seats in a later round
    /// - [`PoolmatchError::SubstitutionLimitReached`] if the side has used
    ///   its substitutions for the round
    /// - [`PoolmatchError::RoundAlreadyStarted`] if the round, or a later
    ///   one, already has a result
    pub fn substitute(
        &mut self,
        side: Side,
        round: u8,
        position: Position,
        player: PlayerId,
    ) -> Result<()> {
        let record = SubstitutionRecord::new(round, side, position, player);
        self.substitutions.check(&record)?;
        self.gate.check_substitution(round)?;

        let mut candidate = self.substitutions.records().to_vec();
        candidate.push(record.clone());
        self.check_not_seated(&record, &candidate)?;

        let mut frames = resolve_players(&self.schedule, &self.home, &self.away, &candidate)?;

        // The gate guarantees scored frames keep their players.
        for (fresh, old) in frames.iter_mut().zip(&self.frames) {
            if old.is_complete() {
                fresh.winner.clone_from(&old.winner);
                fresh.recorded_at = old.recorded_at;
            }
        }

        tracing::debug!(
            match_id = %self.header.match_id,
            %side,
            round,
            position = %position.label(side),
            player = %record.new_player_id,
            "substitution recorded"
        );

        self.substitutions.push(record)?;
        self.frames = frames;
        Ok(())
    }

    /// The incoming player must hold no seat in the substitution's round,
    /// and at most one seat in every later round once `candidate` applies.
    fn check_not_seated(
        &self,
        record: &SubstitutionRecord,
        candidate: &[SubstitutionRecord],
    ) -> Result<()> {
        let player = &record.new_player_id;
        for side in [Side::Home, Side::Away] {
            let lineup = self.lineup(side);
            for position in Position::ALL {
                let occupant = occupant_at(lineup, position, record.round, self.substitutions.records())?;
                if occupant == *player {
                    return Err(PoolmatchError::InvalidSubstitution {
                        reason: format!(
                            "{player} already plays {side} position {} in round {}",
                            position.label(side),
                            record.round
                        ),
                    });
                }
            }
        }

        // Earlier-round substitutions carry forward into rounds that may
        // already have the same player seated elsewhere.
        for round in record.round + 1..=constants::ROUNDS_PER_MATCH {
            let mut seats = 0;
            for side in [Side::Home, Side::Away] {
                let lineup = self.lineup(side);
                for position in Position::ALL {
                    if occupant_at(lineup, position, round, candidate)? == *player {
                        seats += 1;
                    }
                }
            }
            if seats > 1 {
                return Err(PoolmatchError::InvalidSubstitution {
                    reason: format!("{player} would hold {seats} seats in round {round}"),
                });
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Results
    // -----------------------------------------------------------------

    /// Record the winner of an unscored frame.
    ///
    /// # Errors
    /// See [`poolmatch_scheduler::record_frame_result`].
    pub fn record_result(
        &mut self,
        round: u8,
        frame_number: u8,
        winner: &PlayerId,
    ) -> Result<RoundStatus> {
        let status = record_frame_result(&mut self.frames, round, frame_number, winner)?;
        self.gate.observe(&self.frames);
        if status.complete && self.active_round().is_none() {
            let standings = self.standings();
            tracing::info!(
                match_id = %self.header.match_id,
                home = standings.home_frames_won,
                away = standings.away_frames_won,
                result = %standings.match_result,
                "match complete"
            );
        }
        Ok(status)
    }

    /// Overwrite the winner of a scored frame, if the league allows it.
    ///
    /// # Errors
    /// [`PoolmatchError::CorrectionsDisabled`] unless
    /// [`LeagueConfig::allow_corrections`] is set; otherwise see
    /// [`poolmatch_scheduler::correct_frame_result`].
    pub fn correct_result(
        &mut self,
        round: u8,
        frame_number: u8,
        winner: &PlayerId,
    ) -> Result<RoundStatus> {
        if !self.config.allow_corrections {
            tracing::warn!(
                match_id = %self.header.match_id,
                round,
                frame_number,
                "correction rejected: disabled for this league"
            );
            return Err(PoolmatchError::CorrectionsDisabled);
        }
        let status = correct_frame_result(&mut self.frames, round, frame_number, winner)?;
        self.gate.observe(&self.frames);
        Ok(status)
    }

    // -----------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------

    #[must_use]
    pub fn standings(&self) -> Standings {
        compute_standings(&self.frames)
    }

    /// Lowest round with an unscored frame; `None` once the match is complete.
    #[must_use]
    pub fn active_round(&self) -> Option<u8> {
        active_round(&self.frames)
    }

    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frames of one round, in frame order.
    pub fn round_frames(&self, round: u8) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(move |f| f.spec.round == round)
    }

    #[must_use]
    pub fn schedule(&self) -> &[FrameSpec] {
        &self.schedule
    }

    #[must_use]
    pub fn substitutions(&self) -> &[SubstitutionRecord] {
        self.substitutions.records()
    }

    #[must_use]
    pub fn lineup(&self, side: Side) -> &Lineup {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    #[must_use]
    pub fn header(&self) -> &MatchHeader {
        &self.header
    }

    #[must_use]
    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // Snapshot consistency
    // -----------------------------------------------------------------

    #[must_use]
    pub fn sheet_root(&self) -> [u8; 32] {
        compute_sheet_root(&self.frames)
    }

    /// Confirm another session holds the same score sheet.
    ///
    /// # Errors
    /// [`PoolmatchError::SnapshotMismatch`] if the roots differ.
    pub fn verify_snapshot(&self, expected_root: &[u8; 32]) -> Result<()> {
        let actual = self.sheet_root();
        if actual == *expected_root {
            return Ok(());
        }
        let (expected, actual) = (digest_hex(expected_root), digest_hex(&actual));
        tracing::warn!(
            match_id = %self.header.match_id,
            %expected,
            %actual,
            "score sheet snapshot mismatch"
        );
        Err(PoolmatchError::SnapshotMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use poolmatch_types::MatchResult;

    use super::*;

    fn header() -> MatchHeader {
        MatchHeader {
            match_id: MatchId::new(),
            home_team: TeamId::new(),
            away_team: TeamId::new(),
        }
    }

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|n| PlayerId::from(*n)).collect()
    }

    fn card_with(config: LeagueConfig) -> MatchCard {
        MatchCard::new(
            config,
            header(),
            ids(&["P1", "P2", "P3", "P4"]),
            ids(&["A", "B", "C", "D"]),
        )
        .unwrap()
    }

    fn card() -> MatchCard {
        card_with(LeagueConfig::default())
    }

    fn score_round_for_home(card: &mut MatchCard, round: u8) -> RoundStatus {
        let mut status = None;
        for n in 1..=4 {
            let winner = card
                .round_frames(round)
                .find(|f| f.spec.frame_number == n)
                .unwrap()
                .home_player
                .clone();
            status = Some(card.record_result(round, n, &winner).unwrap());
        }
        status.unwrap()
    }

    #[test]
    fn new_card_has_sixteen_unscored_frames() {
        let card = card();
        assert_eq!(card.schedule().len(), 16);
        assert_eq!(card.frames().len(), 16);
        assert_eq!(card.active_round(), Some(1));
        assert!(card.substitutions().is_empty());
    }

    #[test]
    fn invalid_lineup_rejected() {
        let err = MatchCard::new(
            LeagueConfig::default(),
            header(),
            ids(&["P1", "P2", "P3", "P3"]),
            ids(&["A", "B", "C", "D"]),
        )
        .unwrap_err();
        assert!(matches!(err, PoolmatchError::InvalidLineup { side: Side::Home, .. }));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = LeagueConfig {
            stats_cache_capacity: 0,
            ..LeagueConfig::default()
        };
        let err = MatchCard::new(
            config,
            header(),
            ids(&["P1", "P2", "P3", "P4"]),
            ids(&["A", "B", "C", "D"]),
        )
        .unwrap_err();
        assert!(matches!(err, PoolmatchError::Configuration(_)));
    }

    #[test]
    fn substitution_reseats_future_rounds() {
        let mut card = card();
        card.substitute(Side::Home, 3, Position(1), "P5".into()).unwrap();
        for frame in card.frames().iter().filter(|f| f.spec.home_position == Position(1)) {
            let expected = if frame.round() >= 3 { "P5" } else { "P2" };
            assert_eq!(frame.home_player.as_str(), expected);
        }
        assert_eq!(card.substitutions().len(), 1);
    }

    #[test]
    fn substitution_keeps_recorded_results() {
        let mut card = card();
        score_round_for_home(&mut card, 1);
        card.substitute(Side::Away, 2, Position(0), "E".into()).unwrap();
        assert_eq!(card.standings().home_frames_won, 4);
        assert!(card.round_frames(1).all(Frame::is_complete));
        // Round 2, frame 4 is home 4 v away A, now seated by E.
        let r2f4 = card.round_frames(2).find(|f| f.spec.frame_number == 4).unwrap();
        assert_eq!(r2f4.away_player.as_str(), "E");
    }

    #[test]
    fn substitution_into_started_round_rejected() {
        let mut card = card();
        card.record_result(2, 1, &"P1".into()).unwrap();
        let err = card.substitute(Side::Home, 2, Position(0), "P5".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::RoundAlreadyStarted { round: 2 }));
        let err = card.substitute(Side::Home, 1, Position(0), "P5".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::RoundAlreadyStarted { round: 1 }));
        card.substitute(Side::Home, 3, Position(0), "P5".into()).unwrap();
    }

    #[test]
    fn one_substitution_per_team_per_round() {
        let mut card = card();
        card.substitute(Side::Away, 2, Position(0), "E".into()).unwrap();
        let err = card.substitute(Side::Away, 2, Position(1), "F".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::SubstitutionLimitReached { .. }));
        card.substitute(Side::Home, 2, Position(1), "P5".into()).unwrap();
    }

    #[test]
    fn seated_player_cannot_substitute() {
        let mut card = card();
        let err = card.substitute(Side::Home, 2, Position(0), "P3".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::InvalidSubstitution { .. }));
        let err = card.substitute(Side::Home, 2, Position(0), "B".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::InvalidSubstitution { .. }));
        // A player substituted out may return later.
        card.substitute(Side::Home, 2, Position(0), "P5".into()).unwrap();
        card.substitute(Side::Home, 3, Position(0), "P1".into()).unwrap();
    }

    #[test]
    fn earlier_round_substitution_cannot_double_seat() {
        let mut card = card();
        card.substitute(Side::Home, 3, Position(0), "P5".into()).unwrap();
        let err = card.substitute(Side::Home, 2, Position(1), "P5".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::InvalidSubstitution { .. }));
        assert_eq!(card.substitutions().len(), 1);

        // Same player moved earlier into the same seat is fine.
        card.substitute(Side::Home, 2, Position(0), "P5".into()).unwrap();
        for round in 1..=4 {
            let seated = card
                .round_frames(round)
                .filter(|f| f.home_player.as_str() == "P5")
                .count();
            assert_eq!(seated, usize::from(round >= 2), "round {round}");
        }
    }

    #[test]
    fn earlier_round_substitution_cannot_cross_sides() {
        let mut card = card();
        card.substitute(Side::Away, 4, Position(2), "X".into()).unwrap();
        let err = card.substitute(Side::Home, 3, Position(0), "X".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::InvalidSubstitution { .. }));
    }

    #[test]
    fn shared_player_between_lineups_rejected() {
        let err = MatchCard::new(
            LeagueConfig::default(),
            header(),
            ids(&["P1", "P2", "P3", "X"]),
            ids(&["X", "B", "C", "D"]),
        )
        .unwrap_err();
        assert!(matches!(err, PoolmatchError::InvalidLineup { side: Side::Away, .. }));
    }

    #[test]
    fn failed_substitution_leaves_card_untouched() {
        let mut card = card();
        let root = card.sheet_root();
        assert!(card.substitute(Side::Home, 9, Position(0), "P5".into()).is_err());
        assert_eq!(card.sheet_root(), root);
        assert!(card.substitutions().is_empty());
    }

    #[test]
    fn round_completion_reported() {
        let mut card = card();
        let status = score_round_for_home(&mut card, 1);
        assert!(status.complete);
        assert_eq!(card.active_round(), Some(2));
        let standings = card.standings();
        assert_eq!(standings.home_frames_won, 4);
        assert_eq!(standings.match_result, MatchResult::Home);
        assert!(!standings.is_final());
    }

    #[test]
    fn full_match_is_final() {
        let mut card = card();
        for round in 1..=4 {
            score_round_for_home(&mut card, round);
        }
        assert_eq!(card.active_round(), None);
        let standings = card.standings();
        assert!(standings.is_final());
        assert_eq!(standings.home_frames_won, 16);
    }

    #[test]
    fn corrections_disabled_by_default() {
        let mut card = card();
        card.record_result(1, 1, &"P1".into()).unwrap();
        let err = card.correct_result(1, 1, &"A".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::CorrectionsDisabled));
        assert_eq!(card.frames()[0].winner, Some("P1".into()));
    }

    #[test]
    fn corrections_when_enabled() {
        let mut card = card_with(LeagueConfig {
            allow_corrections: true,
            ..LeagueConfig::default()
        });
        card.record_result(1, 1, &"P1".into()).unwrap();
        card.correct_result(1, 1, &"A".into()).unwrap();
        assert_eq!(card.frames()[0].winner, Some("A".into()));
        assert_eq!(card.standings().away_frames_won, 1);

        let err = card.correct_result(1, 2, &"P2".into()).unwrap_err();
        assert!(matches!(err, PoolmatchError::FrameNotScored { .. }));
    }

    #[test]
    fn snapshot_roundtrip_preserves_sheet() {
        let mut card = card();
        card.substitute(Side::Home, 3, Position(1), "P5".into()).unwrap();
        score_round_for_home(&mut card, 1);
        card.record_result(2, 2, &"C".into()).unwrap();

        let snapshot = card.to_snapshot();
        assert_eq!(snapshot.results.len(), 5);
        let rebuilt =
            MatchCard::from_snapshot(LeagueConfig::default(), *card.header(), snapshot).unwrap();
        assert_eq!(rebuilt.sheet_root(), card.sheet_root());
        assert_eq!(rebuilt.substitutions(), card.substitutions());
        assert!(rebuilt.verify_snapshot(&card.sheet_root()).is_ok());
    }

    #[test]
    fn diverged_sessions_detected() {
        let mut home_session = card();
        let away_session = home_session.clone();
        home_session.record_result(1, 3, &"P3".into()).unwrap();

        let err = away_session
            .verify_snapshot(&home_session.sheet_root())
            .unwrap_err();
        match err {
            PoolmatchError::SnapshotMismatch { expected, actual } => {
                assert_eq!(expected.len(), 64);
                assert_ne!(expected, actual);
            }
            other => panic!("Expected SnapshotMismatch, got: {other:?}"),
        }
    }

    #[test]
    fn header_side_lookup() {
        let h = header();
        assert_eq!(h.side_of(h.home_team), Some(Side::Home));
        assert_eq!(h.side_of(h.away_team), Some(Side::Away));
        assert_eq!(h.side_of(TeamId::new()), None);
    }
}
