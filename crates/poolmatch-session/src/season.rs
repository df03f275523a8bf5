//! Per-team season statistics across match cards.

use std::collections::BTreeMap;

use poolmatch_types::{PlayerId, PlayerRecord, TeamId};
use serde::{Deserialize, Serialize};

use crate::{MatchCard, SeasonKey, StatsCache};

/// A team's totals over a set of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonStats {
    /// Completed matches only.
    pub matches_played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    /// Scored frames, including those of unfinished matches.
    pub frames_won: u32,
    pub frames_lost: u32,
    /// Frame records of everyone who played for the team.
    pub players: BTreeMap<PlayerId, PlayerRecord>,
}

impl TeamSeasonStats {
    #[must_use]
    pub fn points(&self) -> u32 {
        self.won * 2 + self.drawn
    }
}

/// Fold every card involving `team` into its season totals.
///
/// Cards for fixtures the team is not part of are skipped.
#[must_use]
pub fn aggregate_team_season(team: TeamId, cards: &[MatchCard]) -> TeamSeasonStats {
    let mut stats = TeamSeasonStats::default();

    for card in cards {
        let Some(side) = card.header().side_of(team) else {
            continue;
        };

        for frame in card.frames().iter().filter(|f| f.is_complete()) {
            let won = frame.winning_side() == Some(side);
            if won {
                stats.frames_won += 1;
            } else {
                stats.frames_lost += 1;
            }
            stats
                .players
                .entry(frame.player_for(side).clone())
                .or_default()
                .record(won);
        }

        let standings = card.standings();
        if standings.is_final() {
            stats.matches_played += 1;
            match standings.match_result.winner() {
                Some(winner) if winner == side => stats.won += 1,
                Some(_) => stats.lost += 1,
                None => stats.drawn += 1,
            }
        }
    }

    tracing::debug!(
        %team,
        matches = stats.matches_played,
        frames_won = stats.frames_won,
        frames_lost = stats.frames_lost,
        "team season aggregated"
    );
    stats
}

/// [`aggregate_team_season`] behind a cache keyed by team and season.
pub fn cached_team_season<C: StatsCache + ?Sized>(
    cache: &mut C,
    key: &SeasonKey,
    cards: &[MatchCard],
) -> TeamSeasonStats {
    cache.get_or_compute(key, || aggregate_team_season(key.team, cards))
}

#[cfg(test)]
mod tests {
    use poolmatch_types::{LeagueConfig, MatchId, Position, Side};

    use super::*;
    use crate::MatchHeader;

    fn ids(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|n| PlayerId::from(*n)).collect()
    }

    fn card(home_team: TeamId, away_team: TeamId) -> MatchCard {
        MatchCard::new(
            LeagueConfig::default(),
            MatchHeader {
                match_id: MatchId::new(),
                home_team,
                away_team,
            },
            ids(&["P1", "P2", "P3", "P4"]),
            ids(&["A", "B", "C", "D"]),
        )
        .unwrap()
    }

    /// Score every frame, `home_wins` of them for the home side.
    fn play_out(card: &mut MatchCard, home_wins: usize) {
        let keys: Vec<_> = card
            .frames()
            .iter()
            .map(|f| (f.spec.round, f.spec.frame_number, f.home_player.clone(), f.away_player.clone()))
            .collect();
        for (i, (round, number, home, away)) in keys.into_iter().enumerate() {
            let winner = if i < home_wins { home } else { away };
            card.record_result(round, number, &winner).unwrap();
        }
    }

    #[test]
    fn win_draw_loss_counted() {
        let us = TeamId::new();
        let (a, b, c) = (TeamId::new(), TeamId::new(), TeamId::new());

        let mut won = card(us, a);
        play_out(&mut won, 10);
        let mut drawn = card(b, us);
        play_out(&mut drawn, 8);
        let mut lost = card(us, c);
        play_out(&mut lost, 3);

        let stats = aggregate_team_season(us, &[won, drawn, lost]);
        assert_eq!(stats.matches_played, 3);
        assert_eq!((stats.won, stats.drawn, stats.lost), (1, 1, 1));
        assert_eq!(stats.frames_won, 10 + 8 + 3);
        assert_eq!(stats.frames_lost, 6 + 8 + 13);
        assert_eq!(stats.points(), 3);
    }

    #[test]
    fn unfinished_match_counts_frames_only() {
        let us = TeamId::new();
        let mut partial = card(us, TeamId::new());
        partial.record_result(1, 1, &"P1".into()).unwrap();
        partial.record_result(1, 2, &"B".into()).unwrap();

        let stats = aggregate_team_season(us, &[partial]);
        assert_eq!(stats.matches_played, 0);
        assert_eq!(stats.frames_won, 1);
        assert_eq!(stats.frames_lost, 1);
        assert_eq!(stats.players[&PlayerId::from("P1")].won, 1);
        assert_eq!(stats.players[&PlayerId::from("P2")].lost, 1);
        assert!(!stats.players.contains_key(&PlayerId::from("B")));
    }

    #[test]
    fn other_fixtures_ignored() {
        let us = TeamId::new();
        let mut elsewhere = card(TeamId::new(), TeamId::new());
        play_out(&mut elsewhere, 16);
        assert_eq!(aggregate_team_season(us, &[elsewhere]), TeamSeasonStats::default());
    }

    #[test]
    fn substitute_credited_to_team() {
        let us = TeamId::new();
        let mut card = card(TeamId::new(), us);
        card.substitute(Side::Away, 4, Position(0), "E".into()).unwrap();
        play_out(&mut card, 0);

        let stats = aggregate_team_season(us, &[card]);
        assert_eq!(stats.won, 1);
        assert_eq!(stats.players[&PlayerId::from("E")].played, 1);
        assert_eq!(stats.players[&PlayerId::from("A")].played, 3);
    }
}
