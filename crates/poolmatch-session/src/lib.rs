//! # poolmatch-session
//!
//! **Match session layer**: the stateful workflow around the pure scheduler.
//!
//! ## Architecture
//!
//! A [`MatchCard`] owns one team match and routes every change through the
//! rules captains play under:
//! 1. Lineups are validated and the 16-frame rotation is generated once
//! 2. Substitutions pass the [`RoundGate`] (no started rounds) and the
//!    [`SubstitutionLog`] (per-team, per-round limit)
//! 3. Frames are re-resolved after each substitution, keeping recorded results
//! 4. Results are recorded once; corrections only when the league allows them
//! 5. The sheet root lets two sessions confirm they hold the same snapshot
//!
//! Persisted documents in any historical shape enter through
//! [`MatchDocument`]; season statistics are memoised behind [`StatsCache`].

pub mod cache;
pub mod document;
pub mod match_card;
pub mod round_gate;
pub mod season;
pub mod substitution_log;

pub use cache::{BoundedStatsCache, SeasonKey, StatsCache};
pub use document::{FrameResult, MatchDocument, MatchSnapshot};
pub use match_card::{MatchCard, MatchHeader};
pub use round_gate::RoundGate;
pub use season::{TeamSeasonStats, aggregate_team_season, cached_team_season};
pub use substitution_log::SubstitutionLog;
