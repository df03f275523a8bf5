//! Match shape and default values for PoolMatch.

/// Players in a team lineup (home positions 1–4, away positions A–D).
pub const PLAYERS_PER_LINEUP: usize = 4;

/// Rounds in a team match.
pub const ROUNDS_PER_MATCH: u8 = 4;

/// Frames played simultaneously in one round.
pub const FRAMES_PER_ROUND: u8 = 4;

/// Frames in a complete team match.
pub const FRAMES_PER_MATCH: usize = (ROUNDS_PER_MATCH as usize) * (FRAMES_PER_ROUND as usize);

/// Default number of substitutions a team may make in a single round.
pub const DEFAULT_MAX_SUBSTITUTIONS_PER_ROUND: usize = 1;

/// Default number of (team, season) entries held by the stats cache.
pub const DEFAULT_STATS_CACHE_SIZE: usize = 256;
