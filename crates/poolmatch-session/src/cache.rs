//! Memoised season statistics.
//!
//! Aggregating a season walks every frame of every card, so results are
//! kept per `(team, season)` until the caller invalidates them after a new
//! result. The bounded cache evicts the oldest inserted entry once full.

use std::collections::{HashMap, VecDeque};

use poolmatch_types::{LeagueConfig, PoolmatchError, Result, TeamId};

use crate::TeamSeasonStats;

/// Cache key: one team in one season.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonKey {
    pub team: TeamId,
    pub season: String,
}

impl SeasonKey {
    pub fn new(team: TeamId, season: impl Into<String>) -> Self {
        Self {
            team,
            season: season.into(),
        }
    }
}

/// Storage for computed season statistics.
pub trait StatsCache {
    /// Return the cached value for `key`, computing and storing it on a miss.
    fn get_or_compute<F>(&mut self, key: &SeasonKey, compute: F) -> TeamSeasonStats
    where
        F: FnOnce() -> TeamSeasonStats;

    /// Drop the entry for `key`. Returns whether one was present.
    fn invalidate(&mut self, key: &SeasonKey) -> bool;
}

/// In-memory [`StatsCache`] holding at most `capacity` entries.
#[derive(Debug)]
pub struct BoundedStatsCache {
    entries: HashMap<SeasonKey, TeamSeasonStats>,
    /// Insertion order for eviction (front = oldest).
    order: VecDeque<SeasonKey>,
    capacity: usize,
}

impl BoundedStatsCache {
    /// # Errors
    /// [`PoolmatchError::Configuration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PoolmatchError::Configuration(
                "stats cache capacity must be > 0".to_string(),
            ));
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// # Errors
    /// Same as [`BoundedStatsCache::new`].
    pub fn from_config(config: &LeagueConfig) -> Result<Self> {
        Self::new(config.stats_cache_capacity)
    }

    #[must_use]
    pub fn contains(&self, key: &SeasonKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StatsCache for BoundedStatsCache {
    fn get_or_compute<F>(&mut self, key: &SeasonKey, compute: F) -> TeamSeasonStats
    where
        F: FnOnce() -> TeamSeasonStats,
    {
        if let Some(stats) = self.entries.get(key) {
            return stats.clone();
        }

        let stats = compute();

        // Evict oldest if at capacity.
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                tracing::debug!(team = %oldest.team, season = %oldest.season, "season stats evicted");
            }
        }

        self.entries.insert(key.clone(), stats.clone());
        self.order.push_back(key.clone());
        stats
    }

    fn invalidate(&mut self, key: &SeasonKey) -> bool {
        if self.entries.remove(key).is_none() {
            return false;
        }
        self.order.retain(|k| k != key);
        true
    }
}
