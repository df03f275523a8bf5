//! League configuration.
//!
//! The match shape itself (4 rounds of 4 frames, home breaks first) is fixed
//! in [`crate::constants`]; only the workflow rules around it are
//! configurable per league.

use serde::{Deserialize, Serialize};

use crate::{PoolmatchError, Result, constants};

/// Workflow rules applied by a match session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeagueConfig {
    /// Allow a scored frame's winner to be overwritten.
    pub allow_corrections: bool,
    /// Substitutions each team may make per round.
    pub max_substitutions_per_round: usize,
    /// Number of (team, season) entries held by the stats cache.
    pub stats_cache_capacity: usize,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            allow_corrections: false,
            max_substitutions_per_round: constants::DEFAULT_MAX_SUBSTITUTIONS_PER_ROUND,
            stats_cache_capacity: constants::DEFAULT_STATS_CACHE_SIZE,
        }
    }
}

impl LeagueConfig {
    /// Parse and validate a JSON config; missing fields take their defaults.
    ///
    /// # Errors
    /// [`PoolmatchError::Serialization`] on malformed JSON,
    /// [`PoolmatchError::Configuration`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// [`PoolmatchError::Configuration`] if a value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.max_substitutions_per_round > constants::PLAYERS_PER_LINEUP {
            return Err(PoolmatchError::Configuration(format!(
                "max_substitutions_per_round {} exceeds lineup size {}",
                self.max_substitutions_per_round,
                constants::PLAYERS_PER_LINEUP
            )));
        }
        if self.stats_cache_capacity == 0 {
            return Err(PoolmatchError::Configuration(
                "stats_cache_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LeagueConfig::default();
        assert!(!cfg.allow_corrections);
        assert_eq!(cfg.max_substitutions_per_round, 1);
        assert_eq!(cfg.stats_cache_capacity, 256);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = LeagueConfig::from_json(r#"{"allowCorrections": true}"#).unwrap();
        assert!(cfg.allow_corrections);
        assert_eq!(cfg.max_substitutions_per_round, 1);
    }

    #[test]
    fn zero_cache_capacity_rejected() {
        let err = LeagueConfig::from_json(r#"{"statsCacheCapacity": 0}"#).unwrap_err();
        assert!(matches!(err, PoolmatchError::Configuration(_)));
    }

    #[test]
    fn too_many_substitutions_rejected() {
        let cfg = LeagueConfig {
            max_substitutions_per_round: 5,
            ..LeagueConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = LeagueConfig::from_json("{").unwrap_err();
        assert!(matches!(err, PoolmatchError::Serialization(_)));
    }
}
