//! Substitution log with per-team, per-round limits.
//!
//! The log is append-only and keeps insertion order, which the resolver
//! uses to break ties between records for the same round.

use poolmatch_types::{
    PoolmatchError, Result, Side, SubstitutionRecord, constants,
};

/// Ordered substitution history of a match.
#[derive(Debug, Clone)]
pub struct SubstitutionLog {
    records: Vec<SubstitutionRecord>,
    /// Substitutions each side may make per round.
    max_per_round: usize,
}

impl SubstitutionLog {
    #[must_use]
    pub fn new(max_per_round: usize) -> Self {
        Self {
            records: Vec::new(),
            max_per_round,
        }
    }

    /// Check a record against the log without appending it.
    ///
    /// # Errors
    /// - [`PoolmatchError::InvalidSubstitution`] for an out-of-range round
    ///   or position, or an empty player id
    /// - [`PoolmatchError::SubstitutionLimitReached`] if the side has used
    ///   its substitutions for the round
    pub fn check(&self, record: &SubstitutionRecord) -> Result<()> {
        if record.round == 0 || record.round > constants::ROUNDS_PER_MATCH {
            return Err(PoolmatchError::InvalidSubstitution {
                reason: format!("round {} is outside 1..={}", record.round, constants::ROUNDS_PER_MATCH),
            });
        }
        if !record.position.is_valid() {
            return Err(PoolmatchError::InvalidSubstitution {
                reason: format!("position {} is outside the lineup", record.position),
            });
        }
        if record.new_player_id.is_blank() {
            return Err(PoolmatchError::InvalidSubstitution {
                reason: "substitute player id is empty".to_string(),
            });
        }
        if self.for_round(record.side, record.round).count() >= self.max_per_round {
            return Err(PoolmatchError::SubstitutionLimitReached {
                side: record.side,
                round: record.round,
            });
        }
        Ok(())
    }

    /// Validate and append a record.
    ///
    /// # Errors
    /// Same as [`SubstitutionLog::check`].
    pub fn push(&mut self, record: SubstitutionRecord) -> Result<()> {
        self.check(&record)?;
        self.records.push(record);
        Ok(())
    }

    #[must_use]
    pub fn records(&self) -> &[SubstitutionRecord] {
        &self.records
    }

    /// Records made by `side` effective from `round`.
    pub fn for_round(&self, side: Side, round: u8) -> impl Iterator<Item = &SubstitutionRecord> {
        self.records
            .iter()
            .filter(move |r| r.side == side && r.round == round)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SubstitutionLog {
    fn default() -> Self {
        Self::new(constants::DEFAULT_MAX_SUBSTITUTIONS_PER_ROUND)
    }
}
