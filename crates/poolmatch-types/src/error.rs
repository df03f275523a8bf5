//! Error types for PoolMatch.
//!
//! All errors use the `PM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Lineup errors
//! - 2xx: Schedule / player resolution errors
//! - 3xx: Scoring errors
//! - 4xx: Match session errors
//! - 5xx: Persisted document errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::Side;

/// Central error enum for all PoolMatch operations.
#[derive(Debug, Error)]
pub enum PoolmatchError {
    // =================================================================
    // Lineup Errors (1xx)
    // =================================================================
    /// A starting lineup has the wrong size, a duplicate, or an empty slot.
    #[error("PM_ERR_100: Invalid {side} lineup: {reason}")]
    InvalidLineup { side: Side, reason: String },

    // =================================================================
    // Schedule Errors (2xx)
    // =================================================================
    /// No occupant could be determined for a position in a round.
    #[error("PM_ERR_200: Unresolved {side} position {position} in round {round}")]
    UnresolvedPosition { side: Side, position: u8, round: u8 },

    // =================================================================
    // Scoring Errors (3xx)
    // =================================================================
    /// No frame exists for this (round, frame number) pair.
    #[error("PM_ERR_300: Unknown frame: round {round}, frame {frame_number}")]
    UnknownFrame { round: u8, frame_number: u8 },

    /// The frame already has a recorded winner.
    #[error("PM_ERR_301: Frame already scored: round {round}, frame {frame_number}")]
    AlreadyScored { round: u8, frame_number: u8 },

    /// The submitted winner did not play in the frame.
    #[error("PM_ERR_302: Invalid winner {winner} for round {round}, frame {frame_number}")]
    InvalidWinner {
        round: u8,
        frame_number: u8,
        winner: String,
    },

    /// A correction was submitted for a frame that has no result yet.
    #[error("PM_ERR_303: Frame not scored: round {round}, frame {frame_number}")]
    FrameNotScored { round: u8, frame_number: u8 },

    // =================================================================
    // Match Session Errors (4xx)
    // =================================================================
    /// The substitution is malformed or would seat a player twice.
    #[error("PM_ERR_400: Invalid substitution: {reason}")]
    InvalidSubstitution { reason: String },

    /// The team has used its substitutions for this round.
    #[error("PM_ERR_401: Substitution limit reached for {side} in round {round}")]
    SubstitutionLimitReached { side: Side, round: u8 },

    /// Substitutions are only accepted for rounds that have not started.
    #[error("PM_ERR_402: Round {round} already started")]
    RoundAlreadyStarted { round: u8 },

    /// Result corrections are switched off in the league configuration.
    #[error("PM_ERR_403: Result corrections are disabled")]
    CorrectionsDisabled,

    /// The local score sheet differs from the snapshot another session holds.
    #[error("PM_ERR_404: Snapshot mismatch: expected {expected}, got {actual}")]
    SnapshotMismatch { expected: String, actual: String },

    // =================================================================
    // Document Errors (5xx)
    // =================================================================
    /// A persisted match document is structurally incomplete.
    #[error("PM_ERR_500: Invalid match document: {reason}")]
    InvalidDocument { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("PM_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("PM_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad values, etc.).
    #[error("PM_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, PoolmatchError>;

impl From<serde_json::Error> for PoolmatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
