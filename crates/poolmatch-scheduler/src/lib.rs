//! # poolmatch-scheduler
//!
//! **Pure deterministic frame scheduler for PoolMatch team matches.**
//!
//! The scheduler takes two four-player lineups and produces the 16-frame
//! round robin, resolves who plays each frame under the substitution log,
//! records results, and aggregates standings. It has:
//!
//! - **Zero side effects**: no storage, no authorization, no rendering
//! - **Deterministic output**: same lineups -> same schedule, every time
//! - **Two-phase resolution**: pairings are position-only; players are
//!   resolved separately so substitutions never touch the rotation

pub mod determinism;
pub mod resolve;
pub mod schedule;
pub mod scoring;
pub mod standings;

pub use determinism::{compute_schedule_digest, compute_sheet_root, digest_hex, verify_sheet_root};
pub use resolve::{occupant_at, resolve_players};
pub use schedule::{away_position_for, breaking_side_for, generate_schedule, rotation};
pub use scoring::{active_round, correct_frame_result, record_frame_result, round_status};
pub use standings::compute_standings;
