//! # poolmatch-types
//!
//! Shared types, errors, and configuration for **PoolMatch**, the team-match
//! scheduler for 8-ball league play.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`PlayerId`], [`MatchId`], [`TeamId`]
//! - **Lineup model**: [`Side`], [`Position`], [`LineupSlot`], [`Lineup`]
//! - **Frame model**: [`FrameSpec`], [`Frame`], [`FrameKey`], [`RoundStatus`]
//! - **Substitution model**: [`SubstitutionRecord`]
//! - **Standings model**: [`Standings`], [`PlayerRecord`], [`RoundScore`], [`MatchResult`]
//! - **Configuration**: [`LeagueConfig`]
//! - **Errors**: [`PoolmatchError`] with `PM_ERR_` prefix codes
//! - **Constants**: match shape and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod ids;
pub mod lineup;
pub mod standings;
pub mod substitution;

// Re-export all primary types at crate root for ergonomic imports:
//   use poolmatch_types::{Lineup, Side, Frame, FrameSpec, ...};

pub use config::*;
pub use error::*;
pub use frame::*;
pub use ids::*;
pub use lineup::*;
pub use standings::*;
pub use substitution::*;

// Constants are accessed via `poolmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
