//! Digests for cross-session consistency.
//!
//! Home and away captains score the same match from separate sessions. The
//! sheet root is a SHA-256 commitment over the resolved frames and their
//! results, so two sessions can confirm they hold the same snapshot by
//! comparing 32 bytes.

use poolmatch_types::{Frame, FrameSpec, PlayerId, Side};
use sha2::{Digest, Sha256};

fn side_tag(side: Side) -> u8 {
    match side {
        Side::Home => 0,
        Side::Away => 1,
    }
}

fn hash_player(hasher: &mut Sha256, player: &PlayerId) {
    // Length prefix keeps ("ab","c") and ("a","bc") apart.
    hasher.update((player.as_str().len() as u64).to_le_bytes());
    hasher.update(player.as_str().as_bytes());
}

fn hash_spec(hasher: &mut Sha256, spec: &FrameSpec) {
    hasher.update([
        spec.round,
        spec.frame_number,
        spec.home_position.0,
        spec.away_position.0,
        side_tag(spec.breaking_side),
    ]);
}

fn finish(hasher: Sha256) -> [u8; 32] {
    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

/// Digest of a position-only schedule.
#[must_use]
pub fn compute_schedule_digest(schedule: &[FrameSpec]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"poolmatch:schedule:v1:");
    hasher.update((schedule.len() as u64).to_le_bytes());
    for spec in schedule {
        hash_spec(&mut hasher, spec);
    }
    finish(hasher)
}

/// Root hash over resolved frames and their recorded winners.
///
/// Record timestamps are excluded: two sessions that recorded the same
/// results at different times hold the same sheet.
#[must_use]
pub fn compute_sheet_root(frames: &[Frame]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"poolmatch:sheet_root:v1:");
    hasher.update((frames.len() as u64).to_le_bytes());

    for frame in frames {
        hash_spec(&mut hasher, &frame.spec);
        hash_player(&mut hasher, &frame.home_player);
        hash_player(&mut hasher, &frame.away_player);
        match &frame.winner {
            Some(winner) => {
                hasher.update([1u8]);
                hash_player(&mut hasher, winner);
            }
            None => hasher.update([0u8]),
        }
    }

    finish(hasher)
}

/// Recompute the sheet root and compare it with `expected_root`.
#[must_use]
pub fn verify_sheet_root(frames: &[Frame], expected_root: &[u8; 32]) -> bool {
    compute_sheet_root(frames) == *expected_root
}

/// Hex form of a digest, for logs and error messages.
#[must_use]
pub fn digest_hex(digest: &[u8; 32]) -> String {
    hex::encode(digest)
}
