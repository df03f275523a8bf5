//! Frame result recording.
//!
//! Results are written into the caller's frame list in place. A frame is
//! scored once through [`record_frame_result`]; overwriting an existing
//! result goes through the separate [`correct_frame_result`] path so that
//! callers can gate it.

use chrono::Utc;
use poolmatch_types::{Frame, PlayerId, PoolmatchError, Result, RoundStatus, constants};

fn find_frame(frames: &[Frame], round: u8, frame_number: u8) -> Result<usize> {
    frames
        .iter()
        .position(|f| f.spec.round == round && f.spec.frame_number == frame_number)
        .ok_or(PoolmatchError::UnknownFrame {
            round,
            frame_number,
        })
}

fn check_winner(frame: &Frame, winner: &PlayerId) -> Result<()> {
    if frame.side_of(winner).is_none() {
        return Err(PoolmatchError::InvalidWinner {
            round: frame.spec.round,
            frame_number: frame.spec.frame_number,
            winner: winner.to_string(),
        });
    }
    Ok(())
}

/// Scoring progress of `round` within `frames`.
#[must_use]
pub fn round_status(frames: &[Frame], round: u8) -> RoundStatus {
    let frames_scored = frames
        .iter()
        .filter(|f| f.spec.round == round && f.is_complete())
        .count();
    let frames_scored = u8::try_from(frames_scored).unwrap_or(u8::MAX);
    RoundStatus {
        round,
        frames_scored,
        complete: frames_scored == constants::FRAMES_PER_ROUND,
    }
}

/// Lowest round that still has an unscored frame, or `None` once every
/// frame has a result.
#[must_use]
pub fn active_round(frames: &[Frame]) -> Option<u8> {
    frames
        .iter()
        .filter(|f| !f.is_complete())
        .map(Frame::round)
        .min()
}

/// Record the winner of a frame that has no result yet.
///
/// Returns the status of the containing round; `complete` is `true` exactly
/// when this result was the round's last missing frame.
///
/// # Errors
/// - [`PoolmatchError::UnknownFrame`] if no frame has this key
/// - [`PoolmatchError::AlreadyScored`] if the frame already has a winner
///   (the existing winner is left untouched)
/// - [`PoolmatchError::InvalidWinner`] if `winner` did not play the frame
pub fn record_frame_result(
    frames: &mut [Frame],
    round: u8,
    frame_number: u8,
    winner: &PlayerId,
) -> Result<RoundStatus> {
    let idx = find_frame(frames, round, frame_number)?;
    let frame = &mut frames[idx];

    if frame.is_complete() {
        return Err(PoolmatchError::AlreadyScored {
            round,
            frame_number,
        });
    }
    check_winner(frame, winner)?;

    frame.winner = Some(winner.clone());
    frame.recorded_at = Some(Utc::now());

    tracing::debug!(
        round,
        frame_number,
        winner = %winner,
        "frame result recorded"
    );

    let status = round_status(frames, round);
    if status.complete {
        tracing::info!(round, "round complete");
    }
    Ok(status)
}

/// Overwrite the winner of a frame that already has a result.
///
/// # Errors
/// - [`PoolmatchError::UnknownFrame`] if no frame has this key
/// - [`PoolmatchError::FrameNotScored`] if the frame has no result to correct
/// - [`PoolmatchError::InvalidWinner`] if `winner` did not play the frame
pub fn correct_frame_result(
    frames: &mut [Frame],
    round: u8,
    frame_number: u8,
    winner: &PlayerId,
) -> Result<RoundStatus> {
    let idx = find_frame(frames, round, frame_number)?;
    let frame = &mut frames[idx];

    let Some(previous) = frame.winner.clone() else {
        return Err(PoolmatchError::FrameNotScored {
            round,
            frame_number,
        });
    };
    check_winner(frame, winner)?;

    frame.winner = Some(winner.clone());
    frame.recorded_at = Some(Utc::now());

    tracing::info!(
        round,
        frame_number,
        previous = %previous,
        winner = %winner,
        "frame result corrected"
    );

    Ok(round_status(frames, round))
}
