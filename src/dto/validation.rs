//! Validation helpers for operator-entered values and seed data.

use std::collections::HashSet;

use thiserror::Error;
use validator::ValidationError;

use crate::state::roster::Player;

/// Highest quarter number accepted by a manual override (overtime periods included).
pub const MAX_QUARTER: i64 = 9;

/// Reason a manual score or quarter override was refused.
///
/// The operator surface stays silent on these; they exist so callers and tests can tell
/// why nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverrideRejection {
    /// Input did not start with an integer.
    #[error("value is not numeric")]
    NotNumeric,
    /// Scores cannot go below zero.
    #[error("score must not be negative (got {0})")]
    NegativeScore(i64),
    /// Quarter outside `1..=9`.
    #[error("quarter must be between 1 and {MAX_QUARTER} (got {0})")]
    QuarterOutOfRange(i64),
}

/// Parse the leading integer of `raw`, the way a browser `parseInt` would.
///
/// Leading whitespace and an optional sign are accepted; parsing stops at the first
/// non-digit. Returns `None` when no digit is found.
///
/// # Examples
///
/// ```ignore
/// parse_leading_int(" 12yds") // Some(12)
/// parse_leading_int("-7")     // Some(-7)
/// parse_leading_int("abc")    // None
/// ```
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return None;
    }

    // Overflowing digit runs read as non-numeric.
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Validate a manual score entry.
pub fn validate_score_input(raw: &str) -> Result<u32, OverrideRejection> {
    let value = parse_leading_int(raw).ok_or(OverrideRejection::NotNumeric)?;
    if value < 0 {
        return Err(OverrideRejection::NegativeScore(value));
    }
    u32::try_from(value).map_err(|_| OverrideRejection::NotNumeric)
}

/// Validate a manual quarter entry.
pub fn validate_quarter_input(raw: &str) -> Result<u8, OverrideRejection> {
    let value = parse_leading_int(raw).ok_or(OverrideRejection::NotNumeric)?;
    if !(1..=MAX_QUARTER).contains(&value) {
        return Err(OverrideRejection::QuarterOutOfRange(value));
    }
    Ok(value as u8)
}

/// Validates that no two roster entries share a player id.
pub fn validate_unique_player_ids(players: &[Player]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(players.len());
    if let Some(duplicate) = players.iter().find(|player| !seen.insert(player.id)) {
        let mut err = ValidationError::new("duplicate_player_id");
        err.message = Some(format!("Player id {} appears more than once", duplicate.id).into());
        return Err(err);
    }
    Ok(())
}
