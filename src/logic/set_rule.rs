//! Set rules: first to 11, win by 2 once both players reach 10.
//!
//! Unfinished scores are valid; they are simply not finished yet.

use crate::models::{SetScore, Side};

/// Points needed to win a set outright.
pub const POINTS_TO_WIN: u32 = 11;
/// From this score for both players, the set goes on until someone leads by [`WIN_MARGIN`].
pub const DEUCE_FROM: u32 = 10;
pub const WIN_MARGIN: u32 = 2;

fn in_deuce(set: &SetScore) -> bool {
    set.player_1_points.min(set.player_2_points) >= DEUCE_FROM
}

fn margin(set: &SetScore) -> u32 {
    set.player_1_points.abs_diff(set.player_2_points)
}

fn top_score(set: &SetScore) -> u32 {
    set.player_1_points.max(set.player_2_points)
}

/// True unless the score could never occur under the rules.
pub fn is_valid(set: &SetScore) -> bool {
    if in_deuce(set) {
        margin(set) <= WIN_MARGIN
    } else {
        top_score(set) <= POINTS_TO_WIN
    }
}

pub fn is_finished(set: &SetScore) -> bool {
    if in_deuce(set) {
        margin(set) == WIN_MARGIN
    } else {
        top_score(set) == POINTS_TO_WIN
    }
}

/// Winner of a finished set; `None` while the set is still open.
pub fn winner(set: &SetScore) -> Option<Side> {
    if !is_finished(set) {
        return None;
    }
    if set.player_1_points > set.player_2_points {
        Some(Side::One)
    } else {
        Some(Side::Two)
    }
}
