//! Leaderboard Projection
//!
//! Pure functions over the player list; safe to recompute on every render.

use std::collections::BTreeMap;

use crate::game::state::{Player, PlayerId};

/// All players ordered by score descending, id ascending on ties.
///
/// The id tie-break keeps the ordering stable: sorting the same player set
/// twice always yields the same result.
pub fn standings(players: &BTreeMap<PlayerId, Player>) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.values().collect();
    // BTreeMap iteration is already id-ascending, so a stable sort on the
    // score alone preserves the id tie-break
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Top K of the standings (3 fits a mid-game overlay, 5-10 an end screen).
pub fn top_k(players: &BTreeMap<PlayerId, Player>, k: usize) -> Vec<&Player> {
    let mut ranked = standings(players);
    ranked.truncate(k);
    ranked
}
