//! Movement Merge
//!
//! Folds asynchronous, unordered `player_move` messages into the
//! authoritative player list. The merge is last-write-wins per player: no
//! sequence numbers, so a reordered stale position can briefly overwrite a
//! fresher one and is corrected by the participant's next emission.
//!
//! The host task applies merges between ticks, so a message is relevant to
//! whichever tick it arrives before.

use tracing::debug;

use crate::config::clamp_player_x;
use crate::game::state::{GameState, PlayerId};

/// Apply one movement message to the authoritative state.
///
/// The position is clamped so the player's hit-box stays on the field;
/// out-of-range and non-finite values are corrected, never rejected.
/// Returns false for ids not in the roster (the message is dropped).
pub fn apply_move(
    state: &mut GameState,
    player_id: &PlayerId,
    horizontal_position: f32,
    hitbox_half_width: f32,
) -> bool {
    let Some(player) = state.players.get_mut(player_id) else {
        debug!(player = %player_id, "movement from unknown player dropped");
        return false;
    };

    player.x = clamp_player_x(horizontal_position, hitbox_half_width);
    true
}
