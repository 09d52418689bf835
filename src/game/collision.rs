//! Catch-Band Collision Detection
//!
//! Collisions use banded proximity rather than continuous physics: a fruit
//! is catchable only while its vertical position is inside the catch band
//! near the bottom of the playfield, and a catch is a horizontal distance
//! comparison against the configured threshold.

use crate::config::{CATCH_BAND_MAX_Y, CATCH_BAND_MIN_Y};
use crate::game::state::{Fruit, GameState, Player, PlayerId};

/// Whether a vertical position is inside the catch window.
#[inline]
pub fn in_catch_band(y: f32) -> bool {
    (CATCH_BAND_MIN_Y..=CATCH_BAND_MAX_Y).contains(&y)
}

/// One (player, fruit) catch to resolve.
#[derive(Debug, PartialEq, Eq)]
pub struct Catch {
    /// The catching player
    pub player_id: PlayerId,
    /// The fruit caught
    pub fruit_id: u64,
}

/// Whether this player catches this fruit right now.
///
/// The fruit's `catchers` set guards idempotence: a player already in the
/// set never re-catches, even when the proximity condition holds again on a
/// later tick. A fruit some other player already collected stays catchable
/// while in the band (co-operative catch).
#[inline]
pub fn player_catches(player: &Player, fruit: &Fruit, catch_threshold: f32) -> bool {
    in_catch_band(fruit.y)
        && (fruit.x - player.x).abs() < catch_threshold
        && !fruit.catchers.contains(&player.id)
}

/// Enumerate every catch on the current tick.
///
/// Iterates fruits and players in id order (BTreeMap), so the result order
/// is stable. All players within the threshold of the same fruit catch it
/// simultaneously.
pub fn find_catches(state: &GameState, catch_threshold: f32) -> Vec<Catch> {
    let mut catches = Vec::new();

    for fruit in state.fruits.values() {
        if !in_catch_band(fruit.y) {
            continue;
        }

        for player in state.players.values() {
            if player_catches(player, fruit, catch_threshold) {
                catches.push(Catch {
                    player_id: player.id.clone(),
                    fruit_id: fruit.id,
                });
            }
        }
    }

    catches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{FruitKind, RosterEntry};

    fn two_player_state() -> GameState {
        GameState::new(
            &[
                RosterEntry::new("p1", "Ada", "🦊"),
                RosterEntry::new("p2", "Grace", "🐙"),
            ],
            1,
        )
    }

    fn fruit_at(id: u64, x: f32, y: f32) -> Fruit {
        let mut fruit = Fruit::new(id, FruitKind::Apple, x, 1.0);
        fruit.y = y;
        fruit
    }

    #[test]
    fn test_catch_band_window() {
        assert!(!in_catch_band(84.9));
        assert!(in_catch_band(85.0));
        assert!(in_catch_band(92.0));
        assert!(in_catch_band(100.0));
        assert!(!in_catch_band(100.1));
    }

    #[test]
    fn test_no_catch_above_band() {
        let mut state = two_player_state();
        state.fruits.insert(0, fruit_at(0, 50.0, 40.0));
        assert!(find_catches(&state, 8.0).is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut state = two_player_state();
        // Both players at 50; fruit exactly threshold away
        state.fruits.insert(0, fruit_at(0, 58.0, 90.0));
        assert!(find_catches(&state, 8.0).is_empty());

        // One tenth closer: caught
        state.fruits.insert(1, fruit_at(1, 57.9, 90.0));
        let catches = find_catches(&state, 8.0);
        assert_eq!(catches.len(), 2);
        assert!(catches.iter().all(|c| c.fruit_id == 1));
    }

    #[test]
    fn test_cooperative_catch_lists_both_players() {
        let mut state = two_player_state();
        state.fruits.insert(0, fruit_at(0, 52.0, 90.0));

        let catches = find_catches(&state, 8.0);
        assert_eq!(
            catches,
            vec![
                Catch {
                    player_id: PlayerId::from("p1"),
                    fruit_id: 0
                },
                Catch {
                    player_id: PlayerId::from("p2"),
                    fruit_id: 0
                },
            ]
        );
    }

    #[test]
    fn test_existing_catcher_is_excluded() {
        let mut state = two_player_state();
        let mut fruit = fruit_at(0, 52.0, 90.0);
        fruit.collected = true;
        fruit.catchers.insert(PlayerId::from("p1"));
        state.fruits.insert(0, fruit);

        // p1 already scored; only p2 may still catch the collected fruit
        let catches = find_catches(&state, 8.0);
        assert_eq!(catches.len(), 1);
        assert_eq!(catches[0].player_id, PlayerId::from("p2"));
    }
}
