//! Fruit Spawning
//!
//! Driven by its own cadence in the host loop, independent of the
//! simulation tick.

use crate::config::{clamp_fruit_x, SpawnConfig};
use crate::game::events::GameEvent;
use crate::game::state::{FruitKind, GameState};

/// Spawn one fruit at a random position.
///
/// Position avoids the playfield edges, fall speed is drawn from the
/// configured range, and the kind is uniform over the standard set with a
/// small probability of substituting the bonus kind. Returns None outside
/// the Playing phase.
pub fn spawn_fruit(state: &mut GameState, config: &SpawnConfig) -> Option<GameEvent> {
    if !state.is_playing() {
        return None;
    }

    let x = clamp_fruit_x(state.rng.range_f32(config.x_min, config.x_max));
    let fall_speed = state.rng.range_f32(config.speed_min, config.speed_max);

    let kind = if state.rng.chance(config.bonus_chance) {
        FruitKind::Golden
    } else {
        FruitKind::STANDARD[state.rng.next_index(FruitKind::STANDARD.len())]
    };

    let fruit_id = state.add_fruit(kind, x, fall_speed);

    Some(GameEvent::FruitSpawned {
        fruit_id,
        kind,
        x,
        fall_speed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{GameStatus, RosterEntry};

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(&[RosterEntry::new("p1", "Ada", "🦊")], seed);
        state.status = GameStatus::Playing;
        state
    }

    #[test]
    fn test_no_spawn_outside_playing() {
        let mut state = playing_state(1);
        state.status = GameStatus::Waiting;
        assert!(spawn_fruit(&mut state, &SpawnConfig::default()).is_none());

        state.status = GameStatus::Ended;
        assert!(spawn_fruit(&mut state, &SpawnConfig::default()).is_none());
        assert!(state.fruits.is_empty());
    }

    #[test]
    fn test_spawned_fruit_within_ranges() {
        let cfg = SpawnConfig::default();
        let mut state = playing_state(42);

        for _ in 0..200 {
            spawn_fruit(&mut state, &cfg).unwrap();
        }

        for fruit in state.fruits.values() {
            assert!((cfg.x_min..cfg.x_max).contains(&fruit.x));
            assert!((cfg.speed_min..cfg.speed_max).contains(&fruit.fall_speed));
            assert_eq!(fruit.y, 0.0);
            assert!(!fruit.collected);
            assert!(fruit.catchers.is_empty());
        }
    }

    #[test]
    fn test_bonus_substitution_extremes() {
        let always = SpawnConfig {
            bonus_chance: 1.0,
            ..Default::default()
        };
        let mut state = playing_state(7);
        for _ in 0..50 {
            spawn_fruit(&mut state, &always).unwrap();
        }
        assert!(state.fruits.values().all(|f| f.kind == FruitKind::Golden));

        let never = SpawnConfig {
            bonus_chance: 0.0,
            ..Default::default()
        };
        let mut state = playing_state(7);
        for _ in 0..50 {
            spawn_fruit(&mut state, &never).unwrap();
        }
        assert!(state.fruits.values().all(|f| !f.kind.is_bonus()));
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let cfg = SpawnConfig::default();
        let mut a = playing_state(12345);
        let mut b = playing_state(12345);

        for _ in 0..20 {
            spawn_fruit(&mut a, &cfg);
            spawn_fruit(&mut b, &cfg);
        }

        assert_eq!(a.fruits.len(), b.fruits.len());
        for (id, fa) in &a.fruits {
            let fb = &b.fruits[id];
            assert_eq!(fa.x, fb.x);
            assert_eq!(fa.fall_speed, fb.fall_speed);
            assert_eq!(fa.kind, fb.kind);
        }
    }
}
