//! Simulation Tick
//!
//! One fixed-cadence advance of the world: fruit motion, catch resolution,
//! pruning. The tick never touches the clocks - the 1 Hz match clock and
//! the spawn cadence are separate inputs to the host loop.

use crate::config::{GameConfig, FRUIT_PRUNE_Y};
use crate::game::collision::find_catches;
use crate::game::events::GameEvent;
use crate::game::state::GameState;

/// Result of one tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick (one per new catch)
    pub events: Vec<GameEvent>,
}

/// Advance the simulation by one tick.
///
/// Outside the Playing phase this is a no-op. Each tick:
///
/// 1. every fruit advances by its fall speed - collected fruit keeps
///    falling so the view can show it as consumed until it is pruned;
/// 2. catches are resolved: each (fruit, player) pair within the threshold
///    scores exactly once, co-operative catches all land on the same tick;
/// 3. fruits past the floor are pruned, caught or not.
pub fn tick(state: &mut GameState, config: &GameConfig) -> TickResult {
    let mut result = TickResult::default();

    if !state.is_playing() {
        return result;
    }

    // 1. Advance fruit positions
    for fruit in state.fruits.values_mut() {
        fruit.y += fruit.fall_speed;
    }

    // 2. Resolve catches
    for catch in find_catches(state, config.catch_threshold) {
        let Some(fruit) = state.fruits.get_mut(&catch.fruit_id) else {
            continue;
        };
        // insert returns false if the player already scored this fruit
        if !fruit.catchers.insert(catch.player_id.clone()) {
            continue;
        }
        fruit.collected = true;
        let kind = fruit.kind;
        let points = kind.points();
        let fruit_id = fruit.id;

        let Some(player) = state.players.get_mut(&catch.player_id) else {
            continue;
        };
        player.score = player.score.saturating_add(points);

        result.events.push(GameEvent::FruitCaught {
            fruit_id,
            kind,
            player_id: catch.player_id,
            points,
            new_score: player.score,
        });
    }

    // 3. Prune fruit past the floor, regardless of collection state
    state.fruits.retain(|_, fruit| fruit.y <= FRUIT_PRUNE_Y);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Fruit, FruitKind, GameStatus, PlayerId, RosterEntry};

    fn playing_state(entries: &[RosterEntry]) -> GameState {
        let mut state = GameState::new(entries, 1);
        state.status = GameStatus::Playing;
        state
    }

    fn two_players_at_center() -> GameState {
        playing_state(&[
            RosterEntry::new("p1", "Ada", "🦊"),
            RosterEntry::new("p2", "Grace", "🐙"),
        ])
    }

    fn insert_fruit(state: &mut GameState, id: u64, kind: FruitKind, x: f32, y: f32, speed: f32) {
        let mut fruit = Fruit::new(id, kind, x, speed);
        fruit.y = y;
        state.fruits.insert(id, fruit);
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut state = two_players_at_center();
        state.status = GameStatus::Countdown;
        insert_fruit(&mut state, 0, FruitKind::Apple, 50.0, 90.0, 1.0);

        let result = tick(&mut state, &GameConfig::default());
        assert!(result.events.is_empty());
        assert_eq!(state.fruits[&0].y, 90.0, "fruit did not move");
    }

    #[test]
    fn test_fruits_advance_by_fall_speed() {
        let mut state = two_players_at_center();
        insert_fruit(&mut state, 0, FruitKind::Apple, 10.0, 0.0, 0.8);

        tick(&mut state, &GameConfig::default());
        assert_eq!(state.fruits[&0].y, 0.8);

        tick(&mut state, &GameConfig::default());
        assert_eq!(state.fruits[&0].y, 1.6);
    }

    /// The worked scenario: two players at 50, a fruit at 52 entering the
    /// band with threshold 8 - both catch, both score the kind's value.
    #[test]
    fn test_cooperative_catch_scores_both() {
        let cfg = GameConfig {
            catch_threshold: 8.0,
            ..Default::default()
        };
        let mut state = two_players_at_center();
        // One tick of fall puts the fruit at y=85, the top of the band
        insert_fruit(&mut state, 0, FruitKind::Cherry, 52.0, 84.0, 1.0);

        let result = tick(&mut state, &cfg);

        assert_eq!(result.events.len(), 2);
        assert_eq!(state.players[&PlayerId::from("p1")].score, 20);
        assert_eq!(state.players[&PlayerId::from("p2")].score, 20);

        let fruit = &state.fruits[&0];
        assert!(fruit.collected);
        assert_eq!(fruit.catchers.len(), 2);
        assert!(fruit.catchers.contains(&PlayerId::from("p1")));
        assert!(fruit.catchers.contains(&PlayerId::from("p2")));
    }

    #[test]
    fn test_catch_scores_at_most_once_across_ticks() {
        let cfg = GameConfig::default();
        let mut state = two_players_at_center();
        // Slow fruit stays inside the band for many ticks
        insert_fruit(&mut state, 0, FruitKind::Apple, 50.0, 85.0, 0.1);

        for _ in 0..20 {
            tick(&mut state, &cfg);
        }

        // Proximity held for 20 ticks, but each player scored exactly once
        assert_eq!(state.players[&PlayerId::from("p1")].score, 10);
        assert_eq!(state.players[&PlayerId::from("p2")].score, 10);
    }

    #[test]
    fn test_late_arriving_player_can_still_catch_collected_fruit() {
        let cfg = GameConfig::default();
        let mut state = two_players_at_center();
        insert_fruit(&mut state, 0, FruitKind::Banana, 58.0, 85.0, 0.1);

        // Only p1 is close enough at first
        state.players.get_mut(&PlayerId::from("p1")).unwrap().x = 55.0;
        state.players.get_mut(&PlayerId::from("p2")).unwrap().x = 20.0;
        tick(&mut state, &cfg);
        assert_eq!(state.players[&PlayerId::from("p1")].score, 15);
        assert_eq!(state.players[&PlayerId::from("p2")].score, 0);
        assert!(state.fruits[&0].collected);

        // p2 slides under the already-collected fruit while it is in band
        state.players.get_mut(&PlayerId::from("p2")).unwrap().x = 57.0;
        tick(&mut state, &cfg);
        assert_eq!(state.players[&PlayerId::from("p2")].score, 15);
        // And p1 still only scored once
        assert_eq!(state.players[&PlayerId::from("p1")].score, 15);
    }

    #[test]
    fn test_missed_fruit_is_pruned_without_penalty() {
        let cfg = GameConfig::default();
        let mut state = two_players_at_center();
        // Far from both players; will cross the floor uncaught
        state.players.get_mut(&PlayerId::from("p1")).unwrap().x = 5.0;
        state.players.get_mut(&PlayerId::from("p2")).unwrap().x = 5.0;
        insert_fruit(&mut state, 0, FruitKind::Apple, 90.0, 104.5, 1.0);

        tick(&mut state, &cfg);

        assert!(state.fruits.is_empty());
        assert_eq!(state.players[&PlayerId::from("p1")].score, 0);
    }

    #[test]
    fn test_collected_fruit_is_pruned_past_floor() {
        let cfg = GameConfig::default();
        let mut state = two_players_at_center();
        let mut fruit = Fruit::new(0, FruitKind::Apple, 50.0, 1.0);
        fruit.y = 104.5;
        fruit.collected = true;
        fruit.catchers.insert(PlayerId::from("p1"));
        state.fruits.insert(0, fruit);

        tick(&mut state, &cfg);
        assert!(state.fruits.is_empty());
    }

    #[test]
    fn test_fruit_exactly_at_floor_survives_one_more_tick() {
        let cfg = GameConfig::default();
        let mut state = two_players_at_center();
        insert_fruit(&mut state, 0, FruitKind::Apple, 90.0, 104.0, 1.0);

        tick(&mut state, &cfg);
        // y is now exactly 105.0, the prune rule is strictly greater-than
        assert_eq!(state.fruits.len(), 1);

        tick(&mut state, &cfg);
        assert!(state.fruits.is_empty());
    }
}
