//! Game Events
//!
//! Events generated by the simulation. The host loop consumes them for
//! structured logging; the catch event carries the points awarded so a view
//! layer can drive its "points earned" signal from the stream.

use serde::{Deserialize, Serialize};

use crate::game::state::{FruitKind, PlayerId};

/// One simulation event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fruit entered the playfield.
    FruitSpawned {
        /// Fruit identifier
        fruit_id: u64,
        /// Kind spawned
        kind: FruitKind,
        /// Horizontal spawn position
        x: f32,
        /// Vertical advance per tick
        fall_speed: f32,
    },

    /// A player caught a fruit. Emitted once per (fruit, player) pair.
    FruitCaught {
        /// Fruit identifier
        fruit_id: u64,
        /// Kind caught
        kind: FruitKind,
        /// Catching player
        player_id: PlayerId,
        /// Points awarded for this catch
        points: u32,
        /// Player's score after the award
        new_score: u32,
    },

    /// The pre-match countdown ticked down (not emitted for the final tick,
    /// which emits [`GameEvent::MatchStarted`] instead).
    CountdownTick {
        /// Seconds left before the match starts
        remaining: u32,
    },

    /// Countdown finished; the simulation cadences are now running.
    MatchStarted,

    /// Match clock reached zero.
    MatchEnded {
        /// Highest-scoring player, if anyone scored
        winner: Option<PlayerId>,
    },
}
