//! Game State Definitions
//!
//! Entity model and the activity status state machine.
//! Collections use BTreeMap so iteration order is stable across ticks.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, PLAYFIELD_CENTER_X};
use crate::game::events::GameEvent;
use crate::game::leaderboard;
use crate::game::rng::GameRng;

// =============================================================================
// PLAYER ID
// =============================================================================

/// Unique participant identifier, as issued by the roster service.
///
/// Implements Ord so it can key a BTreeMap and serve as the stable
/// tie-break in leaderboard ordering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create from a roster id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// =============================================================================
// ROSTER
// =============================================================================

/// One participant as provided by the excluded roster layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Participant identifier.
    pub id: PlayerId,
    /// Name shown next to the paddle and on the leaderboard.
    pub display_name: String,
    /// Single-glyph avatar shown on the paddle.
    pub avatar_glyph: String,
}

impl RosterEntry {
    /// Convenience constructor for tests and the demo binary.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            display_name: display_name.into(),
            avatar_glyph: glyph.into(),
        }
    }
}

// =============================================================================
// FRUIT
// =============================================================================

/// Kind of falling fruit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FruitKind {
    /// Common, lowest value
    Apple,
    /// Mid value
    Banana,
    /// High value
    Cherry,
    /// Bonus kind, spawned with a small substitution probability
    Golden,
}

impl FruitKind {
    /// Kinds drawn uniformly by the spawn rule.
    pub const STANDARD: [FruitKind; 3] = [FruitKind::Apple, FruitKind::Banana, FruitKind::Cherry];

    /// Points awarded per catcher.
    pub fn points(self) -> u32 {
        match self {
            FruitKind::Apple => 10,
            FruitKind::Banana => 15,
            FruitKind::Cherry => 20,
            FruitKind::Golden => 50,
        }
    }

    /// Whether this is the bonus kind.
    pub fn is_bonus(self) -> bool {
        matches!(self, FruitKind::Golden)
    }
}

/// A falling fruit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fruit {
    /// Unique fruit id (monotonic counter)
    pub id: u64,

    /// Kind, determines point value
    pub kind: FruitKind,

    /// Horizontal position in [0,100]
    pub x: f32,

    /// Vertical position; grows downward, pruned past the floor
    pub y: f32,

    /// Vertical advance per tick
    pub fall_speed: f32,

    /// Set once any player has caught it; kept until pruning so the view
    /// layer can show the fruit as consumed
    pub collected: bool,

    /// Players that have already scored this fruit. Grows only; a player id
    /// in this set never scores the fruit again.
    pub catchers: BTreeSet<PlayerId>,
}

impl Fruit {
    /// Create a new fruit at the top of the playfield.
    pub fn new(id: u64, kind: FruitKind, x: f32, fall_speed: f32) -> Self {
        Self {
            id,
            kind,
            x,
            y: 0.0,
            fall_speed,
            collected: false,
            catchers: BTreeSet::new(),
        }
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// State of one participant's paddle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Participant identifier
    pub id: PlayerId,

    /// Name from the roster
    pub display_name: String,

    /// Avatar glyph from the roster
    pub avatar_glyph: String,

    /// Horizontal position, clamped so the hit-box stays on the field
    pub x: f32,

    /// Accumulated score
    pub score: u32,
}

impl Player {
    /// Create a player at the playfield center.
    pub fn new(entry: &RosterEntry) -> Self {
        Self {
            id: entry.id.clone(),
            display_name: entry.display_name.clone(),
            avatar_glyph: entry.avatar_glyph.clone(),
            x: PLAYFIELD_CENTER_X,
            score: 0,
        }
    }
}

// =============================================================================
// GAME STATUS
// =============================================================================

/// Current phase of the activity.
///
/// Transitions only move forward: Waiting → Countdown → Playing → Ended.
/// A host `start` from Waiting or Ended re-enters Countdown with a reset
/// playfield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Activity shown, match not yet started
    #[default]
    Waiting,
    /// Pre-match countdown running
    Countdown,
    /// Match in progress
    Playing,
    /// Match over, standings on screen
    Ended,
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of one activity, exclusively owned by the host task.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Current phase
    pub status: GameStatus,

    /// Seconds left on the pre-match countdown
    pub countdown_remaining: u32,

    /// Seconds left in the match
    pub time_remaining: u32,

    /// All participants, keyed by id
    pub players: BTreeMap<PlayerId, Player>,

    /// Fruits currently on the playfield, keyed by id
    pub fruits: BTreeMap<u64, Fruit>,

    /// Next fruit id (monotonic counter)
    pub next_fruit_id: u64,

    /// Spawn randomness, seeded per activity
    pub rng: GameRng,
}

impl GameState {
    /// Create the initial state from the participant roster.
    pub fn new(roster: &[RosterEntry], seed: u64) -> Self {
        let players = roster
            .iter()
            .map(|entry| (entry.id.clone(), Player::new(entry)))
            .collect();

        Self {
            status: GameStatus::Waiting,
            countdown_remaining: 0,
            time_remaining: 0,
            players,
            fruits: BTreeMap::new(),
            next_fruit_id: 0,
            rng: GameRng::new(seed),
        }
    }

    /// Host `start` action: reset the playfield and enter Countdown.
    ///
    /// Only honored from Waiting or Ended; returns false (and changes
    /// nothing) mid-countdown or mid-match.
    pub fn start(&mut self, config: &GameConfig) -> bool {
        match self.status {
            GameStatus::Waiting | GameStatus::Ended => {}
            GameStatus::Countdown | GameStatus::Playing => return false,
        }

        for player in self.players.values_mut() {
            player.score = 0;
            player.x = PLAYFIELD_CENTER_X;
        }
        self.fruits.clear();
        self.countdown_remaining = config.countdown_secs;
        self.time_remaining = config.match_duration_secs;
        self.status = GameStatus::Countdown;
        true
    }

    /// Advance the 1 Hz clock by one second.
    ///
    /// During Countdown this decrements the countdown and flips to Playing
    /// at zero; during Playing it decrements the match clock and flips to
    /// Ended at zero. Other phases ignore the clock.
    pub fn second_elapsed(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        match self.status {
            GameStatus::Countdown => {
                self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
                if self.countdown_remaining == 0 {
                    self.status = GameStatus::Playing;
                    events.push(GameEvent::MatchStarted);
                } else {
                    events.push(GameEvent::CountdownTick {
                        remaining: self.countdown_remaining,
                    });
                }
            }
            GameStatus::Playing => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    self.status = GameStatus::Ended;
                    events.push(GameEvent::MatchEnded {
                        winner: self.winner(),
                    });
                }
            }
            GameStatus::Waiting | GameStatus::Ended => {}
        }

        events
    }

    /// Whether the simulation cadences (tick, spawn) should be running.
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Insert a fruit and return its id.
    pub fn add_fruit(&mut self, kind: FruitKind, x: f32, fall_speed: f32) -> u64 {
        let id = self.next_fruit_id;
        self.next_fruit_id += 1;
        self.fruits.insert(id, Fruit::new(id, kind, x, fall_speed));
        id
    }

    /// Highest-scoring player, if anyone scored.
    pub fn winner(&self) -> Option<PlayerId> {
        leaderboard::standings(&self.players)
            .first()
            .filter(|p| p.score > 0)
            .map(|p| p.id.clone())
    }
}

// =============================================================================
// TESTS
// =============================================================================
