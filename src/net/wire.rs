//! Wire Messages
//!
//! Kind-tagged JSON messages shared by host and participants. Two kinds
//! flow over one channel: `player_move` (participant → host) and
//! `game_state` (host → all). The host is the only writer of `game_state`
//! and participants are the only writers of `player_move`, so each stream
//! has a single writer and no write conflicts to resolve.

use serde::{Deserialize, Serialize};

use crate::game::state::{FruitKind, GameState, GameStatus, PlayerId};

// =============================================================================
// MESSAGE ENVELOPE
// =============================================================================

/// A message on the activity channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WireMessage {
    /// A participant's movement intent.
    PlayerMove {
        /// Sender's roster id
        player_id: PlayerId,
        /// Requested paddle position, clamped by the host on merge
        horizontal_position: f32,
    },

    /// The host's full-state snapshot, superseding every earlier one.
    GameState(GameSnapshot),
}

impl WireMessage {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Complete game state as broadcast each cycle.
///
/// The whole state is re-sent rather than diffed, so subscribers replace
/// their copy wholesale and lost messages need no recovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Current phase
    pub status: GameStatus,
    /// Seconds left on the countdown
    pub countdown_remaining: u32,
    /// Seconds left in the match
    pub time_remaining: u32,
    /// Every participant
    pub players: Vec<PlayerSnapshot>,
    /// Every fruit on the playfield
    pub fruits: Vec<FruitSnapshot>,
}

/// One player inside a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Roster id
    pub id: PlayerId,
    /// Display name
    pub display_name: String,
    /// Avatar glyph
    pub avatar_glyph: String,
    /// Authoritative paddle position
    pub horizontal_position: f32,
    /// Authoritative score
    pub score: u32,
}

/// One fruit inside a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FruitSnapshot {
    /// Fruit id
    pub id: u64,
    /// Horizontal position
    pub horizontal_position: f32,
    /// Vertical position
    pub vertical_position: f32,
    /// Kind
    pub kind: FruitKind,
    /// Whether any player has caught it
    pub collected: bool,
    /// Players that have scored it
    pub catchers: Vec<PlayerId>,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            status: state.status,
            countdown_remaining: state.countdown_remaining,
            time_remaining: state.time_remaining,
            players: state
                .players
                .values()
                .map(|p| PlayerSnapshot {
                    id: p.id.clone(),
                    display_name: p.display_name.clone(),
                    avatar_glyph: p.avatar_glyph.clone(),
                    horizontal_position: p.x,
                    score: p.score,
                })
                .collect(),
            fruits: state
                .fruits
                .values()
                .map(|f| FruitSnapshot {
                    id: f.id,
                    horizontal_position: f.x,
                    vertical_position: f.y,
                    kind: f.kind,
                    collected: f.collected,
                    catchers: f.catchers.iter().cloned().collect(),
                })
                .collect(),
        }
    }
}

impl GameSnapshot {
    /// Look up a player by id.
    pub fn player(&self, id: &PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// 1-based rank of a player: score descending, id ascending on ties.
    ///
    /// Same ordering rule as the host-side leaderboard, derived locally by
    /// each participant from its snapshot copy.
    pub fn rank_of(&self, id: &PlayerId) -> Option<usize> {
        let me = self.player(id)?;
        let ahead = self
            .players
            .iter()
            .filter(|p| p.score > me.score || (p.score == me.score && p.id < me.id))
            .count();
        Some(ahead + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{FruitKind, GameState, RosterEntry};

    fn sample_state() -> GameState {
        let mut state = GameState::new(
            &[
                RosterEntry::new("p1", "Ada", "🦊"),
                RosterEntry::new("p2", "Grace", "🐙"),
            ],
            1,
        );
        state.add_fruit(FruitKind::Banana, 33.0, 0.9);
        state
    }

    #[test]
    fn test_player_move_kind_tag() {
        let msg = WireMessage::PlayerMove {
            player_id: PlayerId::from("p1"),
            horizontal_position: 42.5,
        };

        let json = msg.to_json().unwrap();
        assert!(json.contains("\"kind\":\"player_move\""));
        assert!(json.contains("\"player_id\":\"p1\""));

        match WireMessage::from_json(&json).unwrap() {
            WireMessage::PlayerMove {
                player_id,
                horizontal_position,
            } => {
                assert_eq!(player_id, PlayerId::from("p1"));
                assert_eq!(horizontal_position, 42.5);
            }
            other => panic!("wrong message kind: {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_kind_tag_and_shape() {
        let state = sample_state();
        let msg = WireMessage::GameState(GameSnapshot::from(&state));

        let json = msg.to_json().unwrap();
        assert!(json.contains("\"kind\":\"game_state\""));
        assert!(json.contains("\"status\":\"waiting\""));
        assert!(json.contains("\"fruits\""));

        let parsed = WireMessage::from_json(&json).unwrap();
        match parsed {
            WireMessage::GameState(snap) => {
                assert_eq!(snap.players.len(), 2);
                assert_eq!(snap.fruits.len(), 1);
                assert_eq!(snap.fruits[0].kind, FruitKind::Banana);
            }
            other => panic!("wrong message kind: {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = sample_state();
        state.players.get_mut(&PlayerId::from("p2")).unwrap().score = 40;
        state.players.get_mut(&PlayerId::from("p2")).unwrap().x = 61.0;

        let snap = GameSnapshot::from(&state);
        let p2 = snap.player(&PlayerId::from("p2")).unwrap();
        assert_eq!(p2.score, 40);
        assert_eq!(p2.horizontal_position, 61.0);
        assert_eq!(p2.display_name, "Grace");
    }

    #[test]
    fn test_rank_of_orders_like_leaderboard() {
        let mut state = sample_state();
        state.players.get_mut(&PlayerId::from("p2")).unwrap().score = 40;
        let snap = GameSnapshot::from(&state);

        assert_eq!(snap.rank_of(&PlayerId::from("p2")), Some(1));
        assert_eq!(snap.rank_of(&PlayerId::from("p1")), Some(2));
        assert_eq!(snap.rank_of(&PlayerId::from("ghost")), None);
    }

    #[test]
    fn test_rank_ties_break_by_id() {
        let state = sample_state(); // both players at score 0
        let snap = GameSnapshot::from(&state);
        assert_eq!(snap.rank_of(&PlayerId::from("p1")), Some(1));
        assert_eq!(snap.rank_of(&PlayerId::from("p2")), Some(2));
    }
}
