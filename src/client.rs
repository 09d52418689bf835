//! Participant Client
//!
//! The remote side of the activity: translates held movement input into a
//! stream of `player_move` messages and renders strictly from the latest
//! received snapshot.
//!
//! The locally emitted position is an optimistic convenience for a
//! responsive feel, never a second source of truth - whenever the host's
//! snapshot disagrees, the snapshot wins, and the next movement hold seeds
//! from the snapshot position.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::{clamp_player_x, GameConfig, PLAYFIELD_CENTER_X};
use crate::game::state::PlayerId;
use crate::net::channel::ActivityChannel;
use crate::net::wire::{GameSnapshot, WireMessage};

/// Direction of a held movement input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    /// Toward x = 0
    Left,
    /// Toward x = 100
    Right,
}

impl MoveDirection {
    fn sign(self) -> f32 {
        match self {
            MoveDirection::Left => -1.0,
            MoveDirection::Right => 1.0,
        }
    }
}

/// One participant's view of the activity.
pub struct ParticipantClient {
    player_id: PlayerId,
    channel: Arc<dyn ActivityChannel>,
    /// Latest snapshot, replaced wholesale on every receive.
    latest: Arc<RwLock<Option<GameSnapshot>>>,
    /// Optimistic position the emitter advances between snapshots.
    position: Arc<Mutex<f32>>,
    listener: JoinHandle<()>,
    emitter: Option<JoinHandle<()>>,
    hitbox_half_width: f32,
    move_step: f32,
    move_repeat: Duration,
}

impl ParticipantClient {
    /// Create a client and start listening for snapshots.
    pub fn new(player_id: PlayerId, channel: Arc<dyn ActivityChannel>, config: &GameConfig) -> Self {
        let latest = Arc::new(RwLock::new(None));
        let rx = channel.subscribe();
        let listener = tokio::spawn(listen(rx, Arc::clone(&latest)));

        Self {
            player_id,
            channel,
            latest,
            position: Arc::new(Mutex::new(PLAYFIELD_CENTER_X)),
            listener,
            emitter: None,
            hitbox_half_width: config.hitbox_half_width,
            move_step: config.move_step,
            move_repeat: config.move_repeat,
        }
    }

    /// This client's roster id.
    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// Begin a movement hold: emit one step immediately, then keep
    /// emitting at the repeat interval until [`Self::move_stop`].
    ///
    /// The hold seeds from the authoritative position in the latest
    /// snapshot when one is available, so an optimistic drift never
    /// accumulates across holds.
    pub fn move_start(&mut self, direction: MoveDirection) {
        self.move_stop();

        let base = self
            .snapshot_position()
            .unwrap_or_else(|| *self.position.lock().unwrap_or_else(|e| e.into_inner()));

        let step = direction.sign() * self.move_step;
        let first = clamp_player_x(base + step, self.hitbox_half_width);
        *self.position.lock().unwrap_or_else(|e| e.into_inner()) = first;
        self.emit(first);

        let channel = Arc::clone(&self.channel);
        let position = Arc::clone(&self.position);
        let player_id = self.player_id.clone();
        let half_width = self.hitbox_half_width;
        let repeat = self.move_repeat;

        self.emitter = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(repeat).await;

                let next = {
                    let mut pos = position.lock().unwrap_or_else(|e| e.into_inner());
                    *pos = clamp_player_x(*pos + step, half_width);
                    *pos
                };

                let msg = WireMessage::PlayerMove {
                    player_id: player_id.clone(),
                    horizontal_position: next,
                };
                if channel.publish(msg).is_err() {
                    debug!("movement emitter stopping, channel closed");
                    break;
                }
            }
        }));
    }

    /// End the movement hold; no further messages until input resumes.
    pub fn move_stop(&mut self) {
        if let Some(emitter) = self.emitter.take() {
            emitter.abort();
        }
    }

    /// The latest snapshot, if any has arrived yet.
    pub fn latest_snapshot(&self) -> Option<GameSnapshot> {
        self.latest
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Own score from the latest snapshot.
    pub fn my_score(&self) -> Option<u32> {
        let guard = self.latest.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref()?.player(&self.player_id).map(|p| p.score)
    }

    /// Own 1-based rank from the latest snapshot.
    pub fn my_rank(&self) -> Option<usize> {
        let guard = self.latest.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref()?.rank_of(&self.player_id)
    }

    fn snapshot_position(&self) -> Option<f32> {
        let guard = self.latest.read().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()?
            .player(&self.player_id)
            .map(|p| p.horizontal_position)
    }

    fn emit(&self, horizontal_position: f32) {
        let msg = WireMessage::PlayerMove {
            player_id: self.player_id.clone(),
            horizontal_position,
        };
        if self.channel.publish(msg).is_err() {
            debug!("movement dropped, channel closed");
        }
    }
}

impl Drop for ParticipantClient {
    fn drop(&mut self) {
        self.move_stop();
        self.listener.abort();
    }
}

/// Snapshot listener: replace the local copy with each `game_state`
/// received; everything else on the channel is peers' movement intents.
async fn listen(
    mut rx: broadcast::Receiver<WireMessage>,
    latest: Arc<RwLock<Option<GameSnapshot>>>,
) {
    loop {
        match rx.recv().await {
            Ok(WireMessage::GameState(snap)) => {
                *latest.write().unwrap_or_else(|e| e.into_inner()) = Some(snap);
            }
            Ok(WireMessage::PlayerMove { .. }) => {}
            // Falling behind loses intermediate snapshots; the next one
            // supersedes them anyway.
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "snapshot stream lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
