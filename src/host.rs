//! Activity Host
//!
//! The authoritative engine: a single tokio task exclusively owns the
//! [`GameState`] and serializes every mutation source - simulation ticks,
//! fruit spawns, the 1 Hz match clock, inbound movement messages, and host
//! control commands - through one `select!` loop. No locks guard the state
//! because nothing else can reach it.
//!
//! After the initial state and after every mutation the host republishes a
//! complete snapshot. Publishing is fire-and-forget; the loop never waits
//! on the transport.
//!
//! Closing the handle (or dropping it) ends the task, which cancels the
//! tick, spawn, and clock cadences as a group - no periodic work outlives
//! the activity.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::state::{GameState, GameStatus, RosterEntry};
use crate::game::{input, leaderboard, spawn, tick};
use crate::net::channel::ActivityChannel;
use crate::net::wire::{GameSnapshot, WireMessage};

/// Host control errors.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The host task has already shut down.
    #[error("activity host has shut down")]
    Closed,
}

/// Control commands from the presenting surface.
#[derive(Debug)]
enum HostCommand {
    /// Begin (or, after Ended, restart) the match.
    Start,
    /// Tear the activity down.
    Close,
}

/// Handle to a running activity host.
pub struct ActivityHost {
    cmd_tx: mpsc::Sender<HostCommand>,
    task: tokio::task::JoinHandle<()>,
    session_id: Uuid,
}

impl ActivityHost {
    /// Spawn the host task for a roster of participants.
    ///
    /// The initial Waiting snapshot is published as soon as the task runs.
    /// `seed` drives the fruit schedule; the same seed replays the same
    /// spawns.
    pub fn spawn(
        roster: &[RosterEntry],
        config: GameConfig,
        channel: Arc<dyn ActivityChannel>,
        seed: u64,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let state = GameState::new(roster, seed);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);

        let span = info_span!("activity", session = %session_id);
        let task = tokio::spawn(run_activity(state, config, channel, cmd_rx).instrument(span));

        Self {
            cmd_tx,
            task,
            session_id,
        }
    }

    /// This activity's session identity (used in its log span).
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Begin the match: resets the playfield and enters Countdown.
    ///
    /// Ignored by the host loop mid-countdown or mid-match; honored again
    /// once the match has Ended.
    pub async fn start(&self) -> Result<(), HostError> {
        self.cmd_tx
            .send(HostCommand::Start)
            .await
            .map_err(|_| HostError::Closed)
    }

    /// Tear the activity down and wait for the host task to finish.
    ///
    /// All periodic work stops with the task. Dropping the handle without
    /// calling this tears the task down as well, just without waiting.
    pub async fn close(self) {
        let _ = self.cmd_tx.send(HostCommand::Close).await;
        let _ = self.task.await;
    }
}

/// The owning loop. Sole writer of the game state.
async fn run_activity(
    mut state: GameState,
    config: GameConfig,
    channel: Arc<dyn ActivityChannel>,
    mut cmd_rx: mpsc::Receiver<HostCommand>,
) {
    let mut inbound = channel.subscribe();

    let mut ticker = interval(config.tick_interval);
    let mut spawner = interval(config.spawn.interval);
    let mut clock = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    spawner.set_missed_tick_behavior(MissedTickBehavior::Skip);
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

    publish(channel.as_ref(), &state);
    info!(players = state.players.len(), "activity ready");

    loop {
        let playing = state.is_playing();
        let clock_running = matches!(state.status, GameStatus::Countdown | GameStatus::Playing);

        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(HostCommand::Start) => {
                    if state.start(&config) {
                        clock.reset();
                        info!(countdown = state.countdown_remaining, "match starting");
                        publish(channel.as_ref(), &state);
                    } else {
                        debug!(status = ?state.status, "start ignored");
                    }
                }
                Some(HostCommand::Close) | None => break,
            },

            msg = inbound.recv() => match msg {
                Ok(WireMessage::PlayerMove { player_id, horizontal_position }) => {
                    if input::apply_move(
                        &mut state,
                        &player_id,
                        horizontal_position,
                        config.hitbox_half_width,
                    ) {
                        publish(channel.as_ref(), &state);
                    }
                }
                // The host is the sole writer of snapshots; self-delivered
                // copies carry nothing new.
                Ok(WireMessage::GameState(_)) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "inbound stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },

            _ = clock.tick(), if clock_running => {
                let events = state.second_elapsed();
                if events.contains(&GameEvent::MatchStarted) {
                    // Countdown hit zero: the simulation cadences begin now
                    ticker.reset();
                    spawner.reset();
                }
                log_events(&events);
                if state.status == GameStatus::Ended {
                    for (place, player) in leaderboard::top_k(&state.players, 5).iter().enumerate() {
                        info!(place = place + 1, player = %player.id, score = player.score, "final standing");
                    }
                }
                publish(channel.as_ref(), &state);
            }

            _ = ticker.tick(), if playing => {
                let result = tick::tick(&mut state, &config);
                log_events(&result.events);
                publish(channel.as_ref(), &state);
            }

            _ = spawner.tick(), if playing => {
                if let Some(event) = spawn::spawn_fruit(&mut state, &config.spawn) {
                    log_events(std::slice::from_ref(&event));
                    publish(channel.as_ref(), &state);
                }
            }
        }
    }

    debug!("activity loop ended, periodic work cancelled");
}

/// Fire-and-forget snapshot publish. A closed channel means the activity
/// is being torn down; nothing to do about it here.
fn publish(channel: &dyn ActivityChannel, state: &GameState) {
    if channel
        .publish(WireMessage::GameState(GameSnapshot::from(state)))
        .is_err()
    {
        debug!("snapshot dropped, channel closed");
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::FruitCaught {
                player_id,
                kind,
                points,
                new_score,
                ..
            } => {
                info!(player = %player_id, ?kind, points, score = new_score, "fruit caught");
            }
            GameEvent::FruitSpawned {
                fruit_id,
                kind,
                x,
                fall_speed,
            } => {
                debug!(fruit = fruit_id, ?kind, x, fall_speed, "fruit spawned");
            }
            GameEvent::CountdownTick { remaining } => {
                info!(remaining, "countdown");
            }
            GameEvent::MatchStarted => {
                info!("match started");
            }
            GameEvent::MatchEnded { winner } => {
                info!(winner = winner.as_ref().map(|w| w.as_str()), "match ended");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
