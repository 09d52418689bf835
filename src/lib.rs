//! # Fruit Rally Engine
//!
//! Real-time mini-game synchronization engine for live audience slides.
//! One authoritative host device runs the shared "catch the falling fruit"
//! simulation; remote participants send movement intents and render from
//! full-state snapshots.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     FRUIT RALLY ENGINE                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  config.rs       - Playfield bounds and tunable constants    │
//! │                                                              │
//! │  game/           - Simulation (authoritative, host-owned)    │
//! │  ├── state.rs    - Entity model and status state machine     │
//! │  ├── rng.rs      - Seeded xorshift128+ spawn randomness      │
//! │  ├── input.rs    - Last-write-wins movement merge            │
//! │  ├── spawn.rs    - Fruit spawn rule                          │
//! │  ├── collision.rs- Catch-band collision detection            │
//! │  ├── tick.rs     - Fixed-cadence simulation step             │
//! │  ├── events.rs   - Simulation event stream                   │
//! │  └── leaderboard.rs - Score projection                       │
//! │                                                              │
//! │  net/            - Transport (unreliable, unordered)         │
//! │  ├── wire.rs     - Kind-tagged wire messages and snapshots   │
//! │  └── channel.rs  - Narrow pub/sub seam + local impl          │
//! │                                                              │
//! │  host.rs         - Single owning task: merge/tick/broadcast  │
//! │  client.rs       - Participant movement intent + snapshots   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency model
//!
//! The host task is the only writer of game state. Every mutation source -
//! simulation ticks, fruit spawns, the 1 Hz match clock, inbound movement
//! messages, and host control commands - is folded into one message loop,
//! so mutations are totally ordered without locks. After each mutation the
//! host republishes the complete [`net::wire::GameSnapshot`]; participants
//! keep only a replaceable copy of the latest snapshot. Transport loss is
//! healed implicitly by the next snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod game;
pub mod host;
pub mod net;

// Re-export commonly used types
pub use client::{MoveDirection, ParticipantClient};
pub use config::{GameConfig, SpawnConfig};
pub use game::state::{Fruit, FruitKind, GameState, GameStatus, Player, PlayerId, RosterEntry};
pub use host::ActivityHost;
pub use net::channel::{ActivityChannel, LocalChannel};
pub use net::wire::{GameSnapshot, WireMessage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate while a match is playing (Hz)
pub const TICK_RATE: u32 = 60;
