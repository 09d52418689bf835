//! Game Logic Module
//!
//! The authoritative simulation. Only the host task calls into this module
//! mutably; everything here is synchronous, allocation-light, and never
//! panics on external input.
//!
//! ## Module Structure
//!
//! - `state`: Entity model, status state machine, 1 Hz clock handling
//! - `rng`: Seeded spawn randomness
//! - `input`: Movement merge (last-write-wins, clamped)
//! - `spawn`: Fruit spawn rule
//! - `collision`: Catch-band collision detection
//! - `tick`: Fixed-cadence simulation step
//! - `events`: Simulation event stream
//! - `leaderboard`: Score projection

pub mod collision;
pub mod events;
pub mod input;
pub mod leaderboard;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

// Re-export key types
pub use events::GameEvent;
pub use state::{Fruit, FruitKind, GameState, GameStatus, Player, PlayerId, RosterEntry};
pub use tick::TickResult;
