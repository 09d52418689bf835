//! Transport Layer
//!
//! The wire contract and the narrow seam over the external pub/sub channel.
//! Everything here is **unreliable by contract**: fire-and-forget publish,
//! at-most-once delivery, no ordering across messages, and self-delivery
//! (a publisher receives its own messages). The simulation never depends on
//! a message arriving - the next full snapshot supersedes anything lost.

pub mod channel;
pub mod wire;

pub use channel::{ActivityChannel, ChannelError, LocalChannel, LossyChannel};
pub use wire::{FruitSnapshot, GameSnapshot, PlayerSnapshot, WireMessage};
