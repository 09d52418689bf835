//! Playfield Bounds and Tunable Constants
//!
//! Fixed parameters for the mini-game. Positions are expressed as playfield
//! percentages: x in [0,100] left to right, y growing downward with the
//! catch band near the bottom.

use std::time::Duration;

// =============================================================================
// PLAYFIELD GEOMETRY
// =============================================================================

/// Left edge of the playfield.
pub const PLAYFIELD_MIN_X: f32 = 0.0;

/// Right edge of the playfield.
pub const PLAYFIELD_MAX_X: f32 = 100.0;

/// Horizontal center, where players are placed at match start.
pub const PLAYFIELD_CENTER_X: f32 = 50.0;

/// Top of the vertical window where catches are evaluated.
pub const CATCH_BAND_MIN_Y: f32 = 85.0;

/// Bottom of the catch window.
pub const CATCH_BAND_MAX_Y: f32 = 100.0;

/// Fruits past this vertical position are removed from the playfield.
pub const FRUIT_PRUNE_Y: f32 = 105.0;

/// Clamp a player's horizontal position so its hit-box stays on the field.
///
/// Non-finite input (a malformed wire value) collapses to center rather
/// than poisoning later distance comparisons.
#[inline]
pub fn clamp_player_x(x: f32, hitbox_half_width: f32) -> f32 {
    if !x.is_finite() {
        return PLAYFIELD_CENTER_X;
    }
    x.clamp(
        PLAYFIELD_MIN_X + hitbox_half_width,
        PLAYFIELD_MAX_X - hitbox_half_width,
    )
}

/// Clamp a fruit's horizontal position to the playfield.
#[inline]
pub fn clamp_fruit_x(x: f32) -> f32 {
    if !x.is_finite() {
        return PLAYFIELD_CENTER_X;
    }
    x.clamp(PLAYFIELD_MIN_X, PLAYFIELD_MAX_X)
}

// =============================================================================
// GAME CONFIG
// =============================================================================

/// Configuration for one activity run.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Match length in seconds.
    pub match_duration_secs: u32,
    /// Countdown before the match starts, in seconds.
    pub countdown_secs: u32,
    /// Half-width of a player's hit-box (playfield %).
    pub hitbox_half_width: f32,
    /// Maximum horizontal distance between fruit and player for a catch.
    pub catch_threshold: f32,
    /// Simulation tick cadence while playing.
    pub tick_interval: Duration,
    /// Interval between repeated movement emissions while a participant
    /// holds a direction.
    pub move_repeat: Duration,
    /// Horizontal distance added per movement emission.
    pub move_step: f32,
    /// Fruit spawn parameters.
    pub spawn: SpawnConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            match_duration_secs: 60,
            countdown_secs: 3,
            hitbox_half_width: 5.0,
            catch_threshold: 8.0,
            tick_interval: Duration::from_millis(16), // ~60 Hz
            move_repeat: Duration::from_millis(50),
            move_step: 2.5,
            spawn: SpawnConfig::default(),
        }
    }
}

/// Configuration for fruit spawning.
#[derive(Debug, Clone)]
pub struct SpawnConfig {
    /// Interval between spawns while playing.
    pub interval: Duration,
    /// Leftmost spawn position (keeps fruit off the edges).
    pub x_min: f32,
    /// Rightmost spawn position.
    pub x_max: f32,
    /// Slowest fall speed (playfield % per tick).
    pub speed_min: f32,
    /// Fastest fall speed.
    pub speed_max: f32,
    /// Probability of substituting the bonus kind for the uniform draw.
    pub bonus_chance: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(800),
            x_min: 5.0,
            x_max: 95.0,
            speed_min: 0.5,
            speed_max: 1.2,
            bonus_chance: 0.10,
        }
    }
}
