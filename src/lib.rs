//! Coin Hopper - A platform-hopping coin collector
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, platforms, collisions, session state)
//! - `game`: Frame-loop orchestrator that reports to the UI
//! - `host`: Host abstraction (frame scheduling, keyboard input)
//! - `renderer`: Drawing surface contract
//! - `settings`: Runtime configuration

pub mod game;
pub mod host;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, GameObserver, LogObserver};
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
///
/// All kinematics are per frame; the loop runs once per display frame.
pub mod consts {
    use glam::Vec2;

    /// Player body size
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Where the player appears on start and after losing a life
    pub const SPAWN_POINT: Vec2 = Vec2::new(100.0, 300.0);
    pub const PLAYER_MAX_HEALTH: u32 = 100;

    /// Horizontal run speed (no acceleration, set directly from input)
    pub const RUN_SPEED: f32 = 5.0;
    /// Ground jump impulse (negative = up)
    pub const JUMP_POWER: f32 = -12.0;
    /// Double jump is softer than a ground jump
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.9;
    /// Double jump only once the ascent has decayed past this share of jump power
    pub const DOUBLE_JUMP_WINDOW: f32 = 0.5;
    pub const GRAVITY: f32 = 0.5;
    pub const MAX_FALL_SPEED: f32 = 15.0;
    /// Frames after landing during which a jump still counts as a ground jump
    pub const LANDING_GRACE_FRAMES: u32 = 5;
    /// Walk cycle advance per frame (presentation only)
    pub const WALK_ANIMATION_SPEED: f32 = 0.2;

    /// How far the feet may sink into a platform and still land on it
    pub const LANDING_TOLERANCE: f32 = 5.0;
    /// Extra reach above the per-frame fall distance for landing snaps
    pub const LANDING_REACH: f32 = 10.0;
    /// Head-bump reach below a platform's underside
    pub const BUMP_REACH: f32 = 10.0;
    /// Launch velocity from a bouncy platform
    pub const BOUNCE_VELOCITY: f32 = -15.0;
    /// Wall-clock delay between a bounce and the platform starting to vanish
    pub const BOUNCE_DISAPPEAR_DELAY_MS: u32 = 50;

    /// Moving platforms swing this far either side of their origin
    pub const MOVING_RANGE: f32 = 100.0;
    pub const MOVING_SPEED: f32 = 2.0;
    /// Frames a triggered platform holds before it starts shrinking
    pub const DISAPPEAR_DELAY_FRAMES: u32 = 10;
    /// Height lost per frame while shrinking
    pub const DISAPPEAR_SPEED: f32 = 0.1;

    /// Coin floats this far above its platform
    pub const COIN_OFFSET_Y: f32 = 30.0;
    /// Coins never float above this line
    pub const COIN_MIN_Y: f32 = 20.0;
    pub const COIN_RADIUS: f32 = 15.0;
    pub const COIN_SPIN_SPEED: f32 = 0.1;
    pub const COIN_REWARD: u64 = 100;
    /// Chance a generated platform carries a coin
    pub const COIN_CHANCE: f64 = 0.3;
    pub const WIN_BONUS: u64 = 1000;

    pub const STARTING_LIVES: u8 = 3;
    /// Slack below the play field before a fall costs a life
    pub const OUT_OF_BOUNDS_SLACK: f32 = 50.0;
}

/// Visible play-field dimensions (screen space, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
        }
    }
}

impl PlayField {
    /// Clamp a left edge so a body of `width` stays inside the field
    #[inline]
    pub fn clamp_x(&self, x: f32, width: f32) -> f32 {
        x.max(0.0).min(self.width - width)
    }
}
