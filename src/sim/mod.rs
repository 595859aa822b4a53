//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Seeded RNG only
//! - Stable iteration order (platforms by entity ID)
//! - No rendering or host dependencies

pub mod collision;
pub mod level;
pub mod platform;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{
    Contact, apply_contact, check_player_coin, check_player_out_of_bounds, check_player_platform,
    detect_contact,
};
pub use level::generate_level;
pub use platform::{Behavior, Coin, Decay, LandingEffect, Platform, PlatformKind};
pub use player::Player;
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, PendingEffect, RngState, Rules};
pub use tick::{IntentSource, TickInput, tick};
