//! Platforms: per-kind behavior, coin attachment, and the disappear animation
//!
//! Each platform runs its own little state machine, independent of the others:
//! active (optionally swinging, coin spinning) until a trigger puts it into
//! irreversible decay, where it shrinks to zero height and gets evicted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Platform kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Swings left and right around its origin
    Moving,
    /// Gives way the moment it is landed on
    Breakable,
    /// Launches the player, then vanishes
    Bouncy,
}

/// What a landing does beyond putting the player on top
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LandingEffect {
    /// Player stays on the platform
    Rest,
    /// Player is thrown upward; the platform should vanish shortly after
    Launch { velocity_y: f32 },
    /// Platform is destroyed and the player keeps falling
    Break,
}

/// Kind-specific behavior and state, chosen once at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Normal,
    Moving {
        origin: Vec2,
        /// +1.0 or -1.0
        direction: f32,
        speed: f32,
    },
    Breakable,
    Bouncy,
}

impl Behavior {
    pub fn for_kind(kind: PlatformKind, origin: Vec2) -> Self {
        match kind {
            PlatformKind::Normal => Behavior::Normal,
            PlatformKind::Moving => Behavior::Moving {
                origin,
                direction: 1.0,
                speed: MOVING_SPEED,
            },
            PlatformKind::Breakable => Behavior::Breakable,
            PlatformKind::Bouncy => Behavior::Bouncy,
        }
    }

    pub fn kind(&self) -> PlatformKind {
        match self {
            Behavior::Normal => PlatformKind::Normal,
            Behavior::Moving { .. } => PlatformKind::Moving,
            Behavior::Breakable => PlatformKind::Breakable,
            Behavior::Bouncy => PlatformKind::Bouncy,
        }
    }

    /// Advance kind-specific motion for one frame
    fn update(&mut self, pos: &mut Vec2) {
        if let Behavior::Moving {
            origin,
            direction,
            speed,
        } = self
        {
            pos.x += *speed * *direction;
            // Reverse once past either bound; the overshoot is kept
            if pos.x > origin.x + MOVING_RANGE || pos.x < origin.x - MOVING_RANGE {
                *direction = -*direction;
            }
        }
    }

    pub fn on_landed(&self) -> LandingEffect {
        match self {
            Behavior::Bouncy => LandingEffect::Launch {
                velocity_y: BOUNCE_VELOCITY,
            },
            Behavior::Breakable => LandingEffect::Break,
            Behavior::Normal | Behavior::Moving { .. } => LandingEffect::Rest,
        }
    }

    /// Only bouncy platforms can be made to disappear
    pub fn can_trigger(&self) -> bool {
        matches!(self, Behavior::Bouncy)
    }
}

/// A collectible coin floating above a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Fixed vertical position; x follows the platform center
    pub y: f32,
    pub collected: bool,
    /// Spin angle (visual only)
    pub rotation: f32,
}

impl Coin {
    fn above(platform_y: f32) -> Self {
        Self {
            y: (platform_y - COIN_OFFSET_Y).max(COIN_MIN_Y),
            collected: false,
            rotation: 0.0,
        }
    }
}

/// Disappear sub-state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decay {
    /// False once triggered; never becomes true again
    pub active: bool,
    /// Frames since the trigger
    pub timer: u32,
    /// Frames to hold before shrinking
    pub delay: u32,
    /// Height lost per frame while shrinking
    pub shrink_rate: f32,
}

impl Default for Decay {
    fn default() -> Self {
        Self {
            active: true,
            timer: 0,
            delay: DISAPPEAR_DELAY_FRAMES,
            shrink_rate: DISAPPEAR_SPEED,
        }
    }
}

impl Decay {
    /// Past the hold period and visibly shrinking
    pub fn is_shrinking(&self) -> bool {
        !self.active && self.timer > self.delay
    }
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Height doubles as the liveness flag: zero means removed
    pub rect: Rect,
    pub behavior: Behavior,
    pub coin: Option<Coin>,
    pub decay: Decay,
}

impl Platform {
    pub fn new(id: u32, rect: Rect, kind: PlatformKind, with_coin: bool) -> Self {
        Self {
            id,
            rect,
            behavior: Behavior::for_kind(kind, rect.pos),
            coin: with_coin.then(|| Coin::above(rect.pos.y)),
            decay: Decay::default(),
        }
    }

    #[inline]
    pub fn kind(&self) -> PlatformKind {
        self.behavior.kind()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.decay.active
    }

    /// Zero height: ready for eviction
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.rect.size.y <= 0.0
    }

    pub fn has_coin(&self) -> bool {
        self.coin.is_some()
    }

    pub fn has_uncollected_coin(&self) -> bool {
        self.coin.is_some_and(|c| !c.collected)
    }

    /// Coin center, if a coin is attached
    pub fn coin_center(&self) -> Option<Vec2> {
        self.coin.map(|c| Vec2::new(self.rect.center().x, c.y))
    }

    /// Advance one frame
    pub fn update(&mut self) {
        if !self.decay.active {
            self.decay.timer += 1;
            if self.decay.timer > self.decay.delay {
                self.rect.size.y = (self.rect.size.y - self.decay.shrink_rate).max(0.0);
            }
            return;
        }

        self.behavior.update(&mut self.rect.pos);

        if let Some(coin) = self.coin.as_mut().filter(|c| !c.collected) {
            coin.rotation += COIN_SPIN_SPEED;
        }
    }

    pub fn landing_effect(&self) -> LandingEffect {
        self.behavior.on_landed()
    }

    /// Start the disappear animation.
    ///
    /// Only an active bouncy platform can be triggered; anything else is a
    /// no-op returning false, so stale or repeated triggers are harmless.
    pub fn trigger_disappear(&mut self) -> bool {
        if self.behavior.can_trigger() && self.decay.active {
            self.decay.active = false;
            return true;
        }
        false
    }

    /// Remove the platform outright (breakable landing)
    pub fn break_apart(&mut self) {
        self.rect.size.y = 0.0;
    }

    /// Collect the coin, returning the reward (0 if there is nothing to collect)
    pub fn collect_coin(&mut self) -> u64 {
        match self.coin.as_mut() {
            Some(coin) if !coin.collected => {
                coin.collected = true;
                COIN_REWARD
            }
            _ => 0,
        }
    }
}
