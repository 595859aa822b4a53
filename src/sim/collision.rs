//! Player-vs-platform contact detection and resolution
//!
//! Detection is pure: `detect_contact` looks at a player and a platform and
//! says what kind of contact they are in. `apply_contact` performs the
//! resolution step (snap, velocity, grounded). The frame loop keeps the two
//! apart so it can decide which contacts are allowed to act.

use serde::{Deserialize, Serialize};

use super::platform::{LandingEffect, Platform};
use super::player::Player;
use crate::PlayField;
use crate::consts::*;

/// Outcome of a player/platform contact check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Contact {
    /// Nothing to resolve
    None,
    /// Feet came down onto the top surface
    Landed { effect: LandingEffect },
    /// Head hit the underside during an ascent
    Bumped,
    /// Walked off the edge of a platform while resting
    EdgeFall,
}

impl Contact {
    /// Landing or bump: the contact moves the player
    pub fn is_resolved(&self) -> bool {
        matches!(self, Contact::Landed { .. } | Contact::Bumped)
    }

    /// A landing that leaves the player standing
    pub fn keeps_grounded(&self) -> bool {
        matches!(
            self,
            Contact::Landed {
                effect: LandingEffect::Rest
            }
        )
    }
}

/// Classify the contact between `player` and `platform` without mutating either
pub fn detect_contact(player: &Player, platform: &Platform) -> Contact {
    if platform.is_removed() || !platform.is_active() {
        return Contact::None;
    }

    let body = player.bounds();
    let surface = &platform.rect;

    let is_above = body.bottom() <= surface.top() + LANDING_TOLERANCE;
    let is_below = body.top() >= surface.bottom();
    let is_aligned = body.overlaps_x(surface);

    if is_above && is_aligned {
        let gap = surface.top() - body.bottom();
        if gap >= -LANDING_TOLERANCE && gap <= player.vel.y + LANDING_REACH && player.vel.y >= 0.0 {
            return Contact::Landed {
                effect: platform.landing_effect(),
            };
        }
    }

    if is_below && is_aligned && player.vel.y < 0.0 && body.top() - surface.bottom() < BUMP_REACH {
        return Contact::Bumped;
    }

    if player.grounded
        && !is_aligned
        && (body.is_left_of(surface) || body.is_right_of(surface))
        && player.vel.y == 0.0
    {
        return Contact::EdgeFall;
    }

    Contact::None
}

/// Apply the resolution for a previously detected contact
///
/// A bouncy landing only launches the player here; scheduling the
/// platform's disappearance is left to the caller.
pub fn apply_contact(player: &mut Player, platform: &mut Platform, contact: Contact) {
    match contact {
        Contact::None => {}
        Contact::Landed { effect } => {
            player.pos.y = platform.rect.top() - PLAYER_HEIGHT;
            player.vel.y = 0.0;
            player.grounded = true;
            player.landing_grace = LANDING_GRACE_FRAMES;

            match effect {
                LandingEffect::Rest => {}
                LandingEffect::Launch { velocity_y } => {
                    player.vel.y = velocity_y;
                    player.grounded = false;
                }
                LandingEffect::Break => {
                    platform.break_apart();
                    player.grounded = false;
                }
            }
        }
        Contact::Bumped => {
            player.pos.y = platform.rect.bottom();
            player.vel.y = 0.0;
        }
        Contact::EdgeFall => {
            player.grounded = false;
        }
    }
}

/// Detect and resolve in one call; true if a landing or bump was resolved
pub fn check_player_platform(player: &mut Player, platform: &mut Platform) -> bool {
    let contact = detect_contact(player, platform);
    apply_contact(player, platform, contact);
    contact.is_resolved()
}

/// Player is close enough to pick up the platform's coin
pub fn check_player_coin(player: &Player, platform: &Platform) -> bool {
    if !platform.has_uncollected_coin() || !platform.is_active() {
        return false;
    }
    platform.coin_center().is_some_and(|coin| {
        player.center().distance(coin) < PLAYER_WIDTH / 2.0 + COIN_RADIUS
    })
}

/// Player has fallen through the bottom of the play field
pub fn check_player_out_of_bounds(player: &Player, field: &PlayField) -> bool {
    player.pos.y > field.height + OUT_OF_BOUNDS_SLACK
}
