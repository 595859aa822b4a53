//! Entity drawing: platforms, coins and the player

use glam::Vec2;

use super::{Draw, Rgba, Surface, rgb, with_alpha};
use crate::consts::*;
use crate::sim::{Platform, PlatformKind, Player, Rect};

const NORMAL_COLOR: Rgba = rgb(0x4CAF50);
const MOVING_COLOR: Rgba = rgb(0x9C27B0);
const BREAKABLE_COLOR: Rgba = rgb(0x795548);
const BOUNCY_COLOR: Rgba = rgb(0x00BCD4);
const STRIPE_COLOR: Rgba = [1.0, 1.0, 1.0, 0.2];
const COIN_OUTER: Rgba = rgb(0xFFD700);
const COIN_INNER: Rgba = rgb(0xFFC400);

const PLAYER_COLOR: Rgba = rgb(0xFF5722);
const EYE_COLOR: Rgba = rgb(0xFFFFFF);
const LEG_COLOR: Rgba = rgb(0x333333);
const MOUTH_COLOR: Rgba = rgb(0x000000);
const AIRBORNE_GLOW: Rgba = [0.0, 1.0, 1.0, 0.3];

/// Base color for a platform kind
pub fn platform_color(kind: PlatformKind) -> Rgba {
    match kind {
        PlatformKind::Normal => NORMAL_COLOR,
        PlatformKind::Moving => MOVING_COLOR,
        PlatformKind::Breakable => BREAKABLE_COLOR,
        PlatformKind::Bouncy => BOUNCY_COLOR,
    }
}

/// Pulsing opacity of a shrinking platform
fn decay_opacity(timer: u32) -> f32 {
    0.5 + 0.5 * (timer as f32 * 0.3).sin()
}

impl Draw for Platform {
    fn draw(&self, surface: &mut dyn Surface) {
        if self.is_removed() {
            return;
        }

        let color = if self.decay.is_shrinking() {
            with_alpha(BOUNCY_COLOR, decay_opacity(self.decay.timer))
        } else {
            platform_color(self.kind())
        };
        surface.fill_rect(self.rect, color);

        if !self.is_active() {
            return;
        }

        // Stripe texture
        let mut offset = 0.0;
        while offset < self.rect.size.x {
            surface.fill_rect(
                Rect::new(
                    self.rect.left() + offset,
                    self.rect.top() + 2.0,
                    5.0,
                    self.rect.size.y - 4.0,
                ),
                STRIPE_COLOR,
            );
            offset += 10.0;
        }

        if let (Some(center), Some(coin)) = (self.coin_center(), self.coin) {
            if !coin.collected {
                surface.fill_ellipse(center, Vec2::new(COIN_RADIUS, 8.0), coin.rotation, COIN_OUTER);
                surface.fill_ellipse(center, Vec2::new(10.0, 5.0), coin.rotation, COIN_INNER);
            }
        }
    }
}

impl Draw for Player {
    fn draw(&self, surface: &mut dyn Surface) {
        let body = self.bounds();

        // Shadow grows with vertical speed while airborne
        let shadow_height = if self.grounded {
            10.0
        } else {
            5.0 + self.vel.y.abs() * 0.5
        };
        surface.fill_rect(
            Rect::new(body.left() + 5.0, body.bottom() - 5.0, body.size.x, shadow_height),
            [0.0, 0.0, 0.0, 0.2],
        );

        surface.fill_rect(body, PLAYER_COLOR);

        let eye_x = if self.facing_right {
            body.left() + 25.0
        } else {
            body.left() + 15.0
        };
        surface.fill_rect(Rect::new(eye_x, body.top() + 15.0, 8.0, 8.0), EYE_COLOR);

        if self.just_landed {
            surface.fill_ellipse(
                Vec2::new(eye_x, body.top() + 35.0),
                Vec2::new(10.0, 4.0),
                0.0,
                MOUTH_COLOR,
            );
        } else {
            surface.fill_rect(Rect::new(eye_x - 5.0, body.top() + 30.0, 15.0, 3.0), MOUTH_COLOR);
        }

        // Legs swing while walking, bend on landing
        let (left_leg, right_leg) = if self.vel.x != 0.0 && self.grounded {
            let swing = self.walk_phase.sin() * 5.0;
            (20.0 - swing, 20.0 + swing)
        } else if self.just_landed {
            (25.0, 25.0)
        } else {
            (20.0, 20.0)
        };
        surface.fill_rect(
            Rect::new(body.left() + 5.0, body.bottom() - left_leg, 10.0, left_leg),
            LEG_COLOR,
        );
        surface.fill_rect(
            Rect::new(body.left() + 25.0, body.bottom() - right_leg, 10.0, right_leg),
            LEG_COLOR,
        );

        // Spent double jump while airborne
        if !self.has_double_jump && !self.grounded {
            surface.fill_rect(
                Rect::new(body.left() - 2.0, body.top() - 2.0, body.size.x + 4.0, body.size.y + 4.0),
                AIRBORNE_GLOW,
            );
        }
    }
}
