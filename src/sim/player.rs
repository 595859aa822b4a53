//! Player kinematics
//!
//! One input-driven update per frame: set horizontal speed, handle jump and
//! double jump, apply gravity, integrate, clamp to the play field. Landing is
//! not decided here; collision resolution sets `grounded` after the update.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tick::IntentSource;
use crate::PlayField;
use crate::consts::*;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing_right: bool,
    /// Resting on a platform; vertical velocity is held at zero while set
    pub grounded: bool,
    /// Grounded state as of the end of the previous update
    pub was_grounded: bool,
    pub has_double_jump: bool,
    /// Frames left in which a jump still counts as a ground jump
    pub landing_grace: u32,
    /// True for exactly one frame after touching down (presentation only)
    pub just_landed: bool,
    /// Walk cycle phase (presentation only)
    pub walk_phase: f32,
    /// Carried for the UI; gameplay never reduces it
    pub health: u32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            facing_right: true,
            grounded: false,
            was_grounded: false,
            has_double_jump: true,
            landing_grace: 0,
            just_landed: false,
            walk_phase: 0.0,
            health: PLAYER_MAX_HEALTH,
        }
    }

    #[inline]
    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Self::size(),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Self::size() * 0.5
    }

    /// Advance one frame from the current intents
    pub fn update(&mut self, input: &mut impl IntentSource, field: &PlayField) {
        self.just_landed = false;
        self.landing_grace = self.landing_grace.saturating_sub(1);

        // Horizontal: direct velocity, no acceleration or friction
        self.vel.x = 0.0;
        if input.is_left_pressed() {
            self.vel.x = -RUN_SPEED;
            self.facing_right = false;
        }
        if input.is_right_pressed() {
            self.vel.x = RUN_SPEED;
            self.facing_right = true;
        }

        // Ground jump (or within the landing grace window)
        if input.is_jump_pressed() && (self.grounded || self.landing_grace > 0) {
            self.vel.y = JUMP_POWER;
            self.grounded = false;
            self.has_double_jump = true;
            self.landing_grace = 0;
        }

        // Double jump: once per airborne stretch, after the ascent has slowed
        if input.is_double_jump_pressed()
            && self.has_double_jump
            && !self.grounded
            && self.vel.y > JUMP_POWER * DOUBLE_JUMP_WINDOW
        {
            self.vel.y = JUMP_POWER * DOUBLE_JUMP_FACTOR;
            self.has_double_jump = false;
            input.reset_double_jump();
        }

        if self.grounded {
            self.vel.y = 0.0;
        } else {
            self.vel.y = (self.vel.y + GRAVITY).min(MAX_FALL_SPEED);
        }

        self.pos += self.vel;

        if self.vel.x != 0.0 && self.grounded {
            self.walk_phase += WALK_ANIMATION_SPEED;
        }

        self.pos.x = field.clamp_x(self.pos.x, PLAYER_WIDTH);

        if self.grounded {
            self.has_double_jump = true;
        }

        // Collision grounds the player between updates, so the edge is
        // measured against the previous update's outcome
        self.just_landed = self.grounded && !self.was_grounded;
        self.was_grounded = self.grounded;
    }

    /// Put the player back at `spawn` with fresh movement state
    pub fn reset(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.grounded = false;
        self.was_grounded = false;
        self.just_landed = false;
        self.has_double_jump = true;
        self.landing_grace = 0;
        self.health = PLAYER_MAX_HEALTH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::TickInput;
    use proptest::prelude::*;

    fn grounded_player() -> Player {
        let mut player = Player::new(SPAWN_POINT);
        player.grounded = true;
        player
    }

    #[test]
    fn test_horizontal_intents() {
        let field = PlayField::default();
        let mut player = grounded_player();

        let mut input = TickInput { left: true, ..Default::default() };
        player.update(&mut input, &field);
        assert_eq!(player.vel.x, -RUN_SPEED);
        assert_eq!(player.pos.x, SPAWN_POINT.x - RUN_SPEED);
        assert!(!player.facing_right);

        let mut input = TickInput::default();
        player.update(&mut input, &field);
        assert_eq!(player.vel.x, 0.0);
        assert!(!player.facing_right);

        // Right wins when both are held
        let mut input = TickInput { left: true, right: true, ..Default::default() };
        player.update(&mut input, &field);
        assert_eq!(player.vel.x, RUN_SPEED);
        assert!(player.facing_right);
    }

    #[test]
    fn test_grounded_holds_vertical_velocity_at_zero() {
        let field = PlayField::default();
        let mut player = grounded_player();
        player.vel.y = 7.0;
        player.update(&mut TickInput::default(), &field);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.pos.y, SPAWN_POINT.y);
    }

    #[test]
    fn test_gravity_clamps_to_max_fall_speed() {
        let field = PlayField::default();
        let mut player = Player::new(SPAWN_POINT);
        player.update(&mut TickInput::default(), &field);
        assert_eq!(player.vel.y, GRAVITY);
        assert_eq!(player.pos.y, SPAWN_POINT.y + GRAVITY);

        for _ in 0..100 {
            player.update(&mut TickInput::default(), &field);
        }
        assert_eq!(player.vel.y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_ground_jump() {
        let field = PlayField::default();
        let mut player = grounded_player();
        player.has_double_jump = false;
        player.landing_grace = 3;

        let mut input = TickInput { jump: true, ..Default::default() };
        player.update(&mut input, &field);

        assert!(!player.grounded);
        assert!(player.has_double_jump);
        assert_eq!(player.landing_grace, 0);
        // Impulse then one step of gravity
        assert_eq!(player.vel.y, JUMP_POWER + GRAVITY);
        assert_eq!(player.pos.y, SPAWN_POINT.y + JUMP_POWER + GRAVITY);
    }

    #[test]
    fn test_grace_window_allows_late_jump() {
        let field = PlayField::default();
        let mut player = Player::new(SPAWN_POINT);
        player.landing_grace = 2;
        player.vel.y = 1.0;

        let mut input = TickInput { jump: true, ..Default::default() };
        player.update(&mut input, &field);
        assert_eq!(player.vel.y, JUMP_POWER + GRAVITY);
    }

    #[test]
    fn test_expired_grace_blocks_air_jump() {
        let field = PlayField::default();
        let mut player = Player::new(SPAWN_POINT);
        // Decremented to zero before the jump check
        player.landing_grace = 1;
        player.vel.y = 1.0;

        let mut input = TickInput { jump: true, ..Default::default() };
        player.update(&mut input, &field);
        assert_eq!(player.vel.y, 1.0 + GRAVITY);
    }

    #[test]
    fn test_double_jump_waits_for_ascent_to_slow() {
        let field = PlayField::default();
        let mut player = Player::new(SPAWN_POINT);
        player.vel.y = JUMP_POWER;

        let mut input = TickInput { double_jump: true, ..Default::default() };
        player.update(&mut input, &field);
        assert!(player.has_double_jump, "too early in the ascent");
        assert!(input.double_jump, "intent not consumed");

        player.vel.y = -5.0;
        player.update(&mut input, &field);
        assert!(!player.has_double_jump);
        assert!(!input.double_jump, "edge trigger consumed");
        assert_eq!(player.vel.y, JUMP_POWER * DOUBLE_JUMP_FACTOR + GRAVITY);
    }

    #[test]
    fn test_grounding_restores_double_jump() {
        let field = PlayField::default();
        let mut player = Player::new(SPAWN_POINT);
        player.has_double_jump = false;
        player.update(&mut TickInput::default(), &field);
        assert!(!player.has_double_jump, "still airborne");

        // Collision grounds the player; no jump input involved
        player.grounded = true;
        player.update(&mut TickInput::default(), &field);
        assert!(player.has_double_jump);
    }

    #[test]
    fn test_x_clamped_to_field() {
        let field = PlayField::default();
        let mut player = grounded_player();
        player.pos.x = 2.0;
        player.update(&mut TickInput { left: true, ..Default::default() }, &field);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = field.width - PLAYER_WIDTH - 1.0;
        player.update(&mut TickInput { right: true, ..Default::default() }, &field);
        assert_eq!(player.pos.x, field.width - PLAYER_WIDTH);
    }

    #[test]
    fn test_just_landed_is_a_rising_edge() {
        let field = PlayField::default();
        let mut player = Player::new(SPAWN_POINT);
        player.update(&mut TickInput::default(), &field);
        assert!(!player.just_landed);

        // Collision resolution grounds the player between updates
        player.grounded = true;
        player.update(&mut TickInput::default(), &field);
        assert!(player.just_landed);

        player.update(&mut TickInput::default(), &field);
        assert!(!player.just_landed, "only for one frame");

        // Jumping away and landing again fires it again
        player.update(&mut TickInput { jump: true, ..Default::default() }, &field);
        assert!(!player.just_landed);
        player.grounded = true;
        player.update(&mut TickInput::default(), &field);
        assert!(player.just_landed);
    }

    #[test]
    fn test_walk_phase_only_advances_on_the_ground() {
        let field = PlayField::default();
        let mut player = grounded_player();
        player.update(&mut TickInput { right: true, ..Default::default() }, &field);
        assert!(player.walk_phase > 0.0);

        let mut airborne = Player::new(SPAWN_POINT);
        airborne.update(&mut TickInput { right: true, ..Default::default() }, &field);
        assert_eq!(airborne.walk_phase, 0.0);
    }

    #[test]
    fn test_reset() {
        let mut player = Player::new(SPAWN_POINT);
        player.pos = Vec2::new(500.0, 900.0);
        player.vel = Vec2::new(5.0, 15.0);
        player.has_double_jump = false;
        player.landing_grace = 4;
        player.health = 10;
        player.just_landed = true;

        player.reset(SPAWN_POINT);
        assert_eq!(player.pos, SPAWN_POINT);
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(player.has_double_jump);
        assert!(!player.grounded);
        assert!(!player.just_landed);
        assert_eq!(player.landing_grace, 0);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
    }

    proptest! {
        #[test]
        fn double_jump_is_single_use_while_airborne(
            start_vy in -5.9f32..15.0,
            presses in proptest::collection::vec(any::<bool>(), 1..60),
        ) {
            let field = PlayField::default();
            let mut player = Player::new(Vec2::new(300.0, 0.0));
            player.vel.y = start_vy;

            let mut input = TickInput { double_jump: true, ..Default::default() };
            player.update(&mut input, &field);
            prop_assert!(!player.has_double_jump);

            // Never grounded again, so it stays spent whatever is pressed
            for press in presses {
                let mut input = TickInput { double_jump: press, jump: press, ..Default::default() };
                player.update(&mut input, &field);
                prop_assert!(!player.has_double_jump);
            }
        }
    }
}
