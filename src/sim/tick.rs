//! Per-frame simulation tick
//!
//! Core game loop body that advances a running session by one frame.

use serde::{Deserialize, Serialize};

use super::collision::{
    Contact, apply_contact, check_player_coin, check_player_out_of_bounds, detect_contact,
};
use super::platform::LandingEffect;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Semantic input intents consumed by the simulation
pub trait IntentSource {
    fn is_left_pressed(&self) -> bool;
    fn is_right_pressed(&self) -> bool;
    fn is_jump_pressed(&self) -> bool;
    fn is_double_jump_pressed(&self) -> bool;
    /// Clear the double-jump edge trigger once it has been used
    fn reset_double_jump(&mut self);
}

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub double_jump: bool,
}

impl IntentSource for TickInput {
    fn is_left_pressed(&self) -> bool {
        self.left
    }

    fn is_right_pressed(&self) -> bool {
        self.right
    }

    fn is_jump_pressed(&self) -> bool {
        self.jump
    }

    fn is_double_jump_pressed(&self) -> bool {
        self.double_jump
    }

    fn reset_double_jump(&mut self) {
        self.double_jump = false;
    }
}

/// Advance a running session by one frame, returning what happened
///
/// Does nothing outside `GamePhase::Running`.
pub fn tick(state: &mut GameState, input: &mut impl IntentSource) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    state.frame += 1;

    state.player.update(input, &state.rules.field);

    for platform in &mut state.platforms {
        platform.update();
    }

    drain_pending_effects(state, &mut events);

    let landed_on = resolve_platform_contacts(state, &mut events);
    collect_coins(state, &landed_on, &mut events);

    if check_player_out_of_bounds(&state.player, &state.rules.field) {
        lose_life(state, &mut events);
    }

    // Evict platforms that finished shrinking or broke
    state.platforms.retain(|p| !p.is_removed());

    if state.phase == GamePhase::Running && state.all_coins_collected() {
        state.score += WIN_BONUS;
        state.phase = GamePhase::Won;
        log::info!("All {} coins collected, final score {}", state.total_coins, state.score);
        events.push(GameEvent::Won { score: state.score });
    }

    events
}

/// Count down deferred triggers and fire the ones that are due
fn drain_pending_effects(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut due = Vec::new();
    state.pending.retain_mut(|effect| {
        if effect.frames_left <= 1 {
            due.push(effect.platform_id);
            false
        } else {
            effect.frames_left -= 1;
            true
        }
    });

    for platform_id in due {
        // The platform may already be gone; a stale trigger is a no-op
        if let Some(platform) = state.platform_mut(platform_id) {
            if platform.trigger_disappear() {
                log::debug!("Platform {} starting to disappear", platform_id);
                events.push(GameEvent::PlatformDisappearing { platform_id });
            }
        }
    }
}

/// Resolve every player/platform contact in platform order.
///
/// The first landing claims the player; later landings in the same frame are
/// not applied and only make their platform eligible for coin pickup. Returns
/// the ids of all platforms that reported a landing.
fn resolve_platform_contacts(state: &mut GameState, events: &mut Vec<GameEvent>) -> Vec<u32> {
    let mut landed_on = Vec::new();
    let mut grounded = false;
    let mut bounced = Vec::new();

    for platform in &mut state.platforms {
        if platform.is_removed() {
            continue;
        }

        let contact = detect_contact(&state.player, platform);
        match contact {
            Contact::Landed { effect } => {
                if landed_on.is_empty() {
                    apply_contact(&mut state.player, platform, contact);
                    grounded = contact.keeps_grounded();
                    match effect {
                        LandingEffect::Launch { .. } => bounced.push(platform.id),
                        LandingEffect::Break => {
                            log::debug!("Platform {} broke", platform.id);
                            events.push(GameEvent::PlatformBroken {
                                platform_id: platform.id,
                            });
                        }
                        LandingEffect::Rest => {}
                    }
                }
                landed_on.push(platform.id);
            }
            Contact::Bumped => apply_contact(&mut state.player, platform, contact),
            Contact::EdgeFall => {
                log::trace!("Walked off platform {}", platform.id);
                apply_contact(&mut state.player, platform, contact);
            }
            Contact::None => {}
        }
    }

    state.player.grounded = grounded;

    let delay = state.rules.bounce_delay_frames;
    for platform_id in bounced {
        state.queue_disappear(platform_id, delay);
    }

    landed_on
}

/// Pick up coins: on the landed platforms if there was a landing, else anywhere
fn collect_coins(state: &mut GameState, landed_on: &[u32], events: &mut Vec<GameEvent>) {
    for platform in &mut state.platforms {
        if !landed_on.is_empty() && !landed_on.contains(&platform.id) {
            continue;
        }
        if !check_player_coin(&state.player, platform) {
            continue;
        }
        let reward = platform.collect_coin();
        state.score += reward;
        state.coins_collected += 1;
        log::debug!(
            "Coin collected on platform {} ({}/{})",
            platform.id,
            state.coins_collected,
            state.total_coins
        );
        events.push(GameEvent::CoinCollected {
            platform_id: platform.id,
            reward,
        });
    }
}

fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over, final score {}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
    } else {
        log::debug!("Fell out of the level, {} lives left", state.lives);
        state.player.reset(SPAWN_POINT);
        events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
    }
}
