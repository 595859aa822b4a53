//! Level layout generation
//!
//! One fixed start platform, a column of randomly placed platforms climbing
//! upward, and a final platform that always carries a coin.

use rand::Rng;
use rand_pcg::Pcg32;

use super::platform::{Platform, PlatformKind};
use super::rect::Rect;
use super::state::GameState;
use crate::consts::COIN_CHANCE;

/// Height of every generated platform
pub const PLATFORM_HEIGHT: f32 = 20.0;

/// Start platform, under the spawn point
pub const START_PLATFORM: Rect = Rect::new(50.0, 400.0, 200.0, PLATFORM_HEIGHT);
/// Final platform, far up and to the right
pub const FINAL_PLATFORM: Rect = Rect::new(600.0, 100.0, 150.0, PLATFORM_HEIGHT);

/// Mid platforms: x in [MID_X_MIN, MID_X_MIN + MID_X_SPAN)
pub const MID_X_MIN: f32 = 100.0;
pub const MID_X_SPAN: f32 = 600.0;
/// Mid platforms: width in [MID_WIDTH_MIN, MID_WIDTH_MIN + MID_WIDTH_SPAN)
pub const MID_WIDTH_MIN: f32 = 80.0;
pub const MID_WIDTH_SPAN: f32 = 120.0;
/// First mid platform's y; each next one is LAYER_SPACING higher
pub const MID_FIRST_Y: f32 = 350.0;
pub const LAYER_SPACING: f32 = 70.0;

/// Kinds drawn for mid platforms. Breakable is never generated.
const MID_KINDS: [PlatformKind; 3] = [PlatformKind::Normal, PlatformKind::Moving, PlatformKind::Bouncy];

/// Replace the state's platforms with a fresh layout and recount coins
pub fn generate_level(state: &mut GameState, rng: &mut Pcg32) {
    state.platforms.clear();
    state.coins_collected = 0;
    state.total_coins = 0;

    let id = state.next_entity_id();
    state
        .platforms
        .push(Platform::new(id, START_PLATFORM, PlatformKind::Normal, false));

    for i in 0..state.rules.mid_platforms {
        let x = MID_X_MIN + rng.random::<f32>() * MID_X_SPAN;
        let y = MID_FIRST_Y - i as f32 * LAYER_SPACING;
        let width = MID_WIDTH_MIN + rng.random::<f32>() * MID_WIDTH_SPAN;
        let kind = MID_KINDS[rng.random_range(0..MID_KINDS.len())];
        let with_coin = rng.random_bool(COIN_CHANCE);

        let id = state.next_entity_id();
        state.platforms.push(Platform::new(
            id,
            Rect::new(x, y, width, PLATFORM_HEIGHT),
            kind,
            with_coin,
        ));
    }

    let id = state.next_entity_id();
    state
        .platforms
        .push(Platform::new(id, FINAL_PLATFORM, PlatformKind::Normal, true));

    state.total_coins = state.platforms.iter().filter(|p| p.has_coin()).count() as u32;

    log::info!(
        "Level generated: {} platforms, {} coins",
        state.platforms.len(),
        state.total_coins
    );
}
