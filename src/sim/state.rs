//! Game state and core session types
//!
//! Everything the frame loop mutates lives here and is owned by one
//! `GameState`; player and platforms never reference each other.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::generate_level;
use super::platform::Platform;
use super::player::Player;
use crate::consts::*;
use crate::{PlayField, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created, waiting for `start`
    NotStarted,
    /// Active gameplay
    Running,
    /// Frame loop alive, simulation frozen
    Paused,
    /// Out of lives
    GameOver,
    /// Every coin collected
    Won,
}

impl GamePhase {
    /// Game over and win end the run; the frame loop stops there
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Things that happened during a tick, for the orchestrator and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { platform_id: u32, reward: u64 },
    PlatformBroken { platform_id: u32 },
    PlatformDisappearing { platform_id: u32 },
    LifeLost { lives_left: u8 },
    GameOver { score: u64 },
    Won { score: u64 },
}

/// A deferred platform trigger, counted down in frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEffect {
    pub platform_id: u32,
    pub frames_left: u32,
}

/// RNG state wrapper for serialization
///
/// Each run draws from its own stream so restarts with the same seed differ,
/// while the whole sequence of runs stays reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// RNG for the next run, advancing the stream
    pub fn next_run(&mut self) -> Pcg32 {
        let rng = self.to_rng();
        self.stream += 1;
        rng
    }
}

/// Tunables copied out of `Settings` at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rules {
    pub field: PlayField,
    pub starting_lives: u8,
    /// Randomly placed platforms between the start and final platform
    pub mid_platforms: usize,
    /// Frames between a bounce and the bouncy platform starting to vanish
    pub bounce_delay_frames: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for Rules {
    fn from(settings: &Settings) -> Self {
        Self {
            field: settings.field,
            starting_lives: settings.starting_lives,
            mid_platforms: settings.mid_platforms,
            bounce_delay_frames: settings.bounce_delay_frames(),
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub rules: Rules,
    pub phase: GamePhase,
    /// Simulated frames in the current run
    pub frame: u64,
    pub lives: u8,
    pub score: u64,
    pub coins_collected: u32,
    pub total_coins: u32,
    pub player: Player,
    /// Live platforms, in creation (id) order
    pub platforms: Vec<Platform>,
    /// Deferred platform triggers
    pub pending: Vec<PendingEffect>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session; call `begin_run` to lay out a level
    pub fn new(seed: u64, rules: Rules) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            lives: rules.starting_lives,
            rules,
            phase: GamePhase::NotStarted,
            frame: 0,
            score: 0,
            coins_collected: 0,
            total_coins: 0,
            player: Player::new(SPAWN_POINT),
            platforms: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset counters, respawn the player, regenerate the level and run
    pub fn begin_run(&mut self) {
        self.lives = self.rules.starting_lives;
        self.score = 0;
        self.frame = 0;
        self.pending.clear();
        self.player.reset(SPAWN_POINT);

        let mut rng = self.rng_state.next_run();
        generate_level(self, &mut rng);

        self.phase = GamePhase::Running;
    }

    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn platform_mut(&mut self, id: u32) -> Option<&mut Platform> {
        self.platforms.iter_mut().find(|p| p.id == id)
    }

    /// Schedule a platform's disappear trigger; one pending trigger per platform
    pub fn queue_disappear(&mut self, platform_id: u32, frames: u32) {
        if self.pending.iter().any(|e| e.platform_id == platform_id) {
            return;
        }
        self.pending.push(PendingEffect {
            platform_id,
            frames_left: frames,
        });
    }

    /// All coins collected (and there was at least one)
    pub fn all_coins_collected(&self) -> bool {
        self.total_coins > 0 && self.coins_collected >= self.total_coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1, Rules::default());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(state.platforms.is_empty());
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.player.pos, SPAWN_POINT);
    }

    #[test]
    fn test_begin_run_resets_counters() {
        let mut state = GameState::new(5, Rules::default());
        state.begin_run();
        state.score = 700;
        state.lives = 1;
        state.coins_collected = 2;
        state.queue_disappear(3, 3);

        state.begin_run();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.coins_collected, 0);
        assert!(state.pending.is_empty());
        assert!(!state.platforms.is_empty());
    }

    #[test]
    fn test_queue_disappear_dedupes() {
        let mut state = GameState::new(5, Rules::default());
        state.queue_disappear(9, 3);
        state.queue_disappear(9, 3);
        state.queue_disappear(10, 3);
        assert_eq!(state.pending.len(), 2);
    }

    #[test]
    fn test_rng_streams_are_reproducible() {
        use rand::Rng;

        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        let first_a: u32 = a.next_run().random();
        let first_b: u32 = b.next_run().random();
        assert_eq!(first_a, first_b);

        let second_a: u32 = a.next_run().random();
        assert_ne!(first_a, second_a);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(0, Rules::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(GamePhase::GameOver.is_terminal());
        assert!(GamePhase::Won.is_terminal());
        assert!(!GamePhase::Paused.is_terminal());
        assert!(!GamePhase::Running.is_terminal());
    }
}
