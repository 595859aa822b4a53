//! Session orchestrator
//!
//! `Game` owns the simulation state and drives it one frame at a time. It
//! never talks to a clock or a window directly: frames come from an injected
//! `FrameScheduler`, input from an `IntentSource`, pixels go to a `Surface`
//! and score changes are reported to a `GameObserver`.

use rand::Rng;

use crate::Settings;
use crate::host::{FrameHandle, FrameScheduler, ManualScheduler};
use crate::renderer::{Draw, Surface};
use crate::sim::{GameEvent, GamePhase, GameState, IntentSource, Rules, tick};

/// UI collaborator notified by the frame loop
pub trait GameObserver {
    /// Once per running frame
    fn on_update(&mut self, score: u64, lives: u8, has_double_jump: bool);
    /// Once, on the frame the last life is lost
    fn on_game_over(&mut self, score: u64);
    /// Once, on the frame the last coin is collected
    fn on_win(&mut self, score: u64);
}

/// Observer that reports through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl GameObserver for LogObserver {
    fn on_update(&mut self, score: u64, lives: u8, has_double_jump: bool) {
        log::trace!(
            "score={} lives={} double_jump={}",
            score,
            lives,
            has_double_jump
        );
    }

    fn on_game_over(&mut self, score: u64) {
        log::info!("GAME OVER - score {}", score);
    }

    fn on_win(&mut self, score: u64) {
        log::info!("YOU WIN - score {}", score);
    }
}

/// A play session bound to a scheduler and an observer
pub struct Game<S: FrameScheduler, O: GameObserver> {
    state: GameState,
    settings: Settings,
    scheduler: S,
    observer: O,
    /// The only frame this game will accept
    pending_frame: Option<FrameHandle>,
}

impl<S: FrameScheduler, O: GameObserver> Game<S, O> {
    /// Create an idle session; nothing runs until `start`
    pub fn new(settings: Settings, scheduler: S, observer: O) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        let state = GameState::new(seed, Rules::from(&settings));
        Self {
            state,
            settings,
            scheduler,
            observer,
            pending_frame: None,
        }
    }

    /// Begin a fresh run: reset counters, lay out a new level, start the loop
    pub fn start(&mut self) {
        self.cancel_pending();
        self.state.begin_run();
        log::info!(
            "Run started (seed {}, run {}, {} coins)",
            self.state.seed,
            self.state.rng_state.stream,
            self.state.total_coins
        );
        self.schedule();
    }

    /// Restart with a specific seed
    pub fn start_with_seed(&mut self, seed: u64) {
        self.state = GameState::new(seed, Rules::from(&self.settings));
        self.start();
    }

    /// Cancel the pending frame; the session stays as it is
    pub fn stop(&mut self) {
        if self.pending_frame.is_some() {
            log::info!("Frame loop stopped at frame {}", self.state.frame);
        }
        self.cancel_pending();
    }

    /// Running <-> Paused; ignored before start and after the run ended.
    ///
    /// Resuming restarts the frame loop if it was stopped.
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.state.phase = GamePhase::Paused,
            GamePhase::Paused => {
                self.state.phase = GamePhase::Running;
                if self.pending_frame.is_none() {
                    self.schedule();
                }
            }
            other => {
                log::debug!("Pause ignored in {:?}", other);
                return;
            }
        }
        log::info!("Game {:?}", self.state.phase);
    }

    /// Run one frame delivered by the host.
    ///
    /// Returns false (and does nothing) for a frame this game did not ask for
    /// or no longer wants.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        input: &mut impl IntentSource,
        surface: &mut dyn Surface,
    ) -> bool {
        if self.pending_frame != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return false;
        }
        self.pending_frame = None;

        match self.state.phase {
            GamePhase::Paused => {
                self.draw(surface);
                self.schedule();
            }
            GamePhase::Running => {
                let events = tick(&mut self.state, input);
                for event in &events {
                    match *event {
                        GameEvent::GameOver { score } => self.observer.on_game_over(score),
                        GameEvent::Won { score } => self.observer.on_win(score),
                        _ => {}
                    }
                }

                self.draw(surface);
                self.observer.on_update(
                    self.state.score,
                    self.state.lives,
                    self.state.player.has_double_jump,
                );

                if !self.state.phase.is_terminal() {
                    self.schedule();
                }
            }
            GamePhase::NotStarted | GamePhase::GameOver | GamePhase::Won => return false,
        }
        true
    }

    /// Platforms first, then the player
    fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        for platform in &self.state.platforms {
            platform.draw(surface);
        }
        self.state.player.draw(surface);
    }

    fn schedule(&mut self) {
        self.pending_frame = Some(self.scheduler.schedule_next_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_frame_pending(&self) -> bool {
        self.pending_frame.is_some()
    }
}

impl<O: GameObserver> Game<ManualScheduler, O> {
    /// Deliver the next queued frame, if any
    pub fn step(&mut self, input: &mut impl IntentSource, surface: &mut dyn Surface) -> bool {
        match self.scheduler.take_due() {
            Some(handle) => self.on_frame(handle, input, surface),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullSurface;
    use crate::renderer::shapes::tests::{RecordingSurface, Shape};
    use crate::sim::{Platform, PlatformKind, Rect, TickInput};

    #[derive(Debug, Clone, PartialEq)]
    enum Note {
        Update(u64, u8, bool),
        GameOver(u64),
        Win(u64),
    }

    #[derive(Debug, Default)]
    struct RecordingObserver {
        notes: Vec<Note>,
    }

    impl RecordingObserver {
        fn updates(&self) -> usize {
            self.notes.iter().filter(|n| matches!(n, Note::Update(..))).count()
        }

        fn terminal(&self) -> Vec<Note> {
            self.notes
                .iter()
                .filter(|n| !matches!(n, Note::Update(..)))
                .cloned()
                .collect()
        }
    }

    impl GameObserver for RecordingObserver {
        fn on_update(&mut self, score: u64, lives: u8, has_double_jump: bool) {
            self.notes.push(Note::Update(score, lives, has_double_jump));
        }

        fn on_game_over(&mut self, score: u64) {
            self.notes.push(Note::GameOver(score));
        }

        fn on_win(&mut self, score: u64) {
            self.notes.push(Note::Win(score));
        }
    }

    type TestGame = Game<ManualScheduler, RecordingObserver>;

    fn game() -> TestGame {
        let settings = Settings {
            seed: Some(2024),
            ..Settings::default()
        };
        Game::new(settings, ManualScheduler::new(), RecordingObserver::default())
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Replace the generated level with one coin platform under the spawn
    fn single_coin_level(game: &mut TestGame) {
        let state = game.state_mut();
        state.platforms.clear();
        let id = state.next_entity_id();
        state.platforms.push(Platform::new(
            id,
            Rect::new(80.0, 400.0, 100.0, 20.0),
            PlatformKind::Normal,
            true,
        ));
        state.total_coins = 1;
        state.coins_collected = 0;
    }

    #[test]
    fn test_nothing_runs_before_start() {
        let mut g = game();
        assert_eq!(g.phase(), GamePhase::NotStarted);
        assert!(!g.step(&mut idle(), &mut NullSurface));
        g.toggle_pause();
        assert_eq!(g.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_running_frames_notify_every_frame() {
        let mut g = game();
        g.start();
        assert_eq!(g.phase(), GamePhase::Running);
        assert_eq!(g.scheduler().pending(), 1);

        for _ in 0..10 {
            assert!(g.step(&mut idle(), &mut NullSurface));
        }
        assert_eq!(g.state().frame, 10);
        assert_eq!(g.observer().updates(), 10);
        assert!(matches!(g.observer().notes[0], Note::Update(_, 3, true)));
        assert_eq!(g.scheduler().pending(), 1);
    }

    #[test]
    fn test_win_reported_once_and_loop_stops() {
        let mut g = game();
        g.start();
        single_coin_level(&mut g);

        let mut frames = 0;
        while g.step(&mut idle(), &mut NullSurface) {
            frames += 1;
            assert!(frames < 100, "never won");
        }

        assert_eq!(g.phase(), GamePhase::Won);
        assert_eq!(g.score(), 100 + 1000);
        assert_eq!(g.observer().terminal(), vec![Note::Win(1100)]);
        assert_eq!(g.observer().updates(), frames);
        assert!(!g.is_frame_pending());
        assert_eq!(g.scheduler().pending(), 0);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut g = game();
        g.start();
        let state = g.state_mut();
        state.platforms.clear();
        state.total_coins = 0;
        state.lives = 1;

        let mut frames = 0;
        while g.step(&mut idle(), &mut NullSurface) {
            frames += 1;
            assert!(frames < 200, "never fell out");
        }

        assert_eq!(g.phase(), GamePhase::GameOver);
        assert_eq!(g.lives(), 0);
        assert_eq!(g.observer().terminal(), vec![Note::GameOver(0)]);
        // The final frame still reports its update
        assert_eq!(g.observer().notes.last(), Some(&Note::Update(0, 0, true)));
        assert_eq!(g.scheduler().pending(), 0);
    }

    #[test]
    fn test_pause_keeps_loop_but_freezes_state() {
        let mut g = game();
        g.start();
        g.step(&mut idle(), &mut NullSurface);
        let frame = g.state().frame;
        let pos = g.state().player.pos;

        g.toggle_pause();
        assert_eq!(g.phase(), GamePhase::Paused);

        let mut surface = RecordingSurface::default();
        for _ in 0..5 {
            assert!(g.step(&mut idle(), &mut surface));
        }
        assert_eq!(g.state().frame, frame);
        assert_eq!(g.state().player.pos, pos);
        assert_eq!(g.observer().updates(), 1);
        assert!(!surface.shapes.is_empty());
        assert_eq!(g.scheduler().pending(), 1);

        g.toggle_pause();
        assert_eq!(g.phase(), GamePhase::Running);
        g.step(&mut idle(), &mut NullSurface);
        assert_eq!(g.state().frame, frame + 1);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let mut g = game();
        g.start();
        g.stop();
        assert!(!g.is_frame_pending());
        assert_eq!(g.scheduler().pending(), 0);
        assert!(!g.step(&mut idle(), &mut NullSurface));
        assert_eq!(g.state().frame, 0);
    }

    #[test]
    fn test_resume_after_stop_restarts_loop() {
        let mut g = game();
        g.start();
        g.stop();
        g.toggle_pause();
        assert!(!g.is_frame_pending());

        g.toggle_pause();
        assert_eq!(g.phase(), GamePhase::Running);
        assert!(g.is_frame_pending());
        assert!(g.step(&mut idle(), &mut NullSurface));
        assert_eq!(g.state().frame, 1);
        assert_eq!(g.scheduler().pending(), 1);
    }

    #[test]
    fn test_resume_keeps_single_pending_frame() {
        let mut g = game();
        g.start();
        g.toggle_pause();
        g.toggle_pause();
        assert_eq!(g.scheduler().pending(), 1);
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let mut g = game();
        g.start();
        let Some(old) = g.scheduler.take_due() else {
            panic!("start did not schedule a frame");
        };

        // Restarting schedules a new frame; the old one is no longer wanted
        g.start();
        assert!(!g.on_frame(old, &mut idle(), &mut NullSurface));
        assert_eq!(g.state().frame, 0);
        assert_eq!(g.observer().updates(), 0);

        assert!(g.step(&mut idle(), &mut NullSurface));
        assert_eq!(g.state().frame, 1);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut g = game();
        g.start();
        for _ in 0..5 {
            g.step(&mut idle(), &mut NullSurface);
        }
        g.state_mut().score = 500;
        g.state_mut().lives = 1;

        g.start();
        assert_eq!(g.score(), 0);
        assert_eq!(g.lives(), 3);
        assert_eq!(g.state().frame, 0);
        assert_eq!(g.scheduler().pending(), 1);
    }

    #[test]
    fn test_platforms_drawn_before_player() {
        let mut g = game();
        g.start();
        let mut surface = RecordingSurface::default();
        g.step(&mut idle(), &mut surface);

        assert_eq!(surface.shapes.first(), Some(&Shape::Clear));

        let rect_index = |target: Rect| {
            surface
                .shapes
                .iter()
                .position(|s| matches!(s, Shape::Rect(r, _) if *r == target))
        };
        let last_platform = g.state().platforms.last().map(|p| p.rect);
        let platform_at = last_platform.and_then(rect_index);
        let player_at = rect_index(g.state().player.bounds());
        assert!(platform_at.is_some() && player_at.is_some());
        assert!(platform_at < player_at);
    }

    #[test]
    fn test_same_seed_same_level() {
        let mut a = game();
        let mut b = game();
        a.start_with_seed(77);
        b.start_with_seed(77);
        let rects = |g: &TestGame| -> Vec<Rect> { g.state().platforms.iter().map(|p| p.rect).collect() };
        assert_eq!(rects(&a), rects(&b));
        assert_eq!(a.state().seed, 77);
    }
}
