//! Coin Hopper headless runner
//!
//! Plays one session with a scripted keyboard pattern and logs what happens.
//! Set `RUST_LOG=debug` to follow coins, lives and platform triggers.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::env;
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use coin_hopper::host::{InputHandler, Key, ManualScheduler};
    use coin_hopper::renderer::NullSurface;
    use coin_hopper::{Game, LogObserver, Settings};

    const DEFAULT_FRAMES: u64 = 3600;

    #[derive(Debug, Default, PartialEq)]
    pub(crate) struct Cli {
        pub(crate) settings: Option<PathBuf>,
        pub(crate) seed: Option<u64>,
        pub(crate) frames: Option<u64>,
    }

    impl Cli {
        fn parse() -> Result<Self> {
            Self::parse_from(env::args().skip(1))
        }

        pub(crate) fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Self> {
            let mut cli = Cli::default();
            let mut args = args.into_iter();

            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--settings" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow!("--settings requires a file path"))?;
                        cli.settings = Some(PathBuf::from(value));
                    }
                    "--seed" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow!("--seed requires a number"))?;
                        let seed = value
                            .parse::<u64>()
                            .with_context(|| format!("invalid --seed value: {value}"))?;
                        cli.seed = Some(seed);
                    }
                    "--frames" => {
                        let value = args
                            .next()
                            .ok_or_else(|| anyhow!("--frames requires a number"))?;
                        let frames = value
                            .parse::<u64>()
                            .with_context(|| format!("invalid --frames value: {value}"))?;
                        cli.frames = Some(frames);
                    }
                    "-h" | "--help" => {
                        println!(
                            "Usage: coin-hopper [--settings <file.json>] [--seed <n>] [--frames <n>]\nDefault --frames: {DEFAULT_FRAMES}"
                        );
                        std::process::exit(0);
                    }
                    other => return Err(anyhow!("unknown argument: {other}. Use --help for usage.")),
                }
            }
            Ok(cli)
        }
    }

    /// Key edges for a frame of the demo pattern.
    ///
    /// Runs right, then left, in 120-frame sweeps; jumps every 40 frames and
    /// double-taps Space shortly after each jump to trigger the double jump.
    fn scripted_keys(frame: u64) -> Vec<(Key, bool)> {
        let mut edges = Vec::new();
        match frame % 120 {
            0 => edges.push((Key::ArrowRight, true)),
            60 => {
                edges.push((Key::ArrowRight, false));
                edges.push((Key::ArrowLeft, true));
            }
            119 => edges.push((Key::ArrowLeft, false)),
            _ => {}
        }
        match frame % 40 {
            1 | 14 => edges.push((Key::Space, true)),
            4 | 16 => edges.push((Key::Space, false)),
            _ => {}
        }
        edges
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse()?;

        let mut settings = match &cli.settings {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        if cli.seed.is_some() {
            settings.seed = cli.seed;
        }
        let frames = cli.frames.unwrap_or(DEFAULT_FRAMES);
        let fps = u64::from(settings.frames_per_second.max(1));

        let mut game = Game::new(settings, ManualScheduler::new(), LogObserver);
        log::info!("Coin Hopper starting (seed {})", game.state().seed);
        game.start();

        let mut input = InputHandler::new();
        let mut surface = NullSurface;
        let mut played = 0;

        for frame in 0..frames {
            let now_ms = frame * 1000 / fps;
            for (key, down) in scripted_keys(frame) {
                if down {
                    input.key_down(key, now_ms);
                } else {
                    input.key_up(key, now_ms);
                }
            }
            input.advance(now_ms);

            if !game.step(&mut input, &mut surface) {
                break;
            }
            played += 1;
        }

        let state = game.state();
        log::info!(
            "Finished after {} frames: {:?}, score {}, lives {}, coins {}/{}",
            played,
            state.phase,
            state.score,
            state.lives,
            state.coins_collected,
            state.total_coins
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{:#}", e);
        eprintln!("error: {e:#}");
        std::process::exit(2);
    }
}


#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; hosts drive `Game` directly
}
