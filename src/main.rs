mod app;
mod ui;

use app::App;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flapper::assets::{AssetManager, JsonFileStore, PreferenceStore};
use flapper::audio::{AudioDirector, SilentBackend};
use flapper::config::{AudioConfig, Config};
use flapper::utils::{persistence, version_line};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;

struct Args {
    seed: Option<u64>,
    mute: bool,
    reset_assets: bool,
}

fn print_help() {
    println!("Flapper - Flappy Bird in the terminal\n");
    println!("Usage: flapper [options]\n");
    println!("Options:");
    println!("  --seed <N>      Fixed seed for pipe gaps");
    println!("  --mute          Start with sound off");
    println!("  --reset-assets  Forget custom assets before starting");
    println!("  --version       Show version information");
    println!("  --help          Show this help message");
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: None,
        mute: false,
        reset_assets: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--mute" => args.mute = true,
            "--reset-assets" => args.reset_assets = true,
            "--seed" => match iter.next().and_then(|s| s.parse().ok()) {
                Some(seed) => args.seed = Some(seed),
                None => {
                    eprintln!("--seed needs a number");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'flapper --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    args
}

/// Pick an audio backend. Without the `audio` feature, or without a usable
/// output device, the game runs silently.
fn build_audio(config: &AudioConfig, muted: bool) -> AudioDirector {
    #[cfg(feature = "audio")]
    {
        match flapper::audio::RodioBackend::new(config.music_volume, config.effects_volume) {
            Ok(backend) => return AudioDirector::new(Box::new(backend), muted),
            Err(e) => tracing::warn!(error = %e, "no audio output, running silent"),
        }
    }
    #[cfg(not(feature = "audio"))]
    let _ = config;
    AudioDirector::new(Box::new(SilentBackend), muted)
}

fn main() -> io::Result<()> {
    let args = parse_args();

    let dir = persistence::app_dir()?;
    if let Err(e) = flapper::logging::init(&dir) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    tracing::info!(version = %version_line(), "starting");

    let config = Config::load(&dir);
    if args.reset_assets {
        AssetManager::new(JsonFileStore::open(&dir)).reset_to_defaults()?;
        println!("Custom assets cleared.");
    }
    run_game(args, config, JsonFileStore::open(&dir))
}

fn run_game<S: PreferenceStore>(args: Args, config: Config, store: S) -> io::Result<()> {
    let muted = args.mute || config.audio.start_muted;
    let audio = build_audio(&config.audio, muted);
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let area = terminal.size()?;
    let mut app = App::new(config, store, audio, rng, area);
    let result = run_loop(&mut terminal, &mut app);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "game loop failed");
    }
    tracing::info!(score = app.state.score, "exiting");
    result
}

fn run_loop<R: Rng, S: PreferenceStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<R, S>,
) -> io::Result<()> {
    let frame = app.config.display.frame_duration();
    let mut next_frame = Instant::now() + frame;

    while !app.quit {
        terminal.draw(|f| app.draw(f))?;

        // Drain input until the next frame is due
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            app.handle_event(event::read()?);
            if app.quit {
                return Ok(());
            }
        }

        app.tick();
        next_frame += frame;
        // After a stall, resume from now instead of replaying missed frames
        let now = Instant::now();
        if next_frame < now {
            next_frame = now + frame;
        }
    }
    Ok(())
}
