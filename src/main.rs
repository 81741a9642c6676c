mod ui;

use beyond::core::constants::{FRAME_INTERVAL_MS, LOG_FILENAME};
use beyond::core::{FrameInput, Game, Key, SettingsStore};
use beyond::ranking::RankingStore;
use beyond::utils::data_dir;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut seed = None;

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("beyond {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Beyond the Dungeon - terminal dungeon crawler\n");
                println!("Usage: beyond [options]\n");
                println!("Options:");
                println!("  --seed <n>  Make every roll reproducible");
                println!("  --version   Show version information");
                println!("  --help      Show this help message");
                std::process::exit(0);
            }
            "--seed" => match rest.next().map(|s| s.parse::<u64>()) {
                Some(Ok(n)) => seed = Some(n),
                _ => {
                    eprintln!("--seed expects a non-negative integer");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'beyond --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let _guard = setup_logging();
    info!(version = env!("CARGO_PKG_VERSION"), ?seed, "starting");

    let game = match (SettingsStore::new(), RankingStore::new()) {
        (Ok(settings), Ok(ranking)) => Game::new(seed).with_persistence(settings, ranking),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "no data directory, settings and ranking will not be saved");
            Game::new(seed)
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, game);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Fixed-rate loop: gather input, advance one frame, draw.
fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut game: Game) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw_game(frame, &game))?;

        let input = collect_input(frame_interval)?;
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        game.update(&input, dt);
        if game.should_quit() {
            info!("quit");
            return Ok(());
        }
    }
}

/// Drains terminal events for up to one frame.
fn collect_input(frame_interval: Duration) -> io::Result<FrameInput> {
    let deadline = Instant::now() + frame_interval;
    let mut input = FrameInput::none();

    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            break;
        }
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            let key = match key_event.code {
                KeyCode::Up => Key::Up,
                KeyCode::Down => Key::Down,
                KeyCode::Left => Key::Left,
                KeyCode::Right => Key::Right,
                KeyCode::Enter => Key::Enter,
                KeyCode::Esc => Key::Escape,
                KeyCode::Tab => Key::Tab,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Char(c) => Key::Char(c),
                _ => continue,
            };
            match key {
                Key::Up => input.move_y = -1,
                Key::Down => input.move_y = 1,
                Key::Left => input.move_x = -1,
                Key::Right => input.move_x = 1,
                _ => {}
            }
            input.keys.push(key);
        }
        if Instant::now() >= deadline {
            break;
        }
    }
    Ok(input)
}

/// Logs to a file in the data directory. The terminal belongs to the UI, so
/// nothing is written to stderr. Returns the writer guard, which must outlive
/// the game loop.
fn setup_logging() -> Option<WorkerGuard> {
    let dir = data_dir().ok()?;
    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILENAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Some(guard)
}
