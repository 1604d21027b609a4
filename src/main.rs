mod config;
mod controller;
mod error;
mod keys;
mod storage;
mod timer;
mod ui;

use std::env;
use std::fs;
use std::io;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Settings;
use crate::storage::{FileStore, MemoryStore, Storage};
use crate::timer::SystemClock;
use crate::ui::app::App;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("termfolio {} - Terminal-styled personal site", VERSION);
    println!();
    println!("USAGE:");
    println!("    termfolio [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help              Print help information");
    println!("    -v, --version           Print version information");
    println!("    --page <PATH>           Open PATH instead of the home page");
    println!();
    println!("SHORTCUTS:");
    for shortcut in keys::SHORTCUT_HELP {
        println!("    {:<24}{}", shortcut.display(), shortcut.description);
    }
}

fn print_version() {
    println!("termfolio {}", VERSION);
}

/// `projects.html` and `/projects.html` both name the same page.
fn normalize_path(arg: &str) -> String {
    if arg.starts_with('/') {
        arg.to_string()
    } else {
        format!("/{}", arg)
    }
}

/// File logging under ~/.termfolio/logs; the TUI owns stdout.
/// The returned guard must live until exit so buffered lines are flushed.
fn init_logging() -> Option<WorkerGuard> {
    let log_dir = Settings::log_dir()?;
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Logging disabled: {}", e);
        return None;
    }
    let file_appender = tracing_appender::rolling::daily(&log_dir, "termfolio.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();
    Some(guard)
}

fn main() -> io::Result<()> {
    // Handle command line arguments
    let args: Vec<String> = env::args().collect();
    let mut start_path = "/".to_string();
    if args.len() > 1 {
        match args[1].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-v" | "--version" => {
                print_version();
                return Ok(());
            }
            "--page" => {
                if args.len() < 3 {
                    eprintln!("Error: --page requires a path argument");
                    eprintln!("Usage: termfolio --page projects.html");
                    return Ok(());
                }
                start_path = normalize_path(&args[2]);
            }
            _ => {
                eprintln!("Unknown option: {}", args[1]);
                eprintln!("Use --help for usage information");
                return Ok(());
            }
        }
    }

    let _guard = init_logging();
    tracing::info!("termfolio {} starting at {}", VERSION, start_path);

    let settings = Settings::load();
    let durable: Box<dyn Storage> = match Settings::storage_path() {
        Some(path) => Box::new(FileStore::open(path)),
        None => {
            tracing::warn!("No config directory; theme choice will not persist");
            Box::new(MemoryStore::new())
        }
    };
    let mut app = App::new(settings, durable, Box::new(SystemClock::new()), &start_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0),
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    // Lets Ctrl+Shift+B and Cmd reach the shortcut layer with their modifiers
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        crossterm::cursor::Show
    )?;

    if let Err(err) = result {
        tracing::error!("Event loop failed: {}", err);
        eprintln!("Error: {}", err);
    }
    tracing::info!("termfolio exiting");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let mut shown_title = String::new();
    loop {
        app.on_tick();
        if app.should_quit {
            return Ok(());
        }

        if shown_title != app.window_title() {
            shown_title = app.window_title().to_string();
            execute!(io::stdout(), SetTitle(&shown_title))?;
        }

        terminal.draw(|f| ui::draw::draw(f, app))?;

        // Block until input or the next timer is due
        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_, _) => app.handle_resize(),
                _ => {}
            }
        }
        if app.should_quit {
            return Ok(());
        }
    }
}
