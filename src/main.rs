mod app;
mod editor;
mod event;
mod ui;

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sift_config::Config;
use sift_logger::LogLevel;

use app::App;
use editor::Editor;

fn main() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("Usage: sift <file>")?;

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config, using defaults: {:#}", e);
            Config::default()
        }
    };
    init_logger(&config);
    sift_logger::info(format!("Opening {}", path.display()));

    let editor = Editor::open(&path, config.search.show_match_annotations)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    if keyboard_enhanced {
        // Needed to tell Shift+Enter from Enter
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(editor, &config).run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        sift_logger::error(format!("Fatal: {:#}", err));
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn init_logger(config: &Config) {
    let file_path = config
        .logging
        .file_path
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| Config::default_log_path().ok());
    let min_level = LogLevel::from_str(&config.logging.min_level).unwrap_or(LogLevel::Info);
    sift_logger::init(file_path, config.logging.max_entries, min_level);
}
