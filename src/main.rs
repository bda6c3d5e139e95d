//! citydash - city weather, forecast, and top news in your terminal
//!
//! A terminal UI application that shows current weather, a short-range
//! forecast, and top local news for a user-chosen city and country,
//! re-fetching all three whenever the location changes.

mod app;
mod cli;
mod config;
mod data;
mod location;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use cli::{Cli, StartupConfig};
use config::Config;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    let config = Config::from_env(&startup);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance and start the first cycle: either the CLI
    // location (through the resolver) or the hardcoded default
    let mut app = App::new(&config);
    match startup.initial_search {
        Some(raw) => {
            app.search_input = raw;
            app.run_search().await;
        }
        None => {
            app.start_cycle(App::default_location());
        }
    }

    // Main event loop
    loop {
        // Apply any completed fetches before drawing
        app.poll_messages();

        terminal.draw(|f| ui::render_dashboard(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // A submitted search resolves before any fetch is attempted
        if app.search_requested {
            app.search_requested = false;
            app.run_search().await;
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
