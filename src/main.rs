use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hallfav::config::LaunchParams;
use hallfav::{handlers, ui, App, AppOptions};

const DEBUG_LOG_FILE: &str = "hallfav-debug.log";

/// Hall plan with favorites synced to a watchlist
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <tmp>/hallfav-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Launch URL carrying token/env/favorites query parameters
    #[arg(long)]
    launch_url: Option<String>,

    /// Session token (overrides launch URL and config)
    #[arg(long)]
    token: Option<String>,

    /// API environment: "dev" for testing, anything else is production
    #[arg(long)]
    env: Option<String>,
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }

    let path = std::env::temp_dir().join(DEBUG_LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hallfav=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    info!("Debug logging to {}", path.display());
    Ok(())
}

fn launch_overrides(args: &Args) -> Result<LaunchParams> {
    let from_url = match &args.launch_url {
        Some(url) => LaunchParams::from_url(url)?,
        None => LaunchParams::default(),
    };

    Ok(from_url.merge(LaunchParams {
        token: args.token.clone(),
        env: args.env.clone(),
        favorites: Vec::new(),
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let options = AppOptions {
        config_path: args.config.clone(),
        overrides: launch_overrides(&args)?,
        language: None,
    };

    let mut app = App::start(options)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Exiting with error: {:#}", e);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.process_notices();

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        terminal.draw(|f| {
            ui::render(f, &app.model);
        })?;

        if app.model.ui.should_quit {
            break;
        }

        if app.model.ui.reload_requested {
            app.reload()?;
            continue;
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                handlers::handle_key(app, key).await?;
            }
        }
    }

    Ok(())
}
