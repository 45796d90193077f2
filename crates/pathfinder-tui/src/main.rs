use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pathfinder_core::{watcher, Config, KeyValueStorage, MemoryStorage, Session};
use tracing::{info, warn};

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "pathfinder", version)]
#[command(about = "Personalized tech learning roadmaps in your terminal")]
struct Cli {
    /// Directory holding the stored profile (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to open first, e.g. /dashboard
    #[arg(long, default_value = "/")]
    route: String,

    /// Where to write logs
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether a profile is stored
    Status,
    /// Remove the stored profile
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let log_path = cli.log_file.unwrap_or_else(logging::default_log_path);
    logging::init(&config.log_level, &log_path)?;

    let storage: Arc<dyn KeyValueStorage>;
    let data_dir: String;
    match config.storage() {
        Ok(files) => {
            data_dir = files.dir().display().to_string();
            storage = Arc::new(files);
        }
        Err(e) => {
            warn!("{}, keeping the profile in memory only", e);
            data_dir = "(memory)".to_string();
            storage = Arc::new(MemoryStorage::new());
        }
    }
    let session = Session::new(storage);

    match cli.command {
        Some(Commands::Status) => {
            match session.profile() {
                Some(profile) => println!("Logged in as {}", profile.display_name()),
                None => println!("Not logged in"),
            }
            println!("Data directory: {}", data_dir);
            Ok(())
        }
        Some(Commands::Logout) => {
            session.sign_out()?;
            println!("Logged out");
            Ok(())
        }
        None => {
            info!(data_dir = %data_dir, route = %cli.route, "starting pathfinder");
            run(session, &config, &cli.route).await
        }
    }
}

async fn run(session: Session, config: &Config, start: &str) -> Result<()> {
    let _watcher = watcher::spawn(session.clone(), config.watch_interval());
    let mut events = EventHandler::new(session.notifier());

    let mut app = App::new(session, config);
    app.set_reply_sender(events.reply_sender());
    app.navigate(start);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run_loop(&mut terminal, &mut app, &mut events).await;
    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;
        match events.next().await {
            Some(event) => handler::handle_event(app, event)?,
            None => break,
        }
    }
    info!("exiting");
    Ok(())
}
