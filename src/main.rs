use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::info;

use mapcompose::api::{ComposerClient, MapApi};
use mapcompose::handlers;
use mapcompose::messages::Route;
use mapcompose::model::ComposeParams;
use mapcompose::services::api::{spawn_api_service, ApiResponse};
use mapcompose::ComposeApp;

mod config;
mod ui;
mod utils;

use config::Config;

/// Compose a map: order its layers and edit their styles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Workspace the map lives in
    #[arg(short, long)]
    workspace: String,

    /// Name of the map to compose
    #[arg(short, long)]
    map: String,

    /// Comma-separated layer names to start hidden
    #[arg(long)]
    hidden_layers: Option<String>,

    /// Enable debug logging to the temp dir (mapcompose-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,
}

/// Determine the config file path with fallback logic
fn get_config_path(cli_path: Option<String>) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    let preferred = dirs::config_dir().map(|dir| dir.join("mapcompose").join("config.yaml"));
    if let Some(path) = preferred.as_ref().filter(|p| p.exists()) {
        return Ok(path.clone());
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }

    let expected_path = preferred
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.config/mapcompose/config.yaml".to_string());

    anyhow::bail!(
        "Config file not found. Expected locations:\n\
         1. {} (preferred)\n\
         2. ./config.yaml (fallback)\n\
         \n\
         Use --config <path> to specify a custom location.",
        expected_path
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    utils::init_tracing(args.debug);

    let config_path = get_config_path(args.config)?;
    info!(path = %config_path.display(), "loading config");
    let config = Config::load(&config_path)?;

    let mut client = ComposerClient::new(config.base_url.clone());
    if let Some(username) = config.username.clone() {
        client = client.with_credentials(username, config.password.clone());
    }
    let client: Arc<dyn MapApi> = Arc::new(client);
    let (api_tx, mut api_rx) = spawn_api_service(client);

    let params = ComposeParams {
        workspace: args.workspace,
        map: args.map,
        hidden_layers: args.hidden_layers,
    };
    let mut app = ComposeApp::new(params, config.settings(), api_tx);
    app.enter();

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut api_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.teardown();
    if let Some(route) = result? {
        report_route(route);
    }
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut ComposeApp,
    api_rx: &mut mpsc::UnboundedReceiver<ApiResponse>,
) -> Result<Option<Route>> {
    loop {
        terminal.draw(|f| ui::render(f, &app.model))?;

        app.tick();

        while let Ok(response) = api_rx.try_recv() {
            handlers::handle_api_response(app, response);
        }

        for event in app.drain_timer_events() {
            handlers::handle_timer(app, event);
        }

        if let Some(route) = app.take_route() {
            info!(to = %route.describe(), "leaving compose view");
            return Ok(Some(route));
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handlers::handle_key(app, key);
                }
            }
        }
    }
}

/// There are no other views in this binary; say where we would have gone
fn report_route(route: Route) {
    match route {
        Route::Exit => {}
        Route::Workspace { workspace } => {
            println!("Open workspace: {}", workspace);
        }
        Route::DataImport {
            workspace,
            mut handoff,
        } => {
            println!("Import data into workspace: {}", workspace);
            if let Some(payload) = handoff.try_take() {
                let hidden = payload.map.hidden_layers.unwrap_or_default();
                println!(
                    "Return to map {} afterwards (hidden layers: {})",
                    payload.map.name,
                    if hidden.is_empty() { "none" } else { hidden.as_str() }
                );
            }
        }
    }
}
