use std::{io, time::Duration};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use hermes_lib::app::{App, AsyncAction};
use hermes_lib::card::MediaCard;
use hermes_lib::catalog::{
    build_cards, CatalogKind, CatalogLoader, ItemSource, LoadOutcome, MovieCatalog, SeriesCatalog,
};
use hermes_lib::config::{AppConfig, Page};
use hermes_lib::handlers::async_actions::{handle_async_action, spawn_catalog_load};
use hermes_lib::handlers::input::{handle_key_event, InputResult};
use hermes_lib::handlers::mouse::handle_mouse_event;
use hermes_lib::storage::{open_default_store, FileStore, KeyValueStore, SharedStore};
use hermes_lib::view_mode::{ViewMode, ViewModeStore, VIEW_MODE_KEY};
use hermes_lib::{logging, ui};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Terminal client for a Hermes media library", long_about = None)]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Page to open on
    #[arg(long, value_enum)]
    page: Option<Page>,

    /// Store this view mode before starting (normal, anime, mixed)
    #[arg(long, value_parser = parse_mode)]
    mode: Option<ViewMode>,

    /// Print the selected page's cards and exit
    #[arg(long)]
    list: bool,

    /// Trigger a library scan and exit
    #[arg(long)]
    scan: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    check: bool,
}

fn parse_mode(s: &str) -> Result<ViewMode, String> {
    ViewMode::from_tag(s).ok_or_else(|| format!("unknown view mode '{}', expected normal, anime or mixed", s))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = Args::parse();
    let one_shot = args.list || args.scan || args.check;

    // Held until exit so buffered log lines get flushed
    let _log_guard = if one_shot {
        logging::init_stderr_logging();
        None
    } else {
        logging::init_file_logging()
    };

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });
    if let Some(url) = args.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(page) = args.page {
        config.default_page = page;
    }

    let store = open_default_store();
    if let Some(mode) = args.mode {
        ViewModeStore::load(store.clone()).set(mode);
    }
    let mut app = App::new(config, store.clone());

    // -- CLI MODE --
    if args.check {
        return check(&app, &store);
    }
    if args.scan {
        return scan(&app).await;
    }
    if args.list {
        return list(&app).await;
    }

    // -- TUI MODE (Default) --
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::channel::<AsyncAction>(32);
    let page = app.page;
    spawn_catalog_load(&mut app, page, &tx);

    let res = run_app(&mut terminal, &mut app, tx, &mut rx).await;

    // Restore Terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "Terminal loop failed");
        eprintln!("{:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<AsyncAction>,
    rx: &mut mpsc::Receiver<AsyncAction>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        while let Ok(action) = rx.try_recv() {
            handle_async_action(app, action, &tx).await;
        }

        app.loading_tick = app.loading_tick.wrapping_add(1);

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if let InputResult::Quit = handle_key_event(app, key, &tx) {
                        app.should_quit = true;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse, &tx),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn check(app: &App, store: &SharedStore) -> Result<(), anyhow::Error> {
    println!("Config file:  {}", display_path(AppConfig::config_path()));
    println!("Store file:   {}", display_path(FileStore::default_path()));
    println!("API base URL: {}", app.config.api_base_url);
    println!("Web base URL: {}", app.config.web_base_url);
    println!("Start page:   {}", app.page.title());
    println!("View mode:    {} ({})", app.view_mode.subtitle(), app.view_mode.raw());
    println!(
        "Stored key:   {}",
        store.get_item(VIEW_MODE_KEY).unwrap_or_else(|| "<unset>".to_string())
    );
    Ok(())
}

async fn scan(app: &App) -> Result<(), anyhow::Error> {
    match app.client.scan_library().await {
        Ok(response) => match response.summary() {
            Some(summary) => println!("{}", summary),
            None => tracing::warn!(status = %response.status, "Scan did not report success"),
        },
        Err(e) => {
            tracing::error!(error = %e, "Library scan failed");
            println!("{}", e.user_message());
        }
    }
    Ok(())
}

async fn list(app: &App) -> Result<(), anyhow::Error> {
    let mode = app.view_mode.get();
    println!("{} · {}", app.page.title(), app.view_mode.subtitle());

    let cards = match app.page {
        Page::Movies => list_cards::<MovieCatalog>(app, mode).await,
        Page::Series => list_cards::<SeriesCatalog>(app, mode).await,
    };

    if cards.is_empty() {
        println!("(buit)");
    }
    for card in cards {
        let mut badges = Vec::new();
        if card.is_anime {
            badges.push("Anime".to_string());
        }
        if let Some(q) = &card.quality {
            badges.push(q.clone());
        }
        println!(
            "{:<40} {:<28} {:>5.1}%  [{}]",
            card.title,
            card.meta_line(),
            card.progress,
            badges.join(", ")
        );
    }
    Ok(())
}

async fn list_cards<K: CatalogKind>(app: &App, mode: ViewMode) -> Vec<MediaCard> {
    let loader = CatalogLoader::<K, _>::new(app.client.clone(), app.config.api_base_url.clone());
    let outcome = loader.load(mode).await;
    if let LoadOutcome::Items(_, ItemSource::Mock) = &outcome {
        println!("(dades de demostració)");
    }
    build_cards(outcome, &app.progress, &app.config.api_base_url)
}

fn display_path(path: Option<std::path::PathBuf>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_else(|| "<unavailable>".to_string())
}
