use tokio::sync::mpsc;

use crate::api::HermesClient;
use crate::app::{App, AsyncAction};
use crate::card::{MediaCard, Navigation};
use crate::catalog::{
    build_cards, CatalogKind, CatalogLoader, ItemSource, LoadOutcome, MovieCatalog, SeriesCatalog,
};
use crate::chrome::{ChromeEvent, Effect};
use crate::config::Page;
use crate::progress::ProgressStore;
use crate::view_mode::ViewMode;

pub async fn handle_async_action(app: &mut App, action: AsyncAction, tx: &mpsc::Sender<AsyncAction>) {
    match action {
        AsyncAction::CatalogLoaded {
            page,
            generation,
            cards,
            source,
        } => {
            let count = cards.len();
            if !app.page_state_mut(page).finish_load(generation, cards, source) {
                tracing::debug!(?page, generation, "Dropping superseded catalog load");
            } else {
                tracing::debug!(?page, count, "Catalog page updated");
            }
        }
        AsyncAction::ScanFinished(result) => {
            let effects = app.dispatch(ChromeEvent::ScanFinished(result));
            run_effects(app, effects, tx);
        }
    }
}

/// Carries out the I/O effects returned by [`App::dispatch`].
pub fn run_effects(app: &mut App, effects: Vec<Effect>, tx: &mpsc::Sender<AsyncAction>) {
    for effect in effects {
        match effect {
            Effect::StartScan => spawn_scan(app, tx),
            Effect::Reload => {
                let page = app.page;
                spawn_catalog_load(app, page, tx);
            }
            Effect::SetViewMode(_) | Effect::ShowNotice(_) => {}
        }
    }
}

/// Puts `page` into its loading state and fetches it in the background.
pub fn spawn_catalog_load(app: &mut App, page: Page, tx: &mpsc::Sender<AsyncAction>) {
    let generation = app.page_state_mut(page).begin_load();
    let mode = app.view_mode.get();
    let client = app.client.clone();
    let progress = app.progress.clone();
    let api_base = app.config.api_base_url.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let (cards, source) = match page {
            Page::Movies => load_cards::<MovieCatalog>(client, mode, &progress, &api_base).await,
            Page::Series => load_cards::<SeriesCatalog>(client, mode, &progress, &api_base).await,
        };
        let _ = tx
            .send(AsyncAction::CatalogLoaded {
                page,
                generation,
                cards,
                source,
            })
            .await;
    });
}

async fn load_cards<K: CatalogKind>(
    client: HermesClient,
    mode: ViewMode,
    progress: &ProgressStore,
    api_base: &str,
) -> (Vec<MediaCard>, Option<ItemSource>) {
    let loader = CatalogLoader::<K, _>::new(client, api_base);
    let outcome = loader.load(mode).await;
    let source = match &outcome {
        LoadOutcome::Items(_, source) => Some(*source),
        LoadOutcome::Empty => None,
    };
    (build_cards(outcome, progress, api_base), source)
}

fn spawn_scan(app: &mut App, tx: &mpsc::Sender<AsyncAction>) {
    let guard = app.chrome.spinner.acquire();
    let client = app.client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = client.scan_library().await;
        // Stop spinning before the result is reduced, whatever it is
        drop(guard);
        let _ = tx.send(AsyncAction::ScanFinished(result)).await;
    });
}

pub fn open_navigation(app: &App, navigation: &Navigation) {
    let url = navigation.url(&app.config.web_base_url);
    tracing::info!(%url, "Opening item");
    if let Err(e) = webbrowser::open(&url) {
        tracing::error!(%url, error = %e, "Failed to open browser");
    }
}
