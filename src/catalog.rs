//! View-mode driven catalog loading for the movies and series pages.
//!
//! A load computes one or two endpoints from the view mode, fetches them
//! concurrently and concatenates the results in endpoint order. Failures are
//! absorbed at two levels: a failing endpoint contributes nothing, and a
//! fetch stage that dies outright is replaced by the built-in mock dataset.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::api::{movie_endpoints, series_endpoints, CatalogItem, CatalogSource, Movie, Series};
use crate::card::MediaCard;
use crate::errors::StageError;
use crate::item_id::ItemId;
use crate::progress::ProgressStore;
use crate::view_mode::ViewMode;

/// One listing kind (movies or series) and everything that differs between
/// them.
pub trait CatalogKind: Send + Sync + 'static {
    type Item: DeserializeOwned + Into<CatalogItem> + Clone + Send + 'static;

    const NAME: &'static str;

    fn endpoints(base_url: &str, mode: ViewMode) -> Vec<String>;

    fn mock(mode: ViewMode) -> Vec<Self::Item>;
}

#[derive(Debug, Clone, Copy)]
pub struct MovieCatalog;

#[derive(Debug, Clone, Copy)]
pub struct SeriesCatalog;

impl CatalogKind for MovieCatalog {
    type Item = Movie;

    const NAME: &'static str = "movies";

    fn endpoints(base_url: &str, mode: ViewMode) -> Vec<String> {
        movie_endpoints(base_url, mode)
    }

    fn mock(mode: ViewMode) -> Vec<Movie> {
        select_mock(mode, mock_normal_movies(), mock_anime_movies())
    }
}

impl CatalogKind for SeriesCatalog {
    type Item = Series;

    const NAME: &'static str = "series";

    fn endpoints(base_url: &str, mode: ViewMode) -> Vec<String> {
        series_endpoints(base_url, mode)
    }

    fn mock(mode: ViewMode) -> Vec<Series> {
        select_mock(mode, mock_normal_series(), mock_anime_series())
    }
}

/// Where a non-empty item list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSource {
    Backend,
    Mock,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    /// Nothing to show; the page displays its empty state
    Empty,
    Items(Vec<T>, ItemSource),
}

impl<T> LoadOutcome<T> {
    pub fn len(&self) -> usize {
        match self {
            LoadOutcome::Empty => 0,
            LoadOutcome::Items(items, _) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct CatalogLoader<K, S> {
    source: S,
    base_url: String,
    _kind: PhantomData<K>,
}

impl<K: CatalogKind, S: CatalogSource> CatalogLoader<K, S> {
    pub fn new(source: S, base_url: impl Into<String>) -> Self {
        Self {
            source,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            _kind: PhantomData,
        }
    }

    pub fn endpoints(&self, mode: ViewMode) -> Vec<String> {
        K::endpoints(&self.base_url, mode)
    }

    /// Fetches every endpoint concurrently and concatenates the results.
    ///
    /// Per-endpoint errors become empty contributions. The only error left is
    /// a fetch task that never reported back.
    pub async fn fetch_all(&self, endpoints: &[String]) -> Result<Vec<K::Item>, StageError> {
        let handles: Vec<_> = endpoints
            .iter()
            .map(|url| {
                let source = self.source.clone();
                let url = url.clone();
                tokio::spawn(async move { fetch_or_empty::<K::Item, S>(&source, &url).await })
            })
            .collect();

        let mut items = Vec::new();
        for joined in futures::future::join_all(handles).await {
            let batch = joined.map_err(|e| StageError(e.to_string()))?;
            items.extend(batch);
        }
        Ok(items)
    }

    pub async fn load(&self, mode: ViewMode) -> LoadOutcome<K::Item> {
        let endpoints = self.endpoints(mode);
        tracing::debug!(catalog = K::NAME, %mode, ?endpoints, "Loading catalog");

        let (items, source) = match self.fetch_all(&endpoints).await {
            Ok(items) => (items, ItemSource::Backend),
            Err(e) => {
                tracing::error!(catalog = K::NAME, error = %e, "Catalog fetch failed, showing mock data");
                (K::mock(mode), ItemSource::Mock)
            }
        };

        if items.is_empty() {
            tracing::info!(catalog = K::NAME, "Catalog is empty");
            LoadOutcome::Empty
        } else {
            tracing::info!(catalog = K::NAME, count = items.len(), ?source, "Catalog loaded");
            LoadOutcome::Items(items, source)
        }
    }
}

/// Runs one endpoint fetch, turning any failure into an empty list.
pub async fn fetch_or_empty<T, S>(source: &S, url: &str) -> Vec<T>
where
    T: DeserializeOwned + Send + 'static,
    S: CatalogSource,
{
    match source.fetch_items::<T>(url).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(url = e.url(), error = %e, "Endpoint failed, contributing no items");
            Vec::new()
        }
    }
}

/// Turns a load outcome into renderable cards.
pub fn build_cards<T: Into<CatalogItem>>(
    outcome: LoadOutcome<T>,
    progress: &ProgressStore,
    api_base_url: &str,
) -> Vec<MediaCard> {
    match outcome {
        LoadOutcome::Empty => Vec::new(),
        LoadOutcome::Items(items, _) => items
            .into_iter()
            .map(|item| MediaCard::build(&item.into(), progress, api_base_url))
            .collect(),
    }
}

fn select_mock<T>(mode: ViewMode, normal: Vec<T>, anime: Vec<T>) -> Vec<T> {
    match mode {
        ViewMode::Normal => normal,
        ViewMode::Anime => anime,
        ViewMode::Mixed => normal.into_iter().chain(anime).collect(),
    }
}

fn mock_movie(id: i64, title: &str, media_type: &str, year: u64, duration: u64, quality: &str) -> Movie {
    Movie {
        id: ItemId::Number(id),
        title: title.to_string(),
        media_type: media_type.to_string(),
        year: Some(year),
        duration: Some(duration),
        quality: Some(quality.to_string()),
        poster: false,
    }
}

fn mock_series(id: i64, name: &str, media_type: &str, seasons: u64, episodes: u64, quality: &str) -> Series {
    Series {
        id: ItemId::Number(id),
        name: name.to_string(),
        media_type: media_type.to_string(),
        seasons: Some(seasons),
        episode_count: Some(episodes),
        quality: Some(quality.to_string()),
        poster: false,
    }
}

fn mock_normal_movies() -> Vec<Movie> {
    vec![
        mock_movie(1, "La Princesa Promesa", "normal", 1987, 5880, "HD"),
        mock_movie(2, "El Cigne Negre", "normal", 2010, 6480, "FHD"),
        mock_movie(3, "Inception", "normal", 2010, 8880, "4K"),
        mock_movie(4, "Interstellar", "normal", 2014, 10140, "4K"),
    ]
}

fn mock_anime_movies() -> Vec<Movie> {
    vec![
        mock_movie(5, "Kimi No Na Wa", "anime", 2016, 6360, "FHD"),
        mock_movie(6, "La Princesa Mononoke", "anime", 1997, 8100, "HD"),
        mock_movie(7, "Spirited Away", "anime", 2001, 7500, "FHD"),
        mock_movie(8, "Akira", "anime", 1988, 7440, "4K"),
    ]
}

fn mock_normal_series() -> Vec<Series> {
    vec![
        mock_series(1, "Breaking Bad", "normal", 5, 62, "FHD"),
        mock_series(2, "Stranger Things", "normal", 4, 34, "4K"),
        mock_series(3, "The Crown", "normal", 6, 60, "4K"),
        mock_series(4, "Game of Thrones", "normal", 8, 73, "FHD"),
    ]
}

fn mock_anime_series() -> Vec<Series> {
    vec![
        mock_series(5, "Attack on Titan", "anime", 4, 87, "FHD"),
        mock_series(6, "Death Note", "anime", 1, 37, "FHD"),
        mock_series(7, "Fullmetal Alchemist", "anime", 1, 64, "HD"),
        mock_series(8, "One Punch Man", "anime", 2, 24, "FHD"),
    ]
}
