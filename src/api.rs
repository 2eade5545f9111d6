use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{FetchError, ScanError};
use crate::item_id::{deserialize_flex_count, deserialize_null_default, ItemId};
use crate::view_mode::ViewMode;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const MOVIES_PATH: &str = "/api/movies";
pub const SERIES_PATH: &str = "/api/library/series";
pub const SCAN_PATH: &str = "/api/library/scan";
pub const ANIME_FILTER: &str = "?type=anime";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Movie {
    pub id: ItemId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    /// "normal" or "anime"; anything else renders as normal
    #[serde(rename = "type", default, deserialize_with = "deserialize_null_default")]
    pub media_type: String,
    #[serde(default, deserialize_with = "deserialize_flex_count")]
    pub year: Option<u64>,
    /// Runtime in seconds
    #[serde(default, deserialize_with = "deserialize_flex_count")]
    pub duration: Option<u64>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub poster: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Series {
    pub id: ItemId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_null_default")]
    pub media_type: String,
    #[serde(default, deserialize_with = "deserialize_flex_count")]
    pub seasons: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_flex_count")]
    pub episode_count: Option<u64>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub poster: bool,
}

/// Either kind of record returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Movie(Movie),
    Series(Series),
}

impl CatalogItem {
    pub fn id(&self) -> &ItemId {
        match self {
            CatalogItem::Movie(m) => &m.id,
            CatalogItem::Series(s) => &s.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            CatalogItem::Movie(m) => &m.title,
            CatalogItem::Series(s) => &s.name,
        }
    }

    pub fn is_anime(&self) -> bool {
        let media_type = match self {
            CatalogItem::Movie(m) => &m.media_type,
            CatalogItem::Series(s) => &s.media_type,
        };
        media_type == "anime"
    }

    pub fn quality(&self) -> Option<&str> {
        match self {
            CatalogItem::Movie(m) => m.quality.as_deref(),
            CatalogItem::Series(s) => s.quality.as_deref(),
        }
        .filter(|q| !q.is_empty())
    }

    pub fn has_poster(&self) -> bool {
        match self {
            CatalogItem::Movie(m) => m.poster,
            CatalogItem::Series(s) => s.poster,
        }
    }
}

impl From<Movie> for CatalogItem {
    fn from(movie: Movie) -> Self {
        CatalogItem::Movie(movie)
    }
}

impl From<Series> for CatalogItem {
    fn from(series: Series) -> Self {
        CatalogItem::Series(series)
    }
}

/// Body of `POST /api/library/scan`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ScanResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub stats: ScanStats,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ScanStats {
    #[serde(default)]
    pub series: u64,
    #[serde(default)]
    pub files: u64,
}

impl ScanResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Human-readable summary, only for successful scans.
    pub fn summary(&self) -> Option<String> {
        self.is_success().then(|| {
            format!(
                "Escaneig completat!\n{} sèries\n{} arxius",
                self.stats.series, self.stats.files
            )
        })
    }
}

/// Poster flags arrive as booleans, paths or numbers; any truthy value counts.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => b,
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(serde_json::Value::Array(_)) | Some(serde_json::Value::Object(_)) => true,
        _ => false,
    })
}

/// Ordered endpoint list for a listing path under the given view mode.
pub fn endpoints_for(base_url: &str, path: &str, mode: ViewMode) -> Vec<String> {
    let plain = format!("{}{}", base_url, path);
    let anime = format!("{}{}{}", base_url, path, ANIME_FILTER);
    match mode {
        ViewMode::Normal => vec![plain],
        ViewMode::Anime => vec![anime],
        ViewMode::Mixed => vec![plain, anime],
    }
}

pub fn movie_endpoints(base_url: &str, mode: ViewMode) -> Vec<String> {
    endpoints_for(base_url, MOVIES_PATH, mode)
}

pub fn series_endpoints(base_url: &str, mode: ViewMode) -> Vec<String> {
    endpoints_for(base_url, SERIES_PATH, mode)
}

pub fn poster_url(base_url: &str, id: &ItemId) -> String {
    format!("{}/api/image/poster/{}", base_url, id)
}

/// Anything that can produce a list of catalog items for a URL.
///
/// Implementations report failures; deciding what a failure means is left to
/// the caller.
pub trait CatalogSource: Clone + Send + Sync + 'static {
    fn fetch_items<T>(&self, url: &str) -> impl Future<Output = Result<Vec<T>, FetchError>> + Send
    where
        T: DeserializeOwned + Send + 'static;
}

#[derive(Debug, Clone)]
pub struct HermesClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl HermesClient {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut builder = reqwest::Client::builder().user_agent(concat!("hermes/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self { base_url, client }
    }

    pub fn poster_url(&self, id: &ItemId) -> String {
        poster_url(&self.base_url, id)
    }

    /// Triggers a library rescan. Any HTTP status is accepted as long as the
    /// body is the expected JSON; callers inspect [`ScanResponse::status`].
    pub async fn scan_library(&self) -> Result<ScanResponse, ScanError> {
        let url = format!("{}{}", self.base_url, SCAN_PATH);
        tracing::debug!(%url, "Requesting library scan");

        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ScanError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| ScanError::Network(e.to_string()))?;

        match serde_json::from_slice::<ScanResponse>(&body) {
            Ok(scan) => Ok(scan),
            Err(_) if !status.is_success() => Err(ScanError::Status(status.as_u16())),
            Err(e) => Err(ScanError::Parse(e.to_string())),
        }
    }
}

impl CatalogSource for HermesClient {
    async fn fetch_items<T>(&self, url: &str) -> Result<Vec<T>, FetchError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        tracing::debug!(%url, "Fetching catalog endpoint");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(url.to_string(), e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(url.to_string(), status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Network(url.to_string(), e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Parse(url.to_string(), e.to_string()))
    }
}
