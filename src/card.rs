use crate::api::{poster_url, CatalogItem};
use crate::item_id::ItemId;
use crate::progress::ProgressStore;

/// Where activating a card leads, relative to the web frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Player { id: ItemId },
    SeriesDetail { id: ItemId },
}

impl Navigation {
    /// Page path with query string, e.g. `player.html?id=3&type=movie`.
    pub fn target(&self) -> String {
        match self {
            Navigation::Player { id } => format!("player.html?id={}&type=movie", id),
            Navigation::SeriesDetail { id } => format!("series-detail.html?id={}", id),
        }
    }

    pub fn url(&self, web_base_url: &str) -> String {
        format!("{}/{}", web_base_url.trim_end_matches('/'), self.target())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Poster {
    Image { url: String, alt: String },
    Placeholder { icon: &'static str, title: String },
}

/// Everything needed to draw one grid card.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCard {
    pub poster: Poster,
    pub is_anime: bool,
    pub quality: Option<String>,
    /// Watched percentage; the bar is only drawn when this is above zero
    pub progress: f64,
    pub title: String,
    pub meta: Vec<String>,
    pub navigation: Navigation,
}

impl MediaCard {
    pub fn build(item: &CatalogItem, progress: &ProgressStore, api_base_url: &str) -> Self {
        let is_anime = item.is_anime();
        let title = item.title().to_string();

        let icon = match (item, is_anime) {
            (_, true) => "🎌",
            (CatalogItem::Movie(_), false) => "🎬",
            (CatalogItem::Series(_), false) => "📺",
        };
        let poster = if item.has_poster() {
            Poster::Image {
                url: poster_url(api_base_url, item.id()),
                alt: title.clone(),
            }
        } else {
            Poster::Placeholder {
                icon,
                title: title.clone(),
            }
        };

        let (progress, meta, navigation) = match item {
            CatalogItem::Movie(movie) => {
                let mut meta = Vec::new();
                if let Some(year) = movie.year {
                    meta.push(year.to_string());
                }
                if let Some(duration) = movie.duration {
                    meta.push(format_duration(duration));
                }
                (
                    progress.movie_percent(&movie.id),
                    meta,
                    Navigation::Player { id: movie.id.clone() },
                )
            }
            CatalogItem::Series(series) => {
                let mut meta = Vec::new();
                if let Some(seasons) = series.seasons {
                    meta.push(format!("{} temporades", seasons));
                }
                if let Some(episodes) = series.episode_count {
                    meta.push(format!("{} episodis", episodes));
                }
                (
                    progress.series_percent(&series.id),
                    meta,
                    Navigation::SeriesDetail { id: series.id.clone() },
                )
            }
        };

        Self {
            poster,
            is_anime,
            quality: item.quality().map(str::to_string),
            progress,
            title,
            meta,
            navigation,
        }
    }

    pub fn show_progress(&self) -> bool {
        self.progress > 0.0
    }

    /// Metadata parts joined with the bullet separator.
    pub fn meta_line(&self) -> String {
        self.meta.join(" • ")
    }
}

/// `XhYm` when at least an hour, otherwise `Ym`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
