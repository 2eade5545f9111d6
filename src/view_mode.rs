use serde::{Deserialize, Serialize};

use crate::storage::SharedStore;

/// Storage key holding the raw view mode tag.
pub const VIEW_MODE_KEY: &str = "hermes_view_mode";

/// Which slice of the library is requested and shown.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Normal,
    Anime,
    Mixed,
}

impl ViewMode {
    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::Normal, ViewMode::Mixed, ViewMode::Anime]
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ViewMode::Normal => "normal",
            ViewMode::Anime => "anime",
            ViewMode::Mixed => "mixed",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ViewMode> {
        match tag {
            "normal" => Some(ViewMode::Normal),
            "anime" => Some(ViewMode::Anime),
            "mixed" => Some(ViewMode::Mixed),
            _ => None,
        }
    }

    /// Short label for the header selector.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Normal => "Normal",
            ViewMode::Mixed => "Mixt",
            ViewMode::Anime => "Anime",
        }
    }

    /// Page subtitle under the catalog title.
    pub fn subtitle(&self) -> &'static str {
        match self {
            ViewMode::Normal => "Mode Normal",
            ViewMode::Mixed => "Mode Mixt (Normal + Anime)",
            ViewMode::Anime => "Mode Anime",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

type Listener = Box<dyn Fn(&str, ViewMode) + Send>;

/// Holds the user's view mode preference and its persisted shadow copy.
///
/// The raw tag is kept exactly as it was set, even when it isn't one of the
/// known modes; [`ViewModeStore::get`] and the label helpers resolve unknown
/// tags to [`ViewMode::Normal`] without touching the stored value.
pub struct ViewModeStore {
    store: SharedStore,
    raw: String,
    listeners: Vec<Listener>,
}

impl ViewModeStore {
    pub fn load(store: SharedStore) -> Self {
        let raw = store
            .get_item(VIEW_MODE_KEY)
            .unwrap_or_else(|| ViewMode::Normal.tag().to_string());
        Self {
            store,
            raw,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> ViewMode {
        ViewMode::from_tag(&self.raw).unwrap_or_default()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn set(&mut self, mode: ViewMode) {
        self.set_raw(mode.tag());
    }

    /// Persists `tag` as given and notifies listeners with the resolved mode.
    pub fn set_raw(&mut self, tag: &str) {
        self.raw = tag.to_string();
        if let Err(e) = self.store.set_item(VIEW_MODE_KEY, tag) {
            tracing::warn!(error = %e, "Failed to persist view mode");
        }
        tracing::info!(mode = tag, "View mode set");

        let resolved = self.get();
        for listener in &self.listeners {
            listener(tag, resolved);
        }
    }

    /// Registers a hook called after every `set`.
    pub fn subscribe(&mut self, listener: impl Fn(&str, ViewMode) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn label(&self) -> &'static str {
        self.get().label()
    }

    pub fn subtitle(&self) -> &'static str {
        self.get().subtitle()
    }
}

impl std::fmt::Debug for ViewModeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewModeStore")
            .field("raw", &self.raw)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_defaults_to_normal_when_unset() {
        let modes = ViewModeStore::load(MemoryStore::shared());
        assert_eq!(modes.get(), ViewMode::Normal);
        assert_eq!(modes.label(), "Normal");
    }

    #[test]
    fn test_set_persists_and_reloads() {
        let store = MemoryStore::shared();
        let mut modes = ViewModeStore::load(store.clone());
        modes.set(ViewMode::Mixed);

        assert_eq!(store.get_item(VIEW_MODE_KEY).as_deref(), Some("mixed"));
        let reloaded = ViewModeStore::load(store);
        assert_eq!(reloaded.get(), ViewMode::Mixed);
        assert_eq!(reloaded.subtitle(), "Mode Mixt (Normal + Anime)");
    }

    #[test]
    fn test_unknown_tag_is_stored_verbatim_but_reads_as_normal() {
        let store = MemoryStore::shared();
        let mut modes = ViewModeStore::load(store.clone());
        modes.set_raw("documentary");

        assert_eq!(store.get_item(VIEW_MODE_KEY).as_deref(), Some("documentary"));
        assert_eq!(modes.raw(), "documentary");
        assert_eq!(modes.get(), ViewMode::Normal);
        assert_eq!(modes.label(), "Normal");
        assert_eq!(modes.subtitle(), "Mode Normal");
    }

    #[test]
    fn test_listeners_see_every_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut modes = ViewModeStore::load(MemoryStore::shared());
        let sink = seen.clone();
        modes.subscribe(move |raw, mode| sink.lock().unwrap().push((raw.to_string(), mode)));

        modes.set(ViewMode::Anime);
        modes.set_raw("bogus");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("anime".to_string(), ViewMode::Anime),
                ("bogus".to_string(), ViewMode::Normal),
            ]
        );
    }
}
