//! File-backed store of source URLs per bulk pairing.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::warn;

use crate::error::Result;
use crate::types::SavedPlayerUrls;

type UrlMap = BTreeMap<String, SavedPlayerUrls>;

/// Single JSON document mapping bulk-pairing id to its saved URLs
pub struct UrlStore {
    path: PathBuf,
}

impl UrlStore {
    /// Create a store backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Remember the URLs used for a bulk pairing, replacing earlier ones
    pub fn save_urls(&self, id: &str, pairings_url: &str, players_url: Option<&str>) -> Result<()> {
        let mut map = self.load();
        map.insert(
            id.to_string(),
            SavedPlayerUrls {
                pairings_url: pairings_url.to_string(),
                players_url: players_url.filter(|url| !url.is_empty()).map(str::to_string),
            },
        );

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(&map)?;
        std::fs::write(&self.path, content)?;

        Ok(())
    }

    /// URLs saved for `id`, if any
    pub fn get_urls(&self, id: &str) -> Option<SavedPlayerUrls> {
        self.load().remove(id)
    }

    /// Forget every saved URL
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Read the whole map; a missing or corrupted file reads as empty
    fn load(&self) -> UrlMap {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return UrlMap::new();
        };

        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!("Ignoring corrupted URL store {}: {}", self.path.display(), e);
                UrlMap::new()
            }
        }
    }
}
