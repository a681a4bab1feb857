use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pipeline::extract::extract_sprite_color;

/// Sprite filename → dominant `#rrggbb` color, persisted as a flat JSON object.
///
/// Keys are kept sorted so the persisted form does not depend on directory
/// enumeration order. Values stay as the raw strings found on disk; they are
/// validated when a comparison uses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteCache {
    entries: BTreeMap<String, String>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sprite: impl Into<String>, hex: impl Into<String>) {
        self.entries.insert(sprite.into(), hex.into());
    }

    pub fn get(&self, sprite: &str) -> Option<&str> {
        self.entries.get(sprite).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in sorted sprite-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Run the extractor over every file in `sprites_dir`.
    ///
    /// Sprites that cannot be read or carry no usable color codes are left
    /// out. Only a failure to list `sprites_dir` aborts the build.
    pub fn build(sprites_dir: &Path) -> Result<Self> {
        let mut cache = Self::new();
        let entries = std::fs::read_dir(sprites_dir).map_err(|e| Error::io(sprites_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| Error::io(sprites_dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            match extract_sprite_color(&path) {
                Ok(color) => {
                    tracing::debug!(sprite = %name, color = %color, "Extracted dominant color");
                    cache.insert(name, color.to_hex());
                }
                Err(e @ Error::NoColorExtracted(_)) => {
                    tracing::debug!(sprite = %name, "Skipping sprite: {e}");
                }
                Err(e) => {
                    tracing::warn!(sprite = %name, "Skipping unreadable sprite: {e}");
                }
            }
        }

        Ok(cache)
    }

    /// Read a previously saved cache.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::CacheMissing(path.to_path_buf()))
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        serde_json::from_str(&content).map_err(|source| Error::CacheCorrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the cache, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = serde_json::to_string(self).map_err(|source| Error::CacheWrite {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    /// Full rebuild from `sprites_dir`, persisted to `cache_path`.
    pub fn rebuild(sprites_dir: &Path, cache_path: &Path) -> Result<Self> {
        let cache = Self::build(sprites_dir)?;
        cache.save(cache_path)?;
        tracing::info!(
            sprites = cache.len(),
            path = %cache_path.display(),
            "Built sprite color cache"
        );
        Ok(cache)
    }

    /// Load `cache_path`, building it from `sprites_dir` first if it does not
    /// exist. An existing cache is trusted as-is.
    pub fn load_or_build(sprites_dir: &Path, cache_path: &Path) -> Result<Self> {
        match Self::load(cache_path) {
            Err(Error::CacheMissing(_)) => Self::rebuild(sprites_dir, cache_path),
            other => other,
        }
    }
}

impl FromIterator<(String, String)> for SpriteCache {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_sprite(dir: &Path, name: &str, rgb: [u8; 3], repeat: usize) {
        let pixel = format!("\x1b[38;2;{};{};{}m▀", rgb[0], rgb[1], rgb[2]);
        std::fs::write(dir.join(name), pixel.repeat(repeat)).unwrap();
    }

    #[test]
    fn build_skips_sprites_without_colors() {
        let dir = TempDir::new().unwrap();
        write_sprite(dir.path(), "pikachu", [255, 204, 0], 4);
        std::fs::write(dir.path().join("README"), "not a sprite").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let cache = SpriteCache::build(dir.path()).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("pikachu"), Some("#ffcc00"));
        assert_eq!(cache.get("README"), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn build_skips_unreadable_sprites() {
        let dir = TempDir::new().unwrap();
        write_sprite(dir.path(), "pikachu", [255, 204, 0], 4);
        // reading /proc/self/mem from offset 0 fails with EIO, even as root
        std::os::unix::fs::symlink("/proc/self/mem", dir.path().join("broken")).unwrap();

        let cache = SpriteCache::build(dir.path()).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("pikachu"), Some("#ffcc00"));
        assert_eq!(cache.get("broken"), None);
    }

    #[test]
    fn build_missing_directory_fails() {
        let result = SpriteCache::build(Path::new("/nonexistent/sprites"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn load_missing_file_is_cache_missing() {
        let dir = TempDir::new().unwrap();
        let result = SpriteCache::load(&dir.path().join("cache.json"));
        assert!(matches!(result, Err(Error::CacheMissing(_))));
    }

    #[test]
    fn load_garbage_is_cache_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            SpriteCache::load(&path),
            Err(Error::CacheCorrupt { .. })
        ));

        std::fs::write(&path, r##"["#ffffff"]"##).unwrap();
        assert!(matches!(
            SpriteCache::load(&path),
            Err(Error::CacheCorrupt { .. })
        ));
    }

    #[test]
    fn persisted_form_is_flat_json_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wal").join("cache.json");
        let cache: SpriteCache = [
            ("squirtle".to_string(), "#3399ff".to_string()),
            ("pikachu".to_string(), "#ffcc00".to_string()),
        ]
        .into_iter()
        .collect();

        cache.save(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r##"{"pikachu":"#ffcc00","squirtle":"#3399ff"}"##);
        assert_eq!(SpriteCache::load(&path).unwrap(), cache);
    }

    #[test]
    fn load_or_build_trusts_existing_cache() {
        let sprites = TempDir::new().unwrap();
        write_sprite(sprites.path(), "pikachu", [255, 204, 0], 2);
        let out = TempDir::new().unwrap();
        let cache_path = out.path().join("cache.json");
        std::fs::write(&cache_path, r##"{"stale":"#000000"}"##).unwrap();

        let cache = SpriteCache::load_or_build(sprites.path(), &cache_path).unwrap();
        assert_eq!(cache.get("stale"), Some("#000000"));
        assert_eq!(cache.get("pikachu"), None);
    }

    #[test]
    fn load_or_build_builds_when_absent() {
        let sprites = TempDir::new().unwrap();
        write_sprite(sprites.path(), "pikachu", [255, 204, 0], 2);
        let out = TempDir::new().unwrap();
        let cache_path = out.path().join("cache.json");

        let cache = SpriteCache::load_or_build(sprites.path(), &cache_path).unwrap();
        assert_eq!(cache.get("pikachu"), Some("#ffcc00"));
        assert!(cache_path.exists());
    }
}
