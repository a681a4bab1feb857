pub mod cache;
pub mod distance;
pub mod extract;
pub mod select;

use crate::config::Config;
use crate::error::Result;

use cache::SpriteCache;
use select::find_best_sprites;

/// Matches reference colors against one sprite color cache.
///
/// The cache is resolved once when the matcher is opened and is read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct Matcher {
    cache: SpriteCache,
    top_n: usize,
}

impl Matcher {
    pub fn new(cache: SpriteCache, top_n: usize) -> Self {
        Self { cache, top_n }
    }

    /// Load the configured cache, building it from the sprite directory if
    /// the file is absent.
    pub fn open(config: &Config) -> Result<Self> {
        let cache = SpriteCache::load_or_build(&config.sprites_dir, &config.cache_file)?;
        Ok(Self::new(cache, config.top_n))
    }

    /// Rebuild the cache unconditionally, then open it.
    pub fn rebuild(config: &Config) -> Result<Self> {
        let cache = SpriteCache::rebuild(&config.sprites_dir, &config.cache_file)?;
        Ok(Self::new(cache, config.top_n))
    }

    pub fn cache(&self) -> &SpriteCache {
        &self.cache
    }

    /// Best sprites for each reference color, concatenated in reference
    /// order. Absent references contribute nothing; the same sprite may
    /// appear more than once.
    pub fn select<S: AsRef<str>>(&self, references: &[Option<S>]) -> Result<Vec<String>> {
        let mut selected = Vec::new();
        for reference in references {
            let Some(reference) = reference else {
                tracing::warn!("Reference color slot missing from scheme, skipping");
                continue;
            };
            let reference: &str = reference.as_ref();
            let best = find_best_sprites(reference, &self.cache, self.top_n)?;
            tracing::debug!(reference, ?best, "Ranked sprites");
            selected.extend(best);
        }
        Ok(selected)
    }
}
