pub mod rotate;
pub mod wal;

use std::path::PathBuf;

use crate::error::Result;

/// A destination for selected sprites.
pub trait SpriteSink {
    /// Human-readable name of this sink.
    fn name(&self) -> &str;

    /// Store the sprite ranked `rank` (1-based) and return where it went.
    fn save(&self, rank: usize, sprite: &str) -> Result<PathBuf>;
}
