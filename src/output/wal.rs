use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

use super::SpriteSink;

/// Saves sprites next to the pywal cache as `pokemon_sprite_<rank>`.
pub struct WalSink<'a> {
    config: &'a Config,
}

impl<'a> WalSink<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Raw colorscript contents of `sprite`, ready to be written to a terminal.
    pub fn read_sprite(&self, sprite: &str) -> Result<String> {
        let path = self.config.sprite_path(sprite);
        read_sprite_file(&path, sprite)
    }
}

impl SpriteSink for WalSink<'_> {
    fn name(&self) -> &str {
        "pywal cache"
    }

    fn save(&self, rank: usize, sprite: &str) -> Result<PathBuf> {
        let content = self.read_sprite(sprite)?;
        std::fs::create_dir_all(&self.config.wal_dir)
            .map_err(|e| Error::io(&self.config.wal_dir, e))?;

        let target = self.config.saved_sprite_path(rank);
        std::fs::write(&target, content).map_err(|e| Error::io(&target, e))?;
        tracing::debug!(sprite, path = %target.display(), "Saved sprite");
        Ok(target)
    }
}

fn read_sprite_file(path: &Path, sprite: &str) -> Result<String> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::MissingSprite(sprite.to_string()))
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(root: &Path) -> Config {
        let mut config = Config::with_wal_dir(root.join("wal"));
        config.sprites_dir = root.join("sprites");
        std::fs::create_dir_all(&config.sprites_dir).unwrap();
        config
    }

    #[test]
    fn save_copies_sprite_under_rank() {
        let root = TempDir::new().unwrap();
        let config = config(root.path());
        let art = "\x1b[38;2;255;204;0m▀▀\x1b[0m\n";
        std::fs::write(config.sprites_dir.join("pikachu"), art).unwrap();

        let sink = WalSink::new(&config);
        let path = sink.save(2, "pikachu").unwrap();

        assert_eq!(path, root.path().join("wal").join("pokemon_sprite_2"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), art);
    }

    #[test]
    fn save_unknown_sprite_fails() {
        let root = TempDir::new().unwrap();
        let config = config(root.path());
        let sink = WalSink::new(&config);

        let result = sink.save(1, "missingno");
        assert!(matches!(result, Err(Error::MissingSprite(s)) if s == "missingno"));
        assert!(!config.saved_sprite_path(1).exists());
    }

    #[test]
    fn sink_has_a_name() {
        let root = TempDir::new().unwrap();
        let config = config(root.path());
        assert_eq!(WalSink::new(&config).name(), "pywal cache");
    }
}
