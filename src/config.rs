use std::ffi::OsString;
use std::path::PathBuf;

use crate::cli::Args;
use crate::pipeline::select::DEFAULT_TOP_N;

pub const DEFAULT_SPRITES_DIR: &str = "/opt/pokemon-colorscripts/colorscripts/small/regular";
pub const DEFAULT_SLOTS: [&str; 2] = ["color3", "color5"];

const COLORS_FILE: &str = "colors.json";
const CACHE_FILE: &str = "pokemon_colors_cache.json";
const SYMLINK_NAME: &str = "pokemon_sprite";
/// Prefix of sprites saved into the wal directory; the rotation pool.
pub const SAVED_SPRITE_PREFIX: &str = "pokemon_sprite_";

/// Every location and tunable the matcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one colorscript file per sprite.
    pub sprites_dir: PathBuf,
    /// pywal cache directory; saved sprites and the symlink live here.
    pub wal_dir: PathBuf,
    /// pywal color scheme providing the reference colors.
    pub colors_file: PathBuf,
    pub cache_file: PathBuf,
    pub symlink: PathBuf,
    /// Sprites picked per reference color.
    pub top_n: usize,
    /// Named color slots read from `colors_file`, in order.
    pub slots: Vec<String>,
}

impl Config {
    /// Defaults rooted at `wal_dir`.
    pub fn with_wal_dir(wal_dir: impl Into<PathBuf>) -> Self {
        let wal_dir = wal_dir.into();
        Self {
            sprites_dir: PathBuf::from(DEFAULT_SPRITES_DIR),
            colors_file: wal_dir.join(COLORS_FILE),
            cache_file: wal_dir.join(CACHE_FILE),
            symlink: wal_dir.join(SYMLINK_NAME),
            wal_dir,
            top_n: DEFAULT_TOP_N,
            slots: DEFAULT_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Resolve defaults, then apply any overrides given on the command line.
    ///
    /// File locations not given explicitly follow `--wal-dir`.
    pub fn from_args(args: &Args) -> Self {
        let wal_dir = args.wal_dir.clone().unwrap_or_else(default_wal_dir);
        let mut config = Self::with_wal_dir(wal_dir);

        if let Some(dir) = &args.sprites_dir {
            config.sprites_dir = dir.clone();
        }
        if let Some(path) = &args.cache {
            config.cache_file = path.clone();
        }
        if let Some(path) = &args.colors {
            config.colors_file = path.clone();
        }
        config.top_n = args.top;
        if !args.slots.is_empty() {
            config.slots = args.slots.clone();
        }
        config
    }

    /// Path a selected sprite is saved to; `rank` is 1-based.
    pub fn saved_sprite_path(&self, rank: usize) -> PathBuf {
        self.wal_dir.join(format!("{SAVED_SPRITE_PREFIX}{rank}"))
    }

    pub fn sprite_path(&self, sprite: &str) -> PathBuf {
        self.sprites_dir.join(sprite)
    }
}

/// Resolve the pywal cache directory from the environment.
fn default_wal_dir() -> PathBuf {
    wal_dir_from(
        std::env::var_os("XDG_CACHE_HOME"),
        std::env::var_os("HOME"),
    )
}

/// `$XDG_CACHE_HOME/wal`, else `$HOME/.cache/wal`; empty values count as
/// unset. With neither available the system temp directory is used.
fn wal_dir_from(xdg_cache_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let non_empty = |v: Option<OsString>| v.filter(|v| !v.is_empty()).map(PathBuf::from);
    let cache_home = non_empty(xdg_cache_home)
        .or_else(|| non_empty(home).map(|home| home.join(".cache")))
        .unwrap_or_else(std::env::temp_dir);
    cache_home.join("wal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn paths_follow_wal_dir() {
        let config = Config::with_wal_dir("/tmp/wal");
        assert_eq!(config.colors_file, PathBuf::from("/tmp/wal/colors.json"));
        assert_eq!(
            config.cache_file,
            PathBuf::from("/tmp/wal/pokemon_colors_cache.json")
        );
        assert_eq!(config.symlink, PathBuf::from("/tmp/wal/pokemon_sprite"));
        assert_eq!(config.top_n, 2);
        assert_eq!(config.slots, vec!["color3", "color5"]);
    }

    #[test]
    fn wal_dir_prefers_xdg_cache_home() {
        assert_eq!(
            wal_dir_from(Some("/xdg".into()), Some("/home/ash".into())),
            PathBuf::from("/xdg/wal")
        );
    }

    #[test]
    fn wal_dir_ignores_empty_xdg_cache_home() {
        assert_eq!(
            wal_dir_from(Some("".into()), Some("/home/ash".into())),
            PathBuf::from("/home/ash/.cache/wal")
        );
    }

    #[test]
    fn wal_dir_without_home_uses_temp_dir() {
        let expected = std::env::temp_dir().join("wal");
        assert_eq!(wal_dir_from(None, None), expected);
        assert_eq!(wal_dir_from(Some("".into()), Some("".into())), expected);
        assert!(expected.is_absolute());
    }

    #[test]
    fn saved_sprite_paths_are_one_based() {
        let config = Config::with_wal_dir("/tmp/wal");
        assert_eq!(
            config.saved_sprite_path(1),
            PathBuf::from("/tmp/wal/pokemon_sprite_1")
        );
    }

    #[test]
    fn args_override_defaults() {
        let args = Args::parse_from([
            "pokemon-pywal",
            "--wal-dir",
            "/w",
            "--sprites-dir",
            "/s",
            "--cache",
            "/c.json",
            "--top",
            "3",
            "--slot",
            "color1",
            "--slot",
            "color2",
        ]);
        let config = Config::from_args(&args);
        assert_eq!(config.wal_dir, PathBuf::from("/w"));
        assert_eq!(config.sprites_dir, PathBuf::from("/s"));
        assert_eq!(config.cache_file, PathBuf::from("/c.json"));
        assert_eq!(config.colors_file, PathBuf::from("/w/colors.json"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.slots, vec!["color1", "color2"]);
    }
}
