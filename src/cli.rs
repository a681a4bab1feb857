use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::select::DEFAULT_TOP_N;

/// Select Pokémon sprites whose dominant color matches the current pywal scheme.
#[derive(Parser, Debug)]
#[command(name = "pokemon-pywal", version, about)]
pub struct Args {
    /// Save the selected sprites into the wal directory and print them
    #[arg(long)]
    pub save_sprite: bool,

    /// Point the sprite symlink at a random saved sprite and exit
    #[arg(long)]
    pub change_symlink: bool,

    /// Rebuild the sprite color cache even if it already exists
    #[arg(long)]
    pub rebuild_cache: bool,

    /// Number of sprites picked per reference color
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// pywal color slot to match against (repeatable; defaults to color3 and color5)
    #[arg(long = "slot")]
    pub slots: Vec<String>,

    /// Directory containing the sprite colorscripts
    #[arg(long)]
    pub sprites_dir: Option<PathBuf>,

    /// pywal cache directory (defaults to ~/.cache/wal)
    #[arg(long)]
    pub wal_dir: Option<PathBuf>,

    /// Sprite color cache file
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// pywal colors.json to read reference colors from
    #[arg(long)]
    pub colors: Option<PathBuf>,
}
