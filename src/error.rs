use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid color format: {0:?} (expected #rrggbb)")]
    InvalidColorFormat(String),

    #[error("sprite color cache not found: {}", .0.display())]
    CacheMissing(PathBuf),

    #[error("sprite color cache is corrupt: {}: {source}", path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize sprite color cache {}: {source}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no color codes found in sprite {0}")]
    NoColorExtracted(String),

    #[error("failed to parse reference colors {}: {source}", path.display())]
    ReferenceParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sprite not found: {0}")]
    MissingSprite(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
