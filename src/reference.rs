use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// The part of pywal's `colors.json` this tool reads.
#[derive(Debug, Deserialize)]
struct WalScheme {
    colors: HashMap<String, String>,
}

/// Read the named color slots from a pywal `colors.json`.
///
/// The result has one entry per slot, in order; a slot missing from the
/// scheme yields `None`. Values are returned unvalidated.
pub fn load_reference_colors(path: &Path, slots: &[String]) -> Result<Vec<Option<String>>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let scheme: WalScheme = serde_json::from_str(&content).map_err(|source| Error::ReferenceParse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(slots
        .iter()
        .map(|slot| scheme.colors.get(slot).cloned())
        .collect())
}
