use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::color::Color;
use crate::error::{Error, Result};

/// 24-bit ANSI foreground escape: `ESC [ 38 ; 2 ; r ; g ; b m`.
fn foreground_escape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\x1b\[38;2;(\d+);(\d+);(\d+)m").expect("foreground escape pattern is valid")
    })
}

/// Occurrence count of a color plus the scan position it was first seen at.
#[derive(Debug, Clone, Copy)]
struct Tally {
    first_seen: usize,
    count: usize,
}

/// Return the most frequent foreground color embedded in `content`.
///
/// Triples with a component outside 0..=255 are not counted. On equal
/// counts the color encountered first wins.
pub fn dominant_color(content: &str) -> Option<Color> {
    let mut table: HashMap<Color, Tally> = HashMap::new();

    for (position, caps) in foreground_escape().captures_iter(content).enumerate() {
        let channel = |i: usize| caps[i].parse::<u8>().ok();
        let (Some(r), Some(g), Some(b)) = (channel(1), channel(2), channel(3)) else {
            continue;
        };
        table
            .entry(Color::new(r, g, b))
            .or_insert(Tally {
                first_seen: position,
                count: 0,
            })
            .count += 1;
    }

    table
        .into_iter()
        .max_by(|(_, x), (_, y)| {
            x.count
                .cmp(&y.count)
                .then_with(|| y.first_seen.cmp(&x.first_seen))
        })
        .map(|(color, _)| color)
}

/// Read a sprite file and extract its dominant color.
///
/// Returns [`Error::NoColorExtracted`] when the sprite carries no usable
/// color codes. Invalid UTF-8 is replaced rather than rejected.
pub fn extract_sprite_color(path: &Path) -> Result<Color> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let content = String::from_utf8_lossy(&bytes);
    dominant_color(&content).ok_or_else(|| Error::NoColorExtracted(path.display().to_string()))
}
