use crate::color::hex_to_lab;
use crate::error::Result;
use crate::pipeline::cache::SpriteCache;
use crate::pipeline::distance::ciede2000;

/// Default number of sprites picked per reference color.
pub const DEFAULT_TOP_N: usize = 2;

/// A cached sprite and its distance to a reference color.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSprite {
    pub sprite: String,
    pub distance: f64,
}

/// Rank every cached sprite by CIEDE2000 distance to `reference`, closest
/// first, keeping at most `top_n`.
///
/// Equal distances keep the cache's iteration order. A malformed reference
/// or cached color aborts the ranking.
pub fn rank_sprites(reference: &str, cache: &SpriteCache, top_n: usize) -> Result<Vec<RankedSprite>> {
    let reference = hex_to_lab(reference)?;

    let mut ranked = cache
        .iter()
        .map(|(sprite, hex)| -> Result<RankedSprite> {
            Ok(RankedSprite {
                sprite: sprite.to_string(),
                distance: ciede2000(reference, hex_to_lab(hex)?),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(top_n);
    Ok(ranked)
}

/// Names of the `top_n` sprites closest to `reference`.
pub fn find_best_sprites(reference: &str, cache: &SpriteCache, top_n: usize) -> Result<Vec<String>> {
    Ok(rank_sprites(reference, cache, top_n)?
        .into_iter()
        .map(|r| r.sprite)
        .collect())
}
