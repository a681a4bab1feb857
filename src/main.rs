use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokemon_pywal::cli::Args;
use pokemon_pywal::config::Config;
use pokemon_pywal::output::rotate::{change_symlink, Rotation};
use pokemon_pywal::output::wal::WalSink;
use pokemon_pywal::output::SpriteSink;
use pokemon_pywal::pipeline::Matcher;
use pokemon_pywal::reference::load_reference_colors;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokemon_pywal=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_args(&args);

    if args.change_symlink {
        rotate(&config);
        return Ok(());
    }

    let references = load_reference_colors(&config.colors_file, &config.slots)
        .context("failed to read reference colors")?;

    let matcher = if args.rebuild_cache {
        Matcher::rebuild(&config)
    } else {
        Matcher::open(&config)
    }
    .context("failed to prepare sprite color cache")?;

    let selected = matcher.select(&references)?;
    if selected.is_empty() {
        println!("No Pokémon found.");
        return Ok(());
    }

    let sink = WalSink::new(&config);
    for (i, sprite) in selected.iter().enumerate() {
        let rank = i + 1;
        println!("Selected Pokemon {rank}: {sprite}");
        if args.save_sprite {
            let path = sink
                .save(rank, sprite)
                .with_context(|| format!("failed to save sprite {sprite}"))?;
            tracing::info!(sink = sink.name(), sprite = %sprite, "Saved sprite");
            println!("Pokemon sprite saved to {}", path.display());
            print!("{}", sink.read_sprite(sprite)?);
        }
    }

    rotate(&config);
    Ok(())
}

/// Rotate the sprite symlink, reporting failures without aborting.
fn rotate(config: &Config) {
    match change_symlink(&config.wal_dir, &config.symlink) {
        Ok(Rotation::Rotated(target)) => {
            tracing::info!(sprite = %target.display(), "Sprite symlink updated");
        }
        Ok(Rotation::NoSprites) => println!("No Pokemon sprites found in cache."),
        Err(e) => eprintln!("Error changing symlink: {e}"),
    }
}
