use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use indicatif::ProgressBar;

use miniray::{RenderSettings, TraceSettings, render, scene_file};

/// Toy Whitted-style ray tracer.
#[derive(Parser, Debug)]
struct Args {
    /// Scene description file
    scene: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "scene.png")]
    output: PathBuf,

    /// Samples per pixel when anti-aliasing is enabled
    #[arg(long, default_value_t = 16)]
    samples: u32,

    /// Render a single centered sample per pixel
    #[arg(long)]
    no_antialiasing: bool,

    /// Tile edge length in pixels
    #[arg(long, default_value_t = 64)]
    tile_size: u32,

    /// Override the maximum ray tree depth from the scene file
    #[arg(long)]
    depth: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let scene_file = scene_file::load(&args.scene)
        .with_context(|| format!("loading scene from {}", args.scene.display()))?;

    let sample_count = if args.no_antialiasing { 1 } else { args.samples };
    let settings = RenderSettings {
        tile_size: args
            .tile_size
            .try_into()
            .context("tile size must be positive")?,
        sample_count: sample_count
            .try_into()
            .context("sample count must be positive")?,
        max_depth: match args.depth {
            Some(depth) => NonZeroU32::new(depth).context("depth must be positive")?,
            None => scene_file.max_depth,
        },
        trace: TraceSettings::default(),
    };

    let bar = ProgressBar::no_length();
    let mut render_progress = render(scene_file.scene, scene_file.camera, settings, |_| {}, {
        let bar = bar.clone();
        move |_, progress| {
            bar.update(|ps| {
                ps.set_len(progress.total as u64);
                ps.set_pos(progress.finished as u64)
            })
        }
    })?;
    bar.set_length(render_progress.progress().total as u64);

    render_progress.wait();
    bar.finish();

    render_progress
        .image()
        .lock()
        .expect("Poisoned lock!")
        .save(&args.output)
        .with_context(|| format!("saving image to {}", args.output.display()))?;

    Ok(())
}
