//! Labeled sample frame generator
//!
//! Generates background-only and track frames for classifier training,
//! saves each kind to its own archive and optionally writes preview mosaics
//! of randomly chosen frames.
//!
//! Usage:
//! ```
//! cargo run --release --bin generate_sample_frames -- [OPTIONS]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};
use shared::image_proc::frame_statistics;
use simulator::preview::save_preview;
use simulator::shared_args::{SynthesizerArgs, TrackModelArgs};
use simulator::{FrameKind, FrameSynthesizer, SimulationConfig, TrackModel};

/// Command-line arguments for sample frame generation
#[derive(Parser, Debug)]
#[command(
    name = "Sample Frame Generator",
    about = "Generates labeled background and particle-track frames",
    long_about = None
)]
struct Args {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    synth: SynthesizerArgs,

    #[command(flatten)]
    track: TrackModelArgs,

    /// Random seed for reproducibility (drawn at random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the frame archives
    #[arg(short = 'o', long, default_value = "samples")]
    output_dir: PathBuf,

    /// Generate frames on all cores, seeding each frame from the base seed
    #[arg(long)]
    parallel: bool,

    /// Write preview mosaics of randomly chosen frames
    #[arg(long)]
    preview: bool,

    /// Frames per preview mosaic (default: one tenth of the frame count)
    #[arg(long)]
    preview_count: Option<usize>,

    /// Write the effective configuration as JSON to this path
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let base = match &args.config {
        Some(path) => SimulationConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let config = SimulationConfig {
        synthesizer: args.synth.apply(base.synthesizer),
        track_model: args.track.apply(base.track_model),
    };

    if let Some(path) = &args.write_config {
        config
            .save_to_file(path)
            .with_context(|| format!("writing config to {}", path.display()))?;
    }

    let track_model = TrackModel::new(config.track_model.clone())?;
    let mut synth = FrameSynthesizer::new(config.synthesizer.clone(), Some(track_model))?;

    let seed = args.seed.unwrap_or_else(|| thread_rng().next_u64());
    log::info!("Using seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    if args.parallel {
        synth.generate_background_parallel(seed);
        synth.generate_tracks_parallel(seed.wrapping_add(synth.config().n_frames as u64));
    } else {
        synth.generate_background(&mut rng);
        synth.generate_tracks(&mut rng);
    }

    println!("Sample Frame Generator");
    println!("======================");
    println!("Seed: {seed}");
    println!(
        "Frame size: {}x{}",
        synth.config().n_row,
        synth.config().n_col
    );
    for kind in FrameKind::ALL {
        let frames = synth.frames(kind);
        if let Some(stats) = frame_statistics(frames) {
            println!(
                "  {kind}: {} frames, mean {:.3}, variance {:.3}, max {}",
                frames.len(),
                stats.mean,
                stats.variance,
                stats.max
            );
        }
    }

    let report = synth
        .save(&args.output_dir)
        .with_context(|| format!("saving frames to {}", args.output_dir.display()))?;
    for path in &report.written {
        println!("Saved {}", path.display());
    }

    if args.preview {
        let count = args
            .preview_count
            .unwrap_or(synth.config().n_frames / 10)
            .max(1);
        for kind in FrameKind::ALL {
            let path = args.output_dir.join(format!("preview_{kind}.png"));
            match save_preview(synth.frames(kind), count, &path, &mut rng) {
                Ok(grid) => println!(
                    "Preview of {kind} frames: {}x{} grid in {}",
                    grid.rows,
                    grid.cols,
                    path.display()
                ),
                Err(e) => log::error!("Preview of {kind} frames failed: {e}"),
            }
        }
    }

    Ok(())
}
