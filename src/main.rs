//! Infinity Snake - cursor-following trail effect
//!
//! CLI commands:
//! - view: Open the landing window with the live trail overlay
//! - render: Replay a recorded trail and export it as SVG
//! - path: Print the synthesized curve of a recorded trail as JSON

mod color;
mod config;
mod effect;
mod gui;
mod logging;
mod svg;
mod trail;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::effect::TrailEffect;
use crate::trail::TrailBuffer;

#[derive(Parser)]
#[command(name = "infinity_snake")]
#[command(about = "A smooth gradient snake that follows the pointer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to snake.yaml config
    #[arg(short, long, default_value = "snake.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the native viewer (default)
    View,

    /// Replay a recorded trail and write it as an SVG document
    Render {
        /// Recorded samples (.json or .yaml list of {x, y})
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to snake-<timestamp>.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base hue of the gradient in degrees
        #[arg(long)]
        hue: Option<f32>,

        /// Surface width
        #[arg(long, default_value = "1000")]
        width: f32,

        /// Surface height
        #[arg(long, default_value = "1000")]
        height: f32,
    },

    /// Print the synthesized trail of a recording as JSON
    Path {
        /// Recorded samples (.json or .yaml list of {x, y})
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let env = config::EnvSettings::load();

    // Initialize logging first
    logging::init_logging(&env.log_dir)?;
    tracing::info!("Infinity Snake starting up");

    let cli = Cli::parse();
    tracing::debug!("CLI args parsed: config={:?}", cli.config);

    let config = Config::load_or_default(&cli.config)?;
    tracing::info!(
        "Config loaded: target_length={} stroke_width={}",
        config.trail.target_length,
        config.render.stroke_width
    );

    match cli.command.unwrap_or(Commands::View) {
        Commands::View => {
            tracing::info!("Launching native viewer");
            gui::run_viewer(config, env.screenshot_dir)?;
        }

        Commands::Render { input, output, hue, width, height } => {
            let output = output.unwrap_or_else(default_svg_name);
            render_svg(config, &input, &output, hue, width, height)?;
        }

        Commands::Path { input } => {
            print_path(&config, &input)?;
        }
    }

    Ok(())
}

/// Replay samples through a freshly mounted effect and export one frame
fn render_svg(
    mut config: Config,
    input: &Path,
    output: &Path,
    hue: Option<f32>,
    width: f32,
    height: f32,
) -> anyhow::Result<()> {
    let samples = trail::load_samples(input)?;
    if let Some(hue) = hue {
        config.render.start_hue = hue;
    }

    let now = Instant::now();
    let mut effect = TrailEffect::mount(&config, now);
    effect.resize(width, height);
    for sample in &samples {
        effect.pointer_moved(*sample);
    }

    let frame = effect.tick(now);
    tracing::info!(
        "Replayed {} samples: {} kept, {} trail points",
        samples.len(),
        effect.sample_count(),
        frame.trail.points.len()
    );
    if !frame.trail.is_drawable() {
        tracing::warn!("Trail has fewer than two points; SVG will be empty");
    }

    let document = svg::render_document(&frame, &config.render);
    std::fs::write(output, document)?;
    println!("Wrote {}", output.display());
    Ok(())
}

/// Print the synthesis result for a recording
fn print_path(config: &Config, input: &Path) -> anyhow::Result<()> {
    let samples = trail::load_samples(input)?;

    let mut buffer = TrailBuffer::from_config(&config.trail);
    let accepted = samples.iter().filter(|&&s| buffer.record(s)).count();
    tracing::debug!("{} of {} samples accepted", accepted, samples.len());

    let synthesized = trail::synthesize(buffer.samples(), config.trail.target_length);
    let data = serde_json::json!({
        "samples": buffer.len(),
        "trail": synthesized.summary(),
    });

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

fn default_svg_name() -> PathBuf {
    PathBuf::from(format!("snake-{}.svg", chrono::Local::now().format("%Y%m%d-%H%M%S")))
}
