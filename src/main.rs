// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use depth_focus::Config;
use depth_focus::constants::app_info;
use depth_focus::app::utils::{parse_point, parse_resolution};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "depth-focus")]
#[command(about = "Track the nearest object in a depth stream and derive a focus point")]
#[command(version = app_info::version())]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a raw f32 depth recording through the tracker
    Replay {
        /// Recording file (little-endian f32 frames, row-major)
        file: PathBuf,

        /// Depth frame size
        #[arg(short, long, value_parser = parse_resolution, default_value = "256x192")]
        size: (u32, u32),

        /// Camera resolution to remap centroids into
        #[arg(short, long, value_parser = parse_resolution)]
        camera: Option<(u32, u32)>,

        /// Write a depth preview with the fPOI marker (file or directory)
        #[arg(short, long)]
        overlay: Option<PathBuf>,
    },

    /// Track a synthetic orbiting target
    Synthetic {
        /// Number of frames to generate
        #[arg(short, long, default_value = "240")]
        frames: usize,

        /// Depth frame size
        #[arg(short, long, value_parser = parse_resolution, default_value = "256x192")]
        size: (u32, u32),

        /// Camera resolution
        #[arg(short, long, value_parser = parse_resolution, default_value = "1920x1440")]
        camera: (u32, u32),

        /// Leftmost columns reported as sensor dropout (NaN)
        #[arg(long, default_value = "0")]
        dropout: u32,

        /// Run paced at sensor rate on a capture thread (Ctrl+C to stop)
        #[arg(short, long)]
        live: bool,
    },

    /// Remap a depth-space point into camera space
    Remap {
        /// Point as X,Y
        #[arg(short, long, value_parser = parse_point)]
        point: (f64, f64),

        /// Source resolution
        #[arg(short, long, value_parser = parse_resolution)]
        from: (u32, u32),

        /// Target resolution
        #[arg(short, long, value_parser = parse_resolution)]
        to: (u32, u32),
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        write_default: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=depth_focus=trace, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::default_path);
    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Replay {
            file,
            size,
            camera,
            overlay,
        } => cli::replay(&config, &file, size, camera, overlay),
        Commands::Synthetic {
            frames,
            size,
            camera,
            dropout,
            live,
        } => {
            if live {
                cli::synthetic_live(&config, frames, size, dropout)
            } else {
                cli::synthetic(&config, frames, size, camera, dropout)
            }
        }
        Commands::Remap { point, from, to } => cli::remap_point(point, from, to),
        Commands::Config { write_default } => {
            cli::show_config(&config, config_path.as_deref(), write_default)
        }
    }
}
