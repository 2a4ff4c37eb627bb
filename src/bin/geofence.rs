use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use geofence::mission::{read_waypoints, MissionOptions};
use geofence::planar::GeoPlanar;
use geofence::poly::{load_poly, save_poly};
use geofence::{GeofenceBuilder, GeofenceConfig, DEFAULT_REFINE_TOLERANCE};

#[derive(Parser)]
#[command(name = "geofence")]
#[command(about = "Build a geofence corridor around a planned mission path", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Buffer a mission's path into a .poly geofence
    Build {
        /// QGC WPL mission file
        #[arg(short, long)]
        mission: PathBuf,

        /// Output .poly file (overwritten)
        #[arg(short, long)]
        output: PathBuf,

        /// Corridor half-width in meters. Overrides the config file.
        #[arg(short, long)]
        buffer: Option<f64>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also run the refinement pass, optionally at this tolerance in degrees
        #[arg(long)]
        refine: Option<Option<f64>>,

        /// Ignore mission items positioned at 0, 0
        #[arg(long)]
        skip_zero: bool,
    },
    /// Simplify an existing .poly geofence further
    Refine {
        /// Input .poly file
        #[arg(short, long)]
        input: PathBuf,

        /// Output .poly file (overwritten)
        #[arg(short, long)]
        output: PathBuf,

        /// Tolerance in degrees
        #[arg(short, long, default_value_t = DEFAULT_REFINE_TOLERANCE)]
        tolerance: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Build {
            mission,
            output,
            buffer,
            config,
            refine,
            skip_zero,
        } => {
            let mut config = match config {
                Some(path) => {
                    let json = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    GeofenceConfig::from_json_str(&json)
                        .with_context(|| format!("parsing {}", path.display()))?
                }
                None => GeofenceConfig::default(),
            };
            if let Some(buffer) = buffer {
                config.buffer_meters = buffer;
            }
            // A bare --refine keeps the configured tolerance
            if let Some(Some(tolerance)) = refine {
                config.refine_tolerance = tolerance;
            }

            let options = MissionOptions {
                skip_zero_coordinates: skip_zero,
            };
            let waypoints = read_waypoints(&mission, options)
                .with_context(|| format!("reading mission {}", mission.display()))?;

            let builder = GeofenceBuilder::new(config);
            let geofence = if refine.is_some() {
                builder.build_refined(&waypoints)
            } else {
                builder.build(&waypoints)
            }
            .context("building geofence")?;

            save_poly(&geofence, &output)
                .with_context(|| format!("writing {}", output.display()))?;
        }
        Commands::Refine {
            input,
            output,
            tolerance,
        } => {
            let geofence =
                load_poly(&input).with_context(|| format!("reading {}", input.display()))?;
            let before = geofence.num_vertices();
            let refined = geofence
                .refine(&GeoPlanar, tolerance)
                .context("refining geofence")?;
            info!(
                "Refined {before} vertices down to {}",
                refined.num_vertices()
            );

            save_poly(&refined, &output)
                .with_context(|| format!("writing {}", output.display()))?;
        }
    }

    Ok(())
}
