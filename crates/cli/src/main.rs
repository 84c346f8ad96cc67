#![deny(unsafe_code)]
//! CLI binary for the metaballs engine.
//!
//! Subcommands:
//! - `render` — run the simulation N frames, write a PNG of the last frame
//! - `costs` — run the simulation N frames, print the cell cost grid

mod error;
mod snapshot;

use clap::{Parser, Subcommand};
use error::CliError;
use metaballs_core::SimConfig;
use metaballs_sim::{Raster, Recording, Simulation};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "metaballs", about = "Marching-squares metaballs CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N frames and write a PNG of the last frame.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 600)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 300)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Simulation parameters as a JSON string (resolution, ball_count,
        /// boundary_policy, launch_strength, ...).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Run the simulation for N frames and print the cell cost grid.
    Costs {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 600)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 1)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Simulation parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

fn build_sim(width: usize, height: usize, seed: u64, params: &str) -> Result<Simulation, CliError> {
    let params: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let config = SimConfig::from_json(width as f64, height as f64, &params)?;
    Ok(Simulation::new(config, seed)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render {
            width,
            height,
            frames,
            seed,
            output,
            params,
        } => {
            let mut sim = build_sim(width, height, seed, &params)?;
            let mut raster = Raster::new(width, height)?;
            (0..frames).try_for_each(|_| sim.step(&mut raster))?;

            snapshot::write_png(&raster, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "balls": sim.balls().len(),
                    "resolution": sim.grid().resolution(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {width}x{height} ({frames} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
        Command::Costs {
            width,
            height,
            frames,
            seed,
            params,
        } => {
            let mut sim = build_sim(width, height, seed, &params)?;
            let mut rec = Recording::new();
            for _ in 0..frames {
                rec.reset();
                sim.step(&mut rec)?;
            }

            let side = sim.grid().resolution() - 1;
            let cells = sim.grid().cells();
            // Cells are stored column-major; print row by row.
            let rows: Vec<Vec<u8>> = (0..side)
                .map(|row| (0..side).map(|col| cells[col * side + row].cost()).collect())
                .collect();

            if cli.json {
                let info = serde_json::json!({
                    "resolution": sim.grid().resolution(),
                    "frames": frames,
                    "seed": seed,
                    "balls": sim.balls().len(),
                    "costs": rows,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for row in rows {
                    let line: Vec<String> = row.iter().map(|c| format!("{c:2}")).collect();
                    println!("{}", line.join(" "));
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
