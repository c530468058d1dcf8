//! RailSim CLI - probe virtual breadboard projects from the command line.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use railsim::board::builtin::all_profiles;
use railsim::contract::describe_level;
use railsim::{Actuation, LevelState, Netlist, PinRef, RailSimError, Workbench};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Exit code when the board is not powered.
const EXIT_UNPOWERED: i32 = 2;

#[derive(Parser)]
#[command(name = "railsim")]
#[command(about = "Voltage-rail tracer for virtual breadboard projects", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log output (-v debug, -vv trace); otherwise RUST_LOG applies
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the level at one or more terminals
    Probe {
        /// Path to a project .json file
        #[arg(value_name = "PROJECT")]
        project: PathBuf,

        /// Terminals to probe, e.g. btn1:SIG or board:GP2
        #[arg(value_name = "OWNER:PIN", required = true)]
        pins: Vec<String>,

        /// Apply an actuation before probing, e.g. btn1=press
        #[arg(long = "set", value_name = "OWNER=ACTUATION")]
        set: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Report whether the board is powered (exit code 2 if not)
    Power {
        /// Path to a project .json file
        #[arg(value_name = "PROJECT")]
        project: PathBuf,

        /// Apply an actuation first, e.g. sw1=toggle
        #[arg(long = "set", value_name = "OWNER=ACTUATION")]
        set: Vec<String>,
    },

    /// Print every net and its resolved level
    Nets {
        /// Path to a project .json file
        #[arg(value_name = "PROJECT")]
        project: PathBuf,

        /// Apply an actuation before the snapshot, e.g. pot1=ratio:0.3
        #[arg(long = "set", value_name = "OWNER=ACTUATION")]
        set: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List built-in board profiles
    Boards {
        /// Also list every pin of each board
        #[arg(short, long)]
        pins: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripts
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Probe {
            project,
            pins,
            set,
            format,
        } => report(handle_probe(&project, &pins, &set, &format)),
        Commands::Power { project, set } => match handle_power(&project, &set) {
            Ok(true) => 0,
            Ok(false) => EXIT_UNPOWERED,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                1
            }
        },
        Commands::Nets {
            project,
            set,
            format,
        } => report(handle_nets(&project, &set, &format)),
        Commands::Boards { pins } => {
            handle_boards(pins);
            0
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Load a project and apply `OWNER=ACTUATION` overrides in order.
fn load_bench(path: &Path, sets: &[String]) -> Result<Workbench> {
    let mut bench = Workbench::load(path)
        .with_context(|| format!("Failed to load project {}", path.display()))?;

    for entry in sets {
        let Some((id, action)) = entry.split_once('=') else {
            bail!("Expected OWNER=ACTUATION, got '{}'", entry);
        };
        let action: Actuation = action.parse()?;
        bench
            .actuate(id.trim(), action)
            .with_context(|| format!("Failed to apply '{}'", entry))?;
        tracing::debug!("Applied {} to {}", action, id.trim());
    }

    Ok(bench)
}

fn handle_probe(path: &Path, pins: &[String], sets: &[String], format: &OutputFormat) -> Result<()> {
    let bench = load_bench(path, sets)?;
    let targets = pins
        .iter()
        .map(|text| PinRef::parse(text).ok_or_else(|| RailSimError::BadEndpoint(text.clone())))
        .collect::<Result<Vec<_>, _>>()?;

    let tracer = bench.tracer();
    let levels: Vec<(PinRef, f64)> = targets
        .into_iter()
        .map(|pin| {
            let level = tracer.pin_level(&pin);
            (pin, level)
        })
        .collect();

    match format {
        OutputFormat::Human => {
            let width = levels.iter().map(|(pin, _)| pin.to_string().len()).max().unwrap_or(0);
            for (pin, level) in &levels {
                println!("{:<width$}  {}", pin.to_string(), describe_level(*level), width = width);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "powered": tracer.is_board_powered(),
                "pins": levels.iter().map(|(pin, level)| {
                    serde_json::json!({
                        "pin": pin.to_string(),
                        "level": level,
                        "state": LevelState::from_level(*level),
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn handle_power(path: &Path, sets: &[String]) -> Result<bool> {
    let bench = load_bench(path, sets)?;
    match bench.tracer().powering_battery() {
        Some(battery) => {
            println!("Board {} is powered by {}", bench.board().profile().name, battery);
            Ok(true)
        }
        None => {
            println!("Board {} is not powered", bench.board().profile().name);
            Ok(false)
        }
    }
}

fn handle_nets(path: &Path, sets: &[String], format: &OutputFormat) -> Result<()> {
    let bench = load_bench(path, sets)?;
    let netlist = Netlist::snapshot(&bench);

    match format {
        OutputFormat::Human => {
            match &netlist.powering_battery {
                Some(battery) => println!("Powered by {}", battery),
                None => println!("Not powered"),
            }
            println!("{}", "─".repeat(60));
            for (i, net) in netlist.nets.iter().enumerate() {
                println!("Net {} [{}]", i + 1, describe_level(net.level));
                for member in &net.members {
                    println!("    {}", member);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&netlist)?),
    }
    Ok(())
}

fn handle_boards(pins: bool) {
    println!("Built-in boards:\n");

    for profile in all_profiles() {
        println!("  {}", profile.name);
        if let Some(ref description) = profile.description {
            println!("    {}", description);
        }
        if pins {
            println!("    {}", profile.pins.join(", "));
        }
        println!();
    }
}
