//! Voltbench CLI - netlist export, node inspection, probing and simulation
//! against a circuit document file.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;

use voltbench::prelude::*;
use voltbench::{GridPoint, HttpSolver};

#[derive(Parser)]
#[command(name = "voltbench")]
#[command(about = "Circuit netlist consolidation and DC simulation tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the textual netlist for a circuit document
    Export {
        /// Path to a circuit document (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List every terminal and junction with its resolved node name
    Nodes {
        /// Path to a circuit document (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Resolve a terminal (R1.n1) or junction (x,y) to its node name
    Probe {
        /// Path to a circuit document (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Probe target: `<component>.<n1|n2>` or `<x>,<y>`
        #[arg(value_name = "TARGET")]
        target: String,

        /// Solve first and report the probed voltage
        #[arg(long)]
        simulate: bool,

        /// Solver base URL
        #[arg(long, default_value = "http://localhost:8000")]
        url: String,
    },

    /// Send the consolidated netlist to the solver and print the result
    Simulate {
        /// Path to a circuit document (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Solver base URL
        #[arg(long, default_value = "http://localhost:8000")]
        url: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Export { file } => handle_export(&file),
        Commands::Nodes { file, format } => handle_nodes(&file, format),
        Commands::Probe {
            file,
            target,
            simulate,
            url,
        } => handle_probe(&file, &target, simulate, &url).await,
        Commands::Simulate { file, url, format } => {
            handle_simulate(&file, &url, format).await
        }
    };

    process::exit(exit_code);
}

fn load(file: &Path) -> Result<CircuitDocument, i32> {
    voltbench::load_document(file).map_err(|e| {
        eprintln!("Error: {}", e);
        1
    })
}

fn handle_export(file: &Path) -> i32 {
    match load(file) {
        Ok(doc) => {
            print!("{}", voltbench::netlist_text(&doc));
            0
        }
        Err(code) => code,
    }
}

fn handle_nodes(file: &Path, format: OutputFormat) -> i32 {
    let doc = match load(file) {
        Ok(doc) => doc,
        Err(code) => return code,
    };
    let resolution = voltbench::resolve(&doc);

    match format {
        OutputFormat::Human => {
            for (key, node) in resolution.assignments() {
                println!("{} -> {}", key, node);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = resolution
                .assignments()
                .iter()
                .map(|(key, node)| {
                    serde_json::json!({ "key": key, "node": node })
                })
                .collect();
            match serde_json::to_string_pretty(&entries) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return 1;
                }
            }
        }
    }
    0
}

/// Parse `R1.n1` / `R1.n2` or a junction coordinate `x,y`.
fn parse_target(raw: &str) -> Result<Endpoint, String> {
    if let Some((x, y)) = raw.split_once(',') {
        let x = x.trim().parse::<i32>().map_err(|_| bad_target(raw))?;
        let y = y.trim().parse::<i32>().map_err(|_| bad_target(raw))?;
        return Ok(Endpoint::Junction(GridPoint::new(x, y)));
    }
    let (component, slot) = raw.rsplit_once('.').ok_or_else(|| bad_target(raw))?;
    let slot = match slot.to_ascii_lowercase().as_str() {
        "n1" => Slot::N1,
        "n2" => Slot::N2,
        _ => return Err(bad_target(raw)),
    };
    if component.is_empty() {
        return Err(bad_target(raw));
    }
    Ok(Endpoint::Terminal(TerminalRef::new(component, slot)))
}

fn bad_target(raw: &str) -> String {
    format!(
        "invalid probe target '{}': expected <component>.<n1|n2> or <x>,<y>",
        raw
    )
}

async fn handle_probe(file: &Path, target: &str, simulate: bool, url: &str) -> i32 {
    let doc = match load(file) {
        Ok(doc) => doc,
        Err(code) => return code,
    };
    let target = match parse_target(target) {
        Ok(target) => target,
        Err(message) => {
            eprintln!("Error: {}", message);
            return 1;
        }
    };

    let mut bench = Workbench::with_document(doc);
    if simulate {
        let solver = HttpSolver::default().with_url(url.to_string());
        if let Err(e) = bench.solve_with(&solver).await {
            eprintln!("Error: {}", e);
            return 1;
        }
    }

    match bench.probe(&target) {
        Ok(reading) => {
            match reading.voltage {
                Some(volts) => println!("{} = node {} ({} V)", target, reading.node, volts),
                None => println!("{} = node {}", target, reading.node),
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn handle_simulate(file: &Path, url: &str, format: OutputFormat) -> i32 {
    let doc = match load(file) {
        Ok(doc) => doc,
        Err(code) => return code,
    };

    let mut bench = Workbench::with_document(doc);
    let solver = HttpSolver::default().with_url(url.to_string());
    let result = match bench.solve_with(&solver).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        },
        OutputFormat::Human => {
            let mut nodes: Vec<_> = result.node_voltages.iter().collect();
            nodes.sort_by(|a, b| a.0.cmp(b.0));
            println!("Node voltages:");
            for (node, volts) in nodes {
                println!("  {:>6}  {:.6} V", node, volts);
            }

            let mut elements: Vec<_> = result.elements.iter().collect();
            elements.sort_by(|a, b| a.0.cmp(b.0));
            println!("Elements:");
            for (name, report) in elements {
                println!(
                    "  {:>6}  V={:.6}  I={:.6}  P={:.6}",
                    name, report.voltage, report.current, report.power
                );
            }

            if let Some(resistance) = result.equivalent_resistance {
                println!("Equivalent resistance: {:.3} ohm", resistance);
            }
        }
    }
    0
}
