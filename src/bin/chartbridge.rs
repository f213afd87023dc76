use std::fs;
use std::path::{Path, PathBuf};

use chartbridge::memory::{MemoryDocument, RecordingLibrary};
use chartbridge::{BarData, BarOptions, BridgeConfig, ChartBridge};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chartbridge", version, about = "chartbridge - bar chart payload checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and validate bar chart payloads
    Check {
        /// Data payload JSON file
        #[arg(short, long)]
        data: PathBuf,

        /// Options payload JSON file (defaults to `{}`)
        #[arg(short, long)]
        options: Option<PathBuf>,

        /// Report shape problems as warnings instead of errors
        #[arg(long)]
        lenient: bool,
    },
    /// Draw the payloads on an in-memory canvas and print the resulting frame
    Draw {
        /// Data payload JSON file
        #[arg(short, long)]
        data: PathBuf,

        /// Options payload JSON file (defaults to `{}`)
        #[arg(short, long)]
        options: Option<PathBuf>,

        /// Canvas id to draw on
        #[arg(short, long, default_value = "chart")]
        canvas: String,

        /// Draw despite shape problems
        #[arg(long)]
        lenient: bool,
    },
    /// Print version info
    Version,
}

fn read_payload(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return "{}".to_string();
    };
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn config(lenient: bool) -> BridgeConfig {
    if lenient {
        BridgeConfig::lenient()
    } else {
        BridgeConfig::default()
    }
}

fn decode(data: &str, options: &str) -> (BarData, BarOptions) {
    let decoded = chartbridge::decode_data(data)
        .and_then(|d| chartbridge::decode_options(options).map(|o| (d, o)));
    match decoded {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            data,
            options,
            lenient,
        } => {
            let (data, options) = decode(
                &read_payload(Some(data.as_path())),
                &read_payload(options.as_deref()),
            );

            let issues: Vec<_> = data
                .validate()
                .into_iter()
                .chain(options.validate())
                .collect();
            for issue in &issues {
                let level = if lenient { "warning" } else { "error" };
                eprintln!(
                    "{}: {} payload field `{}`: {}",
                    level, issue.payload, issue.field, issue.message
                );
            }

            eprintln!(
                "{} labels, {} series, {} bars",
                data.labels.len(),
                data.datasets.len(),
                data.bar_count()
            );
            if !issues.is_empty() && config(lenient).strict {
                std::process::exit(1);
            }
        }
        Commands::Draw {
            data,
            options,
            canvas,
            lenient,
        } => {
            let data = read_payload(Some(data.as_path()));
            let options = read_payload(options.as_deref());

            let document = MemoryDocument::new().with_canvas(&canvas);
            let bridge = ChartBridge::with_config(document, RecordingLibrary::new(), config(lenient));

            let drawn = bridge
                .construct(&canvas)
                .and_then(|mut chart| bridge.draw_bar(&mut chart, &data, &options).map(|_| ()));
            if let Err(e) = drawn {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }

            let frame = bridge.document().canvas(&canvas).and_then(|c| c.frame());
            match serde_json::to_string_pretty(&frame) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Version => {
            println!("chartbridge {}", chartbridge::version());
        }
    }
}
