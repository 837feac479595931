use cache_simulator::generator::{TrafficConfig, TrafficGenerator};
use cache_simulator::models::{parse_modes, parse_policies, CacheMode, SimulationConfig};
use cache_simulator::runner::SimulationRunner;
use cache_simulator::stats::SimulationStats;
use clap::{Parser, Subcommand};
use response_cache::config::capacity_from_signed;
use std::path::PathBuf;

/// Response cache simulator CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay traces through the response caches
    Simulate {
        /// Trace files or directories of trace files
        #[arg(short, long, value_name = "PATH", num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        /// Cache capacity (number of resident query indices)
        #[arg(short, long, default_value = "10000", allow_negative_numbers = true)]
        capacity: i64,

        /// Policies to simulate (lru, lfu). All of them when omitted
        #[arg(short, long, value_name = "POLICIES", num_args = 1.., value_delimiter = ',')]
        policies: Option<Vec<String>>,

        /// Cache mode: sequential, concurrent, or both
        #[arg(long, default_value = "sequential")]
        mode: String,

        /// Worker threads sharing the cache in concurrent mode
        #[arg(long, default_value = "4")]
        threads: usize,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Generate a synthetic trace
    Generate {
        /// Output file
        #[arg(short, long, default_value = "trace.csv")]
        output: PathBuf,

        /// Number of requests
        #[arg(long, default_value = "100000")]
        requests: u64,

        /// Requests per second
        #[arg(long, default_value = "100")]
        rps: u32,

        /// Number of distinct query indices
        #[arg(long, default_value = "10000")]
        queries: u32,

        /// Percentage of traffic aimed at the hot set
        #[arg(long, default_value = "80")]
        popular_traffic: u8,

        /// Percentage of query indices in the hot set
        #[arg(long, default_value = "20")]
        popular_queries: u8,

        /// Minimum response size in bytes
        #[arg(long, default_value = "128")]
        min_size: usize,

        /// Maximum response size in bytes
        #[arg(long, default_value = "4096")]
        max_size: usize,

        /// Seed for a reproducible trace
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Commands::Generate {
            output,
            requests,
            rps,
            queries,
            popular_traffic,
            popular_queries,
            min_size,
            max_size,
            seed,
        } => {
            let config = TrafficConfig {
                requests,
                rps,
                unique_queries: queries,
                popular_traffic_percent: popular_traffic,
                popular_queries_percent: popular_queries,
                min_size,
                max_size,
                seed,
                output,
            };
            TrafficGenerator::new(config).generate()?;
            Ok(())
        }

        Commands::Simulate {
            input,
            capacity,
            policies,
            mode,
            threads,
            output_csv,
        } => {
            let config = SimulationConfig {
                inputs: input,
                capacity: capacity_from_signed(capacity)?,
                policies: parse_policies(policies.as_deref())?,
                modes: parse_modes(&mode)?,
                threads,
            };
            run_simulation(config, output_csv)
        }
    }
}

fn run_simulation(
    config: SimulationConfig,
    output_csv: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let both_modes = config.modes.contains(&CacheMode::Sequential)
        && config.modes.contains(&CacheMode::Concurrent);

    println!("Running simulation:");
    println!("  Capacity: {}", config.capacity);
    println!(
        "  Policies: {}",
        config
            .policies
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Modes: {}",
        config
            .modes
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if config.modes.contains(&CacheMode::Concurrent) {
        println!("  Threads: {}", config.threads);
    }

    let result = SimulationRunner::new(config).run()?;
    let stats = SimulationStats::new(&result);
    stats.print_summary();
    if both_modes {
        stats.print_comparison();
    }

    if let Some(path) = output_csv {
        stats.export_csv(&path)?;
        println!("\nResults exported to {}", path.display());
    }

    Ok(())
}
