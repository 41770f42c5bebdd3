//! Fairplay CLI
//!
//! Validates schedules, reports pair repetition, scores and searches tier
//! partitions, and replays result files into standings.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use fairplay::console::init_with_level;
use fairplay::{
    analyze_tier, FairplayConfig, MatchResult, PairingHistory, PlayerId, Schedule, Standings,
    ThreadCount, TierSearch,
};
use tracing::info;

mod output;

#[derive(Parser)]
#[command(name = "fairplay")]
#[command(version, about = "Fairness checks and standings for doubles tournaments", long_about = None)]
struct Cli {
    /// Log search improvements and rejected results
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a schedule's structure and print its shape
    Validate {
        /// Schedule JSON file
        schedule: PathBuf,
    },

    /// Report partner and opponent repetition
    Pairs {
        /// Schedule JSON file
        schedule: PathBuf,

        #[command(flatten)]
        format: Format,
    },

    /// Score one top/bottom tier split
    Analyze {
        /// Schedule JSON file
        schedule: PathBuf,

        /// Top tier player ids, comma separated
        #[arg(long, value_delimiter = ',', default_value = "")]
        top: Vec<String>,

        /// Bottom tier player ids, comma separated
        #[arg(long, value_delimiter = ',', default_value = "")]
        bottom: Vec<String>,

        #[command(flatten)]
        format: Format,
    },

    /// Search for the tier split with the fewest violations
    Search {
        /// Schedule JSON file
        schedule: PathBuf,

        /// Search configuration (TOML or YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Random seed (overrides the configuration)
        #[arg(long)]
        seed: Option<u64>,

        /// Worker threads; 1 runs on the calling thread
        #[arg(long)]
        threads: Option<usize>,

        /// Trials per size combination (overrides the configuration)
        #[arg(long)]
        trials: Option<u32>,

        /// Stop after this many seconds and report the best so far
        #[arg(long)]
        time_limit: Option<u64>,

        #[command(flatten)]
        format: Format,
    },

    /// Replay a results file into the leaderboard
    Standings {
        /// Schedule JSON file
        schedule: PathBuf,

        /// Results JSON file (array of match results)
        results: PathBuf,

        /// Apply iron-player display scaling
        #[arg(long)]
        display: bool,

        #[command(flatten)]
        format: Format,
    },
}

#[derive(Args, Clone, Copy)]
struct Format {
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::level_filters::LevelFilter::INFO,
        _ => tracing::level_filters::LevelFilter::DEBUG,
    };
    init_with_level(level);

    match cli.command {
        Commands::Validate { schedule } => validate(&schedule),
        Commands::Pairs { schedule, format } => pairs(&schedule, format),
        Commands::Analyze {
            schedule,
            top,
            bottom,
            format,
        } => analyze(&schedule, &top, &bottom, format),
        Commands::Search {
            schedule,
            config,
            seed,
            threads,
            trials,
            time_limit,
            format,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                config = config.with_random_seed(seed);
            }
            if let Some(threads) = threads {
                config = config.with_thread_count(match threads {
                    0 => bail!("--threads must be at least 1"),
                    1 => ThreadCount::None,
                    n => ThreadCount::Count(n),
                });
            }
            if let Some(trials) = trials {
                config.search.trials_per_combination = trials;
            }
            if let Some(seconds) = time_limit {
                config = config.with_termination_seconds(seconds);
            }
            config.validate()?;
            search(&schedule, &config, format)
        }
        Commands::Standings {
            schedule,
            results,
            display,
            format,
        } => standings(&schedule, &results, display, format),
    }
}

fn load_schedule(path: &Path) -> Result<Schedule> {
    let schedule = Schedule::load(path)
        .with_context(|| format!("failed to load schedule {}", path.display()))?;
    Ok(schedule)
}

fn load_config(path: Option<&Path>) -> Result<FairplayConfig> {
    let Some(path) = path else {
        return Ok(FairplayConfig::load(fairplay::CONFIG_FILE).unwrap_or_default());
    };
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let config = if is_yaml {
        FairplayConfig::from_yaml_file(path)
    } else {
        FairplayConfig::from_toml_file(path)
    };
    config.with_context(|| format!("failed to load config {}", path.display()))
}

fn validate(path: &Path) -> Result<()> {
    let schedule = load_schedule(path)?;
    let universe = schedule
        .validate()
        .with_context(|| format!("{} is not a valid schedule", path.display()))?;

    print!("{}", output::schedule_summary(&schedule, &universe));
    Ok(())
}

fn pairs(path: &Path, format: Format) -> Result<()> {
    let schedule = load_schedule(path)?;
    let history = PairingHistory::build(&schedule)?;

    if format.json {
        println!("{}", serde_json::to_string_pretty(&output::pair_report_json(&history))?);
    } else {
        print!("{}", output::pair_report(&history));
    }
    Ok(())
}

fn analyze(path: &Path, top: &[String], bottom: &[String], format: Format) -> Result<()> {
    let schedule = load_schedule(path)?;
    let top = parse_ids(top)?;
    let bottom = parse_ids(bottom)?;
    let report = analyze_tier(&schedule, &top, &bottom)?;

    if format.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::violation_report(&report));
    }
    Ok(())
}

fn parse_ids(raw: &[String]) -> Result<Vec<PlayerId>> {
    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map(PlayerId::new)
                .with_context(|| format!("'{s}' is not a player id"))
        })
        .collect()
}

fn search(path: &Path, config: &FairplayConfig, format: Format) -> Result<()> {
    let schedule = load_schedule(path)?;
    let outcome = TierSearch::from_config(config).solve(&schedule)?;

    if format.json {
        println!("{}", serde_json::to_string_pretty(&output::search_json(&outcome))?);
    } else {
        print!("{}", output::search_summary(&outcome));
    }
    Ok(())
}

fn standings(schedule_path: &Path, results_path: &Path, display: bool, format: Format) -> Result<()> {
    let schedule = load_schedule(schedule_path)?;
    let raw = std::fs::read_to_string(results_path)
        .with_context(|| format!("failed to read results {}", results_path.display()))?;
    let results = MatchResult::list_from_json_str(&raw)?;

    let mut standings = Standings::new(schedule.into())?;
    for result in results {
        let key = (result.round, result.court);
        standings
            .record_result(result)
            .with_context(|| format!("result for round {}, court {} rejected", key.0, key.1))?;
    }
    info!("Replayed {} results", standings.result_count());

    match (display, format.json) {
        (false, false) => print!("{}", output::standings_table(&standings.compute_standings())),
        (false, true) => println!(
            "{}",
            serde_json::to_string_pretty(&standings.compute_standings())?
        ),
        (true, false) => print!(
            "{}",
            output::display_standings_table(&standings.compute_display_standings())
        ),
        (true, true) => println!(
            "{}",
            serde_json::to_string_pretty(&standings.compute_display_standings())?
        ),
    }
    Ok(())
}
