//! Thin driver: load airport/job/filter JSON snapshots, run the engine,
//! print what a renderer would consume.

use anyhow::{Context, Result};
use clap::Parser;
use routelens_core::{AirportIndex, FilterConfig, Job, MarkerTier};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Airport reference table (code -> {lat, lon, type})
    #[arg(long)]
    airports: PathBuf,

    /// Job snapshot (id -> job record)
    #[arg(long)]
    jobs: PathBuf,

    /// Filter configuration
    #[arg(long)]
    filter: PathBuf,

    /// Emit the raw result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let airports: AirportIndex = load_json(&args.airports).context("loading airport table")?;
    let jobs: HashMap<String, Job> = load_json(&args.jobs).context("loading job snapshot")?;
    let config: FilterConfig = load_json(&args.filter).context("loading filter config")?;

    let out = routelens_core::run(&jobs, &config, &airports)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut markers: Vec<&String> = out.airports.iter().collect();
    markers.sort();
    println!("airports ({}):", markers.len());
    for code in markers {
        let tier = match routelens_core::marker_tier(code, &config) {
            MarkerTier::Selected => " [selected]",
            MarkerTier::Rentable => " [rentable]",
            MarkerTier::Base => "",
        };
        println!("  {code}{tier}");
    }

    let mut legs: Vec<_> = out.legs.iter().collect();
    legs.sort_by(|a, b| a.0.to_string().cmp(&b.0.to_string()));
    println!("legs ({}):", legs.len());
    for (key, leg) in legs {
        println!(
            "  {key}  {:>5} {unit:?}  ${:>10.2}  {:>5} {dist_unit:?}  {} jobs",
            leg.amount,
            leg.pay,
            leg.distance,
            leg.jobs.len(),
            unit = config.unit,
            dist_unit = config.distance_unit,
        );
    }
    println!("max amount: {}", out.max_amount);

    Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
