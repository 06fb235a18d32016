//! Dataset generator: writes maps, problem records and PDDL problem files
//! according to a TOML configuration.

use clap::Parser;
use gridmaps::config::{Config, DEFAULT_CONFIG_PATH};
use gridmaps::dataset::DatasetBuilder;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gridmaps", about = "Generate connected grid navigation maps and PDDL problems")]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seed for the map generator, overrides the configuration
    #[arg(short, long)]
    seed: Option<u64>,

    /// Use the debug profile
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config);
    if args.debug {
        config.run_debug_mode = true;
    }

    let rng = match args.seed.or(config.seed) {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let profile = config.active();
    let summary = DatasetBuilder::new(profile, rng).run()?;

    for c in &summary.configs {
        println!(
            "{:>3}x{:<3} {:>3}%  {:>4} maps  {:>6} problems  {}",
            c.rows,
            c.rows,
            c.obstacles_perc,
            c.maps,
            c.problems,
            c.records_path.display()
        );
    }
    println!(
        "Total: {} maps, {} problems",
        summary.total_maps(),
        summary.total_problems()
    );

    Ok(())
}
