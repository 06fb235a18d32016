//! Reader for JSONL problem records
//!
//! Rebuilds every map from its record, checks that the free cells form one
//! connected region and that both endpoints are distinct free cells, and
//! prints the map with its source and target marked.

use clap::Parser;
use gridmaps::record::{read_records, ProblemRecord};
use gridmaps::Map;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "inspect_records", about = "Check and render problem records")]
struct Args {
    /// Records file written by gridmaps (maps_<r>x<r>_<perc>.json)
    file: PathBuf,

    /// Only render the first N records (all records are still checked)
    #[arg(short, long)]
    limit: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let records = match read_records(&args.file) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.file.display(), e);
            process::exit(1);
        }
    };

    println!("=== Problem Records: {} ===", args.file.display());
    println!("Records: {}\n", records.len());

    let limit = args.limit.unwrap_or(records.len());
    let mut failures = 0;

    for (i, record) in records.iter().enumerate() {
        match check_record(record) {
            Ok(map) => {
                if i < limit {
                    println!("{}", render(record, &map));
                }
            }
            Err(e) => {
                failures += 1;
                println!("{} FAILED: {}\n", record.problem, e);
            }
        }
    }

    println!("=== Summary ===");
    println!("Checked: {}", records.len());
    println!("Failed: {}", failures);

    if failures > 0 {
        process::exit(1);
    }
}

fn check_record(record: &ProblemRecord) -> Result<Map, String> {
    let map = Map::from_array(record.map.clone()).map_err(|e| e.to_string())?;
    if !map.graph().crossable_region_is_connected() {
        return Err("free cells are not connected".to_string());
    }

    let (source, target) = record.source_destination;
    if source == target {
        return Err(format!("source and target are both {}", source));
    }
    for node in [source, target] {
        if !map.is_crossable(node) {
            return Err(format!("node {} is not crossable", node));
        }
    }
    Ok(map)
}

fn render(record: &ProblemRecord, map: &Map) -> String {
    let (source, target) = record.source_destination;
    let mut result = String::new();

    result.push_str(&format!(
        "{}: {}x{} at {}%, c{} -> c{}\n",
        record.problem,
        map.width(),
        map.height(),
        map.obstacles_perc(),
        source,
        target
    ));

    for row in 0..map.height() {
        for col in 0..map.width() {
            let node = map.graph().node_id(row, col);
            let symbol = if node == source {
                'S'
            } else if node == target {
                'T'
            } else if map.is_crossable(node) {
                '.'
            } else {
                '█'
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}
