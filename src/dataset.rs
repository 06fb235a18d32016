//! Batch generation of map datasets.
//!
//! For every `(rows, obstacle_perc)` combination of the active profile the
//! driver collects distinct square maps, samples source/target pairs on each,
//! and writes one JSON record per problem to
//! `<maps_dir>/maps_<rows>x<rows>_<perc>.json` plus one problem file
//! `<pddl_dir>/<problem-id>.<ext>`. Problem ids run across the whole dataset.

use crate::config::DatasetConfig;
use crate::error::DatasetError;
use crate::map::{Map, MapArray, MapParams};
use crate::pddl::encode_problem;
use crate::record::{problem_id, ProblemRecord, RecordWriter};
use crate::sampler::sample_pairs;
use log::{debug, info, warn};
use rand::Rng;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Counts for one `(rows, obstacle_perc)` configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSummary {
    pub rows: usize,
    pub obstacles_perc: u32,
    pub maps: usize,
    pub problems: usize,
    pub records_path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub configs: Vec<ConfigSummary>,
}

impl DatasetSummary {
    pub fn total_maps(&self) -> usize {
        self.configs.iter().map(|c| c.maps).sum()
    }

    pub fn total_problems(&self) -> usize {
        self.configs.iter().map(|c| c.problems).sum()
    }
}

/// Writes a dataset described by a `DatasetConfig`
pub struct DatasetBuilder<'a, R: Rng> {
    config: &'a DatasetConfig,
    rng: R,
    next_index: usize,
}

impl<'a, R: Rng> DatasetBuilder<'a, R> {
    pub fn new(config: &'a DatasetConfig, rng: R) -> Self {
        DatasetBuilder {
            config,
            rng,
            next_index: 0,
        }
    }

    /// Generate every configuration and write it to disk
    pub fn run(mut self) -> Result<DatasetSummary, DatasetError> {
        self.config.validate()?;
        fs::create_dir_all(&self.config.maps_dir)?;
        fs::create_dir_all(&self.config.pddl_dir)?;

        let mut summary = DatasetSummary::default();
        for &rows in &self.config.rows {
            for &obstacles_perc in &self.config.obstacle_percs {
                summary.configs.push(self.run_config(rows, obstacles_perc)?);
            }
        }

        info!(
            "Dataset complete: {} maps, {} problems",
            summary.total_maps(),
            summary.total_problems()
        );
        Ok(summary)
    }

    fn run_config(
        &mut self,
        rows: usize,
        obstacles_perc: u32,
    ) -> Result<ConfigSummary, DatasetError> {
        let config = self.config;
        let records_path = config
            .maps_dir
            .join(format!("maps_{}x{}_{}.json", rows, rows, obstacles_perc));
        let mut writer = if config.append_records {
            RecordWriter::append(&records_path)?
        } else {
            RecordWriter::create(&records_path)?
        };

        let params = MapParams::new(rows, rows, obstacles_perc)
            .with_jump_perc(config.jump_perc)
            .with_shuffle_edges(config.shuffle_edges);
        // All-free and all-obstacle grids have exactly one layout
        let obstacles = params.obstacle_count();
        let single_layout = obstacles == 0 || obstacles == rows * rows;

        let mut seen: HashSet<MapArray> = HashSet::new();
        let mut duplicates = 0;

        while seen.len() < config.num_maps && duplicates < config.max_duplicate_attempts {
            let map = Map::generate(params, &mut self.rng)?;
            if seen.contains(map.array()) {
                duplicates += 1;
                continue;
            }
            duplicates = 0;
            self.write_problems(&map, &mut writer)?;
            seen.insert(map.into_array());

            if single_layout {
                break;
            }
        }

        if seen.len() < config.num_maps && !single_layout {
            warn!(
                "Only {} of {} distinct maps found for {}x{} at {}% after {} duplicates in a row",
                seen.len(),
                config.num_maps,
                rows,
                rows,
                obstacles_perc,
                duplicates
            );
        }

        let problems = writer.finish()?;
        info!(
            "{}x{} at {}%: {} maps, {} problems -> {}",
            rows,
            rows,
            obstacles_perc,
            seen.len(),
            problems,
            records_path.display()
        );

        Ok(ConfigSummary {
            rows,
            obstacles_perc,
            maps: seen.len(),
            problems,
            records_path,
        })
    }

    fn write_problems(
        &mut self,
        map: &Map,
        writer: &mut RecordWriter,
    ) -> Result<(), DatasetError> {
        let sample = sample_pairs(map, self.config.pairs_per_map, &mut self.rng);
        debug!(
            "Map {}x{} with {} free cells: {} of {} pairs",
            map.width(),
            map.height(),
            map.crossable_nodes().len(),
            sample.len(),
            sample.available
        );

        for &pair in &sample.pairs {
            let id = problem_id(self.next_index);
            writer.write(&ProblemRecord::new(self.next_index, map.array().clone(), pair))?;

            let problem_path = self
                .config
                .pddl_dir
                .join(format!("{}.{}", id, self.config.problem_extension));
            fs::write(problem_path, encode_problem(map, pair, &id))?;
            self.next_index += 1;
        }
        Ok(())
    }
}
