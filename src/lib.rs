pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod map;
pub mod pddl;
pub mod placement;
pub mod record;
pub mod sampler;

pub use error::{MapError, Result};
pub use graph::GridGraph;
pub use map::{Map, MapArray, MapParams};
pub use pddl::{encode, encode_problem};
pub use placement::place_obstacles;
pub use sampler::{sample_pair, sample_pairs, Pair, PairSample};
