//! PDDL problem encoding for navigation maps.
//!
//! Every cell becomes a `cell` object `c<id>` and the single agent is `a`.
//! Adjacency is only stated between two free cells, once per direction:
//!
//! ```text
//! (is_up c<above> c<cell>)     (is_down c<cell> c<above>)
//! (is_left c<left> c<cell>)    (is_right c<cell> c<left>)
//! ```
//!
//! Output depends only on the map array and the pair, so it is byte-stable.

use crate::map::Map;
use crate::sampler::Pair;

pub const DOMAIN_NAME: &str = "map";
pub const DEFAULT_PROBLEM_NAME: &str = "p01";

const INDENT: &str = "    ";

/// Encode a map and (source, target) pair as a PDDL problem named `p01`
pub fn encode(map: &Map, pair: Pair) -> String {
    encode_problem(map, pair, DEFAULT_PROBLEM_NAME)
}

/// Encode a map and (source, target) pair as a PDDL problem named `problem_name`
pub fn encode_problem(map: &Map, pair: Pair, problem_name: &str) -> String {
    let (source, target) = pair;
    let width = map.width();
    let mut s = String::new();

    s.push_str(&format!(
        "(define (problem {}) (:domain {})\n\n",
        problem_name, DOMAIN_NAME
    ));

    s.push_str(&format!("(:objects\n{}", INDENT));
    for cell in 0..width * map.height() {
        s.push_str(&format!("c{} ", cell));
    }
    s.push_str("- cell\n");
    s.push_str(&format!("{}a - agent\n", INDENT));
    s.push_str(")\n\n\n");

    s.push_str("(:init\n");
    for row in 0..map.height() {
        for col in 0..width {
            let cell = row * width + col;
            let free = map.cell(row, col) == 0;
            if row > 0 && free && map.cell(row - 1, col) == 0 {
                let above = cell - width;
                s.push_str(&format!("{}(is_up c{} c{})\n", INDENT, above, cell));
                s.push_str(&format!("{}(is_down c{} c{})\n", INDENT, cell, above));
            }
            if col > 0 && free && map.cell(row, col - 1) == 0 {
                let left = cell - 1;
                s.push_str(&format!("{}(is_left c{} c{})\n", INDENT, left, cell));
                s.push_str(&format!("{}(is_right c{} c{})\n", INDENT, cell, left));
            }
        }
    }
    s.push_str(&format!("{}(in a c{})\n", INDENT, source));
    s.push_str(")\n\n\n");

    s.push_str("(:goal (and\n");
    s.push_str(&format!("{}(in a c{})\n", INDENT, target));
    s.push_str("))\n");
    s.push(')');

    s
}
