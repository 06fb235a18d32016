use crate::graph::GridGraph;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of obstacle cells for a percentage, rounded up: `ceil(cells * perc / 100)`
pub fn obstacle_count_for(cells: usize, obstacles_perc: u32) -> usize {
    let count = (cells as u128 * obstacles_perc as u128).div_ceil(100);
    usize::try_from(count).unwrap_or(usize::MAX)
}

/// Obstacle percentage inferred from an obstacle count, rounded down.
/// Not the inverse of `obstacle_count_for`.
pub fn infer_obstacles_perc(cells: usize, obstacles: usize) -> u32 {
    if cells == 0 {
        return 0;
    }
    let perc = 100 * obstacles as u128 / cells as u128;
    u32::try_from(perc).unwrap_or(u32::MAX)
}

/// Mark nodes crossable by growing one connected free region over the graph.
///
/// Starting from a random node, the region grows one frontier node at a time
/// until exactly `node_count - ceil(node_count * obstacles_perc / 100)` nodes
/// are free. With probability `jump_perc / 100` the next node is any frontier
/// node, otherwise the most recently added one. Every freed node touches the
/// region freed before it, so the region stays connected.
///
/// Both percentages are expected in `0..=100`; larger values are treated as 100.
///
/// Returns the number of freed nodes.
pub fn place_obstacles<R: Rng + ?Sized>(
    graph: &mut GridGraph,
    obstacles_perc: u32,
    jump_perc: u32,
    shuffle_edges: bool,
    rng: &mut R,
) -> usize {
    graph.clear_crossable();

    let node_count = graph.node_count();
    let target_free = node_count - obstacle_count_for(node_count, obstacles_perc.min(100));
    let jump_probability = jump_perc.min(100) as f64 / 100.0;
    let start = rng.random_range(0..node_count);

    grow_free_region(
        graph,
        start,
        target_free,
        jump_probability,
        shuffle_edges,
        rng,
    )
    .len()
}

/// Free nodes from `start` until `target_free` are crossable, returning them in freed order.
/// Expects every node of `graph` to start non-crossable.
fn grow_free_region<R: Rng + ?Sized>(
    graph: &mut GridGraph,
    start: usize,
    target_free: usize,
    jump_probability: f64,
    shuffle_edges: bool,
    rng: &mut R,
) -> Vec<usize> {
    let node_count = graph.node_count();
    let mut frontier = vec![start];
    let mut in_frontier = vec![false; node_count];
    in_frontier[start] = true;
    let mut freed = Vec::with_capacity(target_free);
    let mut jumps = 0;

    while freed.len() < target_free {
        let index = if rng.random_bool(jump_probability) {
            jumps += 1;
            rng.random_range(0..frontier.len())
        } else {
            frontier.len() - 1
        };
        let current = frontier.remove(index);
        in_frontier[current] = false;
        graph.set_crossable(current, true);
        freed.push(current);

        let mut incident = graph.incident(current).to_vec();
        if shuffle_edges {
            incident.shuffle(rng);
        }
        for edge in incident {
            let next = graph.opposite(edge, current);
            if !graph.is_crossable(next) && !in_frontier[next] {
                in_frontier[next] = true;
                frontier.push(next);
            }
        }

        // Only reachable with a disconnected graph
        if frontier.is_empty() && freed.len() < target_free {
            debug!("Frontier exhausted after {} of {} nodes", freed.len(), target_free);
            break;
        }
    }

    debug!(
        "Placed obstacles on {}x{} grid: {} free, {} obstacles, {} jumps",
        graph.width(),
        graph.height(),
        freed.len(),
        node_count - freed.len(),
        jumps
    );

    freed
}
