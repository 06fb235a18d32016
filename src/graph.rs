use crate::error::{MapError, Result};
use std::collections::VecDeque;

/// Undirected 4-neighbour grid graph
/// Node ids are row-major: `row * width + col`. Each node carries a crossable flag.
#[derive(Debug, Clone)]
pub struct GridGraph {
    width: usize,
    height: usize,
    edges: Vec<(usize, usize)>,
    /// Edge ids incident to each node, in edge order
    incidence: Vec<Vec<usize>>,
    crossable: Vec<bool>,
}

impl GridGraph {
    /// Build the grid graph for a width x height grid, all nodes non-crossable
    pub fn build(width: usize, height: usize) -> Result<Self> {
        // Edge count stays below twice the node count
        let node_count = width
            .checked_mul(height)
            .filter(|&nodes| nodes > 0 && nodes <= usize::MAX / 2)
            .ok_or(MapError::InvalidDimension { width, height })?;
        let edge_count = width * (height - 1) + height * (width - 1);
        let mut edges = Vec::with_capacity(edge_count);
        let mut incidence = vec![Vec::with_capacity(4); node_count];

        for row in 0..height {
            for col in 0..width {
                let node = row * width + col;
                if row != 0 {
                    let up = node - width;
                    incidence[node].push(edges.len());
                    incidence[up].push(edges.len());
                    edges.push((node, up));
                }
                if col != 0 {
                    let left = node - 1;
                    incidence[node].push(edges.len());
                    incidence[left].push(edges.len());
                    edges.push((node, left));
                }
            }
        }

        Ok(GridGraph {
            width,
            height,
            edges,
            incidence,
            crossable: vec![false; node_count],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn node_count(&self) -> usize {
        self.crossable.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Endpoints of edge `edge`
    pub fn edge(&self, edge: usize) -> (usize, usize) {
        self.edges[edge]
    }

    /// Edge ids touching `node`
    pub fn incident(&self, node: usize) -> &[usize] {
        &self.incidence[node]
    }

    /// The endpoint of `edge` that is not `node`
    pub fn opposite(&self, edge: usize, node: usize) -> usize {
        let (a, b) = self.edges[edge];
        if a == node {
            b
        } else {
            a
        }
    }

    /// Neighbours of `node` in edge order
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.incidence[node]
            .iter()
            .map(move |&edge| self.opposite(edge, node))
    }

    /// Convert (row, col) coordinates to node ID
    pub fn node_id(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Convert node ID to (row, col) coordinates
    pub fn coords(&self, node: usize) -> (usize, usize) {
        (node / self.width, node % self.width)
    }

    /// Out of range nodes are never crossable
    pub fn is_crossable(&self, node: usize) -> bool {
        self.crossable.get(node).copied().unwrap_or(false)
    }

    pub(crate) fn set_crossable(&mut self, node: usize, crossable: bool) {
        self.crossable[node] = crossable;
    }

    pub(crate) fn clear_crossable(&mut self) {
        self.crossable.iter_mut().for_each(|flag| *flag = false);
    }

    /// Crossable node ids in ascending order
    pub fn crossable_nodes(&self) -> Vec<usize> {
        (0..self.node_count())
            .filter(|&node| self.crossable[node])
            .collect()
    }

    pub fn crossable_count(&self) -> usize {
        self.crossable.iter().filter(|&&flag| flag).count()
    }

    /// Whether the whole grid forms one component
    pub fn is_connected(&self) -> bool {
        self.reachable_from(0, |_| true) == self.node_count()
    }

    /// Whether the subgraph induced by crossable nodes forms one component.
    /// An empty region counts as connected.
    pub fn crossable_region_is_connected(&self) -> bool {
        match self.crossable.iter().position(|&flag| flag) {
            Some(start) => {
                self.reachable_from(start, |node| self.crossable[node]) == self.crossable_count()
            }
            None => true,
        }
    }

    /// BFS from `start` over nodes accepted by `allowed`, returns the visited count
    fn reachable_from<F: Fn(usize) -> bool>(&self, start: usize, allowed: F) -> usize {
        let mut visited = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);
        let mut count = 0;

        while let Some(node) = queue.pop_front() {
            count += 1;
            for next in self.neighbors(node) {
                if !visited[next] && allowed(next) {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        count
    }
}
