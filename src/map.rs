use crate::error::{MapError, Result};
use crate::graph::GridGraph;
use crate::placement::{infer_obstacles_perc, obstacle_count_for, place_obstacles};
use rand::Rng;
use std::fmt;

/// Row-major `[height][width]` grid: 0 = crossable, 1 = obstacle
pub type MapArray = Vec<Vec<u8>>;

pub const DEFAULT_JUMP_PERC: u32 = 25;

/// Geometry and density parameters of a map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapParams {
    pub width: usize,
    pub height: usize,
    pub obstacles_perc: u32,
    /// Chance of continuing the walk from a random frontier node.
    /// Lower values give longer corridor-like free regions.
    pub jump_perc: u32,
    pub shuffle_edges: bool,
}

impl MapParams {
    pub fn new(width: usize, height: usize, obstacles_perc: u32) -> Self {
        MapParams {
            width,
            height,
            obstacles_perc,
            jump_perc: DEFAULT_JUMP_PERC,
            shuffle_edges: true,
        }
    }

    pub fn with_jump_perc(mut self, jump_perc: u32) -> Self {
        self.jump_perc = jump_perc;
        self
    }

    pub fn with_shuffle_edges(mut self, shuffle_edges: bool) -> Self {
        self.shuffle_edges = shuffle_edges;
        self
    }

    /// Number of obstacle cells these parameters call for
    pub fn obstacle_count(&self) -> usize {
        obstacle_count_for(self.width.saturating_mul(self.height), self.obstacles_perc)
    }

    fn check(&self) -> Result<()> {
        if matches!(self.width.checked_mul(self.height), None | Some(0)) {
            return Err(MapError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.obstacles_perc > 100 {
            return Err(MapError::InvalidPercentage {
                name: "obstacles_perc",
                value: self.obstacles_perc,
            });
        }
        if self.jump_perc > 100 {
            return Err(MapError::InvalidPercentage {
                name: "jump_perc",
                value: self.jump_perc,
            });
        }
        Ok(())
    }
}

/// A navigation map: a grid graph with crossable flags and its array mirror.
///
/// The graph flags and the array always describe the same cells. Both are
/// only written during construction and by [`Map::regenerate`], which
/// refreshes them together.
#[derive(Debug, Clone)]
pub struct Map {
    params: MapParams,
    graph: GridGraph,
    array: MapArray,
}

impl Map {
    /// Generate a random map whose free cells form one connected region
    pub fn generate<R: Rng + ?Sized>(params: MapParams, rng: &mut R) -> Result<Self> {
        params.check()?;
        let mut graph = GridGraph::build(params.width, params.height)?;
        place_obstacles(
            &mut graph,
            params.obstacles_perc,
            params.jump_perc,
            params.shuffle_edges,
            rng,
        );
        let array = array_from_graph(&graph);
        let map = Map { params, graph, array };
        map.validate()?;
        Ok(map)
    }

    /// Rebuild a map from an existing array.
    /// The obstacle percentage is inferred from the array, rounded down.
    pub fn from_array(array: MapArray) -> Result<Self> {
        let height = array.len();
        let width = array.first().map_or(0, |row| row.len());
        let obstacles: usize = array.iter().flatten().map(|&cell| cell as usize).sum();
        let obstacles_perc = infer_obstacles_perc(width * height, obstacles);
        Self::with_array(MapParams::new(width, height, obstacles_perc), array)
    }

    /// Build a map from explicit parameters and an array that must agree with them
    pub fn with_array(params: MapParams, array: MapArray) -> Result<Self> {
        params.check()?;
        check_shape(&params, &array)?;
        let mut graph = GridGraph::build(params.width, params.height)?;
        for (row, cells) in array.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell > 1 {
                    return Err(MapError::InvalidCellValue { row, col, value: cell });
                }
                let node = graph.node_id(row, col);
                graph.set_crossable(node, cell == 0);
            }
        }
        let map = Map { params, graph, array };
        map.validate()?;
        Ok(map)
    }

    /// Re-randomize the obstacles with the map's own parameters.
    /// Graph flags and array are refreshed together.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        place_obstacles(
            &mut self.graph,
            self.params.obstacles_perc,
            self.params.jump_perc,
            self.params.shuffle_edges,
            rng,
        );
        self.array = array_from_graph(&self.graph);
    }

    fn validate(&self) -> Result<()> {
        self.params.check()?;
        check_shape(&self.params, &self.array)?;
        let expected = self.params.obstacle_count();
        let actual = self.obstacle_count();
        if actual != expected {
            return Err(MapError::DensityMismatch {
                expected,
                actual,
                obstacles_perc: self.params.obstacles_perc,
            });
        }
        Ok(())
    }

    pub fn params(&self) -> &MapParams {
        &self.params
    }

    pub fn width(&self) -> usize {
        self.params.width
    }

    pub fn height(&self) -> usize {
        self.params.height
    }

    pub fn obstacles_perc(&self) -> u32 {
        self.params.obstacles_perc
    }

    pub fn jump_perc(&self) -> u32 {
        self.params.jump_perc
    }

    pub fn shuffle_edges(&self) -> bool {
        self.params.shuffle_edges
    }

    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    pub fn array(&self) -> &MapArray {
        &self.array
    }

    pub fn into_array(self) -> MapArray {
        self.array
    }

    /// Derive the array from the graph flags (1 = obstacle)
    pub fn to_array(&self) -> MapArray {
        array_from_graph(&self.graph)
    }

    pub fn is_crossable(&self, node: usize) -> bool {
        self.graph.is_crossable(node)
    }

    pub fn crossable_nodes(&self) -> Vec<usize> {
        self.graph.crossable_nodes()
    }

    pub fn obstacle_count(&self) -> usize {
        self.array.iter().flatten().filter(|&&cell| cell == 1).count()
    }

    /// Cell value at (row, col); out of range cells are obstacles
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.array
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(1)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.array == other.array
    }
}

impl Eq for Map {}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in &self.array {
            let line: Vec<String> = cells.iter().map(|cell| cell.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

fn array_from_graph(graph: &GridGraph) -> MapArray {
    (0..graph.height())
        .map(|row| {
            (0..graph.width())
                .map(|col| {
                    if graph.is_crossable(graph.node_id(row, col)) {
                        0
                    } else {
                        1
                    }
                })
                .collect()
        })
        .collect()
}

fn check_shape(params: &MapParams, array: &MapArray) -> Result<()> {
    let rows = array.len();
    let cols = array.first().map_or(0, |row| row.len());
    let ragged = array.iter().any(|row| row.len() != params.width);
    if rows != params.height || cols != params.width || ragged {
        return Err(MapError::ShapeMismatch {
            rows,
            cols,
            width: params.width,
            height: params.height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_3x3_30() {
        let mut rng = StdRng::seed_from_u64(1);
        let map = Map::generate(MapParams::new(3, 3, 30), &mut rng).unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 3);
        assert_eq!(map.obstacles_perc(), 30);
        assert_eq!(map.jump_perc(), 25);
        assert!(map.shuffle_edges());
        assert_eq!(map.obstacle_count(), 3);
        assert_eq!(map.crossable_nodes().len(), 6);
        assert_eq!(map.graph().edge_count(), 12);
        assert!(map.graph().crossable_region_is_connected());
    }

    #[test]
    fn test_with_array_density_mismatch() {
        let array = vec![vec![0; 3]; 3];
        let err = Map::with_array(MapParams::new(3, 3, 50), array).unwrap_err();
        assert_eq!(
            err,
            MapError::DensityMismatch {
                expected: 5,
                actual: 0,
                obstacles_perc: 50
            }
        );
    }

    #[test]
    fn test_with_array_shape_mismatch() {
        let array = vec![vec![0; 3]; 2];
        let err = Map::with_array(MapParams::new(3, 3, 0), array).unwrap_err();
        assert!(matches!(err, MapError::ShapeMismatch { rows: 2, cols: 3, .. }));

        let ragged = vec![vec![0, 0, 0], vec![0, 0], vec![0, 0, 0]];
        assert!(matches!(
            Map::with_array(MapParams::new(3, 3, 0), ragged),
            Err(MapError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_percentages() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            Map::generate(MapParams::new(3, 3, 101), &mut rng).unwrap_err(),
            MapError::InvalidPercentage {
                name: "obstacles_perc",
                value: 101
            }
        );
        assert_eq!(
            Map::generate(MapParams::new(3, 3, 10).with_jump_perc(150), &mut rng).unwrap_err(),
            MapError::InvalidPercentage {
                name: "jump_perc",
                value: 150
            }
        );
    }

    #[test]
    fn test_oversized_dimension() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = MapParams::new(usize::MAX, 3, 10);
        assert!(params.obstacle_count() > 0);
        assert_eq!(
            Map::generate(params, &mut rng).unwrap_err(),
            MapError::InvalidDimension {
                width: usize::MAX,
                height: 3
            }
        );
    }

    #[test]
    fn test_invalid_cell_value() {
        let array = vec![vec![0, 0, 0], vec![0, 2, 0], vec![0, 0, 0]];
        assert_eq!(
            Map::from_array(array).unwrap_err(),
            MapError::InvalidCellValue { row: 1, col: 1, value: 2 }
        );
    }

    #[test]
    fn test_regenerate_keeps_views_in_sync() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut map = Map::generate(MapParams::new(6, 4, 40), &mut rng).unwrap();
        for _ in 0..5 {
            map.regenerate(&mut rng);
            assert_eq!(map.to_array(), *map.array());
            assert_eq!(map.obstacle_count(), map.params().obstacle_count());
            assert!(map.graph().crossable_region_is_connected());
        }
    }

    #[test]
    fn test_display() {
        let map = Map::from_array(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(map.to_string(), "0 1\n1 0\n");
    }

    #[test]
    fn test_cell_out_of_range_is_obstacle() {
        let map = Map::from_array(vec![vec![0, 0], vec![0, 0]]).unwrap();
        assert_eq!(map.cell(1, 1), 0);
        assert_eq!(map.cell(2, 0), 1);
    }
}
