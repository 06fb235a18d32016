#![allow(dead_code)]

use gridmaps::MapArray;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Deterministic RNG for a test
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Parse a map from the text format used in tests
/// '■' = obstacle, '□' = free
pub fn parse_map(text: &str) -> MapArray {
    text.trim()
        .lines()
        .map(|line| {
            line.trim()
                .chars()
                .map(|ch| if ch == '■' { 1 } else { 0 })
                .collect()
        })
        .collect()
}

/// Render a map in the same text format
pub fn format_map(array: &MapArray) -> String {
    let mut result = String::new();
    for row in array {
        for &cell in row {
            result.push(if cell == 1 { '■' } else { '□' });
        }
        result.push('\n');
    }
    result
}

pub fn count_obstacles(array: &MapArray) -> usize {
    array.iter().flatten().filter(|&&cell| cell == 1).count()
}

/// Flood fill over the array: true when all free cells reach each other
pub fn free_cells_connected(array: &MapArray) -> bool {
    let rows = array.len();
    let cols = array[0].len();
    let free: Vec<(usize, usize)> = (0..rows)
        .flat_map(|y| (0..cols).map(move |x| (y, x)))
        .filter(|&(y, x)| array[y][x] == 0)
        .collect();
    let Some(&start) = free.first() else {
        return true;
    };

    let mut visited = vec![vec![false; cols]; rows];
    let mut queue = VecDeque::from([start]);
    visited[start.0][start.1] = true;
    let mut reached = 0;

    while let Some((y, x)) = queue.pop_front() {
        reached += 1;
        let mut next = Vec::new();
        if y > 0 {
            next.push((y - 1, x));
        }
        if y + 1 < rows {
            next.push((y + 1, x));
        }
        if x > 0 {
            next.push((y, x - 1));
        }
        if x + 1 < cols {
            next.push((y, x + 1));
        }
        for (ny, nx) in next {
            if array[ny][nx] == 0 && !visited[ny][nx] {
                visited[ny][nx] = true;
                queue.push_back((ny, nx));
            }
        }
    }

    reached == free.len()
}
