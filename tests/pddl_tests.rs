mod common;

use common::{parse_map, seeded};
use gridmaps::{encode, encode_problem, sample_pairs, Map, MapParams};
use pretty_assertions::assert_eq;

/// Check that parentheses balance and never close below depth 0
fn balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for ch in text.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[test]
fn test_encode_2x2_exact() {
    let map = Map::from_array(parse_map(
        "
        □□
        □■
        ",
    ))
    .unwrap();

    let expected = "(define (problem p01) (:domain map)

(:objects
    c0 c1 c2 c3 - cell
    a - agent
)


(:init
    (is_left c0 c1)
    (is_right c1 c0)
    (is_up c0 c2)
    (is_down c2 c0)
    (in a c0)
)


(:goal (and
    (in a c2)
))
)";

    assert_eq!(encode(&map, (0, 2)), expected);
}

#[test]
fn test_encode_fact_order_row_major() {
    // 3x2, all free:
    // c0 c1 c2
    // c3 c4 c5
    let map = Map::from_array(vec![vec![0; 3]; 2]).unwrap();
    let text = encode(&map, (0, 5));
    let facts: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("(is_"))
        .collect();

    assert_eq!(
        facts,
        vec![
            "(is_left c0 c1)",
            "(is_right c1 c0)",
            "(is_left c1 c2)",
            "(is_right c2 c1)",
            "(is_up c0 c3)",
            "(is_down c3 c0)",
            "(is_up c1 c4)",
            "(is_down c4 c1)",
            "(is_left c3 c4)",
            "(is_right c4 c3)",
            "(is_up c2 c5)",
            "(is_down c5 c2)",
            "(is_left c4 c5)",
            "(is_right c5 c4)",
        ]
    );
}

#[test]
fn test_encode_only_free_adjacency() {
    let map = Map::from_array(parse_map(
        "
        ■□■
        □□□
        ■□■
        ",
    ))
    .unwrap();
    let text = encode(&map, (1, 7));

    // Four free neighbours of the centre, two facts each
    assert_eq!(text.matches("(is_").count(), 8);
    for obstacle in ["c0", "c2", "c6", "c8"] {
        let mentioned = text
            .lines()
            .filter(|line| line.contains("(is_"))
            .any(|line| {
                line.split_whitespace()
                    .any(|word| word.trim_end_matches(')') == obstacle)
            });
        assert!(!mentioned, "{} appears in an adjacency fact", obstacle);
    }
    assert!(text.contains("    c0 c1 c2 c3 c4 c5 c6 c7 c8 - cell\n"));
    assert!(text.contains("    (in a c1)\n)"));
    assert!(text.contains("(:goal (and\n    (in a c7)\n))"));
}

#[test]
fn test_encode_all_obstacles_has_no_facts() {
    let map = Map::from_array(vec![vec![1; 3]; 3]).unwrap();
    let text = encode(&map, (0, 8));
    assert_eq!(text.matches("(is_").count(), 0);
    assert!(balanced(&text));
}

#[test]
fn test_encode_is_deterministic() {
    let mut rng = seeded(20);
    let map = Map::generate(MapParams::new(8, 6, 30), &mut rng).unwrap();
    for &pair in &sample_pairs(&map, 5, &mut rng).pairs {
        let first = encode(&map, pair);
        let second = encode(&map, pair);
        assert_eq!(first, second);

        let rebuilt = Map::from_array(map.to_array()).unwrap();
        assert_eq!(encode(&rebuilt, pair), first);
    }
}

#[test]
fn test_encode_structure_balanced() {
    let mut rng = seeded(21);
    for perc in [0, 25, 60] {
        let map = Map::generate(MapParams::new(7, 7, perc), &mut rng).unwrap();
        let pair = sample_pairs(&map, 1, &mut rng).pairs[0];
        let text = encode_problem(&map, pair, "p000001");

        assert!(balanced(&text));
        assert!(text.starts_with("(define (problem p000001) (:domain map)"));
        let objects = text.find("(:objects").unwrap();
        let init = text.find("(:init").unwrap();
        let goal = text.find("(:goal").unwrap();
        assert!(objects < init && init < goal);
    }
}
