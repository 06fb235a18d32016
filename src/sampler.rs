use crate::error::{MapError, Result};
use crate::map::Map;
use log::warn;
use rand::seq::{index, IndexedRandom};
use rand::Rng;

/// Ordered (source, target) node ids
pub type Pair = (usize, usize);

/// Result of sampling many pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSample {
    pub pairs: Vec<Pair>,
    pub requested: usize,
    /// Number of distinct ordered pairs the map offers
    pub available: usize,
}

impl PairSample {
    /// True when fewer pairs exist than were requested and all of them were returned
    pub fn is_exhausted(&self) -> bool {
        self.requested > self.available
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Pick one (source, target) pair of distinct crossable nodes.
///
/// Unset endpoints are drawn uniformly from the crossable nodes; a given
/// endpoint must itself be crossable.
pub fn sample_pair<R: Rng + ?Sized>(
    map: &Map,
    source: Option<usize>,
    target: Option<usize>,
    rng: &mut R,
) -> Result<Pair> {
    for node in source.iter().chain(target.iter()) {
        if !map.is_crossable(*node) {
            return Err(MapError::InvalidNode(*node));
        }
    }

    let crossable = map.crossable_nodes();
    match (source, target) {
        (None, None) => {
            if crossable.len() < 2 {
                return Err(MapError::NotEnoughCrossable {
                    required: 2,
                    available: crossable.len(),
                });
            }
            let picked = index::sample(rng, crossable.len(), 2);
            Ok((crossable[picked.index(0)], crossable[picked.index(1)]))
        }
        (Some(source), None) => Ok((source, pick_other(&crossable, source, rng)?)),
        (None, Some(target)) => Ok((pick_other(&crossable, target, rng)?, target)),
        (Some(source), Some(target)) => {
            if source == target {
                return Err(MapError::InvalidNode(target));
            }
            Ok((source, target))
        }
    }
}

fn pick_other<R: Rng + ?Sized>(crossable: &[usize], fixed: usize, rng: &mut R) -> Result<usize> {
    let others: Vec<usize> = crossable
        .iter()
        .copied()
        .filter(|&node| node != fixed)
        .collect();
    others
        .choose(rng)
        .copied()
        .ok_or(MapError::NotEnoughCrossable {
            required: 2,
            available: crossable.len(),
        })
}

/// All ordered pairs of distinct crossable nodes, source-major
pub fn all_pairs(map: &Map) -> Vec<Pair> {
    let crossable = map.crossable_nodes();
    let mut pairs = Vec::with_capacity(crossable.len() * crossable.len().saturating_sub(1));
    for &source in &crossable {
        for &target in &crossable {
            if source != target {
                pairs.push((source, target));
            }
        }
    }
    pairs
}

/// Sample up to `n` distinct ordered pairs without replacement.
///
/// When the map offers fewer than `n` pairs, every pair is returned and the
/// sample reports itself as exhausted.
pub fn sample_pairs<R: Rng + ?Sized>(map: &Map, n: usize, rng: &mut R) -> PairSample {
    let pairs = all_pairs(map);
    let available = pairs.len();

    if n > available {
        warn!(
            "Requested {} pairs but only {} exist, returning all of them",
            n, available
        );
        return PairSample {
            pairs,
            requested: n,
            available,
        };
    }

    let selected = index::sample(rng, available, n)
        .into_iter()
        .map(|i| pairs[i])
        .collect();

    PairSample {
        pairs: selected,
        requested: n,
        available,
    }
}
