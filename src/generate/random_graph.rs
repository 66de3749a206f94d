use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    element::NodeId,
    error::{FractalError, Result},
    graph::FractalGraph,
};

/// Shape of a generated graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomGraphParams {
    /// Number of nesting levels below the root.
    pub depth: usize,
    /// Children per container.
    pub fanout: usize,
    /// Chance that a given ordered pair of siblings gets an arc.
    pub arc_probability: f64,
    /// Weights are drawn uniformly from `1..=max_weight`.
    pub max_weight: u32,
    pub seed: u64,
}

impl RandomGraphParams {
    pub fn new(
        depth: usize,
        fanout: usize,
        arc_probability: f64,
        max_weight: u32,
        seed: u64,
    ) -> Self {
        RandomGraphParams {
            depth,
            fanout,
            arc_probability,
            max_weight,
            seed,
        }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.arc_probability) {
            return Err(FractalError::invalid_argument(format!(
                "arc probability must lie in [0, 1], got {}",
                self.arc_probability
            )));
        }
        if self.max_weight == 0 {
            return Err(FractalError::invalid_argument("max weight must be at least 1"));
        }
        Ok(())
    }
}

impl Default for RandomGraphParams {
    fn default() -> Self {
        RandomGraphParams::new(2, 3, 0.5, 10, 42)
    }
}

/// Builds a seeded random nested graph and returns it with its root `G`.
///
/// Every container at a level shallower than `depth` gets `fanout` children,
/// labeled by their path from the root (`G_0`, `G_0_2`, ...) so that labels
/// are unique across the whole hierarchy. Each ordered pair of distinct
/// siblings is then joined with probability `arc_probability`.
///
/// # Errors
/// `InvalidArgument` if the probability is outside `[0, 1]` or `max_weight`
/// is zero.
pub fn random_graph(params: RandomGraphParams) -> Result<(FractalGraph<u32>, NodeId)> {
    params.validate()?;

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut graph = FractalGraph::new();
    let root = graph.create_node("G");

    let mut pending = VecDeque::from([(root, String::from("G"), 0usize)]);
    while let Some((container, prefix, level)) = pending.pop_front() {
        if level >= params.depth {
            continue;
        }

        let children: Vec<NodeId> = (0..params.fanout)
            .map(|i| graph.create_node(format!("{prefix}_{i}")))
            .collect();
        graph.add_nodes(container, &children)?;

        let mut arcs = Vec::new();
        for (s, &source) in children.iter().enumerate() {
            for (t, &target) in children.iter().enumerate() {
                if s == t || !rng.random_bool(params.arc_probability) {
                    continue;
                }
                let weight = rng.random_range(1..=params.max_weight);
                arcs.push(graph.create_arc(format!("{prefix}_e{s}_{t}"), source, target, weight)?);
            }
        }
        graph.add_arcs(container, &arcs)?;

        for (i, &child) in children.iter().enumerate() {
            pending.push_back((child, format!("{prefix}_{i}"), level + 1));
        }
    }

    debug!(
        nodes = graph.node_count(),
        arcs = graph.arc_count(),
        seed = params.seed,
        "generated random graph"
    );
    Ok((graph, root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_follows_depth_and_fanout() {
        let (graph, root) = random_graph(RandomGraphParams::new(3, 2, 0.0, 1, 7)).unwrap();
        // 1 + 2 + 4 + 8
        assert_eq!(graph.node_count(), 15);
        assert_eq!(graph.arc_count(), 0);
        assert!(graph.resolve_path(root, "G_1/G_1_0/G_1_0_1").is_some());
    }

    #[test]
    fn full_probability_connects_every_ordered_pair() {
        let (graph, root) = random_graph(RandomGraphParams::new(1, 4, 1.0, 5, 7)).unwrap();
        assert_eq!(graph.node(root).unwrap().arcs().len(), 12);
        for &child in graph.node(root).unwrap().children() {
            assert_eq!(graph.out_neighbors(child, 1).unwrap().len(), 3);
        }
    }

    #[test]
    fn weights_stay_in_range() {
        let (graph, root) = random_graph(RandomGraphParams::new(1, 5, 1.0, 3, 11)).unwrap();
        for &id in graph.node(root).unwrap().arcs() {
            let weight = *graph.arc(id).unwrap().value();
            assert!((1..=3).contains(&weight));
        }
    }

    #[test]
    fn same_seed_gives_same_export() {
        let params = RandomGraphParams::default();
        let (first, first_root) = random_graph(params).unwrap();
        let (second, second_root) = random_graph(params).unwrap();
        assert_eq!(
            first.export_dot(first_root).unwrap(),
            second.export_dot(second_root).unwrap()
        );
    }

    #[test]
    fn zero_depth_is_a_lone_root() {
        let (graph, root) = random_graph(RandomGraphParams::new(0, 5, 0.5, 10, 1)).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.node(root).unwrap().is_leaf());
    }

    #[test]
    fn invalid_params_are_rejected() {
        assert!(random_graph(RandomGraphParams::new(1, 2, 1.5, 10, 1)).is_err());
        assert!(random_graph(RandomGraphParams::new(1, 2, -0.1, 10, 1)).is_err());
        assert!(random_graph(RandomGraphParams::new(1, 2, 0.5, 0, 1)).is_err());
        assert!(random_graph(RandomGraphParams::new(1, 2, f64::NAN, 10, 1)).is_err());
    }
}
