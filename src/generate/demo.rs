use crate::{element::NodeId, error::Result, graph::FractalGraph};

/// Builds the reference three-level graph and returns it with its root.
///
/// ```text
/// MainGraph
/// ├── Sub1 ── A { A1 -a1:8-> A2 },  B          A -a2:3-> B
/// └── Sub2 ── C { C1 -a3:6-> C2 -a4:4-> C3 -a5:9-> C1 }
/// Sub1 -a6:1-> Sub2,  Sub2 -a7:2-> Sub1
/// ```
pub fn demo_graph() -> Result<(FractalGraph<i32>, NodeId)> {
    let mut graph = FractalGraph::new();

    // level 0 leaves on the left
    let a1 = graph.create_node("A1");
    let a2 = graph.create_node("A2");

    // level 1 on the left
    let a = graph.create_node("A");
    graph.add_nodes(a, &[a1, a2])?;
    let arc = graph.create_arc("a1", a1, a2, 8)?;
    graph.add_arc(a, arc)?;
    let b = graph.create_node("B");

    // level 2 on the left
    let sub1 = graph.create_node("Sub1");
    graph.add_nodes(sub1, &[a, b])?;
    let arc = graph.create_arc("a2", a, b, 3)?;
    graph.add_arc(sub1, arc)?;

    // level 0 leaves on the right
    let c1 = graph.create_node("C1");
    let c2 = graph.create_node("C2");
    let c3 = graph.create_node("C3");

    // level 1 on the right: a three-cycle
    let c = graph.create_node("C");
    graph.add_nodes(c, &[c1, c2, c3])?;
    let a3 = graph.create_arc("a3", c1, c2, 6)?;
    let a4 = graph.create_arc("a4", c2, c3, 4)?;
    let a5 = graph.create_arc("a5", c3, c1, 9)?;
    graph.add_arcs(c, &[a3, a4, a5])?;

    // level 2 on the right
    let sub2 = graph.create_node("Sub2");
    graph.add_node(sub2, c)?;

    // level 3
    let main = graph.create_node("MainGraph");
    graph.add_nodes(main, &[sub1, sub2])?;
    let a6 = graph.create_arc("a6", sub1, sub2, 1)?;
    let a7 = graph.create_arc("a7", sub2, sub1, 2)?;
    graph.add_arcs(main, &[a6, a7])?;

    Ok((graph, main))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NeighborSet;

    #[test]
    fn demo_graph_has_expected_shape() {
        let (graph, main) = demo_graph().unwrap();
        assert_eq!(graph.node_count(), 11);
        assert_eq!(graph.arc_count(), 7);
        assert_eq!(graph.roots(), vec![main]);
        assert!(graph.resolve_path(main, "Sub1/A/A2").is_some());
        assert!(graph.resolve_path(main, "Sub2/C/C3").is_some());
    }

    #[test]
    fn sub2_is_fed_by_sub1() {
        let (graph, main) = demo_graph().unwrap();
        let sub1 = graph.node_by_label(main, "Sub1").unwrap();
        let sub2 = graph.node_by_label(main, "Sub2").unwrap();
        let expected: NeighborSet = [sub1].into_iter().collect();
        assert_eq!(graph.in_neighbors(sub2, 1).unwrap(), expected);
    }

    #[test]
    fn deleting_sub1_cascades_root_arcs() {
        let (mut graph, main) = demo_graph().unwrap();
        let sub1 = graph.node_by_label(main, "Sub1").unwrap();
        let sub2 = graph.node_by_label(main, "Sub2").unwrap();
        let a6 = graph.arc_by_label(main, "a6").unwrap();

        graph.delete_node(main, sub1).unwrap();

        assert_eq!(graph.node_by_label(main, "Sub1"), None);
        assert_eq!(graph.arc_by_label(main, "a6"), None);
        assert_eq!(graph.arc_by_label(main, "a7"), None);
        assert!(graph.arc(a6).is_some_and(|arc| arc.source() == sub1));
        assert!(graph.in_neighbors(sub2, 1).unwrap().is_empty());
        assert!(graph.out_neighbors(sub2, 1).unwrap().is_empty());
        // the detached subgraph keeps its own structure
        assert!(graph.arc_by_label(sub1, "a2").is_some());
    }

    #[test]
    fn export_has_one_block_per_child_and_two_root_edges() {
        let (graph, main) = demo_graph().unwrap();
        let text = graph.export_dot(main).unwrap();

        assert_eq!(text.matches("subgraph cluster_Sub1 {").count(), 1);
        assert_eq!(text.matches("subgraph cluster_Sub2 {").count(), 1);
        assert!(text.starts_with("digraph G {\nsubgraph cluster_Sub1 {\n"));
        assert!(text.ends_with(
            "cluster_Sub1 -> cluster_Sub2 [label=\"a6:1\"]\n\
             cluster_Sub2 -> cluster_Sub1 [label=\"a7:2\"]\n\
             }\n"
        ));

        let body = graph.to_dot(main).unwrap();
        let root_edges: Vec<&str> = root_level_lines(&body)
            .into_iter()
            .filter(|line| line.contains("->"))
            .collect();
        assert_eq!(
            root_edges,
            vec![
                "cluster_Sub1 -> cluster_Sub2 [label=\"a6:1\"]",
                "cluster_Sub2 -> cluster_Sub1 [label=\"a7:2\"]",
            ]
        );
    }

    #[test]
    fn nested_cycle_closure() {
        let (graph, main) = demo_graph().unwrap();
        let c1 = graph.resolve_path(main, "Sub2/C/C1").unwrap();
        let c2 = graph.resolve_path(main, "Sub2/C/C2").unwrap();
        let c3 = graph.resolve_path(main, "Sub2/C/C3").unwrap();

        let two_hops: NeighborSet = [c2, c3].into_iter().collect();
        assert_eq!(graph.out_neighbors(c1, 2).unwrap(), two_hops);
        let everything: NeighborSet = [c1, c2, c3].into_iter().collect();
        assert_eq!(graph.out_neighbors(c1, 3).unwrap(), everything);
    }

    /// Lines of a serialized body that sit outside every `subgraph` block.
    fn root_level_lines(body: &str) -> Vec<&str> {
        let mut depth = 0usize;
        let mut lines = Vec::new();
        for line in body.lines() {
            if line.ends_with('{') {
                depth += 1;
            } else if line == "}" {
                depth -= 1;
            } else if depth == 0 {
                lines.push(line);
            }
        }
        lines
    }
}
