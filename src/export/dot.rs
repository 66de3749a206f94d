use std::{fmt::Display, path::Path};

use crate::{
    element::{Element, NodeId},
    error::Result,
    export::write_text,
    graph::FractalGraph,
};

impl<T: Display> FractalGraph<T> {
    /// Serializes the content of `node` (not the node itself): one
    /// `subgraph cluster_<label>` block per child, recursively, followed by one
    /// edge line per arc. Children and arcs appear in insertion order.
    ///
    /// # Errors
    /// `NotFound` if `node` is unknown.
    pub fn to_dot(&self, node: NodeId) -> Result<String> {
        let mut out = String::new();
        self.write_dot_body(node, &mut out)?;
        Ok(out)
    }

    /// [`to_dot`](Self::to_dot) wrapped in the enclosing `digraph G { ... }`.
    ///
    /// # Errors
    /// `NotFound` if `node` is unknown.
    pub fn export_dot(&self, node: NodeId) -> Result<String> {
        Ok(format!("digraph G {{\n{}}}\n", self.to_dot(node)?))
    }

    /// Writes [`export_dot`](Self::export_dot) to `path`.
    ///
    /// # Errors
    /// `NotFound` if `node` is unknown, `Io` if the file cannot be written.
    pub fn save_dot(&self, node: NodeId, path: impl AsRef<Path>) -> Result<()> {
        write_text(path.as_ref(), &self.export_dot(node)?)
    }

    fn write_dot_body(&self, node: NodeId, out: &mut String) -> Result<()> {
        let data = self.node_ref(node)?;

        for &child in data.children() {
            let label = self.node_ref(child)?.label();
            out.push_str(&format!("subgraph cluster_{label} {{\n"));
            out.push_str("style=rounded\n");
            out.push_str(&format!("label={label}\n"));
            self.write_dot_body(child, out)?;
            out.push_str("}\n");
        }

        for &id in data.arcs() {
            let arc = self.arc_ref(id)?;
            out.push_str(&format!(
                "cluster_{} -> cluster_{} [label=\"{}:{}\"]\n",
                self.display_label(arc.source()),
                self.display_label(arc.target()),
                arc.label(),
                arc.value()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FractalError;

    fn pair() -> (FractalGraph<f64>, NodeId) {
        let mut graph = FractalGraph::new();
        let root = graph.create_node("root");
        let a = graph.create_node("A");
        let b = graph.create_node("B");
        graph.add_nodes(root, &[a, b]).unwrap();
        let arc = graph.create_arc("ab", a, b, 2.5).unwrap();
        graph.add_arc(root, arc).unwrap();
        (graph, root)
    }

    #[test]
    fn leaf_exports_empty_body() {
        let mut graph = FractalGraph::<i32>::new();
        let lone = graph.create_node("lone");
        assert_eq!(graph.to_dot(lone).unwrap(), "");
        assert_eq!(graph.export_dot(lone).unwrap(), "digraph G {\n}\n");
    }

    #[test]
    fn exact_layout_of_flat_graph() {
        let (graph, root) = pair();
        let expected = "digraph G {\n\
                        subgraph cluster_A {\n\
                        style=rounded\n\
                        label=A\n\
                        }\n\
                        subgraph cluster_B {\n\
                        style=rounded\n\
                        label=B\n\
                        }\n\
                        cluster_A -> cluster_B [label=\"ab:2.5\"]\n\
                        }\n";
        assert_eq!(graph.export_dot(root).unwrap(), expected);
    }

    #[test]
    fn nested_children_are_inside_parent_block() {
        let (mut graph, root) = pair();
        let a = graph.node_by_label(root, "A").unwrap();
        let inner = graph.create_node("A1");
        graph.add_node(a, inner).unwrap();

        let text = graph.to_dot(root).unwrap();
        let outer = text.find("subgraph cluster_A {").unwrap();
        let nested = text.find("subgraph cluster_A1 {").unwrap();
        let sibling = text.find("subgraph cluster_B {").unwrap();
        assert!(outer < nested && nested < sibling);
    }

    #[test]
    fn unknown_node_cannot_be_exported() {
        let (graph, _) = pair();
        assert!(matches!(
            graph.to_dot(NodeId { internal: 77 }).unwrap_err(),
            FractalError::NotFound { .. }
        ));
    }

    #[test]
    fn save_dot_overwrites_destination() {
        let (graph, root) = pair();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.dot");
        std::fs::write(&path, "stale content that is longer than nothing").unwrap();

        graph.save_dot(root, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, graph.export_dot(root).unwrap());
    }

    #[test]
    fn save_dot_reports_io_failure() {
        let (graph, root) = pair();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("graph.dot");

        match graph.save_dot(root, &path).unwrap_err() {
            FractalError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
