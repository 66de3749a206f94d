use std::path::Path;

use serde::Serialize;

use crate::{
    element::{ArcId, Element, NodeId},
    error::Result,
    export::write_text,
    graph::FractalGraph,
};

/// Borrowed, serializable view of a node and everything nested below it.
#[derive(Debug, Serialize)]
pub struct NodeSnapshot<'a, T> {
    pub id: NodeId,
    pub label: &'a str,
    pub children: Vec<NodeSnapshot<'a, T>>,
    pub arcs: Vec<ArcSnapshot<'a, T>>,
}

/// Serializable view of one arc; endpoints are given by sibling label.
#[derive(Debug, Serialize)]
pub struct ArcSnapshot<'a, T> {
    pub id: ArcId,
    pub label: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub value: &'a T,
}

impl<T> FractalGraph<T> {
    /// Builds the nested view rooted at `node`.
    ///
    /// # Errors
    /// `NotFound` if `node` is unknown.
    pub fn snapshot(&self, node: NodeId) -> Result<NodeSnapshot<'_, T>> {
        let data = self.node_ref(node)?;

        let children = data
            .children()
            .iter()
            .map(|&child| self.snapshot(child))
            .collect::<Result<Vec<_>>>()?;

        let arcs = data
            .arcs()
            .iter()
            .map(|&id| {
                let arc = self.arc_ref(id)?;
                Ok(ArcSnapshot {
                    id,
                    label: arc.label(),
                    source: self.node_ref(arc.source())?.label(),
                    target: self.node_ref(arc.target())?.label(),
                    value: arc.value(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(NodeSnapshot {
            id: node,
            label: data.label(),
            children,
            arcs,
        })
    }
}

impl<T: Serialize> FractalGraph<T> {
    /// Pretty-printed JSON rendering of [`snapshot`](Self::snapshot).
    ///
    /// # Errors
    /// `NotFound` if `node` is unknown, `Serialize` if a weight fails to
    /// serialize.
    pub fn export_json(&self, node: NodeId) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot(node)?)?)
    }

    /// Writes [`export_json`](Self::export_json) to `path`.
    ///
    /// # Errors
    /// As [`export_json`](Self::export_json), plus `Io` if the file cannot be
    /// written.
    pub fn save_json(&self, node: NodeId, path: impl AsRef<Path>) -> Result<()> {
        write_text(path.as_ref(), &self.export_json(node)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn nested() -> (FractalGraph<u32>, NodeId) {
        let mut graph = FractalGraph::new();
        let root = graph.create_node("root");
        let sub = graph.create_node("Sub");
        let leaf = graph.create_node("Leaf");
        graph.add_nodes(root, &[sub, leaf]).unwrap();
        let inner = graph.create_node("inner");
        graph.add_node(sub, inner).unwrap();
        let arc = graph.create_arc("down", sub, leaf, 7).unwrap();
        graph.add_arc(root, arc).unwrap();
        (graph, root)
    }

    #[test]
    fn snapshot_mirrors_nesting() {
        let (graph, root) = nested();
        let snap = graph.snapshot(root).unwrap();

        assert_eq!(snap.label, "root");
        assert_eq!(snap.children.len(), 2);
        assert_eq!(snap.children[0].label, "Sub");
        assert_eq!(snap.children[0].children[0].label, "inner");
        assert_eq!(snap.arcs[0].source, "Sub");
        assert_eq!(snap.arcs[0].target, "Leaf");
        assert_eq!(*snap.arcs[0].value, 7);
    }

    #[test]
    fn json_contains_weights_and_labels() {
        let (graph, root) = nested();
        let value: Value = serde_json::from_str(&graph.export_json(root).unwrap()).unwrap();

        assert_eq!(value["label"], json!("root"));
        assert_eq!(value["children"][0]["children"][0]["label"], json!("inner"));
        assert_eq!(value["arcs"][0]["label"], json!("down"));
        assert_eq!(value["arcs"][0]["value"], json!(7));
        assert!(value["id"].is_u64());
    }

    #[test]
    fn save_json_writes_file() {
        let (graph, root) = nested();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        graph.save_json(root, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, graph.export_json(root).unwrap());
    }
}
