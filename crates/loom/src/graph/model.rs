use indexmap::IndexMap;
use log::debug;
use serde::{Serialize, ser::SerializeStruct};

use loom_core::{
    geometry::Point,
    identifier::Id,
    semantic::{EdgeKind, NodeKind},
};

/// A graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    label: String,
    rank: usize,
    position: Point,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    active: bool,
}

impl Node {
    fn new(id: Id, kind: NodeKind, label: String) -> Self {
        Self {
            id,
            kind,
            label,
            rank: 0,
            position: Point::default(),
            active: false,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Layout rank; 0 until a layout has run.
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns `true` for the module named by the active-module hint.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// A directed edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    id: String,
    source: Id,
    target: Id,
    kind: EdgeKind,
}

impl Edge {
    /// `<source>-<target>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}

/// Nodes and edges in creation order.
///
/// Every edge endpoint is a node of the same graph, and no edge connects a
/// node to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: IndexMap<Id, Node>,
    edges: IndexMap<(Id, Id), Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with `id` exists.
    ///
    /// Returns `true` if the node was added. An existing node keeps its
    /// original kind and label.
    pub fn add_node(&mut self, id: Id, kind: NodeKind, label: impl Into<String>) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, Node::new(id, kind, label.into()));
        true
    }

    /// Add an edge unless it exists, is a self-loop, or has a missing
    /// endpoint.
    ///
    /// Returns `true` if the edge was added.
    pub fn add_edge(&mut self, source: Id, target: Id, kind: EdgeKind) -> bool {
        if source == target {
            debug!(node:% = source; "Suppressed self-referential edge");
            return false;
        }
        if !self.nodes.contains_key(&source) || !self.nodes.contains_key(&target) {
            debug!(source:% = source, target:% = target; "Dropped dangling edge");
            return false;
        }
        if self.edges.contains_key(&(source, target)) {
            return false;
        }
        self.edges.insert(
            (source, target),
            Edge {
                id: format!("{source}-{target}"),
                source,
                target,
                kind,
            },
        );
        true
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains_node(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns `true` if `id` names a module node.
    pub fn is_module(&self, id: Id) -> bool {
        self.node(id).is_some_and(|node| node.kind() == NodeKind::Module)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Mark the module node named `module` as active.
    ///
    /// Any previously active node is cleared. Returns `false` when no module
    /// node has that name.
    pub fn set_active(&mut self, module: &str) -> bool {
        for node in self.nodes.values_mut() {
            node.active = false;
        }
        let Some(id) = Id::get(module) else {
            return false;
        };
        match self.nodes.get_mut(&id) {
            Some(node) if node.kind == NodeKind::Module => {
                node.active = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// Position of a node in creation order.
    pub(crate) fn node_index(&self, id: Id) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }
}

impl Serialize for Graph {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Graph", 2)?;
        state.serialize_field("nodes", &self.nodes.values().collect::<Vec<_>>())?;
        state.serialize_field("edges", &self.edges.values().collect::<Vec<_>>())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Id::new("m"), NodeKind::Module, "m");
        graph.add_node(Id::new("z"), NodeKind::Input, "z");
        graph
    }

    #[test]
    fn test_add_node_is_idempotent() {
        let mut graph = sample();

        assert!(!graph.add_node(Id::new("m"), NodeKind::Inferred, "other"));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node(Id::new("m")).unwrap().kind(), NodeKind::Module);
    }

    #[test]
    fn test_add_edge_id_and_dedup() {
        let mut graph = sample();

        assert!(graph.add_edge(Id::new("z"), Id::new("m"), EdgeKind::DataFlow));
        assert!(!graph.add_edge(Id::new("z"), Id::new("m"), EdgeKind::DataFlow));

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].id(), "z-m");
    }

    #[test]
    fn test_self_loop_is_suppressed() {
        let mut graph = sample();

        assert!(!graph.add_edge(Id::new("m"), Id::new("m"), EdgeKind::DataFlow));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_dangling_edge_is_dropped() {
        let mut graph = sample();

        assert!(!graph.add_edge(Id::new("m"), Id::new("ghost"), EdgeKind::DataFlow));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_set_active_only_marks_modules() {
        let mut graph = sample();

        assert!(graph.set_active("m"));
        assert!(graph.node(Id::new("m")).unwrap().is_active());

        assert!(!graph.set_active("z"));
        assert!(graph.nodes().all(|node| !node.is_active()));
    }

    #[test]
    fn test_set_active_unknown_name() {
        let mut graph = sample();

        assert!(!graph.set_active("never.declared.active"));
        assert!(Id::get("never.declared.active").is_none());
    }

    #[test]
    fn test_node_index_follows_creation_order() {
        let graph = sample();

        assert_eq!(graph.node_index(Id::new("m")), Some(0));
        assert_eq!(graph.node_index(Id::new("z")), Some(1));
        assert_eq!(graph.node_index(Id::new("x")), None);
    }
}
