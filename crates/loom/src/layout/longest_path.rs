//! Exact longest-path layering.

use petgraph::{Direction, algo::toposort, graph::DiGraph};

/// Rank nodes by the longest path reaching them.
///
/// Returns `None` when `edges` contain a cycle.
pub(super) fn ranks(node_count: usize, edges: &[(usize, usize)]) -> Option<Vec<usize>> {
    let mut dag = DiGraph::<(), ()>::with_capacity(node_count, edges.len());
    let indices: Vec<_> = (0..node_count).map(|_| dag.add_node(())).collect();
    for &(source, target) in edges {
        dag.add_edge(indices[source], indices[target], ());
    }

    let order = toposort(&dag, None).ok()?;

    let mut ranks = vec![0; node_count];
    for node in order {
        let next = ranks[node.index()] + 1;
        for successor in dag.neighbors_directed(node, Direction::Outgoing) {
            let rank = &mut ranks[successor.index()];
            *rank = (*rank).max(next);
        }
    }
    Some(ranks)
}
