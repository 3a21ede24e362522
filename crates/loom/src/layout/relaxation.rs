//! Bounded iterative relaxation.

use log::trace;

/// Rank `node_count` nodes by relaxing `edges` at most `passes` times.
///
/// Each pass visits edges in order and lifts every target to one past its
/// source. Chains longer than the pass bound can end up under-ranked, and
/// cycles keep climbing until the bound is hit.
pub(super) fn ranks(node_count: usize, edges: &[(usize, usize)], passes: usize) -> Vec<usize> {
    let mut ranks = vec![0; node_count];

    for pass in 0..passes {
        let mut changed = false;
        for &(source, target) in edges {
            if ranks[source] + 1 > ranks[target] {
                ranks[target] = ranks[source] + 1;
                changed = true;
            }
        }
        if !changed {
            trace!(passes = pass + 1; "Relaxation reached a fixed point");
            break;
        }
    }

    ranks
}
