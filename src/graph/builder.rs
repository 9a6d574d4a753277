//! Graph Builder: multi-edge trust graph → simple directed capacity graph.
//!
//! For each trust edge `(from, to, token, capacity)` this introduces the
//! pseudo-node `Pseudo(from, token)` and writes two simple-graph edges:
//!
//! - `from → Pseudo(from, token)`, capacity `max(existing, capacity)` — the
//!   sender's single balance constraint for this token.
//! - `Pseudo(from, token) → to`, capacity `capacity` — the per-truster
//!   limit.
//!
//! Two edges that share `(from, token)` but differ in `to` therefore share
//! the pseudo-node and its single upstream capacity; the `max` (not a sum)
//! is the entire point of the reduction.

use super::{CapacityMap, EdgeSet, Node};

/// Build the simple capacity graph for an edge set.
///
/// Pure function of its input: allocates only the output map, performs no
/// I/O, and cannot fail.
pub fn build_adjacency(edges: &EdgeSet) -> CapacityMap {
    let mut adjacency: CapacityMap = CapacityMap::new();

    for edge in edges.edges() {
        let from = Node::Real(edge.from);
        let to = Node::Real(edge.to);
        let pseudo = edge.pseudo_node();

        let upstream = adjacency.entry(from).or_default().entry(pseudo).or_default();
        if edge.capacity > *upstream {
            *upstream = edge.capacity;
        }

        adjacency.entry(pseudo).or_default().insert(to, edge.capacity);
    }

    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use crate::{Address, TokenAmount};

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn single_edge_produces_two_hops() {
        let a = addr(1);
        let b = addr(2);
        let t = addr(0xA);
        let edges = EdgeSet::from_iter([Edge::new(a, b, t, TokenAmount::from_u64(10)).unwrap()]);

        let adjacency = build_adjacency(&edges);
        let pseudo = Node::Pseudo(a, t);

        assert_eq!(
            adjacency[&Node::Real(a)][&pseudo],
            TokenAmount::from_u64(10)
        );
        assert_eq!(
            adjacency[&pseudo][&Node::Real(b)],
            TokenAmount::from_u64(10)
        );
    }

    #[test]
    fn shared_pseudo_node_takes_max_not_sum() {
        let a = addr(1);
        let b = addr(2);
        let c = addr(3);
        let t = addr(0xA);
        let edges = EdgeSet::from_iter([
            Edge::new(a, b, t, TokenAmount::from_u64(10)).unwrap(),
            Edge::new(a, c, t, TokenAmount::from_u64(10)).unwrap(),
        ]);

        let adjacency = build_adjacency(&edges);
        let pseudo = Node::Pseudo(a, t);

        // Must be max(10, 10) = 10, never 20.
        assert_eq!(
            adjacency[&Node::Real(a)][&pseudo],
            TokenAmount::from_u64(10)
        );
        assert_eq!(adjacency[&pseudo].len(), 2);
    }

    #[test]
    fn upstream_capacity_is_max_of_unequal_edges() {
        let a = addr(1);
        let b = addr(2);
        let c = addr(3);
        let t = addr(0xA);
        let edges = EdgeSet::from_iter([
            Edge::new(a, b, t, TokenAmount::from_u64(3)).unwrap(),
            Edge::new(a, c, t, TokenAmount::from_u64(7)).unwrap(),
        ]);

        let adjacency = build_adjacency(&edges);
        let pseudo = Node::Pseudo(a, t);
        assert_eq!(
            adjacency[&Node::Real(a)][&pseudo],
            TokenAmount::from_u64(7)
        );
    }

    #[test]
    fn builder_is_idempotent() {
        let a = addr(1);
        let b = addr(2);
        let t = addr(0xA);
        let edges = EdgeSet::from_iter([Edge::new(a, b, t, TokenAmount::from_u64(10)).unwrap()]);

        let first = build_adjacency(&edges);
        let second = build_adjacency(&edges);
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_tokens_between_same_pair_stay_separate() {
        let a = addr(1);
        let b = addr(2);
        let t1 = addr(0xA);
        let t2 = addr(0xB);
        let edges = EdgeSet::from_iter([
            Edge::new(a, b, t1, TokenAmount::from_u64(3)).unwrap(),
            Edge::new(a, b, t2, TokenAmount::from_u64(4)).unwrap(),
        ]);

        let adjacency = build_adjacency(&edges);
        assert_eq!(adjacency[&Node::Real(a)].len(), 2);
    }
}
