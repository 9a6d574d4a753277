//! Property-based tests over randomly generated small multi-edge graphs.
//!
//! Complements the literal scenarios in `builder.rs`/`flow.rs`/`transfer.rs`
//! with the quantified invariants every run must satisfy regardless of
//! input: capacity respect, flow conservation, and determinism.

use super::{Edge, EdgeSet};
use crate::{compute_flow, Address, TokenAmount};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn addr(i: u8) -> Address {
    Address::from_bytes([i; 20])
}

/// A handful of distinct real addresses and two distinct tokens is enough
/// to exercise shared pseudo-nodes, multi-edges, and cycles back through
/// the source without the state space exploding.
fn edge_set_strategy() -> impl Strategy<Value = EdgeSet> {
    proptest::collection::vec((0u8..4, 0u8..4, 0u8..2, 1u64..20), 0..10).prop_map(|raw| {
        let mut edges = EdgeSet::new();
        for (from_idx, to_idx, token_idx, capacity) in raw {
            if from_idx == to_idx {
                continue;
            }
            let from = addr(from_idx);
            let to = addr(to_idx);
            let token = addr(100 + token_idx);
            edges.insert(Edge::new(from, to, token, TokenAmount::from_u64(capacity)).unwrap());
        }
        edges
    })
}

proptest! {
    #[test]
    fn flow_conserves_and_respects_capacity(
        edges in edge_set_strategy(),
        requested in 1u64..50,
    ) {
        let source = addr(0);
        let sink = addr(1);
        let requested = TokenAmount::from_u64(requested);

        let (flow, transfers) = compute_flow(source, sink, &edges, requested).unwrap();
        prop_assert!(flow <= requested);

        let mut out_total: BTreeMap<Address, TokenAmount> = BTreeMap::new();
        let mut in_total: BTreeMap<Address, TokenAmount> = BTreeMap::new();
        let mut per_edge: BTreeMap<(Address, Address, Address), TokenAmount> = BTreeMap::new();
        for transfer in &transfers {
            let out_entry = out_total.entry(transfer.from).or_insert(TokenAmount::ZERO);
            *out_entry = out_entry.checked_add(transfer.capacity).unwrap();
            let in_entry = in_total.entry(transfer.to).or_insert(TokenAmount::ZERO);
            *in_entry = in_entry.checked_add(transfer.capacity).unwrap();
            let key = (transfer.from, transfer.to, transfer.token);
            let edge_entry = per_edge.entry(key).or_insert(TokenAmount::ZERO);
            *edge_entry = edge_entry.checked_add(transfer.capacity).unwrap();
        }

        let get = |map: &BTreeMap<Address, TokenAmount>, a: Address| {
            map.get(&a).copied().unwrap_or(TokenAmount::ZERO)
        };

        // Net flow: source emits exactly `flow` more than it absorbs (even
        // if a cycle routes some flow back through it), sink absorbs
        // exactly `flow` more than it emits.
        prop_assert_eq!(
            get(&out_total, source).checked_sub(get(&in_total, source)),
            Some(flow)
        );
        prop_assert_eq!(
            get(&in_total, sink).checked_sub(get(&out_total, sink)),
            Some(flow)
        );

        // Every other address that appears in the transfer list is a pure
        // pass-through: what comes in must equal what goes out.
        let mut intermediates: std::collections::BTreeSet<Address> =
            out_total.keys().copied().collect();
        intermediates.extend(in_total.keys().copied());
        intermediates.remove(&source);
        intermediates.remove(&sink);
        for node in intermediates {
            prop_assert_eq!(get(&in_total, node), get(&out_total, node));
        }

        // No emitted transfer exceeds the capacity of the input edge it
        // rides on.
        for edge in edges.edges() {
            let key = (edge.from, edge.to, edge.token);
            let used = per_edge.get(&key).copied().unwrap_or(TokenAmount::ZERO);
            prop_assert!(used <= edge.capacity);
        }

        let (flow_again, transfers_again) =
            compute_flow(source, sink, &edges, requested).unwrap();
        prop_assert_eq!(flow, flow_again);
        prop_assert_eq!(transfers, transfers_again);
    }

    #[test]
    fn increasing_requested_never_decreases_flow(
        edges in edge_set_strategy(),
        requested in 1u64..25,
    ) {
        let source = addr(0);
        let sink = addr(1);

        let (small, _) =
            compute_flow(source, sink, &edges, TokenAmount::from_u64(requested)).unwrap();
        let (large, _) =
            compute_flow(source, sink, &edges, TokenAmount::from_u64(requested * 2)).unwrap();
        prop_assert!(large >= small);
    }
}
