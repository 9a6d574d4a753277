//! Transfer Extractor: used-edge map → ordered real-graph transfers.
//!
//! The flow solver leaves behind a used-edge map describing flow quanta
//! through real accounts and pseudo-nodes alike. This module walks it from
//! `source`, consuming per-account balances and emitting concrete
//! `(from, to, token, amount)` transfers — the only things a caller
//! outside this crate ever needs to actually move value.

use super::{Edge, Node, UsedEdgeMap};
use crate::{Address, Error, Result, TokenAmount};
use std::collections::BTreeMap;

/// Decompose `used_edges` into an ordered list of real transfers moving
/// `flow` units from `source` to `sink`.
///
/// Emission order is the order the balance walk produces; this crate does
/// not re-sort or otherwise post-process the list (an external consumer
/// may impose whatever order it needs).
pub fn extract_transfers(
    source: Address,
    sink: Address,
    flow: TokenAmount,
    mut used_edges: UsedEdgeMap,
) -> Result<Vec<Edge>> {
    let mut transfers = Vec::new();

    if flow.is_zero() {
        return Ok(transfers);
    }

    let mut balances: BTreeMap<Address, TokenAmount> = BTreeMap::new();
    balances.insert(source, flow);

    loop {
        let is_done = balances.is_empty()
            || (balances.len() == 1 && balances.contains_key(&sink));
        if is_done {
            break;
        }

        let (&account, &balance) = balances
            .iter()
            .next()
            .expect("balances checked non-empty above");
        let mut remaining = balance;
        balances.remove(&account);

        let node = Node::Real(account);
        let Some(outgoing) = used_edges.get(&node).map(|m| m.keys().copied().collect::<Vec<_>>())
        else {
            continue;
        };

        for pseudo in outgoing {
            if remaining.is_zero() {
                break;
            }
            let (from, token) = pseudo.as_pseudo().ok_or_else(|| {
                Error::internal("transfer extraction walked an outgoing edge into a non-pseudo node")
            })?;
            debug_assert_eq!(from, account, "pseudo-node owner must match the account it split from");

            let Some(downstream) = used_edges.get(&pseudo) else {
                continue;
            };
            let targets: Vec<Node> = downstream.keys().copied().collect();
            let mut to_prune = Vec::new();

            for target in targets {
                if remaining.is_zero() {
                    break;
                }
                let capacity = used_edges
                    .get(&pseudo)
                    .and_then(|m| m.get(&target))
                    .copied()
                    .unwrap_or(TokenAmount::ZERO);
                if capacity.is_zero() {
                    continue;
                }

                let delta = remaining.min(capacity);
                if delta.is_zero() {
                    continue;
                }

                let to = target.as_real().ok_or_else(|| {
                    Error::internal("transfer extraction reached a pseudo-node as a hop target")
                })?;

                transfers.push(Edge {
                    from,
                    to,
                    token,
                    capacity: delta,
                });

                remaining = remaining.checked_sub(delta).ok_or_else(|| {
                    Error::internal("balance underflow while decomposing used-edge flow")
                })?;

                let new_capacity = capacity.checked_sub(delta).ok_or_else(|| {
                    Error::internal("used-edge capacity underflow during extraction")
                })?;
                used_edges
                    .get_mut(&pseudo)
                    .expect("pseudo entry exists, just read from it")
                    .insert(target, new_capacity);
                if new_capacity.is_zero() {
                    to_prune.push(target);
                }

                let balance_entry = balances.entry(to).or_insert(TokenAmount::ZERO);
                *balance_entry = balance_entry.checked_add(delta).ok_or_else(|| {
                    Error::internal("balance overflow while decomposing used-edge flow")
                })?;
            }

            if let Some(inner) = used_edges.get_mut(&pseudo) {
                for target in to_prune {
                    inner.remove(&target);
                }
            }
        }
    }

    Ok(transfers)
}
