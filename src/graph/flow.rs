//! Flow Solver: repeated augmenting-path search on the residual graph.
//!
//! Each augmenting path is found by a breadth-first search that visits
//! outgoing neighbours in descending order of residual capacity (ties
//! broken by [`Node`]'s total order), which in practice converges far
//! faster than a plain FIFO BFS on graphs with a wide capacity spread —
//! without changing the result. Pushed flow is tracked in a residual
//! capacity map `C` and a used-edge map `U` that remembers which
//! direction of each original arc actually carried flow, so the
//! [`super::transfer`] extractor can later tell a real forward hop from
//! the undoing of a previous reverse push.

use super::{get_or_zero, CapacityMap, Node, UsedEdgeMap};
use crate::{Address, Error, Result, TokenAmount};
use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

/// Everything a caller needs from a single `solve` call.
#[derive(Debug, Clone)]
pub struct FlowResult {
    /// Flow actually achieved, always `<= requested`.
    pub flow: TokenAmount,
    /// Per-arc record of flow pushed, in whichever direction it moved.
    pub used_edges: UsedEdgeMap,
    /// Number of augmenting-path iterations performed.
    pub iterations: usize,
    /// Wall-clock time spent in this call.
    pub solve_time_seconds: f64,
}

/// Run the augmenting-path max-flow search from `source` to `sink` over
/// `adjacency`, stopping once `flow >= requested` or no augmenting path
/// remains.
#[tracing::instrument(level = "debug", skip(adjacency), fields(requested = %requested))]
pub fn solve(
    source: Address,
    sink: Address,
    adjacency: &CapacityMap,
    requested: TokenAmount,
) -> Result<FlowResult> {
    let start = Instant::now();

    let source_node = Node::Real(source);
    let sink_node = Node::Real(sink);

    let mut residual: CapacityMap = adjacency.clone();
    let mut used: UsedEdgeMap = UsedEdgeMap::new();
    let mut flow = TokenAmount::ZERO;
    let mut iterations = 0usize;

    while flow < requested {
        let (bottleneck, parent) = augmenting_path(source_node, sink_node, &residual);
        if bottleneck.is_zero() {
            break;
        }
        iterations += 1;

        let delta = bottleneck.min(requested.saturating_sub(flow));
        tracing::trace!(iteration = iterations, %delta, "pushing augmenting path");
        flow = flow + delta;

        apply_augmentation(
            adjacency,
            &mut residual,
            &mut used,
            &parent,
            source_node,
            sink_node,
            delta,
        )?;
    }

    Ok(FlowResult {
        flow,
        used_edges: used,
        iterations,
        solve_time_seconds: start.elapsed().as_secs_f64(),
    })
}

/// Breadth-first search from `source` to `sink` over the residual graph,
/// visiting each node's neighbours in descending-capacity order (ties
/// broken by `Node`'s total order). Returns the path's bottleneck capacity
/// and a parent map reconstructing it, or `(0, empty)` if `sink` is
/// unreachable.
fn augmenting_path(
    source: Node,
    sink: Node,
    residual: &CapacityMap,
) -> (TokenAmount, BTreeMap<Node, Node>) {
    let mut parent: BTreeMap<Node, Node> = BTreeMap::new();
    let mut queue: VecDeque<(Node, TokenAmount)> = VecDeque::new();
    queue.push_back((source, TokenAmount::MAX));

    while let Some((node, bottleneck)) = queue.pop_front() {
        let Some(neighbours) = residual.get(&node) else {
            continue;
        };

        let mut ordered: Vec<(Node, TokenAmount)> =
            neighbours.iter().map(|(&n, &c)| (n, c)).collect();
        ordered.sort_by(|(a_node, a_cap), (b_node, b_cap)| (b_cap, b_node).cmp(&(a_cap, a_node)));

        for (target, capacity) in ordered {
            if target == source || parent.contains_key(&target) || capacity.is_zero() {
                continue;
            }
            parent.insert(target, node);
            let new_bottleneck = bottleneck.min(capacity);
            if target == sink {
                return (new_bottleneck, parent);
            }
            queue.push_back((target, new_bottleneck));
        }
    }

    (TokenAmount::ZERO, BTreeMap::new())
}

/// Walk the parent chain from `sink` back to `source`, updating the
/// residual capacity and the used-edge bookkeeping for every arc on the
/// path by `delta`.
fn apply_augmentation(
    original: &CapacityMap,
    residual: &mut CapacityMap,
    used: &mut UsedEdgeMap,
    parent: &BTreeMap<Node, Node>,
    source: Node,
    sink: Node,
    delta: TokenAmount,
) -> Result<()> {
    let mut node = sink;
    while node != source {
        let prev = *parent.get(&node).ok_or_else(|| {
            Error::internal("augmenting path parent chain broken before reaching source")
        })?;

        let forward = residual
            .entry(prev)
            .or_default()
            .entry(node)
            .or_insert(TokenAmount::ZERO);
        *forward = forward.checked_sub(delta).ok_or_else(|| {
            Error::internal("residual capacity underflow while applying augmentation")
        })?;

        let backward = residual
            .entry(node)
            .or_default()
            .entry(prev)
            .or_insert(TokenAmount::ZERO);
        *backward = backward.checked_add(delta).ok_or_else(|| {
            Error::internal("residual capacity overflow while applying augmentation")
        })?;

        if get_or_zero(original, &node, &prev).is_zero() {
            // No arc `node -> prev` in the original graph: `prev -> node`
            // is a real forward edge.
            let entry = used
                .entry(prev)
                .or_default()
                .entry(node)
                .or_insert(TokenAmount::ZERO);
            *entry = entry
                .checked_add(delta)
                .ok_or_else(|| Error::internal("used-edge overflow"))?;
        } else {
            // This undoes flow previously pushed on `node -> prev`.
            let entry = used
                .get_mut(&node)
                .and_then(|inner| inner.get_mut(&prev))
                .ok_or_else(|| Error::internal("used-edge underflow: no prior flow to undo"))?;
            *entry = entry.checked_sub(delta).ok_or_else(|| {
                Error::internal("used-edge underflow while undoing prior flow")
            })?;
        }

        node = prev;
    }
    Ok(())
}
