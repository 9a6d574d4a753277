//! # trust-flow
//!
//! Maximum transferable value between two accounts in a
//! personalized-credit / trust network (of the Circles kind), with a
//! concrete sequence of token-denominated transfers that realizes it.
//!
//! Each account issues its own token and trusts other accounts to redeem
//! that token at a per-trust-relation capacity; the network is therefore a
//! multi-edge graph (several edges may connect the same pair of accounts,
//! each carrying a distinct token). This crate computes, for a given
//! `(source, sink, requested)`, the largest flow of value movable from
//! `source` to `sink` without exceeding `requested`, and decomposes it
//! into real per-token transfers.
//!
//! ## Modules
//!
//! - [`graph`] - the trust-graph model plus its three algorithms: the
//!   multi-edge-to-simple-graph builder, the max-flow solver, and the
//!   transfer extractor.
//!
//! ## Quick start
//!
//! ```rust
//! use trust_flow::graph::{Edge, EdgeSet};
//! use trust_flow::{compute_flow, Address, TokenAmount};
//!
//! let alice = Address::from_bytes([1; 20]);
//! let bob = Address::from_bytes([2; 20]);
//! let token_alice = Address::from_bytes([0xA; 20]);
//!
//! let mut edges = EdgeSet::new();
//! edges.insert(Edge::new(alice, bob, token_alice, TokenAmount::from_u64(10)).unwrap());
//!
//! let (flow, transfers) =
//!     compute_flow(alice, bob, &edges, TokenAmount::from_u64(100)).unwrap();
//! assert_eq!(flow, TokenAmount::from_u64(10));
//! assert_eq!(transfers.len(), 1);
//! ```
//!
//! ## Out of scope
//!
//! Ingestion of account/trust data, the on-disk snapshot format, the
//! incremental trust/mint/transfer event log, a JSON command surface, and
//! a process CLI are all external collaborators this crate does not
//! implement — it depends only on a read-only [`graph::EdgeSet`]
//! enumeration and, optionally, a token-issuer lookup used solely for
//! annotating results when rendering output.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod graph;

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;

use graph::{build_adjacency, extract_transfers, solve, Edge, EdgeSet};

/// Compute the maximum flow from `source` to `sink` over `edges`, up to
/// `requested`, and the ordered list of concrete transfers that realizes
/// it.
///
/// `requested == TokenAmount::ZERO` and `source == sink` both short-circuit
/// to `(0, [])` without building a graph at all, matching the boundary
/// behaviour callers rely on for cheap no-op queries.
#[tracing::instrument(level = "debug", skip(edges), fields(edge_count = edges.len()))]
pub fn compute_flow(
    source: Address,
    sink: Address,
    edges: &EdgeSet,
    requested: TokenAmount,
) -> Result<(TokenAmount, Vec<Edge>)> {
    if requested.is_zero() || source == sink {
        return Ok((TokenAmount::ZERO, Vec::new()));
    }

    let adjacency = build_adjacency(edges);
    let result = solve(source, sink, &adjacency, requested)?;
    tracing::debug!(
        flow = %result.flow,
        iterations = result.iterations,
        solve_time_seconds = result.solve_time_seconds,
        "flow computed"
    );

    let transfers = extract_transfers(source, sink, result.flow, result.used_edges)?;
    Ok((result.flow, transfers))
}

/// Superset of [`compute_flow`] that also returns [`SolverStats`] for
/// callers that want observability (iteration count, solve time, transfer
/// count) without changing the primary call's signature.
pub fn compute_flow_with_stats(
    source: Address,
    sink: Address,
    edges: &EdgeSet,
    requested: TokenAmount,
) -> Result<(TokenAmount, Vec<Edge>, SolverStats)> {
    if requested.is_zero() || source == sink {
        return Ok((TokenAmount::ZERO, Vec::new(), SolverStats::default()));
    }

    let adjacency = build_adjacency(edges);
    let result = solve(source, sink, &adjacency, requested)?;
    let transfers = extract_transfers(source, sink, result.flow, result.used_edges.clone())?;

    let stats = SolverStats {
        solve_time_seconds: result.solve_time_seconds,
        iterations: result.iterations,
        transfer_count: transfers.len(),
    };
    Ok((result.flow, transfers, stats))
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::graph::{Edge, EdgeSet, Node};
    pub use crate::{compute_flow, compute_flow_with_stats, Address, Error, Result, TokenAmount};
}
