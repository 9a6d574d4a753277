//! The trust-graph model and the three algorithms that operate on it.
//!
//! - [`builder`] — turns multi-edges into a simple capacity graph by
//!   introducing one pseudo-node per `(sender, token)` pair.
//! - [`flow`] — augmenting-path max flow with a capacity-preferring
//!   tie-break, up to a requested ceiling.
//! - [`transfer`] — decomposes the flow's used-edge map back into concrete
//!   per-token transfers between real accounts.
//!
//! ## Graph representation
//!
//! Unlike the wider optimization stack this crate grew out of (which
//! represents graphs with [`petgraph`](https://docs.rs/petgraph) node/edge
//! indices), the trust graph is keyed by [`Node`] directly: nodes are
//! either real accounts or synthetic pseudo-nodes, there is no fixed node
//! count known up front, and the algorithms need a deterministic iteration
//! order rather than petgraph's arena order. A `BTreeMap<Node,
//! BTreeMap<Node, TokenAmount>>` adjacency gives both: natural keying and a
//! total order for free.
//!
//! ## Example: end-to-end flow
//!
//! ```
//! use trust_flow::graph::{Edge, EdgeSet};
//! use trust_flow::{compute_flow, Address, TokenAmount};
//!
//! let a = Address::from_bytes([1; 20]);
//! let b = Address::from_bytes([2; 20]);
//! let t_a = Address::from_bytes([0xA; 20]);
//!
//! let edges = EdgeSet::from_iter([Edge::new(a, b, t_a, TokenAmount::from_u64(10)).unwrap()]);
//! let (flow, transfers) = compute_flow(a, b, &edges, TokenAmount::from_u64(100)).unwrap();
//! assert_eq!(flow, TokenAmount::from_u64(10));
//! assert_eq!(transfers.len(), 1);
//! ```

pub mod builder;
pub mod flow;
pub mod transfer;

#[cfg(test)]
mod proptests;

pub use builder::build_adjacency;
pub use flow::solve;
pub use transfer::extract_transfers;

use crate::{Address, Error, Result, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A vertex of the simple capacity graph the [`builder`] produces.
///
/// Either a real account, or a synthetic pseudo-node introduced to split a
/// sender's outgoing multi-edges for one token across several recipients
/// while still sharing a single upstream balance constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Node {
    /// An account in the trust network.
    Real(Address),
    /// `Pseudo(from, token)`: the synthetic split point for everything
    /// `from` sends out denominated in `token`.
    Pseudo(Address, Address),
}

impl Node {
    /// Returns the wrapped address if this is a [`Node::Real`].
    pub fn as_real(&self) -> Option<Address> {
        match self {
            Node::Real(addr) => Some(*addr),
            Node::Pseudo(..) => None,
        }
    }

    /// Decomposes a pseudo-node into its `(from, token)` pair, or `None` if
    /// called on a [`Node::Real`]. Mirrors [`Node::as_real`]'s shape so
    /// callers on either side of the split handle the "wrong variant" case
    /// the same way, instead of one side panicking and the other
    /// returning an `Option`.
    pub fn as_pseudo(&self) -> Option<(Address, Address)> {
        match self {
            Node::Pseudo(from, token) => Some((*from, *token)),
            Node::Real(_) => None,
        }
    }
}

/// An immutable trust-network edge: `from` trusts `to` to redeem up to
/// `capacity` units of `token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The sender account.
    pub from: Address,
    /// The receiver account.
    pub to: Address,
    /// The token being moved (= the minting account).
    pub token: Address,
    /// Maximum amount transferable along this edge.
    pub capacity: TokenAmount,
}

impl Edge {
    /// Construct an edge, rejecting non-positive capacity.
    ///
    /// The distilled specification allows an implementation to "reject or
    /// silently drop" non-positive capacities; this crate rejects them at
    /// construction, the idiomatic place for it in a typed API, so that
    /// everything downstream can assume `capacity > 0`.
    pub fn new(from: Address, to: Address, token: Address, capacity: TokenAmount) -> Result<Self> {
        if capacity.is_zero() {
            return Err(Error::invalid_argument("edge capacity must be positive"));
        }
        Ok(Self {
            from,
            to,
            token,
            capacity,
        })
    }

    /// The pseudo-node this edge's sender/token pair introduces.
    pub fn pseudo_node(&self) -> Node {
        Node::Pseudo(self.from, self.token)
    }
}

/// A de-duplicated, read-only enumeration of trust edges.
///
/// This is the thin contract §6 of the specification calls for: the core
/// never mutates an `EdgeSet` and never needs to know how it was
/// populated (ingestion, incremental updates, and persistence live outside
/// this crate).
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    edges: BTreeSet<Edge>,
}

impl EdgeSet {
    /// An empty edge set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge, keyed by `(from, to, token)`. If an edge with the
    /// same key already exists, the new one replaces it (last write
    /// wins), matching the builder's policy for a duplicate that slips
    /// past de-duplication.
    pub fn insert(&mut self, edge: Edge) {
        self.edges.retain(|e| {
            !(e.from == edge.from && e.to == edge.to && e.token == edge.token)
        });
        self.edges.insert(edge);
    }

    /// Read-only enumeration of the current edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Number of distinct edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the edge set is empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut set = Self::new();
        for edge in iter {
            set.insert(edge);
        }
        set
    }
}

/// `Node → (Node → TokenAmount)`, used both as the static adjacency built
/// by [`builder::build_adjacency`] and as the mutable residual graph the
/// [`flow`] solver evolves from it.
///
/// Absence of an outer key means "no outgoing edges"; absence of an inner
/// key means "capacity zero". A present zero must be treated as absent by
/// traversal — the solver prunes these opportunistically but never relies
/// on the invariant holding everywhere.
pub type CapacityMap = BTreeMap<Node, BTreeMap<Node, TokenAmount>>;

/// Same shape as [`CapacityMap`], but records flow actually pushed through
/// each directed arc rather than remaining headroom.
pub type UsedEdgeMap = BTreeMap<Node, BTreeMap<Node, TokenAmount>>;

/// Look up `map[from][to]`, treating a missing entry as zero.
pub(crate) fn get_or_zero(map: &CapacityMap, from: &Node, to: &Node) -> TokenAmount {
    map.get(from)
        .and_then(|inner| inner.get(to))
        .copied()
        .unwrap_or(TokenAmount::ZERO)
}
