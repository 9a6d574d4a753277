//! Common types used across the trust-flow graph algorithms

use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An account identity (20 bytes, Ethereum-address-shaped).
///
/// Also doubles as a token identity: the token minted by an account shares
/// that account's address. `Address` supports equality and a total order
/// for deterministic tie-breaks; it has no arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(H160);

impl Address {
    /// Build an address from its 20-byte big-endian representation.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(H160(bytes))
    }

    /// The all-zero address, mostly useful in tests and as a sentinel.
    pub const fn zero() -> Self {
        Self(H160::zero())
    }

    /// Raw 20-byte representation.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0 .0
    }
}

impl From<H160> for Address {
    fn from(value: H160) -> Self {
        Self(value)
    }
}

impl From<Address> for H160 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A non-negative, arbitrary-precision token amount.
///
/// Backed by a 256-bit integer, large enough to hold the sum of all edge
/// capacities in any realistic deployment without overflow. Used for edge
/// capacities, flow values, and the `MAX` sentinel bottleneck.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// The additive identity.
    pub const ZERO: TokenAmount = TokenAmount(U256::zero());

    /// A sentinel strictly larger than any reachable capacity; used as the
    /// initial bottleneck of an augmenting path search.
    pub const MAX: TokenAmount = TokenAmount(U256::MAX);

    /// Construct from a plain `u64`, the common case in tests and small
    /// fixtures.
    pub const fn from_u64(value: u64) -> Self {
        Self(U256([value, 0, 0, 0]))
    }

    /// Returns true if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Saturating subtraction: never underflows, clamps to zero instead.
    ///
    /// Well-formed callers never rely on the clamp (the minuend is always
    /// at least the subtrahend by construction); use
    /// [`TokenAmount::checked_sub`] at trust boundaries where that
    /// invariant cannot be assumed.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Checked subtraction, returning `None` on underflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Checked addition, returning `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// The smaller of two amounts.
    pub fn min(self, rhs: Self) -> Self {
        if self <= rhs {
            self
        } else {
            rhs
        }
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl std::ops::Add for TokenAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for TokenAmount {
    type Output = Self;

    /// Panics on underflow (the well-formed-input invariant); see
    /// [`TokenAmount::saturating_sub`] / [`TokenAmount::checked_sub`] when
    /// that invariant is not guaranteed.
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Solver status after a flow computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    /// A flow was found, possibly zero (e.g. disconnected source/sink).
    Optimal,
    /// The solver hit its requested ceiling before exhausting augmenting
    /// paths (`flow == requested`; more may have been available).
    Clamped,
}

/// Statistics from a single `compute_flow` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverStats {
    /// Time spent solving (seconds).
    pub solve_time_seconds: f64,
    /// Number of augmenting-path iterations performed.
    pub iterations: usize,
    /// Number of transfers in the final extraction.
    pub transfer_count: usize,
}
