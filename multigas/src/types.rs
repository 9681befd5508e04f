//! Measurements reported by block execution.

use bytes::Bytes;

/// A dimension of resource usage that gas is charged for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Gas that could not be attributed to any other dimension.
    Unknown,
    Computation,
    HistoryGrowth,
    StorageAccess,
    StorageGrowth,
    L1Calldata,
    L2Calldata,
    WasmComputation,
}

impl ResourceKind {
    /// Number of resource dimensions.
    pub const COUNT: usize = 8;

    /// Every resource dimension, in index order.
    pub const ALL: [ResourceKind; Self::COUNT] = [
        ResourceKind::Unknown,
        ResourceKind::Computation,
        ResourceKind::HistoryGrowth,
        ResourceKind::StorageAccess,
        ResourceKind::StorageGrowth,
        ResourceKind::L1Calldata,
        ResourceKind::L2Calldata,
        ResourceKind::WasmComputation,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Gas used by a single transaction, split by [ResourceKind].
///
/// The refund is tracked separately and is not part of [MultiGas::total].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MultiGas {
    gas: [u64; ResourceKind::COUNT],
    refund: u64,
}

impl MultiGas {
    /// Returns a [MultiGas] with every dimension set to zero.
    pub const fn zero() -> Self {
        Self {
            gas: [0; ResourceKind::COUNT],
            refund: 0,
        }
    }

    /// Returns a [MultiGas] with only computation gas set.
    pub fn computation(amount: u64) -> Self {
        Self::zero().with(ResourceKind::Computation, amount)
    }

    /// Builds a [MultiGas] from `(kind, amount)` pairs.
    ///
    /// Amounts for a repeated kind are added (saturating).
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ResourceKind, u64)>) -> Self {
        let mut multi_gas = Self::zero();
        for (kind, amount) in pairs {
            let current = multi_gas.get(kind);
            multi_gas.set(kind, current.saturating_add(amount));
        }
        multi_gas
    }

    /// Returns the gas used in `kind`.
    pub const fn get(&self, kind: ResourceKind) -> u64 {
        self.gas[kind.index()]
    }

    /// Sets the gas used in `kind`.
    pub fn set(&mut self, kind: ResourceKind, amount: u64) {
        self.gas[kind.index()] = amount;
    }

    /// Returns a copy with the gas used in `kind` set to `amount`.
    pub fn with(mut self, kind: ResourceKind, amount: u64) -> Self {
        self.set(kind, amount);
        self
    }

    /// Returns the gas refunded to the sender.
    pub const fn refund(&self) -> u64 {
        self.refund
    }

    /// Returns a copy with the refund set to `amount`.
    pub fn with_refund(mut self, amount: u64) -> Self {
        self.refund = amount;
        self
    }

    /// Sum of all dimensions, saturating at [u64::MAX].
    pub fn total(&self) -> u64 {
        self.gas
            .iter()
            .fold(0u64, |total, amount| total.saturating_add(*amount))
    }
}

/// Gas measurements of one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionMultiGas {
    /// Opaque transaction identifier.
    pub tx_hash: Bytes,
    /// Zero-based position of the transaction in its block.
    pub tx_index: u32,
    pub multi_gas: MultiGas,
}

/// Identity of a finalised block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    pub number: u64,
    pub hash: Bytes,
    pub timestamp: u64,
}
