//! Protobuf messages persisted in batch files.
//!
//! ```protobuf
//! message MultiGasData {
//!     uint64 computation = 1;
//!     uint64 storage_access = 2;
//!     uint64 storage_growth = 3;
//!     uint64 history_growth = 4;
//!     optional uint64 unknown = 5;
//!     optional uint64 refund = 6;
//!     optional uint64 l1_calldata = 7;
//!     optional uint64 l2_calldata = 8;
//!     optional uint64 wasm_computation = 9;
//! }
//!
//! message TransactionMultiGasData {
//!     bytes tx_hash = 1;
//!     uint32 tx_index = 2;
//!     MultiGasData multi_gas = 3;
//! }
//!
//! message BlockMultiGasData {
//!     uint64 block_number = 1;
//!     bytes block_hash = 2;
//!     uint64 block_timestamp = 3;
//!     repeated TransactionMultiGasData transactions = 4;
//! }
//!
//! message BlockMultiGasBatch {
//!     repeated BlockMultiGasData data = 1;
//! }
//! ```
//!
//! Optional dimensions are only set when non-zero: an absent field means zero.

use crate::{BlockInfo, MultiGas, ResourceKind, TransactionMultiGas};
use bytes::Bytes;

#[derive(Clone, PartialEq, prost::Message)]
pub struct MultiGasData {
    #[prost(uint64, tag = "1")]
    pub computation: u64,
    #[prost(uint64, tag = "2")]
    pub storage_access: u64,
    #[prost(uint64, tag = "3")]
    pub storage_growth: u64,
    #[prost(uint64, tag = "4")]
    pub history_growth: u64,
    #[prost(uint64, optional, tag = "5")]
    pub unknown: Option<u64>,
    #[prost(uint64, optional, tag = "6")]
    pub refund: Option<u64>,
    #[prost(uint64, optional, tag = "7")]
    pub l1_calldata: Option<u64>,
    #[prost(uint64, optional, tag = "8")]
    pub l2_calldata: Option<u64>,
    #[prost(uint64, optional, tag = "9")]
    pub wasm_computation: Option<u64>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TransactionMultiGasData {
    #[prost(bytes = "bytes", tag = "1")]
    pub tx_hash: Bytes,
    #[prost(uint32, tag = "2")]
    pub tx_index: u32,
    #[prost(message, optional, tag = "3")]
    pub multi_gas: Option<MultiGasData>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BlockMultiGasData {
    #[prost(uint64, tag = "1")]
    pub block_number: u64,
    #[prost(bytes = "bytes", tag = "2")]
    pub block_hash: Bytes,
    #[prost(uint64, tag = "3")]
    pub block_timestamp: u64,
    #[prost(message, repeated, tag = "4")]
    pub transactions: Vec<TransactionMultiGasData>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BlockMultiGasBatch {
    #[prost(message, repeated, tag = "1")]
    pub data: Vec<BlockMultiGasData>,
}

/// Returns `Some(amount)` unless `amount` is zero.
fn non_zero(amount: u64) -> Option<u64> {
    (amount > 0).then_some(amount)
}

impl From<&MultiGas> for MultiGasData {
    fn from(multi_gas: &MultiGas) -> Self {
        Self {
            computation: multi_gas.get(ResourceKind::Computation),
            storage_access: multi_gas.get(ResourceKind::StorageAccess),
            storage_growth: multi_gas.get(ResourceKind::StorageGrowth),
            history_growth: multi_gas.get(ResourceKind::HistoryGrowth),
            unknown: non_zero(multi_gas.get(ResourceKind::Unknown)),
            refund: non_zero(multi_gas.refund()),
            l1_calldata: non_zero(multi_gas.get(ResourceKind::L1Calldata)),
            l2_calldata: non_zero(multi_gas.get(ResourceKind::L2Calldata)),
            wasm_computation: non_zero(multi_gas.get(ResourceKind::WasmComputation)),
        }
    }
}

impl From<&MultiGasData> for MultiGas {
    fn from(data: &MultiGasData) -> Self {
        MultiGas::from_pairs([
            (ResourceKind::Computation, data.computation),
            (ResourceKind::StorageAccess, data.storage_access),
            (ResourceKind::StorageGrowth, data.storage_growth),
            (ResourceKind::HistoryGrowth, data.history_growth),
            (ResourceKind::Unknown, data.unknown.unwrap_or_default()),
            (ResourceKind::L1Calldata, data.l1_calldata.unwrap_or_default()),
            (ResourceKind::L2Calldata, data.l2_calldata.unwrap_or_default()),
            (
                ResourceKind::WasmComputation,
                data.wasm_computation.unwrap_or_default(),
            ),
        ])
        .with_refund(data.refund.unwrap_or_default())
    }
}

impl From<TransactionMultiGas> for TransactionMultiGasData {
    fn from(tx: TransactionMultiGas) -> Self {
        Self {
            tx_hash: tx.tx_hash,
            tx_index: tx.tx_index,
            multi_gas: Some(MultiGasData::from(&tx.multi_gas)),
        }
    }
}

impl From<BlockInfo> for BlockMultiGasData {
    fn from(block: BlockInfo) -> Self {
        Self {
            block_number: block.number,
            block_hash: block.hash,
            block_timestamp: block.timestamp,
            transactions: Vec::new(),
        }
    }
}
