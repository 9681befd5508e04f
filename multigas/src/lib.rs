//! Batch per-block multi-dimensional gas measurements to disk.
//!
//! # Overview
//!
//! Block execution reports, for every transaction, how much gas was spent in each resource
//! dimension (computation, storage access, storage growth, history growth, ...). This crate
//! collects those measurements off the hot path and persists them in fixed-size batches:
//!
//! - Producers hold a [collector::Mailbox] and emit, per block, a start message, one message per
//!   transaction and a finalise message carrying the block identity. Submission never blocks: when
//!   the bounded queue is full the message is dropped and the drop is logged.
//! - A single [collector::Actor] task groups transactions under their block and, once
//!   `batch_size` blocks have been finalised, writes them as one protobuf file named after the
//!   first and last block numbers it contains.
//! - On shutdown the actor drains whatever is already queued and writes the remaining partial
//!   batch.
//!
//! # Example
//!
//! ```rust
//! use commonware_runtime::{deterministic, Runner};
//! use multigas_collector::{
//!     collector::{Actor, Config},
//!     BlockInfo, MultiGas, TransactionMultiGas,
//! };
//!
//! let dir = tempfile::tempdir().unwrap();
//! let executor = deterministic::Runner::default();
//! executor.start(|context| async move {
//!     let cfg = Config {
//!         output_dir: dir.path().to_path_buf(),
//!         batch_size: 100,
//!         clear_output_dir: false,
//!     };
//!     let (actor, mailbox) = Actor::new(context, cfg).unwrap();
//!     let running = actor.start().unwrap();
//!
//!     mailbox.start_block(Some(1));
//!     mailbox.add_transaction(TransactionMultiGas {
//!         tx_hash: vec![0xaa; 32].into(),
//!         tx_index: 0,
//!         multi_gas: MultiGas::computation(21_000),
//!     });
//!     mailbox.finalise_block(BlockInfo {
//!         number: 1,
//!         hash: vec![0xbb; 32].into(),
//!         timestamp: 1_700_000_000,
//!     });
//!
//!     // Drains the mailbox and writes the partial batch
//!     running.stop().await;
//! });
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub mod collector;
mod flags;
pub use flags::Flags;
mod types;
pub use types::{BlockInfo, MultiGas, ResourceKind, TransactionMultiGas};
pub mod wire;

/// Errors that can occur when configuring, starting or flushing the collector.
#[derive(Debug, Error)]
pub enum Error {
    #[error("output directory is required")]
    OutputDirRequired,
    #[error("batch size must be greater than zero")]
    BatchSizeRequired,
    #[error("failed to clear output directory {0}: {1}")]
    ClearOutputDir(PathBuf, #[source] std::io::Error),
    #[error("failed to create output directory {0}: {1}")]
    CreateOutputDir(PathBuf, #[source] std::io::Error),
    #[error("batch has no blocks")]
    EmptyBatch,
    #[error("failed to encode batch: {0}")]
    Encode(#[from] prost::EncodeError),
    #[error("batch file already exists: {0}")]
    BatchExists(PathBuf),
    #[error("failed to write batch {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),
}
