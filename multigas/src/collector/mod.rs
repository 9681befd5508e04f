//! Collect multi-gas measurements and persist them in batches.
//!
//! # Overview
//!
//! The [Actor] consumes [Message]s from its [Mailbox] on a single task. Messages describe one
//! block at a time:
//!
//! 1. [Message::StartBlock] opens a block. Transactions buffered for a block that was never
//!    finalised are discarded.
//! 2. [Message::Transaction] adds a transaction to the open block. Transactions that arrive
//!    while no block is open are discarded.
//! 3. [Message::FinaliseBlock] closes the open block with its number, hash and timestamp and
//!    appends it, with its transactions in arrival order, to the current batch. If the start
//!    message announced a block number and it does not match, the finalise is rejected.
//!
//! Once the batch holds `batch_size` blocks it is written to `output_dir` as a single
//! [BlockMultiGasBatch](crate::wire::BlockMultiGasBatch) named
//! `multigas_batch_<first>_<last>.pb` (see [batch_filename]). A batch that cannot be written is
//! logged and discarded: batches are written at most once.
//!
//! # Backpressure
//!
//! [Mailbox::submit] never waits. When [MAILBOX_SIZE] messages are already queued the new
//! message is dropped, logged and counted.
//!
//! # Shutdown
//!
//! [Running::stop] asks the actor to stop and waits for it. The actor closes its mailbox,
//! processes every message that was already queued, discards the transactions of an unfinalised
//! block and writes the remaining blocks as a final (possibly partial) batch. The same happens
//! when the runtime is stopped or every [Mailbox] is dropped.

mod actor;
pub use actor::{Actor, Running};
mod buffer;
mod config;
pub use config::{Config, DEFAULT_BATCH_SIZE, MAILBOX_SIZE};
mod ingress;
pub use ingress::{Kind, Mailbox, Message};
mod metrics;
mod writer;
pub use writer::{batch_filename, BATCH_EXTENSION, BATCH_PREFIX};
