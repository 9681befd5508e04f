use super::{config::TRANSACTION_PREALLOC, Message};
use crate::{
    wire::{BlockMultiGasData, TransactionMultiGasData},
    BlockInfo, TransactionMultiGas,
};
use tracing::{debug, error, trace, warn};

/// Whether a block is currently open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Phase {
    /// No block has been started since the last finalise.
    Idle,

    /// A block was started and transactions are attributed to it.
    ///
    /// `number` is the block number announced by the start message, if any.
    Collecting { number: Option<u64> },
}

/// Result of applying a [Message] to the [Buffer].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Outcome {
    /// A block was opened, discarding `orphaned` transactions of an unfinished one.
    Started { orphaned: usize },

    /// A transaction was added to the open block.
    Buffered,

    /// A transaction arrived while no block was open and was discarded.
    Orphaned,

    /// A block was appended to the batch. When `full`, the batch must be flushed.
    Finalised { full: bool },

    /// A finalise message did not match the open block and was ignored.
    Rejected,
}

/// Groups transactions under their block and blocks into batches.
///
/// Transactions belong to the block opened by the most recent [Message::StartBlock] and are
/// moved into it by the next [Message::FinaliseBlock].
pub(super) struct Buffer {
    batch_size: usize,
    phase: Phase,

    /// Transactions of the open block, in arrival order.
    pending: Vec<TransactionMultiGasData>,

    /// Finalised blocks waiting to be flushed.
    blocks: Vec<BlockMultiGasData>,
}

impl Buffer {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            phase: Phase::Idle,
            pending: Vec::with_capacity(TRANSACTION_PREALLOC),
            blocks: Vec::with_capacity(batch_size),
        }
    }

    /// Apply a message to the buffered state.
    pub fn apply(&mut self, message: Message) -> Outcome {
        match message {
            Message::StartBlock { number } => self.start(number),
            Message::Transaction(tx) => self.transaction(tx),
            Message::FinaliseBlock(block) => self.finalise(block),
        }
    }

    fn start(&mut self, number: Option<u64>) -> Outcome {
        // Transactions of a block that was never finalised are discarded without complaint
        let orphaned = self.pending.len();
        if orphaned > 0 {
            debug!(orphaned, ?number, "discarding transactions of unfinalised block");
            self.pending.clear();
        }
        self.phase = Phase::Collecting { number };
        Outcome::Started { orphaned }
    }

    fn transaction(&mut self, tx: TransactionMultiGas) -> Outcome {
        if self.phase == Phase::Idle {
            warn!(tx_index = tx.tx_index, "transaction outside of block: discarding");
            return Outcome::Orphaned;
        }
        trace!(tx_index = tx.tx_index, "buffered transaction");
        self.pending.push(tx.into());
        Outcome::Buffered
    }

    fn finalise(&mut self, block: BlockInfo) -> Outcome {
        if let Phase::Collecting {
            number: Some(open),
        } = self.phase
        {
            if open != block.number {
                error!(open, finalised = block.number, "finalised block is not the open block");
                return Outcome::Rejected;
            }
        }

        let mut data = BlockMultiGasData::from(block);
        data.transactions = std::mem::replace(
            &mut self.pending,
            Vec::with_capacity(TRANSACTION_PREALLOC),
        );
        trace!(
            block = data.block_number,
            transactions = data.transactions.len(),
            "finalised block"
        );
        self.blocks.push(data);
        self.phase = Phase::Idle;
        Outcome::Finalised {
            full: self.blocks.len() >= self.batch_size,
        }
    }

    /// Discard the transactions of the open block, returning how many were dropped.
    pub fn discard_pending(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        self.phase = Phase::Idle;
        discarded
    }

    /// Remove and return all finalised blocks.
    pub fn take_blocks(&mut self) -> Vec<BlockMultiGasData> {
        std::mem::replace(&mut self.blocks, Vec::with_capacity(self.batch_size))
    }

    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
