use crate::{BlockInfo, TransactionMultiGas};
use prometheus_client::metrics::counter::Counter;
use std::fmt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

/// Message types that can be sent to the [Mailbox].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Open a new block, discarding any transactions of a block that was never finalised.
    ///
    /// When `number` is provided, the matching [Message::FinaliseBlock] must carry the same
    /// block number or it is rejected.
    StartBlock { number: Option<u64> },

    /// Gas measurements of a transaction in the open block.
    Transaction(TransactionMultiGas),

    /// Close the open block with its identity.
    FinaliseBlock(BlockInfo),
}

impl Message {
    /// Short name of the message variant, used in logs.
    pub const fn kind(&self) -> Kind {
        match self {
            Message::StartBlock { .. } => Kind::StartBlock,
            Message::Transaction(_) => Kind::Transaction,
            Message::FinaliseBlock(_) => Kind::FinaliseBlock,
        }
    }
}

/// Payload-free discriminant of a [Message].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    StartBlock,
    Transaction,
    FinaliseBlock,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::StartBlock => "start_block",
            Kind::Transaction => "transaction",
            Kind::FinaliseBlock => "finalise_block",
        };
        f.write_str(name)
    }
}

/// Ingress mailbox for [Actor](super::Actor).
///
/// Sending never waits on the actor: when the queue is full the message is dropped.
#[derive(Clone)]
pub struct Mailbox {
    sender: mpsc::Sender<Message>,
    dropped: Counter,
}

impl Mailbox {
    pub(super) fn new(sender: mpsc::Sender<Message>, dropped: Counter) -> Self {
        Self { sender, dropped }
    }

    /// Enqueue a message for the actor without blocking.
    ///
    /// Returns `false` if the message was dropped, either because the queue is full or because
    /// the actor is no longer running.
    pub fn submit(&self, message: Message) -> bool {
        match self.sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                let capacity = self.sender.max_capacity();
                warn!(
                    capacity,
                    len = capacity - self.sender.capacity(),
                    kind = %message.kind(),
                    "mailbox full: dropping message"
                );
                self.dropped.inc();
                false
            }
            Err(TrySendError::Closed(message)) => {
                debug!(kind = %message.kind(), "mailbox closed: dropping message");
                false
            }
        }
    }

    /// Open block `number` (if known).
    pub fn start_block(&self, number: Option<u64>) {
        self.submit(Message::StartBlock { number });
    }

    /// Record the gas used by a transaction of the open block.
    pub fn add_transaction(&self, tx: TransactionMultiGas) {
        self.submit(Message::Transaction(tx));
    }

    /// Close the open block.
    pub fn finalise_block(&self, block: BlockInfo) {
        self.submit(Message::FinaliseBlock(block));
    }
}

impl fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailbox").finish_non_exhaustive()
    }
}
