use commonware_runtime::Metrics as RuntimeMetrics;
use prometheus_client::metrics::counter::Counter;

/// Metrics for the [Actor](super::Actor).
#[derive(Default)]
pub struct Metrics {
    /// Number of messages processed by the actor
    pub messages: Counter,
    /// Number of messages dropped because the mailbox was full
    pub dropped: Counter,
    /// Number of transactions discarded because their block was never finalised
    pub orphaned: Counter,
    /// Number of finalise messages rejected for not matching the open block
    pub rejected: Counter,
    /// Number of blocks finalised
    pub blocks: Counter,
    /// Number of batch files written
    pub batches: Counter,
    /// Number of batches lost to encoding or write failures
    pub failed_batches: Counter,
}

impl Metrics {
    /// Create and return a new set of metrics, registered with the given context.
    pub fn init<E: RuntimeMetrics>(context: &E) -> Self {
        let metrics = Self::default();
        context.register(
            "messages",
            "Number of messages processed by the actor",
            metrics.messages.clone(),
        );
        context.register(
            "dropped",
            "Number of messages dropped because the mailbox was full",
            metrics.dropped.clone(),
        );
        context.register(
            "orphaned",
            "Number of transactions discarded because their block was never finalised",
            metrics.orphaned.clone(),
        );
        context.register(
            "rejected",
            "Number of finalise messages rejected for not matching the open block",
            metrics.rejected.clone(),
        );
        context.register(
            "blocks",
            "Number of blocks finalised",
            metrics.blocks.clone(),
        );
        context.register(
            "batches",
            "Number of batch files written",
            metrics.batches.clone(),
        );
        context.register(
            "failed_batches",
            "Number of batches lost to encoding or write failures",
            metrics.failed_batches.clone(),
        );
        metrics
    }
}
