use super::{
    buffer::{Buffer, Outcome},
    metrics::Metrics,
    writer::Writer,
    Config, Mailbox, Message, MAILBOX_SIZE,
};
use crate::Error;
use commonware_macros::select;
use commonware_runtime::{Handle, Metrics as RuntimeMetrics, Spawner};
use futures::channel::oneshot;
use std::{fs, io};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Groups multi-gas messages into blocks and writes them to disk in batches.
///
/// The actor is the only owner of the buffered transactions and blocks: it is moved into the
/// task spawned by [Actor::start] and all mutation happens there.
pub struct Actor<E: Spawner + RuntimeMetrics> {
    context: E,
    clear_output_dir: bool,

    mailbox: mpsc::Receiver<Message>,
    buffer: Buffer,
    writer: Writer,

    metrics: Metrics,
}

impl<E: Spawner + RuntimeMetrics> Actor<E> {
    /// Create a new actor and the [Mailbox] used to feed it.
    ///
    /// Fails if `cfg` has no output directory or a zero batch size. Messages submitted before
    /// [Actor::start] are queued (up to [MAILBOX_SIZE]).
    pub fn new(context: E, cfg: Config) -> Result<(Self, Mailbox), Error> {
        cfg.validate()?;

        let metrics = Metrics::init(&context);
        let (sender, receiver) = mpsc::channel(MAILBOX_SIZE);
        let mailbox = Mailbox::new(sender, metrics.dropped.clone());
        let actor = Self {
            context,
            clear_output_dir: cfg.clear_output_dir,
            mailbox: receiver,
            buffer: Buffer::new(cfg.batch_size),
            writer: Writer::new(cfg.output_dir),
            metrics,
        };
        Ok((actor, mailbox))
    }

    /// Like [Actor::new], but returns `None` when no output directory is configured.
    ///
    /// An empty output directory means collection is disabled rather than misconfigured.
    pub fn maybe_new(context: E, cfg: Config) -> Result<Option<(Self, Mailbox)>, Error> {
        if !cfg.enabled() {
            debug!("no output directory configured: collector disabled");
            return Ok(None);
        }
        Self::new(context, cfg).map(Some)
    }

    /// Prepare the output directory and spawn the consumer task.
    ///
    /// If the output directory cannot be cleared or created the actor is dropped without ever
    /// running, and every later submission to its [Mailbox] is discarded.
    pub fn start(self) -> Result<Running, Error> {
        self.prepare()?;

        let (stop, stopped) = oneshot::channel();
        info!(dir = ?self.writer.dir(), "starting collector");
        let handle = self.context.clone().spawn(move |_| self.run(stopped));
        Ok(Running { stop, handle })
    }

    fn prepare(&self) -> Result<(), Error> {
        let dir = self.writer.dir();
        if self.clear_output_dir {
            match fs::remove_dir_all(dir) {
                Ok(()) => debug!(?dir, "cleared output directory"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => {
                    error!(?dir, ?err, "failed to clear output directory");
                    return Err(Error::ClearOutputDir(dir.to_path_buf(), err));
                }
            }
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(dir).map_err(|err| {
            error!(?dir, ?err, "failed to create output directory");
            Error::CreateOutputDir(dir.to_path_buf(), err)
        })
    }

    /// Inner run loop called by `start`.
    async fn run(mut self, mut stop: oneshot::Receiver<()>) {
        let mut shutdown = self.context.stopped();
        loop {
            let mut next = None;
            select! {
                // Dropping `Running` also resolves `stop`
                _ = &mut stop => {
                    debug!("stop requested");
                    break;
                },
                _ = &mut shutdown => {
                    debug!("runtime shutdown");
                    break;
                },
                message = self.mailbox.recv() => {
                    let Some(message) = message else {
                        debug!("all mailboxes dropped");
                        break;
                    };
                    next = Some(message);
                },
            }
            if let Some(message) = next {
                self.handle(message);
            }
        }
        self.drain();
    }

    fn handle(&mut self, message: Message) {
        self.metrics.messages.inc();
        match self.buffer.apply(message) {
            Outcome::Started { orphaned } => {
                self.metrics.orphaned.inc_by(orphaned as u64);
            }
            Outcome::Buffered => {}
            Outcome::Orphaned => {
                self.metrics.orphaned.inc();
            }
            Outcome::Rejected => {
                self.metrics.rejected.inc();
            }
            Outcome::Finalised { full } => {
                self.metrics.blocks.inc();
                if full {
                    self.flush();
                }
            }
        }
    }

    /// Write all finalised blocks to a batch file.
    ///
    /// The blocks are removed from the buffer whether or not the write succeeds.
    fn flush(&mut self) {
        let blocks = self.buffer.take_blocks();
        match self.writer.write(blocks) {
            Ok(written) => {
                self.metrics.batches.inc();
                info!(
                    file = %written.file,
                    count = written.blocks,
                    size_bytes = written.bytes,
                    "wrote batch"
                );
            }
            Err(failed) => {
                self.metrics.failed_batches.inc();
                error!(
                    file = %failed.file,
                    count = failed.blocks,
                    size_bytes = failed.bytes,
                    err = ?failed.error,
                    "failed to write batch"
                );
            }
        }
    }

    /// Process everything already queued, then write the final partial batch.
    fn drain(&mut self) {
        // Reject new messages so draining terminates
        self.mailbox.close();
        let mut drained = 0usize;
        while let Ok(message) = self.mailbox.try_recv() {
            self.handle(message);
            drained += 1;
        }
        debug!(drained, "drained mailbox");

        let discarded = self.buffer.discard_pending();
        if discarded > 0 {
            warn!(count = discarded, "stopping with transactions of unfinalised block");
            self.metrics.orphaned.inc_by(discarded as u64);
        }
        if self.buffer.has_blocks() {
            self.flush();
        }
        info!("collector stopped");
    }
}

/// A started [Actor].
///
/// Dropping it signals the actor to stop without waiting for the final flush.
pub struct Running {
    stop: oneshot::Sender<()>,
    handle: Handle<()>,
}

impl Running {
    /// Stop the actor and wait for it to drain its mailbox and write its final batch.
    ///
    /// Once this returns, no further batch files are written.
    pub async fn stop(self) {
        // The actor may already have exited if every mailbox was dropped
        let _ = self.stop.send(());
        if let Err(err) = self.handle.await {
            error!(?err, "collector task failed");
        }
    }
}
