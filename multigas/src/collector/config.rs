use crate::Error;
use std::path::PathBuf;

/// Maximum number of messages that can be queued in the [Mailbox](super::Mailbox).
pub const MAILBOX_SIZE: usize = 1024;

/// Default number of blocks written to each batch file.
pub const DEFAULT_BATCH_SIZE: usize = 2000;

/// Initial capacity of the pending transaction buffer.
pub(super) const TRANSACTION_PREALLOC: usize = 2000;

/// Configuration for the [Actor](super::Actor).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Directory batch files are written to.
    pub output_dir: PathBuf,

    /// Number of finalised blocks written to each batch file.
    pub batch_size: usize,

    /// Whether to remove everything in `output_dir` when the actor starts.
    pub clear_output_dir: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            clear_output_dir: false,
        }
    }
}

impl Config {
    /// Whether an output directory is configured at all.
    pub fn enabled(&self) -> bool {
        !self.output_dir.as_os_str().is_empty()
    }

    /// Checks that the configuration can be used to start an [Actor](super::Actor).
    pub fn validate(&self) -> Result<(), Error> {
        if !self.enabled() {
            return Err(Error::OutputDirRequired);
        }
        if self.batch_size == 0 {
            return Err(Error::BatchSizeRequired);
        }
        Ok(())
    }
}
