use crate::{
    wire::{BlockMultiGasBatch, BlockMultiGasData},
    Error,
};
use bytes::BytesMut;
use prost::Message as _;
use std::{
    fs::{self, OpenOptions},
    io::{self, Write as _},
    path::{Path, PathBuf},
};

/// Prefix of every batch file name.
pub const BATCH_PREFIX: &str = "multigas_batch_";

/// Extension of every batch file name.
pub const BATCH_EXTENSION: &str = "pb";

/// Returns the file name of a batch spanning blocks `start..=end`.
///
/// Block numbers are zero-padded to ten digits so that lexicographic order of file names
/// matches block order.
pub fn batch_filename(start: u64, end: u64) -> String {
    format!("{BATCH_PREFIX}{start:010}_{end:010}.{BATCH_EXTENSION}")
}

/// A batch file that was written successfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Written {
    pub file: String,
    pub blocks: usize,
    pub bytes: usize,
}

/// A batch that could not be written.
#[derive(Debug)]
pub(super) struct Failed {
    pub file: String,
    pub blocks: usize,
    pub bytes: usize,
    pub error: Error,
}

/// Writes batches of finalised blocks into `dir`.
pub(super) struct Writer {
    dir: PathBuf,
}

impl Writer {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Encode `blocks` and write them to a new batch file.
    ///
    /// The file is first written under a temporary name, synced, and then linked to its final
    /// name so that a batch file is never observed partially written. An existing file with the
    /// same name is never replaced: the batch fails with [Error::BatchExists] instead.
    pub fn write(&self, blocks: Vec<BlockMultiGasData>) -> Result<Written, Failed> {
        let count = blocks.len();
        let (Some(first), Some(last)) = (blocks.first(), blocks.last()) else {
            return Err(Failed {
                file: String::new(),
                blocks: 0,
                bytes: 0,
                error: Error::EmptyBatch,
            });
        };
        let file = batch_filename(first.block_number, last.block_number);

        let batch = BlockMultiGasBatch { data: blocks };
        let mut buf = BytesMut::with_capacity(batch.encoded_len());
        if let Err(err) = batch.encode(&mut buf) {
            return Err(Failed {
                file,
                blocks: count,
                bytes: batch.encoded_len(),
                error: err.into(),
            });
        }

        let bytes = buf.len();
        match self.persist(&file, &buf) {
            Ok(()) => Ok(Written {
                file,
                blocks: count,
                bytes,
            }),
            Err(error) => Err(Failed {
                file,
                blocks: count,
                bytes,
                error,
            }),
        }
    }

    fn persist(&self, file: &str, data: &[u8]) -> Result<(), Error> {
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!("{file}.tmp"));

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let written = options.open(&tmp).and_then(|mut f| {
            f.write_all(data)?;
            f.sync_all()
        });
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(Error::Write(path, err));
        }

        // Linking fails if the target exists, so a published batch is never clobbered
        let published = fs::hard_link(&tmp, &path);
        let _ = fs::remove_file(&tmp);
        match published {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Err(Error::BatchExists(path)),
            Err(err) => Err(Error::Write(path, err)),
        }
    }
}
