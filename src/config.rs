use crate::lister::{DirectoryLister, FileLister};
use crate::strategy::ShredStrategy;
use crate::{Result, WipeError};
use std::fmt;
use std::sync::Arc;

/// default size of the reusable write buffer (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// shared handle to a file lister
pub type SharedLister = Arc<dyn FileLister + Send + Sync>;

/// sink receiving human-readable progress lines
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// settings a [`Shredder`](crate::Shredder) is built from
///
/// the shredder never mutates its configuration, so one instance can be
/// shared between threads.
#[derive(Clone)]
pub struct ShredderConfig {
    /// lister used to resolve directory targets
    pub file_lister: SharedLister,

    /// size of the write buffer in bytes
    pub buffer_size: usize,

    /// overwrite strategy to run on each file
    pub strategy: ShredStrategy,

    /// how many times the whole strategy is repeated
    pub pass_count: u32,

    /// receives progress and timing lines from batch runs
    pub log: LogSink,

    /// read deterministic passes back after writing them
    pub verify: bool,
}

impl Default for ShredderConfig {
    fn default() -> Self {
        Self {
            file_lister: Arc::new(DirectoryLister::default()),
            buffer_size: DEFAULT_BUFFER_SIZE,
            strategy: ShredStrategy::default(),
            pass_count: 1,
            log: Arc::new(|message: &str| log::info!("{}", message)),
            verify: false,
        }
    }
}

impl fmt::Debug for ShredderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShredderConfig")
            .field("buffer_size", &self.buffer_size)
            .field("strategy", &self.strategy)
            .field("pass_count", &self.pass_count)
            .field("verify", &self.verify)
            .finish_non_exhaustive()
    }
}

impl ShredderConfig {
    pub fn with_file_lister<L>(mut self, lister: L) -> Self
    where
        L: FileLister + Send + Sync + 'static,
    {
        self.file_lister = Arc::new(lister);
        self
    }

    /// sets the write buffer size in bytes
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn with_strategy(mut self, strategy: ShredStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// sets how many times the full strategy runs on each file
    pub fn with_pass_count(mut self, pass_count: u32) -> Self {
        self.pass_count = pass_count;
        self
    }

    /// replaces the progress sink
    pub fn with_log<F>(mut self, log: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.log = Arc::new(log);
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// checks the values a shredder cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(WipeError::InvalidConfig(
                "buffer size must be greater than zero".into(),
            ));
        }
        if self.pass_count == 0 {
            return Err(WipeError::InvalidConfig(
                "pass count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
