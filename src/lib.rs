pub mod config; // shredder configuration and defaults
pub mod lister; // resolves directories into file lists
pub mod pass; // single overwrite pass over a file
pub mod patterns; // contains wiping patterns (Zeros, Ones, Random)
pub mod strategy; // named sequences of passes

pub use config::ShredderConfig;
pub use lister::{DirectoryLister, FileLister};
pub use strategy::ShredStrategy;

use log::{debug, info, warn};
use patterns::BufferSet;
use std::fs::{self, File, OpenOptions};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// represents various errors that can occur during shredding
#[derive(Error, Debug)]
pub enum WipeError {
    /// wraps standard I/O errors (not found, permission denied, ...)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// the path exists but is not a regular file
    #[error("{} is not a regular file", .0.display())]
    InvalidTarget(PathBuf),

    /// a batch target that cannot be resolved into files
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// shredder settings that cannot be run with
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// strategy name that does not match any known strategy
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    /// indicates data read back after a pass did not match its pattern
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// a directory could not be listed
    #[error("Failed to list {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// type alias for Result with our custom WipeError
pub type Result<T> = std::result::Result<T, WipeError>;

/// what a batch run should shred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShredTarget {
    /// a directory, resolved through the configured file lister
    Path(PathBuf),
    /// an explicit list of files, used as-is
    List(Vec<PathBuf>),
}

impl From<PathBuf> for ShredTarget {
    fn from(path: PathBuf) -> Self {
        ShredTarget::Path(path)
    }
}

impl From<&Path> for ShredTarget {
    fn from(path: &Path) -> Self {
        ShredTarget::Path(path.to_path_buf())
    }
}

impl From<&str> for ShredTarget {
    fn from(path: &str) -> Self {
        ShredTarget::Path(PathBuf::from(path))
    }
}

impl From<Vec<PathBuf>> for ShredTarget {
    fn from(paths: Vec<PathBuf>) -> Self {
        ShredTarget::List(paths)
    }
}

/// options for [`Shredder::shred_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShredAllOptions {
    /// descend into subdirectories when the target is a directory
    pub recursive: bool,
    /// remove each file after it has been overwritten
    pub unlink: bool,
}

/// overwrites files according to an immutable configuration
#[derive(Debug, Clone)]
pub struct Shredder {
    config: ShredderConfig,
}

impl Shredder {
    /// creates a new Shredder, rejecting configurations it could not run with
    ///
    /// # Arguments
    /// * `config` - buffer size, strategy, pass count, lister and progress sink
    pub fn new(config: ShredderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// shreds one file with the configured strategy
    ///
    /// # Arguments
    /// * `path` - Path to the file to be shredded
    /// * `unlink` - whether to remove the file once every pass succeeded
    ///
    /// # Returns
    /// * `Result<()>` - Success or error status. the file handle is always
    ///   closed before this returns.
    pub fn shred_one<P: AsRef<Path>>(&self, path: P, unlink: bool) -> Result<()> {
        let path = path.as_ref();
        info!(
            "Shredding {} with {} strategy x{}",
            path.display(),
            self.config.strategy,
            self.config.pass_count
        );

        let file = match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => file,
            Err(e) => {
                // directories refuse a read-write open before we ever get to stat them
                if let Ok(metadata) = fs::metadata(path) {
                    if !metadata.is_file() {
                        return Err(WipeError::InvalidTarget(path.to_path_buf()));
                    }
                }
                return Err(e.into());
            }
        };

        // the handle is consumed and closed before any unlink happens
        self.overwrite(file, path)?;

        if unlink {
            fs::remove_file(path)?;
            debug!("Removed {}", path.display());
        }
        Ok(())
    }

    /// runs the strategy over an already open file, closing it on return
    fn overwrite(&self, mut file: File, path: &Path) -> Result<()> {
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(WipeError::InvalidTarget(path.to_path_buf()));
        }
        let file_size = metadata.len();
        debug!("File size: {} bytes", file_size);

        let mut buffers = BufferSet::new(self.config.buffer_size);
        strategy::run_strategy(
            self.config.strategy,
            self.config.pass_count,
            &mut file,
            file_size,
            &mut buffers,
            self.config.verify,
        )
    }

    /// shreds every file a target resolves to, one after another
    ///
    /// progress goes to the configured sink after each file, followed by a
    /// timing summary. the first failure aborts the batch and is returned;
    /// files shredded before it stay shredded and no summary is logged.
    pub fn shred_all<T: Into<ShredTarget>>(&self, target: T, options: ShredAllOptions) -> Result<()> {
        let targets = self.targets(&target.into(), options.recursive)?;
        let total = targets.len();
        let started = Instant::now();

        for (done, path) in targets.iter().enumerate() {
            self.shred_one(path, options.unlink)?;
            self.emit(&format!(
                "({}/{})\tShredded {}",
                done + 1,
                total,
                path.display()
            ));
        }

        let elapsed = started.elapsed().as_millis();
        self.emit(&format!(
            "Shredding took {}ms, that is {}s.",
            elapsed,
            elapsed as f64 / 1000.0
        ));
        Ok(())
    }

    /// lists the files [`Shredder::shred_all`] would shred, without touching them
    pub fn targets(&self, target: &ShredTarget, recursive: bool) -> Result<Vec<PathBuf>> {
        match target {
            ShredTarget::Path(root) if root.as_os_str().is_empty() => Err(
                WipeError::InvalidArgument("target path must not be empty".into()),
            ),
            ShredTarget::Path(root) => self.config.file_lister.list_files(root, recursive),
            ShredTarget::List(paths) => Ok(paths.clone()),
        }
    }

    /// sends a line to the progress sink; a panicking sink never fails the shred
    fn emit(&self, message: &str) {
        let sink = &self.config.log;
        if panic::catch_unwind(AssertUnwindSafe(|| sink(message))).is_err() {
            warn!("Progress sink panicked on: {}", message);
        }
    }
}
