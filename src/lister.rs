use crate::{Result, WipeError};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// extensions the default lister never hands out for shredding
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "exe", "dll", "so", "dat", "xml", "js", "log", "o", "efi", "prx", "sh", "rs", "bat",
];

/// resolves a directory into the ordered list of files to shred
///
/// the shredder treats the returned list as authoritative: filtering policy
/// lives entirely in the lister.
pub trait FileLister {
    fn list_files(&self, root: &Path, recursive: bool) -> Result<Vec<PathBuf>>;
}

impl<F> FileLister for F
where
    F: Fn(&Path, bool) -> Result<Vec<PathBuf>>,
{
    fn list_files(&self, root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        self(root, recursive)
    }
}

/// lists regular files under a directory, skipping blacklisted extensions
///
/// entries are visited in file-name order so the result is stable between
/// runs. symlinks are skipped, never followed.
#[derive(Debug, Clone)]
pub struct DirectoryLister {
    blacklist: Vec<String>,
}

impl Default for DirectoryLister {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST.iter().copied())
    }
}

impl DirectoryLister {
    /// creates a lister with a custom extension blacklist
    ///
    /// extensions are compared case-insensitively, with or without a leading dot
    pub fn new<I, S>(blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            blacklist: blacklist
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    fn is_blacklisted(&self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.blacklist.iter().any(|blocked| *blocked == ext)
            }
            None => false,
        }
    }

    fn walk(&self, dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> Result<()> {
        let read_dir = fs::read_dir(dir).map_err(|source| WipeError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut names: Vec<OsString> = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| WipeError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            names.push(entry.file_name());
        }
        names.sort();

        for name in names {
            let path = dir.join(name);
            let file_type = fs::symlink_metadata(&path)
                .map_err(|source| WipeError::Walk {
                    path: path.clone(),
                    source,
                })?
                .file_type();

            if file_type.is_dir() {
                if recursive {
                    self.walk(&path, recursive, files)?;
                }
            } else if file_type.is_file() {
                if self.is_blacklisted(&path) {
                    debug!("Skipping blacklisted file: {}", path.display());
                } else {
                    files.push(path);
                }
            }
        }
        Ok(())
    }
}

impl FileLister for DirectoryLister {
    fn list_files(&self, root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk(root, recursive, &mut files)?;
        debug!("Listed {} files under {}", files.len(), root.display());
        Ok(files)
    }
}
