#![allow(dead_code)]

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use rand::RngCore;
use shredder::ShredderConfig;

/// create a test file with specific content and size
pub fn create_test_file(path: &Path, size: usize) -> io::Result<()> {
    let mut file = File::create(path)?;
    let mut buffer = vec![0u8; 1024]; // 1KB chunks
    let mut remaining = size;

    while remaining > 0 {
        rand::thread_rng().fill_bytes(&mut buffer);
        let write_size = std::cmp::min(remaining, buffer.len());
        file.write_all(&buffer[..write_size])?;
        remaining -= write_size;
    }

    file.sync_all()?;
    Ok(())
}

/// helper function to check every byte of a file equals `byte`
pub fn file_is_filled_with(path: &Path, byte: u8) -> io::Result<bool> {
    let content = read_file(path)?;
    Ok(content.iter().all(|&b| b == byte))
}

pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// progress sink that keeps every line it receives
#[derive(Clone, Default)]
pub struct CapturedLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturedLog {
    /// a config whose progress sink feeds this capture
    pub fn config(&self) -> ShredderConfig {
        let lines = Arc::clone(&self.lines);
        ShredderConfig::default()
            .with_log(move |line: &str| lines.lock().unwrap().push(line.to_string()))
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

/// file lister stand-in that records its calls and returns a fixed list
#[derive(Clone, Default)]
pub struct FixedLister {
    pub files: Vec<PathBuf>,
    pub calls: Arc<Mutex<Vec<(PathBuf, bool)>>>,
}

impl shredder::FileLister for FixedLister {
    fn list_files(&self, root: &Path, recursive: bool) -> shredder::Result<Vec<PathBuf>> {
        self.calls.lock().unwrap().push((root.to_path_buf(), recursive));
        Ok(self.files.clone())
    }
}
