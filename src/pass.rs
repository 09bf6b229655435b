use crate::patterns::{PatternBuffer, WipePattern};
use crate::{Result, WipeError};
use log::debug;
use std::fs::File;
#[cfg(not(unix))]
use std::io::{Read, Seek, SeekFrom, Write};

/// storage a pass can be written to
///
/// every write is positioned, so implementations must not depend on a shared
/// cursor. `sync` is the durability barrier and must not return before the
/// data written so far has reached stable storage.
pub trait PassTarget {
    fn write_at(&mut self, data: &[u8], offset: u64) -> std::io::Result<()>;

    fn read_at(&mut self, data: &mut [u8], offset: u64) -> std::io::Result<()>;

    fn sync(&mut self) -> std::io::Result<()>;
}

impl PassTarget for File {
    fn write_at(&mut self, data: &[u8], offset: u64) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.write_all_at(data, offset)
        }
        #[cfg(not(unix))]
        {
            self.seek(SeekFrom::Start(offset))?;
            self.write_all(data)
        }
    }

    fn read_at(&mut self, data: &mut [u8], offset: u64) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.read_exact_at(data, offset)
        }
        #[cfg(not(unix))]
        {
            self.seek(SeekFrom::Start(offset))?;
            self.read_exact(data)
        }
    }

    fn sync(&mut self) -> std::io::Result<()> {
        self.sync_data()
    }
}

/// how a pass over `file_size` bytes splits into buffer-sized writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassLayout {
    /// number of full-buffer writes
    pub iterations: u64,
    /// bytes in the trailing partial write, zero if there is none
    pub remainder: u64,
}

impl PassLayout {
    pub fn new(file_size: u64, buffer_size: usize) -> Result<Self> {
        if buffer_size == 0 {
            return Err(WipeError::InvalidConfig(
                "buffer size must be greater than zero".into(),
            ));
        }
        let buffer_size = buffer_size as u64;
        Ok(Self {
            iterations: file_size / buffer_size,
            remainder: file_size % buffer_size,
        })
    }
}

/// overwrites `[0, file_size)` once with the buffer's pattern and syncs
///
/// full buffers go out in order from offset 0, then the remainder (if any)
/// is written at `file_size - remainder`. the barrier runs even when nothing
/// was written.
pub fn write_pass<T: PassTarget + ?Sized>(
    target: &mut T,
    file_size: u64,
    buffer: &mut PatternBuffer,
) -> Result<()> {
    let layout = PassLayout::new(file_size, buffer.len())?;
    let buffer_size = buffer.len() as u64;
    debug!(
        "Writing {} pass: {} full writes, {} byte remainder",
        buffer.pattern().name(),
        layout.iterations,
        layout.remainder
    );

    for i in 0..layout.iterations {
        target.write_at(buffer.get(), i * buffer_size)?;
    }
    if layout.remainder > 0 {
        let remainder = layout.remainder as usize;
        target.write_at(&buffer.get()[..remainder], file_size - layout.remainder)?;
    }

    target.sync()?;
    Ok(())
}

/// reads `[0, file_size)` back and checks it against a deterministic pattern
pub fn verify_pass<T: PassTarget + ?Sized>(
    target: &mut T,
    file_size: u64,
    pattern: WipePattern,
    buffer_size: usize,
) -> Result<()> {
    if !pattern.is_deterministic() {
        return Ok(());
    }
    let layout = PassLayout::new(file_size, buffer_size)?;
    let mut verify_buf = vec![0u8; buffer_size];

    let mut offset = 0u64;
    while offset < file_size {
        let len = if offset + buffer_size as u64 <= file_size {
            buffer_size
        } else {
            layout.remainder as usize
        };
        let chunk = &mut verify_buf[..len];
        target.read_at(chunk, offset)?;
        if !pattern.verify_buffer(chunk) {
            return Err(WipeError::VerificationFailed(format!(
                "{} pattern mismatch at offset {}",
                pattern.name(),
                offset
            )));
        }
        offset += len as u64;
    }
    Ok(())
}
