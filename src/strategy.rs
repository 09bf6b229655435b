use crate::pass::{verify_pass, write_pass, PassTarget};
use crate::patterns::{BufferSet, WipePattern};
use crate::{Result, WipeError};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// overwrite strategies a shredder can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShredStrategy {
    /// zeros, then ones, then random data (DoD 5220.22-M style)
    #[default]
    Composite,
    /// a single pass of 0xFF bytes
    AllOnes,
    /// a single pass of 0x00 bytes
    AllZeros,
    /// a single pass of random bytes
    Random,
}

impl ShredStrategy {
    /// returns the sub-passes making up one repetition of the strategy
    pub fn sub_passes(&self) -> &'static [WipePattern] {
        match self {
            ShredStrategy::Composite => &[
                WipePattern::Zeros,  // Pass 1: All zeros
                WipePattern::Ones,   // Pass 2: All ones
                WipePattern::Random, // Pass 3: Random data
            ],
            ShredStrategy::AllOnes => &[WipePattern::Ones],
            ShredStrategy::AllZeros => &[WipePattern::Zeros],
            ShredStrategy::Random => &[WipePattern::Random],
        }
    }

    /// the pattern the file is left holding after the strategy completes
    pub fn final_pattern(&self) -> WipePattern {
        match self {
            ShredStrategy::Composite | ShredStrategy::Random => WipePattern::Random,
            ShredStrategy::AllOnes => WipePattern::Ones,
            ShredStrategy::AllZeros => WipePattern::Zeros,
        }
    }
}

impl fmt::Display for ShredStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShredStrategy::Composite => "composite",
            ShredStrategy::AllOnes => "ones",
            ShredStrategy::AllZeros => "zeros",
            ShredStrategy::Random => "random",
        };
        f.write_str(name)
    }
}

impl FromStr for ShredStrategy {
    type Err = WipeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "composite" | "dod" | "us-dod" => Ok(ShredStrategy::Composite),
            "ones" | "ff" => Ok(ShredStrategy::AllOnes),
            "zeros" | "zero" => Ok(ShredStrategy::AllZeros),
            "random" => Ok(ShredStrategy::Random),
            _ => Err(WipeError::UnknownStrategy(s.to_string())),
        }
    }
}

/// runs every sub-pass of `strategy`, `pass_count` times over
///
/// each sub-pass ends with its own durability barrier. with `verify` set,
/// deterministic sub-passes are read back right after that barrier.
pub fn run_strategy<T: PassTarget + ?Sized>(
    strategy: ShredStrategy,
    pass_count: u32,
    target: &mut T,
    file_size: u64,
    buffers: &mut BufferSet,
    verify: bool,
) -> Result<()> {
    let sub_passes = strategy.sub_passes();
    for repetition in 0..pass_count {
        for (i, pattern) in sub_passes.iter().enumerate() {
            debug!(
                "Starting {} pass {}/{} (repetition {}/{})",
                pattern.name(),
                i + 1,
                sub_passes.len(),
                repetition + 1,
                pass_count
            );
            write_pass(&mut *target, file_size, buffers.buffer(*pattern))?;

            if verify && pattern.is_deterministic() {
                debug!("Verifying {} pass", pattern.name());
                verify_pass(&mut *target, file_size, *pattern, buffers.buffer_size())?;
            }
        }
    }
    Ok(())
}
