use rand::RngCore;

/// byte patterns a pass can overwrite a file with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipePattern {
    /// fill with zeros (0x00)
    Zeros,

    /// fill with ones (0xFF)
    Ones,

    /// fill with cryptographically secure random data
    Random,
}

impl WipePattern {
    /// fills a buffer with the specified pattern
    ///
    /// # Examples
    /// ```
    /// use shredder::patterns::WipePattern;
    ///
    /// let mut buffer = vec![0; 1024];
    /// WipePattern::Ones.fill_buffer(&mut buffer);
    /// assert!(buffer.iter().all(|&b| b == 0xFF));
    /// ```
    pub fn fill_buffer(&self, buffer: &mut [u8]) {
        match self {
            WipePattern::Zeros => buffer.fill(0x00),
            WipePattern::Ones => buffer.fill(0xFF),
            WipePattern::Random => rand::thread_rng().fill_bytes(buffer),
        }
    }

    /// verifies that a buffer contains the expected pattern
    ///
    /// random data can't be verified, so `Random` always matches
    pub fn verify_buffer(&self, buffer: &[u8]) -> bool {
        match self {
            WipePattern::Zeros => buffer.iter().all(|&b| b == 0x00),
            WipePattern::Ones => buffer.iter().all(|&b| b == 0xFF),
            WipePattern::Random => true,
        }
    }

    /// whether the content written by this pattern can be read back and checked
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, WipePattern::Random)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WipePattern::Zeros => "zeros",
            WipePattern::Ones => "ones",
            WipePattern::Random => "random",
        }
    }
}

/// a reusable write buffer bound to one pattern
///
/// zero and one buffers are filled once and handed out unchanged. the random
/// buffer is refilled in place on every [`PatternBuffer::get`], so callers must
/// ask for it once per write instead of holding on to the slice.
#[derive(Debug)]
pub struct PatternBuffer {
    pattern: WipePattern,
    buffer: Vec<u8>,
}

impl PatternBuffer {
    pub fn new(pattern: WipePattern, size: usize) -> Self {
        let mut buffer = vec![0u8; size];
        if pattern.is_deterministic() {
            pattern.fill_buffer(&mut buffer);
        }
        Self { pattern, buffer }
    }

    /// returns the buffer contents, regenerating them first for `Random`
    pub fn get(&mut self) -> &[u8] {
        if self.pattern == WipePattern::Random {
            self.pattern.fill_buffer(&mut self.buffer);
        }
        &self.buffer
    }

    pub fn pattern(&self) -> WipePattern {
        self.pattern
    }

    pub(crate) fn len(&self) -> usize {
        self.buffer.len()
    }
}

/// the buffers used by one shred invocation, allocated on first use
#[derive(Debug)]
pub struct BufferSet {
    size: usize,
    zeros: Option<PatternBuffer>,
    ones: Option<PatternBuffer>,
    random: Option<PatternBuffer>,
}

impl BufferSet {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            zeros: None,
            ones: None,
            random: None,
        }
    }

    /// returns the buffer for `pattern`, allocating it the first time it is asked for
    pub fn buffer(&mut self, pattern: WipePattern) -> &mut PatternBuffer {
        let size = self.size;
        let slot = match pattern {
            WipePattern::Zeros => &mut self.zeros,
            WipePattern::Ones => &mut self.ones,
            WipePattern::Random => &mut self.random,
        };
        slot.get_or_insert_with(|| PatternBuffer::new(pattern, size))
    }

    pub fn buffer_size(&self) -> usize {
        self.size
    }

    /// number of pattern buffers allocated so far
    #[cfg(test)]
    pub(crate) fn allocated(&self) -> usize {
        [&self.zeros, &self.ones, &self.random]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}
