//! Bounded output sink.
//!
//! Every character the engine produces goes through [`BoundedSink::put`].
//! The sink counts all non-NUL characters it is asked for, writes them while
//! there is room, and seals the buffer with a terminator the moment it fills
//! up. Later characters are still counted, never written.
//!
//! Invariant: no write ever lands at or past `buffer.len()`, and once the
//! buffer is full its last slot holds `0`.

/// Wide NUL.
pub const NUL: u32 = 0;

/// Append-only writer over a caller-supplied wide buffer.
#[derive(Debug)]
pub struct BoundedSink<'a> {
    buffer: &'a mut [u32],
    count: usize,
}

impl<'a> BoundedSink<'a> {
    #[must_use]
    pub fn new(buffer: &'a mut [u32]) -> Self {
        Self { buffer, count: 0 }
    }

    /// Destination capacity in code units, terminator slot included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of non-NUL characters requested so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// True once the requested output no longer fits.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.count >= self.capacity()
    }

    /// Emit one character.
    ///
    /// A NUL is written at the current position without being counted, so the
    /// next character overwrites it.
    pub fn put(&mut self, ch: u32) {
        let index = self.count;
        if ch != NUL {
            self.count = self.count.saturating_add(1);
        }
        let cap = self.capacity();
        if self.count > cap {
            return;
        }
        if self.count == cap {
            if index < cap {
                self.buffer[index] = NUL;
            }
            return;
        }
        self.buffer[index] = ch;
    }

    /// Emit `ch` `n` times; same effect as `n` calls to [`put`](Self::put).
    ///
    /// Only the slots that can actually be written are touched, so a huge
    /// padding width costs no more than the buffer size.
    pub fn fill(&mut self, ch: u32, n: usize) {
        if n == 0 {
            return;
        }
        if ch == NUL {
            self.put(NUL);
            return;
        }
        let start = self.count;
        let end = start.saturating_add(n);
        let cap = self.capacity();
        if cap > 0 {
            let last = cap - 1;
            let live_end = end.min(last);
            if start < live_end {
                self.buffer[start..live_end].fill(ch);
            }
            if start <= last && end > last {
                self.buffer[last] = NUL;
            }
        }
        self.count = end;
    }

    /// Emit ASCII bytes (digits, signs, markers).
    pub fn put_ascii(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.put(u32::from(b));
        }
    }

    /// Emit wide characters verbatim.
    pub fn put_wide(&mut self, chars: &[u32]) {
        for &c in chars {
            self.put(c);
        }
    }

    /// Write the final terminator and return the requested character count.
    pub fn finish(mut self) -> usize {
        self.put(NUL);
        self.count
    }
}
