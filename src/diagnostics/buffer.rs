//! Expanding report buffer
//!
//! Diagnostic reports are variable-length text assembled from many small
//! writes. The buffer is caller-owned and append-only: one buffer can
//! collect several reports back to back, and the caller decides when the
//! accumulated text is consumed and cleared.

use alloc::string::String;
use core::fmt;

/// Growable text buffer with an append contract
#[derive(Debug, Default)]
pub struct ExpandingString {
    buf: String,
}

impl ExpandingString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the buffer for a report of roughly `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard accumulated text, keeping the backing capacity
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl fmt::Write for ExpandingString {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl fmt::Display for ExpandingString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

impl core::ops::Deref for ExpandingString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.buf
    }
}
