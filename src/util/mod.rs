//! Utility functions
//!
//! Bounded text sinks used when formatting values into caller buffers.

use std::fmt;

/// Outcome of formatting into a bounded buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatLen {
    /// Code units actually written to the buffer
    pub written: usize,
    /// Code units the full text needs
    pub required: usize,
}

impl FormatLen {
    /// Whether the text did not fit
    #[inline]
    pub const fn is_truncated(&self) -> bool {
        self.written < self.required
    }
}

/// `fmt::Write` sink that fills a byte buffer with UTF-8
///
/// Characters that do not fit entirely are dropped, along with everything after
/// them, so the written prefix is always valid UTF-8. The full length is still
/// counted.
pub struct ByteSink<'a> {
    buf: &'a mut [u8],
    written: usize,
    required: usize,
}

impl<'a> ByteSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        ByteSink {
            buf,
            written: 0,
            required: 0,
        }
    }

    pub fn finish(&self) -> FormatLen {
        FormatLen {
            written: self.written,
            required: self.required,
        }
    }
}

impl fmt::Write for ByteSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Fast path: the whole piece fits and nothing was cut before it
        if self.written == self.required && self.written + s.len() <= self.buf.len() {
            self.buf[self.written..self.written + s.len()].copy_from_slice(s.as_bytes());
            self.written += s.len();
            self.required += s.len();
            return Ok(());
        }
        for ch in s.chars() {
            let n = ch.len_utf8();
            if self.written == self.required && self.written + n <= self.buf.len() {
                ch.encode_utf8(&mut self.buf[self.written..]);
                self.written += n;
            }
            self.required += n;
        }
        Ok(())
    }
}

/// `fmt::Write` sink that fills a buffer with UTF-16 code units
///
/// Surrogate pairs are never split.
pub struct WideSink<'a> {
    buf: &'a mut [u16],
    written: usize,
    required: usize,
}

impl<'a> WideSink<'a> {
    pub fn new(buf: &'a mut [u16]) -> Self {
        WideSink {
            buf,
            written: 0,
            required: 0,
        }
    }

    /// Append raw code units, stopping at the first one that does not fit
    pub fn write_units(&mut self, units: &[u16]) {
        let room = self.buf.len() - self.written;
        let fits = if self.written == self.required {
            let mut n = units.len().min(room);
            // Do not leave a high surrogate without its partner
            if n < units.len() && n > 0 && (0xD800..0xDC00).contains(&units[n - 1]) {
                n -= 1;
            }
            n
        } else {
            0
        };
        self.buf[self.written..self.written + fits].copy_from_slice(&units[..fits]);
        self.written += fits;
        self.required += units.len();
    }

    pub fn finish(&self) -> FormatLen {
        FormatLen {
            written: self.written,
            required: self.required,
        }
    }
}

impl fmt::Write for WideSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            let mut units = [0u16; 2];
            let encoded = ch.encode_utf16(&mut units);
            if self.written == self.required && self.written + encoded.len() <= self.buf.len() {
                self.buf[self.written..self.written + encoded.len()].copy_from_slice(encoded);
                self.written += encoded.len();
            }
            self.required += encoded.len();
        }
        Ok(())
    }
}
