//! Input cursor and output sinks

use crate::error::{WireError, WireResult};

/// Destination for encoded bytes
///
/// `Vec<u8>` grows without bound; [`SliceWriter`] writes into fixed storage
/// and fails with [`WireError::BufferOverflow`] once it is full.
pub trait Sink {
    /// Append `bytes`, or fail without writing anything
    fn put(&mut self, bytes: &[u8]) -> WireResult<()>;

    /// Append a single byte
    fn put_byte(&mut self, byte: u8) -> WireResult<()> {
        self.put(&[byte])
    }
}

impl Sink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) -> WireResult<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn put_byte(&mut self, byte: u8) -> WireResult<()> {
        self.push(byte);
        Ok(())
    }
}

/// Writer over caller-provided fixed storage
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    /// Create a writer positioned at the start of `buf`
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.pos
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Bytes still available
    pub fn space(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The written prefix of the storage
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Rewind to the start, discarding what was written
    pub fn clear(&mut self) {
        self.pos = 0;
    }
}

impl Sink for SliceWriter<'_> {
    fn put(&mut self, bytes: &[u8]) -> WireResult<()> {
        if bytes.len() > self.space() {
            return Err(WireError::BufferOverflow {
                needed: bytes.len(),
                available: self.space(),
            });
        }
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }
}

/// Bounds-checked read cursor over encoded bytes
///
/// Every read checks the remaining length first; running out of input is a
/// [`WireError::BufferUnderrun`], never an out-of-bounds access.
#[derive(Debug, Clone)]
pub struct FlexReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FlexReader<'a> {
    /// Create a reader positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether all input has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail unless at least `needed` bytes remain
    pub fn ensure(&self, needed: usize) -> WireResult<()> {
        if needed > self.remaining() {
            return Err(WireError::BufferUnderrun {
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read one byte
    pub fn get(&mut self) -> WireResult<u8> {
        self.ensure(1)?;
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Borrow the next `len` bytes and advance past them
    pub fn take(&mut self, len: usize) -> WireResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Fail if any input is left
    pub fn finish(&self) -> WireResult<()> {
        if !self.is_empty() {
            return Err(WireError::TrailingBytes {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}
