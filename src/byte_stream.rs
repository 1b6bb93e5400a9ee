//! A bounded, single-threaded FIFO byte stream with sticky close/error flags.
//!
//! Unlike the teacher crate's `Reader`/`Writer` split (which exists to hand a
//! blocking `std::io::Read`/`Write` facade to two different threads), this
//! core is driven cooperatively by one caller, so reader and writer
//! operations live on the same value.

use std::collections::VecDeque;

#[derive(Debug)]
pub struct ByteStream {
    capacity: usize,
    buffer: VecDeque<u8>,
    bytes_pushed: u64,
    bytes_popped: u64,
    closed: bool,
    error: bool,
}

impl ByteStream {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ByteStream capacity must be positive");
        Self {
            capacity,
            buffer: VecDeque::new(),
            bytes_pushed: 0,
            bytes_popped: 0,
            closed: false,
            error: false,
        }
    }

    /// Appends as much of `data` as fits in the remaining capacity. Excess
    /// bytes are silently dropped. No-op once closed or errored.
    pub fn push(&mut self, data: &[u8]) {
        if self.closed || self.error {
            return;
        }
        let available = self.available_capacity();
        let n = data.len().min(available);
        self.buffer.extend(&data[..n]);
        self.bytes_pushed += n as u64;
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_error(&mut self) {
        self.error = true;
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    /// The contiguous buffered prefix available to the reader.
    pub fn peek(&self) -> impl Iterator<Item = u8> + '_ {
        self.buffer.iter().copied()
    }

    /// Returns the buffered bytes as two contiguous slices (see `VecDeque::as_slices`).
    pub fn peek_slices(&self) -> (&[u8], &[u8]) {
        self.buffer.as_slices()
    }

    pub fn pop(&mut self, len: usize) {
        let n = len.min(self.buffer.len());
        self.buffer.drain(..n);
        self.bytes_popped += n as u64;
    }

    pub fn is_finished(&self) -> bool {
        self.closed && self.buffer.is_empty()
    }

    pub fn bytes_buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn available_capacity(&self) -> usize {
        self.capacity - self.buffer.len()
    }

    pub fn bytes_pushed(&self) -> u64 {
        self.bytes_pushed
    }

    pub fn bytes_popped(&self) -> u64 {
        self.bytes_popped
    }
}
