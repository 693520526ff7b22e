//! Append-only writer for the response data words.

/// Growable buffer for the raw data section of a response.
///
/// All writes are little-endian. There is no capacity limit; the transport truncates or
/// rejects oversized responses when it packs the HIPC reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseWriter {
    data: Vec<u8>,
}

impl ResponseWriter {
    /// Creates an empty writer.
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Returns the bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the writer, returning the written bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Returns the number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing was written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Writes a 32-bit signed integer.
    pub fn write_i32(&mut self, val: i32) {
        self.write_bytes(&val.to_le_bytes());
    }

    /// Writes a 32-bit unsigned integer.
    pub fn write_u32(&mut self, val: u32) {
        self.write_bytes(&val.to_le_bytes());
    }

    /// Writes a 64-bit signed integer.
    pub fn write_i64(&mut self, val: i64) {
        self.write_bytes(&val.to_le_bytes());
    }

    /// Writes a 64-bit unsigned integer.
    pub fn write_u64(&mut self, val: u64) {
        self.write_bytes(&val.to_le_bytes());
    }

    /// Drops everything written after the first `len` bytes.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }
}
