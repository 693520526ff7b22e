//! Sequential reader over the request data words.

/// Cursor over the raw data section of a request.
///
/// Reads are little-endian and strictly sequential. A read that would run past the end of
/// the data fails and leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct RequestReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RequestReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], RequestError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(RequestError::UnexpectedEnd {
                requested: len,
                remaining,
            });
        }

        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads the next `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], RequestError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Reads a byte.
    pub fn read_u8(&mut self) -> Result<u8, RequestError> {
        self.read_array::<1>().map(|[b]| b)
    }

    /// Reads a 32-bit signed integer.
    pub fn read_i32(&mut self) -> Result<i32, RequestError> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads a 32-bit unsigned integer.
    pub fn read_u32(&mut self) -> Result<u32, RequestError> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a 64-bit signed integer.
    pub fn read_i64(&mut self) -> Result<i64, RequestError> {
        self.read_array().map(i64::from_le_bytes)
    }

    /// Reads a 64-bit unsigned integer.
    pub fn read_u64(&mut self) -> Result<u64, RequestError> {
        self.read_array().map(u64::from_le_bytes)
    }
}

/// Error raised when a handler's arguments do not match the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The data words ended before the argument could be read.
    #[error("unexpected end of request: need {requested} bytes, have {remaining}")]
    UnexpectedEnd {
        /// Bytes the read needed.
        requested: usize,
        /// Bytes left in the request.
        remaining: usize,
    },
    /// The handler asked for a receive buffer the request does not carry.
    #[error("receive buffer {index} out of range ({count} supplied)")]
    BufferIndexOutOfRange {
        /// Requested slot.
        index: usize,
        /// Number of descriptors in the request.
        count: usize,
    },
}

impl RequestError {
    /// Returns the result code reported to the guest.
    pub fn result_code(&self) -> nx_hle_rc::ResultCode {
        match self {
            Self::UnexpectedEnd { .. } => nx_hle_rc::codes::SF_INVALID_IN_RAW_SIZE,
            Self::BufferIndexOutOfRange { .. } => nx_hle_rc::codes::SF_INVALID_BUFFER_INDEX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_reads_are_little_endian() {
        let data = [
            0x78, 0x56, 0x34, 0x12, // i32
            0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, // i64
            0xAB, // u8
        ];
        let mut reader = RequestReader::new(&data);

        assert_eq!(reader.read_i32(), Ok(0x1234_5678));
        assert_eq!(reader.read_i64(), Ok(0x0102_0304_0506_0708));
        assert_eq!(reader.read_u8(), Ok(0xAB));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_past_end_fails_without_consuming() {
        let data = [1, 2, 3, 4, 5, 6];
        let mut reader = RequestReader::new(&data);

        assert_eq!(reader.read_u32(), Ok(0x0403_0201));
        assert_eq!(
            reader.read_i64(),
            Err(RequestError::UnexpectedEnd {
                requested: 8,
                remaining: 2
            })
        );
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.read_bytes(2), Ok(&[5u8, 6][..]));
    }

    #[test]
    fn test_empty_request() {
        let mut reader = RequestReader::new(&[]);

        assert!(reader.is_empty());
        assert!(reader.read_u8().is_err());
    }
}
