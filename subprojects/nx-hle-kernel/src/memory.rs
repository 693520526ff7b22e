//! Guest memory accessor.

/// Read/write access to the emulated process' virtual address space.
///
/// Implemented by the CPU emulator. Services only ever write complete, fully formed byte
/// ranges and never assume anything about the prior contents of guest memory.
pub trait GuestMemory: Send + Sync {
    /// Fills `buf` with the bytes starting at guest address `address`.
    fn read_bytes(&self, address: u64, buf: &mut [u8]) -> Result<(), MemoryError>;

    /// Writes `data` starting at guest address `address`.
    fn write_bytes(&self, address: u64, data: &[u8]) -> Result<(), MemoryError>;
}

/// Error returned by [`GuestMemory`] accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    /// Part of the range is not mapped in the guest.
    #[error("guest range {address:#x}+{size:#x} is not mapped")]
    Unmapped {
        /// Start of the faulting range.
        address: u64,
        /// Length of the faulting range.
        size: usize,
    },
    /// The range is mapped but not writable.
    #[error("guest range {address:#x}+{size:#x} is read-only")]
    ReadOnly {
        /// Start of the faulting range.
        address: u64,
        /// Length of the faulting range.
        size: usize,
    },
}

impl MemoryError {
    /// Returns the result code reported to the guest.
    pub fn result_code(&self) -> nx_hle_rc::ResultCode {
        nx_hle_rc::codes::KERNEL_INVALID_MEMORY
    }
}
