//! HIPC descriptors as seen from the serving side.
//!
//! # Buffer descriptors
//!
//! Large payloads do not travel in the data words. The client attaches buffer descriptors
//! naming regions of its own address space; the service reads from or writes into those
//! regions directly. Receive (type B) buffers are the ones services write parcels into.
//!
//! On the wire every A/B/W descriptor is 12 bytes with both address and size split across
//! bit fields:
//!
//! ```text
//! Bits 0-31:  size[0:31] (32 bits)
//! Bits 32-63: address[0:31] (32 bits)
//! Bits 64-65: mode (2 bits)
//! Bits 66-87: address[36:57] (22 bits)
//! Bits 88-91: size[32:35] (4 bits)
//! Bits 92-95: address[32:35] (4 bits)
//! ```
//!
//! The transport flattens these into positional [`IpcBuffDesc`] entries.
//!
//! # Handle passing
//!
//! A response may carry a kernel handle instead of inline data:
//!
//! - **Copy handle**: the guest receives a new reference; the service keeps its own.
//! - **Move handle**: ownership transfers to the guest.
//!
//! # References
//!
//! - [Switchbrew IPC Marshalling](https://switchbrew.org/wiki/IPC_Marshalling)

use core::mem::size_of;

use modular_bitfield::prelude::*;
use nx_hle_kernel::Handle;
use static_assertions::const_assert_eq;

/// Buffer transfer mode for HIPC buffer descriptors.
#[derive(BitfieldSpecifier, Debug, Clone, Copy, PartialEq, Eq)]
#[bits = 2]
pub enum BufferMode {
    /// Normal buffer mapping.
    Normal = 0,
    /// Non-secure memory area.
    NonSecure = 1,
    /// Invalid/device memory (cannot be mapped).
    Invalid = 2,
    /// Non-device memory area.
    NonDevice = 3,
}

/// Packed buffer descriptor for send/receive/exchange buffers (12 bytes).
#[bitfield]
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct BufferDescriptor {
    /// Size bits 0-31.
    pub size_low: B32,
    /// Address bits 0-31.
    pub address_low: B32,
    /// Buffer mode.
    pub mode: BufferMode,
    /// Address bits 36-57.
    pub address_high: B22,
    /// Size bits 32-35.
    pub size_high: B4,
    /// Address bits 32-35.
    pub address_mid: B4,
}

const_assert_eq!(size_of::<BufferDescriptor>(), 12);

impl BufferDescriptor {
    /// Packs a guest address and size into a descriptor.
    pub fn pack(address: u64, size: u64, mode: BufferMode) -> Self {
        Self::new()
            .with_mode(mode)
            .with_address_low(address as u32)
            .with_address_mid(((address >> 32) & 0xF) as u8)
            .with_address_high(((address >> 36) & 0x3F_FFFF) as u32)
            .with_size_low(size as u32)
            .with_size_high(((size >> 32) & 0xF) as u8)
    }

    /// Decodes a descriptor from its 12 wire bytes.
    pub fn read(bytes: [u8; 12]) -> Self {
        Self::from_bytes(bytes)
    }

    /// Reconstructs the full guest address from the split fields.
    pub fn address(&self) -> u64 {
        self.address_low() as u64
            | ((self.address_mid() as u64) << 32)
            | ((self.address_high() as u64) << 36)
    }

    /// Reconstructs the full size from the split fields.
    pub fn size(&self) -> u64 {
        self.size_low() as u64 | ((self.size_high() as u64) << 32)
    }
}

/// A guest buffer supplied alongside a request: where it lives and how large it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IpcBuffDesc {
    /// Guest virtual address of the buffer.
    pub position: u64,
    /// Capacity of the buffer in bytes.
    pub size: u64,
}

impl IpcBuffDesc {
    /// Creates a descriptor for `size` bytes at guest address `position`.
    pub const fn new(position: u64, size: u64) -> Self {
        Self { position, size }
    }
}

impl From<BufferDescriptor> for IpcBuffDesc {
    fn from(desc: BufferDescriptor) -> Self {
        Self::new(desc.address(), desc.size())
    }
}

/// A kernel handle returned to the guest alongside the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleDesc {
    /// The guest gets its own reference; the host keeps ownership.
    Copy(Handle),
    /// Ownership passes to the guest.
    Move(Handle),
}

impl HandleDesc {
    /// Returns the handle being transferred.
    pub const fn handle(self) -> Handle {
        match self {
            Self::Copy(handle) | Self::Move(handle) => handle,
        }
    }

    /// Returns `true` for a move transfer.
    pub const fn is_move(self) -> bool {
        matches!(self, Self::Move(_))
    }
}
