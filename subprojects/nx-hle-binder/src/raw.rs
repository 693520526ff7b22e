//! Raw wire structures.
//!
//! All structures are `#[repr(C)]`, little-endian and match the layout the guest decodes.

use core::fmt;

use static_assertions::const_assert_eq;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, little_endian::*};

/// Size of the parcel header.
pub const PARCEL_HEADER_SIZE: usize = 0x10;

/// Size of a flat binder object, regardless of field values.
pub const FLAT_BINDER_OBJECT_SIZE: usize = 0x28;

/// Weak binder reference, the type the guest expects for graphic buffer producers.
pub const BINDER_TYPE_WEAK_BINDER: u32 = 2;

/// Parcel header. Offsets are relative to the start of the parcel.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct ParcelHeader {
    /// Size of the data region
    pub data_size: U32,
    /// Offset of the data region
    pub data_offset: U32,
    /// Size of the objects region
    pub objects_size: U32,
    /// Offset of the objects region
    pub objects_offset: U32,
}

const_assert_eq!(size_of::<ParcelHeader>(), PARCEL_HEADER_SIZE);

/// Flattened binder object (`flat_binder_object`).
///
/// The 64-bit id and cookie are stored as low-then-high 32-bit words.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct FlatBinderObject {
    /// Object type tag
    pub kind: U32,
    /// Object flags
    pub flags: U32,
    /// Object id bits 0-31
    pub id_low: U32,
    /// Object id bits 32-63
    pub id_high: U32,
    /// Cookie bits 0-31
    pub cookie_low: U32,
    /// Cookie bits 32-63
    pub cookie_high: U32,
    /// Interface name of the remote object
    pub token: [u8; 8],
    /// Padding
    pub _pad: [u8; 8],
}

const_assert_eq!(size_of::<FlatBinderObject>(), FLAT_BINDER_OBJECT_SIZE);

/// Fixed 8-byte interface name carried by a flat binder object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InterfaceToken([u8; 8]);

impl InterfaceToken {
    /// The display driver interface, `"dispdrv\0"`.
    pub const DISPDRV: Self = Self(*b"dispdrv\0");

    /// Creates a token from its exact 8 bytes.
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Creates a token from arbitrary bytes, zero-padding or truncating to 8 bytes.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut token = [0u8; 8];
        let len = bytes.len().min(token.len());
        token[..len].copy_from_slice(&bytes[..len]);
        Self(token)
    }

    /// Returns the raw 8 bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Returns the name up to the first NUL, or `""` if it is not UTF-8.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        core::str::from_utf8(&self.0[..end]).unwrap_or("")
    }
}

impl fmt::Debug for InterfaceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InterfaceToken").field(&self.as_str()).finish()
    }
}
