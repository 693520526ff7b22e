//! Handle type.

use core::fmt;

/// Raw value of the invalid handle. Never issued by a [`HandleTable`].
///
/// [`HandleTable`]: crate::HandleTable
pub const INVALID_HANDLE: u32 = 0;

/// Opaque reference to a host-side emulated object, handed to the guest in place of a pointer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Handle(u32);

impl Handle {
    /// Converts a raw guest-supplied value to a [`Handle`].
    ///
    /// The value is not validated; resolving it through a table does that.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value written to the guest.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Returns `true` unless this is the invalid handle.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != INVALID_HANDLE
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<Handle> for u32 {
    #[inline]
    fn from(handle: Handle) -> Self {
        handle.0
    }
}
