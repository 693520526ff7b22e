//! VI service data types.

use bitflags::bitflags;
use nx_hle_kernel::Handle;

/// Identifies an open display.
///
/// Display ids are handles in the display directory, widened to the 64-bit IPC field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct DisplayId(u64);

impl DisplayId {
    /// Wraps a raw id received from the guest.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw u64 value for IPC.
    #[inline]
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    /// Returns the directory handle this id names, if it fits one.
    pub(crate) fn to_handle(self) -> Option<Handle> {
        u32::try_from(self.0).ok().map(Handle::from_raw)
    }
}

impl From<Handle> for DisplayId {
    #[inline]
    fn from(handle: Handle) -> Self {
        Self(handle.to_raw() as u64)
    }
}

impl From<DisplayId> for u64 {
    #[inline]
    fn from(id: DisplayId) -> Self {
        id.0
    }
}

/// Identifies a layer within a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct LayerId(u64);

impl LayerId {
    /// The id reported for layers the emulator does not track.
    pub const UNTRACKED: Self = Self(0);

    /// Wraps a raw id received from the guest.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw u64 value for IPC.
    #[inline]
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

bitflags! {
    /// Layer creation flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayerFlags: u32 {
        /// Default layer flags.
        const DEFAULT = 1 << 0;
    }
}

/// Layer scaling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ScalingMode {
    /// No scaling.
    None = 0,
    /// Stretch to the layer bounds.
    #[default]
    FitToLayer = 2,
    /// Letterbox to keep the source aspect ratio.
    PreserveAspectRatio = 4,
}

impl ScalingMode {
    /// Decodes the guest's raw mode, `None` for values it does not define.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            2 => Some(Self::FitToLayer),
            4 => Some(Self::PreserveAspectRatio),
            _ => None,
        }
    }
}
