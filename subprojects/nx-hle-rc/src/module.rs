//! Result code modules.

/// The subsystem that raised a result code.
///
/// Only the modules the HLE core reports from are listed; anything else decodes as
/// [`Module::Unknown`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Module {
    /// Kernel (SVC) errors.
    Kernel = 1,
    /// Service framework (CMIF) errors.
    Sf = 10,
    /// HIPC transport errors.
    Hipc = 11,
    /// Visual interface (display service) errors.
    Vi = 114,
    /// Any module without a dedicated variant.
    Unknown = 0x1FF,
}

impl Module {
    /// Maps a raw module number to a [`Module`].
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Kernel,
            10 => Self::Sf,
            11 => Self::Hipc,
            114 => Self::Vi,
            _ => Self::Unknown,
        }
    }
}
