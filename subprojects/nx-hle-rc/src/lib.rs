//! # nx-hle-rc
//!
//! Result codes returned to the emulated guest by HLE service handlers.
//!
//! Horizon result codes are plain `u32` values. Zero means success; any other value packs the
//! module that raised the error and a module-specific description:
//!
//! - **Bits 0-8:** Module ID
//! - **Bits 9-21:** Description
//! - **Bits 22-31:** Reserved
//!
//! The guest only ever sees the raw value. On the host side [`ResultCode`] gives the value a
//! readable `2XXX-YYYY` form for logs, and [`codes`] collects the codes the HLE core emits.
//!
//! # References
//! - [Switchbrew Wiki: Error Codes](https://switchbrew.org/wiki/Error_codes)

pub mod codes;
mod module;

pub use self::module::Module;

/// Mask for the module field (9 bits)
const MODULE_MASK: u32 = 0x1FF;
/// Mask for the description field (13 bits)
const DESCRIPTION_MASK: u32 = 0x1FFF;
/// Shift amount for the description field
const DESCRIPTION_SHIFT: u32 = 9;

/// A raw Horizon result code as written back to the guest.
///
/// # Formatting
///
/// The code is formatted as `2XXX-YYYY` where:
///  - `XXX` is `2000` + module number
///  - `YYYY` is the `description`
///
/// ```text
/// ResultCode::from_parts(Module::Vi, 7)  =>  "2114-0007"
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ResultCode(u32);

impl ResultCode {
    /// The success code.
    pub const SUCCESS: Self = Self(0);

    /// Creates a [`ResultCode`] from a raw value.
    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Creates a [`ResultCode`] from a module and description.
    #[inline]
    pub const fn from_parts(module: Module, description: u32) -> Self {
        let module_val = (module as u32) & MODULE_MASK;
        let desc_val = (description & DESCRIPTION_MASK) << DESCRIPTION_SHIFT;
        Self(module_val | desc_val)
    }

    /// Returns the raw value written to the guest.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Returns true if this is the success code.
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this is any failure code.
    #[inline]
    pub const fn is_failure(self) -> bool {
        !self.is_success()
    }

    /// Returns the module that raised the error.
    ///
    /// Unknown module numbers are reported as [`Module::Unknown`].
    #[inline]
    pub const fn module(self) -> Module {
        Module::from_raw(self.0 & MODULE_MASK)
    }

    /// Returns the raw module number, including values with no [`Module`] variant.
    #[inline]
    pub const fn module_raw(self) -> u32 {
        self.0 & MODULE_MASK
    }

    /// Returns the description value.
    #[inline]
    pub const fn description(self) -> u32 {
        (self.0 >> DESCRIPTION_SHIFT) & DESCRIPTION_MASK
    }

    /// Converts into a `Result`, mapping success to `Ok(())`.
    #[inline]
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_success() {
            Ok(())
        } else {
            Err(Error(self))
        }
    }
}

impl Default for ResultCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl core::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:04}", 2000 + self.module_raw(), self.description())
    }
}

impl core::fmt::Debug for ResultCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResultCode")
            .field("code", &format_args!("{}", self))
            .field("module", &self.module())
            .field("description", &self.description())
            .field("raw", &format_args!("{:#x}", self.0))
            .finish()
    }
}

impl From<ResultCode> for u32 {
    fn from(rc: ResultCode) -> Self {
        rc.0
    }
}

/// A non-success [`ResultCode`] usable with `?`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("service returned {0}")]
pub struct Error(ResultCode);

impl Error {
    /// Returns the wrapped result code.
    #[inline]
    pub const fn code(self) -> ResultCode {
        self.0
    }
}
