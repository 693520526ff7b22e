//! # nx-hle-binder
//! Android-style Parcel encoding for the emulated HOS binder driver.
//!
//! Services that hand out binder objects (the display service returning an
//! `IGraphicBufferProducer` for a layer) do so by writing a Parcel into a guest buffer. The
//! guest's native window code then decodes it, so the layout here is a fixed contract.
//!
//! This crate provides three layers:
//! - `raw`: wire structures defined with `zerocopy`
//! - `read`: validated parsing of parcels and flat binder objects
//! - `write`: encoding of flat binder objects and parcel framing
//!
//! # Parcel layout
//!
//! ```text
//! Offset          Size          Field
//! ───────────────────────────────────────────────
//! 0x00            0x04          data_size
//! 0x04            0x04          data_offset      (0x10)
//! 0x08            0x04          objects_size
//! 0x0C            0x04          objects_offset   (0x10 + data_size)
//! 0x10            data_size     data             (flat binder objects)
//! ..              objects_size  objects          (trailing payload)
//! ───────────────────────────────────────────────
//! ```
//!
//! # References
//! - [switchbrew Nvnflinger services](https://switchbrew.org/wiki/Nvnflinger_services)
//! - Android `binder.h` (`flat_binder_object`)

pub mod raw;
pub mod read;
pub mod write;

pub use self::{
    raw::{FLAT_BINDER_OBJECT_SIZE, InterfaceToken, PARCEL_HEADER_SIZE},
    read::{BinderObject, MalformedParcel, Parcel, decode_flat_binder_object},
    write::{BuildError, encode_flat_binder_object, make_parcel},
};
