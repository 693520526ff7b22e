//! Parcel and flat binder object decoding.
//!
//! The guest performs this decode on its side; the host uses it to validate what it wrote
//! and to parse parcels the guest sends back.

use zerocopy::FromBytes;

use crate::raw::{
    FLAT_BINDER_OBJECT_SIZE, FlatBinderObject, InterfaceToken, PARCEL_HEADER_SIZE, ParcelHeader,
};

/// Decoded flat binder object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderObject {
    /// Object type tag.
    pub kind: u32,
    /// Object flags.
    pub flags: u32,
    /// Binder object id.
    pub id: u64,
    /// Opaque cookie.
    pub cookie: u64,
    /// Interface name.
    pub token: InterfaceToken,
}

/// Decodes a flat binder object from the start of `bytes`.
///
/// Bytes past the first 0x28 are ignored.
pub fn decode_flat_binder_object(bytes: &[u8]) -> Result<BinderObject, MalformedParcel> {
    let (raw, _) =
        FlatBinderObject::ref_from_prefix(bytes).map_err(|_| MalformedParcel::TooShort {
            required: FLAT_BINDER_OBJECT_SIZE,
            available: bytes.len(),
        })?;

    Ok(BinderObject {
        kind: raw.kind.get(),
        flags: raw.flags.get(),
        id: raw.id_low.get() as u64 | ((raw.id_high.get() as u64) << 32),
        cookie: raw.cookie_low.get() as u64 | ((raw.cookie_high.get() as u64) << 32),
        token: InterfaceToken::new(raw.token),
    })
}

/// Validated view over a parcel.
#[derive(Debug, Clone, Copy)]
pub struct Parcel<'a> {
    header: &'a ParcelHeader,
    data: &'a [u8],
    objects: &'a [u8],
}

impl<'a> Parcel<'a> {
    /// Parses a parcel, checking that both regions lie within `bytes`.
    pub fn try_from_bytes(bytes: &'a [u8]) -> Result<Self, MalformedParcel> {
        let (header, _) =
            ParcelHeader::ref_from_prefix(bytes).map_err(|_| MalformedParcel::TooShort {
                required: PARCEL_HEADER_SIZE,
                available: bytes.len(),
            })?;

        let data = region(
            bytes,
            Region::Data,
            header.data_offset.get(),
            header.data_size.get(),
        )?;
        let objects = region(
            bytes,
            Region::Objects,
            header.objects_offset.get(),
            header.objects_size.get(),
        )?;

        Ok(Self {
            header,
            data,
            objects,
        })
    }

    /// Get the parcel header.
    pub fn header(&self) -> &'a ParcelHeader {
        self.header
    }

    /// Get the data region.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Get the objects region.
    pub fn objects(&self) -> &'a [u8] {
        self.objects
    }
}

/// Slices `[offset, offset + size)` out of `bytes`.
fn region(bytes: &[u8], which: Region, offset: u32, size: u32) -> Result<&[u8], MalformedParcel> {
    let start = offset as usize;
    let out_of_bounds = MalformedParcel::RegionOutOfBounds {
        region: which,
        offset,
        size,
        available: bytes.len(),
    };

    let end = start.checked_add(size as usize).ok_or(out_of_bounds)?;
    if start < PARCEL_HEADER_SIZE {
        return Err(out_of_bounds);
    }

    bytes.get(start..end).ok_or(out_of_bounds)
}

/// Parcel region named in [`MalformedParcel::RegionOutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The data region.
    Data,
    /// The objects region.
    Objects,
}

impl core::fmt::Display for Region {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Data => "data",
            Self::Objects => "objects",
        })
    }
}

/// Errors that can occur when decoding a parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedParcel {
    /// Buffer is too small to contain the required structure
    #[error("buffer too small: need {required} bytes, have {available}")]
    TooShort {
        /// Number of bytes required
        required: usize,
        /// Number of bytes available
        available: usize,
    },
    /// A region overlaps the header or runs past the end of the parcel
    #[error("{region} region {offset:#x}+{size:#x} out of bounds (parcel is {available:#x} bytes)")]
    RegionOutOfBounds {
        /// Offending region
        region: Region,
        /// Offset stored in the header
        offset: u32,
        /// Size stored in the header
        size: u32,
        /// Total parcel length
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::make_parcel;

    #[test]
    fn test_header_too_short() {
        assert_eq!(
            Parcel::try_from_bytes(&[0; 12]).unwrap_err(),
            MalformedParcel::TooShort {
                required: 0x10,
                available: 12
            }
        );
    }

    #[test]
    fn test_data_region_past_end() {
        let mut parcel = make_parcel(&[1, 2, 3, 4], &[]).unwrap();
        parcel[0..4].copy_from_slice(&0x100u32.to_le_bytes());

        assert!(matches!(
            Parcel::try_from_bytes(&parcel),
            Err(MalformedParcel::RegionOutOfBounds {
                region: Region::Data,
                size: 0x100,
                ..
            })
        ));
    }

    #[test]
    fn test_region_overlapping_header() {
        let mut parcel = make_parcel(&[], &[9; 8]).unwrap();
        parcel[12..16].copy_from_slice(&4u32.to_le_bytes());

        assert!(matches!(
            Parcel::try_from_bytes(&parcel),
            Err(MalformedParcel::RegionOutOfBounds {
                region: Region::Objects,
                offset: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_offset_overflow() {
        let mut parcel = make_parcel(&[], &[]).unwrap();
        parcel[0..4].copy_from_slice(&u32::MAX.to_le_bytes());
        parcel[4..8].copy_from_slice(&u32::MAX.to_le_bytes());

        assert!(Parcel::try_from_bytes(&parcel).is_err());
    }

    #[test]
    fn test_flat_binder_object_too_short() {
        assert_eq!(
            decode_flat_binder_object(&[0; 0x27]).unwrap_err(),
            MalformedParcel::TooShort {
                required: 0x28,
                available: 0x27
            }
        );
    }
}
