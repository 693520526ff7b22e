//! Parcel and flat binder object encoding.

use zerocopy::{IntoBytes, little_endian::U32};

use crate::{
    raw::{FLAT_BINDER_OBJECT_SIZE, FlatBinderObject, PARCEL_HEADER_SIZE, ParcelHeader},
    read::BinderObject,
};

/// Encodes `object` into its fixed 0x28-byte wire form.
pub fn encode_flat_binder_object(object: &BinderObject) -> [u8; FLAT_BINDER_OBJECT_SIZE] {
    let raw = FlatBinderObject {
        kind: U32::new(object.kind),
        flags: U32::new(object.flags),
        id_low: U32::new(object.id as u32),
        id_high: U32::new((object.id >> 32) as u32),
        cookie_low: U32::new(object.cookie as u32),
        cookie_high: U32::new((object.cookie >> 32) as u32),
        token: *object.token.as_bytes(),
        _pad: [0; 8],
    };

    let mut out = [0u8; FLAT_BINDER_OBJECT_SIZE];
    out.copy_from_slice(raw.as_bytes());
    out
}

/// Frames `data` and the trailing `objects` payload into a parcel.
///
/// The data region immediately follows the header and the objects region immediately follows
/// the data region; both sizes are stored verbatim.
pub fn make_parcel(data: &[u8], objects: &[u8]) -> Result<Vec<u8>, BuildError> {
    let total = PARCEL_HEADER_SIZE + data.len() + objects.len();
    if total > u32::MAX as usize {
        return Err(BuildError::TooLarge { size: total });
    }

    let header = ParcelHeader {
        data_size: U32::new(data.len() as u32),
        data_offset: U32::new(PARCEL_HEADER_SIZE as u32),
        objects_size: U32::new(objects.len() as u32),
        objects_offset: U32::new((PARCEL_HEADER_SIZE + data.len()) as u32),
    };

    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(data);
    buf.extend_from_slice(objects);
    Ok(buf)
}

/// Errors that can occur when building a parcel
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The parcel would not be addressable by 32-bit offsets
    #[error("parcel of {size} bytes exceeds the 32-bit offset range")]
    TooLarge {
        /// Total size the parcel would have had
        size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{BINDER_TYPE_WEAK_BINDER, InterfaceToken};

    #[test]
    fn test_flat_binder_object_layout() {
        let object = BinderObject {
            kind: BINDER_TYPE_WEAK_BINDER,
            flags: 0,
            id: 0x20,
            cookie: 0,
            token: InterfaceToken::DISPDRV,
        };

        let bytes = encode_flat_binder_object(&object);

        #[rustfmt::skip]
        let expected: [u8; 0x28] = [
            0x02, 0x00, 0x00, 0x00, // type
            0x00, 0x00, 0x00, 0x00, // flags
            0x20, 0x00, 0x00, 0x00, // id low
            0x00, 0x00, 0x00, 0x00, // id high
            0x00, 0x00, 0x00, 0x00, // cookie low
            0x00, 0x00, 0x00, 0x00, // cookie high
            b'd', b'i', b's', b'p', b'd', b'r', b'v', 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // pad
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_wide_id_and_cookie_split_low_then_high() {
        let object = BinderObject {
            kind: 0x7362_2A85,
            flags: 0x17F,
            id: 0x1122_3344_5566_7788,
            cookie: 0x99AA_BBCC_DDEE_FF00,
            token: InterfaceToken::from_slice(b"abc"),
        };

        let bytes = encode_flat_binder_object(&object);

        assert_eq!(&bytes[0x08..0x0C], &0x5566_7788u32.to_le_bytes());
        assert_eq!(&bytes[0x0C..0x10], &0x1122_3344u32.to_le_bytes());
        assert_eq!(&bytes[0x10..0x14], &0xDDEE_FF00u32.to_le_bytes());
        assert_eq!(&bytes[0x14..0x18], &0x99AA_BBCCu32.to_le_bytes());
        assert_eq!(&bytes[0x18..0x20], b"abc\0\0\0\0\0");
        assert_eq!(&bytes[0x20..], &[0; 8]);
    }

    #[test]
    fn test_parcel_header() {
        let parcel = make_parcel(&[0xAA; 0x28], &[0, 0, 0, 0]).unwrap();

        assert_eq!(parcel.len(), 0x3C);
        assert_eq!(&parcel[0x00..0x04], &0x28u32.to_le_bytes());
        assert_eq!(&parcel[0x04..0x08], &0x10u32.to_le_bytes());
        assert_eq!(&parcel[0x08..0x0C], &4u32.to_le_bytes());
        assert_eq!(&parcel[0x0C..0x10], &0x38u32.to_le_bytes());
        assert_eq!(&parcel[0x10..0x38], &[0xAA; 0x28]);
        assert_eq!(&parcel[0x38..], &[0; 4]);
    }

    #[test]
    fn test_empty_parcel() {
        let parcel = make_parcel(&[], &[]).unwrap();

        assert_eq!(parcel.len(), PARCEL_HEADER_SIZE);
        assert_eq!(&parcel[0x0C..0x10], &0x10u32.to_le_bytes());
    }
}
