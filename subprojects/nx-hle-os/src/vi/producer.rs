//! `IGraphicBufferProducer` binder parcel.

use nx_hle_binder::{
    BinderObject, BuildError, InterfaceToken, encode_flat_binder_object, make_parcel,
    raw::BINDER_TYPE_WEAK_BINDER,
};

/// Binder id of the graphic buffer producer handed to every layer.
pub const PRODUCER_BINDER_ID: u64 = 0x20;

/// Builds the parcel describing a layer's graphic buffer producer.
///
/// The data region holds a single weak binder on the `dispdrv` interface; the objects region
/// is four zero bytes.
pub fn graphic_buffer_producer() -> Result<Vec<u8>, BuildError> {
    let object = BinderObject {
        kind: BINDER_TYPE_WEAK_BINDER,
        flags: 0,
        id: PRODUCER_BINDER_ID,
        cookie: 0,
        token: InterfaceToken::DISPDRV,
    };

    make_parcel(&encode_flat_binder_object(&object), &[0; 4])
}

#[cfg(test)]
mod tests {
    use nx_hle_binder::{Parcel, decode_flat_binder_object};

    use super::*;

    #[test]
    fn test_producer_parcel() {
        let bytes = graphic_buffer_producer().unwrap();
        let parcel = Parcel::try_from_bytes(&bytes).unwrap();
        let object = decode_flat_binder_object(parcel.data()).unwrap();

        assert_eq!(bytes.len(), 0x3C);
        assert_eq!(object.kind, BINDER_TYPE_WEAK_BINDER);
        assert_eq!(object.id, PRODUCER_BINDER_ID);
        assert_eq!(object.cookie, 0);
        assert_eq!(object.token.as_str(), "dispdrv");
        assert_eq!(parcel.objects(), &[0; 4]);
    }
}
