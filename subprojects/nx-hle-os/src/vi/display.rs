//! Display directory.

use std::sync::Arc;

use nx_hle_binder::BuildError;
use nx_hle_ipc::RequestReader;
use nx_hle_kernel::{HandleError, HandleTable};
use nx_hle_rc::{ResultCode, codes};

use super::{
    producer::graphic_buffer_producer,
    types::{DisplayId, LayerFlags, LayerId},
};
use crate::object::KernelObject;

/// Number of request bytes scanned for a display name.
pub const DISPLAY_NAME_LEN: usize = 8;

/// An open display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    id: DisplayId,
    name: String,
}

impl Display {
    /// Returns the display id.
    #[inline]
    pub fn id(&self) -> DisplayId {
        self.id
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Reads a display name from the request.
///
/// Consumes up to [`DISPLAY_NAME_LEN`] bytes, fewer if the request ends first. Bytes outside
/// the printable ASCII range are skipped rather than ending the name, so `"A\0B"` reads as
/// `"AB"`.
pub fn read_display_name(reader: &mut RequestReader<'_>) -> String {
    let len = reader.remaining().min(DISPLAY_NAME_LEN);
    // Cannot fail: `len` never exceeds what is left.
    let bytes = reader.read_bytes(len).unwrap_or_default();

    bytes
        .iter()
        .filter(|b| (0x20..0x7F).contains(*b))
        .map(|&b| b as char)
        .collect()
}

/// The displays opened by the process, addressed by [`DisplayId`].
///
/// Displays live in the process handle table next to every other kernel object, so a display
/// id is a handle value. Every open allocates a new display, even for a name that is already
/// open.
#[derive(Debug, Clone, Copy)]
pub struct DisplayDirectory<'a> {
    handles: &'a HandleTable<KernelObject>,
}

impl<'a> DisplayDirectory<'a> {
    /// Creates a directory over the process handle table.
    pub fn new(handles: &'a HandleTable<KernelObject>) -> Self {
        Self { handles }
    }

    /// Opens a display named `name` and returns its id.
    ///
    /// The name must be 1 to [`DISPLAY_NAME_LEN`] printable ASCII characters.
    pub fn open_display(&self, name: &str) -> Result<DisplayId, DisplayError> {
        if name.is_empty()
            || name.len() > DISPLAY_NAME_LEN
            || !name.bytes().all(|b| (0x20..0x7F).contains(&b))
        {
            return Err(DisplayError::InvalidName);
        }

        let handle = self.handles.insert_with(|handle| {
            KernelObject::Display(Arc::new(Display {
                id: handle.into(),
                name: name.to_owned(),
            }))
        })?;

        log::info!("vi: opened display {name:?} as {handle}");
        Ok(handle.into())
    }

    /// Looks up an open display.
    pub fn get_display(&self, id: DisplayId) -> Result<Arc<Display>, DisplayError> {
        let handle = id.to_handle().ok_or(DisplayError::NotFound(id))?;
        match self.handles.get(handle) {
            Ok(KernelObject::Display(display)) => Ok(display),
            _ => Err(DisplayError::NotFound(id)),
        }
    }

    /// Closes an open display.
    pub fn close_display(&self, id: DisplayId) -> Result<(), DisplayError> {
        let handle = id.to_handle().ok_or(DisplayError::NotFound(id))?;
        self.get_display(id)?;

        self.handles
            .remove(handle)
            .map(drop)
            .map_err(|_| DisplayError::NotFound(id))
    }

    /// Creates a stray layer on display `id`.
    ///
    /// Returns the layer id, always [`LayerId::UNTRACKED`], and the parcel holding the layer's
    /// graphic buffer producer.
    pub fn create_stray_layer(
        &self,
        id: DisplayId,
        flags: LayerFlags,
    ) -> Result<(LayerId, Vec<u8>), DisplayError> {
        let display = self.get_display(id)?;
        let parcel = graphic_buffer_producer()?;

        log::debug!("vi: stray layer on display {:?} ({flags:?})", display.name());
        Ok((LayerId::UNTRACKED, parcel))
    }
}

/// Error returned by [`DisplayDirectory`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    /// The display name is empty, longer than eight bytes, or not printable ASCII.
    #[error("invalid display name")]
    InvalidName,
    /// No open display has this id.
    #[error("display {0:?} not found")]
    NotFound(DisplayId),
    /// The directory ran out of ids.
    #[error(transparent)]
    Handle(#[from] HandleError),
    /// The producer parcel could not be built.
    #[error(transparent)]
    Parcel(#[from] BuildError),
}

impl DisplayError {
    /// Returns the result code reported to the guest.
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::InvalidName | Self::Parcel(_) => codes::VI_OPERATION_FAILED,
            Self::NotFound(_) => codes::VI_NOT_FOUND,
            Self::Handle(err) => err.result_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use nx_hle_binder::Parcel;
    use nx_hle_kernel::Event;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_read_display_name_skips_unprintable() {
        let mut reader = RequestReader::new(&[0x41, 0x00, 0x42]);

        assert_eq!(read_display_name(&mut reader), "AB");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_display_name_stops_after_eight_bytes() {
        let mut reader = RequestReader::new(b"Default\0Extra");

        assert_eq!(read_display_name(&mut reader), "Default");
        assert_eq!(reader.remaining(), 5);
    }

    #[test]
    fn test_read_display_name_keeps_tilde_drops_del() {
        let mut reader = RequestReader::new(&[b' ', b'~', 0x7F, 0x1F, 0x80]);

        assert_eq!(read_display_name(&mut reader), " ~");
    }

    #[test]
    fn test_open_then_get() {
        let handles = HandleTable::new();
        let displays = DisplayDirectory::new(&handles);

        let id = displays.open_display("Default").unwrap();
        let display = displays.get_display(id).unwrap();

        assert_eq!(display.name(), "Default");
        assert_eq!(display.id(), id);
    }

    #[test]
    fn test_open_same_name_twice_allocates_twice() {
        let handles = HandleTable::new();
        let displays = DisplayDirectory::new(&handles);

        let first = displays.open_display("Default").unwrap();
        let second = displays.open_display("Default").unwrap();

        assert_ne!(first, second);
        assert_eq!(handles.len(), 2);
    }

    #[test]
    fn test_open_rejects_invalid_names() {
        let handles = HandleTable::new();
        let displays = DisplayDirectory::new(&handles);

        assert_eq!(displays.open_display(""), Err(DisplayError::InvalidName));
        assert_eq!(displays.open_display("Bad\n"), Err(DisplayError::InvalidName));
        assert_eq!(
            displays.open_display("MuchLongerThanEight"),
            Err(DisplayError::InvalidName)
        );
        assert_eq!(displays.open_display("Default9"), Ok(DisplayId::new(1)));
        assert_eq!(handles.len(), 1);
    }

    #[test]
    fn test_close_display() {
        let handles = HandleTable::new();
        let displays = DisplayDirectory::new(&handles);
        let id = displays.open_display("Edid").unwrap();

        displays.close_display(id).unwrap();

        assert_eq!(displays.get_display(id), Err(DisplayError::NotFound(id)));
        assert_eq!(displays.close_display(id), Err(DisplayError::NotFound(id)));
    }

    #[test]
    fn test_create_stray_layer() {
        let handles = HandleTable::new();
        let displays = DisplayDirectory::new(&handles);
        let id = displays.open_display("Default").unwrap();

        let (layer, parcel) = displays
            .create_stray_layer(id, LayerFlags::DEFAULT)
            .unwrap();

        assert_eq!(layer, LayerId::UNTRACKED);
        assert_eq!(Parcel::try_from_bytes(&parcel).unwrap().data().len(), 0x28);
    }

    #[test]
    fn test_create_stray_layer_unknown_display() {
        let handles = HandleTable::new();
        let displays = DisplayDirectory::new(&handles);
        let id = DisplayId::new(99);

        assert_eq!(
            displays.create_stray_layer(id, LayerFlags::DEFAULT),
            Err(DisplayError::NotFound(id))
        );
    }

    #[test]
    fn test_other_kernel_objects_are_not_displays() {
        let handles = HandleTable::new();
        let displays = DisplayDirectory::new(&handles);
        let event = handles
            .insert(KernelObject::Event(Arc::new(Event::new())))
            .unwrap();
        let id = DisplayId::from(event);

        assert_eq!(displays.get_display(id), Err(DisplayError::NotFound(id)));
        assert_eq!(displays.close_display(id), Err(DisplayError::NotFound(id)));
        assert!(handles.contains(event));
    }

    proptest! {
        #[test]
        fn display_name_is_printable_subsequence(bytes in proptest::collection::vec(any::<u8>(), 0..24)) {
            let mut reader = RequestReader::new(&bytes);

            let name = read_display_name(&mut reader);

            let scanned = &bytes[..bytes.len().min(DISPLAY_NAME_LEN)];
            let expected: String = scanned
                .iter()
                .filter(|b| (0x20..=0x7E).contains(*b))
                .map(|&b| b as char)
                .collect();
            prop_assert_eq!(&name, &expected);
            prop_assert_eq!(reader.remaining(), bytes.len() - scanned.len());
        }
    }
}
