//! Handler error type.

use nx_hle_binder::BuildError;
use nx_hle_ipc::RequestError;
use nx_hle_kernel::{HandleError, MemoryError};
use nx_hle_rc::{ResultCode, codes};

use crate::vi::DisplayError;

/// Error returned by a command handler.
///
/// Every variant is local to the call: the dispatcher turns it into a [`ResultCode`] for the
/// guest and discards the partial response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request did not carry the handler's arguments.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// A handle lookup or allocation failed.
    #[error(transparent)]
    Handle(#[from] HandleError),
    /// A display lookup or open failed.
    #[error(transparent)]
    Display(#[from] DisplayError),
    /// Writing into guest memory failed.
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// A parcel could not be built.
    #[error(transparent)]
    Parcel(#[from] BuildError),
    /// The guest's receive buffer cannot hold the output.
    #[error("receive buffer too small: need {required:#x} bytes, have {capacity:#x}")]
    BufferTooSmall {
        /// Bytes the handler needs to write.
        required: usize,
        /// Capacity of the guest buffer.
        capacity: u64,
    },
}

impl ServiceError {
    /// Returns the result code reported to the guest.
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::Request(err) => err.result_code(),
            Self::Handle(err) => err.result_code(),
            Self::Display(err) => err.result_code(),
            Self::Memory(err) => err.result_code(),
            Self::Parcel(_) | Self::BufferTooSmall { .. } => codes::VI_OPERATION_FAILED,
        }
    }
}
