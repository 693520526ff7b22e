//! Per-call service context.

use nx_hle_ipc::{HandleDesc, IpcBuffDesc, IpcRequest, IpcResponse, RequestError};
use nx_hle_kernel::{GuestMemory, MemoryError};

use crate::os::Os;

/// Everything a handler may touch while answering one IPC call.
///
/// Built by the transport for a single dispatch and dropped afterwards; handlers must not
/// keep anything borrowed from it.
pub struct ServiceCtx<'a> {
    os: &'a Os,
    memory: &'a dyn GuestMemory,
    request: IpcRequest<'a>,
    response: IpcResponse,
}

impl<'a> ServiceCtx<'a> {
    /// Creates the context for one call with an empty response.
    pub fn new(os: &'a Os, memory: &'a dyn GuestMemory, request: IpcRequest<'a>) -> Self {
        Self {
            os,
            memory,
            request,
            response: IpcResponse::new(),
        }
    }

    /// Returns the process-wide state.
    #[inline]
    pub fn os(&self) -> &'a Os {
        self.os
    }

    /// Returns the guest memory accessor.
    #[inline]
    pub fn memory(&self) -> &'a dyn GuestMemory {
        self.memory
    }

    /// Returns the request.
    #[inline]
    pub fn request(&mut self) -> &mut IpcRequest<'a> {
        &mut self.request
    }

    /// Returns the response built so far.
    #[inline]
    pub fn response(&self) -> &IpcResponse {
        &self.response
    }

    /// Returns the response for writing.
    #[inline]
    pub fn response_mut(&mut self) -> &mut IpcResponse {
        &mut self.response
    }

    /// Consumes the context, returning the response for the transport to pack.
    pub fn into_response(self) -> IpcResponse {
        self.response
    }

    /// Reads a byte from the request.
    pub fn read_u8(&mut self) -> Result<u8, RequestError> {
        self.request.data().read_u8()
    }

    /// Reads a 32-bit signed integer from the request.
    pub fn read_i32(&mut self) -> Result<i32, RequestError> {
        self.request.data().read_i32()
    }

    /// Reads a 32-bit unsigned integer from the request.
    pub fn read_u32(&mut self) -> Result<u32, RequestError> {
        self.request.data().read_u32()
    }

    /// Reads a 64-bit signed integer from the request.
    pub fn read_i64(&mut self) -> Result<i64, RequestError> {
        self.request.data().read_i64()
    }

    /// Reads a 64-bit unsigned integer from the request.
    pub fn read_u64(&mut self) -> Result<u64, RequestError> {
        self.request.data().read_u64()
    }

    /// Returns the receive buffer in slot `index`.
    pub fn recv_buffer(&self, index: usize) -> Result<IpcBuffDesc, RequestError> {
        self.request.recv_buffer(index)
    }

    /// Appends a 64-bit signed integer to the response.
    pub fn write_i64(&mut self, val: i64) {
        self.response.data().write_i64(val);
    }

    /// Appends a 64-bit unsigned integer to the response.
    pub fn write_u64(&mut self, val: u64) {
        self.response.data().write_u64(val);
    }

    /// Returns a kernel handle to the guest instead of inline data.
    pub fn set_response_handle(&mut self, handle: HandleDesc) {
        self.response.set_handle(handle);
    }

    /// Writes `data` into guest memory at `address`.
    pub fn write_guest(&self, address: u64, data: &[u8]) -> Result<(), MemoryError> {
        self.memory.write_bytes(address, data)
    }
}

impl core::fmt::Debug for ServiceCtx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServiceCtx")
            .field("request", &self.request)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}
