//! Decoded request and pending response of a single IPC call.

use crate::{
    hipc::{HandleDesc, IpcBuffDesc},
    request::{RequestError, RequestReader},
    response::ResponseWriter,
};

/// The guest's request as handed over by the transport.
#[derive(Debug, Clone)]
pub struct IpcRequest<'a> {
    data: RequestReader<'a>,
    recv_buffers: &'a [IpcBuffDesc],
}

impl<'a> IpcRequest<'a> {
    /// Creates a request over the raw data words and the receive-buffer descriptors.
    pub const fn new(data: &'a [u8], recv_buffers: &'a [IpcBuffDesc]) -> Self {
        Self {
            data: RequestReader::new(data),
            recv_buffers,
        }
    }

    /// Returns the cursor over the data words.
    #[inline]
    pub fn data(&mut self) -> &mut RequestReader<'a> {
        &mut self.data
    }

    /// Returns the receive buffer in slot `index`.
    pub fn recv_buffer(&self, index: usize) -> Result<IpcBuffDesc, RequestError> {
        self.recv_buffers
            .get(index)
            .copied()
            .ok_or(RequestError::BufferIndexOutOfRange {
                index,
                count: self.recv_buffers.len(),
            })
    }

    /// Returns every receive buffer in positional order.
    #[inline]
    pub fn recv_buffers(&self) -> &'a [IpcBuffDesc] {
        self.recv_buffers
    }
}

/// The response being assembled for the guest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpcResponse {
    data: ResponseWriter,
    handle: Option<HandleDesc>,
}

impl IpcResponse {
    /// Creates an empty response.
    pub const fn new() -> Self {
        Self {
            data: ResponseWriter::new(),
            handle: None,
        }
    }

    /// Returns the writer for the response data words.
    #[inline]
    pub fn data(&mut self) -> &mut ResponseWriter {
        &mut self.data
    }

    /// Returns the bytes written so far.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Returns the handle attached to the response, if any.
    #[inline]
    pub fn handle(&self) -> Option<HandleDesc> {
        self.handle
    }

    /// Attaches a handle to the response, replacing any previous one.
    pub fn set_handle(&mut self, handle: HandleDesc) {
        self.handle = Some(handle);
    }

    /// Records the current state so a failed handler can be undone.
    pub fn checkpoint(&self) -> ResponseCheckpoint {
        ResponseCheckpoint {
            len: self.data.len(),
            handle: self.handle,
        }
    }

    /// Discards everything written since `checkpoint`.
    pub fn rollback(&mut self, checkpoint: ResponseCheckpoint) {
        self.data.truncate(checkpoint.len);
        self.handle = checkpoint.handle;
    }
}

/// Snapshot of an [`IpcResponse`] taken by [`IpcResponse::checkpoint`].
#[derive(Debug, Clone, Copy)]
pub struct ResponseCheckpoint {
    len: usize,
    handle: Option<HandleDesc>,
}

#[cfg(test)]
mod tests {
    use nx_hle_kernel::Handle;

    use super::*;

    #[test]
    fn test_recv_buffer_out_of_range() {
        let buffers = [IpcBuffDesc::new(0x1000, 0x100)];
        let request = IpcRequest::new(&[], &buffers);

        assert_eq!(request.recv_buffer(0), Ok(buffers[0]));
        assert_eq!(
            request.recv_buffer(1),
            Err(RequestError::BufferIndexOutOfRange { index: 1, count: 1 })
        );
    }

    #[test]
    fn test_rollback_discards_partial_response() {
        let mut response = IpcResponse::new();
        response.data().write_u32(7);
        let checkpoint = response.checkpoint();

        response.data().write_i64(-1);
        response.set_handle(HandleDesc::Move(Handle::from_raw(3)));
        response.rollback(checkpoint);

        assert_eq!(response.bytes(), &7u32.to_le_bytes());
        assert_eq!(response.handle(), None);
    }
}
