#![allow(dead_code)]

use nx_hle_ipc::{DispatchError, IpcBuffDesc, IpcRequest, IpcResponse};
use nx_hle_kernel::{GuestMemory, MemoryError};
use nx_hle_os::{Os, ServiceCtx, ServiceObject};
use nx_hle_rc::ResultCode;
use parking_lot::Mutex;

/// Guest address where the test memory window starts.
pub const GUEST_BASE: u64 = 0x8000_0000;

/// A single mapped window of guest memory that records every write.
pub struct TestMemory {
    base: u64,
    bytes: Mutex<Vec<u8>>,
    writes: Mutex<Vec<(u64, usize)>>,
}

impl TestMemory {
    pub fn new(size: usize) -> Self {
        Self {
            base: GUEST_BASE,
            bytes: Mutex::new(vec![0xCD; size]),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn read(&self, address: u64, len: usize) -> Vec<u8> {
        let mut buf = vec![0; len];
        self.read_bytes(address, &mut buf).unwrap();
        buf
    }

    pub fn writes(&self) -> Vec<(u64, usize)> {
        self.writes.lock().clone()
    }

    fn range(&self, address: u64, len: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        let unmapped = MemoryError::Unmapped { address, size: len };
        let start = address.checked_sub(self.base).ok_or(unmapped)? as usize;
        let end = start.checked_add(len).ok_or(unmapped)?;
        if end > self.bytes.lock().len() {
            return Err(unmapped);
        }
        Ok(start..end)
    }
}

impl GuestMemory for TestMemory {
    fn read_bytes(&self, address: u64, buf: &mut [u8]) -> Result<(), MemoryError> {
        let range = self.range(address, buf.len())?;
        buf.copy_from_slice(&self.bytes.lock()[range]);
        Ok(())
    }

    fn write_bytes(&self, address: u64, data: &[u8]) -> Result<(), MemoryError> {
        let range = self.range(address, data.len())?;
        self.bytes.lock()[range].copy_from_slice(data);
        self.writes.lock().push((address, data.len()));
        Ok(())
    }
}

/// Outcome of one dispatched call.
pub struct Reply {
    pub result: Result<ResultCode, DispatchError>,
    pub response: IpcResponse,
}

impl Reply {
    pub fn rc(&self) -> ResultCode {
        self.result.clone().expect("command should be known")
    }

    pub fn u64_at(&self, offset: usize) -> u64 {
        let bytes = &self.response.bytes()[offset..offset + 8];
        u64::from_le_bytes(bytes.try_into().unwrap())
    }
}

/// Dispatches `command` on `service` with the given data words and receive buffers.
pub fn call(
    os: &Os,
    memory: &TestMemory,
    service: ServiceObject,
    command: u32,
    data: &[u8],
    buffers: &[IpcBuffDesc],
) -> Reply {
    let mut ctx = ServiceCtx::new(os, memory, IpcRequest::new(data, buffers));
    let result = service.dispatch(command, &mut ctx);
    Reply {
        result,
        response: ctx.into_response(),
    }
}

/// Builds request data words from a list of little-endian fields.
#[derive(Default)]
pub struct Words(Vec<u8>);

impl Words {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn i32(mut self, val: i32) -> Self {
        self.0.extend_from_slice(&val.to_le_bytes());
        self
    }

    pub fn u32(mut self, val: u32) -> Self {
        self.0.extend_from_slice(&val.to_le_bytes());
        self
    }

    pub fn i64(mut self, val: i64) -> Self {
        self.0.extend_from_slice(&val.to_le_bytes());
        self
    }

    pub fn u64(mut self, val: u64) -> Self {
        self.0.extend_from_slice(&val.to_le_bytes());
        self
    }

    /// Appends a display name padded to the 0x40-byte CMIF field.
    pub fn name(mut self, name: &[u8]) -> Self {
        let mut field = [0u8; 0x40];
        field[..name.len()].copy_from_slice(name);
        self.0.extend_from_slice(&field);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.0
    }
}
