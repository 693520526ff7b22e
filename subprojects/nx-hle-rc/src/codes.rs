//! Well-known result codes emitted by the HLE core.

use crate::{Module, ResultCode};

/// `2001-0106`: the guest address range is not mapped or not writable.
pub const KERNEL_INVALID_MEMORY: ResultCode = ResultCode::from_parts(Module::Kernel, 106);

/// `2001-0114`: the handle does not name a live object of the expected kind.
pub const KERNEL_INVALID_HANDLE: ResultCode = ResultCode::from_parts(Module::Kernel, 114);

/// `2010-0202`: the request data words ended before all arguments were read.
pub const SF_INVALID_IN_RAW_SIZE: ResultCode = ResultCode::from_parts(Module::Sf, 202);

/// `2010-0205`: a handler asked for a buffer descriptor the request did not carry.
pub const SF_INVALID_BUFFER_INDEX: ResultCode = ResultCode::from_parts(Module::Sf, 205);

/// `2010-0221`: no handler is registered for the command id.
pub const SF_UNKNOWN_COMMAND_ID: ResultCode = ResultCode::from_parts(Module::Sf, 221);

/// `2114-0001`: the display service rejected the operation.
pub const VI_OPERATION_FAILED: ResultCode = ResultCode::from_parts(Module::Vi, 1);

/// `2114-0007`: the display or layer does not exist.
pub const VI_NOT_FOUND: ResultCode = ResultCode::from_parts(Module::Vi, 7);
