//! # nx-hle-ipc
//!
//! Server-side building blocks for answering guest IPC requests.
//!
//! The transport layer (outside this crate) decodes the guest's HIPC/CMIF message into an
//! [`IpcRequest`]: the raw data words plus the receive-buffer descriptors. Handlers consume
//! the data words through a [`RequestReader`] and produce an [`IpcResponse`]: response data
//! words written through a [`ResponseWriter`] and at most one [`HandleDesc`].
//!
//! Each service exposes a static [`CommandTable`] mapping CMIF command ids to handlers.
//!
//! ```text
//! guest ─ HIPC ─▶ transport ─▶ IpcRequest ─▶ CommandTable lookup ─▶ handler
//!                                                                   │
//! guest ◀─ HIPC ─ transport ◀─ IpcResponse + ResultCode ◀──────────┘
//! ```

mod command;
pub mod hipc;
mod message;
mod request;
mod response;

pub use self::{
    command::{Command, CommandTable, DispatchError},
    hipc::{HandleDesc, IpcBuffDesc},
    message::{IpcRequest, IpcResponse, ResponseCheckpoint},
    request::{RequestError, RequestReader},
    response::ResponseWriter,
};
