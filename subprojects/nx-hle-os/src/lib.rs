//! # nx-hle-os
//!
//! Request dispatch and object marshaling for high-level emulated Horizon services.
//!
//! An emulated process owns one [`Os`]: the handle table of kernel objects it can see and the
//! display directory. Every guest IPC call is answered by building a [`ServiceCtx`] over the
//! decoded request and handing it to the target [`ServiceObject`], which routes it through its
//! static command table to a handler.
//!
//! ```text
//! transport ──▶ ServiceCtx ──▶ ServiceObject::dispatch ──▶ handler
//!                  │                                         │
//!                  ├── request data words / recv buffers ◀───┤ reads arguments
//!                  ├── Os: handles, displays ◀───────────────┤ mints objects
//!                  ├── GuestMemory ◀─────────────────────────┤ writes parcels
//!                  └── response data words / handle ◀────────┘ writes results
//! ```
//!
//! Services implemented:
//! - `IApplicationDisplayService` and its sub-services (`vi`)

mod ctx;
mod error;
mod object;
mod os;
mod service;
pub mod vi;

pub use self::{
    ctx::ServiceCtx,
    error::ServiceError,
    object::KernelObject,
    os::{Os, SessionError},
    service::{CommandFn, ServiceObject, dispatch},
};
