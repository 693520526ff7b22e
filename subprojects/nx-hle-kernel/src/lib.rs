//! # nx-hle-kernel
//!
//! Host-side stand-ins for the Horizon kernel primitives the HLE services build on:
//!
//! - [`HandleTable`]: mints process-unique [`Handle`]s and resolves them back to objects
//! - [`Event`]: a signalable kernel event (VSync, native window events)
//! - [`GuestMemory`]: the accessor through which services write into guest address space
//!
//! The guest memory itself is owned by the CPU emulator; this crate only defines the seam.

mod event;
mod handle;
mod handle_table;
mod memory;

pub use self::{
    event::Event,
    handle::{Handle, INVALID_HANDLE},
    handle_table::{HandleError, HandleTable},
    memory::{GuestMemory, MemoryError},
};
