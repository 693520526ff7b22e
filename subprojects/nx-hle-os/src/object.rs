//! Kernel objects visible to the guest through handles.

use std::sync::Arc;

use nx_hle_kernel::Event;

use crate::{service::ServiceObject, vi::Display};

/// Every kind of object a process handle can name.
///
/// Lookups go through [`Os::event`], [`Os::session`] and the display directory, which check the
/// variant instead of trusting the caller.
///
/// [`Os::event`]: crate::Os::event
/// [`Os::session`]: crate::Os::session
#[derive(Debug, Clone)]
pub enum KernelObject {
    /// A signalable event.
    Event(Arc<Event>),
    /// An open display.
    Display(Arc<Display>),
    /// A session to an HLE service object.
    Session(Arc<ServiceObject>),
}

impl KernelObject {
    /// Returns the kind name used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Event(_) => "event",
            Self::Display(_) => "display",
            Self::Session(_) => "session",
        }
    }
}
