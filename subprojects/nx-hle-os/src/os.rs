//! Process-wide HLE state.

use std::sync::Arc;

use nx_hle_ipc::DispatchError;
use nx_hle_kernel::{Event, Handle, HandleError, HandleTable};
use nx_hle_rc::ResultCode;

use crate::{ctx::ServiceCtx, object::KernelObject, service::ServiceObject, vi::DisplayDirectory};

/// State shared by every service session of one emulated process.
///
/// Passed by reference into each [`ServiceCtx`]; there is no ambient global state.
#[derive(Debug, Default)]
pub struct Os {
    handles: HandleTable<KernelObject>,
}

impl Os {
    /// Creates the state for a freshly started process.
    pub fn new() -> Self {
        Self {
            handles: HandleTable::new(),
        }
    }

    /// Returns the process handle table.
    #[inline]
    pub fn handles(&self) -> &HandleTable<KernelObject> {
        &self.handles
    }

    /// Returns the directory of open displays.
    #[inline]
    pub fn displays(&self) -> DisplayDirectory<'_> {
        DisplayDirectory::new(&self.handles)
    }

    /// Creates an event and registers it in the handle table.
    pub fn create_event(&self) -> Result<(Handle, Arc<Event>), HandleError> {
        let event = Arc::new(Event::new());
        let handle = self.handles.insert(KernelObject::Event(Arc::clone(&event)))?;
        Ok((handle, event))
    }

    /// Registers a session to `service` in the handle table.
    pub fn create_session(&self, service: ServiceObject) -> Result<Handle, HandleError> {
        let handle = self.handles.insert(KernelObject::Session(Arc::new(service)))?;
        log::trace!("os: session {handle} -> {}", service.name());
        Ok(handle)
    }

    /// Resolves `handle` to an event.
    pub fn event(&self, handle: Handle) -> Result<Arc<Event>, HandleError> {
        match self.handles.get(handle)? {
            KernelObject::Event(event) => Ok(event),
            other => Err(type_mismatch(handle, "event", &other)),
        }
    }

    /// Resolves `handle` to a service session.
    pub fn session(&self, handle: Handle) -> Result<Arc<ServiceObject>, HandleError> {
        match self.handles.get(handle)? {
            KernelObject::Session(service) => Ok(service),
            other => Err(type_mismatch(handle, "session", &other)),
        }
    }

    /// Closes `handle`.
    pub fn close_handle(&self, handle: Handle) -> Result<(), HandleError> {
        self.handles.remove(handle).map(drop)
    }

    /// Dispatches `command` to the service behind the session `handle`.
    pub fn dispatch(
        &self,
        handle: Handle,
        command: u32,
        ctx: &mut ServiceCtx<'_>,
    ) -> Result<ResultCode, SessionError> {
        let service = self.session(handle)?;
        Ok(service.dispatch(command, ctx)?)
    }
}

fn type_mismatch(handle: Handle, expected: &'static str, found: &KernelObject) -> HandleError {
    HandleError::TypeMismatch {
        handle,
        expected,
        found: found.kind(),
    }
}

/// Error returned by [`Os::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The session handle is invalid.
    #[error(transparent)]
    Handle(#[from] HandleError),
    /// The service has no handler for the command.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl SessionError {
    /// Returns the IPC failure the transport reports to the guest.
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::Handle(err) => err.result_code(),
            Self::Dispatch(err) => err.result_code(),
        }
    }
}
