//! HLE service objects and command dispatch.

use nx_hle_ipc::{CommandTable, DispatchError};
use nx_hle_rc::ResultCode;

use crate::{ctx::ServiceCtx, error::ServiceError, vi};

/// Signature shared by every command handler.
pub type CommandFn = fn(&mut ServiceCtx<'_>) -> Result<(), ServiceError>;

/// The closed set of service interfaces a session can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceObject {
    /// `IApplicationDisplayService`
    ApplicationDisplay,
    /// `ISystemDisplayService`
    SystemDisplay,
    /// `IManagerDisplayService`
    ManagerDisplay,
    /// `IHOSBinderDriver`, served for both the relay and the indirect transaction service
    HosBinderDriver,
}

impl ServiceObject {
    /// Returns the interface's command table.
    pub fn commands(self) -> &'static CommandTable<CommandFn> {
        match self {
            Self::ApplicationDisplay => &vi::application::COMMANDS,
            Self::SystemDisplay => &vi::system::COMMANDS,
            Self::ManagerDisplay => &vi::manager::COMMANDS,
            Self::HosBinderDriver => &vi::relay::COMMANDS,
        }
    }

    /// Returns the interface name.
    pub fn name(self) -> &'static str {
        self.commands().service()
    }

    /// Routes `command` to this interface's handler.
    pub fn dispatch(
        self,
        command: u32,
        ctx: &mut ServiceCtx<'_>,
    ) -> Result<ResultCode, DispatchError> {
        dispatch(self.commands(), command, ctx)
    }
}

/// Looks up `command` in `table` and runs its handler against `ctx`.
///
/// An unknown command fails with [`DispatchError::UnknownCommand`] before any handler runs and
/// leaves `ctx` untouched. Otherwise the handler's outcome is returned as a result code: success,
/// or the code of the [`ServiceError`] it failed with, in which case everything the handler
/// wrote to the response is discarded.
pub fn dispatch(
    table: &CommandTable<CommandFn>,
    command: u32,
    ctx: &mut ServiceCtx<'_>,
) -> Result<ResultCode, DispatchError> {
    let entry = table.lookup(command).inspect_err(|err| log::warn!("{err}"))?;
    log::debug!("{}: {} ({})", table.service(), entry.name, command);

    let checkpoint = ctx.response().checkpoint();
    match (entry.handler)(ctx) {
        Ok(()) => Ok(ResultCode::SUCCESS),
        Err(err) => {
            let rc = err.result_code();
            log::warn!("{}: {} failed with {rc}: {err}", table.service(), entry.name);

            ctx.response_mut().rollback(checkpoint);
            Ok(rc)
        }
    }
}
