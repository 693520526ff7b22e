//! IHOSBinderDriver.
//!
//! Parcel transactions are not emulated; only reference counting and native handles are.

use nx_hle_ipc::{Command, CommandTable, HandleDesc};

use super::proto::binder_cmds::*;
use crate::{ctx::ServiceCtx, error::ServiceError, service::CommandFn};

pub(crate) static COMMANDS: CommandTable<CommandFn> = CommandTable::new(
    "IHOSBinderDriver",
    &[
        Command::new(ADJUST_REFCOUNT, "AdjustRefcount", adjust_refcount as CommandFn),
        Command::new(GET_NATIVE_HANDLE, "GetNativeHandle", get_native_handle as CommandFn),
    ],
);

/// In: i32 binder id, i32 delta, i32 reference type (0 weak, 1 strong).
fn adjust_refcount(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let id = ctx.read_i32()?;
    let delta = ctx.read_i32()?;
    let kind = ctx.read_i32()?;

    log::debug!("binder: adjust refcount of {id} by {delta} (type {kind})");
    Ok(())
}

/// In: i32 binder id, u32 handle kind. Out: copy handle to a new event.
fn get_native_handle(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let id = ctx.read_i32()?;
    let kind = ctx.read_u32()?;

    let (handle, _) = ctx.os().create_event()?;
    log::debug!("binder: native handle {handle} for {id} (kind {kind})");

    ctx.set_response_handle(HandleDesc::Copy(handle));
    Ok(())
}
