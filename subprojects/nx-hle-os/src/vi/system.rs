//! ISystemDisplayService.

use nx_hle_ipc::{Command, CommandTable};

use super::proto::system_cmds::*;
use crate::{ctx::ServiceCtx, error::ServiceError, service::CommandFn};

pub(crate) static COMMANDS: CommandTable<CommandFn> = CommandTable::new(
    "ISystemDisplayService",
    &[Command::new(SET_LAYER_Z, "SetLayerZ", set_layer_z as CommandFn)],
);

/// In: i64 layer id, i64 z.
fn set_layer_z(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let layer_id = ctx.read_i64()?;
    let z = ctx.read_i64()?;

    log::debug!("vi: layer {layer_id} z {z}");
    Ok(())
}
