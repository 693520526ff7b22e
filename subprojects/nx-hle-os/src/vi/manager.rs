//! IManagerDisplayService.

use nx_hle_ipc::{Command, CommandTable};

use super::{
    proto::manager_cmds::*,
    types::{DisplayId, LayerFlags, LayerId},
};
use crate::{ctx::ServiceCtx, error::ServiceError, service::CommandFn};

pub(crate) static COMMANDS: CommandTable<CommandFn> = CommandTable::new(
    "IManagerDisplayService",
    &[
        Command::new(
            CREATE_MANAGED_LAYER,
            "CreateManagedLayer",
            create_managed_layer as CommandFn,
        ),
        Command::new(ADD_TO_LAYER_STACK, "AddToLayerStack", add_to_layer_stack as CommandFn),
    ],
);

/// In: u32 layer flags, u32 pad, u64 display id, u64 aruid. Out: u64 layer id.
fn create_managed_layer(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let flags = LayerFlags::from_bits_retain(ctx.read_u32()?);
    let _pad = ctx.read_u32()?;
    let display_id = DisplayId::new(ctx.read_u64()?);
    let aruid = ctx.read_u64()?;

    let display = ctx.os().displays().get_display(display_id)?;
    log::debug!(
        "vi: managed layer on display {:?} for aruid {aruid:#x} ({flags:?})",
        display.name()
    );

    ctx.write_u64(LayerId::UNTRACKED.to_raw());
    Ok(())
}

/// In: u32 layer stack, u32 pad, u64 layer id.
fn add_to_layer_stack(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let stack = ctx.read_u32()?;
    let _pad = ctx.read_u32()?;
    let layer_id = ctx.read_u64()?;

    log::debug!("vi: layer {layer_id} added to stack {stack}");
    Ok(())
}
