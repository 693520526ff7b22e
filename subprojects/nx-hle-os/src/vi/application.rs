//! IApplicationDisplayService.
//!
//! This is the main display service interface available to all apps.

use nx_hle_ipc::{Command, CommandTable, HandleDesc, IpcBuffDesc};

use super::{
    display::read_display_name,
    producer::graphic_buffer_producer,
    proto::application_cmds::*,
    types::{DisplayId, LayerFlags, ScalingMode},
};
use crate::{
    ctx::ServiceCtx,
    error::ServiceError,
    service::{CommandFn, ServiceObject},
};

pub(crate) static COMMANDS: CommandTable<CommandFn> = CommandTable::new(
    "IApplicationDisplayService",
    &[
        Command::new(GET_RELAY_SERVICE, "GetRelayService", get_relay_service as CommandFn),
        Command::new(
            GET_SYSTEM_DISPLAY_SERVICE,
            "GetSystemDisplayService",
            get_system_display_service as CommandFn,
        ),
        Command::new(
            GET_MANAGER_DISPLAY_SERVICE,
            "GetManagerDisplayService",
            get_manager_display_service as CommandFn,
        ),
        Command::new(
            GET_INDIRECT_DISPLAY_TRANSACTION_SERVICE,
            "GetIndirectDisplayTransactionService",
            get_indirect_display_transaction_service as CommandFn,
        ),
        Command::new(OPEN_DISPLAY, "OpenDisplay", open_display as CommandFn),
        Command::new(OPEN_LAYER, "OpenLayer", open_layer as CommandFn),
        Command::new(CREATE_STRAY_LAYER, "CreateStrayLayer", create_stray_layer as CommandFn),
        Command::new(
            SET_LAYER_SCALING_MODE,
            "SetLayerScalingMode",
            set_layer_scaling_mode as CommandFn,
        ),
        Command::new(
            GET_DISPLAY_VSYNC_EVENT,
            "GetDisplayVSyncEvent",
            get_display_vsync_event as CommandFn,
        ),
    ],
);

fn get_relay_service(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    make_object(ctx, ServiceObject::HosBinderDriver)
}

fn get_system_display_service(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    make_object(ctx, ServiceObject::SystemDisplay)
}

fn get_manager_display_service(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    make_object(ctx, ServiceObject::ManagerDisplay)
}

fn get_indirect_display_transaction_service(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    make_object(ctx, ServiceObject::HosBinderDriver)
}

/// In: display name. Out: u64 display id.
fn open_display(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let name = read_display_name(ctx.request().data());

    let id = ctx.os().displays().open_display(&name)?;

    ctx.write_u64(id.to_raw());
    Ok(())
}

/// In: i64 layer id, i64 user id, recv buffer 0. Out: i64 parcel size.
fn open_layer(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let layer_id = ctx.read_i64()?;
    let user_id = ctx.read_i64()?;
    let buffer = ctx.recv_buffer(0)?;

    log::debug!("vi: open layer {layer_id} for user {user_id:#x}");

    let parcel = graphic_buffer_producer()?;
    write_parcel(ctx, buffer, &parcel)?;

    ctx.write_i64(parcel.len() as i64);
    Ok(())
}

/// In: i64 layer flags, i64 display id, recv buffer 0. Out: i64 layer id, i64 parcel size.
fn create_stray_layer(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let flags = ctx.read_i64()?;
    let display_id = DisplayId::new(ctx.read_i64()? as u64);
    let buffer = ctx.recv_buffer(0)?;

    let flags = LayerFlags::from_bits_retain(flags as u32);
    let (layer_id, parcel) = ctx
        .os()
        .displays()
        .create_stray_layer(display_id, flags)?;
    write_parcel(ctx, buffer, &parcel)?;

    ctx.write_u64(layer_id.to_raw());
    ctx.write_i64(parcel.len() as i64);
    Ok(())
}

/// In: i32 scaling mode, i64 layer id.
fn set_layer_scaling_mode(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let raw_mode = ctx.read_i32()?;
    let layer_id = ctx.read_i64()?;

    match ScalingMode::from_raw(raw_mode) {
        Some(mode) => log::debug!("vi: layer {layer_id} scaling mode {mode:?}"),
        None => log::warn!("vi: layer {layer_id} unknown scaling mode {raw_mode}"),
    }
    Ok(())
}

/// In: display name. Out: copy handle to a new event.
fn get_display_vsync_event(ctx: &mut ServiceCtx<'_>) -> Result<(), ServiceError> {
    let name = read_display_name(ctx.request().data());

    let (handle, _) = ctx.os().create_event()?;
    log::debug!("vi: vsync event {handle} for display {name:?}");

    ctx.set_response_handle(HandleDesc::Copy(handle));
    Ok(())
}

/// Opens a session to `service` and moves its handle to the guest.
fn make_object(ctx: &mut ServiceCtx<'_>, service: ServiceObject) -> Result<(), ServiceError> {
    let handle = ctx.os().create_session(service)?;

    ctx.set_response_handle(HandleDesc::Move(handle));
    Ok(())
}

/// Writes `parcel` into the guest receive buffer described by `buffer`.
fn write_parcel(
    ctx: &ServiceCtx<'_>,
    buffer: IpcBuffDesc,
    parcel: &[u8],
) -> Result<(), ServiceError> {
    if parcel.len() as u64 > buffer.size {
        return Err(ServiceError::BufferTooSmall {
            required: parcel.len(),
            capacity: buffer.size,
        });
    }

    ctx.write_guest(buffer.position, parcel)?;
    Ok(())
}
