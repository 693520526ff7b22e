//! VI (Visual Interface) service emulation.
//!
//! The guest reaches the display stack through `IApplicationDisplayService`, which hands out
//! sub-service sessions, opens displays by name, and creates layers whose buffer producer is
//! returned as a binder parcel written into a guest receive buffer.
//!
//! The compositor side is not emulated here: layers are not retained, and VSync events are
//! plain kernel events for an external compositor to signal.

pub(crate) mod application;
mod display;
pub(crate) mod manager;
mod producer;
pub mod proto;
pub(crate) mod relay;
pub(crate) mod system;
mod types;

pub use self::{
    display::{DISPLAY_NAME_LEN, Display, DisplayDirectory, DisplayError, read_display_name},
    producer::{PRODUCER_BINDER_ID, graphic_buffer_producer},
    types::{DisplayId, LayerFlags, LayerId, ScalingMode},
};
