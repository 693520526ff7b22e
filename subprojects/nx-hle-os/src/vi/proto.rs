//! CMIF command ids served by the VI interfaces.

/// `IApplicationDisplayService`.
pub mod application_cmds {
    /// Opens a binder driver session (relay).
    pub const GET_RELAY_SERVICE: u32 = 100;
    /// Opens a system display service session.
    pub const GET_SYSTEM_DISPLAY_SERVICE: u32 = 101;
    /// Opens a manager display service session.
    pub const GET_MANAGER_DISPLAY_SERVICE: u32 = 102;
    /// Opens a binder driver session (indirect).
    pub const GET_INDIRECT_DISPLAY_TRANSACTION_SERVICE: u32 = 103;

    /// Open a display by name.
    pub const OPEN_DISPLAY: u32 = 1010;

    /// Open a layer.
    pub const OPEN_LAYER: u32 = 2020;
    /// Create a stray layer.
    pub const CREATE_STRAY_LAYER: u32 = 2030;

    /// Set layer scaling mode.
    pub const SET_LAYER_SCALING_MODE: u32 = 2101;

    /// Get display vsync event.
    pub const GET_DISPLAY_VSYNC_EVENT: u32 = 5202;
}

/// `ISystemDisplayService`.
pub mod system_cmds {
    /// Set layer Z-order.
    pub const SET_LAYER_Z: u32 = 2205;
}

/// `IManagerDisplayService`.
pub mod manager_cmds {
    /// Create a managed layer.
    pub const CREATE_MANAGED_LAYER: u32 = 2010;
    /// Add layer to stack.
    pub const ADD_TO_LAYER_STACK: u32 = 6000;
}

/// `IHOSBinderDriver`.
pub mod binder_cmds {
    /// Transact parcel. Not served.
    pub const TRANSACT_PARCEL: u32 = 0;
    /// Adjust reference count.
    pub const ADJUST_REFCOUNT: u32 = 1;
    /// Get native handle.
    pub const GET_NATIVE_HANDLE: u32 = 2;
}
