//! Browser host for the frame pump.
//!
//! `gbx_start` binds a canvas and keyboard listeners, then drives the pump
//! from `requestAnimationFrame`: every callback ticks once, blits the
//! composed canvas, and re-arms itself until the session is shut down.
//! The individual exports stay available for pages that run their own loop.

mod host;

pub use host::{BrowserHost, HostError, TickReport};

#[cfg(target_arch = "wasm32")]
mod ui;

#[cfg(target_arch = "wasm32")]
pub use ui::{
    gbx_debug_panel, gbx_debug_state, gbx_frame_height, gbx_frame_len, gbx_frame_ptr,
    gbx_frame_width, gbx_init, gbx_key, gbx_set_button, gbx_set_paused, gbx_shutdown,
    gbx_start, gbx_step_frame, gbx_step_instruction, gbx_tick, gbx_toggle_debug,
    gbx_toggle_pause,
};
