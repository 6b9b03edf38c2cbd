//! Cross-crate scenarios for the emulator host.

#[cfg(all(test, not(target_arch = "wasm32")))]
mod scenarios;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod frame_sanity;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod inspector_ndjson;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod button_props;
