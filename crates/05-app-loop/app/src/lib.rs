//! Host loop: the frame pump, the debug bridge, and session lifetime.
//!
//! The pump is single-threaded. Frontends call [`FramePump::apply`] as input
//! arrives and [`FramePump::tick`] once per display refresh; nothing is
//! queued between the two.

pub mod bridge;
mod clock;
mod config;
mod diagnostics;
mod pump;
mod session;

pub use clock::{RefreshClock, REFRESH_INTERVAL_MS};
pub use config::PumpConfig;
pub use diagnostics::{Diagnostics, LogDiagnostics, RecordingDiagnostics};
pub use pump::{FramePump, TickOutcome};
pub use session::{Session, SessionError};

pub use core_abi::{Button, CoreFault, EmulationCore, StepKind};
pub use world::{Intent, PlaybackMode};
