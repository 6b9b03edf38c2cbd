use gbx_frame::BorderStyle;
use world::PlaybackMode;

/// Pump configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PumpConfig {
    /// Bytes requested from the core on each debug refresh.
    pub memory_window_len: usize,
    /// Mode at the first tick.
    pub initial_mode: PlaybackMode,
    /// Whether debug refresh starts enabled.
    pub debug: bool,
    /// Decoration drawn around the display.
    pub border: BorderStyle,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            memory_window_len: 48,
            initial_mode: PlaybackMode::Running,
            debug: false,
            border: BorderStyle::default(),
        }
    }
}
