use crate::bridge;
use crate::config::PumpConfig;
use crate::diagnostics::Diagnostics;
use core_abi::{CoreFault, EmulationCore, StepKind};
use gbx_frame::{FramebufferView, Renderer, Surface};
use inspector_vm::render;
use log::{debug, trace};
use world::{CoreCmd, Intent, IntentReducer, World};

/// What one tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// 1-based tick number.
    pub tick: u64,
    /// Advance performed, if any. `None` when paused or when the advance faulted.
    pub advanced: Option<StepKind>,
    /// A fault was reported to diagnostics on this tick.
    pub faulted: bool,
    /// The debug bridge refreshed on this tick.
    pub debug_refreshed: bool,
}

/// Scheduling loop driving one core.
///
/// Each [`tick`](Self::tick) plans at most one advance from the playback
/// mode, runs it, re-acquires the framebuffer, repaints, and refreshes the
/// debug view when enabled. The framebuffer view never outlives the tick.
pub struct FramePump<C, S, D> {
    core: C,
    world: World,
    renderer: Renderer,
    surface: S,
    diagnostics: D,
    config: PumpConfig,
    frame_fault_reported: bool,
    last_now: Option<f64>,
}

impl<C, S, D> FramePump<C, S, D>
where
    C: EmulationCore,
    S: Surface,
    D: Diagnostics,
{
    pub fn new(core: C, surface: S, diagnostics: D, config: PumpConfig) -> Self {
        let renderer = Renderer::new(core.geometry(), config.border);
        Self {
            core,
            world: World::with_mode(config.initial_mode, config.debug),
            renderer,
            surface,
            diagnostics,
            config,
            frame_fault_reported: false,
            last_now: None,
        }
    }

    /// Applies one intent immediately. Button changes reach the core before
    /// this returns.
    pub fn apply(&mut self, intent: Intent) {
        for cmd in self.world.reduce_intent(intent) {
            match cmd {
                CoreCmd::SetButton { button, pressed } => {
                    trace!("button {button:?} -> {pressed}");
                    self.core.set_button(button, pressed);
                }
            }
        }
    }

    /// Runs one display refresh.
    pub fn tick(&mut self, now: f64) -> TickOutcome {
        if let Some(last) = self.last_now {
            if now < last {
                debug!("refresh timestamp went backwards ({last} -> {now})");
            }
        }
        self.last_now = Some(now);

        let planned = self.world.plan_tick();
        let mut outcome = TickOutcome {
            tick: self.world.perf.ticks,
            ..TickOutcome::default()
        };

        if let Some(kind) = planned {
            match core_abi::advance(&mut self.core, kind) {
                Ok(()) => {
                    self.world.record_advance(kind);
                    outcome.advanced = Some(kind);
                }
                Err(fault) => {
                    self.report(outcome.tick, fault);
                    outcome.faulted = true;
                }
            }
        }

        match FramebufferView::acquire(&self.core) {
            Ok(view) => {
                self.frame_fault_reported = false;
                self.renderer.render(&view, &mut self.surface);
            }
            Err(err) => {
                // Reported once per run of bad acquisitions and never twice in
                // one tick; playback is forced to Paused on every one of them.
                if !self.frame_fault_reported && !outcome.faulted {
                    self.report(outcome.tick, CoreFault::new(err.to_string()));
                    outcome.faulted = true;
                } else {
                    self.world.force_paused();
                }
                self.frame_fault_reported = true;
                self.renderer.present_retained(&mut self.surface);
            }
        }

        if self.world.debug {
            bridge::refresh(
                &self.core,
                &mut self.world.inspector,
                self.config.memory_window_len,
            );
            self.world.inspector.sync_perf(&self.world.perf);
            outcome.debug_refreshed = true;
        }

        trace!("tick {} at {now:.1}ms: {outcome:?}", outcome.tick);
        outcome
    }

    /// Pulls `count` timestamps from `clock` and ticks once for each.
    pub fn run<I>(&mut self, clock: &mut I, count: usize) -> Option<TickOutcome>
    where
        I: Iterator<Item = f64>,
    {
        clock.take(count).map(|now| self.tick(now)).last()
    }

    fn report(&mut self, tick: u64, fault: CoreFault) {
        self.diagnostics.core_fault(tick, &fault);
        self.world.record_fault(fault);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Text panel for the latest debug refresh: registers, flags, hexdump.
    pub fn debug_panel(&self) -> String {
        render::full(&self.world.inspector.vm)
    }

    /// Releases the core and the surface.
    pub fn into_parts(self) -> (C, S, D) {
        (self.core, self.surface, self.diagnostics)
    }
}
