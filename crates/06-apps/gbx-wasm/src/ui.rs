//! WASM UI exports (wasm32 only).

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    console, CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData, KeyboardEvent,
    Window,
};

use app::{Diagnostics, Intent, PumpConfig};
use core_abi::CoreFault;

use crate::host::{BrowserHost, HostError, TickReport};

/// Surfaces core faults in the browser console.
struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn core_fault(&mut self, tick: u64, fault: &CoreFault) {
        console::error_1(&format!("gbx: tick {tick}: {fault}; playback paused").into());
    }
}

type KeyListener = Closure<dyn FnMut(KeyboardEvent)>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Canvas binding plus the callbacks registered with the page. Dropping it
/// cancels the pending frame and detaches the keyboard listeners.
struct Display {
    window: Window,
    document: Document,
    ctx: CanvasRenderingContext2d,
    keys: Vec<(&'static str, KeyListener)>,
    frame: FrameCallback,
    handle: Rc<Cell<i32>>,
}

impl Drop for Display {
    fn drop(&mut self) {
        if let Err(err) = self.window.cancel_animation_frame(self.handle.get()) {
            console::warn_1(&err);
        }
        for (kind, listener) in self.keys.drain(..) {
            let detached = self
                .document
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
            if let Err(err) = detached {
                console::warn_1(&err);
            }
        }
        self.frame.borrow_mut().take();
    }
}

thread_local! {
    static CTX: RefCell<Option<BrowserHost<ConsoleDiagnostics>>> = const { RefCell::new(None) };
    static DISPLAY: RefCell<Option<Display>> = const { RefCell::new(None) };
    static IN_EXPORT: Cell<bool> = const { Cell::new(false) };
}

fn js_err(err: HostError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn with_guard<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce() -> Result<R, JsValue>,
{
    IN_EXPORT.with(|g| {
        if g.get() {
            return Err(JsValue::from_str("reentrant export call"));
        }
        g.set(true);
        let r = f();
        g.set(false);
        r
    })
}

fn with_host<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&mut BrowserHost<ConsoleDiagnostics>) -> Result<R, HostError>,
{
    with_guard(|| {
        CTX.with(|c| {
            let mut opt = c.borrow_mut();
            let host = opt
                .as_mut()
                .ok_or_else(|| JsValue::from_str("not inited"))?;
            f(host).map_err(js_err)
        })
    })
}

/// Creates the session from cartridge bytes fetched by the page.
#[wasm_bindgen]
pub fn gbx_init(rom: &[u8], debug: bool) -> Result<(), JsValue> {
    with_guard(|| {
        let config = PumpConfig {
            debug,
            ..PumpConfig::default()
        };
        let host = BrowserHost::create(rom, ConsoleDiagnostics, config).map_err(js_err)?;
        CTX.with(|c| {
            if let Some(mut previous) = c.borrow_mut().replace(host) {
                previous.shutdown();
            }
        });
        console::log_1(&format!("gbx_init: session started ({} byte rom)", rom.len()).into());
        Ok(())
    })
}

/// Binds the canvas with id `canvas_id`, forwards document key events, and
/// drives the session from `requestAnimationFrame` until shutdown.
#[wasm_bindgen]
pub fn gbx_start(canvas_id: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("unexpected 2d context type"))?;

    let (width, height) = with_host(|host| {
        let surface = host.canvas()?;
        Ok((surface.width as u32, surface.height as u32))
    })?;
    canvas.set_width(width);
    canvas.set_height(height);

    // Replaces any display from an earlier start.
    DISPLAY.with(|d| d.borrow_mut().take());

    let mut keys = Vec::with_capacity(2);
    for (kind, pressed) in [("keydown", true), ("keyup", false)] {
        let listener = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if let Err(err) = gbx_key(event.key_code(), pressed) {
                console::warn_1(&err);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        keys.push((kind, listener));
    }

    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let handle = Rc::new(Cell::new(0));
    let rearm = frame.clone();
    let rearm_handle = handle.clone();
    let rearm_window = window.clone();
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        match on_frame(now) {
            Ok(true) => {
                if let Some(callback) = rearm.borrow().as_ref() {
                    match rearm_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        Ok(id) => rearm_handle.set(id),
                        Err(err) => console::error_1(&err),
                    }
                }
            }
            Ok(false) => console::log_1(&"gbx: session ended, frame loop stopped".into()),
            Err(err) => console::error_1(&err),
        }
    }) as Box<dyn FnMut(f64)>));

    let first = match frame.borrow().as_ref() {
        Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref())?,
        None => return Err(JsValue::from_str("frame callback missing")),
    };
    handle.set(first);

    DISPLAY.with(|d| {
        *d.borrow_mut() = Some(Display {
            window,
            document,
            ctx,
            keys,
            frame,
            handle,
        });
    });
    console::log_1(&format!("gbx_start: bound #{canvas_id} ({width}x{height})").into());
    Ok(())
}

/// Ticks once and blits the composed canvas. `false` ends the loop.
fn on_frame(now: f64) -> Result<bool, JsValue> {
    if !with_host(|host| host.on_frame(now))? {
        return Ok(false);
    }
    DISPLAY.with(|d| {
        let display = d.borrow();
        let Some(display) = display.as_ref() else {
            return Ok(false);
        };
        with_guard(|| {
            CTX.with(|c| {
                let opt = c.borrow();
                let host = opt
                    .as_ref()
                    .ok_or_else(|| JsValue::from_str("not inited"))?;
                let surface = host.canvas().map_err(js_err)?;
                let image = ImageData::new_with_u8_clamped_array_and_sh(
                    Clamped(surface.pixels.as_slice()),
                    surface.width as u32,
                    surface.height as u32,
                )?;
                display.ctx.put_image_data(&image, 0.0, 0.0)?;
                Ok(true)
            })
        })
    })
}

/// One refresh for pages that run their own loop.
#[wasm_bindgen]
pub fn gbx_tick(now: f64) -> Result<TickReport, JsValue> {
    with_host(|host| host.tick(now))
}

/// Browser `keyCode` change. Unmapped codes are ignored.
#[wasm_bindgen]
pub fn gbx_key(code: u32, pressed: bool) -> Result<(), JsValue> {
    with_host(|host| host.apply(Intent::Key { code, pressed }))
}

/// Named button from an on-screen control; returns whether the name matched.
#[wasm_bindgen]
pub fn gbx_set_button(name: &str, pressed: bool) -> Result<bool, JsValue> {
    with_host(|host| host.set_button(name, pressed))
}

#[wasm_bindgen]
pub fn gbx_toggle_pause() -> Result<(), JsValue> {
    with_host(|host| host.apply(Intent::TogglePause))
}

/// Explicit pause state, e.g. from a page visibility change.
#[wasm_bindgen]
pub fn gbx_set_paused(paused: bool) -> Result<(), JsValue> {
    with_host(|host| host.apply(Intent::SetPaused(paused)))
}

#[wasm_bindgen]
pub fn gbx_step_frame() -> Result<(), JsValue> {
    with_host(|host| host.apply(Intent::StepFrame))
}

#[wasm_bindgen]
pub fn gbx_step_instruction() -> Result<(), JsValue> {
    with_host(|host| host.apply(Intent::StepInstruction))
}

#[wasm_bindgen]
pub fn gbx_toggle_debug() -> Result<(), JsValue> {
    with_host(|host| host.apply(Intent::ToggleDebug))
}

/// Address of the composed canvas in wasm memory. Valid until the next tick.
#[wasm_bindgen]
pub fn gbx_frame_ptr() -> Result<u32, JsValue> {
    with_host(|host| Ok(host.canvas()?.pixels.as_ptr() as u32))
}

#[wasm_bindgen]
pub fn gbx_frame_len() -> Result<u32, JsValue> {
    with_host(|host| Ok(host.canvas()?.pixels.len() as u32))
}

#[wasm_bindgen]
pub fn gbx_frame_width() -> Result<u32, JsValue> {
    with_host(|host| Ok(host.canvas()?.width as u32))
}

#[wasm_bindgen]
pub fn gbx_frame_height() -> Result<u32, JsValue> {
    with_host(|host| Ok(host.canvas()?.height as u32))
}

#[wasm_bindgen]
pub fn gbx_debug_panel() -> Result<String, JsValue> {
    with_host(|host| host.debug_panel())
}

/// Inspector view-model as a plain JS object.
#[wasm_bindgen]
pub fn gbx_debug_state() -> Result<JsValue, JsValue> {
    let line = with_host(|host| host.debug_state())?;
    js_sys::JSON::parse(line.trim_end())
}

/// Releases the core and unbinds the canvas. Later exports fail with
/// "session already shut down".
#[wasm_bindgen]
pub fn gbx_shutdown() -> Result<bool, JsValue> {
    let released = with_host(|host| Ok(host.shutdown()))?;
    DISPLAY.with(|d| d.borrow_mut().take());
    Ok(released)
}
