// carousel_core: Rust/WASM carousel engine for the portfolio page.
// All carousel logic lives here; JS forwards DOM events in and applies HostCommands out.

mod autoplay;
mod carousel;
mod catalog;
mod error;
mod input;
mod render;
mod types;

use wasm_bindgen::prelude::*;

pub use carousel::Carousel;
pub use catalog::{ensure_unique_ids, parse_new_slide, parse_slides};
pub use error::CarouselError;
pub use input::{ArrowKey, InputEvent};
pub use render::{HostCommand, ACTIVE_DOT_CLASS, INACTIVE_DOT_CLASS};
pub use types::*;

/// Initialize panic hook and console logging for the browser.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    init_console_log();
}

#[cfg(feature = "console_log")]
fn init_console_log() {
    // A second `init` (e.g. two wasm modules on one page) keeps the first logger.
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        log::debug!("console logger not installed: {}", err);
    }
}

/// Carousel exposed to JavaScript.
///
/// Every mutating call returns a JSON array of [`HostCommand`]s for the page to
/// apply, so one event costs one JS↔WASM crossing.
#[wasm_bindgen]
pub struct WasmCarousel {
    inner: Carousel,
}

#[wasm_bindgen]
impl WasmCarousel {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmCarousel, JsValue> {
        let config = CarouselConfig::from_json(config_json).map_err(to_js)?;
        Ok(WasmCarousel {
            inner: Carousel::new(config),
        })
    }

    /// Mount with a slide table and the list of surfaces the page provides.
    ///
    /// An invalid slide table is an error; a missing root surface is not.
    pub fn mount(&mut self, slides_json: &str, surfaces_json: &str) -> Result<String, JsValue> {
        let slides = parse_slides(slides_json).map_err(to_js)?;
        let surfaces: HostSurfaces = serde_json::from_str(surfaces_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid surfaces: {}", e)))?;

        self.inner.mount(slides, surfaces);
        self.drain()
    }

    /// Negative indices are ignored like any other out-of-range index.
    pub fn go_to_slide(&mut self, index: i32) -> Result<String, JsValue> {
        if let Ok(index) = usize::try_from(index) {
            self.inner.go_to_slide(index);
        }
        self.drain()
    }

    pub fn advance(&mut self) -> Result<String, JsValue> {
        self.inner.advance();
        self.drain()
    }

    pub fn retreat(&mut self) -> Result<String, JsValue> {
        self.inner.retreat();
        self.drain()
    }

    pub fn pause(&mut self) -> Result<String, JsValue> {
        self.inner.pause();
        self.drain()
    }

    pub fn resume(&mut self) -> Result<String, JsValue> {
        self.inner.resume();
        self.drain()
    }

    /// Timer callback. `handle` is the one from the `ArmTimer` command.
    pub fn tick(&mut self, handle: u32, in_view: bool) -> Result<String, JsValue> {
        self.inner.tick(TimerHandle::new(handle), &in_view);
        self.drain()
    }

    /// Timer callback with the root's bounding box instead of a precomputed flag.
    pub fn tick_with_rect(
        &mut self,
        handle: u32,
        top: f64,
        bottom: f64,
        viewport_height: f64,
    ) -> Result<String, JsValue> {
        let rect = ViewportRect::new(top, bottom, viewport_height);
        self.inner.tick(TimerHandle::new(handle), &rect);
        self.drain()
    }

    /// Apply a batch of input events (JSON array of [`InputEvent`]).
    pub fn handle_events(&mut self, events_json: &str, in_view: bool) -> Result<String, JsValue> {
        let events: Vec<InputEvent> = serde_json::from_str(events_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid events: {}", e)))?;

        for event in events {
            self.inner.handle_input(event, &in_view);
        }
        self.drain()
    }

    /// Append a slide. A record without an `id` gets one past the largest id held.
    pub fn add_slide(&mut self, slide_json: &str) -> Result<String, JsValue> {
        let slide = parse_new_slide(slide_json, self.inner.next_slide_id()).map_err(to_js)?;
        self.inner.add_slide(slide);
        self.drain()
    }

    pub fn remove_slide(&mut self, id: u32) -> Result<String, JsValue> {
        self.inner.remove_slide(SlideId::new(id));
        self.drain()
    }

    pub fn set_autoplay(&mut self, enabled: bool) -> Result<String, JsValue> {
        self.inner.set_autoplay(enabled);
        self.drain()
    }

    pub fn unmount(&mut self) -> Result<String, JsValue> {
        self.inner.unmount();
        self.drain()
    }

    /// Current state as JSON ([`CarouselSnapshot`]).
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

impl WasmCarousel {
    fn drain(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.take_commands())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

fn to_js(err: CarouselError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
