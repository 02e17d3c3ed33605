use ambient_engine::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlElement, Window};

use crate::runner::Host;

/// Class toggled on the container to run its opacity transition.
pub const FADE_CLASS: &str = "fade-out";

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Every DOM listener the background owns, attached and detached together.
/// Closures stay alive until the registry is dropped, so one can detach
/// everything from inside its own callback.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
    attached: bool,
}

impl ListenerRegistry {
    pub fn add(&mut self, target: EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) {
        self.listeners.push(Listener { target, event, callback });
    }

    pub fn attach(&mut self) -> Result<(), JsValue> {
        if self.attached {
            return Ok(());
        }
        for l in &self.listeners {
            l.target
                .add_event_listener_with_callback(l.event, l.callback.as_ref().unchecked_ref())?;
        }
        self.attached = true;
        Ok(())
    }

    pub fn detach(&mut self) -> Result<(), JsValue> {
        if !self.attached {
            return Ok(());
        }
        self.attached = false;
        for l in &self.listeners {
            l.target
                .remove_event_listener_with_callback(l.event, l.callback.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

/// `Host` backed by the browser: one animation-frame callback, one fallback
/// timer, the listener registry and the container's class list.
pub struct BrowserHost {
    window: Window,
    root: HtmlElement,
    frame_callback: Option<Closure<dyn FnMut(f64)>>,
    frame_id: Option<i32>,
    fallback_callback: Option<Closure<dyn FnMut()>>,
    fallback_id: Option<i32>,
    listeners: ListenerRegistry,
    fade_complete_due: bool,
}

impl BrowserHost {
    pub fn new(window: Window, root: HtmlElement) -> Self {
        Self {
            window,
            root,
            frame_callback: None,
            frame_id: None,
            fallback_callback: None,
            fallback_id: None,
            listeners: ListenerRegistry::default(),
            fade_complete_due: false,
        }
    }

    pub fn set_frame_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.frame_callback = Some(callback);
    }

    pub fn set_fallback_callback(&mut self, callback: Closure<dyn FnMut()>) {
        self.fallback_callback = Some(callback);
    }

    pub fn add_listener(&mut self, target: EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) {
        self.listeners.add(target, event, callback);
    }

    /// The scheduled frame fired; its id is no longer valid.
    pub fn frame_fired(&mut self) {
        self.frame_id = None;
    }

    /// The fallback timer fired; its id is no longer valid.
    pub fn fallback_fired(&mut self) {
        self.fallback_id = None;
    }

    /// Whether the completion callback is owed. Clears the flag.
    pub fn take_fade_complete(&mut self) -> bool {
        std::mem::take(&mut self.fade_complete_due)
    }

    fn request_frame(&mut self) -> Result<(), JsValue> {
        let Some(callback) = &self.frame_callback else {
            return Ok(());
        };
        if self.frame_id.is_none() {
            let id = self.window.request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.frame_id = Some(id);
        }
        Ok(())
    }

    fn start_fallback(&mut self, ms: u32) -> Result<(), JsValue> {
        self.clear_fallback();
        let Some(callback) = &self.fallback_callback else {
            return Ok(());
        };
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), ms as i32)?;
        self.fallback_id = Some(id);
        Ok(())
    }
}

/// A window dimension in CSS pixels, or 0 (an empty viewport) when the
/// browser does not report a number.
fn window_extent(px: Option<f64>, name: &str) -> f32 {
    match px {
        Some(px) if px.is_finite() && px >= 0.0 => px as f32,
        _ => {
            log::warn!("window.{} is not a usable size: {:?}", name, px);
            0.0
        }
    }
}

impl Host for BrowserHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            window_extent(self.window.inner_width().ok().and_then(|v| v.as_f64()), "innerWidth"),
            window_extent(self.window.inner_height().ok().and_then(|v| v.as_f64()), "innerHeight"),
            self.window.device_pixel_ratio() as f32,
        )
    }

    fn now(&self) -> f64 {
        self.window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn schedule_frame(&mut self) {
        if let Err(e) = self.request_frame() {
            log::warn!("requestAnimationFrame failed: {:?}", e);
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    fn arm_fallback(&mut self, ms: u32) {
        if let Err(e) = self.start_fallback(ms) {
            log::warn!("fade fallback timer failed: {:?}", e);
        }
    }

    fn clear_fallback(&mut self) {
        if let Some(id) = self.fallback_id.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }

    fn set_fade_class(&mut self, on: bool) {
        let classes = self.root.class_list();
        let result = if on { classes.add_1(FADE_CLASS) } else { classes.remove_1(FADE_CLASS) };
        if let Err(e) = result {
            log::warn!("toggling {} failed: {:?}", FADE_CLASS, e);
        }
    }

    fn attach_listeners(&mut self) {
        if let Err(e) = self.listeners.attach() {
            log::warn!("attaching listeners failed: {:?}", e);
        }
    }

    fn detach_listeners(&mut self) {
        if let Err(e) = self.listeners.detach() {
            log::warn!("detaching listeners failed: {:?}", e);
        }
    }

    fn notify_fade_complete(&mut self) {
        self.fade_complete_due = true;
    }
}
