pub mod canvas;
pub mod host;
pub mod runner;

pub use canvas::Canvas2dSurface;
pub use host::{BrowserHost, ListenerRegistry, FADE_CLASS};
pub use runner::{BackgroundRunner, Host};

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use ambient_engine::{BackgroundConfig, InputEvent};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

type Runner = BackgroundRunner<Canvas2dSurface>;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

/// State reachable from both the handle and the browser callbacks.
/// Callbacks hold `Weak` references, so dropping the handle frees everything.
struct Shared {
    runner: RefCell<Runner>,
    host: RefCell<BrowserHost>,
    on_fade_out_complete: RefCell<Option<Function>>,
}

impl Shared {
    /// Run `f` against the runner and host, then invoke any owed page
    /// callback after both borrows are released.
    fn with(&self, f: impl FnOnce(&mut Runner, &mut BrowserHost)) {
        let fade_complete = {
            let (Ok(mut runner), Ok(mut host)) = (self.runner.try_borrow_mut(), self.host.try_borrow_mut()) else {
                log::warn!("re-entrant background call ignored");
                return;
            };
            f(&mut runner, &mut host);
            host.take_fade_complete()
        };
        if fade_complete {
            self.notify_fade_complete();
        }
    }

    fn notify_fade_complete(&self) {
        let callback = self.on_fade_out_complete.borrow().clone();
        if let Some(callback) = callback {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                log::warn!("fade-out callback threw: {:?}", e);
            }
        }
    }
}

/// Wrap `f` as a DOM listener that reaches the background through a weak
/// reference.
fn listener(
    shared: &Rc<Shared>,
    f: impl Fn(&mut Runner, &mut BrowserHost, &Event) + 'static,
) -> Closure<dyn FnMut(Event)> {
    let weak = Rc::downgrade(shared);
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(shared) = weak.upgrade() {
            shared.with(|runner, host| f(runner, host, &event));
        }
    }) as Box<dyn FnMut(Event)>)
}

/// Pointer position relative to the canvas, in CSS pixels.
fn local_position(canvas: &HtmlCanvasElement, event: &Event) -> Option<(f32, f32)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let rect = canvas.get_bounding_client_rect();
    Some((
        (mouse.client_x() as f64 - rect.left()) as f32,
        (mouse.client_y() as f64 - rect.top()) as f32,
    ))
}

fn wire(shared: &Rc<Shared>, window: &Window, root: &HtmlElement, canvas: &HtmlCanvasElement) {
    let weak = Rc::downgrade(shared);
    let frame = Closure::wrap(Box::new(move |now: f64| {
        if let Some(shared) = weak.upgrade() {
            shared.with(|runner, host| {
                host.frame_fired();
                runner.frame(now, host);
            });
        }
    }) as Box<dyn FnMut(f64)>);

    let weak = Rc::downgrade(shared);
    let fallback = Closure::wrap(Box::new(move || {
        if let Some(shared) = weak.upgrade() {
            shared.with(|runner, host| {
                host.fallback_fired();
                runner.fallback_elapsed(host);
            });
        }
    }) as Box<dyn FnMut()>);

    let window_target: EventTarget = window.clone().into();
    let move_canvas = canvas.clone();
    let on_move = listener(shared, move |runner, host, event| {
        if let Some((x, y)) = local_position(&move_canvas, event) {
            runner.push_input(InputEvent::PointerMove { x, y }, host);
        }
    });
    let on_up = listener(shared, |runner, host, _| runner.push_input(InputEvent::PointerUp, host));
    let on_leave = listener(shared, |runner, host, _| runner.push_input(InputEvent::PointerLeave, host));
    let on_resize = listener(shared, |runner, host, _| runner.resize(host));
    let on_transition_end = listener(shared, |runner, host, _| runner.transition_end(host));

    let mut host = shared.host.borrow_mut();
    host.set_frame_callback(frame);
    host.set_fallback_callback(fallback);
    host.add_listener(window_target.clone(), "mousemove", on_move);
    host.add_listener(window_target.clone(), "mouseup", on_up);
    host.add_listener(window_target, "resize", on_resize);
    host.add_listener(canvas.clone().into(), "mouseleave", on_leave);
    host.add_listener(root.clone().into(), "transitionend", on_transition_end);
}

fn build(root: HtmlElement, canvas: HtmlCanvasElement, config: BackgroundConfig) -> Result<Rc<Shared>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let surface = Canvas2dSurface::new(canvas.clone())?;
    let seed = config.seed.unwrap_or_else(random_seed);

    let shared = Rc::new(Shared {
        runner: RefCell::new(BackgroundRunner::new(&config, seed, surface)),
        host: RefCell::new(BrowserHost::new(window.clone(), root.clone())),
        on_fade_out_complete: RefCell::new(None),
    });
    wire(&shared, &window, &root, &canvas);
    shared.with(|runner, host| runner.start(host));
    Ok(shared)
}

/// An animated particle field painted onto `canvas`, fading `root` in and out.
///
/// ```js
/// const bg = new ParticleBackground(root, canvas, JSON.stringify({ density: "high" }));
/// bg.set_on_fade_out_complete(() => console.log("faded"));
/// bg.set_active(false);
/// ```
#[wasm_bindgen]
pub struct ParticleBackground {
    shared: Option<Rc<Shared>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Start animating immediately. A canvas without a 2D context yields an
    /// inert handle whose methods do nothing.
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, canvas: HtmlCanvasElement, options_json: &str) -> ParticleBackground {
        init_logging();

        let config = if options_json.trim().is_empty() {
            BackgroundConfig::default()
        } else {
            BackgroundConfig::from_json(options_json).unwrap_or_else(|e| {
                log::warn!("invalid background options, using defaults: {}", e);
                BackgroundConfig::default()
            })
        };

        match build(root, canvas, config) {
            Ok(shared) => ParticleBackground { shared: Some(shared) },
            Err(e) => {
                log::warn!("particle background disabled: {:?}", e);
                ParticleBackground { shared: None }
            }
        }
    }

    /// Resume drawing, or fade the container out and stop.
    pub fn set_active(&self, active: bool) {
        if let Some(shared) = &self.shared {
            shared.with(|runner, host| runner.set_active(active, host));
        }
    }

    /// Called once each time a fade-out completes.
    pub fn set_on_fade_out_complete(&self, callback: Option<Function>) {
        if let Some(shared) = &self.shared {
            *shared.on_fade_out_complete.borrow_mut() = callback;
        }
    }

    /// Stop the loop and release listeners and timers. Safe to call twice.
    pub fn destroy(&self) {
        if let Some(shared) = &self.shared {
            shared.with(|runner, host| runner.teardown(host));
            shared.on_fade_out_complete.borrow_mut().take();
        }
    }

    pub fn particle_count(&self) -> usize {
        self.shared
            .as_ref()
            .and_then(|shared| shared.runner.try_borrow().ok().map(|r| r.particle_count()))
            .unwrap_or(0)
    }

    /// Lifecycle state name, or "inert".
    pub fn state(&self) -> String {
        self.shared
            .as_ref()
            .and_then(|shared| shared.runner.try_borrow().ok().map(|r| r.state().as_str().to_string()))
            .unwrap_or_else(|| "inert".to_string())
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.destroy();
    }
}
