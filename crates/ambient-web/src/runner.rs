use ambient_engine::{
    BackgroundConfig, InputEvent, Lifecycle, LifecycleCommand, LifecycleState,
    ParticleField, Surface, Viewport,
};

/// Browser-side effects the lifecycle asks for.
///
/// `BrowserHost` implements this with `requestAnimationFrame`, timers, DOM
/// listeners and the container's class list; tests use a recording fake.
pub trait Host {
    /// Window size in CSS pixels and the device pixel ratio.
    fn viewport(&self) -> Viewport;
    /// Current timestamp in ms, on the same clock as frame timestamps.
    fn now(&self) -> f64;
    fn schedule_frame(&mut self);
    fn cancel_frame(&mut self);
    fn arm_fallback(&mut self, ms: u32);
    fn clear_fallback(&mut self);
    fn set_fade_class(&mut self, on: bool);
    fn attach_listeners(&mut self);
    fn detach_listeners(&mut self);
    /// Queue the fade-out completion callback. Hosts must run it only after
    /// every borrow of the runner has been released.
    fn notify_fade_complete(&mut self);
}

/// Drives one background: feeds lifecycle transitions to the host and frames
/// from the field to the surface.
///
/// wasm-bindgen cannot export generic structs, so `ParticleBackground` wraps a
/// `BackgroundRunner<Canvas2dSurface>` and forwards to it.
pub struct BackgroundRunner<S: Surface> {
    field: ParticleField,
    lifecycle: Lifecycle,
    surface: S,
    active: bool,
}

impl<S: Surface> BackgroundRunner<S> {
    pub fn new(config: &BackgroundConfig, seed: u64, surface: S) -> Self {
        log::info!(
            "background runner on {} (interactive: {}, effects: {}, seed: {})",
            surface.backend(),
            config.interactive,
            config.effects,
            seed
        );
        Self {
            field: ParticleField::new(config, seed),
            lifecycle: Lifecycle::new(),
            surface,
            active: config.active,
        }
    }

    /// Size, seed, attach listeners and request the first frame.
    pub fn start(&mut self, host: &mut impl Host) {
        let cmds = self.lifecycle.start(self.active);
        self.execute(cmds, host);
    }

    /// A scheduled frame fired at `now_ms`.
    pub fn frame(&mut self, now_ms: f64, host: &mut impl Host) {
        if !self.lifecycle.begin_frame() {
            return;
        }
        let list = self.field.frame(now_ms);
        self.surface.submit(list);
        let cmds = self.lifecycle.on_frame(self.field.is_settled());
        self.execute(cmds, host);
    }

    /// Queue pointer input and wake an idle loop. While no frames are drawn
    /// only the latest pointer position is kept, for the next resumed frame.
    pub fn push_input(&mut self, event: InputEvent, host: &mut impl Host) {
        if self.lifecycle.is_destroyed() {
            return;
        }
        if !self.lifecycle.state().draws() {
            self.field.track_pointer(event);
            return;
        }
        self.field.push_input(event);
        let cmds = self.lifecycle.wake();
        self.execute(cmds, host);
    }

    pub fn resize(&mut self, host: &mut impl Host) {
        let cmds = self.lifecycle.resize();
        self.execute(cmds, host);
    }

    pub fn set_active(&mut self, active: bool, host: &mut impl Host) {
        if self.lifecycle.is_destroyed() {
            return;
        }
        self.active = active;
        let cmds = self.lifecycle.set_active(active);
        self.execute(cmds, host);
    }

    pub fn transition_end(&mut self, host: &mut impl Host) {
        let cmds = self.lifecycle.transition_end();
        self.execute(cmds, host);
    }

    pub fn fallback_elapsed(&mut self, host: &mut impl Host) {
        let cmds = self.lifecycle.fallback_elapsed();
        self.execute(cmds, host);
    }

    /// Cancel the frame, clear the timer and detach listeners. Idempotent.
    pub fn teardown(&mut self, host: &mut impl Host) {
        let cmds = self.lifecycle.teardown();
        self.execute(cmds, host);
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn particle_count(&self) -> usize {
        self.field.particle_count()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn execute(&mut self, cmds: Vec<LifecycleCommand>, host: &mut impl Host) {
        for cmd in cmds {
            match cmd {
                LifecycleCommand::SizeSurface => self.surface.resize(&host.viewport()),
                LifecycleCommand::Reseed => self.field.reseed(host.viewport(), host.now()),
                LifecycleCommand::AttachListeners => host.attach_listeners(),
                LifecycleCommand::ScheduleFrame => host.schedule_frame(),
                LifecycleCommand::CancelFrame => host.cancel_frame(),
                LifecycleCommand::AddFadeClass => host.set_fade_class(true),
                LifecycleCommand::RemoveFadeClass => host.set_fade_class(false),
                LifecycleCommand::ArmFallback { ms } => host.arm_fallback(ms),
                LifecycleCommand::ClearFallback => host.clear_fallback(),
                LifecycleCommand::NotifyFadeComplete => host.notify_fade_complete(),
                LifecycleCommand::DetachListeners => host.detach_listeners(),
            }
        }
    }
}
