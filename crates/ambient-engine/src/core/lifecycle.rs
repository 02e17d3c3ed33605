//! Lifecycle controller.
//!
//! A pure state machine: every transition returns the side effects the host
//! must perform as `LifecycleCommand`s, in order. Nothing here touches a
//! timer, a listener or the DOM, so every path is testable natively.

/// Delay before fade-out completes without a transition-end event.
pub const FADE_FALLBACK_MS: u32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, not yet sized or seeded.
    Seeding,
    Running,
    /// Fade class applied, still drawing until the fade completes.
    FadingOut,
    /// Fade complete, no frames scheduled.
    Stopped,
    /// Torn down; every further call is a no-op.
    Destroyed,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Seeding => "seeding",
            LifecycleState::Running => "running",
            LifecycleState::FadingOut => "fading-out",
            LifecycleState::Stopped => "stopped",
            LifecycleState::Destroyed => "destroyed",
        }
    }

    /// Whether a frame fired in this state may simulate and draw.
    pub fn draws(self) -> bool {
        matches!(self, LifecycleState::Running | LifecycleState::FadingOut)
    }
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    /// Match the backing store to the container and device pixel ratio.
    SizeSurface,
    /// Repopulate the field for the current viewport.
    Reseed,
    AttachListeners,
    ScheduleFrame,
    CancelFrame,
    AddFadeClass,
    RemoveFadeClass,
    /// Start the fade-out fallback timer.
    ArmFallback { ms: u32 },
    ClearFallback,
    /// Invoke the fade-out completion callback.
    NotifyFadeComplete,
    DetachListeners,
}

pub struct Lifecycle {
    state: LifecycleState,
    /// A frame callback is registered and has not fired yet.
    frame_pending: bool,
    /// The loop stopped scheduling because the field settled.
    idle: bool,
    /// Completion already fired for the current fade cycle.
    fade_notified: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Seeding,
            frame_pending: false,
            idle: false,
            fade_notified: false,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == LifecycleState::Destroyed
    }

    /// Size, seed, listen, then start the loop. Starting inactive goes
    /// straight into a fade-out. Only the first call does anything.
    pub fn start(&mut self, active: bool) -> Vec<LifecycleCommand> {
        if self.state != LifecycleState::Seeding {
            return Vec::new();
        }
        let mut cmds = vec![
            LifecycleCommand::SizeSurface,
            LifecycleCommand::Reseed,
            LifecycleCommand::AttachListeners,
        ];
        self.transition(LifecycleState::Running);
        self.schedule(&mut cmds);
        if !active {
            cmds.extend(self.set_active(false));
        }
        cmds
    }

    /// Mark the pending frame as fired. Returns whether it may draw.
    pub fn begin_frame(&mut self) -> bool {
        self.frame_pending = false;
        self.state.draws()
    }

    /// After a drawn frame: keep the loop going unless the field has settled.
    pub fn on_frame(&mut self, settled: bool) -> Vec<LifecycleCommand> {
        let mut cmds = Vec::new();
        if !self.state.draws() {
            return cmds;
        }
        if settled {
            if !self.idle {
                log::debug!("field settled, loop idle");
            }
            self.idle = true;
        } else {
            self.schedule(&mut cmds);
        }
        cmds
    }

    /// Restart an idle loop after input or a resize.
    pub fn wake(&mut self) -> Vec<LifecycleCommand> {
        let mut cmds = Vec::new();
        if self.state.draws() {
            self.schedule(&mut cmds);
        }
        cmds
    }

    /// Re-size and reseed. Ignored before the first seed and after teardown.
    pub fn resize(&mut self) -> Vec<LifecycleCommand> {
        match self.state {
            LifecycleState::Seeding | LifecycleState::Destroyed => Vec::new(),
            _ => {
                let mut cmds = vec![LifecycleCommand::SizeSurface, LifecycleCommand::Reseed];
                cmds.extend(self.wake());
                cmds
            }
        }
    }

    pub fn set_active(&mut self, active: bool) -> Vec<LifecycleCommand> {
        let mut cmds = Vec::new();
        match (active, self.state) {
            (false, LifecycleState::Running) => {
                self.transition(LifecycleState::FadingOut);
                self.fade_notified = false;
                cmds.push(LifecycleCommand::AddFadeClass);
                cmds.push(LifecycleCommand::ArmFallback { ms: FADE_FALLBACK_MS });
            }
            (true, LifecycleState::FadingOut | LifecycleState::Stopped) => {
                self.transition(LifecycleState::Running);
                cmds.push(LifecycleCommand::RemoveFadeClass);
                cmds.push(LifecycleCommand::ClearFallback);
                self.schedule(&mut cmds);
            }
            _ => {}
        }
        cmds
    }

    /// The container's opacity transition finished.
    pub fn transition_end(&mut self) -> Vec<LifecycleCommand> {
        self.finish_fade()
    }

    /// The fallback timer fired.
    pub fn fallback_elapsed(&mut self) -> Vec<LifecycleCommand> {
        self.finish_fade()
    }

    /// Release everything once. Later calls return nothing.
    pub fn teardown(&mut self) -> Vec<LifecycleCommand> {
        if self.is_destroyed() {
            return Vec::new();
        }
        self.transition(LifecycleState::Destroyed);
        self.frame_pending = false;
        self.idle = false;
        vec![
            LifecycleCommand::CancelFrame,
            LifecycleCommand::ClearFallback,
            LifecycleCommand::DetachListeners,
        ]
    }

    fn finish_fade(&mut self) -> Vec<LifecycleCommand> {
        if self.state != LifecycleState::FadingOut || self.fade_notified {
            return Vec::new();
        }
        self.fade_notified = true;
        self.transition(LifecycleState::Stopped);
        self.frame_pending = false;
        self.idle = false;
        vec![
            LifecycleCommand::CancelFrame,
            LifecycleCommand::ClearFallback,
            LifecycleCommand::NotifyFadeComplete,
        ]
    }

    fn schedule(&mut self, cmds: &mut Vec<LifecycleCommand>) {
        self.idle = false;
        if !self.frame_pending {
            self.frame_pending = true;
            cmds.push(LifecycleCommand::ScheduleFrame);
        }
    }

    fn transition(&mut self, to: LifecycleState) {
        log::debug!("lifecycle {} -> {}", self.state.as_str(), to.as_str());
        self.state = to;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::LifecycleCommand::*;

    fn running() -> Lifecycle {
        let mut lc = Lifecycle::new();
        lc.start(true);
        lc
    }

    #[test]
    fn start_seeds_then_schedules() {
        let mut lc = Lifecycle::new();
        assert_eq!(lc.start(true), vec![SizeSurface, Reseed, AttachListeners, ScheduleFrame]);
        assert_eq!(lc.state(), LifecycleState::Running);
        assert!(lc.frame_pending());
        assert!(lc.start(true).is_empty());
    }

    #[test]
    fn start_inactive_begins_fading() {
        let mut lc = Lifecycle::new();
        let cmds = lc.start(false);
        assert_eq!(
            cmds,
            vec![SizeSurface, Reseed, AttachListeners, ScheduleFrame, AddFadeClass, ArmFallback { ms: 800 }]
        );
        assert_eq!(lc.state(), LifecycleState::FadingOut);
    }

    #[test]
    fn frames_chain_until_settled() {
        let mut lc = running();
        assert!(lc.begin_frame());
        assert_eq!(lc.on_frame(false), vec![ScheduleFrame]);
        assert!(lc.begin_frame());
        assert!(lc.on_frame(true).is_empty());
        assert!(lc.is_idle());
        assert!(!lc.frame_pending());

        assert_eq!(lc.wake(), vec![ScheduleFrame]);
        assert!(!lc.is_idle());
        // Already pending: no double scheduling.
        assert!(lc.wake().is_empty());
    }

    #[test]
    fn resize_ignored_before_seed_and_after_teardown() {
        let mut lc = Lifecycle::new();
        assert!(lc.resize().is_empty());

        let mut lc = running();
        lc.teardown();
        assert!(lc.resize().is_empty());
    }

    #[test]
    fn resize_reseeds_and_wakes() {
        let mut lc = running();
        lc.begin_frame();
        lc.on_frame(true);
        assert_eq!(lc.resize(), vec![SizeSurface, Reseed, ScheduleFrame]);
    }

    #[test]
    fn fade_completes_once_via_fallback() {
        let mut lc = running();
        assert_eq!(lc.set_active(false), vec![AddFadeClass, ArmFallback { ms: 800 }]);

        // Frames keep drawing during the fade.
        assert!(lc.begin_frame());
        assert_eq!(lc.on_frame(false), vec![ScheduleFrame]);

        // No transition-end ever arrives; the timer completes the fade.
        assert_eq!(lc.fallback_elapsed(), vec![CancelFrame, ClearFallback, NotifyFadeComplete]);
        assert_eq!(lc.state(), LifecycleState::Stopped);

        assert!(lc.fallback_elapsed().is_empty());
        assert!(lc.transition_end().is_empty());
    }

    #[test]
    fn transition_end_then_fallback_notifies_once() {
        let mut lc = running();
        lc.set_active(false);
        let notifications = [lc.transition_end(), lc.fallback_elapsed()]
            .iter()
            .flatten()
            .filter(|c| **c == NotifyFadeComplete)
            .count();
        assert_eq!(notifications, 1);
    }

    #[test]
    fn stale_frame_after_stop_does_not_draw() {
        let mut lc = running();
        lc.set_active(false);
        lc.transition_end();
        assert!(!lc.begin_frame());
        assert!(lc.on_frame(false).is_empty());
    }

    #[test]
    fn reactivate_after_stop_reschedules() {
        let mut lc = running();
        lc.set_active(false);
        lc.transition_end();
        assert_eq!(lc.set_active(true), vec![RemoveFadeClass, ClearFallback, ScheduleFrame]);
        assert_eq!(lc.state(), LifecycleState::Running);
    }

    #[test]
    fn reactivate_mid_fade_keeps_pending_frame() {
        let mut lc = running();
        lc.set_active(false);
        assert!(lc.frame_pending());
        assert_eq!(lc.set_active(true), vec![RemoveFadeClass, ClearFallback]);
        // A new fade cycle can notify again.
        lc.set_active(false);
        assert_eq!(lc.transition_end(), vec![CancelFrame, ClearFallback, NotifyFadeComplete]);
    }

    #[test]
    fn redundant_activity_changes_are_ignored() {
        let mut lc = running();
        assert!(lc.set_active(true).is_empty());
        lc.set_active(false);
        assert!(lc.set_active(false).is_empty());
    }

    #[test]
    fn teardown_runs_once() {
        let mut lc = running();
        assert_eq!(lc.teardown(), vec![CancelFrame, ClearFallback, DetachListeners]);
        assert!(lc.teardown().is_empty());
        assert!(lc.set_active(true).is_empty());
        assert!(lc.set_active(false).is_empty());
        assert!(lc.fallback_elapsed().is_empty());
        assert!(lc.wake().is_empty());
        assert!(!lc.begin_frame());
        assert_eq!(lc.state(), LifecycleState::Destroyed);
    }

    #[test]
    fn teardown_mid_fade_never_notifies() {
        let mut lc = running();
        lc.set_active(false);
        lc.teardown();
        assert!(lc.transition_end().is_empty());
    }
}
