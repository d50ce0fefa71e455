//! Window state manager: capture, apply, and restore the host window.
//!
//! The manager collects a target state through chained setters, then
//! [`apply`](WindowStateManager::apply) does four things:
//!
//! 1. resolves the active window,
//! 2. snapshots its current state as the original,
//! 3. applies the target immediately,
//! 4. schedules one more application after a delay, because some window
//!    managers and drivers undo the first attempt.
//!
//! On application quit in a development host the snapshot is restored.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use window_helper::window::{HeadlessWindow, WindowStateManager};
//! use window_helper_core::SharedTaskScheduler;
//!
//! let scheduler = Arc::new(SharedTaskScheduler::new());
//! let mut manager = WindowStateManager::new(HeadlessWindow::default(), scheduler.clone());
//!
//! manager
//!     .set_full_screen(true)
//!     .set_size(1920, 1080)
//!     .set_position(0, 0)
//!     .set_top_most(true)
//!     .apply();
//!
//! // Pump from the host's update loop; the re-apply fires after three seconds.
//! scheduler.process_ready();
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use window_helper_core::logging::targets;
use window_helper_core::{ScheduledTaskId, SharedTaskScheduler};

use super::window_control::{PositionFlags, WindowControl, WindowHandle, ZOrder};
use super::window_state::WindowState;
use crate::config::WindowHelperConfig;
use crate::error::WindowError;

/// Everything the delayed re-apply needs to reach.
struct ManagerState<C> {
    control: C,
    target: WindowState,
    original: WindowState,
    applied: bool,
    pending_reapply: Option<ScheduledTaskId>,
    window: Option<WindowHandle>,
    /// Bumped on every `apply()`; a re-apply from an older cycle is a no-op.
    generation: u64,
}

impl<C: WindowControl> ManagerState<C> {
    /// Read the OS window into a state. Failures yield the zero-valued state.
    fn capture(&self, window: WindowHandle) -> WindowState {
        if !self.control.is_window(window) {
            tracing::error!(target: targets::MANAGER, "{}", WindowError::InvalidHandle(window));
            return WindowState::default();
        }

        let placement = match self.control.window_placement(window) {
            Ok(placement) => placement,
            Err(err) => {
                tracing::error!(target: targets::MANAGER, "{err}");
                return WindowState::default();
            }
        };

        let state = WindowState::captured(
            placement.normal_position,
            placement.show_command.is_maximized(),
        );
        tracing::debug!(target: targets::MANAGER, %window, ?state, "window state captured");
        state
    }

    /// Write the target state to the OS window.
    fn apply_target(&mut self, window: WindowHandle) {
        let target = self.target;

        let style = match self.control.window_style(window) {
            Ok(style) => style,
            Err(err) => {
                tracing::error!(target: targets::MANAGER, "{err}");
                return;
            }
        };
        if let Err(err) = self
            .control
            .set_window_style(window, target.apply_style(style))
        {
            tracing::error!(target: targets::MANAGER, "{err}");
            return;
        }

        if let Err(err) = self.control.set_window_pos(
            window,
            target.z_order(),
            target.rect(),
            target.position_flags(),
        ) {
            tracing::error!(target: targets::MANAGER, "{err}");
            return;
        }

        self.applied = true;
    }

    fn reapply(&mut self, generation: u64) {
        if generation != self.generation {
            tracing::debug!(target: targets::MANAGER, generation, "stale re-apply skipped");
            return;
        }
        self.pending_reapply = None;

        if let Some(window) = self.window {
            let _span = tracing::debug_span!(target: targets::MANAGER, "reapply", %window).entered();
            self.apply_target(window);
        }
    }

    fn restore(&mut self) {
        let Some(window) = self.window else {
            tracing::debug!(target: targets::MANAGER, "no window resolved; nothing to restore");
            return;
        };
        let _span = tracing::debug_span!(target: targets::MANAGER, "restore", %window).entered();

        // Always back to bordered, whatever the captured style was.
        match self.control.window_style(window) {
            Ok(style) => {
                if let Err(err) = self.control.set_window_style(window, style.bordered()) {
                    tracing::error!(target: targets::MANAGER, "{err}");
                }
            }
            Err(err) => tracing::error!(target: targets::MANAGER, "{err}"),
        }

        if let Err(err) = self.control.set_window_pos(
            window,
            ZOrder::NotTopMost,
            self.original.rect(),
            PositionFlags::SHOW_WINDOW,
        ) {
            tracing::error!(target: targets::MANAGER, "{err}");
        }
    }
}

/// Captures, applies and restores the state of the host window.
///
/// Builder setters only record intent; nothing touches the OS until
/// [`apply`](Self::apply). Geometry that was never set is left as it is.
///
/// # Known limitations
///
/// - The topmost state is never captured, so restoring always leaves the
///   window not-topmost.
/// - Restoring always brings back the bordered style, even if the window was
///   borderless before `apply()`.
/// - Restoring after a failed capture moves the window to the origin with
///   zero size.
pub struct WindowStateManager<C: WindowControl + 'static> {
    state: Arc<Mutex<ManagerState<C>>>,
    scheduler: Arc<SharedTaskScheduler>,
    config: WindowHelperConfig,
}

impl<C: WindowControl + 'static> WindowStateManager<C> {
    /// Create a manager with the default configuration.
    pub fn new(control: C, scheduler: Arc<SharedTaskScheduler>) -> Self {
        Self::with_config(control, scheduler, WindowHelperConfig::default())
    }

    /// Create a manager with a custom configuration.
    pub fn with_config(
        control: C,
        scheduler: Arc<SharedTaskScheduler>,
        config: WindowHelperConfig,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManagerState {
                control,
                target: WindowState::new(),
                original: WindowState::new(),
                applied: false,
                pending_reapply: None,
                window: None,
                generation: 0,
            })),
            scheduler,
            config,
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) -> &mut Self {
        self.state.lock().target.set_position(x, y);
        self
    }

    pub fn set_size(&mut self, width: i32, height: i32) -> &mut Self {
        self.state.lock().target.set_size(width, height);
        self
    }

    pub fn set_top_most(&mut self, top_most: bool) -> &mut Self {
        self.state.lock().target.set_top_most(top_most);
        self
    }

    /// Borderless (`true`) or bordered (`false`) window.
    ///
    /// Only the frame changes; combine with `set_position`/`set_size` to
    /// cover the screen.
    pub fn set_full_screen(&mut self, full_screen: bool) -> &mut Self {
        self.state.lock().target.set_full_screen(full_screen);
        self
    }

    /// Capture the current window, apply the target, and schedule a re-apply.
    ///
    /// A pending re-apply from an earlier call is cancelled first. Failures
    /// are logged, never returned.
    pub fn apply(&mut self) {
        let mut state = self.state.lock();

        let Some(window) = state.control.active_window() else {
            tracing::error!(target: targets::MANAGER, "{}", WindowError::NoActiveWindow);
            return;
        };
        let _span = tracing::debug_span!(target: targets::MANAGER, "apply", %window).entered();
        state.window = Some(window);

        if let Some(id) = state.pending_reapply.take() {
            // Already ran or cancelled is fine; the generation check covers it.
            let _ = self.scheduler.cancel(id);
        }
        state.generation = state.generation.wrapping_add(1);

        state.original = state.capture(window);
        state.apply_target(window);

        let generation = state.generation;
        let shared = Arc::downgrade(&self.state);
        let id = self.scheduler.schedule_once(self.config.reapply_delay, move || {
            if let Some(state) = shared.upgrade() {
                state.lock().reapply(generation);
            }
        });
        state.pending_reapply = Some(id);
        state.applied = true;

        tracing::info!(
            target: targets::MANAGER,
            %window,
            target_state = ?state.target,
            delay = ?self.config.reapply_delay,
            "window state applied"
        );
    }

    /// Snapshot the active window as the original state without applying anything.
    ///
    /// Returns the captured state (zero-valued on failure).
    pub fn capture_original_state(&mut self) -> WindowState {
        let mut state = self.state.lock();
        let Some(window) = state.control.active_window() else {
            tracing::error!(target: targets::MANAGER, "{}", WindowError::NoActiveWindow);
            return WindowState::default();
        };
        state.window = Some(window);
        state.original = state.capture(window);
        state.original
    }

    /// Write the captured original geometry back, bordered and not-topmost.
    pub fn restore_original_state(&self) {
        self.state.lock().restore();
    }

    /// Host lifecycle hook for process exit.
    ///
    /// Restores the original state if `apply()` ran and the configured
    /// policy allows it for this host.
    pub fn on_application_quit(&self) {
        if !self.is_applied() {
            return;
        }
        if self.config.should_restore_on_exit() {
            tracing::info!(target: targets::MANAGER, host = ?self.config.host, "restoring original window state");
            self.restore_original_state();
        }
    }

    pub fn target_state(&self) -> WindowState {
        self.state.lock().target
    }

    /// The state captured by the last `apply()`.
    pub fn original_state(&self) -> WindowState {
        self.state.lock().original
    }

    pub fn is_applied(&self) -> bool {
        self.state.lock().applied
    }

    /// Whether a delayed re-apply is still waiting to fire.
    pub fn has_pending_reapply(&self) -> bool {
        self.state
            .lock()
            .pending_reapply
            .is_some_and(|id| self.scheduler.is_active(id))
    }

    /// The window resolved by the last `apply()`.
    pub fn window(&self) -> Option<WindowHandle> {
        self.state.lock().window
    }

    pub fn config(&self) -> &WindowHelperConfig {
        &self.config
    }
}

impl<C: WindowControl + 'static> Drop for WindowStateManager<C> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        // A re-apply already taken off the scheduler must not run either.
        state.generation = state.generation.wrapping_add(1);
        if let Some(id) = state.pending_reapply.take() {
            let _ = self.scheduler.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::window::{HeadlessWindow, WindowCall, WindowRect, WindowStyle};

    fn manager(
        window: &HeadlessWindow,
    ) -> (WindowStateManager<HeadlessWindow>, Arc<SharedTaskScheduler>) {
        let scheduler = Arc::new(SharedTaskScheduler::new());
        let manager = WindowStateManager::new(window.clone(), scheduler.clone());
        (manager, scheduler)
    }

    fn after_delay() -> Instant {
        Instant::now() + WindowHelperConfig::DEFAULT_REAPPLY_DELAY
    }

    #[test]
    fn test_setters_do_not_touch_window() {
        let window = HeadlessWindow::default();
        let (mut manager, _scheduler) = manager(&window);

        manager.set_position(1, 2).set_size(3, 4).set_top_most(true).set_full_screen(true);

        assert!(window.calls().is_empty());
        let target = manager.target_state();
        assert!(target.position_set && target.size_set);
        assert!(target.is_top_most && target.is_full_screen);
    }

    #[test]
    fn test_apply_sequence() {
        let window = HeadlessWindow::default();
        let (mut manager, scheduler) = manager(&window);

        manager.set_top_most(true).apply();

        assert_eq!(
            window.calls(),
            vec![
                WindowCall::ActiveWindow,
                WindowCall::IsWindow,
                WindowCall::GetPlacement,
                WindowCall::GetStyle,
                WindowCall::SetStyle(WindowStyle::OVERLAPPED_WINDOW | WindowStyle::VISIBLE),
                WindowCall::SetPos {
                    z_order: ZOrder::TopMost,
                    rect: WindowRect::default(),
                    flags: PositionFlags::SHOW_WINDOW
                        | PositionFlags::NO_MOVE
                        | PositionFlags::NO_SIZE,
                },
            ]
        );
        assert!(manager.is_applied());
        assert!(manager.has_pending_reapply());
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn test_no_active_window_has_no_side_effects() {
        let window = HeadlessWindow::default();
        window.set_active(false);
        let (mut manager, scheduler) = manager(&window);

        manager.set_position(0, 0).apply();

        assert_eq!(window.calls(), vec![WindowCall::ActiveWindow]);
        assert!(!manager.is_applied());
        assert!(manager.window().is_none());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_reapply_runs_once() {
        let window = HeadlessWindow::default();
        let (mut manager, scheduler) = manager(&window);

        manager.set_full_screen(true).apply();
        window.clear_calls();

        assert_eq!(scheduler.process_ready_at(after_delay()), 1);
        assert_eq!(window.set_pos_calls().len(), 1);
        assert!(!manager.has_pending_reapply());

        assert_eq!(scheduler.process_ready_at(after_delay() + Duration::from_secs(10)), 0);
        assert_eq!(window.set_pos_calls().len(), 1);
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let window = HeadlessWindow::default();
        let (manager, _scheduler) = manager(&window);

        {
            let mut state = manager.state.lock();
            state.window = Some(window.handle());
            state.generation = 2;
            state.reapply(1);
        }

        assert!(window.calls().is_empty());
    }

    #[test]
    fn test_drop_cancels_pending_reapply() {
        let window = HeadlessWindow::default();
        let (mut manager, scheduler) = manager(&window);

        manager.set_position(5, 5).apply();
        assert_eq!(scheduler.active_count(), 1);

        drop(manager);
        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(scheduler.process_ready_at(after_delay()), 0);
    }

    #[test]
    fn test_drop_invalidates_reapply_in_flight() {
        let window = HeadlessWindow::default();
        let (mut manager, _scheduler) = manager(&window);

        manager.set_position(5, 5).apply();
        // Holds the state alive like a re-apply that already upgraded its handle.
        let in_flight = manager.state.clone();
        let generation = in_flight.lock().generation;

        drop(manager);
        window.clear_calls();
        in_flight.lock().reapply(generation);

        assert!(window.calls().is_empty());
    }

    #[test]
    fn test_restore_without_window_is_noop() {
        let window = HeadlessWindow::default();
        let (manager, _scheduler) = manager(&window);

        manager.restore_original_state();
        assert!(window.calls().is_empty());
    }
}
