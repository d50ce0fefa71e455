//! In-memory window backend.
//!
//! [`HeadlessWindow`] behaves like a single native window: it keeps geometry,
//! style bits, z-order and show state, honours `NO_MOVE`/`NO_SIZE`, and
//! journals every call made through the [`WindowControl`] port. Clones share
//! the same window, so a test can keep one clone for inspection after moving
//! another into a manager.

use std::num::NonZeroIsize;
use std::sync::Arc;

use parking_lot::Mutex;
use window_helper_core::logging::targets;

use super::window_control::{
    PositionFlags, ShowCommand, WindowControl, WindowHandle, WindowPlacement, WindowRect,
    WindowStyle, ZOrder,
};
use crate::error::{Result, WindowError};

/// One call made through the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCall {
    ActiveWindow,
    IsWindow,
    GetPlacement,
    GetStyle,
    SetStyle(WindowStyle),
    SetPos {
        z_order: ZOrder,
        rect: WindowRect,
        flags: PositionFlags,
    },
}

#[derive(Debug)]
struct HeadlessState {
    handle: WindowHandle,
    rect: WindowRect,
    style: WindowStyle,
    z_order: ZOrder,
    show_command: ShowCommand,
    active: bool,
    alive: bool,
    stale_handle: bool,
    fail_placement: bool,
    calls: Vec<WindowCall>,
}

/// A simulated native window.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessWindow {
    /// The handle every headless window reports.
    pub const HANDLE: WindowHandle = match NonZeroIsize::new(0x0001_0000) {
        Some(raw) => WindowHandle::from_non_zero(raw),
        None => unreachable!(),
    };

    /// A bordered, visible, not-topmost window at `rect`.
    pub fn new(rect: WindowRect) -> Self {
        Self {
            state: Arc::new(Mutex::new(HeadlessState {
                handle: Self::HANDLE,
                rect,
                style: WindowStyle::OVERLAPPED_WINDOW | WindowStyle::VISIBLE,
                z_order: ZOrder::NotTopMost,
                show_command: ShowCommand::Normal,
                active: true,
                alive: true,
                stale_handle: false,
                fail_placement: false,
                calls: Vec::new(),
            })),
        }
    }

    /// Replace the style bits.
    pub fn with_style(self, style: WindowStyle) -> Self {
        self.state.lock().style = style;
        self
    }

    /// Replace the reported show state.
    pub fn with_show_command(self, show_command: ShowCommand) -> Self {
        self.state.lock().show_command = show_command;
        self
    }

    /// Place the window in the given stacking layer.
    pub fn with_z_order(self, z_order: ZOrder) -> Self {
        self.state.lock().z_order = z_order;
        self
    }

    /// Whether the window is reported as the active window.
    pub fn set_active(&self, active: bool) {
        self.state.lock().active = active;
    }

    /// Simulate the window being destroyed (or brought back).
    pub fn set_alive(&self, alive: bool) {
        self.state.lock().alive = alive;
    }

    /// Keep reporting the handle as active after the window is gone.
    ///
    /// `active_window` still returns the handle while `is_window` and every
    /// other call reject it.
    pub fn set_stale_handle(&self, stale: bool) {
        self.state.lock().stale_handle = stale;
    }

    /// Make placement queries fail.
    pub fn set_fail_placement(&self, fail: bool) {
        self.state.lock().fail_placement = fail;
    }

    pub fn handle(&self) -> WindowHandle {
        self.state.lock().handle
    }

    pub fn rect(&self) -> WindowRect {
        self.state.lock().rect
    }

    pub fn style(&self) -> WindowStyle {
        self.state.lock().style
    }

    pub fn z_order(&self) -> ZOrder {
        self.state.lock().z_order
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<WindowCall> {
        self.state.lock().calls.clone()
    }

    /// Only the set-position calls.
    pub fn set_pos_calls(&self) -> Vec<WindowCall> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, WindowCall::SetPos { .. }))
            .copied()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new(WindowRect::new(100, 100, 800, 600))
    }
}

impl HeadlessState {
    fn check(&self, window: WindowHandle) -> Result<()> {
        if self.alive && !self.stale_handle && window == self.handle {
            Ok(())
        } else {
            Err(WindowError::InvalidHandle(window))
        }
    }
}

impl WindowControl for HeadlessWindow {
    fn active_window(&self) -> Option<WindowHandle> {
        let mut state = self.state.lock();
        state.calls.push(WindowCall::ActiveWindow);
        (state.active && (state.alive || state.stale_handle)).then_some(state.handle)
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        let mut state = self.state.lock();
        state.calls.push(WindowCall::IsWindow);
        state.check(window).is_ok()
    }

    fn window_placement(&self, window: WindowHandle) -> Result<WindowPlacement> {
        let mut state = self.state.lock();
        state.calls.push(WindowCall::GetPlacement);
        state.check(window)?;
        if state.fail_placement {
            return Err(WindowError::placement_query(window, "simulated failure"));
        }
        Ok(WindowPlacement {
            show_command: state.show_command,
            normal_position: state.rect,
        })
    }

    fn window_style(&self, window: WindowHandle) -> Result<WindowStyle> {
        let mut state = self.state.lock();
        state.calls.push(WindowCall::GetStyle);
        state.check(window)?;
        Ok(state.style)
    }

    fn set_window_style(&self, window: WindowHandle, style: WindowStyle) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(WindowCall::SetStyle(style));
        state.check(window)?;
        state.style = style;
        Ok(())
    }

    fn set_window_pos(
        &self,
        window: WindowHandle,
        z_order: ZOrder,
        rect: WindowRect,
        flags: PositionFlags,
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(WindowCall::SetPos {
            z_order,
            rect,
            flags,
        });
        state.check(window)?;

        if !flags.contains(PositionFlags::NO_MOVE) {
            state.rect.x = rect.x;
            state.rect.y = rect.y;
        }
        if !flags.contains(PositionFlags::NO_SIZE) {
            state.rect.width = rect.width;
            state.rect.height = rect.height;
        }
        state.z_order = z_order;

        tracing::trace!(target: targets::HEADLESS, rect = ?state.rect, ?z_order, "window moved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_move_no_size_keep_geometry() {
        let window = HeadlessWindow::default();
        let handle = window.handle();

        window
            .set_window_pos(
                handle,
                ZOrder::TopMost,
                WindowRect::new(0, 0, 10, 10),
                PositionFlags::SHOW_WINDOW | PositionFlags::NO_MOVE | PositionFlags::NO_SIZE,
            )
            .unwrap();

        assert_eq!(window.rect(), WindowRect::new(100, 100, 800, 600));
        assert_eq!(window.z_order(), ZOrder::TopMost);
    }

    #[test]
    fn test_move_only() {
        let window = HeadlessWindow::default();
        let handle = window.handle();

        window
            .set_window_pos(
                handle,
                ZOrder::NotTopMost,
                WindowRect::new(5, 6, 0, 0),
                PositionFlags::SHOW_WINDOW | PositionFlags::NO_SIZE,
            )
            .unwrap();

        assert_eq!(window.rect(), WindowRect::new(5, 6, 800, 600));
    }

    #[test]
    fn test_dead_window_rejects_calls() {
        let window = HeadlessWindow::default();
        let handle = window.handle();
        window.set_alive(false);

        assert!(window.active_window().is_none());
        assert!(!window.is_window(handle));
        assert_eq!(
            window.window_style(handle),
            Err(WindowError::InvalidHandle(handle))
        );
    }

    #[test]
    fn test_stale_handle_stays_active() {
        let window = HeadlessWindow::default();
        let handle = window.handle();
        window.set_stale_handle(true);

        assert_eq!(window.active_window(), Some(handle));
        assert!(!window.is_window(handle));
        assert_eq!(
            window.set_window_style(handle, WindowStyle::POPUP),
            Err(WindowError::InvalidHandle(handle))
        );
        assert_eq!(window.style(), WindowStyle::OVERLAPPED_WINDOW | WindowStyle::VISIBLE);
    }

    #[test]
    fn test_clones_share_state() {
        let window = HeadlessWindow::default();
        let observer = window.clone();

        window
            .set_window_style(window.handle(), WindowStyle::POPUP)
            .unwrap();

        assert_eq!(observer.style(), WindowStyle::POPUP);
        assert_eq!(observer.calls(), vec![WindowCall::SetStyle(WindowStyle::POPUP)]);
    }

    #[test]
    fn test_placement_failure() {
        let window = HeadlessWindow::default().with_show_command(ShowCommand::Maximized);
        let handle = window.handle();

        let placement = window.window_placement(handle).unwrap();
        assert!(placement.show_command.is_maximized());

        window.set_fail_placement(true);
        assert!(matches!(
            window.window_placement(handle),
            Err(WindowError::PlacementQuery { .. })
        ));
    }
}
