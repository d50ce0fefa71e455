//! Window geometry and style intent.

use super::window_control::{PositionFlags, WindowRect, WindowStyle, ZOrder};

/// Window geometry and style, plus which parts the caller asked to change.
///
/// A state built with the setters starts with both intent flags off and
/// turns a flag on only when the matching setter runs, so an apply leaves
/// untouched geometry alone. A captured state always has both flags on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub is_top_most: bool,
    /// Borderless (full-window) style.
    pub is_full_screen: bool,
    /// The caller explicitly requested `x`/`y`.
    pub position_set: bool,
    /// The caller explicitly requested `width`/`height`.
    pub size_set: bool,
}

impl WindowState {
    /// An empty target state: nothing requested yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A state read back from the OS.
    ///
    /// `is_top_most` is always false: there is no cheap query for it.
    pub fn captured(rect: WindowRect, is_full_screen: bool) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            is_top_most: false,
            is_full_screen,
            position_set: true,
            size_set: true,
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.position_set = true;
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
        self.size_set = true;
    }

    pub fn set_top_most(&mut self, top_most: bool) {
        self.is_top_most = top_most;
    }

    pub fn set_full_screen(&mut self, full_screen: bool) {
        self.is_full_screen = full_screen;
    }

    pub fn rect(&self) -> WindowRect {
        WindowRect::new(self.x, self.y, self.width, self.height)
    }

    pub fn z_order(&self) -> ZOrder {
        ZOrder::from_top_most(self.is_top_most)
    }

    /// The style bits this state asks for, given the current ones.
    pub fn apply_style(&self, current: WindowStyle) -> WindowStyle {
        if self.is_full_screen {
            current.borderless()
        } else {
            current.bordered()
        }
    }

    /// Flags for the set-position call: show, and skip whatever was not requested.
    pub fn position_flags(&self) -> PositionFlags {
        let mut flags = PositionFlags::SHOW_WINDOW;
        if !self.position_set {
            flags |= PositionFlags::NO_MOVE;
        }
        if !self.size_set {
            flags |= PositionFlags::NO_SIZE;
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_requests_nothing() {
        let state = WindowState::new();
        assert!(!state.position_set);
        assert!(!state.size_set);
        assert_eq!(
            state.position_flags(),
            PositionFlags::SHOW_WINDOW | PositionFlags::NO_MOVE | PositionFlags::NO_SIZE
        );
    }

    #[test]
    fn test_setters_flip_only_their_flag() {
        let mut state = WindowState::new();
        state.set_position(10, 20);
        assert!(state.position_set);
        assert!(!state.size_set);
        assert_eq!(
            state.position_flags(),
            PositionFlags::SHOW_WINDOW | PositionFlags::NO_SIZE
        );

        state.set_size(640, 480);
        assert_eq!(state.position_flags(), PositionFlags::SHOW_WINDOW);
        assert_eq!(state.rect(), WindowRect::new(10, 20, 640, 480));
    }

    #[test]
    fn test_style_setters_leave_intent_flags() {
        let mut state = WindowState::new();
        state.set_top_most(true);
        state.set_full_screen(true);

        assert!(!state.position_set);
        assert!(!state.size_set);
        assert_eq!(state.z_order(), ZOrder::TopMost);
    }

    #[test]
    fn test_captured_state_is_authoritative() {
        let state = WindowState::captured(WindowRect::new(100, 100, 800, 600), true);

        assert!(state.position_set);
        assert!(state.size_set);
        assert!(!state.is_top_most);
        assert!(state.is_full_screen);
    }

    #[test]
    fn test_apply_style() {
        let mut state = WindowState::new();
        let style = WindowStyle::OVERLAPPED_WINDOW | WindowStyle::VISIBLE;

        assert_eq!(state.apply_style(style), style);

        state.set_full_screen(true);
        assert!(state.apply_style(style).is_borderless());
    }
}
