//! The window control port.
//!
//! [`WindowControl`] is the narrow set of native calls the window state
//! manager drives. The manager never talks to the OS directly, so tests and
//! hosts without a native window can substitute [`HeadlessWindow`].
//!
//! The value types mirror the Win32 records they stand for: raw style bits,
//! `SWP_*` position flags and the `HWND_TOPMOST`/`HWND_NOTOPMOST` z-order
//! tokens.
//!
//! [`HeadlessWindow`]: super::HeadlessWindow

use std::fmt;
use std::num::NonZeroIsize;
use std::ops::{BitOr, BitOrAssign};

use raw_window_handle::RawWindowHandle;

use crate::error::{Result, WindowError};

// ============================================================================
// Window Handle
// ============================================================================

/// Opaque identifier of a native window.
///
/// A null handle is never valid, so it cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(NonZeroIsize);

impl WindowHandle {
    pub const fn from_non_zero(raw: NonZeroIsize) -> Self {
        Self(raw)
    }

    /// Wrap a raw handle value, rejecting null.
    pub fn from_raw(raw: isize) -> Option<Self> {
        NonZeroIsize::new(raw).map(Self)
    }

    /// The raw handle value.
    pub fn as_raw(self) -> isize {
        self.0.get()
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0.get())
    }
}

impl TryFrom<RawWindowHandle> for WindowHandle {
    type Error = WindowError;

    fn try_from(handle: RawWindowHandle) -> Result<Self> {
        match handle {
            RawWindowHandle::Win32(handle) => Ok(Self(handle.hwnd)),
            _ => Err(WindowError::Unsupported(
                "expected Win32 window handle".to_string(),
            )),
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// A window rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its edges, as Win32 `RECT` stores it.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// The show state reported by a placement query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowCommand {
    #[default]
    Normal,
    Minimized,
    Maximized,
    /// Any other `SW_*` value.
    Other(u32),
}

impl ShowCommand {
    /// Convert from a Win32 `showCmd` value.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Normal,
            2 => Self::Minimized,
            3 => Self::Maximized,
            other => Self::Other(other),
        }
    }

    /// The Win32 `showCmd` value.
    pub fn to_raw(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Minimized => 2,
            Self::Maximized => 3,
            Self::Other(raw) => raw,
        }
    }

    pub fn is_maximized(self) -> bool {
        self == Self::Maximized
    }
}

/// A window placement record: show state plus the restorable geometry.
///
/// `normal_position` is the non-maximized rectangle, valid even while the
/// window is maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowPlacement {
    pub show_command: ShowCommand,
    pub normal_position: WindowRect,
}

// ============================================================================
// Style Bits
// ============================================================================

/// Raw window style bits (`GWL_STYLE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowStyle(u32);

impl WindowStyle {
    /// No style bits.
    pub const NONE: WindowStyle = WindowStyle(0);

    /// `WS_OVERLAPPEDWINDOW`: caption, system menu, sizing border, min/max boxes.
    pub const OVERLAPPED_WINDOW: WindowStyle = WindowStyle(0x00CF_0000);

    /// `WS_POPUP`: a window without any frame.
    pub const POPUP: WindowStyle = WindowStyle(0x8000_0000);

    /// `WS_VISIBLE`.
    pub const VISIBLE: WindowStyle = WindowStyle(0x1000_0000);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Check if all bits of `other` are set.
    pub fn has(self, other: WindowStyle) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Remove title bar, border and system buttons.
    ///
    /// Does not change the window's size or position.
    pub fn borderless(self) -> Self {
        Self((self.0 & !Self::OVERLAPPED_WINDOW.0) | Self::POPUP.0)
    }

    /// Restore title bar and border.
    pub fn bordered(self) -> Self {
        Self((self.0 | Self::OVERLAPPED_WINDOW.0) & !Self::POPUP.0)
    }

    pub fn is_borderless(self) -> bool {
        self.has(Self::POPUP) && (self.0 & Self::OVERLAPPED_WINDOW.0) == 0
    }
}

impl BitOr for WindowStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

// ============================================================================
// Position Flags
// ============================================================================

/// Flags for the combined position/size/z-order call (`SWP_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionFlags(u32);

impl PositionFlags {
    pub const NONE: PositionFlags = PositionFlags(0);

    /// `SWP_NOSIZE`: keep the current size.
    pub const NO_SIZE: PositionFlags = PositionFlags(0x0001);

    /// `SWP_NOMOVE`: keep the current position.
    pub const NO_MOVE: PositionFlags = PositionFlags(0x0002);

    /// `SWP_SHOWWINDOW`.
    pub const SHOW_WINDOW: PositionFlags = PositionFlags(0x0040);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: PositionFlags) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for PositionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PositionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Where a window sits in the stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZOrder {
    /// Pinned above all non-topmost windows (`HWND_TOPMOST`).
    TopMost,
    /// Normal stacking (`HWND_NOTOPMOST`).
    #[default]
    NotTopMost,
}

impl ZOrder {
    pub fn from_top_most(top_most: bool) -> Self {
        if top_most { Self::TopMost } else { Self::NotTopMost }
    }
}

// ============================================================================
// Port
// ============================================================================

/// Native window operations driven by the window state manager.
pub trait WindowControl: Send {
    /// The active window, if any.
    fn active_window(&self) -> Option<WindowHandle>;

    /// Whether `window` still refers to a live window.
    fn is_window(&self, window: WindowHandle) -> bool;

    /// Query the placement record.
    fn window_placement(&self, window: WindowHandle) -> Result<WindowPlacement>;

    /// Read the style bits.
    fn window_style(&self, window: WindowHandle) -> Result<WindowStyle>;

    /// Write the style bits.
    fn set_window_style(&self, window: WindowHandle, style: WindowStyle) -> Result<()>;

    /// Move, resize and restack in one call.
    ///
    /// `rect.x`/`rect.y` are ignored with [`PositionFlags::NO_MOVE`] and
    /// `rect.width`/`rect.height` with [`PositionFlags::NO_SIZE`].
    fn set_window_pos(
        &self,
        window: WindowHandle,
        z_order: ZOrder,
        rect: WindowRect,
        flags: PositionFlags,
    ) -> Result<()>;
}

impl<C: WindowControl + ?Sized> WindowControl for Box<C> {
    fn active_window(&self) -> Option<WindowHandle> {
        (**self).active_window()
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        (**self).is_window(window)
    }

    fn window_placement(&self, window: WindowHandle) -> Result<WindowPlacement> {
        (**self).window_placement(window)
    }

    fn window_style(&self, window: WindowHandle) -> Result<WindowStyle> {
        (**self).window_style(window)
    }

    fn set_window_style(&self, window: WindowHandle, style: WindowStyle) -> Result<()> {
        (**self).set_window_style(window, style)
    }

    fn set_window_pos(
        &self,
        window: WindowHandle,
        z_order: ZOrder,
        rect: WindowRect,
        flags: PositionFlags,
    ) -> Result<()> {
        (**self).set_window_pos(window, z_order, rect, flags)
    }
}

/// Create the platform-appropriate window control.
///
/// On Windows: the Win32 backend.
/// On other platforms: a headless window, since only Win32 is driven natively.
pub fn platform_window_control() -> Box<dyn WindowControl> {
    #[cfg(target_os = "windows")]
    {
        Box::new(super::win32::Win32WindowControl::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Box::new(super::HeadlessWindow::default())
    }
}
