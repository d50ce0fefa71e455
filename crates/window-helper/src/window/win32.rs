//! Win32 window control backend.
//!
//! Drives the native window through `user32`: `GetActiveWindow`, `IsWindow`,
//! `GetWindowPlacement`, `GetWindowLongW`/`SetWindowLongW` on `GWL_STYLE`,
//! and `SetWindowPos`.

use std::ffi::c_void;

use window_helper_core::logging::targets;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::GetActiveWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_STYLE, GetWindowLongW, GetWindowPlacement, HWND_NOTOPMOST, HWND_TOPMOST, IsWindow,
    SET_WINDOW_POS_FLAGS, SetWindowLongW, SetWindowPos, WINDOWPLACEMENT,
};

use super::window_control::{
    PositionFlags, ShowCommand, WindowControl, WindowHandle, WindowPlacement, WindowRect,
    WindowStyle, ZOrder,
};
use crate::error::{Result, WindowError};

/// Window control backed by the Win32 API.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32WindowControl;

impl Win32WindowControl {
    pub fn new() -> Self {
        Self
    }
}

fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.as_raw() as *mut c_void)
}

impl Win32WindowControl {
    fn require_window(&self, window: WindowHandle) -> Result<HWND> {
        if self.is_window(window) {
            Ok(to_hwnd(window))
        } else {
            Err(WindowError::InvalidHandle(window))
        }
    }
}

impl WindowControl for Win32WindowControl {
    fn active_window(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetActiveWindow() };
        WindowHandle::from_raw(hwnd.0 as isize)
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        unsafe { IsWindow(to_hwnd(window)).as_bool() }
    }

    fn window_placement(&self, window: WindowHandle) -> Result<WindowPlacement> {
        let hwnd = self.require_window(window)?;

        // GetWindowPlacement leaves the record untouched unless `length` is set.
        let mut placement = WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };

        unsafe { GetWindowPlacement(hwnd, &mut placement) }
            .map_err(|e| WindowError::placement_query(window, e.to_string()))?;

        let rect = placement.rcNormalPosition;
        Ok(WindowPlacement {
            show_command: ShowCommand::from_raw(placement.showCmd),
            normal_position: WindowRect::from_edges(rect.left, rect.top, rect.right, rect.bottom),
        })
    }

    fn window_style(&self, window: WindowHandle) -> Result<WindowStyle> {
        let hwnd = self.require_window(window)?;
        let bits = unsafe { GetWindowLongW(hwnd, GWL_STYLE) };
        Ok(WindowStyle::from_bits(bits as u32))
    }

    fn set_window_style(&self, window: WindowHandle, style: WindowStyle) -> Result<()> {
        let hwnd = self.require_window(window)?;
        unsafe {
            SetWindowLongW(hwnd, GWL_STYLE, style.bits() as i32);
        }
        tracing::debug!(target: targets::WIN32, %window, style = format_args!("{:#010x}", style.bits()), "style updated");
        Ok(())
    }

    fn set_window_pos(
        &self,
        window: WindowHandle,
        z_order: ZOrder,
        rect: WindowRect,
        flags: PositionFlags,
    ) -> Result<()> {
        let hwnd = self.require_window(window)?;
        let insert_after = match z_order {
            ZOrder::TopMost => HWND_TOPMOST,
            ZOrder::NotTopMost => HWND_NOTOPMOST,
        };

        unsafe {
            SetWindowPos(
                hwnd,
                insert_after,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SET_WINDOW_POS_FLAGS(flags.bits()),
            )
        }
        .map_err(|e| WindowError::set_position(window, e.to_string()))?;

        tracing::debug!(target: targets::WIN32, %window, ?rect, ?z_order, flags = flags.bits(), "window position set");
        Ok(())
    }
}
