//! Native window state management.
//!
//! This module captures, changes and restores the geometry and style of the
//! window hosting the application.
//!
//! # Window State Manager
//!
//! ```ignore
//! use std::sync::Arc;
//! use window_helper::window::{platform_window_control, WindowStateManager};
//! use window_helper_core::SharedTaskScheduler;
//!
//! let scheduler = Arc::new(SharedTaskScheduler::new());
//! let mut manager = WindowStateManager::new(platform_window_control(), scheduler.clone());
//!
//! // Borderless, pinned on top, covering a 1920x1080 screen
//! manager
//!     .set_full_screen(true)
//!     .set_size(1920, 1080)
//!     .set_position(0, 0)
//!     .set_top_most(true)
//!     .apply();
//!
//! // In the host's update loop
//! scheduler.process_ready();
//!
//! // When the host shuts down
//! manager.on_application_quit();
//! ```
//!
//! # Backends
//!
//! | Backend | Platform | Notes |
//! |---------|----------|-------|
//! | `Win32WindowControl` | Windows | `user32` calls |
//! | [`HeadlessWindow`] | all | in-memory window with a call journal |

mod headless;
mod state_manager;
#[cfg(target_os = "windows")]
mod win32;
mod window_control;
mod window_state;

pub use headless::{HeadlessWindow, WindowCall};
pub use state_manager::WindowStateManager;
#[cfg(target_os = "windows")]
pub use win32::Win32WindowControl;
pub use window_control::{
    PositionFlags, ShowCommand, WindowControl, WindowHandle, WindowPlacement, WindowRect,
    WindowStyle, ZOrder, platform_window_control,
};
pub use window_state::WindowState;
