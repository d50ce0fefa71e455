//! Apply a borderless, topmost, screen-sized state to a window and restore it.
//!
//! Drives an in-memory window by default. Pass `--native` on Windows to act on
//! the active window instead, and a TOML path to override the configuration.
//!
//! Run with: cargo run -p window-helper --example apply_window -- [--native] [config.toml]

use std::sync::Arc;
use std::time::Duration;

use window_helper::window::{HeadlessWindow, WindowControl, platform_window_control};
use window_helper::{HostEnvironment, SharedTaskScheduler, WindowHelperConfig, WindowStateManager};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut native = false;
    let mut config = WindowHelperConfig::new()
        .with_host(HostEnvironment::Editor)
        .with_reapply_delay(Duration::from_millis(500));

    for arg in std::env::args().skip(1) {
        if arg == "--native" {
            native = true;
            continue;
        }
        match WindowHelperConfig::load(&arg) {
            Ok(loaded) => config = loaded,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    }

    let headless = HeadlessWindow::default();
    let control: Box<dyn WindowControl> = if native {
        platform_window_control()
    } else {
        Box::new(headless.clone())
    };

    println!("Window helper example");
    println!("=====================");
    println!("config: {config:?}");

    let scheduler = Arc::new(SharedTaskScheduler::new());
    let delay = config.reapply_delay;
    let mut manager = WindowStateManager::with_config(control, scheduler.clone(), config);

    manager
        .set_full_screen(true)
        .set_size(1920, 1080)
        .set_position(0, 0)
        .set_top_most(true)
        .apply();

    println!("original: {:?}", manager.original_state());
    if !native {
        println!("after apply: {:?} {:?}", headless.rect(), headless.z_order());
    }

    // Stand-in for the host's update loop.
    let frame = Duration::from_millis(16);
    let mut elapsed = Duration::ZERO;
    while manager.has_pending_reapply() && elapsed <= delay * 2 {
        scheduler.process_ready();
        std::thread::sleep(frame);
        elapsed += frame;
    }
    println!("re-apply done after ~{elapsed:?}");

    manager.on_application_quit();
    if !native {
        println!("after quit: {:?} {:?}", headless.rect(), headless.z_order());
    }
}
