#![cfg_attr(not(windows), allow(dead_code))]

mod app;
mod error;
mod monitor;
mod overlay;
mod selection;
#[cfg(windows)]
mod ui;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("monitor_blackout=info".parse()?),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "=== Monitor Blackout ===");
    run()
}

#[cfg(windows)]
fn run() -> Result<()> {
    use anyhow::Context;
    use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
    use tracing::error;

    use crate::app::{Blackout, require_monitors};
    use crate::monitor::enumerate_monitors;
    use crate::overlay::Win32Overlays;
    use crate::ui::Controller;

    // Discover connected monitors. Without a list there is nothing to show.
    let monitors = enumerate_monitors()
        .and_then(require_monitors)
        .context("cannot build the monitor list")?;
    info!("Found {} monitor(s):", monitors.len());
    for (i, mon) in monitors.iter().enumerate() {
        info!(
            "  [{}] {}: {} at ({}, {})",
            i,
            mon.label(i),
            mon.resolution(),
            mon.x,
            mon.y,
        );
    }

    // Register the Win32 overlay window class (once, before any windows are created).
    let mut backend = Win32Overlays::new().context("cannot prepare overlay windows")?;

    // Launch the GPUI menu window.
    Application::new().run(move |app: &mut gpui::App| {
        let bounds = Bounds::centered(None, size(px(600.0), px(700.0)), app);

        let opened = app.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some("Black Screen".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            move |window, cx| {
                backend.attach_menu(ui::menu_hwnd(window));
                let blackout = Blackout::new(monitors, backend);
                cx.new(move |_| Controller::new(blackout))
            },
        );

        if let Err(e) = opened {
            error!("failed to open the menu window: {e:?}");
            app.quit();
        }
    });

    Ok(())
}

#[cfg(not(windows))]
fn run() -> Result<()> {
    anyhow::bail!("monitor-blackout drives Win32 display and window APIs and only runs on Windows")
}
