use crate::monitor::Monitor;

/// Fill color of every overlay, as `0x00BBGGRR`.
pub const OVERLAY_COLOR: u32 = 0x0000_0000;

/// Parameters needed to spawn a single overlay window on a specific monitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Index of the target monitor in the enumerated list.
    pub monitor: usize,
    /// Window title (never shown, but visible to task switchers and accessibility tools).
    pub title: String,
    /// X coordinate of the target monitor's top-left corner.
    pub x: i32,
    /// Y coordinate of the target monitor's top-left corner.
    pub y: i32,
    /// Width of the target monitor in pixels.
    pub width: u32,
    /// Height of the target monitor in pixels.
    pub height: u32,
    /// Keep the window above all non-topmost windows.
    pub topmost: bool,
}

impl OverlayConfig {
    /// Full-coverage black overlay for `monitor`, positioned exactly on its rectangle.
    pub fn for_monitor(index: usize, monitor: &Monitor) -> Self {
        let (x, y, width, height) = monitor.bounds();
        Self {
            monitor: index,
            title: format!("Black Screen - Monitor {}", index + 1),
            x,
            y,
            width,
            height,
            topmost: true,
        }
    }

    pub fn bounds(&self) -> (i32, i32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }
}
