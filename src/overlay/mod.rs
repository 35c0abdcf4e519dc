pub mod config;
pub mod manager;
#[cfg(test)]
pub mod testing;
#[cfg(windows)]
pub mod window;

pub use manager::{DismissInput, OverlayBackend, OverlayManager};
#[cfg(windows)]
pub use window::Win32Overlays;
