#[cfg(windows)]
mod enumerate;
mod types;

#[cfg(windows)]
pub use enumerate::enumerate_monitors;
pub use types::Monitor;
