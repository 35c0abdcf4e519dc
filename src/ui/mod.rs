mod components;
mod controller;
mod monitor_list;

pub use controller::Controller;

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use windows::Win32::Foundation::HWND;

/// Native handle of a gpui window, so the overlay backend can hide and show it.
pub fn menu_hwnd(window: &gpui::Window) -> Option<HWND> {
    let handle = window.window_handle().ok()?;
    match handle.as_raw() {
        RawWindowHandle::Win32(win32) => Some(HWND(win32.hwnd.get() as *mut std::ffi::c_void)),
        _ => None,
    }
}
