use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};
use windows::core::BOOL;

use super::types::Monitor;
use crate::error::{BlackoutError, Result};

/// `MONITORINFO::dwFlags` bit set on the primary display.
const MONITORINFOF_PRIMARY: u32 = 0x0000_0001;

/// Enumerate all monitors currently attached to the desktop.
///
/// Walks every display with `EnumDisplayMonitors` and reports each one's full
/// rectangle (`rcMonitor`, not the work area) in virtual-desktop coordinates.
/// Nothing is cached; every call queries the OS again.
pub fn enumerate_monitors() -> Result<Vec<Monitor>> {
    let mut monitors: Vec<Monitor> = Vec::new();

    unsafe extern "system" fn enum_proc(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _rect: *mut RECT,
        lparam: LPARAM,
    ) -> BOOL {
        unsafe {
            let monitors = &mut *(lparam.0 as *mut Vec<Monitor>);

            let mut info = MONITORINFO {
                cbSize: std::mem::size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };

            if GetMonitorInfoW(hmonitor, &mut info).as_bool() {
                let rc = info.rcMonitor;
                monitors.push(Monitor::from_bounds(
                    rc.left,
                    rc.top,
                    rc.right,
                    rc.bottom,
                    info.dwFlags & MONITORINFOF_PRIMARY != 0,
                ));
            }

            BOOL(1) // continue enumeration
        }
    }

    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_proc),
            LPARAM(&mut monitors as *mut Vec<Monitor> as isize),
        )
    };

    if !ok.as_bool() {
        return Err(BlackoutError::Enumeration(
            std::io::Error::last_os_error().to_string(),
        ));
    }

    Ok(monitors)
}
