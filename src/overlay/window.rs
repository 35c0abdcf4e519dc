use std::cell::RefCell;
use std::sync::mpsc;

use tracing::debug;
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DeleteObject, EndPaint, FillRect, HBRUSH, PAINTSTRUCT,
    UpdateWindow,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DestroyWindow, HWND_TOP, HWND_TOPMOST,
    IsWindow, RegisterClassW, SW_HIDE, SW_SHOW, SWP_SHOWWINDOW, SetCursor, SetForegroundWindow,
    SetWindowPos, ShowWindow, WINDOW_EX_STYLE, WM_CLOSE, WM_KEYDOWN, WM_LBUTTONDOWN, WM_PAINT,
    WM_SETCURSOR, WM_SYSKEYDOWN, WNDCLASSW, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
    WS_VISIBLE,
};
use windows::core::PCWSTR;

use super::config::{OVERLAY_COLOR, OverlayConfig};
use super::manager::{DismissInput, OverlayBackend};
use crate::error::{BlackoutError, Result};

const CLASS_NAME: &str = "MonitorBlackoutOverlayClass\0";

/// Atom of the overlay class; zero until the first successful registration.
static mut WINDOW_CLASS_ATOM: u16 = 0;

thread_local! {
    /// Where the window procedure reports dismiss input. Set while a
    /// [`Win32Overlays`] exists on this thread.
    static DISMISS_TX: RefCell<Option<mpsc::Sender<DismissInput>>> = const { RefCell::new(None) };
}

fn report(input: DismissInput) {
    DISMISS_TX.with(|tx| {
        if let Some(tx) = tx.borrow().as_ref() {
            let _ = tx.send(input);
        }
    });
}

// ─── Window procedure ───────────────────────────────────────────────────────

/// Window procedure callback for overlay windows.
///
/// * `WM_PAINT`      — fills the window with solid black.
/// * `WM_SETCURSOR`  — hides the pointer over the client area.
/// * key / left click / close — reported as dismiss input; the window itself
///   stays alive until the manager tears the whole set down.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        match msg {
            WM_PAINT => {
                let mut ps = PAINTSTRUCT::default();
                let hdc = BeginPaint(hwnd, &mut ps);
                if !hdc.is_invalid() {
                    let brush = CreateSolidBrush(COLORREF(OVERLAY_COLOR));
                    if !brush.is_invalid() {
                        let _ = FillRect(hdc, &ps.rcPaint, brush);
                        let _ = DeleteObject(brush.into());
                    }
                    let _ = EndPaint(hwnd, &ps);
                }
                LRESULT(0)
            }
            WM_SETCURSOR => {
                let _ = SetCursor(None);
                LRESULT(1)
            }
            WM_KEYDOWN | WM_SYSKEYDOWN => {
                report(DismissInput::Key);
                LRESULT(0)
            }
            WM_LBUTTONDOWN => {
                report(DismissInput::Click);
                LRESULT(0)
            }
            WM_CLOSE => {
                report(DismissInput::Close);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

// ─── Class registration ─────────────────────────────────────────────────────

/// Register the overlay window class.
///
/// Later calls are no-ops once the class exists.
/// Must be called from the UI thread.
pub unsafe fn register_overlay_class() -> Result<()> {
    if unsafe { WINDOW_CLASS_ATOM } != 0 {
        return Ok(());
    }

    let hinstance = windows::Win32::Foundation::HINSTANCE(std::ptr::null_mut());
    let class_name: Vec<u16> = CLASS_NAME.encode_utf16().collect();

    let wc = WNDCLASSW {
        lpfnWndProc: Some(wnd_proc),
        hInstance: hinstance,
        lpszClassName: PCWSTR(class_name.as_ptr()),
        style: CS_HREDRAW | CS_VREDRAW,
        hbrBackground: HBRUSH(std::ptr::null_mut()),
        ..Default::default()
    };

    let atom = unsafe { RegisterClassW(&wc) };
    if atom == 0 {
        return Err(BlackoutError::ClassRegistration(
            std::io::Error::last_os_error().to_string(),
        ));
    }

    unsafe {
        WINDOW_CLASS_ATOM = atom;
    }
    Ok(())
}

// ─── Backend ────────────────────────────────────────────────────────────────

/// Win32 overlay windows created on the UI thread.
///
/// The windows are borderless popups (`WS_POPUP`), always on top
/// (`WS_EX_TOPMOST`) and hidden from the taskbar (`WS_EX_TOOLWINDOW`). They
/// take focus so that key presses reach them, and their messages are pumped
/// by the UI toolkit's own loop on the same thread.
pub struct Win32Overlays {
    /// Selection window, hidden for the duration of a blackout.
    menu: Option<HWND>,
    dismiss_rx: mpsc::Receiver<DismissInput>,
}

impl Win32Overlays {
    /// Register the window class and start listening for dismiss input.
    pub fn new() -> Result<Self> {
        unsafe { register_overlay_class()? };

        let (tx, rx) = mpsc::channel();
        DISMISS_TX.with(|slot| *slot.borrow_mut() = Some(tx));

        Ok(Self {
            menu: None,
            dismiss_rx: rx,
        })
    }

    /// Set the selection window to hide while the blackout is active.
    pub fn attach_menu(&mut self, menu: Option<HWND>) {
        self.menu = menu;
    }
}

impl Drop for Win32Overlays {
    fn drop(&mut self) {
        DISMISS_TX.with(|slot| *slot.borrow_mut() = None);
    }
}

impl OverlayBackend for Win32Overlays {
    type Handle = HWND;

    fn create(&mut self, config: &OverlayConfig) -> Result<HWND> {
        let creation_error = |reason: String| BlackoutError::WindowCreation {
            monitor: config.monitor,
            reason,
        };
        let (x, y, width, height) = config.bounds();
        let width = i32::try_from(width).map_err(|e| creation_error(e.to_string()))?;
        let height = i32::try_from(height).map_err(|e| creation_error(e.to_string()))?;

        unsafe {
            let hinstance = windows::Win32::Foundation::HINSTANCE(std::ptr::null_mut());
            let class_name: Vec<u16> = CLASS_NAME.encode_utf16().collect();
            let window_name: Vec<u16> = format!("{}\0", config.title).encode_utf16().collect();

            let mut ex_style = WS_EX_TOOLWINDOW.0;
            if config.topmost {
                ex_style |= WS_EX_TOPMOST.0;
            }

            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE(ex_style),
                PCWSTR(class_name.as_ptr()),
                PCWSTR(window_name.as_ptr()),
                WS_POPUP | WS_VISIBLE,
                x,
                y,
                width,
                height,
                None,
                None,
                Some(hinstance),
                None,
            )
            .map_err(|e| creation_error(e.message()))?;

            if hwnd.0.is_null() {
                return Err(creation_error("CreateWindowExW returned null".to_string()));
            }

            let _ = ShowWindow(hwnd, SW_SHOW);
            let insert_after = if config.topmost { HWND_TOPMOST } else { HWND_TOP };
            let _ = SetWindowPos(
                hwnd,
                Some(insert_after),
                x,
                y,
                width,
                height,
                SWP_SHOWWINDOW,
            );
            let _ = UpdateWindow(hwnd);

            debug!(
                monitor = config.monitor,
                x,
                y,
                width,
                height,
                "overlay created"
            );
            Ok(hwnd)
        }
    }

    fn destroy(&mut self, hwnd: HWND) -> Result<()> {
        unsafe {
            if !IsWindow(Some(hwnd)).as_bool() {
                return Err(BlackoutError::WindowDestroy("window already gone".to_string()));
            }
            DestroyWindow(hwnd).map_err(|e| BlackoutError::WindowDestroy(e.message()))
        }
    }

    fn focus(&mut self, hwnd: &HWND) {
        unsafe {
            let _ = SetForegroundWindow(*hwnd);
        }
    }

    fn set_menu_visible(&mut self, visible: bool) {
        let Some(menu) = self.menu else { return };
        unsafe {
            if !IsWindow(Some(menu)).as_bool() {
                return;
            }
            if visible {
                let _ = ShowWindow(menu, SW_SHOW);
                let _ = SetForegroundWindow(menu);
            } else {
                let _ = ShowWindow(menu, SW_HIDE);
            }
        }
    }

    fn take_dismiss(&mut self) -> Option<DismissInput> {
        let first = self.dismiss_rx.try_recv().ok();
        while self.dismiss_rx.try_recv().is_ok() {}
        first
    }
}
