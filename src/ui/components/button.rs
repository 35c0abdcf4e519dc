use gpui::prelude::*;
use gpui::{FontWeight, MouseButton, SharedString, div, px, rgb};

/// Visual weight of a [`button`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    /// Accent-filled call to action.
    Primary,
    /// Muted surface button.
    Secondary,
}

/// A full-width action button with native hover feedback.
pub fn button(
    label: impl Into<SharedString>,
    kind: ButtonKind,
    on_click: impl Fn(&gpui::MouseDownEvent, &mut gpui::Window, &mut gpui::App) + 'static,
) -> impl IntoElement {
    let (bg, hover_bg) = match kind {
        ButtonKind::Primary => (rgb(0x3b82f6), rgb(0x2563eb)),
        ButtonKind::Secondary => (rgb(0x1e1e1e), rgb(0x333333)),
    };

    div()
        .flex()
        .items_center()
        .justify_center()
        .w_full()
        .py_3()
        .rounded(px(8.0))
        .bg(bg)
        .hover(move |style| style.bg(hover_bg))
        .cursor_pointer()
        .text_color(rgb(0xffffff))
        .font_weight(FontWeight::BOLD)
        .on_mouse_down(MouseButton::Left, on_click)
        .child(label.into())
}
