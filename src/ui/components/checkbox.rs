use gpui::prelude::*;
use gpui::{div, px, rgb};

/// Selection indicator drawn at the start of a monitor card.
///
/// Purely visual: the whole card is the click target, so the box has no
/// handler of its own.
pub fn checkbox(checked: bool) -> impl IntoElement {
    div()
        .flex()
        .flex_none()
        .items_center()
        .justify_center()
        .w(px(22.0))
        .h(px(22.0))
        .rounded(px(4.0))
        .bg(if checked {
            rgb(0x3b82f6)
        } else {
            rgb(0x2a2a2a)
        })
        .border_1()
        .border_color(if checked {
            rgb(0x3b82f6)
        } else {
            rgb(0x666666)
        })
        .child(
            div()
                .text_color(rgb(0xffffff))
                .child(if checked { "✓" } else { "" }),
        )
}
