use gpui::prelude::*;
use gpui::{FontWeight, MouseButton, div, px, rgb};

use crate::monitor::Monitor;
use crate::selection::Selection;
use crate::ui::components::checkbox;
use crate::ui::controller::Controller;

/// Build the monitor list section: a vertical stack of selectable monitor cards.
///
/// Each card shows the monitor's label, resolution and position. The whole
/// card is a single click target that toggles its selection.
pub fn monitor_list(
    monitors: &[Monitor],
    selection: &Selection,
    cx: &mut gpui::Context<Controller>,
) -> impl IntoElement + use<> {
    let mut list = div().flex().flex_col().gap_2().w_full();

    for (i, mon) in monitors.iter().enumerate() {
        let is_selected = selection.is_selected(i);

        let position = format!("pos: ({}, {})", mon.x, mon.y);

        let row = div()
            .flex()
            .items_center()
            .gap_4()
            .px_5()
            .py_4()
            .w_full()
            .rounded(px(8.0))
            .bg(if is_selected {
                rgb(0x252525)
            } else {
                rgb(0x1e1e1e)
            })
            .hover(|style| style.bg(rgb(0x2d2d2d)))
            .border_2()
            .border_color(if is_selected {
                rgb(0x3b82f6)
            } else {
                rgb(0x1e1e1e)
            })
            .cursor_pointer()
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(move |this, _, _window, cx| this.toggle(i, cx)),
            )
            .child(checkbox(is_selected))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(2.0))
                    .flex_grow()
                    .child(
                        div()
                            .text_color(rgb(0xffffff))
                            .font_weight(FontWeight::BOLD)
                            .child(mon.label(i)),
                    )
                    .child(
                        div()
                            .flex()
                            .gap_3()
                            .child(
                                div()
                                    .text_sm()
                                    .text_color(if is_selected {
                                        rgb(0xffffff)
                                    } else {
                                        rgb(0xa1a1aa)
                                    })
                                    .child(mon.resolution()),
                            )
                            .child(div().text_sm().text_color(rgb(0x666666)).child(position)),
                    ),
            );

        list = list.child(row);
    }

    list
}
