use std::time::Duration;

use gpui::prelude::*;
use gpui::{FontWeight, MouseButton, Task, div, px, rgb};
use tracing::warn;

use crate::app::{Blackout, Phase};
use crate::monitor::enumerate_monitors;
use crate::overlay::Win32Overlays;
use crate::ui::components::{ButtonKind, button};
use crate::ui::monitor_list::monitor_list;

/// How often the menu checks the overlays for dismiss input.
const DISMISS_POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Central application controller.
///
/// Renders the selection menu from the [`Blackout`] state and drives its
/// transitions from menu input.
pub struct Controller {
    blackout: Blackout<Win32Overlays>,
    /// Polls the overlays while a blackout is active. Dropping it stops polling.
    dismiss_watch: Option<Task<()>>,
}

impl Controller {
    pub fn new(blackout: Blackout<Win32Overlays>) -> Self {
        Self {
            blackout,
            dismiss_watch: None,
        }
    }

    pub fn toggle(&mut self, index: usize, cx: &mut gpui::Context<Self>) {
        if let Err(e) = self.blackout.toggle(index) {
            warn!("ignoring toggle: {e}");
        }
        cx.notify();
    }

    fn start(&mut self, cx: &mut gpui::Context<Self>) {
        if matches!(self.blackout.start(), Ok(count) if count > 0) {
            self.watch_for_dismiss(cx);
        }
        cx.notify();
    }

    fn refresh(&mut self, cx: &mut gpui::Context<Self>) {
        drop(self.dismiss_watch.take());
        self.blackout.refresh_with(enumerate_monitors);
        cx.notify();
    }

    /// Overlay windows report input on the UI thread's message loop, outside
    /// of gpui, so the menu polls for it until the blackout ends.
    fn watch_for_dismiss(&mut self, cx: &mut gpui::Context<Self>) {
        self.dismiss_watch = Some(cx.spawn(async move |this, cx| {
            loop {
                cx.background_executor()
                    .timer(DISMISS_POLL_INTERVAL)
                    .await;
                let active = this.update(cx, |this, cx| {
                    if this.blackout.poll_dismiss() {
                        cx.notify();
                    }
                    this.blackout.phase() == Phase::OverlayActive
                });
                if !matches!(active, Ok(true)) {
                    break;
                }
            }
        }));
    }
}

impl Render for Controller {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        cx: &mut gpui::Context<Self>,
    ) -> impl IntoElement {
        let selection = self.blackout.selection();
        let selected = selection.selected_count();
        let total = selection.len();
        let summary = if selection.is_empty() {
            "No monitors detected".to_string()
        } else {
            format!("{selected} of {total} selected")
        };

        let mon_list = monitor_list(self.blackout.monitors(), selection, cx);

        // ── Error banner ─────────────────────────────────────────────────
        let error_banner = self.blackout.last_error().map(|message| {
            div()
                .w_full()
                .px_4()
                .py_3()
                .rounded(px(8.0))
                .bg(rgb(0x3a1e1e))
                .border_1()
                .border_color(rgb(0xef4444))
                .text_sm()
                .text_color(rgb(0xfca5a5))
                .cursor_pointer()
                .on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|this, _, _window, cx| {
                        this.blackout.clear_error();
                        cx.notify();
                    }),
                )
                .child(message.to_string())
        });

        // ── Actions ──────────────────────────────────────────────────────
        let actions = div()
            .flex()
            .flex_col()
            .gap_2()
            .w_full()
            .child(button(
                "START",
                ButtonKind::Primary,
                cx.listener(|this, _, _window, cx| this.start(cx)),
            ))
            .child(
                div()
                    .flex()
                    .justify_center()
                    .pb_2()
                    .text_xs()
                    .text_color(rgb(0xa1a1aa))
                    .child("* Press any key or click to return"),
            )
            .child(button(
                "REFRESH MONITORS",
                ButtonKind::Secondary,
                cx.listener(|this, _, _window, cx| this.refresh(cx)),
            ))
            .child(button(
                "EXIT",
                ButtonKind::Secondary,
                cx.listener(|_, _, _window, cx| cx.quit()),
            ));

        // ── Assemble the full layout ─────────────────────────────────────
        div()
            .flex()
            .flex_col()
            .gap_5()
            .size_full()
            .px_12()
            .py_10()
            .bg(rgb(0x121212))
            // Title
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .child(
                        div()
                            .text_2xl()
                            .font_weight(FontWeight::BOLD)
                            .text_color(rgb(0xffffff))
                            .child("Monitor Blackout"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(rgb(0xa1a1aa))
                            .child(
                                "Select the monitors on which you want to display the black screen.",
                            ),
                    ),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(rgb(0x666666))
                    .child(summary),
            )
            // Monitor list
            .child(mon_list)
            .children(error_banner)
            .child(div().flex_grow())
            .child(actions)
    }
}
