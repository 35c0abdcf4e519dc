//! Menu/overlay state machine tying the monitor list, the selection and the
//! overlay manager together.
//!
//! ```text
//! MENU --start, selection non-empty--> OVERLAY_ACTIVE --any input--> MENU
//! MENU --start, selection empty------> MENU
//! ```

use tracing::{info, warn};

use crate::error::{BlackoutError, Result};
use crate::monitor::Monitor;
use crate::overlay::{OverlayBackend, OverlayManager};
use crate::selection::Selection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    OverlayActive,
}

/// Application state shared by the menu and the overlays.
pub struct Blackout<B: OverlayBackend> {
    monitors: Vec<Monitor>,
    selection: Selection,
    overlays: OverlayManager<B>,
    last_error: Option<String>,
}

impl<B: OverlayBackend> Blackout<B> {
    /// Start in the menu with every monitor selected.
    pub fn new(monitors: Vec<Monitor>, backend: B) -> Self {
        let selection = Selection::initialize(&monitors);
        Self {
            monitors,
            selection,
            overlays: OverlayManager::new(backend),
            last_error: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.overlays.is_active() {
            Phase::OverlayActive
        } else {
            Phase::Menu
        }
    }

    pub fn monitors(&self) -> &[Monitor] {
        &self.monitors
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Message from the last failed activation, shown by the menu.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.selection.toggle(index)
    }

    /// Black out every monitor selected right now.
    ///
    /// Returns the number of overlays opened; zero means nothing was selected
    /// and the menu stays up. A creation failure leaves no overlays behind and
    /// is kept for the menu to display.
    pub fn start(&mut self) -> Result<usize> {
        self.last_error = None;

        let snapshot = self.selection.snapshot();
        let targets: Vec<(usize, &Monitor)> = snapshot
            .iter()
            .filter_map(|&i| self.monitors.get(i).map(|m| (i, m)))
            .collect();

        if targets.is_empty() {
            info!("start ignored, no monitor selected");
            return Ok(0);
        }

        match self.overlays.activate(&targets) {
            Ok(count) => Ok(count),
            Err(e) => {
                warn!("blackout failed: {e}");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Return to the menu if any overlay saw a key press or click.
    pub fn poll_dismiss(&mut self) -> bool {
        self.overlays.poll_dismiss()
    }

    /// Close all overlays and return to the menu.
    pub fn stop(&mut self) {
        self.overlays.deactivate();
    }

    /// Replace the monitor list after a fresh enumeration.
    ///
    /// Selection flags carry over by position, see [`Selection::rebuild`].
    pub fn refresh_monitors(&mut self, monitors: Vec<Monitor>) {
        self.stop();
        self.selection = Selection::rebuild(&monitors, self.selection.entries());
        info!(count = monitors.len(), "monitor list refreshed");
        self.monitors = monitors;
    }

    /// Like [`refresh_monitors`](Self::refresh_monitors) but from a fallible query.
    ///
    /// On failure the current list is kept and the error is shown in the menu.
    pub fn refresh_with(&mut self, query: impl FnOnce() -> Result<Vec<Monitor>>) {
        match query() {
            Ok(monitors) => {
                self.last_error = None;
                self.refresh_monitors(monitors);
            }
            Err(e) => {
                warn!("monitor refresh failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    #[cfg(test)]
    fn backend(&self) -> &B {
        self.overlays.backend()
    }

    #[cfg(test)]
    fn backend_mut(&mut self) -> &mut B {
        self.overlays.backend_mut()
    }
}

impl<B: OverlayBackend> std::fmt::Debug for Blackout<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blackout")
            .field("phase", &self.phase())
            .field("monitors", &self.monitors)
            .field("selection", &self.selection)
            .field("active_overlays", &self.overlays.active_count())
            .finish()
    }
}

/// Ensure enumeration produced something worth showing.
pub fn require_monitors(monitors: Vec<Monitor>) -> Result<Vec<Monitor>> {
    if monitors.is_empty() {
        return Err(BlackoutError::Enumeration(
            "no monitors detected".to_string(),
        ));
    }
    Ok(monitors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::DismissInput;
    use crate::overlay::testing::FakeBackend;

    fn two_monitors() -> Vec<Monitor> {
        vec![
            Monitor::new(0, 0, 1920, 1080, true),
            Monitor::new(1920, 0, 1080, 1920, false),
        ]
    }

    fn flags(app: &Blackout<FakeBackend>) -> Vec<bool> {
        app.selection().entries().iter().map(|e| e.selected).collect()
    }

    #[test]
    fn test_initial_state() {
        let app = Blackout::new(two_monitors(), FakeBackend::default());
        assert_eq!(app.phase(), Phase::Menu);
        assert_eq!(flags(&app), vec![true, true]);
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_deselect_start_dismiss_scenario() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::default());
        app.toggle(1).unwrap();

        assert_eq!(app.start().unwrap(), 1);
        assert_eq!(app.phase(), Phase::OverlayActive);
        let live = app.backend().live_configs();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].bounds(), (0, 0, 1920, 1080));

        app.backend_mut().push_dismiss(DismissInput::Key);
        assert!(app.poll_dismiss());
        assert_eq!(app.phase(), Phase::Menu);
        assert_eq!(app.backend().live_count(), 0);
        assert!(app.backend().menu_visible);
        assert_eq!(flags(&app), vec![true, false]);
    }

    #[test]
    fn test_start_with_empty_selection_stays_in_menu() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::default());
        app.toggle(0).unwrap();
        app.toggle(1).unwrap();

        assert_eq!(app.start().unwrap(), 0);
        assert_eq!(app.phase(), Phase::Menu);
        assert!(app.backend().created.is_empty());
        assert!(app.backend().menu_visible);
    }

    #[test]
    fn test_toggle_during_blackout_does_not_touch_live_overlays() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::default());
        app.start().unwrap();
        app.toggle(0).unwrap();

        assert_eq!(app.backend().live_count(), 2);
        app.stop();
        assert_eq!(flags(&app), vec![false, true]);
    }

    #[test]
    fn test_failed_start_reports_and_stays_in_menu() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::failing_at(1));
        assert!(app.start().is_err());
        assert_eq!(app.phase(), Phase::Menu);
        assert_eq!(app.backend().live_count(), 0);
        assert!(app.last_error().unwrap().contains("monitor 2"));

        // The backend only fails once; a retry succeeds and clears the message.
        assert_eq!(app.start().unwrap(), 2);
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::default());
        app.stop();
        app.stop();
        assert_eq!(app.phase(), Phase::Menu);
        assert_eq!(app.backend().menu_shows, 0);
    }

    #[test]
    fn test_dismiss_without_overlays_is_ignored() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::default());
        app.backend_mut().push_dismiss(DismissInput::Click);
        assert!(!app.poll_dismiss());
        assert_eq!(app.phase(), Phase::Menu);
    }

    #[test]
    fn test_refresh_carries_flags_by_position() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::default());
        app.toggle(1).unwrap();

        let mut grown = two_monitors();
        grown.push(Monitor::new(-1280, 0, 1280, 1024, false));
        app.refresh_monitors(grown);

        assert_eq!(app.monitors().len(), 3);
        assert_eq!(flags(&app), vec![true, false, true]);
    }

    #[test]
    fn test_refresh_tears_down_active_blackout() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::default());
        app.start().unwrap();
        app.refresh_monitors(two_monitors());
        assert_eq!(app.phase(), Phase::Menu);
        assert_eq!(app.backend().live_count(), 0);
    }

    #[test]
    fn test_refresh_failure_keeps_list() {
        let mut app = Blackout::new(two_monitors(), FakeBackend::default());
        app.refresh_with(|| Err(BlackoutError::Enumeration("gone".to_string())));
        assert_eq!(app.monitors().len(), 2);
        assert!(app.last_error().unwrap().contains("gone"));

        app.refresh_with(|| Ok(vec![Monitor::new(0, 0, 800, 600, true)]));
        assert_eq!(app.monitors().len(), 1);
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_require_monitors() {
        assert!(require_monitors(Vec::new()).is_err());
        assert_eq!(require_monitors(two_monitors()).unwrap().len(), 2);
    }
}
