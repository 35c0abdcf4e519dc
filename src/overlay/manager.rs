use tracing::{debug, info, warn};

use crate::error::Result;
use crate::monitor::Monitor;
use crate::overlay::config::OverlayConfig;

/// Input on an overlay that ends the blackout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissInput {
    /// Any key, including system keys such as Alt.
    Key,
    /// Primary pointer button.
    Click,
    /// The OS asked an overlay to close (e.g. Alt+F4).
    Close,
}

/// Platform side of the overlay lifecycle.
///
/// All methods are called from the UI thread.
pub trait OverlayBackend {
    type Handle;

    /// Create and show one overlay window.
    fn create(&mut self, config: &OverlayConfig) -> Result<Self::Handle>;

    /// Destroy an overlay. Failures are reported but the manager never surfaces them.
    fn destroy(&mut self, handle: Self::Handle) -> Result<()>;

    /// Give keyboard focus to an overlay so key presses reach it.
    fn focus(&mut self, handle: &Self::Handle);

    fn set_menu_visible(&mut self, visible: bool);

    /// Drain pending dismiss input, returning the first one if any arrived.
    fn take_dismiss(&mut self) -> Option<DismissInput>;
}

/// Owns the live overlay set for the current blackout session.
///
/// The live set is either empty or holds exactly one overlay per monitor that
/// was selected when [`activate`](Self::activate) ran.
pub struct OverlayManager<B: OverlayBackend> {
    backend: B,
    live: Vec<B::Handle>,
    menu_hidden: bool,
}

impl<B: OverlayBackend> OverlayManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: Vec::new(),
            menu_hidden: false,
        }
    }

    /// Cover every `(index, monitor)` in `targets` with an overlay.
    ///
    /// An empty `targets` is a no-op. Any overlays from a previous activation
    /// are torn down first. If one overlay fails to open, the ones already
    /// opened for this call are destroyed and the error is returned; the menu
    /// stays visible in that case.
    pub fn activate(&mut self, targets: &[(usize, &Monitor)]) -> Result<usize> {
        self.deactivate();

        if targets.is_empty() {
            return Ok(0);
        }

        let mut created = Vec::with_capacity(targets.len());
        for &(index, monitor) in targets {
            let config = OverlayConfig::for_monitor(index, monitor);
            match self.backend.create(&config) {
                Ok(handle) => created.push(handle),
                Err(e) => {
                    warn!(
                        monitor = index,
                        rolled_back = created.len(),
                        "overlay creation failed, rolling back: {e}"
                    );
                    for handle in created {
                        self.destroy_quietly(handle);
                    }
                    return Err(e);
                }
            }
        }

        // Stale input from an earlier session must not dismiss this one.
        while self.backend.take_dismiss().is_some() {}

        if let Some(first) = created.first() {
            self.backend.focus(first);
        }
        self.backend.set_menu_visible(false);
        self.menu_hidden = true;
        self.live = created;

        info!(count = self.live.len(), "blackout active");
        Ok(self.live.len())
    }

    /// Destroy every live overlay and show the menu again.
    ///
    /// Safe to call any number of times; with nothing live it does nothing.
    pub fn deactivate(&mut self) {
        let had_live = !self.live.is_empty();
        self.destroy_live();
        if self.menu_hidden {
            self.backend.set_menu_visible(true);
            self.menu_hidden = false;
        }
        if had_live {
            info!("blackout dismissed");
        }
    }

    /// Deactivate if any overlay received dismiss input since the last poll.
    ///
    /// Several inputs arriving in the same tick collapse into one teardown.
    pub fn poll_dismiss(&mut self) -> bool {
        let Some(input) = self.backend.take_dismiss() else {
            return false;
        };
        if self.live.is_empty() {
            return false;
        }
        debug!(?input, "dismiss input received");
        self.deactivate();
        true
    }

    pub fn is_active(&self) -> bool {
        !self.live.is_empty()
    }

    /// Returns the number of overlays that are currently alive.
    pub fn active_count(&self) -> usize {
        self.live.len()
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn destroy_live(&mut self) {
        for handle in std::mem::take(&mut self.live) {
            self.destroy_quietly(handle);
        }
    }

    fn destroy_quietly(&mut self, handle: B::Handle) {
        if let Err(e) = self.backend.destroy(handle) {
            debug!("ignoring overlay destroy failure: {e}");
        }
    }
}

impl<B: OverlayBackend> Drop for OverlayManager<B> {
    fn drop(&mut self) {
        self.destroy_live();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::testing::FakeBackend;

    fn two_monitors() -> Vec<Monitor> {
        vec![
            Monitor::new(0, 0, 1920, 1080, true),
            Monitor::new(1920, 0, 1080, 1920, false),
        ]
    }

    fn targets(monitors: &[Monitor]) -> Vec<(usize, &Monitor)> {
        monitors.iter().enumerate().collect()
    }

    #[test]
    fn test_activate_empty_is_noop() {
        let mut manager = OverlayManager::new(FakeBackend::default());
        assert_eq!(manager.activate(&[]).unwrap(), 0);
        assert!(!manager.is_active());
        assert!(manager.backend().created.is_empty());
        assert!(manager.backend().menu_visible);
    }

    #[test]
    fn test_activate_matches_geometry() {
        let monitors = two_monitors();
        let mut manager = OverlayManager::new(FakeBackend::default());
        assert_eq!(manager.activate(&targets(&monitors)).unwrap(), 2);

        let backend = manager.backend();
        assert_eq!(backend.live_count(), 2);
        for (cfg, mon) in backend.created.iter().zip(&monitors) {
            assert_eq!(cfg.bounds(), mon.bounds());
            assert!(cfg.topmost);
        }
        assert!(!backend.menu_visible);
        assert_eq!(backend.focused, Some(0));
    }

    #[test]
    fn test_failed_creation_rolls_back() {
        let monitors = vec![
            Monitor::new(0, 0, 1920, 1080, true),
            Monitor::new(1920, 0, 1920, 1080, false),
            Monitor::new(3840, 0, 1920, 1080, false),
        ];
        let mut manager = OverlayManager::new(FakeBackend::failing_at(2));
        let err = manager.activate(&targets(&monitors)).unwrap_err();

        assert!(format!("{err}").contains("monitor 3"));
        assert!(!manager.is_active());
        assert_eq!(manager.backend().live_count(), 0);
        assert_eq!(manager.backend().destroyed.len(), 2);
        assert!(manager.backend().menu_visible);
    }

    #[test]
    fn test_dismiss_from_any_window_closes_all() {
        let monitors = two_monitors();
        let mut manager = OverlayManager::new(FakeBackend::default());
        manager.activate(&targets(&monitors)).unwrap();

        manager.backend_mut().push_dismiss(DismissInput::Click);
        assert!(manager.poll_dismiss());
        assert!(!manager.is_active());
        assert_eq!(manager.backend().live_count(), 0);
        assert!(manager.backend().menu_visible);
    }

    #[test]
    fn test_simultaneous_dismiss_tears_down_once() {
        let monitors = two_monitors();
        let mut manager = OverlayManager::new(FakeBackend::default());
        manager.activate(&targets(&monitors)).unwrap();

        manager.backend_mut().push_dismiss(DismissInput::Key);
        manager.backend_mut().push_dismiss(DismissInput::Key);
        assert!(manager.poll_dismiss());
        assert!(!manager.poll_dismiss());
        assert_eq!(manager.backend().destroyed.len(), 2);
    }

    #[test]
    fn test_deactivate_without_live_windows() {
        let mut manager = OverlayManager::new(FakeBackend::default());
        manager.deactivate();
        manager.deactivate();
        assert!(manager.backend().destroyed.is_empty());
        assert_eq!(manager.backend().menu_shows, 0);
    }

    #[test]
    fn test_destroy_failures_are_swallowed() {
        let monitors = two_monitors();
        let mut manager = OverlayManager::new(FakeBackend::default());
        manager.activate(&targets(&monitors)).unwrap();
        manager.backend_mut().fail_destroy = true;

        manager.deactivate();
        assert!(!manager.is_active());
        assert!(manager.backend().menu_visible);
    }

    #[test]
    fn test_reactivate_replaces_previous_set() {
        let monitors = two_monitors();
        let mut manager = OverlayManager::new(FakeBackend::default());
        manager.activate(&targets(&monitors)).unwrap();
        manager.activate(&targets(&monitors[..1])).unwrap();

        assert_eq!(manager.active_count(), 1);
        assert_eq!(manager.backend().live_count(), 1);
    }

    #[test]
    fn test_stale_dismiss_is_discarded_on_activate() {
        let monitors = two_monitors();
        let mut manager = OverlayManager::new(FakeBackend::default());
        manager.backend_mut().push_dismiss(DismissInput::Key);
        manager.activate(&targets(&monitors)).unwrap();

        assert!(!manager.poll_dismiss());
        assert!(manager.is_active());
    }
}
