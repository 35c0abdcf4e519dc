//! Recording backend for exercising the overlay lifecycle without a display.

use std::collections::VecDeque;

use crate::error::{BlackoutError, Result};
use crate::overlay::config::OverlayConfig;
use crate::overlay::manager::{DismissInput, OverlayBackend};

#[derive(Debug)]
pub struct FakeBackend {
    /// Configs of every overlay that opened, indexed by handle.
    pub created: Vec<OverlayConfig>,
    /// Handles destroyed successfully.
    pub destroyed: Vec<usize>,
    pub focused: Option<usize>,
    pub menu_visible: bool,
    /// How many times the menu was re-shown.
    pub menu_shows: usize,
    /// Fail the n-th create call (zero-based, over the backend's lifetime).
    pub fail_at: Option<usize>,
    pub fail_destroy: bool,
    attempts: usize,
    pending: VecDeque<DismissInput>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            destroyed: Vec::new(),
            focused: None,
            menu_visible: true,
            menu_shows: 0,
            fail_at: None,
            fail_destroy: false,
            attempts: 0,
            pending: VecDeque::new(),
        }
    }
}

impl FakeBackend {
    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }

    pub fn push_dismiss(&mut self, input: DismissInput) {
        self.pending.push_back(input);
    }

    pub fn live_count(&self) -> usize {
        self.created.len() - self.destroyed.len()
    }

    /// Configs of overlays that are still open.
    pub fn live_configs(&self) -> Vec<&OverlayConfig> {
        self.created
            .iter()
            .enumerate()
            .filter(|(id, _)| !self.destroyed.contains(id))
            .map(|(_, cfg)| cfg)
            .collect()
    }
}

impl OverlayBackend for FakeBackend {
    type Handle = usize;

    fn create(&mut self, config: &OverlayConfig) -> Result<usize> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(BlackoutError::WindowCreation {
                monitor: config.monitor,
                reason: "injected failure".to_string(),
            });
        }
        self.created.push(config.clone());
        Ok(self.created.len() - 1)
    }

    fn destroy(&mut self, handle: usize) -> Result<()> {
        if self.fail_destroy {
            return Err(BlackoutError::WindowDestroy(format!("handle {handle} is gone")));
        }
        self.destroyed.push(handle);
        Ok(())
    }

    fn focus(&mut self, handle: &usize) {
        self.focused = Some(*handle);
    }

    fn set_menu_visible(&mut self, visible: bool) {
        if visible && !self.menu_visible {
            self.menu_shows += 1;
        }
        self.menu_visible = visible;
    }

    fn take_dismiss(&mut self) -> Option<DismissInput> {
        let first = self.pending.pop_front();
        self.pending.clear();
        first
    }
}
