//! Ordered tabs of one window, with the active-tab signal filter.
//!
//! Every content signal from a tab passes through here and is forwarded
//! to the window only when it comes from the active tab. When the active
//! tab changes, the new tab's full state is forwarded instead, so the
//! window never shows a mix of two tabs.

use std::sync::Arc;

use stran_common::{
    BrowserError, NavAction, NotificationQueue, SurfaceEvent, TabId, WindowId,
};
use stran_config::SettingsProvider;
use tracing::debug;

use crate::engine::ContentEngine;
use crate::profile::ContentProfile;
use crate::signals::{ContainerSignal, TabState, TabSummary};
use crate::tab::{next_tab_id, Tab};

pub struct TabContainer {
    window: WindowId,
    profile: Arc<ContentProfile>,
    tabs: Vec<Tab>,
    /// `None` exactly when `tabs` is empty.
    active: Option<usize>,
    /// Removed tabs whose surfaces are dropped on the next flush.
    pending_disposal: Vec<Tab>,
}

impl TabContainer {
    pub fn new(window: WindowId, profile: Arc<ContentProfile>) -> Self {
        Self {
            window,
            profile,
            tabs: Vec::new(),
            active: None,
            pending_disposal: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn tab(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn index_of(&self, tab: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == tab)
    }

    pub fn contains(&self, tab: TabId) -> bool {
        self.index_of(tab).is_some()
    }

    pub fn profile(&self) -> &Arc<ContentProfile> {
        &self.profile
    }

    pub fn summaries(&self) -> Vec<TabSummary> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| TabSummary {
                id: tab.id(),
                label: tab.label().to_string(),
                active: self.active == Some(i),
            })
            .collect()
    }

    // =========================================================================
    // Tab lifecycle
    // =========================================================================

    /// Append a new tab and, unless `background`, make it active.
    ///
    /// A background tab still becomes active when it is the only tab.
    pub fn create_tab(
        &mut self,
        engine: &mut dyn ContentEngine,
        background: bool,
    ) -> Result<(TabId, Vec<ContainerSignal>), BrowserError> {
        let id = next_tab_id();
        let surface = engine.create_surface(self.window, id, &self.profile)?;
        self.tabs.push(Tab::new(id, surface));
        let index = self.tabs.len() - 1;

        debug!(window = %self.window, tab_id = %id, background, "tab created");

        if background && self.active.is_some() {
            self.tabs[index].set_visible(false);
            return Ok((id, Vec::new()));
        }
        Ok((id, self.activate(index)))
    }

    /// Remove the tab at `index`. Out-of-range indices are ignored.
    ///
    /// Emits the newly active tab's state if the active tab was removed,
    /// or the empty state plus [`ContainerSignal::CloseRequested`] if no
    /// tab is left.
    pub fn close_tab(&mut self, index: usize) -> Vec<ContainerSignal> {
        if index >= self.tabs.len() {
            return Vec::new();
        }

        let mut removed = self.tabs.remove(index);
        removed.set_visible(false);
        debug!(window = %self.window, tab_id = %removed.id(), "tab closed");
        self.pending_disposal.push(removed);

        if self.tabs.is_empty() {
            self.active = None;
            let mut signals = state_signals(&TabState::default());
            signals.push(ContainerSignal::CloseRequested);
            return signals;
        }

        match self.active {
            Some(active) if active == index => {
                // the right neighbour slides into place; fall back to the last tab
                self.active = None;
                self.activate(index.min(self.tabs.len() - 1))
            }
            Some(active) if active > index => {
                self.active = Some(active - 1);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn close_tab_by_id(&mut self, tab: TabId) -> Vec<ContainerSignal> {
        match self.index_of(tab) {
            Some(index) => self.close_tab(index),
            None => Vec::new(),
        }
    }

    /// Make the tab at `index` active.
    pub fn set_active(&mut self, index: usize) -> Vec<ContainerSignal> {
        if index >= self.tabs.len() {
            return Vec::new();
        }
        self.activate(index)
    }

    /// Move a tab to a new position. The same tab stays active.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tabs.len() || to >= self.tabs.len() {
            return false;
        }
        let active_id = self.active_tab().map(Tab::id);
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.active = active_id.and_then(|id| self.index_of(id));
        true
    }

    /// Move every tab to the disposal list. Used when the window goes away.
    pub(crate) fn close_all(&mut self) {
        self.active = None;
        for mut tab in self.tabs.drain(..) {
            tab.set_visible(false);
            self.pending_disposal.push(tab);
        }
    }

    pub fn pending_disposal(&self) -> usize {
        self.pending_disposal.len()
    }

    /// Drop removed tabs and their surfaces. Returns how many were dropped.
    pub fn flush_disposed(&mut self) -> usize {
        let count = self.pending_disposal.len();
        self.pending_disposal.clear();
        count
    }

    // =========================================================================
    // Active-tab delegation
    // =========================================================================

    /// Load `url` in the active tab. Returns `false` without an active tab.
    pub fn set_url(&mut self, url: &str) -> bool {
        match self.active_tab_mut() {
            Some(tab) => {
                tab.load_url(url);
                true
            }
            None => false,
        }
    }

    pub fn trigger_navigation_action(&mut self, action: NavAction) -> bool {
        match self.active_tab_mut() {
            Some(tab) => {
                tab.trigger_action(action);
                true
            }
            None => false,
        }
    }

    pub fn toggle_translation(
        &mut self,
        settings: &dyn SettingsProvider,
        notifications: &mut NotificationQueue,
    ) -> Vec<ContainerSignal> {
        let Some(tab) = self.active_tab_mut() else {
            return Vec::new();
        };
        tab.toggle_translation(settings, notifications)
            .map(ContainerSignal::Tab)
            .into_iter()
            .collect()
    }

    // =========================================================================
    // Content signals
    // =========================================================================

    /// Route a surface event to its tab and filter the result.
    pub fn handle_surface_event(&mut self, tab: TabId, event: &SurfaceEvent) -> Vec<ContainerSignal> {
        let Some(index) = self.index_of(tab) else {
            debug!(window = %self.window, tab_id = %tab, "event for unknown tab ignored");
            return Vec::new();
        };

        if matches!(event, SurfaceEvent::CloseRequested) {
            return self.close_tab(index);
        }

        match self.tabs[index].handle_surface_event(event) {
            Some(signal) if self.active == Some(index) => vec![ContainerSignal::Tab(signal)],
            _ => Vec::new(),
        }
    }

    /// Pass a job result to `tab`'s page. `false` if the tab is gone.
    pub fn deliver_translation(&mut self, tab: TabId, payload: &str) -> bool {
        match self.tab_mut(tab) {
            Some(t) => {
                t.deliver_translation(payload);
                true
            }
            None => false,
        }
    }

    pub fn send_bridge_reply(&mut self, tab: TabId, call: u64, payload: &str) -> bool {
        match self.tab_mut(tab) {
            Some(t) => {
                t.send_bridge_reply(call, payload);
                true
            }
            None => false,
        }
    }

    /// Load `url` in a specific tab, active or not.
    pub fn load_in(&mut self, tab: TabId, url: &str) -> bool {
        match self.tab_mut(tab) {
            Some(t) => {
                t.load_url(url);
                true
            }
            None => false,
        }
    }

    fn tab_mut(&mut self, tab: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id() == tab)
    }

    fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        let index = self.active?;
        self.tabs.get_mut(index)
    }

    fn activate(&mut self, index: usize) -> Vec<ContainerSignal> {
        if self.active == Some(index) {
            return Vec::new();
        }
        if let Some(previous) = self.active.and_then(|i| self.tabs.get_mut(i)) {
            previous.set_visible(false);
        }
        self.active = Some(index);
        let tab = &mut self.tabs[index];
        tab.set_visible(true);
        state_signals(tab.state())
    }
}

fn state_signals(state: &TabState) -> Vec<ContainerSignal> {
    state
        .to_signals()
        .into_iter()
        .map(ContainerSignal::Tab)
        .collect()
}

#[cfg(test)]
mod tests;
