//! State notifications passed up the Tab -> TabContainer -> Window chain.

use serde::Serialize;
use stran_common::{NavAction, TabId};

const APP_NAME: &str = "S-Tran";

/// A change in one tab's visible state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSignal {
    TitleChanged(String),
    UrlChanged(String),
    NavigationEnabledChanged { action: NavAction, enabled: bool },
    TranslationEnabledChanged(bool),
}

/// What a container reports to its window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerSignal {
    /// A state change of the active tab.
    Tab(TabSignal),
    /// The last tab was closed.
    CloseRequested,
}

/// Everything about a tab the window chrome can show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TabState {
    pub title: String,
    pub url: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub translation_enabled: bool,
}

impl TabState {
    /// The signals that bring a window fully in line with this state.
    pub fn to_signals(&self) -> Vec<TabSignal> {
        vec![
            TabSignal::TitleChanged(self.title.clone()),
            TabSignal::UrlChanged(self.url.clone()),
            TabSignal::NavigationEnabledChanged {
                action: NavAction::Back,
                enabled: self.can_go_back,
            },
            TabSignal::NavigationEnabledChanged {
                action: NavAction::Forward,
                enabled: self.can_go_forward,
            },
            TabSignal::TranslationEnabledChanged(self.translation_enabled),
        ]
    }
}

/// One entry of a window's tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabSummary {
    pub id: TabId,
    pub label: String,
    pub active: bool,
}

/// Window chrome: a projection of the active tab, never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChromeState {
    pub page_title: String,
    pub address: String,
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub translation_enabled: bool,
}

impl ChromeState {
    pub fn apply(&mut self, signal: &TabSignal) {
        match signal {
            TabSignal::TitleChanged(title) => self.page_title.clone_from(title),
            TabSignal::UrlChanged(url) => self.address.clone_from(url),
            TabSignal::NavigationEnabledChanged { action, enabled } => match action {
                NavAction::Back => self.back_enabled = *enabled,
                NavAction::Forward => self.forward_enabled = *enabled,
                NavAction::Reload => {}
            },
            TabSignal::TranslationEnabledChanged(enabled) => self.translation_enabled = *enabled,
        }
    }

    /// `"{title} - S-Tran"`, or just `"S-Tran"` for an untitled page.
    pub fn window_title(&self) -> String {
        if self.page_title.is_empty() {
            APP_NAME.to_string()
        } else {
            format!("{} - {APP_NAME}", self.page_title)
        }
    }

    pub fn matches(&self, state: &TabState) -> bool {
        self.page_title == state.title
            && self.address == state.url
            && self.back_enabled == state.can_go_back
            && self.forward_enabled == state.can_go_forward
            && self.translation_enabled == state.translation_enabled
    }
}
