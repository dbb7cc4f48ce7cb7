//! Commands from a window's toolbar.

use stran_browser::CloseDecision;
use stran_common::{BrowserError, NavAction, Notification, WindowId};
use stran_webview::IpcMessage;
use winit::event_loop::ActiveEventLoop;

use super::core::StranApp;
use super::engine::WryEngine;

// =============================================================================
// TOOLBAR PROTOCOL
// =============================================================================

/// Allowed IPC message kinds from the toolbar page.
///
/// Any message with a `kind` not in this list is rejected and logged.
const ALLOWED_TOOLBAR_KINDS: &[&str] = &[
    "toolbar_ready",
    "navigate",
    "back",
    "forward",
    "reload",
    "new_tab",
    "close_tab",
    "select_tab",
    "move_tab",
    "toggle_translation",
    "new_window",
    "close_window",
    "confirm_close",
    "save_settings",
];

pub fn is_toolbar_kind_allowed(kind: &str) -> bool {
    ALLOWED_TOOLBAR_KINDS.contains(&kind)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ToolbarCommand {
    Ready,
    Navigate(String),
    Navigation(NavAction),
    NewTab,
    CloseTab(usize),
    SelectTab(usize),
    MoveTab { from: usize, to: usize },
    ToggleTranslation,
    NewWindow,
    CloseWindow,
    ConfirmClose(bool),
    SaveSettings { api_key: String, target_language: String },
}

impl ToolbarCommand {
    /// Decode a toolbar message. Unknown kinds and malformed payloads
    /// yield `None`.
    pub(super) fn parse(msg: &IpcMessage) -> Option<Self> {
        if !is_toolbar_kind_allowed(&msg.kind) {
            return None;
        }
        let index = |key: &str| {
            msg.payload
                .get(key)
                .and_then(|v| v.as_u64())
                .and_then(|v| usize::try_from(v).ok())
        };
        let text = |key: &str| {
            msg.payload
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        let command = match msg.kind.as_str() {
            "toolbar_ready" => Self::Ready,
            "navigate" => Self::Navigate(msg.payload.as_text()?.to_string()),
            "back" => Self::Navigation(NavAction::Back),
            "forward" => Self::Navigation(NavAction::Forward),
            "reload" => Self::Navigation(NavAction::Reload),
            "new_tab" => Self::NewTab,
            "close_tab" => Self::CloseTab(index("index")?),
            "select_tab" => Self::SelectTab(index("index")?),
            "move_tab" => Self::MoveTab {
                from: index("from")?,
                to: index("to")?,
            },
            "toggle_translation" => Self::ToggleTranslation,
            "new_window" => Self::NewWindow,
            "close_window" => Self::CloseWindow,
            "confirm_close" => Self::ConfirmClose(msg.payload.get("accepted")?.as_bool()?),
            "save_settings" => Self::SaveSettings {
                api_key: text("api_key").unwrap_or_default(),
                target_language: text("target_language")?,
            },
            _ => return None,
        };
        Some(command)
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

impl StranApp {
    pub(super) fn handle_toolbar_message(
        &mut self,
        event_loop: &ActiveEventLoop,
        window: WindowId,
        msg: &IpcMessage,
    ) {
        let Some(command) = ToolbarCommand::parse(msg) else {
            tracing::warn!(%window, kind = %msg.kind, "toolbar message rejected");
            return;
        };
        tracing::debug!(%window, ?command, "toolbar command");

        if let Err(e) = self.run_toolbar_command(event_loop, window, command) {
            tracing::warn!(%window, error = %e, "toolbar command failed");
        }
        self.chrome_dirty = true;
    }

    fn run_toolbar_command(
        &mut self,
        event_loop: &ActiveEventLoop,
        window: WindowId,
        command: ToolbarCommand,
    ) -> Result<(), BrowserError> {
        let mut engine = WryEngine::new(event_loop, &mut self.natives, &self.webviews);

        match command {
            ToolbarCommand::Ready => self.send_settings(window),
            ToolbarCommand::Navigate(input) => {
                if !self.session.window_mut(window)?.navigate(&input)? {
                    self.notifications
                        .push(Notification::info("Address", format!("Cannot open '{input}'")));
                }
            }
            ToolbarCommand::Navigation(action) => {
                self.session
                    .window_mut(window)?
                    .trigger_navigation_action(action)?;
            }
            ToolbarCommand::NewTab => {
                let home = self.session.options().home_url.clone();
                let win = self.session.window_mut(window)?;
                win.create_tab(&mut engine, false)?;
                if !home.is_empty() {
                    win.navigate(&home)?;
                }
            }
            ToolbarCommand::CloseTab(index) => self.session.close_tab(&mut engine, window, index)?,
            ToolbarCommand::SelectTab(index) => self.session.window_mut(window)?.select_tab(index)?,
            ToolbarCommand::MoveTab { from, to } => {
                self.session.window_mut(window)?.move_tab(from, to)?;
            }
            ToolbarCommand::ToggleTranslation => {
                self.session
                    .window_mut(window)?
                    .toggle_translation(&*self.settings, &mut self.notifications)?;
            }
            ToolbarCommand::NewWindow => {
                self.session.create_window_from(&mut engine, window)?;
            }
            ToolbarCommand::CloseWindow => {
                let decision = self.session.request_close(&mut engine, window)?;
                self.after_close_decision(window, decision);
            }
            ToolbarCommand::ConfirmClose(accepted) => {
                let decision = self.session.resolve_close(&mut engine, window, accepted)?;
                self.after_close_decision(window, decision);
            }
            ToolbarCommand::SaveSettings {
                api_key,
                target_language,
            } => self.save_settings(&api_key, &target_language),
        }
        Ok(())
    }

    /// Close request from the OS (title-bar button, window manager).
    pub(super) fn request_window_close(&mut self, event_loop: &ActiveEventLoop, window: WindowId) {
        let mut engine = WryEngine::new(event_loop, &mut self.natives, &self.webviews);
        match self.session.request_close(&mut engine, window) {
            Ok(decision) => self.after_close_decision(window, decision),
            Err(e) => tracing::warn!(%window, error = %e, "close request failed"),
        }
        self.chrome_dirty = true;
    }

    fn after_close_decision(&mut self, window: WindowId, decision: CloseDecision) {
        match decision {
            CloseDecision::NeedsConfirmation => {
                if !self.ask_close_confirmation(window) {
                    if let Err(e) = self.session.cancel_close(window) {
                        tracing::warn!(%window, error = %e, "close cancel failed");
                    }
                }
            }
            CloseDecision::Closing => tracing::debug!(%window, "window closed"),
            CloseDecision::Cancelled => tracing::debug!(%window, "close cancelled"),
        }
        if self.session.is_empty() {
            tracing::info!("Last window closed");
            self.should_exit = true;
        }
    }

    fn save_settings(&mut self, api_key: &str, target_language: &str) {
        let Some(path) = self.config_path.clone() else {
            self.notifications.push(Notification::error(
                "Settings",
                "No config file location is available.",
            ));
            return;
        };
        match stran_config::save_translator_settings(
            &mut self.config,
            api_key,
            target_language,
            &path,
        ) {
            Ok(translator) => {
                self.settings.replace(translator);
                self.notifications
                    .push(Notification::info("Settings", "Settings saved."));
                tracing::info!(target_language, "translator settings saved");
            }
            Err(e) => {
                self.notifications
                    .push(Notification::warning("Settings", e.to_string()));
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
