//! Per-tick work: WebView events, finished jobs, config reloads.

use std::time::Instant;

use stran_config::schema::StranConfig;
use stran_webview::WebViewEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::StranApp;
use super::engine::WryEngine;
use super::types::POLL_INTERVAL;

impl StranApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events(event_loop);
            self.poll_completed_jobs();
            self.poll_config_reload();
            self.session.flush_disposed();
        }

        if self.chrome_dirty || !self.notifications.is_empty() {
            self.render_chrome();
        }

        if self.should_exit {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn poll_webview_events(&mut self, event_loop: &ActiveEventLoop) {
        for event in self.webviews.drain_events() {
            match event {
                WebViewEvent::Surface { tab, event } => {
                    let mut engine = WryEngine::new(event_loop, &mut self.natives, &self.webviews);
                    if let Err(e) = self.session.handle_surface_event(&mut engine, tab, &event) {
                        tracing::warn!(tab_id = %tab, error = %e, "surface event failed");
                    }
                    self.chrome_dirty = true;
                }
                WebViewEvent::BridgeCall { tab, call, text } => {
                    let reply = self.dispatcher.handle_request(tab, &text);
                    self.session.send_bridge_reply(tab, call, &reply.to_json());
                }
                WebViewEvent::Toolbar { window, message } => {
                    self.handle_toolbar_message(event_loop, window, &message);
                }
            }
        }

        if self.session.is_empty() && self.started {
            tracing::info!("Last window closed");
            self.should_exit = true;
        }
    }

    fn poll_completed_jobs(&mut self) {
        for completion in self.dispatcher.drain_completed() {
            let payload = completion.to_bridge_event().to_json();
            self.session.deliver_translation(completion.origin, &payload);
        }
    }

    fn poll_config_reload(&mut self) {
        let Some(rx) = self.config_rx.as_mut() else {
            return;
        };
        match rx.has_changed() {
            Ok(true) => {
                let config = rx.borrow_and_update().clone();
                self.apply_config(config);
            }
            Ok(false) => {}
            Err(_) => {
                tracing::debug!("config reload channel closed");
                self.config_rx = None;
            }
        }
    }

    /// Adopt a reloaded config. Jobs already running keep the settings
    /// they captured.
    pub(super) fn apply_config(&mut self, config: StranConfig) {
        self.settings.replace(config.translator.clone());
        self.webviews
            .set_new_window_kind(config.browser.new_window_target.into());
        tracing::info!(
            target_language = %config.translator.target_language,
            "config reloaded"
        );
        self.config = config;
        self.chrome_dirty = true;
    }
}
