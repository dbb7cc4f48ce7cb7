//! Graceful shutdown: close every window and its WebViews.

use winit::event_loop::ActiveEventLoop;

use super::core::StranApp;
use super::engine::WryEngine;

impl StranApp {
    /// Close all windows without confirmation. Safe to call more than once.
    ///
    /// The tokio runtime is shut down by `main` once the event loop returns,
    /// which cancels any translation still in flight.
    pub(super) fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        tracing::info!(
            windows = self.session.len(),
            jobs_in_flight = self.dispatcher.in_flight(),
            "Initiating graceful shutdown"
        );

        let mut engine = WryEngine::new(event_loop, &mut self.natives, &self.webviews);
        self.session.shutdown(&mut engine);

        for id in self.natives.ids() {
            tracing::warn!(window = %id, "native window left after shutdown");
        }

        self.config_rx = None;
        self.should_exit = true;
        tracing::info!("Graceful shutdown complete");
    }
}
