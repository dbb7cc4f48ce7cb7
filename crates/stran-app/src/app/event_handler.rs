//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;

use super::core::StranApp;
use super::engine::WryEngine;

impl ApplicationHandler for StranApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        let mut engine = WryEngine::new(event_loop, &mut self.natives, &self.webviews);
        let window = match self.session.create_window(&mut engine) {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("Failed to open the first window: {e}");
                self.should_exit = true;
                event_loop.exit();
                return;
            }
        };

        if let Some(url) = self.initial_url.take() {
            let opened = self
                .session
                .window_mut(window)
                .and_then(|w| w.navigate(&url));
            if !matches!(opened, Ok(true)) {
                tracing::warn!(url = %url, "could not open start page");
            }
        }
        self.chrome_dirty = true;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        winit_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.natives.lookup(winit_id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!(%window, "Window close requested");
                self.request_window_close(event_loop, window);
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.relayout(window);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => self.relayout(window),

            WindowEvent::Moved(position) => {
                if let (Some(native), Ok(w)) =
                    (self.natives.get(window), self.session.window_mut(window))
                {
                    let logical = position.to_logical::<i32>(native.window.scale_factor());
                    let mut geometry = w.geometry();
                    geometry.x = logical.x;
                    geometry.y = logical.y;
                    w.set_geometry(geometry);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}

impl StranApp {
    fn relayout(&mut self, window: stran_common::WindowId) {
        let Some(native) = self.natives.get_mut(window) else {
            return;
        };
        native.layout();
        let (width, height) = native.logical_size();
        if let Ok(w) = self.session.window_mut(window) {
            let mut geometry = w.geometry();
            geometry.width = width.round() as u32;
            geometry.height = height.round() as u32;
            w.set_geometry(geometry);
        }
    }
}
