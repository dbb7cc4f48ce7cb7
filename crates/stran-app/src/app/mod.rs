//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the browsing [`Session`](stran_browser::Session), the
//! native windows and WebViews backing it, and the translation dispatcher.

mod core;
mod dispatch;
mod engine;
mod event_handler;
mod polling;
mod shutdown;
mod toolbar;
mod types;

pub use self::core::StranApp;
