//! Window and tab lifecycle core for S-Tran.
//!
//! A [`Session`] owns the windows and the shared [`ContentProfile`]. Each
//! [`Window`] owns one [`TabContainer`], which owns its [`Tab`]s. Content
//! signals bubble up as return values: a tab reports a [`TabSignal`], the
//! container forwards it only when that tab is active, and the window
//! projects it onto its [`ChromeState`].
//!
//! The rendering engine is reached only through the [`ContentEngine`] and
//! [`ContentSurface`] traits. Everything here runs on the control thread.

pub mod address;
pub mod container;
pub mod engine;
pub mod profile;
pub mod session;
pub mod signals;
pub mod tab;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use address::url_from_user_input;
pub use container::TabContainer;
pub use engine::{ContentEngine, ContentSurface};
pub use profile::{ContentProfile, InjectedScript};
pub use session::{Session, SessionOptions};
pub use signals::{ChromeState, ContainerSignal, TabSignal, TabState, TabSummary};
pub use tab::Tab;
pub use window::{CloseDecision, Window, WindowState};
