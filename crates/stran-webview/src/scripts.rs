//! Scripts installed into every content page.

use stran_browser::InjectedScript;

use crate::ipc::IPC_INIT_SCRIPT;

/// Page-side translation feature: selection popup, hover highlight,
/// click-to-translate and the `window.translator` bridge object.
pub const TRANSLATOR_SCRIPT: &str = include_str!("../assets/translator.js");

/// The content profile's script bundle, in install order.
pub fn content_scripts() -> Vec<InjectedScript> {
    vec![
        InjectedScript::new("ipc", IPC_INIT_SCRIPT),
        InjectedScript::new("translator", TRANSLATOR_SCRIPT),
    ]
}
