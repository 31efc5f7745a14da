//! GrammarWise WASM Module
//!
//! Selection capture, word diffing and text injection for the GrammarWise
//! content script. The core modules only talk to the page through
//! [`host::HostPage`]; [`dom`] implements it over `web-sys`, and [`api`]
//! exposes the result to JavaScript.

pub mod diff;
pub mod host;
pub mod inject;
pub mod panel;
pub mod selection;
pub mod settings;
pub mod text;

pub mod api;
pub mod dom;

// Re-export commonly used types
pub use diff::{diff_words, DiffKind, DiffScript, DiffSegment};
pub use host::{Clipboard, EditableSurfaceKind, HostError, HostPage};
pub use inject::{FallbackReason, InjectionResult, TextInjector};
pub use panel::{PanelController, PanelError, PanelState};
pub use selection::{CaptureTrigger, SelectionSnapshot, SelectionTracker};

use wasm_bindgen::prelude::*;

// Runs once when the content script instantiates the module.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Info).is_err() {
            // A logger is already installed (module instantiated twice)
            return;
        }
    }

    log::info!("GrammarWise WASM module initialized");
}
