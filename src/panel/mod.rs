//! Panel orchestration
//!
//! ## Modules
//!
//! - `assistant`: Runtime message shapes and the model collaborator trait
//! - `controller`: Session, busy flag, request/replace cycle
//! - `state`: What the panel displays
//! - `errors`: Panel error type

pub mod assistant;
pub mod controller;
pub mod errors;
pub mod state;

pub use assistant::{AssistAction, AssistReply, AssistRequest, Assistant};
pub use controller::PanelController;
pub use errors::{PanelError, CONTEXT_LOST_MESSAGE};
pub use state::{PanelOutcome, PanelState};
