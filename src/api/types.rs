//! Result shapes returned to the content script

use serde::Serialize;

use crate::inject::InjectionResult;
use crate::panel::{PanelOutcome, PanelState};

/// Result of the "Replace" action
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceReport {
    pub result: InjectionResult,
    /// Text for the panel notice when the page could not be written
    pub message: Option<&'static str>,
}

impl From<InjectionResult> for ReplaceReport {
    fn from(result: InjectionResult) -> Self {
        Self {
            result,
            message: result.notice(),
        }
    }
}

/// Result of a submitted request, with the state to render next
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReport {
    pub outcome: PanelOutcome,
    pub state: PanelState,
}
