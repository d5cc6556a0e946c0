use serde::Serialize;

use crate::data_models::RelativeResult;
use crate::widget::WidgetState;

// Requests use `FormInput` directly.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<RelativeResult>,
    pub submit_enabled: bool,
}

impl From<WidgetState> for SubmitResponse {
    fn from(state: WidgetState) -> Self {
        SubmitResponse {
            submit_enabled: state.submit_enabled(),
            loading: state.loading,
            error: state.error,
            result: state.result,
        }
    }
}
