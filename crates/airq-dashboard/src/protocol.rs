use airq_core::Parameters;
use airq_view::DashboardView;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub params: Parameters,
    pub view: DashboardView,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}
