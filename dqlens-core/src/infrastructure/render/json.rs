// dqlens-core/src/infrastructure/render/json.rs

use crate::application::ports::ReportRenderer;
use crate::application::presenter::ReportView;
use crate::error::QualityError;
use crate::infrastructure::error::InfrastructureError;

/// Pretty-printed JSON of the view, tiers included, for scripts and CI.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, view: &ReportView) -> Result<String, QualityError> {
        serde_json::to_string_pretty(view).map_err(render_error)
    }
}

fn render_error(err: serde_json::Error) -> QualityError {
    QualityError::Infrastructure(InfrastructureError::RenderError(err.to_string()))
}
