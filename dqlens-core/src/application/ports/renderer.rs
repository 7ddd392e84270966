use crate::application::presenter::ReportView;
use crate::error::QualityError;

/// Turns a projected report into text for the caller to display.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, view: &ReportView) -> Result<String, QualityError>;
}
