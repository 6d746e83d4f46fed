use crate::domain::model::ScrollTarget;
use crate::domain::ports::Viewport;

/// Viewport that records every scroll request instead of moving anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingViewport {
    pub history: Vec<ScrollTarget>,
}

impl RecordingViewport {
    pub fn scroll_top(&self) -> f64 {
        self.history.last().map(|t| t.top).unwrap_or(0.0)
    }
}

impl Viewport for RecordingViewport {
    fn scroll_to(&mut self, target: ScrollTarget) {
        tracing::debug!("Scrolling to {} ({:?})", target.top, target.behavior);
        self.history.push(target);
    }
}
