use redux_core::models::Position;

use crate::coverage::Coverage;

pub trait CoverageClassifier: Send + Sync {
    fn classify(&self, pos: Position) -> Coverage;

    /// Classify positions given in ascending order.
    ///
    /// The default answers each query independently; implementors with a
    /// cursor should override it.
    fn classify_sorted(&self, positions: &[Position]) -> Vec<Coverage> {
        positions.iter().map(|p| self.classify(*p)).collect()
    }
}
