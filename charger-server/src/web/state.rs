//! Application state for the web layer.

use std::sync::Arc;

use crate::finder::ChargerFinder;

/// Shared application state.
///
/// Generic over the finder's collaborators so tests can serve stub
/// directories through the real router.
pub struct AppState<D, L, B> {
    pub finder: Arc<ChargerFinder<D, L, B>>,
}

impl<D, L, B> AppState<D, L, B> {
    pub fn new(finder: ChargerFinder<D, L, B>) -> Self {
        Self {
            finder: Arc::new(finder),
        }
    }
}

impl<D, L, B> Clone for AppState<D, L, B> {
    fn clone(&self) -> Self {
        Self {
            finder: Arc::clone(&self.finder),
        }
    }
}
