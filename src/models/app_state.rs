use std::sync::Arc;

use tokio::sync::Mutex;

use crate::view::UserDirectoryView;

#[derive(Clone)]
pub struct AppState {
    /// The single directory view instance. The async mutex serializes
    /// operations: one outstanding remote call at a time, and the view is
    /// never mutated concurrently.
    pub view: Arc<Mutex<UserDirectoryView>>,
    /// Kept alongside the view for display purposes (page footer).
    pub api_base_url: String,
    pub custom_css: Option<String>,
}
