use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::FeedbackModel;
use crate::sheets::SheetSource;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both collaborators sit behind traits so the pipeline can run against
/// stubs in tests: `GoogleSheetsSource` and `DeepSeekClient` in production.
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SheetSource>,
    pub model: Arc<dyn FeedbackModel>,
    pub config: Config,
}
