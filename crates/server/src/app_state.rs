use session_core::PredictionWorkflow;

use crate::registry::SessionRegistry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) registry: SessionRegistry,
    pub(crate) workflow: PredictionWorkflow,
}
