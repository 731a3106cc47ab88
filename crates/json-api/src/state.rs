//! State

use std::sync::Arc;

use stockroom_app::context::AppContext;

/// Per-process state injected into every request's depot.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
