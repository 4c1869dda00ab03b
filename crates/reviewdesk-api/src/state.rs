use crate::{error::ApiResult, templates::Templates};
use reviewdesk_core::UiConfig;
use reviewdesk_github::ReviewGateway;
use std::sync::Arc;

/// Application state for Axum dependency injection
///
/// Holds everything handlers share:
/// - GitHub gateway bound to the configured repository
/// - Compiled page templates
/// - Presentation settings
#[derive(Clone)]
pub struct AppState {
    /// GitHub operations (real client in production, mock in tests)
    pub gateway: Arc<dyn ReviewGateway>,

    /// Compiled page templates
    pub templates: Arc<Templates>,

    /// Presentation settings
    pub ui: UiConfig,
}

impl AppState {
    /// Create new application state, compiling the templates
    pub fn new(gateway: Arc<dyn ReviewGateway>, ui: UiConfig) -> ApiResult<Self> {
        let templates = Templates::new(ui.clone())?;

        Ok(Self {
            gateway,
            templates: Arc::new(templates),
            ui,
        })
    }
}
