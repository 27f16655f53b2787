use std::sync::Arc;

use chrono::FixedOffset;

use crate::config::RelayConfig;
use crate::integration::SheetsIntegration;

pub struct AppState {
    pub config: RelayConfig,
    pub integration: SheetsIntegration,
    pub offset: FixedOffset,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Arc<Self> {
        let integration = SheetsIntegration::from_config(&config);
        Self::with_integration(config, integration)
    }

    pub fn with_integration(config: RelayConfig, integration: SheetsIntegration) -> Arc<Self> {
        let offset = config.utc_offset();
        Arc::new(Self {
            config,
            integration,
            offset,
        })
    }
}
