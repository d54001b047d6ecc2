use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{LanguageModelService, NotifierService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub notifier: Arc<dyn NotifierService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        language_model: Arc<dyn LanguageModelService>,
        notifier: Arc<dyn NotifierService>,
    ) -> Self {
        Self {
            config,
            version_control,
            language_model,
            notifier,
        }
    }
}
