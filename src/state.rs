use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::translate::{TranslatorFactory, TranslatorInterface};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<dyn TranslatorInterface>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = Client::builder().build()?;
        let translator = TranslatorFactory::create_translator(&config.translator_config, client)?;
        Ok(Self::with_translator(config, translator))
    }

    pub fn with_translator(config: Config, translator: Arc<dyn TranslatorInterface>) -> Self {
        Self {
            config: Arc::new(config),
            translator,
        }
    }
}
