use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        EmbedConfig, MetadataProvider, Presenter, SearchController, SearchSettings, TmdbProvider,
        WatchController,
    },
};

/// Shared application state.
///
/// Holds only immutable configuration and the provider; every search session
/// and watch page builds its own controller from it.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MetadataProvider>,
    pub presenter: Presenter,
    pub embed: EmbedConfig,
    pub search_settings: SearchSettings,
}

impl AppState {
    /// Creates state around an explicit provider
    pub fn new(config: &Config, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            presenter: Presenter::from_config(config),
            embed: EmbedConfig::from_config(config),
            search_settings: SearchSettings::from_config(config),
        }
    }

    /// Creates state backed by the TMDB API
    pub fn from_config(config: &Config) -> Self {
        Self::new(config, Arc::new(TmdbProvider::from_config(config)))
    }

    pub fn search_controller(&self) -> SearchController {
        SearchController::new(
            Arc::clone(&self.provider),
            self.presenter.clone(),
            self.search_settings.clone(),
        )
    }

    pub fn watch_controller(&self) -> WatchController {
        WatchController::new(
            Arc::clone(&self.provider),
            self.presenter.clone(),
            self.embed.clone(),
        )
    }
}
