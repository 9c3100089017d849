use std::sync::Arc;

use crate::{
    models::{NavigationState, WatchQuery, WatchView},
    services::{
        embed::EmbedConfig,
        providers::MetadataProvider,
        render::{Presenter, INVALID_PARAMS_MESSAGE, LOAD_FAILED_MESSAGE},
    },
};

/// Loads the detail page for one `?id=&type=` pair.
///
/// Every failure is turned into a [`WatchView::Error`]; nothing here is fatal
/// to the page.
#[derive(Clone)]
pub struct WatchController {
    provider: Arc<dyn MetadataProvider>,
    presenter: Presenter,
    embed: EmbedConfig,
}

impl WatchController {
    pub fn new(provider: Arc<dyn MetadataProvider>, presenter: Presenter, embed: EmbedConfig) -> Self {
        Self {
            provider,
            presenter,
            embed,
        }
    }

    pub async fn load(&self, query: &WatchQuery) -> WatchView {
        let target = match NavigationState::from_query(query) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!(error = %e, ?query, "Rejected watch parameters");
                return WatchView::error(INVALID_PARAMS_MESSAGE);
            }
        };

        match self.provider.fetch_detail(target.media_type, &target.id).await {
            Ok(detail) => self.presenter.watch_view(&detail, &target, &self.embed),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    id = %target.id,
                    media_type = %target.media_type,
                    provider = self.provider.name(),
                    "Failed to load content"
                );
                WatchView::error(LOAD_FAILED_MESSAGE)
            }
        }
    }
}
