use crate::{config::Config, models::NavigationState, models::MediaType};

/// Third-party player host the watch page embeds
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    base_url: String,
}

impl EmbedConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.embed_base_url.clone())
    }

    /// Movies embed by id; series always open on season 1 episode 1.
    pub fn embed_url(&self, target: &NavigationState) -> String {
        let id = urlencoding::encode(&target.id);
        match target.media_type {
            MediaType::Movie => format!("{}/movie/{}", self.base_url, id),
            MediaType::Tv => format!("{}/tv/{}/1/1", self.base_url, id),
        }
    }
}
