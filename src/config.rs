use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    #[serde(default)]
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that poster paths are appended to
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Poster shown when an item has no artwork
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    /// Video embed host, without the `/movie` or `/tv` segment
    #[serde(default = "default_embed_base_url")]
    pub embed_base_url: String,

    /// Minimum trimmed query length before a search request is issued
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,

    /// Quiet period after the last keystroke before searching
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Name shown in page titles
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_placeholder_image() -> String {
    "/static/placeholder-poster.svg".to_string()
}

fn default_embed_base_url() -> String {
    "https://www.vidking.net/embed".to_string()
}

fn default_search_min_chars() -> usize {
    3
}

fn default_search_debounce_ms() -> u64 {
    400
}

fn default_site_name() -> String {
    "Cinescope".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: String::new(),
            tmdb_api_url: default_tmdb_api_url(),
            image_base_url: default_image_base_url(),
            placeholder_image: default_placeholder_image(),
            embed_base_url: default_embed_base_url(),
            search_min_chars: default_search_min_chars(),
            search_debounce_ms: default_search_debounce_ms(),
            site_name: default_site_name(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        Ok(config.normalized())
    }

    /// Strips trailing slashes so paths can be joined with `format!`
    pub fn normalized(mut self) -> Self {
        for url in [
            &mut self.tmdb_api_url,
            &mut self.image_base_url,
            &mut self.embed_base_url,
        ] {
            let trimmed = url.trim_end_matches('/').len();
            url.truncate(trimmed);
        }
        self
    }

    /// Names of required values that are empty.
    ///
    /// Missing values are not fatal: pages degrade to an in-page error instead.
    pub fn missing_values(&self) -> Vec<&'static str> {
        [
            ("TMDB_API_KEY", &self.tmdb_api_key),
            ("TMDB_API_URL", &self.tmdb_api_url),
            ("IMAGE_BASE_URL", &self.image_base_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
