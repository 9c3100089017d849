pub mod embed;
pub mod providers;
pub mod render;
pub mod search;
pub mod watch;

pub use embed::EmbedConfig;
pub use providers::{MetadataProvider, TmdbProvider};
pub use render::Presenter;
pub use search::{SearchController, SearchEvent, SearchHandle, SearchSettings, SearchUpdate};
pub use watch::WatchController;
