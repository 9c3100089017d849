//! HTTP surface: JSON endpoints, server-rendered pages and the search socket.

pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;
pub mod static_files;
pub mod ws;

pub use routes::create_router;
pub use state::AppState;
