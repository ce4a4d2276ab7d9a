pub mod config;
pub mod error;
pub mod index;
pub mod routes;
pub mod state;
pub mod template;
pub mod thumbnail;

pub use routes::app;
pub use state::{AppState, SharedState};
