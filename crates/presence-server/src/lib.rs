//! HTTP surface of the Presence service.

pub mod routes;
pub mod state;

pub use routes::routes;
pub use state::AppState;
