pub mod api;
pub mod views;

pub use api::{AppState, create_router};
